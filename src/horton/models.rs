use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// search response
//  └── results[]
//       └── raw
//            ├── fid...          <- community id, machine-generated name
//            └── (dozens of other index fields)

/// Reply from the geo search endpoint. Only `results[].raw` matters.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub raw: Map<String, Value>,
}

/// One page from the move-in-ready endpoint: rendered listing fragments
/// plus the authoritative total for the community.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveInReadyResponse {
    #[serde(rename = "HtmlItems")]
    pub html_items: Vec<String>,
    #[serde(rename = "TotalItems")]
    pub total_items: usize,
}

/// One normalized listing. Everything is text; `price` is empty when the
/// site withholds it (unit under contract). Spec labels the site adds
/// later land in `specs` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub url: String,
    pub address: String,
    pub sqft: String,
    pub price: String,
    #[serde(default)]
    pub specs: HashMap<String, String>,
}

impl Home {
    fn spec(&self, label: &str) -> &str {
        self.specs.get(label).map(String::as_str).unwrap_or("")
    }

    // The site labels these singular: "3 Bed", "2 Car", "1 Story".
    pub fn stories(&self) -> &str {
        self.spec("story")
    }

    pub fn beds(&self) -> &str {
        self.spec("bed")
    }

    pub fn baths(&self) -> &str {
        self.spec("bath")
    }

    pub fn garage(&self) -> &str {
        self.spec("car")
    }
}
