use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::horton::models::{MoveInReadyResponse, SearchResponse};
use crate::horton::ScraperError;
use crate::regions::Region;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

// The backend evaluates distance server-side. These index field names come
// out of the site's CommunityFinderMap bundle and are shared by every state.
const LAT_FIELD: &str = "@fcoordinatesz32xlatitude33386";
const LNG_FIELD: &str = "@fcoordinatesz32xlongitude33386";
const DIST_FIELD: &str = "@fdistance33386";

/// Most hits the search backend will hand back for one query, however
/// many actually match. Querying wider than a state doesn't help; the
/// per-state windows exist to stay under this cap.
pub const SEARCH_RESULT_CAP: usize = 1000;

/// The two upstream endpoints the pipeline consumes. A trait so the
/// discovery and paging logic run against a canned backend in tests.
pub trait HortonApi {
    fn search_communities(
        &self,
        region: &Region,
        radius_miles: f64,
    ) -> Result<SearchResponse, ScraperError>;

    fn movein_ready_page(
        &self,
        community_id: &str,
        start_index: usize,
        count: usize,
    ) -> Result<MoveInReadyResponse, ScraperError>;
}

pub struct HttpHortonClient {
    client: Client,
    base_url: String,
}

impl HttpHortonClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

/// Split transport failures (worth retrying) from body decode failures
/// (the response came back but isn't what we expect).
fn classify(e: reqwest::Error) -> ScraperError {
    if e.is_decode() {
        ScraperError::JsonParse(e.to_string())
    } else {
        ScraperError::Network(e.to_string())
    }
}

impl HortonApi for HttpHortonClient {
    fn search_communities(
        &self,
        region: &Region,
        radius_miles: f64,
    ) -> Result<SearchResponse, ScraperError> {
        let (lat, lng) = region.center;

        // dist() yields meters; /1610 puts the filter in miles.
        let query_functions = json!([
            {
                "function": format!("dist({LAT_FIELD}, {LNG_FIELD}, {lat}, {lng})/1610"),
                "fieldName": DIST_FIELD,
            }
        ]);

        let form = [
            ("firstResult", "0".to_string()),
            ("numberOfResults", SEARCH_RESULT_CAP.to_string()),
            ("queryFunctions", query_functions.to_string()),
            ("aq", format!("({DIST_FIELD}<{radius_miles})")),
        ];

        let resp = self
            .client
            .post(format!("{}/coveo/rest/v2", self.base_url))
            .form(&form)
            .send()
            .map_err(classify)?;

        resp.json::<SearchResponse>().map_err(classify)
    }

    fn movein_ready_page(
        &self,
        community_id: &str,
        start_index: usize,
        count: usize,
    ) -> Result<MoveInReadyResponse, ScraperError> {
        let form = [
            ("ItemId", community_id.to_string()),
            ("StartIndex", start_index.to_string()),
            ("Count", count.to_string()),
        ];

        let resp = self
            .client
            .post(format!("{}/api/drh/moveinreadyapi/getrelated", self.base_url))
            .form(&form)
            .send()
            .map_err(classify)?;

        resp.json::<MoveInReadyResponse>().map_err(classify)
    }
}
