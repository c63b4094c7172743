use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::horton::client::HortonApi;
use crate::horton::ScraperError;
use crate::regions::Region;

/// Deduplicated community ids in discovery order. State windows overlap
/// near borders, so a community can turn up in two regions' queries; ids
/// are deduped globally and never removed once inserted.
#[derive(Debug, Default)]
pub struct CommunitySet {
    ids: Vec<String>,
    seen: HashSet<String>,
}

impl CommunitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already present.
    pub fn insert(&mut self, id: String) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.ids.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Per-region discovery counters for the progress log.
#[derive(Debug, Default, PartialEq)]
pub struct RegionTally {
    pub found: usize,
    pub added: usize,
    pub skipped: usize,
}

/// Pull the community id out of one search hit. The id field's full name
/// is machine-generated and has shifted suffix before, so the lookup
/// matches on the configured prefix instead of pinning the exact name.
/// First matching key wins; non-string values don't count as a match.
fn community_id_from_raw(raw: &Map<String, Value>, prefix: &str) -> Option<String> {
    raw.iter().find_map(|(k, v)| {
        if !k.starts_with(prefix) {
            return None;
        }
        v.as_str().map(str::to_string)
    })
}

/// One capped geo query for `region`, merged into `communities`.
pub fn discover_communities(
    api: &dyn HortonApi,
    region: &Region,
    radius_miles: f64,
    id_field_prefix: &str,
    communities: &mut CommunitySet,
) -> Result<RegionTally, ScraperError> {
    let resp = api.search_communities(region, radius_miles)?;

    let mut tally = RegionTally {
        found: resp.results.len(),
        ..Default::default()
    };

    for result in &resp.results {
        match community_id_from_raw(&result.raw, id_field_prefix) {
            Some(id) => {
                if communities.insert(id) {
                    tally.added += 1;
                } else {
                    tally.skipped += 1;
                }
            }
            None => {
                eprintln!(
                    "⚠️ Search hit without a '{id_field_prefix}*' field in {}, skipping",
                    region.name
                );
            }
        }
    }

    Ok(tally)
}
