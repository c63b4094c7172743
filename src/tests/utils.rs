use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use serde_json::{Map, Value};

use crate::cache::ResultCache;
use crate::config::ScraperConfig;
use crate::errors::CacheError;
use crate::horton::{HortonApi, MoveInReadyResponse, ScraperError, SearchResponse, SearchResult};
use crate::regions::Region;

/// Config with the waits zeroed out so tests run instantly.
pub fn test_config() -> ScraperConfig {
    ScraperConfig {
        request_delay: Duration::ZERO,
        retry_cooldown: Duration::ZERO,
        ..ScraperConfig::default()
    }
}

/// In-memory stand-in for the SQLite cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &[u8]) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.put(key, value);
        Ok(())
    }
}

/// One search hit whose raw map carries the community id under `field`,
/// next to an unrelated index field.
pub fn search_hit(field: &str, id: &str) -> SearchResult {
    let mut raw = Map::new();
    raw.insert("systitle".to_string(), Value::String("Community".to_string()));
    raw.insert(field.to_string(), Value::String(id.to_string()));
    SearchResult { raw }
}

/// A minimal but complete listing fragment in the site's markup shape.
pub fn listing_fragment(n: usize) -> String {
    format!(
        r#"
        <div class="info-frame">
          <p class="title">Plan {n}</p>
          <p><a href="/texas/austin/community/{n}">{n} Main St, Austin, TX</a></p>
        </div>
        <div class="sq-ft"><p><strong>1,{n}00</strong></p></div>
        <div class="cost"><p class="price">$300,{n}00</p></div>
        <ul class="specs"><li><strong>3</strong> Bed</li></ul>
        "#
    )
}

/// A fragment whose address anchor is empty; the normalizer must reject it.
pub fn broken_fragment() -> String {
    r#"
    <div class="info-frame">
      <p class="title">Plan X</p>
      <p><a href="/texas/austin/community/x"></a></p>
    </div>
    <div class="sq-ft"><p><strong>1,000</strong></p></div>
    "#
    .to_string()
}

/// Canned backend. Search hits are keyed by region name; move-in-ready
/// pages are a per-community script consumed one call at a time, the way
/// the real endpoint walks a community. Attempts and StartIndex values
/// are recorded for assertions.
#[derive(Default)]
pub struct FakeApi {
    search_results: RefCell<HashMap<String, Vec<SearchResult>>>,
    search_errors: RefCell<VecDeque<ScraperError>>,
    search_calls: RefCell<usize>,

    pages: RefCell<HashMap<String, VecDeque<Result<Vec<String>, ScraperError>>>>,
    totals: RefCell<HashMap<String, usize>>,
    page_attempts: RefCell<usize>,
    page_starts: RefCell<Vec<usize>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&self, region_name: &str, field: &str, ids: &[&str]) {
        let hits = ids.iter().map(|id| search_hit(field, id)).collect();
        self.add_region_hits(region_name, hits);
    }

    pub fn add_region_hits(&self, region_name: &str, hits: Vec<SearchResult>) {
        self.search_results
            .borrow_mut()
            .insert(region_name.to_string(), hits);
    }

    pub fn push_search_error(&self, err: ScraperError) {
        self.search_errors.borrow_mut().push_back(err);
    }

    /// Append pages for a community and set its declared total.
    pub fn add_community(&self, id: &str, total: usize, pages: Vec<Vec<String>>) {
        let mut map = self.pages.borrow_mut();
        let script = map.entry(id.to_string()).or_default();
        script.extend(pages.into_iter().map(Ok));
        self.totals.borrow_mut().insert(id.to_string(), total);
    }

    /// Append a scripted failure at the current point in the page sequence.
    pub fn fail_page(&self, id: &str, err: ScraperError) {
        self.pages
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .push_back(Err(err));
    }

    pub fn search_call_count(&self) -> usize {
        *self.search_calls.borrow()
    }

    pub fn page_attempt_count(&self) -> usize {
        *self.page_attempts.borrow()
    }

    /// StartIndex of every successfully served page, in order.
    pub fn recorded_starts(&self) -> Vec<usize> {
        self.page_starts.borrow().clone()
    }
}

impl HortonApi for FakeApi {
    fn search_communities(
        &self,
        region: &Region,
        _radius_miles: f64,
    ) -> Result<SearchResponse, ScraperError> {
        *self.search_calls.borrow_mut() += 1;
        if let Some(err) = self.search_errors.borrow_mut().pop_front() {
            return Err(err);
        }
        let results = self
            .search_results
            .borrow()
            .get(region.name)
            .cloned()
            .unwrap_or_default();
        Ok(SearchResponse { results })
    }

    fn movein_ready_page(
        &self,
        community_id: &str,
        start_index: usize,
        _count: usize,
    ) -> Result<MoveInReadyResponse, ScraperError> {
        *self.page_attempts.borrow_mut() += 1;

        let next = self
            .pages
            .borrow_mut()
            .get_mut(community_id)
            .and_then(|script| script.pop_front());

        let html_items = match next {
            Some(Ok(items)) => items,
            Some(Err(err)) => return Err(err),
            None => Vec::new(),
        };

        self.page_starts.borrow_mut().push(start_index);
        let total_items = self.totals.borrow().get(community_id).copied().unwrap_or(0);

        Ok(MoveInReadyResponse {
            html_items,
            total_items,
        })
    }
}

// The end-to-end tests hand the scraper a boxed handle and keep another
// for assertions.
impl HortonApi for std::sync::Arc<FakeApi> {
    fn search_communities(
        &self,
        region: &Region,
        radius_miles: f64,
    ) -> Result<SearchResponse, ScraperError> {
        (**self).search_communities(region, radius_miles)
    }

    fn movein_ready_page(
        &self,
        community_id: &str,
        start_index: usize,
        count: usize,
    ) -> Result<MoveInReadyResponse, ScraperError> {
        (**self).movein_ready_page(community_id, start_index, count)
    }
}
