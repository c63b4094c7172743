use std::time::Duration;

/// Everything the run needs, built once in `main` and handed to the
/// components that use it. Nothing reads ambient state.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Site root. Listing links and both API endpoints resolve against it.
    pub base_url: String,
    /// Geo search radius in miles, shared by every region query.
    pub radius_miles: f64,
    /// Records requested per move-in-ready page.
    pub page_size: usize,
    /// Minimum spacing between requests to the site.
    pub request_delay: Duration,
    /// Sleep after a connection-level failure before retrying the same page.
    pub retry_cooldown: Duration,
    /// Retries per page before giving up on a community. `None` retries
    /// until the upstream answers — it drops out for minutes at a time and
    /// comes back — at the cost of hanging on an upstream that never does.
    pub max_retries: Option<u32>,
    /// Key prefix marking the community-id field in search results.
    pub id_field_prefix: String,
    pub cache_path: String,
    pub output_path: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.drhorton.com".to_string(),
            radius_miles: 500.0,
            page_size: 8,
            request_delay: Duration::from_secs(5),
            retry_cooldown: Duration::from_secs(60),
            max_retries: None,
            id_field_prefix: "fid".to_string(),
            cache_path: "horton_cache.sqlite3".to_string(),
            output_path: "DRHorton.csv".to_string(),
        }
    }
}
