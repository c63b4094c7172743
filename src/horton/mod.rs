mod client;
mod discovery;
mod models;
mod normalizer;
mod paginator;
mod scraper;
mod scraper_error;

pub use client::{HortonApi, HttpHortonClient};
pub use discovery::{discover_communities, CommunitySet, RegionTally};
pub use models::{Home, MoveInReadyResponse, SearchResponse, SearchResult};
pub use normalizer::scrape_home_attrs;
pub use paginator::{fetch_movein_ready, FetchOutcome, FetchResult};
pub use scraper::HortonScraper;
pub use scraper_error::ScraperError;
