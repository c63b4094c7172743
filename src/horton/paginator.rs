use crate::cache::ResultCache;
use crate::config::ScraperConfig;
use crate::horton::client::HortonApi;
use crate::horton::models::Home;
use crate::horton::normalizer::scrape_home_attrs;
use crate::horton::ScraperError;
use crate::pacer::Pacer;
use crate::signal::StopSignal;

/// How one community's retrieval ended. Completed totals and aborts look
/// the same in the record list (both can be empty), so the outcome rides
/// alongside for the progress log.
#[derive(Debug, PartialEq)]
pub enum FetchOutcome {
    CacheHit,
    Fetched { pages: usize },
    Aborted,
}

#[derive(Debug)]
pub struct FetchResult {
    pub homes: Vec<Home>,
    pub outcome: FetchOutcome,
}

/// Retrieve every move-in-ready home for one community.
///
/// Cache hit short-circuits the network entirely. Otherwise pages are
/// pulled sequentially: `StartIndex` advances by the records accumulated
/// so far (the endpoint pages by cumulative offset, not page number)
/// until the declared total is reached. Connection failures retry the
/// same page after a cooldown; any other failure throws the whole
/// community away — a partial result would be cached as if complete.
/// Only non-empty results are cached.
pub fn fetch_movein_ready(
    api: &dyn HortonApi,
    cache: &dyn ResultCache,
    pacer: &mut Pacer,
    config: &ScraperConfig,
    stop: &StopSignal,
    community_id: &str,
) -> Result<FetchResult, ScraperError> {
    match cache.get(community_id) {
        Ok(Some(payload)) => match serde_json::from_slice::<Vec<Home>>(&payload) {
            Ok(homes) => {
                return Ok(FetchResult {
                    homes,
                    outcome: FetchOutcome::CacheHit,
                });
            }
            Err(e) => {
                eprintln!("⚠️ Bad cache payload for {community_id}, refetching: {e}");
            }
        },
        Ok(None) => {}
        Err(e) => {
            eprintln!("⚠️ Cache read failed for {community_id}, treating as miss: {e}");
        }
    }

    let mut homes: Vec<Home> = Vec::new();
    let mut start_index = 0usize;
    let mut pages = 0usize;
    let mut retries = 0u32;

    loop {
        if stop.is_stopped() {
            return Err(ScraperError::Stopped);
        }

        pacer.pace();

        let page = match api.movein_ready_page(community_id, start_index, config.page_size) {
            Ok(page) => page,
            Err(ScraperError::Network(msg)) => {
                retries += 1;
                eprintln!(
                    "⚠️ Connection failure for {community_id} at index {start_index} (retry {retries}): {msg}"
                );
                if let Some(max) = config.max_retries {
                    if retries > max {
                        eprintln!("❌ Gave up on {community_id} after {max} retries");
                        return Ok(FetchResult {
                            homes: Vec::new(),
                            outcome: FetchOutcome::Aborted,
                        });
                    }
                }
                pacer.cooldown();
                continue; // same page again
            }
            Err(e) => {
                // The response came back wrong. A partial community is
                // worse than a missing one: drop what we have.
                eprintln!("⚠️ Aborting {community_id}: {e}");
                return Ok(FetchResult {
                    homes: Vec::new(),
                    outcome: FetchOutcome::Aborted,
                });
            }
        };

        pages += 1;
        retries = 0;

        let before = homes.len();
        for item in &page.html_items {
            match scrape_home_attrs(item, &config.base_url) {
                Ok(home) => homes.push(home),
                Err(e) => eprintln!("⚠️ Dropping fragment in {community_id}: {e}"),
            }
        }

        eprintln!("  Got {} / {} homes", homes.len(), page.total_items);

        if homes.len() >= page.total_items {
            break;
        }
        if homes.len() == before {
            // Zero new records this page: the endpoint handed back nothing,
            // or every fragment was rejected. Asking for the same offset
            // again would loop forever.
            eprintln!("⚠️ No progress at index {start_index} for {community_id}, stopping");
            break;
        }

        start_index = homes.len();
    }

    if !homes.is_empty() {
        match serde_json::to_vec(&homes) {
            Ok(payload) => {
                if let Err(e) = cache.set(community_id, &payload) {
                    eprintln!("⚠️ Cache write failed for {community_id}: {e}");
                }
            }
            Err(e) => eprintln!("⚠️ Could not serialize homes for {community_id}: {e}"),
        }
    }

    Ok(FetchResult {
        homes,
        outcome: FetchOutcome::Fetched { pages },
    })
}
