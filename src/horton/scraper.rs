// scraper.rs
use crate::cache::ResultCache;
use crate::config::ScraperConfig;
use crate::horton::client::{HortonApi, HttpHortonClient};
use crate::horton::discovery::{discover_communities, CommunitySet};
use crate::horton::models::Home;
use crate::horton::paginator::{fetch_movein_ready, FetchOutcome};
use crate::horton::ScraperError;
use crate::pacer::Pacer;
use crate::regions::REGIONS;
use crate::signal::StopSignal;

pub struct HortonScraper {
    api: Box<dyn HortonApi>,
    config: ScraperConfig,
}

impl HortonScraper {
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = HttpHortonClient::new(&config)?;
        Ok(Self {
            api: Box::new(client),
            config,
        })
    }

    /// Alternate-backend constructor, used by the tests.
    pub fn with_api(api: Box<dyn HortonApi>, config: ScraperConfig) -> Self {
        Self { api, config }
    }

    /// Full run: discovery across every region in catalog order, then
    /// retrieval per community in discovery order. Returns every
    /// normalized home in accumulation order.
    pub fn scrape(&self, cache: &dyn ResultCache, stop: &StopSignal) -> Vec<Home> {
        let mut pacer = Pacer::new(self.config.request_delay, self.config.retry_cooldown);
        let mut communities = CommunitySet::new();
        let mut failed_regions = 0usize;

        for region in REGIONS {
            if stop.is_stopped() {
                eprintln!("🛑 Stop requested, skipping remaining regions");
                break;
            }

            pacer.pace();

            match discover_communities(
                self.api.as_ref(),
                region,
                self.config.radius_miles,
                &self.config.id_field_prefix,
                &mut communities,
            ) {
                Ok(tally) => {
                    eprintln!(
                        "🌎 {}: {} hits, {} new, {} duplicates skipped",
                        region.name, tally.found, tally.added, tally.skipped
                    );
                }
                Err(e) => {
                    // Regions are independent; a coverage gap beats a dead
                    // run. Counted and reported, never fatal.
                    failed_regions += 1;
                    eprintln!("⚠️ Discovery failed for {}: {e}", region.name);
                }
            }
        }

        eprintln!(
            "🏘️ {} communities from {} regions ({failed_regions} regions failed)",
            communities.len(),
            REGIONS.len()
        );

        let mut homes = Vec::new();
        let mut cache_hits = 0usize;
        let mut aborted = 0usize;

        for (i, cid) in communities.iter().enumerate() {
            if stop.is_stopped() {
                eprintln!("🛑 Stop requested, skipping remaining communities");
                break;
            }

            eprintln!("📦 {}/{} {cid}", i + 1, communities.len());

            match fetch_movein_ready(self.api.as_ref(), cache, &mut pacer, &self.config, stop, cid)
            {
                Ok(result) => {
                    match result.outcome {
                        FetchOutcome::CacheHit => {
                            cache_hits += 1;
                            eprintln!("  💾 {} homes from cache", result.homes.len());
                        }
                        FetchOutcome::Fetched { pages } => {
                            eprintln!("  ✅ {} homes in {pages} pages", result.homes.len());
                        }
                        FetchOutcome::Aborted => {
                            aborted += 1;
                        }
                    }
                    homes.extend(result.homes);
                }
                Err(ScraperError::Stopped) => {
                    eprintln!("🛑 Stopped mid-community, partial result for {cid} discarded");
                    break;
                }
                Err(e) => {
                    aborted += 1;
                    eprintln!("⚠️ {cid} failed: {e}");
                }
            }
        }

        eprintln!(
            "🏁 Scraped {} homes total ({cache_hits} cache hits, {aborted} communities aborted)",
            homes.len()
        );

        homes
    }
}
