use std::sync::Arc;

use crate::horton::{HortonScraper, ScraperError};
use crate::regions::REGIONS;
use crate::signal::StopSignal;
use crate::tests::utils::{listing_fragment, test_config, FakeApi, MemoryCache};

#[test]
fn full_run_discovers_dedups_and_fetches() {
    let api = Arc::new(FakeApi::new());
    api.add_region("florida", "fid11", &["C1", "C2"]);
    api.add_region("texas", "fid11", &["C2", "C3"]);
    api.add_community("C1", 1, vec![vec![listing_fragment(1)]]);
    api.add_community("C2", 1, vec![vec![listing_fragment(2)]]);
    api.add_community("C3", 0, vec![]);

    let cache = MemoryCache::new();
    let scraper = HortonScraper::with_api(Box::new(api.clone()), test_config());
    let homes = scraper.scrape(&cache, &StopSignal::new());

    // Every region in the catalog gets exactly one query.
    assert_eq!(api.search_call_count(), REGIONS.len());
    // C2 shows up in both windows but is fetched once.
    assert_eq!(homes.len(), 2);
    assert_eq!(homes[0].address, "1 Main St, Austin, TX");
    assert_eq!(homes[1].address, "2 Main St, Austin, TX");
    assert!(cache.contains("C1"));
    assert!(cache.contains("C2"));
    assert!(!cache.contains("C3"));
}

#[test]
fn failed_region_does_not_kill_the_run() {
    let api = Arc::new(FakeApi::new());
    // The first region queried errors out; the rest still run.
    api.push_search_error(ScraperError::Network("connection reset".to_string()));
    api.add_region("florida", "fid11", &["C1"]);
    api.add_community("C1", 1, vec![vec![listing_fragment(1)]]);

    let cache = MemoryCache::new();
    let scraper = HortonScraper::with_api(Box::new(api.clone()), test_config());
    let homes = scraper.scrape(&cache, &StopSignal::new());

    assert_eq!(api.search_call_count(), REGIONS.len());
    assert_eq!(homes.len(), 1);
}

#[test]
fn triggered_stop_prevents_any_traffic() {
    let api = Arc::new(FakeApi::new());
    let stop = StopSignal::new();
    stop.trigger();

    let scraper = HortonScraper::with_api(Box::new(api.clone()), test_config());
    let homes = scraper.scrape(&MemoryCache::new(), &stop);

    assert!(homes.is_empty());
    assert_eq!(api.search_call_count(), 0);
    assert_eq!(api.page_attempt_count(), 0);
}
