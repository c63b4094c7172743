use serde_json::{Map, Value};

use crate::horton::{discover_communities, CommunitySet, RegionTally, ScraperError, SearchResult};
use crate::regions::Region;
use crate::tests::utils::{search_hit, FakeApi};

// Two windows over the same spot, the way adjacent state queries overlap.
const WINDOW_A: Region = Region {
    name: "window-a",
    url: "https://www.drhorton.com/window-a",
    center: (10.0, 10.0),
};
const WINDOW_B: Region = Region {
    name: "window-b",
    url: "https://www.drhorton.com/window-b",
    center: (10.0, 10.0),
};

#[test]
fn overlapping_windows_dedup_across_regions() {
    let api = FakeApi::new();
    api.add_region("window-a", "fid12345", &["C1", "C2"]);
    api.add_region("window-b", "fid12345", &["C2", "C3"]);

    let mut communities = CommunitySet::new();
    let tally_a = discover_communities(&api, &WINDOW_A, 5.0, "fid", &mut communities).unwrap();
    let tally_b = discover_communities(&api, &WINDOW_B, 5.0, "fid", &mut communities).unwrap();

    assert_eq!(
        tally_a,
        RegionTally {
            found: 2,
            added: 2,
            skipped: 0
        }
    );
    assert_eq!(
        tally_b,
        RegionTally {
            found: 2,
            added: 1,
            skipped: 1
        }
    );
    assert_eq!(communities.iter().collect::<Vec<_>>(), vec!["C1", "C2", "C3"]);
}

#[test]
fn hits_without_id_field_are_skipped_not_fatal() {
    let api = FakeApi::new();
    let mut no_id = Map::new();
    no_id.insert("systitle".to_string(), Value::String("mystery".to_string()));
    api.add_region_hits(
        "window-a",
        vec![search_hit("fid9876", "C1"), SearchResult { raw: no_id }],
    );

    let mut communities = CommunitySet::new();
    let tally = discover_communities(&api, &WINDOW_A, 5.0, "fid", &mut communities).unwrap();

    assert_eq!(tally.found, 2);
    assert_eq!(tally.added, 1);
    assert_eq!(tally.skipped, 0);
    assert_eq!(communities.len(), 1);
}

#[test]
fn region_failure_propagates_and_leaves_set_intact() {
    let api = FakeApi::new();
    api.push_search_error(ScraperError::Network("connection reset".to_string()));

    let mut communities = CommunitySet::new();
    let err = discover_communities(&api, &WINDOW_A, 5.0, "fid", &mut communities).unwrap_err();

    assert!(matches!(err, ScraperError::Network(_)));
    assert!(communities.is_empty());
}

#[test]
fn rediscovering_a_region_adds_nothing() {
    let api = FakeApi::new();
    api.add_region("window-a", "fid12345", &["C1", "C2"]);

    let mut communities = CommunitySet::new();
    discover_communities(&api, &WINDOW_A, 5.0, "fid", &mut communities).unwrap();
    let again = discover_communities(&api, &WINDOW_A, 5.0, "fid", &mut communities).unwrap();

    assert_eq!(again.added, 0);
    assert_eq!(again.skipped, 2);
    assert_eq!(communities.len(), 2);
}
