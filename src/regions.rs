use scraper::{Html, Selector};
use url::Url;

/// One geographic query window: a state the builder operates in, with the
/// center point its own map pages advertise. The search backend caps every
/// query at 1000 results no matter how many actually match, so coverage
/// comes from querying each state's window separately instead of one
/// national query. Windows overlap near state lines; discovery dedups.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub name: &'static str,
    pub url: &'static str,
    /// (lat, lng) of the state center.
    pub center: (f64, f64),
}

/// Catalog of active markets. Centers were pulled off the state map pages
/// with `parse_state_links` / `parse_map_center` below.
pub const REGIONS: &[Region] = &[
    Region { name: "hawaii", url: "https://www.drhorton.com/hawaii", center: (21.09938, -156.8953) },
    Region { name: "florida", url: "https://www.drhorton.com/florida", center: (28.73217, -81.79927) },
    Region { name: "south-carolina", url: "https://www.drhorton.com/south-carolina", center: (33.93228, -80.67388) },
    Region { name: "georgia", url: "https://www.drhorton.com/georgia", center: (32.86183, -83.49816) },
    Region { name: "alabama", url: "https://www.drhorton.com/alabama", center: (32.5593, -86.88033) },
    Region { name: "tennessee", url: "https://www.drhorton.com/tennessee", center: (35.78239, -86.32741) },
    Region { name: "new-jersey", url: "https://www.drhorton.com/new-jersey", center: (39.94444, -74.95459) },
    Region { name: "pennsylvania", url: "https://www.drhorton.com/pennsylvania", center: (40.18119, -75.54797) },
    Region { name: "delaware", url: "https://www.drhorton.com/delaware", center: (38.98546, -75.51675) },
    Region { name: "maryland", url: "https://www.drhorton.com/maryland", center: (39.07114, -76.74081) },
    Region { name: "washington", url: "https://www.drhorton.com/washington", center: (47.27816, -120.67) },
    Region { name: "texas", url: "https://www.drhorton.com/texas", center: (31.21203, -98.8404) },
    Region { name: "california", url: "https://www.drhorton.com/california", center: (36.92287, -120.3086) },
    Region { name: "arizona", url: "https://www.drhorton.com/arizona", center: (34.28866, -111.7392) },
    Region { name: "nevada", url: "https://www.drhorton.com/nevada", center: (38.98648, -116.8407) },
    Region { name: "utah", url: "https://www.drhorton.com/utah", center: (40.76953, -111.9182) },
    Region { name: "colorado", url: "https://www.drhorton.com/colorado", center: (39.08336, -105.4412) },
    Region { name: "new-mexico", url: "https://www.drhorton.com/new-mexico", center: (34.19944, -106.3048) },
    Region { name: "oregon", url: "https://www.drhorton.com/oregon", center: (43.8485, -120.6598) },
    Region { name: "louisiana", url: "https://www.drhorton.com/louisiana", center: (30.81851, -92.11426) },
    Region { name: "virginia", url: "https://www.drhorton.com/virginia", center: (37.49055, -78.71546) },
    Region { name: "illinois", url: "https://www.drhorton.com/illinois", center: (39.87584, -88.96261) },
    Region { name: "oklahoma", url: "https://www.drhorton.com/oklahoma", center: (35.51939, -98.6967) },
    Region { name: "minnesota", url: "https://www.drhorton.com/minnesota", center: (44.96167, -93.25771) },
    Region { name: "north-carolina", url: "https://www.drhorton.com/north-carolina", center: (35.69635, -79.43424) },
    Region { name: "mississippi", url: "https://www.drhorton.com/mississippi", center: (32.7201, -89.60005) },
    Region { name: "west-virginia", url: "https://www.drhorton.com/west-virginia", center: (38.73081, -80.6711) },
    Region { name: "iowa", url: "https://www.drhorton.com/iowa", center: (42.06827, -93.5092) },
    Region { name: "indiana", url: "https://www.drhorton.com/indiana", center: (39.64506, -86.13032) },
    Region { name: "wisconsin", url: "https://www.drhorton.com/wisconsin", center: (42.58053, -87.86542) },
];

/// States with inventory, read off the `svg#us-map` chooser on the site's
/// no-results page. Returns (name, absolute url) pairs. Used to refresh
/// the catalog when the builder enters new markets.
pub fn parse_state_links(html: &str, base_url: &str) -> Vec<(String, String)> {
    let mut states = Vec::new();

    let selector = match Selector::parse("svg#us-map > g a[href]") {
        Ok(s) => s,
        Err(_) => return states,
    };
    let base = match Url::parse(base_url) {
        Ok(u) => u,
        Err(_) => return states,
    };

    let document = Html::parse_document(html);
    for a in document.select(&selector) {
        let href = match a.value().attr("href") {
            Some(h) => h,
            None => continue,
        };
        let abs = match base.join(href) {
            Ok(u) => u,
            Err(_) => continue,
        };
        let name = href
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(href)
            .to_string();
        states.push((name, abs.to_string()));
    }

    states
}

/// Center (lat, lng) of a state, from the finder-map div on its page.
pub fn parse_map_center(html: &str) -> Option<(f64, f64)> {
    let selector = Selector::parse("div.map > div.CoveoCommunityFinderMap").ok()?;

    let document = Html::parse_document(html);
    let div = document.select(&selector).next()?;

    let lat = div.value().attr("data-latitude")?.trim().parse().ok()?;
    let lng = div.value().attr("data-longitude")?.trim().parse().ok()?;
    Some((lat, lng))
}
