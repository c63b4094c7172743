use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

use crate::horton::models::Home;
use crate::horton::ScraperError;

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(e.to_string()))
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>()
}

/// The address anchor wraps across lines; collapse runs of whitespace.
fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize one rendered listing fragment into a `Home`.
///
/// Required: link, address, square footage — a fragment without them is
/// rejected and the caller drops it. Price is legitimately absent while a
/// unit is under contract and degrades to "". The trailing-label spec
/// list (bed / bath / car / story, whatever the site adds next) is
/// carried through keyed by the lowercased label.
pub fn scrape_home_attrs(fragment: &str, base_url: &str) -> Result<Home, ScraperError> {
    let doc = Html::parse_fragment(fragment);

    let link_sel = selector("div.info-frame > p.title + p > a")?;
    let a = doc
        .select(&link_sel)
        .next()
        .ok_or(ScraperError::MissingField("listing link"))?;
    let href = a
        .value()
        .attr("href")
        .ok_or(ScraperError::MissingField("listing link"))?;

    let base = Url::parse(base_url)
        .map_err(|e| ScraperError::UnexpectedShape(format!("bad base url: {e}")))?;
    let url = base
        .join(href)
        .map_err(|e| ScraperError::UnexpectedShape(format!("bad listing href: {e}")))?;

    let address = collapse_ws(&text_of(a));
    if address.is_empty() {
        return Err(ScraperError::MissingField("address"));
    }

    let sqft_sel = selector("div.sq-ft > p > strong")?;
    let sqft = doc
        .select(&sqft_sel)
        .next()
        .map(|el| text_of(el).trim().to_string())
        .ok_or(ScraperError::MissingField("sqft"))?;

    // Price withheld while under contract; not an error.
    let price_sel = selector("div.cost > p.price")?;
    let price = doc
        .select(&price_sel)
        .next()
        .map(|el| text_of(el).trim().to_string())
        .unwrap_or_default();

    let li_sel = selector("ul.specs > li")?;
    let strong_sel = selector("strong")?;
    let mut specs = HashMap::new();
    for li in doc.select(&li_sel) {
        let value = match li.select(&strong_sel).next() {
            Some(s) => text_of(s).trim().to_string(),
            None => continue,
        };
        // The label is the loose text after the <strong> value.
        let label = li
            .children()
            .filter_map(|n| n.value().as_text().map(|t| t.trim().to_lowercase()))
            .filter(|t| !t.is_empty())
            .last();
        if let Some(label) = label {
            specs.insert(label, value);
        }
    }

    Ok(Home {
        url: url.to_string(),
        address,
        sqft,
        price,
        specs,
    })
}
