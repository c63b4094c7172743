use crate::cache::init_cache;
use crate::config::ScraperConfig;
use crate::export::export_homes_csv;
use crate::horton::HortonScraper;
use crate::signal::StopSignal;

mod cache;
mod config;
mod errors;
mod export;
mod horton;
mod pacer;
mod regions;
mod signal;

#[cfg(test)]
mod tests;

fn main() {
    let config = ScraperConfig::default();

    // The cache has to answer before any discovery happens. Finding out
    // halfway through retrieval would mean refetching everything next run.
    let cache = match init_cache(&config.cache_path, "sql/schema.sql") {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("❌ Cache initialization failed: {e}");
            std::process::exit(1);
        }
    };

    let scraper = match HortonScraper::new(config.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Scraper init failed: {e}");
            std::process::exit(1);
        }
    };

    let stop = StopSignal::new();
    let homes = scraper.scrape(&cache, &stop);

    if let Err(e) = export_homes_csv(&homes, &config.output_path) {
        eprintln!("❌ Export failed: {e}");
        std::process::exit(1);
    }

    println!("✅ Exported {} homes to {}", homes.len(), config.output_path);
}
