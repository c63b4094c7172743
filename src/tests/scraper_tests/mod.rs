mod discovery_tests;
mod scrape_tests;
