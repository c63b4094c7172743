use csv::{QuoteStyle, WriterBuilder};

use crate::errors::ExportError;
use crate::horton::Home;

const HEADERS: [&str; 8] = [
    "URL", "Address", "Sqft", "Price", "Stories", "Beds", "Baths", "Garage",
];

/// Write every home, one row each, in the order they were scraped.
/// Every field is text and stays quoted so downstream consumers don't
/// reinterpret prices or zip-code-looking values.
pub fn export_homes_csv(homes: &[Home], path: &str) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .map_err(|e| ExportError::CsvError(format!("Failed to open {path}: {e}")))?;

    writer
        .write_record(HEADERS)
        .map_err(|e| ExportError::CsvError(format!("Failed to write header: {e}")))?;

    for home in homes {
        writer
            .write_record([
                home.url.as_str(),
                home.address.as_str(),
                home.sqft.as_str(),
                home.price.as_str(),
                home.stories(),
                home.beds(),
                home.baths(),
                home.garage(),
            ])
            .map_err(|e| ExportError::CsvError(format!("Failed to write row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| ExportError::CsvError(format!("Failed to flush {path}: {e}")))?;

    Ok(())
}
