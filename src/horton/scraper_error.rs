use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScraperError {
    /// Connection-level failure. Retryable: the upstream drops out for
    /// minutes at a time and comes back.
    Network(String),
    JsonParse(String),
    HtmlParse(String),
    /// A listing fragment lacks a field the record cannot exist without.
    MissingField(&'static str),
    UnexpectedShape(String),
    /// The operator asked the run to stop.
    Stopped,
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::Network(msg) => write!(f, "Network error: {msg}"),
            ScraperError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ScraperError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            ScraperError::MissingField(field) => write!(f, "Listing fragment missing {field}"),
            ScraperError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            ScraperError::Stopped => write!(f, "Stopped by operator"),
        }
    }
}

impl Error for ScraperError {}
