use thiserror::Error;

/// Errors that can occur while scraping profession data
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The fragment has no template the parser can read
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// A quantity prefix such as `6x` is not a valid integer
    #[error("Malformed quantity: {0:?}")]
    MalformedQuantity(String),

    /// A currency value did not reduce to a plain integer
    #[error("Malformed currency value: {0:?}")]
    MalformedCurrency(String),

    /// Failed to reach the wiki
    #[error("Failed to fetch from wiki: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The wiki answered with an error status or an API error object
    #[error("Wiki API error: {0}")]
    ApiError(String),

    /// Failed to write output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize a record
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
