use crate::{FetchError, LocationError, TimestampError};

/// Why a single refresh cycle did not make it to the page.
#[derive(thiserror::Error, Debug)]
pub enum CycleError {
    #[error("Failed to fetch feed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to decode feed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to normalize timestamp: {0}")]
    Timestamp(#[from] TimestampError),
    #[error("Failed to locate observer: {0}")]
    Location(#[from] LocationError),
    #[error("Failed to write page: {0}")]
    Output(#[from] std::io::Error),
}
