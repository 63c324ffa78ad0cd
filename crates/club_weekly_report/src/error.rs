//! Error types for the weekly report pipeline.

use thiserror::Error;

/// Every failure is fatal to the run; there is no retry or partial posting.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Strava(#[from] strava_club_client::StravaError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("BAND API error: {0}")]
    BandApi(String),
}

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
