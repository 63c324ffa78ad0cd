//! Minimal `StravaApi` trait, typed club-activity model, and a reqwest-based
//! client for the two Strava calls the weekly report needs.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub mod http_client;

#[derive(Debug, Error)]
pub enum StravaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("strava api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("decoding response: {0}")]
    Decode(String),
}

/// Athlete as embedded in a club activity. Only the id is mandatory; Strava
/// omits or blanks the name fields depending on club privacy settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClubAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// One activity from the club feed. Distance and elevation gain are in
/// meters; absent fields decode as 0.0. `start_date` is kept as the raw
/// ISO-8601 string (UTC, usually with a trailing `Z`) and parsed downstream.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClubActivity {
    pub athlete: ClubAthlete,
    pub start_date: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub total_elevation_gain: f64,
}

impl ClubAthlete {
    /// Display name: trimmed `firstname lastname`, or `athlete_<id>` when
    /// both name fields are blank.
    pub fn display_name(&self) -> String {
        let joined = format!("{} {}", self.firstname, self.lastname);
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            format!("athlete_{}", self.id)
        } else {
            trimmed.to_string()
        }
    }
}

#[async_trait]
pub trait StravaApi: Send + Sync {
    /// Exchange the long-lived refresh token for a short-lived access token.
    async fn refresh_access_token(&self) -> Result<SecretString, StravaError>;
    /// Fetch the club activity feed, paginating until an empty batch or the
    /// page cap, whichever comes first.
    async fn fetch_club_activities(
        &self,
        access_token: &SecretString,
    ) -> Result<Vec<ClubActivity>, StravaError>;
}
