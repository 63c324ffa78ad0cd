use crate::error::ReportError;
use crate::report::DEFAULT_TOP_N;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub strava_client_id: String,
    pub strava_client_secret: SecretString,
    pub strava_refresh_token: SecretString,
    pub strava_club_id: String,
    pub band_access_token: SecretString,
    pub band_key: String,
    pub top_n: usize,
    pub strava_base_url: String,
    pub band_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ReportError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut require = |k: &str| {
            get(k).ok_or_else(|| ReportError::Config(format!("{k} missing")))
        };
        let strava_client_id = require("STRAVA_CLIENT_ID")?;
        let strava_client_secret = require("STRAVA_CLIENT_SECRET")?;
        let strava_refresh_token = require("STRAVA_REFRESH_TOKEN")?;
        let strava_club_id = require("STRAVA_CLUB_ID")?;
        let band_access_token = require("BAND_ACCESS_TOKEN")?;
        let band_key = require("BAND_KEY")?;

        let top_n = match get("TOP_N") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| ReportError::Config(format!("TOP_N must be a number: {e}")))?,
            None => DEFAULT_TOP_N,
        };
        let strava_base_url =
            get("STRAVA_BASE_URL").unwrap_or_else(|| "https://www.strava.com".into());
        let band_base_url =
            get("BAND_BASE_URL").unwrap_or_else(|| "https://openapi.band.us".into());

        Ok(Self {
            strava_client_id,
            strava_client_secret: SecretString::new(strava_client_secret.into()),
            strava_refresh_token: SecretString::new(strava_refresh_token.into()),
            strava_club_id,
            band_access_token: SecretString::new(band_access_token.into()),
            band_key,
            top_n,
            strava_base_url,
            band_base_url,
        })
    }
}
