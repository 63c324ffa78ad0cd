//! HTTP client implementation for the Strava v3 API.
//!
//! This module provides a reqwest-based implementation of the
//! [`StravaApi`](crate::StravaApi) trait.

use crate::{ClubActivity, StravaApi, StravaError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

const DEFAULT_PER_PAGE: u32 = 200;
const DEFAULT_MAX_PAGES: u32 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the Strava API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestStravaClient {
    base_url: String,
    club_id: String,
    client_id: String,
    client_secret: SecretString,
    refresh_token: SecretString,
    per_page: u32,
    max_pages: u32,
    client: reqwest::Client,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ReqwestStravaClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Strava API (e.g., "https://www.strava.com")
    /// * `club_id` - The club whose activity feed is fetched
    /// * `client_id` / `client_secret` / `refresh_token` - OAuth credentials
    pub fn new(
        base_url: &str,
        club_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: SecretString,
        refresh_token: SecretString,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            club_id: club_id.into(),
            client_id: client_id.into(),
            client_secret,
            refresh_token,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            client,
        }
    }

    /// Override the pagination parameters (defaults: 200 per page, 10 pages).
    pub fn with_paging(mut self, per_page: u32, max_pages: u32) -> Self {
        self.per_page = per_page;
        self.max_pages = max_pages;
        self
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> StravaError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            401 | 403 => StravaError::Auth(body_snippet),
            _ => StravaError::Api {
                status,
                body: body_snippet,
            },
        }
    }

    /// Decode a JSON body, reporting a snippet of the payload on mismatch.
    fn decode_json<T: serde::de::DeserializeOwned>(
        text: &str,
        what: &str,
    ) -> Result<T, StravaError> {
        serde_json::from_str::<T>(text).map_err(|e| {
            let body_snippet: String = text.chars().take(256).collect();
            StravaError::Decode(format!("{what}: {e} - body: {body_snippet}"))
        })
    }
}

#[async_trait]
impl StravaApi for ReqwestStravaClient {
    async fn refresh_access_token(&self) -> Result<SecretString, StravaError> {
        let url = format!("{}/oauth/token", self.base_url);
        let resp = self
            .client
            .post(&url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.expose_secret()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        let text = resp.text().await?;
        let payload: TokenResponse = Self::decode_json(&text, "token response")?;
        tracing::debug!("refreshed strava access token");
        Ok(SecretString::new(payload.access_token.into()))
    }

    async fn fetch_club_activities(
        &self,
        access_token: &SecretString,
    ) -> Result<Vec<ClubActivity>, StravaError> {
        let url = format!("{}/api/v3/clubs/{}/activities", self.base_url, self.club_id);
        let mut activities = Vec::new();

        for page in 1..=self.max_pages {
            let resp = self
                .client
                .get(&url)
                .bearer_auth(access_token.expose_secret())
                .query(&[
                    ("page", page.to_string()),
                    ("per_page", self.per_page.to_string()),
                ])
                .send()
                .await?;
            if !resp.status().is_success() {
                return Err(self.error_from_response(resp).await);
            }

            let text = resp.text().await?;
            let batch: Vec<ClubActivity> = Self::decode_json(&text, "club activities page")?;
            tracing::debug!(page, count = batch.len(), "fetched club activity page");
            if batch.is_empty() {
                break;
            }
            activities.extend(batch);
        }

        Ok(activities)
    }
}
