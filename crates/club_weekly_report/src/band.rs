//! Naver BAND publisher: one form-encoded POST to create the post.

use crate::error::ReportError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response envelope from the BAND post-create endpoint. `result_code` of 1
/// means success; anything else is an application-level failure even when
/// the HTTP status is 2xx.
#[derive(Clone, Debug, Deserialize)]
pub struct BandPostResponse {
    pub result_code: i64,
    #[serde(default)]
    pub result_data: Option<BandPostData>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BandPostData {
    #[serde(default)]
    pub post_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BandClient {
    base_url: String,
    access_token: SecretString,
    band_key: String,
    client: reqwest::Client,
}

impl BandClient {
    pub fn new(base_url: &str, access_token: SecretString, band_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            band_key: band_key.into(),
            client,
        }
    }

    /// Post `content` to the band. The error message carries the full
    /// response payload so operators can see what BAND rejected.
    pub async fn post_text(&self, content: &str) -> Result<BandPostResponse, ReportError> {
        let url = format!("{}/v2.2/band/post/create", self.base_url);
        let resp = self
            .client
            .post(&url)
            .form(&[
                ("access_token", self.access_token.expose_secret()),
                ("band_key", self.band_key.as_str()),
                ("content", content),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let body_snippet: String = body.chars().take(256).collect();
            return Err(ReportError::BandApi(format!(
                "HTTP {status}: {body_snippet}"
            )));
        }

        let payload: BandPostResponse = serde_json::from_str(&body)
            .map_err(|e| ReportError::BandApi(format!("decoding response: {e} - body: {body}")))?;
        if payload.result_code != 1 {
            return Err(ReportError::BandApi(format!(
                "result_code {}: {body}",
                payload.result_code
            )));
        }
        tracing::info!(
            post_key = payload
                .result_data
                .as_ref()
                .and_then(|d| d.post_key.as_deref()),
            "posted to BAND"
        );
        Ok(payload)
    }
}
