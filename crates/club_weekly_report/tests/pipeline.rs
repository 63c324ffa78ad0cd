//! End-to-end pipeline run against mocked Strava and BAND servers.

use chrono::TimeZone;
use club_weekly_report::{BandClient, Config, ReportError, week};
use strava_club_client::http_client::ReqwestStravaClient;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(strava_base: &str, band_base: &str) -> Config {
    let strava_base = strava_base.to_string();
    let band_base = band_base.to_string();
    Config::from_env_with(move |k| match k {
        "STRAVA_CLIENT_ID" => Some("12345".into()),
        "STRAVA_CLIENT_SECRET" => Some("sekrit".into()),
        "STRAVA_REFRESH_TOKEN" => Some("refresh-me".into()),
        "STRAVA_CLUB_ID" => Some("999".into()),
        "BAND_ACCESS_TOKEN" => Some("band-token".into()),
        "BAND_KEY" => Some("band-key".into()),
        "STRAVA_BASE_URL" => Some(strava_base.clone()),
        "BAND_BASE_URL" => Some(band_base.clone()),
        _ => None,
    })
    .expect("config")
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "fresh-token"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn pipeline_posts_ranked_report_and_returns_text() {
    let strava = MockServer::start().await;
    let band = MockServer::start().await;

    mount_token_endpoint(&strava).await;
    // Window for the pinned `now`: 2026-01-26 00:00 .. 2026-02-02 00:00 KST.
    let activities = serde_json::json!([
        {
            "athlete": {"id": 1, "firstname": "Jiho", "lastname": "Park"},
            "start_date": "2026-01-27T01:00:00Z",
            "distance": 10000.0,
            "total_elevation_gain": 100.0
        },
        {
            "athlete": {"id": 1, "firstname": "Jiho", "lastname": "Park"},
            "start_date": "2026-01-28T01:00:00Z",
            "distance": 5000.0,
            "total_elevation_gain": 50.0
        },
        {
            "athlete": {"id": 2, "firstname": "Bora", "lastname": "Lee"},
            "start_date": "2026-01-29T01:00:00Z",
            "distance": 20000.0,
            "total_elevation_gain": 10.0
        },
        {
            "athlete": {"id": 3, "firstname": "Old", "lastname": "Ride"},
            "start_date": "2026-01-10T01:00:00Z",
            "distance": 99000.0,
            "total_elevation_gain": 999.0
        }
    ]);
    Mock::given(method("GET"))
        .and(path("/api/v3/clubs/999/activities"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&activities))
        .mount(&strava)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/clubs/999/activities"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&strava)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.2/band/post/create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"result_code": 1})),
        )
        .mount(&band)
        .await;

    let config = config_for(&strava.uri(), &band.uri());
    let strava_client = ReqwestStravaClient::new(
        &config.strava_base_url,
        &config.strava_club_id,
        &config.strava_client_id,
        config.strava_client_secret.clone(),
        config.strava_refresh_token.clone(),
    );
    let band_client = BandClient::new(
        &config.band_base_url,
        config.band_access_token.clone(),
        &config.band_key,
    );
    let now = week::kst().with_ymd_and_hms(2026, 2, 4, 12, 0, 0).unwrap();

    let text = club_weekly_report::run(&config, &strava_client, &band_client, now)
        .await
        .expect("pipeline");

    assert!(text.starts_with("🏁 지난주 클럽 랭킹 (01/26(월) ~ 02/01(일))"));
    assert!(text.contains(" 1. Bora Lee  |  20.0 km  |  10 m  |  1회"));
    assert!(text.contains(" 2. Jiho Park  |  15.0 km  |  150 m  |  2회"));
    // The out-of-window ride must not leak into the totals.
    assert!(text.contains("📊 전체 합계: 35.0 km / 160 m / 3회 (참여 2명)"));

    // The BAND server received exactly the rendered text as the content field.
    let posts = band.received_requests().await.unwrap();
    assert_eq!(posts.len(), 1);
    let body = String::from_utf8(posts[0].body.clone()).unwrap();
    let decoded: String = url_decode(&body);
    assert!(decoded.contains("지난주 클럽 랭킹"));
    assert!(decoded.contains("band_key=band-key"));
}

#[tokio::test]
async fn pipeline_fails_when_token_refresh_fails() {
    let strava = MockServer::start().await;
    let band = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad grant"))
        .mount(&strava)
        .await;

    let config = config_for(&strava.uri(), &band.uri());
    let strava_client = ReqwestStravaClient::new(
        &config.strava_base_url,
        &config.strava_club_id,
        &config.strava_client_id,
        config.strava_client_secret.clone(),
        config.strava_refresh_token.clone(),
    );
    let band_client = BandClient::new(
        &config.band_base_url,
        config.band_access_token.clone(),
        &config.band_key,
    );
    let now = week::kst().with_ymd_and_hms(2026, 2, 4, 12, 0, 0).unwrap();

    let err = club_weekly_report::run(&config, &strava_client, &band_client, now)
        .await
        .expect_err("should fail");
    assert!(matches!(err, ReportError::Strava(_)));
    // Nothing was posted.
    assert!(band.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn pipeline_posts_no_activity_text_for_an_empty_week() {
    let strava = MockServer::start().await;
    let band = MockServer::start().await;

    mount_token_endpoint(&strava).await;
    Mock::given(method("GET"))
        .and(path("/api/v3/clubs/999/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&strava)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.2/band/post/create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"result_code": 1})),
        )
        .mount(&band)
        .await;

    let config = config_for(&strava.uri(), &band.uri());
    let strava_client = ReqwestStravaClient::new(
        &config.strava_base_url,
        &config.strava_club_id,
        &config.strava_client_id,
        config.strava_client_secret.clone(),
        config.strava_refresh_token.clone(),
    );
    let band_client = BandClient::new(
        &config.band_base_url,
        config.band_access_token.clone(),
        &config.band_key,
    );
    let now = week::kst().with_ymd_and_hms(2026, 2, 4, 12, 0, 0).unwrap();

    let text = club_weekly_report::run(&config, &strava_client, &band_client, now)
        .await
        .expect("pipeline");
    assert!(text.ends_with("지난주 기록된 활동이 없어요 🥲"));
    assert!(!text.contains("TOP"));
}

/// Minimal percent-decoding for asserting on form bodies.
fn url_decode(s: &str) -> String {
    let mut out = Vec::new();
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                if let Ok(b) = u8::from_str_radix(hex, 16) {
                    out.push(b);
                    i += 3;
                } else {
                    out.push(bytes[i]);
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
