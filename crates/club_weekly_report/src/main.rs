use club_weekly_report::{BandClient, Config, week};
use strava_club_client::http_client::ReqwestStravaClient;

#[tokio::main]
async fn main() {
    // Configure logging from env var `WEEKLY_REPORT_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("WEEKLY_REPORT_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let strava = ReqwestStravaClient::new(
        &config.strava_base_url,
        &config.strava_club_id,
        &config.strava_client_id,
        config.strava_client_secret.clone(),
        config.strava_refresh_token.clone(),
    );
    let band = BandClient::new(
        &config.band_base_url,
        config.band_access_token.clone(),
        &config.band_key,
    );

    match club_weekly_report::run(&config, &strava, &band, week::kst_now()).await {
        Ok(text) => {
            println!("✅ Posted to BAND successfully.");
            println!("{text}");
        }
        Err(e) => {
            tracing::error!(error = %e, "weekly report failed");
            std::process::exit(1);
        }
    }
}
