//! Weekly club leaderboard reporter.
//!
//! One-shot pipeline: compute last week's KST window, refresh a Strava
//! access token, fetch the club activity feed, aggregate and rank per
//! athlete, render the Korean report text, and post it to a BAND group.

use chrono::{DateTime, FixedOffset};
use strava_club_client::StravaApi;

pub mod band;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod report;
pub mod week;

pub use band::BandClient;
pub use config::Config;
pub use error::{ReportError, ReportResult};

/// Run the whole pipeline once and return the posted text.
///
/// `now` is injected so tests (and reruns for a known week) can pin the
/// window; production passes [`week::kst_now`].
pub async fn run(
    config: &Config,
    strava: &dyn StravaApi,
    band: &BandClient,
    now: DateTime<FixedOffset>,
) -> ReportResult<String> {
    let window = week::last_week_range(now);
    tracing::info!(start = %window.start, end = %window.end, "building report for last week");

    let access_token = strava.refresh_access_token().await?;
    let activities = strava.fetch_club_activities(&access_token).await?;
    tracing::info!(count = activities.len(), "fetched club activities");

    let rows = leaderboard::build_leaderboard(&activities, &window);
    let text = report::format_post_text(&window, &rows, config.top_n);

    band.post_text(&text).await?;
    Ok(text)
}
