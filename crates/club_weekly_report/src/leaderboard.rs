//! Per-athlete aggregation and ranking of club activities.

use crate::week::{self, TimeWindow};
use std::collections::HashMap;
use strava_club_client::ClubActivity;

/// Running totals for one athlete while folding activities.
#[derive(Debug, Default)]
struct AthleteAggregate {
    name: String,
    dist_m: f64,
    elev_m: f64,
    rides: u32,
}

/// Finalized row: distance in km, elevation in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardRow {
    pub name: String,
    pub km: f64,
    pub elev_m: f64,
    pub rides: u32,
}

/// Fold activities inside the window into per-athlete totals and rank them
/// descending by distance, then elevation. Activities with unparseable start
/// timestamps are skipped with a warning.
pub fn build_leaderboard(activities: &[ClubActivity], window: &TimeWindow) -> Vec<LeaderboardRow> {
    let mut by_athlete: HashMap<u64, AthleteAggregate> = HashMap::new();

    for a in activities {
        let Some(started) = week::parse_start_date(&a.start_date) else {
            tracing::warn!(start_date = %a.start_date, "skipping activity with unparseable start date");
            continue;
        };
        if !window.contains(started) {
            continue;
        }

        let agg = by_athlete.entry(a.athlete.id).or_default();
        // Last write wins: the name is a display convenience, not identity.
        agg.name = a.athlete.display_name();
        agg.dist_m += a.distance;
        agg.elev_m += a.total_elevation_gain;
        agg.rides += 1;
    }

    let mut rows: Vec<LeaderboardRow> = by_athlete
        .into_values()
        .map(|v| LeaderboardRow {
            name: v.name,
            km: v.dist_m / 1000.0,
            elev_m: v.elev_m,
            rides: v.rides,
        })
        .collect();

    rows.sort_by(|a, b| b.km.total_cmp(&a.km).then(b.elev_m.total_cmp(&a.elev_m)));
    rows
}
