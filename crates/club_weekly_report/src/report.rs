//! Renders the leaderboard into the fixed BAND post layout.
//!
//! Consumers parse this text, so the byte layout (separators, decimal
//! places, rank alignment) must not drift.

use crate::leaderboard::LeaderboardRow;
use crate::week::TimeWindow;
use chrono::Duration;

pub const DEFAULT_TOP_N: usize = 20;

/// Format the weekly post. The window start is always a Monday and
/// `end - 1 day` always a Sunday, so the weekday glyphs are literal.
pub fn format_post_text(window: &TimeWindow, leaderboard: &[LeaderboardRow], top_n: usize) -> String {
    let start_s = format!("{}(월)", window.start.format("%m/%d"));
    let end_s = format!("{}(일)", (window.end - Duration::days(1)).format("%m/%d"));

    let mut lines = Vec::new();
    lines.push(format!("🏁 지난주 클럽 랭킹 ({start_s} ~ {end_s})"));
    lines.push(String::new());
    lines.push("📌 기준: 거리(km) / 획득고도(m) / 횟수".to_string());
    lines.push(String::new());

    if leaderboard.is_empty() {
        lines.push("지난주 기록된 활동이 없어요 🥲".to_string());
        return lines.join("\n");
    }

    lines.push(format!("🏆 TOP {}", top_n.min(leaderboard.len())));
    for (i, row) in leaderboard.iter().take(top_n).enumerate() {
        lines.push(format!(
            "{:>2}. {}  |  {:.1} km  |  {:.0} m  |  {}회",
            i + 1,
            row.name,
            row.km,
            row.elev_m,
            row.rides
        ));
    }

    lines.push(String::new());
    // Totals cover the whole leaderboard, not just the top-N slice.
    let total_km: f64 = leaderboard.iter().map(|r| r.km).sum();
    let total_elev: f64 = leaderboard.iter().map(|r| r.elev_m).sum();
    let total_rides: u32 = leaderboard.iter().map(|r| r.rides).sum();
    lines.push(format!(
        "📊 전체 합계: {total_km:.1} km / {total_elev:.0} m / {total_rides}회 (참여 {}명)",
        leaderboard.len()
    ));

    lines.join("\n")
}
