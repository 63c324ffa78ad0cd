//! Time-window calculation for "last week" in KST (UTC+9).

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDateTime, NaiveTime, Utc};

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// The fixed KST offset. No DST, so local arithmetic is unambiguous.
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("KST offset is in range")
}

pub fn kst_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// Half-open interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    pub fn contains(&self, t: DateTime<FixedOffset>) -> bool {
        self.start <= t && t < self.end
    }
}

/// Last Monday 00:00 through this Monday 00:00, in the offset of `now`.
pub fn last_week_range(now: DateTime<FixedOffset>) -> TimeWindow {
    let this_monday = now
        - Duration::days(now.weekday().num_days_from_monday() as i64)
        - now.time().signed_duration_since(NaiveTime::MIN);
    TimeWindow {
        start: this_monday - Duration::days(7),
        end: this_monday,
    }
}

/// Parse an activity start timestamp into KST. A trailing `Z` parses as
/// +00:00 via RFC 3339; an offset-less `YYYY-MM-DDTHH:MM:SS` string is
/// treated as UTC.
pub fn parse_start_date(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&kst()));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.and_utc().with_timezone(&kst()));
    }
    None
}
