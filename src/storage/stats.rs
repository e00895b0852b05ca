//! Discovery statistics.

use super::records::Tool;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

/// Counts of discovered tools over a few fixed windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolStats {
    /// All stored tools.
    pub total: usize,
    /// Found since midnight in the observer's timezone.
    pub today: usize,
    /// Found in the trailing seven days.
    pub this_week: usize,
}

impl ToolStats {
    /// Compute stats as seen from `now`, whose timezone defines "today".
    pub fn compute<Tz: TimeZone>(tools: &[Tool], now: DateTime<Tz>) -> Self {
        let now_utc = now.with_timezone(&Utc);
        let midnight = now.date_naive().and_time(chrono::NaiveTime::MIN);
        let today_start = now
            .timezone()
            .from_local_datetime(&midnight)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc());
        let week_start = now_utc - Duration::days(7);

        Self {
            total: tools.len(),
            today: tools.iter().filter(|t| t.found_at >= today_start).count(),
            this_week: tools.iter().filter(|t| t.found_at >= week_start).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Candidate;
    use chrono::FixedOffset;

    fn tool_at(url: &str, at: DateTime<Utc>) -> Tool {
        Tool::from_candidate(Candidate::new("t", "d", url, "s"), at)
    }

    #[test]
    fn test_stats_windows() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 15, 0, 0).unwrap();
        let tools = vec![
            tool_at("a", now - Duration::hours(1)),
            tool_at("b", now - Duration::hours(16)),
            tool_at("c", now - Duration::days(3)),
            tool_at("d", now - Duration::days(8)),
        ];

        let stats = ToolStats::compute(&tools, now);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.this_week, 3);
    }

    #[test]
    fn test_today_follows_observer_timezone() {
        // 02:00 at UTC+5 is 21:00 UTC the previous day.
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 6, 10, 2, 0, 0).unwrap();
        let tools = vec![
            tool_at("a", Utc.with_ymd_and_hms(2024, 6, 9, 20, 0, 0).unwrap()),
            tool_at("b", Utc.with_ymd_and_hms(2024, 6, 9, 18, 0, 0).unwrap()),
        ];

        let stats = ToolStats::compute(&tools, now);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.this_week, 2);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = ToolStats {
            total: 3,
            today: 1,
            this_week: 2,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["thisWeek"], 2);
    }
}
