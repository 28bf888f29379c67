//! Daily service window for fleet planning.
//!
//! Buses run from `start` for `hours` hours every service day. The window turns
//! an hourly frequency into daily trip counts and departure timetables.

use chrono::{Duration, NaiveTime};

/// Hours of service assumed when none is configured
pub const DEFAULT_SERVICE_HOURS: u32 = 12;

/// Operating hours of the fleet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceWindow {
    pub start: NaiveTime,
    pub hours: u32,
}

impl ServiceWindow {
    pub fn new(start: NaiveTime, hours: u32) -> Self {
        Self { start, hours }
    }

    /// Trips a route makes per day at the given hourly rate
    pub fn daily_trips(&self, buses_per_hour: u32) -> u32 {
        buses_per_hour.saturating_mul(self.hours)
    }

    /// Departure times across the window, one every `headway_minutes`.
    ///
    /// Times wrap past midnight. A zero headway yields no departures.
    pub fn departures(&self, headway_minutes: u32) -> Vec<NaiveTime> {
        if headway_minutes == 0 {
            return Vec::new();
        }

        let span = self.hours.saturating_mul(60);
        (0..span)
            .step_by(headway_minutes as usize)
            .map(|offset| self.start + Duration::minutes(i64::from(offset)))
            .collect()
    }

    /// End of service (exclusive)
    pub fn end(&self) -> NaiveTime {
        self.start + Duration::hours(i64::from(self.hours))
    }
}

impl Default for ServiceWindow {
    fn default() -> Self {
        // 06:00
        Self {
            start: NaiveTime::MIN + Duration::hours(6),
            hours: DEFAULT_SERVICE_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_window() {
        let window = ServiceWindow::default();
        assert_eq!(window.start, hm(6, 0));
        assert_eq!(window.hours, 12);
        assert_eq!(window.end(), hm(18, 0));
    }

    #[test]
    fn test_daily_trips() {
        let window = ServiceWindow::default();
        assert_eq!(window.daily_trips(9), 108);
        assert_eq!(window.daily_trips(0), 0);
    }

    #[test]
    fn test_departures() {
        let window = ServiceWindow::new(hm(6, 0), 1);
        let times = window.departures(15);
        assert_eq!(times, vec![hm(6, 0), hm(6, 15), hm(6, 30), hm(6, 45)]);

        // Uneven headway stops before the end of the window
        let times = window.departures(25);
        assert_eq!(times, vec![hm(6, 0), hm(6, 25), hm(6, 50)]);

        assert!(window.departures(0).is_empty());
    }

    #[test]
    fn test_departures_wrap_past_midnight() {
        let window = ServiceWindow::new(hm(23, 0), 2);
        let times = window.departures(60);
        assert_eq!(times, vec![hm(23, 0), hm(0, 0)]);
        assert_eq!(window.end(), hm(1, 0));
    }
}
