//! Candidate departure sampling.
//!
//! Candidates are generated on whole-second offsets from midnight so the
//! right-hand end of the window is included exactly, with no accumulated
//! floating-point step error. Fractional hours are only produced at the
//! boundary, when a caller asks for them.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::domain::{Deadline, SECS_PER_HOUR};

/// One sampled departure time under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    offset_secs: i64,
}

impl Candidate {
    /// A candidate departing `offset_secs` after midnight.
    pub fn from_secs(offset_secs: i64) -> Self {
        Self { offset_secs }
    }

    /// Seconds after midnight on the window's date.
    pub fn secs_from_midnight(&self) -> i64 {
        self.offset_secs
    }

    /// Departure as fractional hours since midnight.
    pub fn start_hour(&self) -> f64 {
        self.offset_secs as f64 / SECS_PER_HOUR as f64
    }

    /// The exact departure instant on `date`.
    pub fn start_instant(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + Duration::seconds(self.offset_secs)
    }

    /// The departure time sent to the routing provider: the start instant
    /// truncated to the whole minute.
    pub fn depart_at(&self, date: NaiveDate) -> NaiveDateTime {
        let mins = self.offset_secs.div_euclid(60);
        date.and_time(NaiveTime::MIN) + Duration::minutes(mins)
    }
}

/// A bounded range of departure times on one date, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    date: NaiveDate,
    earliest_secs: i64,
    latest_secs: i64,
}

impl TimeWindow {
    /// Create a window from second offsets. `earliest > latest` gives an
    /// empty window.
    pub fn new(date: NaiveDate, earliest_secs: i64, latest_secs: i64) -> Self {
        Self {
            date,
            earliest_secs,
            latest_secs,
        }
    }

    /// Create a window from fractional hours, rounded to the nearest second.
    pub fn from_hours(date: NaiveDate, earliest_start: f64, latest_start: f64) -> Self {
        let to_secs = |h: f64| (h * SECS_PER_HOUR as f64).round() as i64;
        Self::new(date, to_secs(earliest_start), to_secs(latest_start))
    }

    /// The sampling window ending at `deadline`.
    ///
    /// It opens `window` before the deadline, or at `now` if that is later.
    /// `now` only counts when the deadline is today; for a later date the
    /// day is treated as starting at midnight.
    pub fn before_deadline(deadline: &Deadline, now: NaiveDateTime, window: Duration) -> Self {
        let now_secs = if deadline.date() == now.date() {
            i64::from(now.time().num_seconds_from_midnight())
        } else {
            0
        };

        let latest_secs = deadline.secs_from_midnight();
        let earliest_secs = now_secs.max(latest_secs - window.num_seconds());

        Self::new(deadline.date(), earliest_secs, latest_secs)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn earliest_start(&self) -> f64 {
        self.earliest_secs as f64 / SECS_PER_HOUR as f64
    }

    pub fn latest_start(&self) -> f64 {
        self.latest_secs as f64 / SECS_PER_HOUR as f64
    }

    pub fn is_empty(&self) -> bool {
        self.earliest_secs > self.latest_secs
    }

    /// Candidates from the earliest start, `step` apart, up to and including
    /// the latest start.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, NaiveDate};
    /// use departure_planner::planner::TimeWindow;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let window = TimeWindow::from_hours(date, 8.0, 9.0);
    /// let candidates = window.candidates(Duration::minutes(5));
    ///
    /// assert_eq!(candidates.len(), 13);
    /// assert_eq!(candidates[0].start_hour(), 8.0);
    /// assert_eq!(candidates[12].start_hour(), 9.0);
    /// ```
    pub fn candidates(&self, step: Duration) -> Vec<Candidate> {
        let step_secs = step.num_seconds().max(1);
        let mut out = Vec::new();
        let mut offset = self.earliest_secs;

        while offset <= self.latest_secs {
            out.push(Candidate::from_secs(offset));
            offset += step_secs;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        date().and_hms_opt(h, m, s).unwrap()
    }

    fn step() -> Duration {
        Duration::minutes(5)
    }

    #[test]
    fn full_hour_yields_thirteen_candidates() {
        let window = TimeWindow::from_hours(date(), 8.0, 9.0);
        let hours: Vec<f64> = window
            .candidates(step())
            .iter()
            .map(|c| c.start_hour())
            .collect();

        assert_eq!(hours.len(), 13);
        assert_eq!(hours[0], 8.0);
        assert!((hours[1] - (8.0 + 1.0 / 12.0)).abs() < 1e-12);
        assert_eq!(*hours.last().unwrap(), 9.0);
    }

    #[test]
    fn inverted_window_is_empty() {
        let window = TimeWindow::from_hours(date(), 9.0, 8.5);
        assert!(window.is_empty());
        assert!(window.candidates(step()).is_empty());
    }

    #[test]
    fn degenerate_window_has_one_candidate() {
        let window = TimeWindow::from_hours(date(), 9.0, 9.0);
        assert!(!window.is_empty());
        assert_eq!(window.candidates(step()).len(), 1);
    }

    #[test]
    fn window_before_deadline_on_future_day_ignores_now() {
        let deadline = Deadline::new(at(9, 0, 0) + Duration::days(1));
        let now = at(8, 30, 0);

        let window = TimeWindow::before_deadline(&deadline, now, Duration::hours(1));

        assert_eq!(window.date(), date() + Duration::days(1));
        assert_eq!(window.earliest_start(), 8.0);
        assert_eq!(window.latest_start(), 9.0);
    }

    #[test]
    fn window_before_deadline_today_starts_at_now() {
        let deadline = Deadline::new(at(9, 0, 0));
        let now = at(8, 30, 36);

        let window = TimeWindow::before_deadline(&deadline, now, Duration::hours(1));

        assert!((window.earliest_start() - 8.51).abs() < 1e-12);
        let candidates = window.candidates(step());
        // 08:30:36, 08:35:36, ..., 08:55:36
        assert_eq!(candidates.len(), 6);
        assert_eq!(candidates[0].start_instant(date()), now);
    }

    #[test]
    fn window_before_deadline_today_but_far_off_uses_full_window() {
        let deadline = Deadline::new(at(18, 0, 0));
        let now = at(8, 0, 0);

        let window = TimeWindow::before_deadline(&deadline, now, Duration::hours(1));

        assert_eq!(window.earliest_start(), 17.0);
        assert_eq!(window.latest_start(), 18.0);
    }

    #[test]
    fn early_morning_deadline_on_future_day_clamps_at_midnight() {
        let deadline = Deadline::new(at(0, 30, 0) + Duration::days(2));
        let window = TimeWindow::before_deadline(&deadline, at(12, 0, 0), Duration::hours(1));

        assert_eq!(window.earliest_start(), 0.0);
        assert_eq!(window.candidates(step()).len(), 7);
    }

    #[test]
    fn depart_at_truncates_to_minute() {
        let c = Candidate::from_secs(8 * 3600 + 30 * 60 + 36);
        assert_eq!(c.depart_at(date()), at(8, 30, 0));
        assert_eq!(c.start_instant(date()), at(8, 30, 36));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    proptest! {
        /// Sampling covers the window exactly: starts at the earliest start,
        /// ends within one step of the latest, never exceeds it, and has the
        /// expected count.
        #[test]
        fn sampling_is_complete(
            earliest in 0i64..86_400,
            span in 0i64..14_400,
            step_mins in 1i64..30,
        ) {
            let latest = earliest + span;
            let step = step_mins * 60;
            let window = TimeWindow::new(date(), earliest, latest);
            let candidates = window.candidates(Duration::seconds(step));

            prop_assert_eq!(candidates.len() as i64, span / step + 1);
            prop_assert_eq!(candidates[0].secs_from_midnight(), earliest);

            let last = candidates.last().unwrap().secs_from_midnight();
            prop_assert!(last <= latest);
            prop_assert!(latest - last < step);

            for pair in candidates.windows(2) {
                prop_assert_eq!(pair[1].secs_from_midnight() - pair[0].secs_from_midnight(), step);
            }
        }

        /// An inverted window never produces candidates.
        #[test]
        fn inverted_window_is_always_empty(
            latest in 0i64..86_400,
            gap in 1i64..3_600,
        ) {
            let window = TimeWindow::new(date(), latest + gap, latest);
            prop_assert!(window.candidates(Duration::minutes(5)).is_empty());
        }

        /// Whole-minute windows on the 5-minute grid always include the
        /// latest start exactly.
        #[test]
        fn latest_start_included_on_grid(start_min in 0i64..1_380, steps in 0i64..24) {
            let earliest = start_min * 60;
            let latest = earliest + steps * 300;
            let window = TimeWindow::new(date(), earliest, latest);
            let candidates = window.candidates(Duration::minutes(5));
            prop_assert_eq!(candidates.last().unwrap().secs_from_midnight(), latest);
        }
    }
}
