// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! ISO-8601 week identity.
//!
//! Every order, weekly special and statistic is bucketed by a [`WeekKey`].
//! The key is always derived from a local wall-clock date with ISO week
//! numbering: weeks start on Monday and week 1 is the week containing the
//! year's first Thursday. The ISO year therefore differs from the calendar
//! year for a few days around New Year (2024-12-30 belongs to week 1 of 2025).
//!
//! The order window reasons about plain day-of-week numbers instead
//! (see `window`); the two numbering schemes are kept in separate modules.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An ISO week bucket: `(week number, ISO year)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    /// The ISO week number (1..=53).
    pub week: u32,
    /// The ISO week-numbering year.
    pub year: i32,
}

impl WeekKey {
    /// Creates a validated week key.
    ///
    /// # Errors
    ///
    /// Returns an error if the week does not exist in the given ISO year
    /// (for example week 53 of a 52-week year).
    pub fn new(week: u32, year: i32) -> Result<Self, DomainError> {
        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(DomainError::InvalidWeek { week, year });
        }
        Ok(Self { week, year })
    }

    /// Returns the week key of a local calendar date.
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            week: iso.week(),
            year: iso.year(),
        }
    }

    /// Returns the week key of a local wall-clock instant.
    #[must_use]
    pub fn of(local: NaiveDateTime) -> Self {
        Self::of_date(local.date())
    }

    /// Returns the Monday that starts this week.
    #[must_use]
    pub fn monday(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }
}

impl PartialOrd for WeekKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeekKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.week.cmp(&other.week))
    }
}

impl std::fmt::Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_iso_week_maps_to_same_key() {
        // Monday 2025-03-03 through Sunday 2025-03-09 is week 10
        let monday = WeekKey::of_date(date(2025, 3, 3));
        for offset in 0..7 {
            let day = date(2025, 3, 3) + chrono::Duration::days(offset);
            assert_eq!(WeekKey::of_date(day), monday);
        }
        assert_eq!(monday, WeekKey { week: 10, year: 2025 });
    }

    #[test]
    fn test_sunday_and_monday_fall_in_different_weeks() {
        let sunday = WeekKey::of_date(date(2025, 3, 9));
        let monday = WeekKey::of_date(date(2025, 3, 10));
        assert_ne!(sunday, monday);
        assert_eq!(monday.week, 11);
    }

    #[test]
    fn test_late_december_belongs_to_next_iso_year() {
        assert_eq!(
            WeekKey::of_date(date(2024, 12, 30)),
            WeekKey { week: 1, year: 2025 }
        );
        assert_eq!(
            WeekKey::of_date(date(2024, 12, 31)),
            WeekKey { week: 1, year: 2025 }
        );
        assert_eq!(
            WeekKey::of_date(date(2025, 1, 1)),
            WeekKey { week: 1, year: 2025 }
        );
    }

    #[test]
    fn test_early_january_belongs_to_previous_iso_year() {
        // 2021-01-01 is a Friday in week 53 of 2020
        assert_eq!(
            WeekKey::of_date(date(2021, 1, 1)),
            WeekKey { week: 53, year: 2020 }
        );
        assert_eq!(
            WeekKey::of_date(date(2021, 1, 3)),
            WeekKey { week: 53, year: 2020 }
        );
        assert_eq!(
            WeekKey::of_date(date(2021, 1, 4)),
            WeekKey { week: 1, year: 2021 }
        );
    }

    #[test]
    fn test_time_of_day_does_not_affect_week() {
        let start = date(2025, 3, 9).and_hms_opt(0, 0, 0).unwrap();
        let end = date(2025, 3, 9).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(WeekKey::of(start), WeekKey::of(end));
    }

    #[test]
    fn test_new_rejects_nonexistent_week() {
        assert!(WeekKey::new(53, 2020).is_ok());
        assert!(matches!(
            WeekKey::new(53, 2025),
            Err(DomainError::InvalidWeek { week: 53, year: 2025 })
        ));
        assert!(WeekKey::new(0, 2025).is_err());
    }

    #[test]
    fn test_ordering_is_year_then_week() {
        let late = WeekKey { week: 52, year: 2024 };
        let early = WeekKey { week: 1, year: 2025 };
        assert!(late < early);
        assert!(WeekKey { week: 2, year: 2025 } > early);
    }

    #[test]
    fn test_monday_of_week() {
        let key = WeekKey { week: 1, year: 2025 };
        assert_eq!(key.monday(), Some(date(2024, 12, 30)));
    }
}
