// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timezone binding for the weekly cycle.
//!
//! Instants are handled as UTC everywhere outside the domain. The
//! [`OrderCalendar`] converts them to the service's local wall-clock time
//! before the window and week rules run, and converts computed boundaries
//! back for reporting.

use crate::closure::ClosureOverride;
use crate::week::WeekKey;
use crate::window::{OrderWindow, WindowClosed, WindowStatus};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The default service timezone.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Madrid;

/// A window configuration bound to a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCalendar {
    timezone: Tz,
    window: OrderWindow,
}

impl Default for OrderCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE, OrderWindow::default())
    }
}

impl OrderCalendar {
    #[must_use]
    pub const fn new(timezone: Tz, window: OrderWindow) -> Self {
        Self { timezone, window }
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub const fn window(&self) -> &OrderWindow {
        &self.window
    }

    /// Local wall-clock time of a UTC instant.
    #[must_use]
    pub fn local(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.timezone).naive_local()
    }

    /// The week an instant belongs to, by local calendar day.
    #[must_use]
    pub fn week_of(&self, now: DateTime<Utc>) -> WeekKey {
        WeekKey::of(self.local(now))
    }

    /// Attaches the service timezone to a local wall-clock time.
    ///
    /// Ambiguous local times (DST fall-back) resolve to the earlier instant.
    /// Returns `None` for times skipped by a DST jump.
    #[must_use]
    pub fn to_zoned(&self, local: NaiveDateTime) -> Option<DateTime<Tz>> {
        self.timezone.from_local_datetime(&local).earliest()
    }

    /// Evaluates the window for a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`WindowClosed`] if a gated operation must be rejected.
    pub fn evaluate(
        &self,
        closure: Option<&ClosureOverride>,
        now: DateTime<Utc>,
    ) -> Result<(), WindowClosed> {
        self.window.evaluate(closure, self.local(now))
    }

    /// Window status for a UTC instant.
    #[must_use]
    pub fn status(&self, closure: Option<&ClosureOverride>, now: DateTime<Utc>) -> WindowStatus {
        self.window.status(closure, self.local(now))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_local_conversion_uses_service_timezone() {
        let calendar = OrderCalendar::default();
        // 16:30 UTC on a winter Thursday is 17:30 in Madrid
        let now = Utc.with_ymd_and_hms(2025, 3, 6, 16, 30, 0).unwrap();
        assert!(calendar.evaluate(None, now).is_err());

        let earlier = Utc.with_ymd_and_hms(2025, 3, 6, 15, 59, 59).unwrap();
        assert!(calendar.evaluate(None, earlier).is_ok());
    }

    #[test]
    fn test_week_of_uses_local_midnight() {
        let calendar = OrderCalendar::default();
        // Sunday 23:30 UTC is already Monday 00:30 in Madrid (winter)
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 23, 30, 0).unwrap();
        assert_eq!(calendar.week_of(now), WeekKey { week: 11, year: 2025 });
    }

    #[test]
    fn test_to_zoned_round_trips_boundary() {
        let calendar = OrderCalendar::default();
        let local = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let zoned = calendar.to_zoned(local).unwrap();
        assert_eq!(zoned.naive_local(), local);
        assert_eq!(zoned.with_timezone(&Utc).naive_utc(), local - chrono::Duration::hours(1));
    }
}
