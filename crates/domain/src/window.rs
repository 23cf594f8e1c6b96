// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly ordering window policy.
//!
//! The window is open every day except between a fixed cutoff (Thursday at
//! 17:00 local by default) and midnight at the start of the reopening weekday
//! (Friday by default). The cutoff instant itself is inclusive: `17:00:00`
//! is still open, `17:00:01` is closed. Comparisons are made at second
//! precision.
//!
//! ## Day numbering
//!
//! This module uses plain day-of-week numbering (Sunday = 0 .. Saturday = 6),
//! never ISO weekday numbers. Week identity lives in `week` and uses ISO
//! numbering; the two are not mixed.
//!
//! ## Manual override
//!
//! [`OrderWindow::evaluate`] folds in the [`ClosureOverride`], which takes
//! precedence over the schedule. Passing `None` for the override evaluates
//! the schedule alone, which is how callers degrade when the override
//! cannot be read.

use crate::closure::ClosureOverride;
use crate::error::DomainError;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Plain day-of-week index, Sunday = 0.
const fn day_index(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

/// Days from `from` forward to `to`, in `0..7`.
const fn days_forward(from: u32, to: u32) -> u32 {
    (to + 7 - from) % 7
}

/// The recurring weekly window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWindow {
    cutoff_weekday: Weekday,
    cutoff_time: NaiveTime,
    reopen_weekday: Weekday,
}

impl Default for OrderWindow {
    fn default() -> Self {
        Self {
            cutoff_weekday: Weekday::Thu,
            cutoff_time: NaiveTime::MIN + Duration::hours(17),
            reopen_weekday: Weekday::Fri,
        }
    }
}

impl OrderWindow {
    /// Creates a window configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the reopening weekday equals the cutoff weekday.
    pub fn new(
        cutoff_weekday: Weekday,
        cutoff_time: NaiveTime,
        reopen_weekday: Weekday,
    ) -> Result<Self, DomainError> {
        if cutoff_weekday == reopen_weekday {
            return Err(DomainError::InvalidSchedule(format!(
                "reopening day must differ from the cutoff day ({cutoff_weekday})"
            )));
        }
        Ok(Self {
            cutoff_weekday,
            cutoff_time: cutoff_time.with_nanosecond(0).unwrap_or(cutoff_time),
            reopen_weekday,
        })
    }

    /// The default window with a different reopening weekday.
    ///
    /// # Errors
    ///
    /// Returns an error if `reopen_weekday` is the cutoff weekday.
    pub fn reopening_on(reopen_weekday: Weekday) -> Result<Self, DomainError> {
        let default: Self = Self::default();
        Self::new(default.cutoff_weekday, default.cutoff_time, reopen_weekday)
    }

    #[must_use]
    pub const fn cutoff_weekday(&self) -> Weekday {
        self.cutoff_weekday
    }

    #[must_use]
    pub const fn cutoff_time(&self) -> NaiveTime {
        self.cutoff_time
    }

    #[must_use]
    pub const fn reopen_weekday(&self) -> Weekday {
        self.reopen_weekday
    }

    /// Number of whole days after the cutoff day that stay closed.
    const fn closed_span_days(&self) -> u32 {
        days_forward(day_index(self.cutoff_weekday), day_index(self.reopen_weekday))
    }

    /// Returns true if the time-based schedule allows ordering at `local`.
    #[must_use]
    pub fn is_open(&self, local: NaiveDateTime) -> bool {
        let since_cutoff: u32 = days_forward(
            day_index(self.cutoff_weekday),
            day_index(local.weekday()),
        );

        if since_cutoff == 0 {
            return local.time().num_seconds_from_midnight()
                <= self.cutoff_time.num_seconds_from_midnight();
        }

        since_cutoff >= self.closed_span_days()
    }

    /// Returns the next midnight on the reopening weekday, strictly after the
    /// current day. On the reopening weekday itself this rolls a full week.
    #[must_use]
    pub fn next_opening(&self, local: NaiveDateTime) -> NaiveDateTime {
        let mut days: u32 = days_forward(
            day_index(local.weekday()),
            day_index(self.reopen_weekday),
        );
        if days == 0 {
            days = 7;
        }
        (local.date() + Duration::days(i64::from(days))).and_time(NaiveTime::MIN)
    }

    /// Returns the cutoff instant of the current cycle.
    ///
    /// On the cutoff day this is today's cutoff even once it has passed.
    #[must_use]
    pub fn next_closing(&self, local: NaiveDateTime) -> NaiveDateTime {
        let days: u32 = days_forward(
            day_index(local.weekday()),
            day_index(self.cutoff_weekday),
        );
        (local.date() + Duration::days(i64::from(days))).and_time(self.cutoff_time)
    }

    /// Decides whether a gated operation may proceed.
    ///
    /// The manual override is consulted first. `None` means the override
    /// is unavailable and only the schedule is evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`WindowClosed`] with the reason ordering is not allowed.
    pub fn evaluate(
        &self,
        closure: Option<&ClosureOverride>,
        local: NaiveDateTime,
    ) -> Result<(), WindowClosed> {
        if let Some(closure) = closure
            && closure.manually_closed
        {
            return Err(WindowClosed {
                reason: ClosedReason::Manual {
                    message: closure.closure_message.clone(),
                },
                next_opening: None,
            });
        }

        if !self.is_open(local) {
            return Err(WindowClosed {
                reason: ClosedReason::Schedule,
                next_opening: Some(self.next_opening(local)),
            });
        }

        Ok(())
    }

    /// Summarizes the window for display.
    #[must_use]
    pub fn status(&self, closure: Option<&ClosureOverride>, local: NaiveDateTime) -> WindowStatus {
        let deadline: NaiveDateTime = self.next_closing(local);
        let next_opening: NaiveDateTime = self.next_opening(local);
        let manually_closed: bool = closure.is_some_and(|c| c.manually_closed);

        match self.evaluate(closure, local) {
            Ok(()) => WindowStatus {
                is_open: true,
                manually_closed,
                deadline,
                next_opening,
                message: format!("Ordering open until {}", deadline.format("%A %d/%m %H:%M")),
            },
            Err(closed) => WindowStatus {
                is_open: false,
                manually_closed,
                deadline,
                next_opening,
                message: closed.to_string(),
            },
        }
    }
}

/// Why the window is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosedReason {
    /// An administrator closed the service.
    Manual {
        /// The configured closure message.
        message: String,
    },
    /// The weekly schedule is past its cutoff.
    Schedule,
}

/// A rejected gated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClosed {
    /// The reason for the rejection.
    pub reason: ClosedReason,
    /// When ordering reopens, for schedule closures.
    pub next_opening: Option<NaiveDateTime>,
}

impl std::fmt::Display for WindowClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.reason, self.next_opening) {
            (ClosedReason::Manual { message }, _) => write!(f, "{message}"),
            (ClosedReason::Schedule, Some(next)) => write!(
                f,
                "Ordering closed until {}",
                next.format("%A %d/%m %H:%M")
            ),
            (ClosedReason::Schedule, None) => write!(f, "Ordering closed"),
        }
    }
}

impl std::error::Error for WindowClosed {}

/// A display snapshot of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowStatus {
    /// Whether gated operations are currently allowed.
    pub is_open: bool,
    /// Whether the manual override is active.
    pub manually_closed: bool,
    /// The cutoff of the current cycle.
    pub deadline: NaiveDateTime,
    /// The next reopening instant.
    pub next_opening: NaiveDateTime,
    /// A human-readable summary.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2025-03-06 is a Thursday.
    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_cutoff_boundary_is_inclusive() {
        let window = OrderWindow::default();
        assert!(window.is_open(at(6, 16, 59, 59)));
        assert!(window.is_open(at(6, 17, 0, 0)));
        assert!(!window.is_open(at(6, 17, 0, 1)));
        assert!(!window.is_open(at(6, 23, 59, 59)));
    }

    #[test]
    fn test_subsecond_past_cutoff_is_still_open() {
        let window = OrderWindow::default();
        let instant = at(6, 17, 0, 0) + Duration::milliseconds(500);
        assert!(window.is_open(instant));
    }

    #[test]
    fn test_friday_start_reopens_at_midnight() {
        let window = OrderWindow::default();
        assert!(window.is_open(at(7, 0, 0, 0)));
        assert!(window.is_open(at(8, 12, 0, 0)));
        assert!(window.is_open(at(5, 9, 0, 0)));
    }

    #[test]
    fn test_monday_start_keeps_weekend_closed() {
        let window = OrderWindow::reopening_on(Weekday::Mon).unwrap();
        assert!(window.is_open(at(6, 17, 0, 0)));
        assert!(!window.is_open(at(7, 10, 0, 0)));
        assert!(!window.is_open(at(8, 10, 0, 0)));
        assert!(!window.is_open(at(9, 23, 59, 59)));
        assert!(window.is_open(at(10, 0, 0, 0)));
    }

    #[test]
    fn test_reopen_on_cutoff_day_is_rejected() {
        assert!(matches!(
            OrderWindow::reopening_on(Weekday::Thu),
            Err(DomainError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_next_opening_from_thursday_evening() {
        let window = OrderWindow::default();
        assert_eq!(window.next_opening(at(6, 18, 0, 0)), at(7, 0, 0, 0));
    }

    #[test]
    fn test_next_opening_rolls_full_week_on_reopen_day() {
        let window = OrderWindow::default();
        assert_eq!(window.next_opening(at(7, 0, 0, 0)), at(14, 0, 0, 0));
        assert_eq!(window.next_opening(at(7, 15, 30, 0)), at(14, 0, 0, 0));
    }

    #[test]
    fn test_next_opening_is_always_in_the_future() {
        let window = OrderWindow::default();
        for day in 3..=9 {
            let now = at(day, 0, 0, 0);
            assert!(window.next_opening(now) > now);
            assert_eq!(window.next_opening(now).weekday(), Weekday::Fri);
        }
    }

    #[test]
    fn test_next_closing_targets_upcoming_thursday() {
        let window = OrderWindow::default();
        assert_eq!(window.next_closing(at(3, 8, 0, 0)), at(6, 17, 0, 0));
        assert_eq!(window.next_closing(at(6, 8, 0, 0)), at(6, 17, 0, 0));
        assert_eq!(window.next_closing(at(7, 8, 0, 0)), at(13, 17, 0, 0));
        assert_eq!(window.next_closing(at(9, 8, 0, 0)), at(13, 17, 0, 0));
    }

    #[test]
    fn test_next_closing_on_cutoff_day_after_cutoff_is_today() {
        let window = OrderWindow::default();
        assert_eq!(window.next_closing(at(6, 20, 0, 0)), at(6, 17, 0, 0));
    }

    #[test]
    fn test_manual_override_takes_precedence() {
        let window = OrderWindow::default();
        let closure = ClosureOverride::default().with_state(
            true,
            Some(String::from("Vacaciones")),
            "admin-1",
            chrono::Utc::now(),
        );

        let err = window.evaluate(Some(&closure), at(4, 10, 0, 0)).unwrap_err();
        assert_eq!(
            err.reason,
            ClosedReason::Manual {
                message: String::from("Vacaciones")
            }
        );
        assert!(err.next_opening.is_none());
        assert_eq!(err.to_string(), "Vacaciones");
    }

    #[test]
    fn test_missing_override_falls_back_to_schedule() {
        let window = OrderWindow::default();
        assert!(window.evaluate(None, at(4, 10, 0, 0)).is_ok());

        let err = window.evaluate(None, at(6, 18, 0, 0)).unwrap_err();
        assert_eq!(err.reason, ClosedReason::Schedule);
        assert_eq!(err.next_opening, Some(at(7, 0, 0, 0)));
    }

    #[test]
    fn test_status_reports_deadline_and_next_opening() {
        let window = OrderWindow::default();
        let status = window.status(Some(&ClosureOverride::default()), at(4, 10, 0, 0));
        assert!(status.is_open);
        assert!(!status.manually_closed);
        assert_eq!(status.deadline, at(6, 17, 0, 0));
        assert_eq!(status.next_opening, at(7, 0, 0, 0));
        assert!(status.message.starts_with("Ordering open until"));
    }
}
