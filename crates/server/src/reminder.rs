// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deadline reminders and push delivery.
//!
//! The [`ReminderScheduler`] owns its dedup state and is ticked from a
//! periodic task. On the cutoff day at 11:00 local time it sends one
//! reminder per week to every subscribed destination whose owner has not
//! ordered yet. The dedup state lives in memory only, so a restart on the
//! cutoff day may send a second reminder.
//!
//! Delivery goes through the [`PushTransport`] seam. Every destination is
//! delivered concurrently and bounded by a timeout; one slow or broken
//! destination never fails the batch. Destinations reported gone are
//! pruned.

use async_trait::async_trait;
use bocadillo_domain::{OrderCalendar, UserId, WeekKey};
use bocadillo_persistence::{Persistence, PushSubscriptionData};
use chrono::{DateTime, Datelike, Timelike, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Local hour at which the reminder is sent.
pub const REMINDER_HOUR: u32 = 11;

/// A notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Lets the client collapse repeated notifications.
    pub tag: String,
    /// Link opened on click.
    pub url: String,
}

impl Notification {
    /// The weekly "order before the cutoff" reminder.
    #[must_use]
    pub fn deadline_reminder() -> Self {
        Self {
            title: String::from("Últimas horas para pedir"),
            body: String::from("El plazo para pedir bocadillos cierra hoy a las 17:00."),
            tag: String::from("bocadillo-deadline"),
            url: String::from("/"),
        }
    }
}

/// Why a delivery failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The destination no longer exists and should be removed.
    #[error("destination is gone: {0}")]
    Gone(String),

    /// The delivery failed but may succeed later.
    #[error("delivery failed: {0}")]
    Failed(String),

    /// The delivery did not finish in time.
    #[error("delivery timed out after {0:?}")]
    TimedOut(Duration),
}

/// Delivers notifications to push destinations.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Delivers `notification` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Gone`] if the destination should be pruned,
    /// or another variant for failures worth retrying on a later send.
    async fn deliver(
        &self,
        destination: &PushSubscriptionData,
        notification: &Notification,
    ) -> Result<(), DeliveryError>;
}

/// A transport that only logs what it would send.
pub struct LogTransport;

#[async_trait]
impl PushTransport for LogTransport {
    async fn deliver(
        &self,
        destination: &PushSubscriptionData,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        info!(
            subscription_id = destination.subscription_id,
            user_id = %destination.user_id,
            title = %notification.title,
            "Push notification (log transport)"
        );
        Ok(())
    }
}

/// Counts for one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub pruned: usize,
    pub failed: usize,
}

/// Sends `notification` to every destination concurrently.
///
/// Each delivery is bounded by `timeout`. Destinations reported gone are
/// deleted; other failures are logged and counted.
pub async fn broadcast(
    persistence: &Mutex<Persistence>,
    transport: &dyn PushTransport,
    destinations: &[PushSubscriptionData],
    notification: &Notification,
    timeout: Duration,
) -> DeliveryReport {
    let deliveries = destinations.iter().map(|destination| async move {
        let outcome: Result<(), DeliveryError> =
            tokio::time::timeout(timeout, transport.deliver(destination, notification))
                .await
                .unwrap_or_else(|_| Err(DeliveryError::TimedOut(timeout)));
        (destination, outcome)
    });
    let outcomes: Vec<(&PushSubscriptionData, Result<(), DeliveryError>)> =
        join_all(deliveries).await;

    let mut report: DeliveryReport = DeliveryReport::default();
    for (destination, outcome) in outcomes {
        match outcome {
            Ok(()) => report.delivered += 1,
            Err(DeliveryError::Gone(reason)) => {
                let deleted = persistence
                    .lock()
                    .await
                    .delete_push_subscription_by_id(destination.subscription_id);
                match deleted {
                    Ok(_) => {
                        info!(
                            subscription_id = destination.subscription_id,
                            user_id = %destination.user_id,
                            %reason,
                            "Pruned gone push destination"
                        );
                        report.pruned += 1;
                    }
                    Err(e) => {
                        warn!(
                            subscription_id = destination.subscription_id,
                            error = %e,
                            "Failed to prune gone push destination"
                        );
                        report.failed += 1;
                    }
                }
            }
            Err(e) => {
                warn!(
                    subscription_id = destination.subscription_id,
                    user_id = %destination.user_id,
                    error = %e,
                    "Push delivery failed"
                );
                report.failed += 1;
            }
        }
    }
    report
}

/// What a scheduler tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not the reminder hour.
    NotDue,
    /// This week's reminder was already handled.
    AlreadySent,
    /// The service is closed; the week is marked handled without sending.
    SkippedClosed,
    /// Recipients could not be read; the next tick retries.
    Failed,
    /// The reminder went out.
    Sent(DeliveryReport),
}

/// Sends the weekly deadline reminder.
#[derive(Debug)]
pub struct ReminderScheduler {
    calendar: OrderCalendar,
    current_week: Option<WeekKey>,
    sent: bool,
}

impl ReminderScheduler {
    #[must_use]
    pub const fn new(calendar: OrderCalendar) -> Self {
        Self {
            calendar,
            current_week: None,
            sent: false,
        }
    }

    /// Whether the reminder for the current week has been handled.
    #[must_use]
    pub const fn sent(&self) -> bool {
        self.sent
    }

    /// Runs one check at `now`.
    pub async fn tick(
        &mut self,
        persistence: &Mutex<Persistence>,
        transport: &dyn PushTransport,
        timeout: Duration,
        now: DateTime<Utc>,
    ) -> TickOutcome {
        let week: WeekKey = self.calendar.week_of(now);
        if self.current_week != Some(week) {
            debug!(%week, "New week, resetting reminder state");
            self.current_week = Some(week);
            self.sent = false;
        }

        let local = self.calendar.local(now);
        if local.weekday() != self.calendar.window().cutoff_weekday()
            || local.hour() != REMINDER_HOUR
        {
            return TickOutcome::NotDue;
        }
        if self.sent {
            return TickOutcome::AlreadySent;
        }

        let mut guard = persistence.lock().await;
        let manually_closed: bool = match guard.get_closure_state(now) {
            Ok(state) => state.manually_closed,
            Err(e) => {
                warn!(error = %e, "Failed to read closure override, assuming open");
                false
            }
        };
        let selected = if manually_closed {
            None
        } else {
            Some(recipients(&mut guard, week))
        };
        drop(guard);

        let recipients: Vec<PushSubscriptionData> = match selected {
            None => {
                info!(%week, "Service closed, skipping this week's reminder");
                self.sent = true;
                return TickOutcome::SkippedClosed;
            }
            Some(Ok(recipients)) => recipients,
            Some(Err(e)) => {
                error!(error = %e, "Failed to select reminder recipients");
                return TickOutcome::Failed;
            }
        };

        let report: DeliveryReport = broadcast(
            persistence,
            transport,
            &recipients,
            &Notification::deadline_reminder(),
            timeout,
        )
        .await;
        self.sent = true;
        info!(
            %week,
            delivered = report.delivered,
            pruned = report.pruned,
            failed = report.failed,
            "Deadline reminder sent"
        );
        TickOutcome::Sent(report)
    }
}

/// Destinations whose owners have no order in `week`.
fn recipients(
    persistence: &mut Persistence,
    week: WeekKey,
) -> Result<Vec<PushSubscriptionData>, bocadillo_persistence::PersistenceError> {
    let ordered: HashSet<UserId> = persistence.owners_with_orders(week)?.into_iter().collect();
    Ok(persistence
        .list_push_subscriptions()?
        .into_iter()
        .filter(|s| !ordered.contains(&UserId::new(&s.user_id)))
        .collect())
}
