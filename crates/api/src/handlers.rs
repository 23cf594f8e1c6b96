// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler authenticates nothing itself: it receives an
//! [`AuthenticatedActor`], checks the role where one is required, builds a
//! core command, applies it and persists the result together with its
//! audit event. Window-gated order handlers read the closure override at
//! the instant of the request and never cache it.

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, format_local, translate_core_error, translate_domain_error, translate_gated_error,
    translate_persistence_error,
};
use crate::money::{cents_to_euros, euros_to_price, price_to_euros};
use crate::request_response::{
    AuditEventInfo, CancelOrderResponse, CatalogEntryInfo, CatalogRequest, CatalogWriteResponse,
    ClosureInfo, ComboInfo, CountInfo, CurrentSpecialResponse, DeleteCatalogResponse,
    DeleteSpecialResponse, LatestOrderResponse, ListAuditEventsRequest, ListAuditEventsResponse,
    ListCatalogRequest, ListCatalogResponse, ListCategoriesResponse, ListCombosResponse,
    ListOrdersRequest, ListOrdersResponse, OrderInfo, OrderRequest, OrderResponse,
    SetClosureRequest, SetClosureResponse, SetPaidRequest, SetPriceRequest, SpecialInfo,
    SpecialRequest, SpecialWriteResponse, StatisticsResponse, SubscribeRequest,
    SubscribeResponse, TrendInfo, UnsubscribeRequest, UnsubscribeResponse, UserSpendInfo,
    WindowStatusResponse,
};
use bocadillo::{
    CatalogChange, CatalogCommand, CatalogTransition, ClosureCommand, ClosureTransition, Command,
    OrderChange, OrderingContext, SpecialChange, SpecialCommand, SpecialTransition,
    TransitionResult, apply, apply_catalog, apply_closure, apply_special,
};
use bocadillo_audit::{AuditEvent, Cause};
use bocadillo_domain::{
    Bread, CatalogDraft, CatalogEntry, ClosureOverride, Combo, Order, OrderCalendar, OrderDraft,
    OrderStatistics, Price, Size, SpecialDraft, UserId, WeekKey, WeeklySpecial, WindowStatus,
    combo_listing, spend_by_user,
};
use bocadillo_persistence::{
    CatalogFilter, PersistTransitionResult, Persistence, PersistenceError, SpecialWriteMode,
};
use chrono::{DateTime, Utc};

/// Default number of audit events returned.
pub const DEFAULT_AUDIT_LIMIT: i64 = 50;
/// Maximum number of audit events returned.
pub const MAX_AUDIT_LIMIT: i64 = 500;
/// Maximum length of a push endpoint.
const MAX_ENDPOINT_LENGTH: usize = 2048;

// ============================================================================
// Shared helpers
// ============================================================================

/// Reads the closure override for a gated operation.
///
/// A read failure degrades to schedule-only evaluation instead of failing
/// the request.
fn read_closure(persistence: &mut Persistence, now: DateTime<Utc>) -> Option<ClosureOverride> {
    match persistence.get_closure_state(now) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read closure override, using schedule only");
            None
        }
    }
}

/// Looks up an order, mapping a missing row to `None`.
fn find_order(persistence: &mut Persistence, order_id: i64) -> Result<Option<Order>, ApiError> {
    match persistence.get_order(order_id) {
        Ok(order) => Ok(Some(order)),
        Err(PersistenceError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApiError::Internal {
            message: format!("Failed to load order {order_id}: {e}"),
        }),
    }
}

fn current_special(
    persistence: &mut Persistence,
    week: WeekKey,
) -> Result<Option<WeeklySpecial>, ApiError> {
    persistence
        .get_weekly_special(week)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to load the special for {week}: {e}"),
        })
}

fn parse_size(value: &str) -> Result<Size, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn parse_bread(value: &str) -> Result<Bread, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn order_draft(request: OrderRequest) -> Result<OrderDraft, ApiError> {
    Ok(OrderDraft {
        size: parse_size(&request.size)?,
        bread: parse_bread(&request.bread)?,
        display_name: request.display_name,
        ingredients: request.ingredients,
        combo: request.combo,
    })
}

fn special_draft(request: SpecialRequest) -> Result<SpecialDraft, ApiError> {
    Ok(SpecialDraft {
        size: parse_size(&request.size)?,
        bread: parse_bread(&request.bread)?,
        ingredients: request.ingredients,
    })
}

fn catalog_draft(request: CatalogRequest) -> CatalogDraft {
    CatalogDraft {
        name: request.name,
        category: request.category,
        available: request.available,
        sort_order: request.sort_order,
    }
}

fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

fn order_info(order: &Order) -> OrderInfo {
    OrderInfo {
        order_id: order.order_id.unwrap_or_default(),
        owner_id: order.owner.value().to_string(),
        display_name: order.display_name.clone(),
        size: order.size.as_str().to_string(),
        bread: order.bread.as_str().to_string(),
        ingredients: order.ingredients.clone(),
        combo: order.combo.clone(),
        week: order.week.week,
        year: order.week.year,
        created_at: format_instant(order.created_at),
        price: order.price.map(price_to_euros),
        paid: order.paid,
    }
}

fn special_info(special: &WeeklySpecial, reveal_ingredients: bool) -> SpecialInfo {
    SpecialInfo {
        special_id: special.special_id,
        size: special.size.as_str().to_string(),
        bread: special.bread.as_str().to_string(),
        ingredients: if reveal_ingredients {
            special.ingredients.clone()
        } else {
            Vec::new()
        },
        week: special.week.week,
        year: special.week.year,
        updated_at: format_instant(special.updated_at),
    }
}

fn closure_info(closure: &ClosureOverride) -> ClosureInfo {
    ClosureInfo {
        manually_closed: closure.manually_closed,
        closure_message: closure.closure_message.clone(),
        closed_by: closure.closed_by.clone(),
        closed_at: closure.closed_at.map(format_instant),
    }
}

fn catalog_entry_info(entry: &CatalogEntry) -> CatalogEntryInfo {
    CatalogEntryInfo {
        ingredient_id: entry.ingredient_id.unwrap_or_default(),
        name: entry.name.clone(),
        category: entry.category.clone(),
        available: entry.available,
        sort_order: entry.sort_order,
    }
}

fn combo_info(combo: Combo) -> ComboInfo {
    ComboInfo {
        name: combo.name,
        size: combo.size.as_str().to_string(),
        bread: combo.bread.as_str().to_string(),
        ingredients: combo.ingredients,
        is_special: combo.is_special,
    }
}

fn audit_event_info(event: AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id,
        actor_type: event.actor.actor_type,
        actor_name: event.actor.display_name,
        cause_id: event.cause.id,
        cause_description: event.cause.description,
        action: event.action.name,
        details: event.action.details,
        before: event.before.data,
        after: event.after.data,
        week: event.week.map(|w| w.week),
        year: event.week.map(|w| w.year),
    }
}

fn statistics_response(
    scope: &str,
    stats: OrderStatistics,
    spend: Vec<UserSpendInfo>,
) -> StatisticsResponse {
    StatisticsResponse {
        scope: scope.to_string(),
        total_orders: stats.total_orders,
        current_week_orders: stats.current_week_orders,
        total_spend: cents_to_euros(stats.total_spend_cents),
        top_ingredients: stats
            .top_ingredients
            .into_iter()
            .map(|r| CountInfo {
                label: r.label,
                count: r.count,
            })
            .collect(),
        top_combos: stats
            .top_combos
            .into_iter()
            .map(|r| CountInfo {
                label: r.label,
                count: r.count,
            })
            .collect(),
        sizes: stats
            .sizes
            .into_iter()
            .map(|s| CountInfo {
                label: s.size.as_str().to_string(),
                count: s.count,
            })
            .collect(),
        breads: stats
            .breads
            .into_iter()
            .map(|b| CountInfo {
                label: b.bread.as_str().to_string(),
                count: b.count,
            })
            .collect(),
        trend: stats
            .trend
            .into_iter()
            .map(|t| TrendInfo {
                week: t.week.week,
                year: t.week.year,
                count: t.count,
            })
            .collect(),
        spend_by_user: spend,
    }
}

/// Persists an order transition and returns the written order.
fn persist_order(
    persistence: &mut Persistence,
    result: &TransitionResult,
) -> Result<(Option<Order>, i64), ApiError> {
    let persisted: PersistTransitionResult = persistence
        .persist_order_transition(result)
        .map_err(|e| translate_persistence_error(e, "Order"))?;

    let order: Option<Order> = match &result.change {
        OrderChange::Insert(order) | OrderChange::Update(order) => Some(Order {
            order_id: persisted.record_id.or(order.order_id),
            ..order.clone()
        }),
        OrderChange::Delete { .. } => None,
    };
    Ok((order, persisted.event_id))
}

fn written_order(order: Option<Order>) -> Result<Order, ApiError> {
    order.ok_or_else(|| ApiError::Internal {
        message: String::from("Order write produced no order"),
    })
}

// ============================================================================
// Orders
// ============================================================================

/// Places an order for the caller in the current week.
///
/// The window is checked before the request is parsed or validated, so a
/// closed service always answers with the closure reason.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `calendar` - The ordering schedule
/// * `now` - The instant of the request
/// * `request` - The order fields
/// * `authenticated_actor` - The caller, who becomes the owner
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The window is closed (time-based or manual)
/// - The size or bread cannot be parsed
/// - Any order rule fails
/// - The write fails
pub fn place_order(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    request: OrderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OrderResponse, ApiError> {
    let context: OrderingContext<'_> =
        OrderingContext::new(calendar, read_closure(persistence, now), now);
    context
        .ensure_open()
        .map_err(|e| translate_gated_error(e, calendar))?;

    let draft: OrderDraft = order_draft(request)?;
    let result: TransitionResult = apply(
        &context,
        None,
        Command::PlaceOrder { draft },
        &authenticated_actor.to_requester(),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(|e| translate_gated_error(e, calendar))?;

    let (order, event_id) = persist_order(persistence, &result)?;
    let order: Order = written_order(order)?;
    tracing::info!(
        order_id = order.order_id,
        owner = %order.owner,
        week = %order.week,
        "Order placed"
    );

    Ok(OrderResponse {
        message: format!("Order placed for {}", order.display_name),
        order: order_info(&order),
        event_id,
    })
}

/// Replaces the editable fields of one of the caller's orders.
///
/// Admins may revise any order. Only orders of the current week can be
/// revised; older orders are reported as not found.
///
/// # Errors
///
/// Returns an error if:
/// - The window is closed
/// - The order does not exist or is not in the current week
/// - The caller does not own the order and is not an admin
/// - Any order rule fails
pub fn revise_order(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    order_id: i64,
    request: OrderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OrderResponse, ApiError> {
    let context: OrderingContext<'_> =
        OrderingContext::new(calendar, read_closure(persistence, now), now);
    context
        .ensure_open()
        .map_err(|e| translate_gated_error(e, calendar))?;

    let existing: Option<Order> = find_order(persistence, order_id)?;
    let draft: OrderDraft = order_draft(request)?;
    let result: TransitionResult = apply(
        &context,
        existing.as_ref(),
        Command::ReviseOrder { order_id, draft },
        &authenticated_actor.to_requester(),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(|e| translate_gated_error(e, calendar))?;

    let (order, event_id) = persist_order(persistence, &result)?;
    let order: Order = written_order(order)?;

    Ok(OrderResponse {
        message: format!("Order {order_id} updated"),
        order: order_info(&order),
        event_id,
    })
}

/// Cancels one of the caller's orders in the current week.
///
/// # Errors
///
/// Returns an error if:
/// - The window is closed
/// - The order does not exist or is not in the current week
/// - The caller does not own the order and is not an admin
pub fn cancel_order(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    order_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CancelOrderResponse, ApiError> {
    let context: OrderingContext<'_> =
        OrderingContext::new(calendar, read_closure(persistence, now), now);
    context
        .ensure_open()
        .map_err(|e| translate_gated_error(e, calendar))?;

    let existing: Option<Order> = find_order(persistence, order_id)?;
    let result: TransitionResult = apply(
        &context,
        existing.as_ref(),
        Command::CancelOrder { order_id },
        &authenticated_actor.to_requester(),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(|e| translate_gated_error(e, calendar))?;

    let (_, event_id) = persist_order(persistence, &result)?;
    tracing::info!(order_id, user = %authenticated_actor.user_id, "Order cancelled");

    Ok(CancelOrderResponse {
        order_id,
        event_id,
        message: format!("Order {order_id} cancelled"),
    })
}

/// Lists the orders of one week.
///
/// Without a week in the request the current week is listed. Listing is
/// never window-gated.
///
/// # Errors
///
/// Returns an error if only one of week/year is given, the pair is not a
/// valid ISO week, or the query fails.
pub fn list_orders(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    request: ListOrdersRequest,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<ListOrdersResponse, ApiError> {
    let week: WeekKey = match (request.week, request.year) {
        (Some(week), Some(year)) => WeekKey::new(week, year).map_err(translate_domain_error)?,
        (None, None) => calendar.week_of(now),
        (Some(_), None) => {
            return Err(ApiError::InvalidInput {
                field: String::from("year"),
                message: String::from("A year is required when a week is given"),
            });
        }
        (None, Some(_)) => {
            return Err(ApiError::InvalidInput {
                field: String::from("week"),
                message: String::from("A week is required when a year is given"),
            });
        }
    };

    let orders: Vec<Order> =
        persistence
            .list_orders_for_week(week)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to list orders for {week}: {e}"),
            })?;
    let total_cents: i64 = orders.iter().map(Order::price_cents_or_zero).sum();

    Ok(ListOrdersResponse {
        week: week.week,
        year: week.year,
        orders: orders.iter().map(order_info).collect(),
        total: cents_to_euros(total_cents),
    })
}

/// Assigns a price to an order.
///
/// Not window-gated: prices are usually set after the cutoff.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The amount is negative, not finite or has fractional cents
/// - The order does not exist
/// - The order is marked paid and the price would leave it inconsistent
pub fn set_order_price(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    order_id: i64,
    request: SetPriceRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OrderResponse, ApiError> {
    AuthorizationService::authorize_set_price(authenticated_actor)?;

    let price: Price = euros_to_price(request.price)?;
    let existing: Option<Order> = find_order(persistence, order_id)?;
    let context: OrderingContext<'_> = OrderingContext::new(calendar, None, now);

    let result: TransitionResult = apply(
        &context,
        existing.as_ref(),
        Command::SetPrice { order_id, price },
        &authenticated_actor.to_requester(),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let (order, event_id) = persist_order(persistence, &result)?;
    let order: Order = written_order(order)?;

    Ok(OrderResponse {
        message: format!("Price of order {order_id} set to {price} EUR"),
        order: order_info(&order),
        event_id,
    })
}

/// Marks an order paid or unpaid.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The order does not exist
/// - The order would be paid without a price
pub fn set_order_paid(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    order_id: i64,
    request: SetPaidRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OrderResponse, ApiError> {
    AuthorizationService::authorize_set_paid(authenticated_actor)?;

    let existing: Option<Order> = find_order(persistence, order_id)?;
    let context: OrderingContext<'_> = OrderingContext::new(calendar, None, now);

    let result: TransitionResult = apply(
        &context,
        existing.as_ref(),
        Command::SetPaid {
            order_id,
            paid: request.paid,
        },
        &authenticated_actor.to_requester(),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let (order, event_id) = persist_order(persistence, &result)?;
    let order: Order = written_order(order)?;

    Ok(OrderResponse {
        message: format!(
            "Order {order_id} marked as {}",
            if request.paid { "paid" } else { "unpaid" }
        ),
        order: order_info(&order),
        event_id,
    })
}

/// Returns the caller's most recent order across all weeks.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_latest_order(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LatestOrderResponse, ApiError> {
    let user_id: UserId = UserId::new(&authenticated_actor.user_id);
    let order: Option<Order> =
        persistence
            .latest_order_for_user(&user_id)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to load latest order: {e}"),
            })?;

    Ok(LatestOrderResponse {
        order: order.as_ref().map(order_info),
    })
}

// ============================================================================
// Window and closure
// ============================================================================

/// Reports whether ordering is open right now.
///
/// An unreadable closure override is reported as open-by-schedule.
#[must_use]
pub fn get_window_status(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
) -> WindowStatusResponse {
    let closure: Option<ClosureOverride> = read_closure(persistence, now);
    let status: WindowStatus = calendar.status(closure.as_ref(), now);

    WindowStatusResponse {
        is_open: status.is_open,
        manually_closed: status.manually_closed,
        current_time: format_local(calendar.local(now), Some(calendar)),
        deadline: format_local(status.deadline, Some(calendar)),
        next_opening: format_local(status.next_opening, Some(calendar)),
        message: status.message,
        timezone: calendar.timezone().name().to_string(),
    }
}

/// Returns the closure override.
///
/// # Errors
///
/// Returns an error if the override cannot be read.
pub fn get_closure(
    persistence: &mut Persistence,
    now: DateTime<Utc>,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<ClosureInfo, ApiError> {
    let closure: ClosureOverride =
        persistence
            .get_closure_state(now)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to read closure override: {e}"),
            })?;
    Ok(closure_info(&closure))
}

/// Opens or closes the service.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The message is blank or too long
/// - The override cannot be read or written
pub fn set_closure(
    persistence: &mut Persistence,
    now: DateTime<Utc>,
    request: SetClosureRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SetClosureResponse, ApiError> {
    AuthorizationService::authorize_set_closure(authenticated_actor)?;

    let current: ClosureOverride =
        persistence
            .get_closure_state(now)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to read closure override: {e}"),
            })?;

    let transition: ClosureTransition = apply_closure(
        &current,
        ClosureCommand {
            closed: request.closed,
            message: request.message,
        },
        authenticated_actor.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_closure_transition(&transition, now)
        .map_err(|e| translate_persistence_error(e, "Closure"))?;
    tracing::info!(
        closed = transition.new_state.manually_closed,
        admin = %authenticated_actor.user_id,
        "Closure override changed"
    );

    Ok(SetClosureResponse {
        message: String::from(if transition.new_state.manually_closed {
            "Ordering closed"
        } else {
            "Ordering reopened"
        }),
        closure: closure_info(&transition.new_state),
        event_id,
    })
}

// ============================================================================
// Weekly special and combos
// ============================================================================

/// Returns the special of the current week.
///
/// Ingredients are only shown to admins.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_current_special(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CurrentSpecialResponse, ApiError> {
    let week: WeekKey = calendar.week_of(now);
    let special: Option<WeeklySpecial> = current_special(persistence, week)?;

    Ok(CurrentSpecialResponse {
        week: week.week,
        year: week.year,
        special: special
            .as_ref()
            .map(|s| special_info(s, authenticated_actor.is_admin())),
    })
}

fn write_special(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    command: SpecialCommand,
    mode: SpecialWriteMode,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(SpecialTransition, PersistTransitionResult), ApiError> {
    let week: WeekKey = calendar.week_of(now);
    let existing: Option<WeeklySpecial> = current_special(persistence, week)?;
    let transition: SpecialTransition = apply_special(
        week,
        now,
        existing.as_ref(),
        command,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_special_transition(&transition, mode)
        .map_err(|e| translate_persistence_error(e, "Weekly special"))?;
    Ok((transition, persisted))
}

fn special_write_response(
    transition: &SpecialTransition,
    persisted: PersistTransitionResult,
    message: &str,
) -> Result<SpecialWriteResponse, ApiError> {
    match &transition.change {
        SpecialChange::Insert(special) | SpecialChange::Update(special) => {
            let special: WeeklySpecial = WeeklySpecial {
                special_id: persisted.record_id.or(special.special_id),
                ..special.clone()
            };
            Ok(SpecialWriteResponse {
                special: special_info(&special, true),
                event_id: persisted.event_id,
                message: format!("{message} for {}", special.week),
            })
        }
        SpecialChange::Delete { .. } => Err(ApiError::Internal {
            message: String::from("Special write produced no special"),
        }),
    }
}

/// Creates the special of the current week, or replaces it in place.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the draft violates a
/// menu rule, or the write fails.
pub fn upsert_special(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    request: SpecialRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SpecialWriteResponse, ApiError> {
    AuthorizationService::authorize_manage_special(authenticated_actor)?;
    let draft: SpecialDraft = special_draft(request)?;

    let (transition, persisted) = write_special(
        persistence,
        calendar,
        now,
        SpecialCommand::Upsert { draft },
        SpecialWriteMode::Upsert,
        authenticated_actor,
        cause,
    )?;
    special_write_response(&transition, persisted, "Special saved")
}

/// Creates the special of the current week.
///
/// # Errors
///
/// Returns [`ApiError::Conflict`] if the week already has a special, even
/// when a concurrent request created it first.
pub fn create_special(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    request: SpecialRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SpecialWriteResponse, ApiError> {
    AuthorizationService::authorize_manage_special(authenticated_actor)?;
    let draft: SpecialDraft = special_draft(request)?;

    let (transition, persisted) = write_special(
        persistence,
        calendar,
        now,
        SpecialCommand::Create { draft },
        SpecialWriteMode::CreateOnly,
        authenticated_actor,
        cause,
    )?;
    special_write_response(&transition, persisted, "Special created")
}

/// Removes the special of the current week.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or no special is set.
pub fn delete_special(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeleteSpecialResponse, ApiError> {
    AuthorizationService::authorize_manage_special(authenticated_actor)?;

    let (_, persisted) = write_special(
        persistence,
        calendar,
        now,
        SpecialCommand::Remove,
        SpecialWriteMode::Upsert,
        authenticated_actor,
        cause,
    )?;
    let week: WeekKey = calendar.week_of(now);

    Ok(DeleteSpecialResponse {
        week: week.week,
        year: week.year,
        event_id: persisted.event_id,
        message: format!("Special removed for {week}"),
    })
}

/// Lists the preset combos plus the special of the current week.
///
/// Non-admins see the special without its ingredients.
///
/// # Errors
///
/// Returns an error if the special cannot be read.
pub fn list_combos(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListCombosResponse, ApiError> {
    let special: Option<WeeklySpecial> = current_special(persistence, calendar.week_of(now))?;
    let combos: Vec<Combo> = combo_listing(special.as_ref(), authenticated_actor.is_admin());

    Ok(ListCombosResponse {
        combos: combos.into_iter().map(combo_info).collect(),
    })
}

// ============================================================================
// Statistics
// ============================================================================

/// Statistics over every order.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn get_global_statistics(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<StatisticsResponse, ApiError> {
    AuthorizationService::authorize_view_global_statistics(authenticated_actor)?;

    let orders: Vec<Order> = persistence
        .list_orders()
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list orders: {e}"),
        })?;

    let spend: Vec<UserSpendInfo> = spend_by_user(&orders)
        .into_iter()
        .map(|s| UserSpendInfo {
            user_id: s.owner.value().to_string(),
            display_name: s.display_name,
            order_count: s.order_count,
            total: cents_to_euros(s.total_cents),
        })
        .collect();
    let stats: OrderStatistics = OrderStatistics::summarize(&orders, calendar.week_of(now), now);

    Ok(statistics_response("global", stats, spend))
}

/// Statistics over the caller's own orders.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_user_statistics(
    persistence: &mut Persistence,
    calendar: &OrderCalendar,
    now: DateTime<Utc>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<StatisticsResponse, ApiError> {
    let user_id: UserId = UserId::new(&authenticated_actor.user_id);
    let orders: Vec<Order> =
        persistence
            .list_orders_for_user(&user_id)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to list orders of {user_id}: {e}"),
            })?;
    let stats: OrderStatistics = OrderStatistics::summarize(&orders, calendar.week_of(now), now);

    Ok(statistics_response("user", stats, Vec::new()))
}

// ============================================================================
// Ingredient catalog
// ============================================================================

/// Lists catalog entries.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_catalog(
    persistence: &mut Persistence,
    request: ListCatalogRequest,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<ListCatalogResponse, ApiError> {
    let filter: CatalogFilter = CatalogFilter {
        category: request
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        available_only: request.available_only,
    };
    let entries: Vec<CatalogEntry> =
        persistence
            .list_catalog_entries(&filter)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to list ingredients: {e}"),
            })?;

    Ok(ListCatalogResponse {
        entries: entries.iter().map(catalog_entry_info).collect(),
    })
}

/// Lists the distinct catalog categories.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_catalog_categories(
    persistence: &mut Persistence,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<ListCategoriesResponse, ApiError> {
    let categories: Vec<String> =
        persistence
            .list_catalog_categories()
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to list categories: {e}"),
            })?;
    Ok(ListCategoriesResponse { categories })
}

fn write_catalog(
    persistence: &mut Persistence,
    command: CatalogCommand,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(CatalogTransition, PersistTransitionResult), ApiError> {
    AuthorizationService::authorize_manage_catalog(authenticated_actor)?;

    let entries: Vec<CatalogEntry> = persistence
        .list_catalog_entries(&CatalogFilter::default())
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list ingredients: {e}"),
        })?;
    let transition: CatalogTransition = apply_catalog(
        &entries,
        command,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_catalog_transition(&transition)
        .map_err(|e| translate_persistence_error(e, "Ingredient"))?;
    Ok((transition, persisted))
}

fn catalog_write_response(
    transition: &CatalogTransition,
    persisted: PersistTransitionResult,
    message: &str,
) -> Result<CatalogWriteResponse, ApiError> {
    match &transition.change {
        CatalogChange::Insert(entry) | CatalogChange::Update(entry) => {
            let entry: CatalogEntry = CatalogEntry {
                ingredient_id: persisted.record_id.or(entry.ingredient_id),
                ..entry.clone()
            };
            Ok(CatalogWriteResponse {
                message: format!("{message}: {}", entry.name),
                entry: catalog_entry_info(&entry),
                event_id: persisted.event_id,
            })
        }
        CatalogChange::Delete { .. } => Err(ApiError::Internal {
            message: String::from("Catalog write produced no entry"),
        }),
    }
}

/// Adds an ingredient to the catalog.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the name is already taken.
pub fn create_catalog_entry(
    persistence: &mut Persistence,
    request: CatalogRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CatalogWriteResponse, ApiError> {
    let (transition, persisted) = write_catalog(
        persistence,
        CatalogCommand::Add {
            draft: catalog_draft(request),
        },
        authenticated_actor,
        cause,
    )?;
    catalog_write_response(&transition, persisted, "Ingredient added")
}

/// Updates a catalog entry.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the entry does not
/// exist, a field is invalid, or the new name is already taken.
pub fn update_catalog_entry(
    persistence: &mut Persistence,
    ingredient_id: i64,
    request: CatalogRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CatalogWriteResponse, ApiError> {
    let (transition, persisted) = write_catalog(
        persistence,
        CatalogCommand::Revise {
            ingredient_id,
            draft: catalog_draft(request),
        },
        authenticated_actor,
        cause,
    )?;
    catalog_write_response(&transition, persisted, "Ingredient updated")
}

/// Removes a catalog entry.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the entry does not
/// exist.
pub fn delete_catalog_entry(
    persistence: &mut Persistence,
    ingredient_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeleteCatalogResponse, ApiError> {
    let (_, persisted) = write_catalog(
        persistence,
        CatalogCommand::Remove { ingredient_id },
        authenticated_actor,
        cause,
    )?;

    Ok(DeleteCatalogResponse {
        ingredient_id,
        event_id: persisted.event_id,
        message: format!("Ingredient {ingredient_id} removed"),
    })
}

// ============================================================================
// Push subscriptions
// ============================================================================

fn require_field(field: &str, value: &str, max: usize) -> Result<String, ApiError> {
    let value: &str = value.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("Value cannot be empty"),
        });
    }
    if value.chars().count() > max {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Value cannot exceed {max} characters"),
        });
    }
    Ok(value.to_string())
}

/// Registers a push destination for the caller.
///
/// Subscribing an endpoint again refreshes its keys.
///
/// # Errors
///
/// Returns an error if a field is blank or too long, or the write fails.
pub fn subscribe_push(
    persistence: &mut Persistence,
    now: DateTime<Utc>,
    request: &SubscribeRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SubscribeResponse, ApiError> {
    let endpoint: String = require_field("endpoint", &request.endpoint, MAX_ENDPOINT_LENGTH)?;
    let p256dh: String = require_field("p256dh", &request.p256dh, MAX_ENDPOINT_LENGTH)?;
    let auth: String = require_field("auth", &request.auth, MAX_ENDPOINT_LENGTH)?;

    let subscription_id: i64 = persistence
        .upsert_push_subscription(&authenticated_actor.user_id, &endpoint, &p256dh, &auth, now)
        .map_err(|e| translate_persistence_error(e, "Push subscription"))?;

    Ok(SubscribeResponse {
        subscription_id,
        message: String::from("Subscribed to notifications"),
    })
}

/// Removes one of the caller's push destinations.
///
/// Removing an unknown endpoint is not an error.
///
/// # Errors
///
/// Returns an error if the endpoint is blank or the delete fails.
pub fn unsubscribe_push(
    persistence: &mut Persistence,
    request: &UnsubscribeRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<UnsubscribeResponse, ApiError> {
    let endpoint: String = require_field("endpoint", &request.endpoint, MAX_ENDPOINT_LENGTH)?;
    let removed: usize = persistence
        .delete_push_subscription(&authenticated_actor.user_id, &endpoint)
        .map_err(|e| translate_persistence_error(e, "Push subscription"))?;

    Ok(UnsubscribeResponse {
        removed: removed > 0,
        message: String::from(if removed > 0 {
            "Unsubscribed from notifications"
        } else {
            "No subscription for this endpoint"
        }),
    })
}

// ============================================================================
// Audit trail
// ============================================================================

/// Lists recent audit events, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the limit is not
/// positive, or the query fails.
pub fn list_audit_events(
    persistence: &mut Persistence,
    request: ListAuditEventsRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListAuditEventsResponse, ApiError> {
    AuthorizationService::authorize_view_audit(authenticated_actor)?;

    let limit: i64 = request.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    if limit <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("limit"),
            message: String::from("Limit must be positive"),
        });
    }

    let events: Vec<AuditEvent> = persistence
        .list_recent_audit_events(limit.min(MAX_AUDIT_LIMIT))
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list audit events: {e}"),
        })?;

    Ok(ListAuditEventsResponse {
        events: events.into_iter().map(audit_event_info).collect(),
    })
}
