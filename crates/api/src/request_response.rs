// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.
//!
//! Enum-valued fields travel as strings (`NORMAL`, `WHOLEGRAIN`, ...) and
//! are parsed by the handlers. Prices travel as euro amounts; timestamps as
//! RFC 3339 strings.

use serde::{Deserialize, Serialize};

// ============================================================================
// Orders
// ============================================================================

/// API request to place or revise an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// The name printed on the order.
    pub display_name: String,
    /// `NORMAL` or `LARGE`.
    pub size: String,
    /// `NORMAL`, `WHOLEGRAIN` or `SEEDED`.
    pub bread: String,
    /// The ingredients, in order.
    pub ingredients: Vec<String>,
    /// Optional predefined combo the order is based on.
    #[serde(default)]
    pub combo: Option<String>,
}

/// An order as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    /// The order's identifier.
    pub order_id: i64,
    /// The owner's identity.
    pub owner_id: String,
    /// The name printed on the order, uppercase.
    pub display_name: String,
    /// The size.
    pub size: String,
    /// The bread.
    pub bread: String,
    /// The ingredients, in order.
    pub ingredients: Vec<String>,
    /// The combo reference, if any.
    pub combo: Option<String>,
    /// ISO week the order belongs to.
    pub week: u32,
    /// ISO year the order belongs to.
    pub year: i32,
    /// Creation time.
    pub created_at: String,
    /// Price in euros, once set.
    pub price: Option<f64>,
    /// Whether the order has been paid.
    pub paid: bool,
}

/// API response for a successful order write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// The order after the write.
    pub order: OrderInfo,
    /// The audit event recorded for the write.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a cancelled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    /// The removed order.
    pub order_id: i64,
    /// The audit event recorded for the removal.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to list the orders of one week.
///
/// Both fields absent means the current week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrdersRequest {
    /// ISO week number.
    pub week: Option<u32>,
    /// ISO year.
    pub year: Option<i32>,
}

/// API response listing the orders of one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOrdersResponse {
    /// ISO week listed.
    pub week: u32,
    /// ISO year listed.
    pub year: i32,
    /// The orders, newest first.
    pub orders: Vec<OrderInfo>,
    /// Sum of the set prices, in euros.
    pub total: f64,
}

/// API request to price an order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetPriceRequest {
    /// The price in euros, at most two decimals.
    pub price: f64,
}

/// API request to mark an order paid or unpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPaidRequest {
    /// The new paid flag.
    pub paid: bool,
}

/// API response with a user's most recent order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestOrderResponse {
    /// The order, if the user ever ordered.
    pub order: Option<OrderInfo>,
}

// ============================================================================
// Window and closure
// ============================================================================

/// API response describing the ordering window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStatusResponse {
    /// Whether orders may be placed, revised or cancelled right now.
    pub is_open: bool,
    /// Whether an administrator has closed the service.
    pub manually_closed: bool,
    /// The instant the status was computed for.
    pub current_time: String,
    /// The cutoff of the current cycle.
    pub deadline: String,
    /// The next reopening.
    pub next_opening: String,
    /// A human-readable summary.
    pub message: String,
    /// The IANA timezone of the schedule.
    pub timezone: String,
}

/// The closure override as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureInfo {
    /// Whether ordering is forced closed.
    pub manually_closed: bool,
    /// The message shown while closed.
    pub closure_message: String,
    /// Who closed the service.
    pub closed_by: Option<String>,
    /// When the service was closed.
    pub closed_at: Option<String>,
}

/// API request to change the closure override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetClosureRequest {
    /// Whether ordering should be forced closed.
    pub closed: bool,
    /// A new message; absent keeps the current one.
    #[serde(default)]
    pub message: Option<String>,
}

/// API response for a closure change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetClosureResponse {
    /// The override after the change.
    pub closure: ClosureInfo,
    /// The audit event recorded for the change.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Weekly special and combos
// ============================================================================

/// API request to set the weekly special.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRequest {
    /// `NORMAL` or `LARGE`.
    pub size: String,
    /// `NORMAL`, `WHOLEGRAIN` or `SEEDED`.
    pub bread: String,
    /// The ingredients, in order.
    pub ingredients: Vec<String>,
}

/// The weekly special as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialInfo {
    /// The special's identifier.
    pub special_id: Option<i64>,
    /// The size.
    pub size: String,
    /// The bread.
    pub bread: String,
    /// The ingredients; empty when hidden from the caller.
    pub ingredients: Vec<String>,
    /// ISO week of the special.
    pub week: u32,
    /// ISO year of the special.
    pub year: i32,
    /// Last change.
    pub updated_at: String,
}

/// API response with the special of the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSpecialResponse {
    /// ISO week looked up.
    pub week: u32,
    /// ISO year looked up.
    pub year: i32,
    /// The special, if one is set.
    pub special: Option<SpecialInfo>,
}

/// API response for a special write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialWriteResponse {
    /// The special after the write.
    pub special: SpecialInfo,
    /// The audit event recorded for the write.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a removed special.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSpecialResponse {
    /// ISO week of the removed special.
    pub week: u32,
    /// ISO year of the removed special.
    pub year: i32,
    /// The audit event recorded for the removal.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// A combo as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboInfo {
    /// The combo name.
    pub name: String,
    /// The size.
    pub size: String,
    /// The bread.
    pub bread: String,
    /// The ingredients; empty for a hidden special.
    pub ingredients: Vec<String>,
    /// Whether this is the weekly special.
    pub is_special: bool,
}

/// API response listing the combos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCombosResponse {
    /// Presets first, then the weekly special if set.
    pub combos: Vec<ComboInfo>,
}

// ============================================================================
// Statistics
// ============================================================================

/// A label with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountInfo {
    /// The counted label.
    pub label: String,
    /// How often it occurred.
    pub count: usize,
}

/// Orders in one week of the trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendInfo {
    /// ISO week.
    pub week: u32,
    /// ISO year.
    pub year: i32,
    /// Orders created in that week.
    pub count: usize,
}

/// Spend of one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSpendInfo {
    /// The user's identity.
    pub user_id: String,
    /// The name on the user's most recent order.
    pub display_name: String,
    /// Number of orders.
    pub order_count: usize,
    /// Total of set prices, in euros.
    pub total: f64,
}

/// API response with order statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    /// `global` or `user`.
    pub scope: String,
    /// Number of orders considered.
    pub total_orders: usize,
    /// Orders in the current week.
    pub current_week_orders: usize,
    /// Total of set prices, in euros.
    pub total_spend: f64,
    /// The most frequent ingredients.
    pub top_ingredients: Vec<CountInfo>,
    /// The most frequent combos.
    pub top_combos: Vec<CountInfo>,
    /// Orders per size.
    pub sizes: Vec<CountInfo>,
    /// Orders per bread.
    pub breads: Vec<CountInfo>,
    /// Orders per week over the trailing eight weeks.
    pub trend: Vec<TrendInfo>,
    /// Spend per user; empty for personal statistics.
    pub spend_by_user: Vec<UserSpendInfo>,
}

// ============================================================================
// Ingredient catalog
// ============================================================================

/// API request to create or update a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRequest {
    /// The ingredient name.
    pub name: String,
    /// The category; absent means the default or the current one.
    #[serde(default)]
    pub category: Option<String>,
    /// Availability; absent means available or unchanged.
    #[serde(default)]
    pub available: Option<bool>,
    /// Sort position; absent means zero or unchanged.
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// API request to list the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCatalogRequest {
    /// Only entries of this category.
    #[serde(default)]
    pub category: Option<String>,
    /// Only available entries.
    #[serde(default)]
    pub available_only: bool,
}

/// A catalog entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryInfo {
    /// The entry's identifier.
    pub ingredient_id: i64,
    /// The ingredient name.
    pub name: String,
    /// The category.
    pub category: String,
    /// Whether it can currently be ordered.
    pub available: bool,
    /// Sort position.
    pub sort_order: i32,
}

/// API response listing catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCatalogResponse {
    /// Entries sorted by position, then name.
    pub entries: Vec<CatalogEntryInfo>,
}

/// API response listing catalog categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCategoriesResponse {
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
}

/// API response for a catalog write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogWriteResponse {
    /// The entry after the write.
    pub entry: CatalogEntryInfo,
    /// The audit event recorded for the write.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a removed catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCatalogResponse {
    /// The removed entry.
    pub ingredient_id: i64,
    /// The audit event recorded for the removal.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Push subscriptions
// ============================================================================

/// API request to register a push destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// The push service endpoint.
    pub endpoint: String,
    /// The client public key.
    pub p256dh: String,
    /// The client auth secret.
    pub auth: String,
}

/// API response for a registered destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    /// The destination's identifier.
    pub subscription_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to remove a push destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    /// The push service endpoint to remove.
    pub endpoint: String,
}

/// API response for a removed destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeResponse {
    /// Whether a destination was removed.
    pub removed: bool,
    /// A status message.
    pub message: String,
}

/// API request for a manual broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPushRequest {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Link opened on click; defaults to `/`.
    #[serde(default)]
    pub url: Option<String>,
}

/// API response for a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPushResponse {
    /// Destinations that accepted the notification.
    pub delivered: usize,
    /// Destinations removed because they are gone.
    pub pruned: usize,
    /// Destinations that failed transiently.
    pub failed: usize,
}

// ============================================================================
// Audit trail
// ============================================================================

/// API request to list audit events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAuditEventsRequest {
    /// Maximum number of events; defaults to 50, capped at 500.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event's identifier.
    pub event_id: Option<i64>,
    /// Who acted.
    pub actor_id: String,
    /// The actor's role.
    pub actor_type: String,
    /// The actor's display name, if known.
    pub actor_name: Option<String>,
    /// The request that caused the change.
    pub cause_id: String,
    /// Why the change was made.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before the change.
    pub before: String,
    /// State after the change.
    pub after: String,
    /// ISO week of the change, for week-scoped events.
    pub week: Option<u32>,
    /// ISO year of the change, for week-scoped events.
    pub year: Option<i32>,
}

/// API response listing audit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAuditEventsResponse {
    /// Events, newest first.
    pub events: Vec<AuditEventInfo>,
}
