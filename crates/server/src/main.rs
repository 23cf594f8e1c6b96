// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;
mod reminder;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use bocadillo_api::{
    ApiError, AuthorizationService, CancelOrderResponse, CatalogRequest, CatalogWriteResponse,
    ClosureInfo, CurrentSpecialResponse, DeleteCatalogResponse, DeleteSpecialResponse,
    LatestOrderResponse, ListAuditEventsRequest, ListAuditEventsResponse, ListCatalogRequest,
    ListCatalogResponse, ListCategoriesResponse, ListCombosResponse, ListOrdersRequest,
    ListOrdersResponse, OrderRequest, OrderResponse, SendPushRequest, SendPushResponse,
    SetClosureRequest, SetClosureResponse, SetPaidRequest, SetPriceRequest, SpecialRequest,
    SpecialWriteResponse, StatisticsResponse, SubscribeRequest, SubscribeResponse,
    UnsubscribeRequest, UnsubscribeResponse, WindowStatusResponse, cancel_order,
    create_catalog_entry, create_special, delete_catalog_entry, delete_special, get_closure,
    get_current_special, get_global_statistics, get_latest_order, get_user_statistics,
    get_window_status, list_audit_events, list_catalog, list_catalog_categories, list_combos,
    list_orders, place_order, revise_order, set_closure, set_order_paid, set_order_price,
    subscribe_push, unsubscribe_push, update_catalog_entry, upsert_special,
};
use bocadillo_audit::Cause;
use bocadillo_domain::{OrderCalendar, OrderWindow};
use bocadillo_persistence::{Persistence, PersistenceError, PushSubscriptionData};
use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use clap::Parser;
use identity::Identity;
use reminder::{
    DeliveryReport, LogTransport, Notification, PushTransport, ReminderScheduler, TickOutcome,
    broadcast,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Tag for notifications sent by hand.
const MANUAL_NOTIFICATION_TAG: &str = "bocadillo-manual";

/// Bocadillo Server - HTTP server for the weekly group sandwich order
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// IANA timezone the weekly cycle runs in
    #[arg(long, default_value = "Europe/Madrid")]
    timezone: String,

    /// Weekday on which ordering reopens after the Thursday cutoff
    #[arg(long, default_value = "friday")]
    reopen_weekday: String,

    /// Seconds between reminder checks
    #[arg(long, default_value_t = 3600)]
    reminder_interval_secs: u64,

    /// Seconds a single push delivery may take
    #[arg(long, default_value_t = 10)]
    delivery_timeout_secs: u64,

    /// Do not run the deadline reminder task
    #[arg(long)]
    disable_reminders: bool,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex to allow safe concurrent
/// access. The clock is injectable so the time-dependent rules can be
/// driven from tests.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Window configuration and timezone.
    calendar: OrderCalendar,
    /// Source of the current instant.
    clock: fn() -> DateTime<Utc>,
    /// Push delivery backend.
    transport: Arc<dyn PushTransport>,
    /// Upper bound for a single delivery.
    delivery_timeout: Duration,
}

impl AppState {
    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok`.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Why ordering is closed (`manual` or `schedule`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    /// When ordering reopens, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_opening: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Closure reason for window rejections.
    reason: Option<String>,
    /// Next opening for window rejections.
    next_opening: Option<String>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            reason: None,
            next_opening: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            reason: self.reason,
            next_opening: self.next_opening,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => {
                Self::new(StatusCode::FORBIDDEN, err.to_string())
            }
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::WindowClosed {
                reason,
                message,
                next_opening,
            } => Self {
                status: StatusCode::LOCKED,
                message,
                reason: Some(reason),
                next_opening,
            },
            ApiError::ResourceNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, err.to_string())
            }
            ApiError::Conflict { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Persistence error: {err}"),
        )
    }
}

/// Builds the audit cause for a request.
fn request_cause(action: &str) -> Cause {
    Cause::new(format!("http:{action}"), format!("HTTP {action} request"))
}

// ============================================================================
// Liveness and window
// ============================================================================

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_window_status(
    AxumState(app_state): AxumState<AppState>,
) -> Json<WindowStatusResponse> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: WindowStatusResponse =
        get_window_status(&mut persistence, &app_state.calendar, now);
    drop(persistence);

    Json(response)
}

async fn handle_get_closure(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<ClosureInfo>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: ClosureInfo = get_closure(&mut persistence, now, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_set_closure(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<SetClosureRequest>,
) -> Result<Json<SetClosureResponse>, HttpError> {
    info!(
        user_id = %actor.user_id,
        closed = req.closed,
        "Handling set_closure request"
    );

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: SetClosureResponse =
        set_closure(&mut persistence, now, req, &actor, request_cause("set_closure"))?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Orders
// ============================================================================

async fn handle_list_orders(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Query(req): Query<ListOrdersRequest>,
) -> Result<Json<ListOrdersResponse>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: ListOrdersResponse =
        list_orders(&mut persistence, &app_state.calendar, now, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_place_order(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), HttpError> {
    info!(user_id = %actor.user_id, "Handling place_order request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = place_order(
        &mut persistence,
        &app_state.calendar,
        now,
        req,
        &actor,
        request_cause("place_order"),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_revise_order(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(order_id): Path<i64>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<OrderResponse>, HttpError> {
    info!(user_id = %actor.user_id, order_id, "Handling revise_order request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = revise_order(
        &mut persistence,
        &app_state.calendar,
        now,
        order_id,
        req,
        &actor,
        request_cause("revise_order"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_cancel_order(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(order_id): Path<i64>,
) -> Result<Json<CancelOrderResponse>, HttpError> {
    info!(user_id = %actor.user_id, order_id, "Handling cancel_order request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: CancelOrderResponse = cancel_order(
        &mut persistence,
        &app_state.calendar,
        now,
        order_id,
        &actor,
        request_cause("cancel_order"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_set_price(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(order_id): Path<i64>,
    Json(req): Json<SetPriceRequest>,
) -> Result<Json<OrderResponse>, HttpError> {
    info!(user_id = %actor.user_id, order_id, "Handling set_order_price request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = set_order_price(
        &mut persistence,
        &app_state.calendar,
        now,
        order_id,
        req,
        &actor,
        request_cause("set_order_price"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_set_paid(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(order_id): Path<i64>,
    Json(req): Json<SetPaidRequest>,
) -> Result<Json<OrderResponse>, HttpError> {
    info!(user_id = %actor.user_id, order_id, paid = req.paid, "Handling set_order_paid request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = set_order_paid(
        &mut persistence,
        &app_state.calendar,
        now,
        order_id,
        req,
        &actor,
        request_cause("set_order_paid"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_latest_order(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<LatestOrderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LatestOrderResponse = get_latest_order(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Combos and weekly special
// ============================================================================

async fn handle_list_combos(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<ListCombosResponse>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCombosResponse =
        list_combos(&mut persistence, &app_state.calendar, now, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_get_special(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<CurrentSpecialResponse>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: CurrentSpecialResponse =
        get_current_special(&mut persistence, &app_state.calendar, now, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_upsert_special(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<SpecialRequest>,
) -> Result<Json<SpecialWriteResponse>, HttpError> {
    info!(user_id = %actor.user_id, "Handling upsert_special request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: SpecialWriteResponse = upsert_special(
        &mut persistence,
        &app_state.calendar,
        now,
        req,
        &actor,
        request_cause("upsert_special"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_create_special(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<SpecialRequest>,
) -> Result<(StatusCode, Json<SpecialWriteResponse>), HttpError> {
    info!(user_id = %actor.user_id, "Handling create_special request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: SpecialWriteResponse = create_special(
        &mut persistence,
        &app_state.calendar,
        now,
        req,
        &actor,
        request_cause("create_special"),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_delete_special(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<DeleteSpecialResponse>, HttpError> {
    info!(user_id = %actor.user_id, "Handling delete_special request");

    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteSpecialResponse = delete_special(
        &mut persistence,
        &app_state.calendar,
        now,
        &actor,
        request_cause("delete_special"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Statistics
// ============================================================================

async fn handle_global_statistics(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<StatisticsResponse>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: StatisticsResponse =
        get_global_statistics(&mut persistence, &app_state.calendar, now, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_user_statistics(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<StatisticsResponse>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: StatisticsResponse =
        get_user_statistics(&mut persistence, &app_state.calendar, now, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Ingredient catalog
// ============================================================================

async fn handle_list_catalog(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Query(req): Query<ListCatalogRequest>,
) -> Result<Json<ListCatalogResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCatalogResponse = list_catalog(&mut persistence, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
) -> Result<Json<ListCategoriesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCategoriesResponse = list_catalog_categories(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_create_catalog_entry(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<CatalogRequest>,
) -> Result<(StatusCode, Json<CatalogWriteResponse>), HttpError> {
    info!(user_id = %actor.user_id, "Handling create_catalog_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CatalogWriteResponse = create_catalog_entry(
        &mut persistence,
        req,
        &actor,
        request_cause("create_catalog_entry"),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_update_catalog_entry(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(ingredient_id): Path<i64>,
    Json(req): Json<CatalogRequest>,
) -> Result<Json<CatalogWriteResponse>, HttpError> {
    info!(user_id = %actor.user_id, ingredient_id, "Handling update_catalog_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CatalogWriteResponse = update_catalog_entry(
        &mut persistence,
        ingredient_id,
        req,
        &actor,
        request_cause("update_catalog_entry"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_delete_catalog_entry(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Path(ingredient_id): Path<i64>,
) -> Result<Json<DeleteCatalogResponse>, HttpError> {
    info!(user_id = %actor.user_id, ingredient_id, "Handling delete_catalog_entry request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteCatalogResponse = delete_catalog_entry(
        &mut persistence,
        ingredient_id,
        &actor,
        request_cause("delete_catalog_entry"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Push notifications
// ============================================================================

async fn handle_subscribe(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, HttpError> {
    let now: DateTime<Utc> = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: SubscribeResponse = subscribe_push(&mut persistence, now, &req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_unsubscribe(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<UnsubscribeRequest>,
) -> Result<Json<UnsubscribeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: UnsubscribeResponse = unsubscribe_push(&mut persistence, &req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_send_push(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Json(req): Json<SendPushRequest>,
) -> Result<Json<SendPushResponse>, HttpError> {
    info!(user_id = %actor.user_id, title = %req.title, "Handling send_push request");

    AuthorizationService::authorize_send_push(&actor).map_err(ApiError::from)?;

    let title: &str = req.title.trim();
    let body: &str = req.body.trim();
    if title.is_empty() || body.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from(if title.is_empty() { "title" } else { "body" }),
            message: String::from("Notification title and body are required"),
        }
        .into());
    }
    let notification: Notification = Notification {
        title: title.to_string(),
        body: body.to_string(),
        tag: String::from(MANUAL_NOTIFICATION_TAG),
        url: req
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or("/")
            .to_string(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let destinations: Vec<PushSubscriptionData> = persistence.list_push_subscriptions()?;
    drop(persistence);

    let report: DeliveryReport = broadcast(
        &app_state.persistence,
        app_state.transport.as_ref(),
        &destinations,
        &notification,
        app_state.delivery_timeout,
    )
    .await;

    info!(
        delivered = report.delivered,
        pruned = report.pruned,
        failed = report.failed,
        "Manual notification sent"
    );

    Ok(Json(SendPushResponse {
        delivered: report.delivered,
        pruned: report.pruned,
        failed: report.failed,
    }))
}

// ============================================================================
// Audit trail
// ============================================================================

async fn handle_list_audit(
    AxumState(app_state): AxumState<AppState>,
    Identity(actor): Identity,
    Query(req): Query<ListAuditEventsRequest>,
) -> Result<Json<ListAuditEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListAuditEventsResponse = list_audit_events(&mut persistence, req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/window", get(handle_window_status))
        .route("/closure", get(handle_get_closure).put(handle_set_closure))
        .route("/orders", get(handle_list_orders).post(handle_place_order))
        .route("/orders/latest", get(handle_latest_order))
        .route(
            "/orders/{order_id}",
            put(handle_revise_order).delete(handle_cancel_order),
        )
        .route("/orders/{order_id}/price", patch(handle_set_price))
        .route("/orders/{order_id}/paid", patch(handle_set_paid))
        .route("/combos", get(handle_list_combos))
        .route(
            "/special",
            get(handle_get_special)
                .put(handle_upsert_special)
                .post(handle_create_special)
                .delete(handle_delete_special),
        )
        .route("/stats", get(handle_global_statistics))
        .route("/stats/me", get(handle_user_statistics))
        .route(
            "/catalog",
            get(handle_list_catalog).post(handle_create_catalog_entry),
        )
        .route("/catalog/categories", get(handle_list_categories))
        .route(
            "/catalog/{ingredient_id}",
            put(handle_update_catalog_entry).delete(handle_delete_catalog_entry),
        )
        .route(
            "/push/subscriptions",
            post(handle_subscribe).delete(handle_unsubscribe),
        )
        .route("/push/send", post(handle_send_push))
        .route("/audit", get(handle_list_audit))
        .with_state(app_state)
}

/// Runs the deadline reminder on a fixed interval until the process exits.
fn spawn_reminder_task(app_state: AppState, every: Duration) {
    tokio::spawn(async move {
        let mut scheduler: ReminderScheduler = ReminderScheduler::new(app_state.calendar);
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let outcome: TickOutcome = scheduler
                .tick(
                    &app_state.persistence,
                    app_state.transport.as_ref(),
                    app_state.delivery_timeout,
                    app_state.now(),
                )
                .await;
            debug!(?outcome, "Reminder check finished");
        }
    });
}

/// Builds the calendar from the command-line arguments.
fn build_calendar(args: &Args) -> Result<OrderCalendar, Box<dyn std::error::Error>> {
    let timezone: Tz = args
        .timezone
        .parse()
        .map_err(|e| format!("Invalid timezone '{}': {e}", args.timezone))?;
    let reopen: Weekday = args
        .reopen_weekday
        .parse()
        .map_err(|e| format!("Invalid reopen weekday '{}': {e}", args.reopen_weekday))?;
    let window: OrderWindow = OrderWindow::reopening_on(reopen)?;
    Ok(OrderCalendar::new(timezone, window))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bocadillo Server");

    let calendar: OrderCalendar = build_calendar(&args)?;
    info!(
        timezone = %calendar.timezone().name(),
        reopen = ?calendar.window().reopen_weekday(),
        "Order window configured"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        calendar,
        clock: Utc::now,
        transport: Arc::new(LogTransport),
        delivery_timeout: Duration::from_secs(args.delivery_timeout_secs.max(1)),
    };

    if args.disable_reminders {
        info!("Deadline reminders disabled");
    } else {
        let every: Duration = Duration::from_secs(args.reminder_interval_secs.max(1));
        spawn_reminder_task(app_state.clone(), every);
        info!(interval_secs = every.as_secs(), "Deadline reminders enabled");
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
