// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the weekly order service.
//!
//! The API layer sits between the HTTP server and the core crate. It turns
//! trusted identity fields into an [`AuthenticatedActor`], enforces role
//! requirements, converts wire requests into domain drafts and core
//! commands, persists the resulting transitions and translates every
//! failure into an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod money;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, format_local, translate_core_error, translate_domain_error,
    translate_gated_error, translate_persistence_error,
};
pub use handlers::{
    DEFAULT_AUDIT_LIMIT, MAX_AUDIT_LIMIT, cancel_order, create_catalog_entry, create_special,
    delete_catalog_entry, delete_special, get_closure, get_current_special,
    get_global_statistics, get_latest_order, get_user_statistics, get_window_status,
    list_audit_events, list_catalog, list_catalog_categories, list_combos, list_orders,
    place_order, revise_order, set_closure, set_order_paid, set_order_price, subscribe_push,
    unsubscribe_push, update_catalog_entry, upsert_special,
};
pub use money::{PriceInputError, cents_to_euros, euros_to_price, price_to_euros};
pub use request_response::{
    AuditEventInfo, CancelOrderResponse, CatalogEntryInfo, CatalogRequest, CatalogWriteResponse,
    ClosureInfo, ComboInfo, CountInfo, CurrentSpecialResponse, DeleteCatalogResponse,
    DeleteSpecialResponse, LatestOrderResponse, ListAuditEventsRequest, ListAuditEventsResponse,
    ListCatalogRequest, ListCatalogResponse, ListCategoriesResponse, ListCombosResponse,
    ListOrdersRequest, ListOrdersResponse, OrderInfo, OrderRequest, OrderResponse,
    SendPushRequest, SendPushResponse, SetClosureRequest, SetClosureResponse, SetPaidRequest,
    SetPriceRequest, SpecialInfo, SpecialRequest, SpecialWriteResponse, StatisticsResponse,
    SubscribeRequest, SubscribeResponse, TrendInfo, UnsubscribeRequest, UnsubscribeResponse,
    UserSpendInfo, WindowStatusResponse,
};
