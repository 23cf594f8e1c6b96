// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State transitions for the weekly order service.
//!
//! Every mutation is expressed as a command, checked against the ordering
//! window and the requester, and turned into a change plus an audit event.
//! Nothing here touches storage.

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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{apply, apply_catalog, apply_closure, apply_special};
pub use command::{CatalogCommand, ClosureCommand, Command, SpecialCommand};
pub use error::CoreError;
pub use state::{
    CatalogChange, CatalogTransition, ClosureTransition, OrderChange, OrderingContext, Requester,
    SpecialChange, SpecialTransition, TransitionResult, catalog_snapshot, closure_snapshot,
    order_snapshot, special_snapshot,
};
