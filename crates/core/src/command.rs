// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bocadillo_domain::{CatalogDraft, OrderDraft, Price, SpecialDraft};

/// A command represents user intent against an order as data only.
///
/// Commands are the only way to request order changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a new order in the current week.
    PlaceOrder {
        /// The requested order fields.
        draft: OrderDraft,
    },
    /// Replace the editable fields of an existing order.
    ReviseOrder {
        /// The order to revise.
        order_id: i64,
        /// The new order fields.
        draft: OrderDraft,
    },
    /// Remove an order from the current week.
    CancelOrder {
        /// The order to cancel.
        order_id: i64,
    },
    /// Assign a price to an order.
    SetPrice {
        /// The order to price.
        order_id: i64,
        /// The price.
        price: Price,
    },
    /// Mark an order paid or unpaid.
    SetPaid {
        /// The order to update.
        order_id: i64,
        /// The new paid flag.
        paid: bool,
    },
}

impl Command {
    /// The action name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlaceOrder { .. } => "PlaceOrder",
            Self::ReviseOrder { .. } => "ReviseOrder",
            Self::CancelOrder { .. } => "CancelOrder",
            Self::SetPrice { .. } => "SetPrice",
            Self::SetPaid { .. } => "SetPaid",
        }
    }
}

/// Commands against the weekly special.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Create the special for the current week, or replace it in place.
    Upsert {
        /// The curated fields.
        draft: SpecialDraft,
    },
    /// Create the special for the current week; fails if one exists.
    Create {
        /// The curated fields.
        draft: SpecialDraft,
    },
    /// Remove the special for the current week.
    Remove,
}

/// Set the manual closure override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureCommand {
    /// Whether ordering should be forced closed.
    pub closed: bool,
    /// A replacement message; `None` keeps the current one.
    pub message: Option<String>,
}

/// Commands against the ingredient catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    /// Add an ingredient.
    Add {
        /// The entry fields.
        draft: CatalogDraft,
    },
    /// Update an ingredient.
    Revise {
        /// The entry to update.
        ingredient_id: i64,
        /// The entry fields.
        draft: CatalogDraft,
    },
    /// Remove an ingredient.
    Remove {
        /// The entry to remove.
        ingredient_id: i64,
    },
}
