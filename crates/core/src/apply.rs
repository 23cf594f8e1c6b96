// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{CatalogCommand, ClosureCommand, Command, SpecialCommand};
use crate::error::CoreError;
use crate::state::{
    CatalogChange, CatalogTransition, ClosureTransition, OrderChange, OrderingContext, Requester,
    SpecialChange, SpecialTransition, TransitionResult, catalog_snapshot, closure_snapshot,
    order_snapshot, special_snapshot,
};
use bocadillo_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use bocadillo_domain::{
    CatalogEntry, ClosureOverride, Order, WeekKey, WeeklySpecial, normalize_order_draft,
    normalize_special_draft, validate_catalog_draft, validate_catalog_name_unique,
    validate_closure_message, validate_order_draft, validate_payment, validate_special_draft,
};
use chrono::{DateTime, Utc};

/// Resolves the order a gated command targets.
///
/// Orders outside the current week are reported as missing, not as
/// forbidden, so other weeks' data is not revealed.
fn current_week_order<'o>(
    existing: Option<&'o Order>,
    order_id: i64,
    week: WeekKey,
) -> Result<&'o Order, CoreError> {
    existing
        .filter(|order| order.order_id == Some(order_id) && order.week == week)
        .ok_or_else(|| CoreError::NotFound {
            resource: String::from("Order"),
            message: format!("order {order_id} in week {week}"),
        })
}

/// Resolves any stored order, regardless of week.
fn stored_order(existing: Option<&Order>, order_id: i64) -> Result<&Order, CoreError> {
    existing
        .filter(|order| order.order_id == Some(order_id))
        .ok_or_else(|| CoreError::NotFound {
            resource: String::from("Order"),
            message: format!("order {order_id}"),
        })
}

fn catalog_entry(entries: &[CatalogEntry], ingredient_id: i64) -> Result<&CatalogEntry, CoreError> {
    entries
        .iter()
        .find(|e| e.ingredient_id == Some(ingredient_id))
        .ok_or_else(|| CoreError::NotFound {
            resource: String::from("Ingredient"),
            message: format!("ingredient {ingredient_id}"),
        })
}

fn ensure_owner(order: &Order, requester: &Requester, action: &str) -> Result<(), CoreError> {
    if requester.can_modify(order) {
        return Ok(());
    }
    Err(CoreError::PermissionDenied {
        action: action.to_string(),
        reason: String::from("only the owner or an administrator may change this order"),
    })
}

fn ensure_admin(requester: &Requester, action: &str) -> Result<(), CoreError> {
    if requester.is_admin {
        return Ok(());
    }
    Err(CoreError::PermissionDenied {
        action: action.to_string(),
        reason: String::from("administrator role required"),
    })
}

/// Applies an order command, producing the change and an audit event.
///
/// Gated commands (place, revise, cancel) check the closure override and
/// the schedule first, then resolve the target in the current week, then
/// check ownership, then validate. Price and paid updates are not gated
/// and apply to orders of any week.
///
/// # Arguments
///
/// * `context` - The request instant, calendar and closure override
/// * `existing` - The stored order targeted by the command, if any
/// * `command` - The command to apply
/// * `requester` - Who the command is executed for
/// * `actor` - The actor recorded in the audit trail
/// * `cause` - The cause recorded in the audit trail
///
/// # Errors
///
/// Returns an error if:
/// - The window is closed
/// - The target order does not exist or belongs to another week
/// - The requester is neither the owner nor an administrator
/// - The new fields violate an order rule
#[allow(clippy::too_many_lines)]
pub fn apply(
    context: &OrderingContext<'_>,
    existing: Option<&Order>,
    command: Command,
    requester: &Requester,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let name: &str = command.name();

    match command {
        Command::PlaceOrder { draft } => {
            context.ensure_open()?;
            validate_order_draft(&draft)?;

            let week: WeekKey = context.current_week();
            let order: Order = Order::new(
                requester.user_id.clone(),
                normalize_order_draft(draft),
                week,
                context.now,
            );

            let action: Action = Action::new(
                name.to_string(),
                Some(format!(
                    "{} ordered {} ingredient(s) for {week}",
                    order.display_name,
                    order.ingredients.len()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                StateSnapshot::empty(),
                order_snapshot(&order),
                week,
            );

            Ok(TransitionResult {
                change: OrderChange::Insert(order),
                audit_event,
            })
        }
        Command::ReviseOrder { order_id, draft } => {
            context.ensure_open()?;
            let order: &Order = current_week_order(existing, order_id, context.current_week())?;
            ensure_owner(order, requester, "edit order")?;
            validate_order_draft(&draft)?;

            let revised: Order = order.revised(normalize_order_draft(draft));
            let action: Action = Action::new(
                name.to_string(),
                Some(format!("Revised order {order_id}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                order_snapshot(order),
                order_snapshot(&revised),
                order.week,
            );

            Ok(TransitionResult {
                change: OrderChange::Update(revised),
                audit_event,
            })
        }
        Command::CancelOrder { order_id } => {
            context.ensure_open()?;
            let order: &Order = current_week_order(existing, order_id, context.current_week())?;
            ensure_owner(order, requester, "cancel order")?;

            let action: Action = Action::new(
                name.to_string(),
                Some(format!("Cancelled order {order_id}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                order_snapshot(order),
                StateSnapshot::empty(),
                order.week,
            );

            Ok(TransitionResult {
                change: OrderChange::Delete { order_id },
                audit_event,
            })
        }
        Command::SetPrice { order_id, price } => {
            ensure_admin(requester, "set price")?;
            let order: &Order = stored_order(existing, order_id)?;

            let priced: Order = Order {
                price: Some(price),
                ..order.clone()
            };
            validate_payment(priced.price, priced.paid)?;

            let action: Action = Action::new(
                name.to_string(),
                Some(format!("Set price of order {order_id} to {price}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                order_snapshot(order),
                order_snapshot(&priced),
                order.week,
            );

            Ok(TransitionResult {
                change: OrderChange::Update(priced),
                audit_event,
            })
        }
        Command::SetPaid { order_id, paid } => {
            ensure_admin(requester, "set paid")?;
            let order: &Order = stored_order(existing, order_id)?;
            validate_payment(order.price, paid)?;

            let updated: Order = Order {
                paid,
                ..order.clone()
            };
            let action: Action = Action::new(
                name.to_string(),
                Some(format!(
                    "Marked order {order_id} as {}",
                    if paid { "paid" } else { "unpaid" }
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                order_snapshot(order),
                order_snapshot(&updated),
                order.week,
            );

            Ok(TransitionResult {
                change: OrderChange::Update(updated),
                audit_event,
            })
        }
    }
}

/// Applies a weekly special command for `week`.
///
/// `existing` is the stored special for `week`, if any.
///
/// # Errors
///
/// Returns an error if:
/// - The draft violates a menu rule
/// - `Create` finds a special already stored for the week
/// - `Remove` finds no special for the week
pub fn apply_special(
    week: WeekKey,
    now: DateTime<Utc>,
    existing: Option<&WeeklySpecial>,
    command: SpecialCommand,
    actor: Actor,
    cause: Cause,
) -> Result<SpecialTransition, CoreError> {
    match command {
        SpecialCommand::Upsert { draft } => {
            validate_special_draft(&draft)?;
            let draft = normalize_special_draft(draft);

            let (change, before, after) = match existing {
                Some(current) => {
                    let replaced: WeeklySpecial = current.replaced(draft, now);
                    let after: StateSnapshot = special_snapshot(&replaced);
                    (
                        SpecialChange::Update(replaced),
                        special_snapshot(current),
                        after,
                    )
                }
                None => {
                    let created: WeeklySpecial = WeeklySpecial::new(draft, week, now);
                    let after: StateSnapshot = special_snapshot(&created);
                    (SpecialChange::Insert(created), StateSnapshot::empty(), after)
                }
            };

            let action: Action = Action::new(
                String::from("UpsertSpecial"),
                Some(format!("Set the special for {week}")),
            );
            Ok(SpecialTransition {
                change,
                audit_event: AuditEvent::new(actor, cause, action, before, after, week),
            })
        }
        SpecialCommand::Create { draft } => {
            if existing.is_some() {
                return Err(CoreError::Conflict {
                    resource: String::from("WeeklySpecial"),
                    message: format!("a special already exists for {week}"),
                });
            }
            validate_special_draft(&draft)?;

            let created: WeeklySpecial =
                WeeklySpecial::new(normalize_special_draft(draft), week, now);
            let action: Action = Action::new(
                String::from("CreateSpecial"),
                Some(format!("Created the special for {week}")),
            );
            let after: StateSnapshot = special_snapshot(&created);
            Ok(SpecialTransition {
                change: SpecialChange::Insert(created),
                audit_event: AuditEvent::new(
                    actor,
                    cause,
                    action,
                    StateSnapshot::empty(),
                    after,
                    week,
                ),
            })
        }
        SpecialCommand::Remove => {
            let current: &WeeklySpecial = existing
                .filter(|s| s.week == week)
                .ok_or_else(|| CoreError::NotFound {
                    resource: String::from("WeeklySpecial"),
                    message: format!("no special for {week}"),
                })?;
            let special_id: i64 = current.special_id.ok_or_else(|| CoreError::NotFound {
                resource: String::from("WeeklySpecial"),
                message: format!("special for {week} has not been stored"),
            })?;

            let action: Action = Action::new(
                String::from("RemoveSpecial"),
                Some(format!("Removed the special for {week}")),
            );
            Ok(SpecialTransition {
                change: SpecialChange::Delete { special_id },
                audit_event: AuditEvent::new(
                    actor,
                    cause,
                    action,
                    special_snapshot(current),
                    StateSnapshot::empty(),
                    week,
                ),
            })
        }
    }
}

/// Applies a closure override change.
///
/// # Errors
///
/// Returns an error if a supplied message is blank or too long.
pub fn apply_closure(
    current: &ClosureOverride,
    command: ClosureCommand,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ClosureTransition, CoreError> {
    let message: Option<String> = command
        .message
        .as_deref()
        .map(validate_closure_message)
        .transpose()?;

    let new_state: ClosureOverride = current.with_state(command.closed, message, &actor.id, now);

    let action: Action = Action::new(
        String::from("SetClosure"),
        Some(String::from(if command.closed {
            "Closed ordering manually"
        } else {
            "Reopened ordering"
        })),
    );
    let audit_event: AuditEvent = AuditEvent::new_global(
        actor,
        cause,
        action,
        closure_snapshot(current),
        closure_snapshot(&new_state),
    );

    Ok(ClosureTransition {
        new_state,
        audit_event,
    })
}

/// Applies a catalog command against the full list of entries.
///
/// # Errors
///
/// Returns an error if:
/// - The draft is invalid or its name clashes with another entry
/// - The targeted entry does not exist
pub fn apply_catalog(
    entries: &[CatalogEntry],
    command: CatalogCommand,
    actor: Actor,
    cause: Cause,
) -> Result<CatalogTransition, CoreError> {
    let (change, action, before, after) = match command {
        CatalogCommand::Add { draft } => {
            validate_catalog_draft(&draft)?;
            validate_catalog_name_unique(&draft.name, entries, None)?;
            let entry: CatalogEntry = CatalogEntry::from_draft(draft);
            let action: Action = Action::new(
                String::from("AddIngredient"),
                Some(format!("Added '{}'", entry.name)),
            );
            let after: StateSnapshot = catalog_snapshot(&entry);
            (
                CatalogChange::Insert(entry),
                action,
                StateSnapshot::empty(),
                after,
            )
        }
        CatalogCommand::Revise {
            ingredient_id,
            draft,
        } => {
            let current: &CatalogEntry = catalog_entry(entries, ingredient_id)?;
            validate_catalog_draft(&draft)?;
            validate_catalog_name_unique(&draft.name, entries, Some(ingredient_id))?;
            let updated: CatalogEntry = current.updated(draft);
            let action: Action = Action::new(
                String::from("ReviseIngredient"),
                Some(format!("Updated ingredient {ingredient_id}")),
            );
            let after: StateSnapshot = catalog_snapshot(&updated);
            (
                CatalogChange::Update(updated),
                action,
                catalog_snapshot(current),
                after,
            )
        }
        CatalogCommand::Remove { ingredient_id } => {
            let current: &CatalogEntry = catalog_entry(entries, ingredient_id)?;
            let action: Action = Action::new(
                String::from("RemoveIngredient"),
                Some(format!("Removed '{}'", current.name)),
            );
            (
                CatalogChange::Delete { ingredient_id },
                action,
                catalog_snapshot(current),
                StateSnapshot::empty(),
            )
        }
    };

    Ok(CatalogTransition {
        change,
        audit_event: AuditEvent::new_global(actor, cause, action, before, after),
    })
}
