// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Predefined combos offered on the menu.

use crate::order::{Bread, Size};
use crate::special::WeeklySpecial;
use serde::{Deserialize, Serialize};

/// Menu name under which the weekly special is listed.
pub const SPECIAL_COMBO_NAME: &str = "Alquimista";

/// A named, ready-made order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub name: String,
    pub size: Size,
    pub bread: Bread,
    pub ingredients: Vec<String>,
    /// Whether this entry is the weekly special.
    pub is_special: bool,
}

fn preset(name: &str, size: Size, bread: Bread, ingredients: &[&str]) -> Combo {
    Combo {
        name: name.to_string(),
        size,
        bread,
        ingredients: ingredients.iter().map(|i| (*i).to_string()).collect(),
        is_special: false,
    }
}

/// The fixed preset combos.
#[must_use]
pub fn preset_combos() -> Vec<Combo> {
    vec![
        preset(
            "Chivito",
            Size::Large,
            Bread::Normal,
            &["Turkey", "Bacon", "Egg", "Mayonnaise"],
        ),
        preset(
            "Blanco y Negro",
            Size::Normal,
            Bread::Wholegrain,
            &["Chorizo", "Tortilla", "Cheese"],
        ),
    ]
}

/// Builds the combo listing for a caller.
///
/// The weekly special, when present, is appended under
/// [`SPECIAL_COMBO_NAME`]. Unless `reveal_ingredients` is set its ingredient
/// list is emptied; every other field stays visible. The stored special is
/// not modified.
#[must_use]
pub fn combo_listing(special: Option<&WeeklySpecial>, reveal_ingredients: bool) -> Vec<Combo> {
    let mut combos: Vec<Combo> = preset_combos();

    if let Some(special) = special {
        combos.push(Combo {
            name: SPECIAL_COMBO_NAME.to_string(),
            size: special.size,
            bread: special.bread,
            ingredients: if reveal_ingredients {
                special.ingredients.clone()
            } else {
                Vec::new()
            },
            is_special: true,
        });
    }

    combos
}
