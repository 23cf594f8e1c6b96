// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings shared by queries and mutations.
//!
//! Timestamps are stored as RFC 3339 text in UTC with microsecond
//! precision, so lexical order matches chronological order.

use bocadillo_domain::{Bread, Price, Size, WeekKey};
use chrono::{DateTime, SecondsFormat, Utc};
use num_traits::ToPrimitive;

use crate::error::PersistenceError;

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| PersistenceError::ReconstructionError(format!("bad timestamp '{text}': {e}")))
}

/// Splits a week into `(week, year)` columns.
pub fn week_columns(week: WeekKey) -> Result<(i32, i32), PersistenceError> {
    let number: i32 = week
        .week
        .to_i32()
        .ok_or_else(|| PersistenceError::ReconstructionError("Week out of range".to_string()))?;
    Ok((number, week.year))
}

pub fn week_from_columns(week: i32, year: i32) -> Result<WeekKey, PersistenceError> {
    let number: u32 = week
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError("Week out of range".to_string()))?;
    WeekKey::new(number, year).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn parse_size(text: &str) -> Result<Size, PersistenceError> {
    text.parse::<Size>()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn parse_bread(text: &str) -> Result<Bread, PersistenceError> {
    text.parse::<Bread>()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn parse_price(cents: Option<i64>) -> Result<Option<Price>, PersistenceError> {
    cents
        .map(Price::from_cents)
        .transpose()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

pub fn flag(value: bool) -> i32 {
    i32::from(value)
}

pub const fn from_flag(value: i32) -> bool {
    value != 0
}
