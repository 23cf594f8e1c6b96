// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion between euro amounts on the wire and stored cents.

use bocadillo_domain::Price;
use num_traits::ToPrimitive;
use thiserror::Error;

/// Tolerance when checking that an amount has at most two decimals.
const CENT_EPSILON: f64 = 1e-6;

/// Price input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceInputError {
    /// The amount is NaN or infinite.
    #[error("Price must be a finite number")]
    NotFinite,

    /// The amount is below zero.
    #[error("Price cannot be negative")]
    Negative,

    /// The amount has fractional cents.
    #[error("Price cannot have more than two decimals")]
    FractionalCents,

    /// The amount does not fit in the stored representation.
    #[error("Price is too large")]
    OutOfRange,
}

/// Converts a euro amount such as `4.5` into a [`Price`].
///
/// # Errors
///
/// Returns an error if the amount is not finite, negative, has more than
/// two decimals, or is too large to store.
pub fn euros_to_price(euros: f64) -> Result<Price, PriceInputError> {
    if !euros.is_finite() {
        return Err(PriceInputError::NotFinite);
    }
    if euros < 0.0 {
        return Err(PriceInputError::Negative);
    }

    let scaled: f64 = euros * 100.0;
    let rounded: f64 = scaled.round();
    if (scaled - rounded).abs() > CENT_EPSILON {
        return Err(PriceInputError::FractionalCents);
    }

    let cents: i64 = rounded.to_i64().ok_or(PriceInputError::OutOfRange)?;
    Price::from_cents(cents).map_err(|_| PriceInputError::Negative)
}

/// Converts a stored price back into euros.
#[must_use]
pub fn price_to_euros(price: Price) -> f64 {
    cents_to_euros(price.cents())
}

/// Converts a cent total into euros.
#[must_use]
pub fn cents_to_euros(cents: i64) -> f64 {
    cents.to_f64().map_or(0.0, |value| value / 100.0)
}
