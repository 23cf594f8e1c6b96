// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PriceInputError, euros_to_price, price_to_euros};

#[test]
fn test_euros_convert_to_cents() {
    assert_eq!(euros_to_price(4.5).unwrap().cents(), 450);
    assert_eq!(euros_to_price(0.0).unwrap().cents(), 0);
    assert_eq!(euros_to_price(12.99).unwrap().cents(), 1299);
    assert_eq!(euros_to_price(0.1 + 0.2).unwrap().cents(), 30);
}

#[test]
fn test_invalid_amounts_are_rejected() {
    assert_eq!(euros_to_price(-1.0), Err(PriceInputError::Negative));
    assert_eq!(euros_to_price(f64::NAN), Err(PriceInputError::NotFinite));
    assert_eq!(euros_to_price(f64::INFINITY), Err(PriceInputError::NotFinite));
    assert_eq!(euros_to_price(1.005), Err(PriceInputError::FractionalCents));
    assert_eq!(euros_to_price(1e300), Err(PriceInputError::OutOfRange));
}

#[test]
fn test_price_converts_back_to_euros() {
    let price = euros_to_price(3.25).unwrap();
    assert!((price_to_euros(price) - 3.25).abs() < f64::EPSILON);
}
