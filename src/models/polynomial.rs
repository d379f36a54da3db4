//! Baseline evaluation for a single reference row.
//!
//! ```text
//! polynomial = a·year³ + b·year² + c·year + d
//! baseline   = polynomial · DWT^e
//! ```
//!
//! `e` is usually negative, so deadweight acts as an inverse power law:
//! larger vessels get a lower per-tonne-mile target.

use rust_decimal::Decimal;

use crate::domain::ReferenceFactor;
use crate::error::AppError;
use crate::math::pow_real;

/// Evaluate the cubic-in-year part of a reference row.
///
/// `year` is promoted exactly; nothing here is approximated.
pub fn year_polynomial(factor: &ReferenceFactor, year: i32) -> Result<Decimal, AppError> {
    let y = Decimal::from(year);
    let overflow = || AppError::arithmetic("year polynomial");

    let y2 = y.checked_mul(y).ok_or_else(overflow)?;
    let y3 = y2.checked_mul(y).ok_or_else(overflow)?;

    let cubic = factor.a.checked_mul(y3).ok_or_else(overflow)?;
    let quadratic = factor.b.checked_mul(y2).ok_or_else(overflow)?;
    let linear = factor.c.checked_mul(y).ok_or_else(overflow)?;

    cubic
        .checked_add(quadratic)
        .and_then(|v| v.checked_add(linear))
        .and_then(|v| v.checked_add(factor.d))
        .ok_or_else(overflow)
}

/// Evaluate the full baseline `polynomial · DWT^e` for one reference row.
pub fn evaluate_baseline(
    factor: &ReferenceFactor,
    year: i32,
    deadweight_tonnage: Decimal,
) -> Result<Decimal, AppError> {
    let polynomial = year_polynomial(factor, year)?;
    let scale = pow_real(deadweight_tonnage, factor.e)?;
    polynomial
        .checked_mul(scale)
        .ok_or_else(|| AppError::arithmetic("baseline"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bulk_min() -> ReferenceFactor {
        ReferenceFactor {
            row_id: 1,
            category: "PP".to_string(),
            vessel_type_id: 1001,
            size: "DWT".to_string(),
            trajectory: "MIN".to_string(),
            a: dec!(0.19759542325),
            b: dec!(-1204.32747178827),
            c: dec!(2446554.0444015),
            d: dec!(-1656558770.18489),
            e: dec!(-0.621795966623),
        }
    }

    #[test]
    fn year_polynomial_is_exact() {
        // Reference value computed with 40-digit decimal arithmetic.
        let p = year_polynomial(&bulk_min(), 2024).unwrap();
        assert_eq!(p, dec!(4087.85312504448));
    }

    #[test]
    fn unit_deadweight_reduces_to_polynomial() {
        let f = bulk_min();
        for year in [2019, 2024, 2030] {
            let poly = year_polynomial(&f, year).unwrap();
            let base = evaluate_baseline(&f, year, Decimal::ONE).unwrap();
            assert!(
                (base - poly).abs() < dec!(0.000001),
                "year {year}: baseline {base} != polynomial {poly}"
            );
        }
    }

    #[test]
    fn bulk_carrier_2024_baseline() {
        let base = evaluate_baseline(&bulk_min(), 2024, dec!(100000)).unwrap();
        // 4087.85312504448 · 100000^-0.621795966623 ≈ 3.1806468396
        assert!((base - dec!(3.1806468396)).abs() < dec!(0.000001), "got {base}");
    }

    #[test]
    fn neutral_factor_evaluates_to_zero() {
        let base = evaluate_baseline(&ReferenceFactor::neutral(), 2024, dec!(100000)).unwrap();
        assert!(base.is_zero());
    }

    #[test]
    fn larger_vessels_get_lower_targets() {
        let f = bulk_min();
        let small = evaluate_baseline(&f, 2024, dec!(20000)).unwrap();
        let large = evaluate_baseline(&f, 2024, dec!(200000)).unwrap();
        assert!(small > large);
    }
}
