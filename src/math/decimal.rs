//! Decimal helpers shared by the baseline and deviation code.
//!
//! Numerical notes:
//! - Reference coefficients span roughly `1e-1..1e9` and get multiplied by `year³`
//!   (~`8e9`). Summing those terms in binary floating point cancels away most of
//!   the significant digits of the result, so everything stays in `Decimal`
//!   (96-bit mantissa, 28 significant digits).
//! - `x^e` with a real exponent goes through `checked_powd`, which is an
//!   approximation (`exp(e·ln x)`); it is accurate far beyond the 2dp reporting
//!   precision for the magnitudes we see.

use rust_decimal::prelude::*;

use crate::error::AppError;

/// Number of decimal places used for reported figures.
pub const REPORT_DP: u32 = 2;

/// Raise a positive `base` to a real `exponent`.
///
/// A zero exponent returns one without evaluating the power, so neutral
/// factors never touch the approximation.
pub fn pow_real(base: Decimal, exponent: Decimal) -> Result<Decimal, AppError> {
    if exponent.is_zero() {
        return Ok(Decimal::ONE);
    }
    if base <= Decimal::ZERO {
        return Err(AppError::invalid_input(
            "deadweight_tonnage",
            format!("cannot raise {base} to the real power {exponent}"),
        ));
    }
    base.checked_powd(exponent)
        .ok_or_else(|| AppError::arithmetic("deadweight power term"))
}

/// Round to the reporting precision (half away from zero).
pub fn round_report(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(REPORT_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Render at reporting precision, always with two decimals (`12` -> `12.00`).
pub fn format_report(value: Decimal) -> String {
    format!("{:.2}", round_report(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_exponent_is_exactly_one() {
        assert_eq!(pow_real(dec!(123456), Decimal::ZERO).unwrap(), Decimal::ONE);
    }

    #[test]
    fn negative_fractional_exponent_matches_inverse_power() {
        // 100000^-0.5 = 1 / 316.2277660168...
        let v = pow_real(dec!(100000), dec!(-0.5)).unwrap();
        let expected = dec!(0.00316227766016838);
        assert!((v - expected).abs() < dec!(0.0000000001), "got {v}");
    }

    #[test]
    fn non_positive_base_is_invalid_input() {
        let err = pow_real(Decimal::ZERO, dec!(-0.6)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_report(dec!(2.345)), dec!(2.35));
        assert_eq!(round_report(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_report(dec!(3.1806468)), dec!(3.18));
    }

    #[test]
    fn report_format_pads_to_two_places() {
        assert_eq!(format_report(dec!(12)), "12.00");
        assert_eq!(format_report(dec!(5.5)), "5.50");
        assert_eq!(format_report(dec!(277.2817481893)), "277.28");
    }
}
