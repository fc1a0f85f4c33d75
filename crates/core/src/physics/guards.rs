//! Domain guards shared by the flame formulas
//!
//! NaN marks a no-data cell in gridded inputs. Guards let NaN through so it
//! propagates to a NaN output instead of failing the whole grid.

use crate::core_types::SlopeUnits;
use crate::error::{FlameError, FlameResult};

#[inline]
pub(crate) fn non_negative(parameter: &'static str, value: f64) -> FlameResult<f64> {
    if value < 0.0 {
        return Err(FlameError::InvalidInput {
            parameter,
            value,
            constraint: "must be non-negative",
        });
    }
    Ok(value)
}

#[inline]
pub(crate) fn positive(parameter: &'static str, value: f64) -> FlameResult<f64> {
    if value <= 0.0 {
        return Err(FlameError::InvalidInput {
            parameter,
            value,
            constraint: "must be greater than zero",
        });
    }
    Ok(value)
}

#[inline]
pub(crate) fn within(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
    constraint: &'static str,
) -> FlameResult<f64> {
    // Comparisons are false for NaN
    let below = value < min;
    let above = value > max;
    if below || above {
        return Err(FlameError::InvalidInput {
            parameter,
            value,
            constraint,
        });
    }
    Ok(value)
}

/// Ground slope: degrees in [0, 90), percent non-negative
#[inline]
pub(crate) fn slope_angle(value: f64, units: SlopeUnits) -> FlameResult<f64> {
    let negative = value < 0.0;
    let (out_of_range, constraint) = match units {
        SlopeUnits::Degrees => (negative || value >= 90.0, "must be within [0, 90) degrees"),
        SlopeUnits::Percent => (negative, "must be a non-negative percent"),
    };
    if out_of_range {
        return Err(FlameError::InvalidInput {
            parameter: "slope_angle",
            value,
            constraint,
        });
    }
    Ok(value)
}

/// Floor a formula output at zero; NaN passes through
#[inline]
pub(crate) fn floor_at_zero(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_passes_guards() {
        assert!(non_negative("x", f64::NAN).unwrap().is_nan());
        assert!(positive("x", f64::NAN).unwrap().is_nan());
        assert!(within("x", f64::NAN, 0.0, 1.0, "in range").unwrap().is_nan());
        assert!(floor_at_zero(f64::NAN).is_nan());
        assert!(slope_angle(f64::NAN, SlopeUnits::Degrees).unwrap().is_nan());
    }

    #[test]
    fn test_guards_reject_out_of_domain() {
        assert!(non_negative("x", -0.1).is_err());
        assert_eq!(non_negative("x", 0.0).unwrap(), 0.0);
        assert!(positive("x", 0.0).is_err());
        assert!(within("x", 101.0, 0.0, 100.0, "percent").is_err());
        assert_eq!(within("x", 100.0, 0.0, 100.0, "percent").unwrap(), 100.0);
    }

    #[test]
    fn test_slope_angle_domain() {
        assert_eq!(slope_angle(0.0, SlopeUnits::Degrees).unwrap(), 0.0);
        assert_eq!(slope_angle(89.5, SlopeUnits::Degrees).unwrap(), 89.5);
        assert!(slope_angle(90.0, SlopeUnits::Degrees).is_err());
        assert!(slope_angle(-1.0, SlopeUnits::Degrees).is_err());
        // Percent slopes above 100 are still below vertical
        assert_eq!(slope_angle(250.0, SlopeUnits::Percent).unwrap(), 250.0);
        assert!(slope_angle(-5.0, SlopeUnits::Percent).is_err());
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!(floor_at_zero(-3.0), 0.0);
        assert_eq!(floor_at_zero(2.5), 2.5);
    }
}
