//! Flame Height from Flame Length
//!
//! Two closed-form relations:
//! - Nelson: `H = a × I / U`, capped at flame length, with `a = 1/360` for
//!   surface and passive crown fires and `a = 0.0175` for active crown fires
//! - Finney: projects the tilted flame onto the vertical, optionally over a
//!   sloped surface
//!
//! # Scientific References
//! - Nelson, R.M., Adkins, C.W. (1986). "Flame characteristics of wind-driven
//!   surface fires". Canadian Journal of Forest Research, 16(6), 1293-1300
//! - Finney, M.A., Martin, R.E. (1992). "Calibration and field testing of
//!   passive flame height sensors". International Journal of Wildland Fire, 2(3)
//! - Butler, B.W., et al. (2004). "A radiation-driven model for crown fire
//!   spread". Canadian Journal of Forest Research, 34(8), 1588-1599

use std::f64::consts::FRAC_PI_2;

use crate::core_types::{FireType, SlopeUnits};
use crate::error::{FlameError, FlameResult};
use crate::physics::guards::{self, floor_at_zero, non_negative, within};

/// Nelson parameter for experimental lab and field fires (Nelson et al. 2012)
const NELSON_SURFACE_A: f64 = 1.0 / 360.0;

/// Nelson parameter for crown fires (Butler et al. 2004)
const NELSON_CROWN_A: f64 = 0.0175;

/// Flame height model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameHeightModel {
    /// Nelson and Adkins (1986), from intensity and mid-flame wind
    Nelson,
    /// Finney and Martin (1992), from flame tilt and ground slope
    Finney { slope_units: SlopeUnits },
}

impl FlameHeightModel {
    pub const TOKENS: [&'static str; 2] = ["Nelson", "Finney"];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Nelson => "Nelson",
            Self::Finney { .. } => "Finney",
        }
    }

    /// Resolve a model token and the selectors that model needs
    pub fn from_selectors(model: &str, slope_units: Option<&str>) -> FlameResult<Self> {
        match model {
            "Nelson" => Ok(Self::Nelson),
            "Finney" => {
                let slope_units = slope_units.ok_or(FlameError::MissingOption {
                    calculation: "flame_height",
                    option: "slope_units",
                })?;
                Ok(Self::Finney {
                    slope_units: slope_units.parse()?,
                })
            }
            _ => Err(FlameError::UnsupportedModel {
                calculation: "flame_height",
                model: model.to_string(),
                supported: Self::TOKENS.to_vec(),
            }),
        }
    }
}

/// Nelson and Adkins (1986) flame height
///
/// # Arguments
/// * `flame_length` - Head fire flame length (m)
/// * `fire_type` - Surface, passive crown or active crown
/// * `fire_intensity` - Head fire intensity (kW/m)
/// * `midflame_ws` - Mid-flame wind speed (m/s)
///
/// # Returns
/// Flame height in metres, never greater than `flame_length`
pub fn nelson_flame_height(
    flame_length: f64,
    fire_type: FireType,
    fire_intensity: f64,
    midflame_ws: f64,
) -> FlameResult<f64> {
    non_negative("flame_length", flame_length)?;
    non_negative("fire_intensity", fire_intensity)?;
    non_negative("midflame_ws", midflame_ws)?;

    let a = if fire_type.is_active_crown() {
        NELSON_CROWN_A
    } else {
        NELSON_SURFACE_A
    };

    // Still air: the flame stands upright
    if midflame_ws == 0.0 {
        return Ok(floor_at_zero(flame_length));
    }

    let height = a * fire_intensity / midflame_ws;
    Ok(floor_at_zero(if height > flame_length {
        flame_length
    } else {
        height
    }))
}

/// Finney and Martin (1992) flame height
///
/// # Arguments
/// * `flame_length` - Head fire flame length (m)
/// * `flame_tilt` - Flame tilt from vertical (degrees)
/// * `slope_angle` - Ground slope, in `slope_units`
/// * `slope_units` - Units of `slope_angle`
///
/// # Returns
/// Flame height in metres
pub fn finney_flame_height(
    flame_length: f64,
    flame_tilt: f64,
    slope_angle: f64,
    slope_units: SlopeUnits,
) -> FlameResult<f64> {
    non_negative("flame_length", flame_length)?;
    within(
        "flame_tilt",
        flame_tilt,
        0.0,
        90.0,
        "must be within [0, 90] degrees from vertical",
    )?;
    guards::slope_angle(slope_angle, slope_units)?;

    // Tilt measured up from horizontal
    let tilt_h = FRAC_PI_2 - flame_tilt.to_radians();

    // Near-flat ground, compared in the caller's slope units
    let height = if slope_angle <= 1.0 {
        flame_length * tilt_h.sin()
    } else {
        let slope = slope_units.to_radians(slope_angle);
        flame_length * (tilt_h - slope).sin() / (FRAC_PI_2 - slope).sin()
    };

    Ok(floor_at_zero(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nelson_surface_fire() {
        // a = 1/360: 1000 / 360 / 2 = 1.389 m, below the 1.859 m flame
        let height = nelson_flame_height(1.859096, FireType::Surface, 1000.0, 2.0).unwrap();
        assert_relative_eq!(height, 1.388889, epsilon = 1e-5);
    }

    #[test]
    fn test_nelson_capped_at_flame_length() {
        // a = 0.0175: 0.0175 × 1000 / 2 = 8.75 m, capped at 1.859 m
        let height = nelson_flame_height(1.859096, FireType::ActiveCrown, 1000.0, 2.0).unwrap();
        assert_relative_eq!(height, 1.859096, epsilon = 1e-9);
    }

    #[test]
    fn test_nelson_still_air_returns_length() {
        let height = nelson_flame_height(3.2, FireType::PassiveCrown, 800.0, 0.0).unwrap();
        assert_eq!(height, 3.2);
    }

    #[test]
    fn test_finney_flat_ground() {
        // 2 m flame tilted 30° from vertical on flat ground: 2 sin(60°)
        let height = finney_flame_height(2.0, 30.0, 0.0, SlopeUnits::Degrees).unwrap();
        assert_relative_eq!(height, 1.732051, epsilon = 1e-5);
    }

    #[test]
    fn test_finney_sloped_ground() {
        let height = finney_flame_height(2.0, 30.0, 20.0, SlopeUnits::Degrees).unwrap();
        assert_relative_eq!(height, 1.368081, epsilon = 1e-5);

        // 36.4% ≈ 20°
        let by_percent = finney_flame_height(2.0, 30.0, 36.3970, SlopeUnits::Percent).unwrap();
        assert_relative_eq!(by_percent, height, epsilon = 1e-4);
    }

    #[test]
    fn test_finney_tilt_out_of_range() {
        assert!(finney_flame_height(2.0, 95.0, 0.0, SlopeUnits::Degrees).is_err());
        assert!(finney_flame_height(2.0, -5.0, 0.0, SlopeUnits::Degrees).is_err());
    }

    #[test]
    fn test_finney_slope_out_of_range() {
        for (slope, units) in [
            (120.0, SlopeUnits::Degrees),
            (90.0, SlopeUnits::Degrees),
            (-5.0, SlopeUnits::Degrees),
            (-5.0, SlopeUnits::Percent),
        ] {
            assert!(
                matches!(
                    finney_flame_height(2.0, 30.0, slope, units),
                    Err(FlameError::InvalidInput {
                        parameter: "slope_angle",
                        ..
                    })
                ),
                "{slope} {units}"
            );
        }
        // Steep but valid slopes never exceed the flame length
        let steep = finney_flame_height(2.0, 30.0, 89.0, SlopeUnits::Degrees).unwrap();
        assert!(steep <= 2.0, "{steep}");
    }

    #[test]
    fn test_model_selectors() {
        assert_eq!(
            FlameHeightModel::from_selectors("Nelson", None).unwrap(),
            FlameHeightModel::Nelson
        );
        assert_eq!(
            FlameHeightModel::from_selectors("Finney", Some("percent")).unwrap(),
            FlameHeightModel::Finney {
                slope_units: SlopeUnits::Percent
            }
        );
        assert!(matches!(
            FlameHeightModel::from_selectors("Finney", None),
            Err(FlameError::MissingOption { .. })
        ));
        assert!(matches!(
            FlameHeightModel::from_selectors("Finney", Some("radians")),
            Err(FlameError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            FlameHeightModel::from_selectors("Byram", None),
            Err(FlameError::UnsupportedModel { .. })
        ));
    }
}
