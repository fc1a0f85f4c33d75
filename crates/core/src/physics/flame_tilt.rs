//! Flame Tilt Angle
//!
//! Angle of the head fire flame from vertical, by one of three models:
//! - Standard: flat-ground geometry, `acos(H / L)`
//! - Finney: Finney and Martin (1992) geometry over sloped ground
//! - Butler: Butler et al. (2004) wind-driven tilt for crown fires
//!
//! # Scientific References
//! - Finney, M.A., Martin, R.E. (1992). "Calibration and field testing of
//!   passive flame height sensors". International Journal of Wildland Fire, 2(3)
//! - Albini, F.A., Baughman, R.G. (1979). "Estimating windspeeds for predicting
//!   wildland fire behavior". USDA Forest Service Research Paper INT-221
//! - Butler, B.W., et al. (2004). "A radiation-driven model for crown fire
//!   spread". Canadian Journal of Forest Research, 34(8), 1588-1599

use std::f64::consts::FRAC_PI_2;

use crate::core_types::{SlopeUnits, WindSpeedUnits};
use crate::error::{FlameError, FlameResult};
use crate::physics::guards::{self, floor_at_zero, non_negative, positive};

/// Acceleration of gravity (m/s²)
const GRAVITY: f64 = 9.81;

/// Flame tilt model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameTiltModel {
    /// Flat-ground geometry from flame length and height
    Standard,
    /// Finney and Martin (1992) geometry over sloped ground
    Finney { slope_units: SlopeUnits },
    /// Butler et al. (2004), crown fires only
    Butler { wind_speed_units: WindSpeedUnits },
}

impl FlameTiltModel {
    pub const TOKENS: [&'static str; 3] = ["Standard", "Finney", "Butler"];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Finney { .. } => "Finney",
            Self::Butler { .. } => "Butler",
        }
    }

    /// Resolve a model token and the selectors that model needs
    pub fn from_selectors(
        model: &str,
        slope_units: Option<&str>,
        wind_speed_units: Option<&str>,
    ) -> FlameResult<Self> {
        match model {
            "Standard" => Ok(Self::Standard),
            "Finney" => Ok(Self::Finney {
                slope_units: require(slope_units, "slope_units")?.parse()?,
            }),
            "Butler" => Ok(Self::Butler {
                wind_speed_units: require(wind_speed_units, "wind_speed_units")?.parse()?,
            }),
            _ => Err(FlameError::UnsupportedModel {
                calculation: "flame_tilt",
                model: model.to_string(),
                supported: Self::TOKENS.to_vec(),
            }),
        }
    }
}

fn require<'a>(value: Option<&'a str>, option: &'static str) -> FlameResult<&'a str> {
    value.ok_or(FlameError::MissingOption {
        calculation: "flame_tilt",
        option,
    })
}

fn check_flame_geometry(flame_length: f64, flame_height: f64) -> FlameResult<()> {
    positive("flame_length", flame_length)?;
    non_negative("flame_height", flame_height)?;
    if flame_height > flame_length {
        return Err(FlameError::InvalidInput {
            parameter: "flame_height",
            value: flame_height,
            constraint: "must not exceed flame_length",
        });
    }
    Ok(())
}

/// Flat-ground flame tilt (degrees from vertical)
pub fn standard_flame_tilt(flame_length: f64, flame_height: f64) -> FlameResult<f64> {
    check_flame_geometry(flame_length, flame_height)?;
    let tilt = (flame_height / flame_length).acos();
    Ok(floor_at_zero(tilt).to_degrees())
}

/// Finney and Martin (1992) flame tilt over sloped ground (degrees from vertical)
///
/// # Arguments
/// * `flame_length` - Head fire flame length (m)
/// * `flame_height` - Head fire flame height (m)
/// * `slope_angle` - Ground slope, in `slope_units`
/// * `slope_units` - Units of `slope_angle`
pub fn finney_flame_tilt(
    flame_length: f64,
    flame_height: f64,
    slope_angle: f64,
    slope_units: SlopeUnits,
) -> FlameResult<f64> {
    check_flame_geometry(flame_length, flame_height)?;
    guards::slope_angle(slope_angle, slope_units)?;

    if flame_height == flame_length {
        return Ok(0.0);
    }

    let slope = slope_units.to_radians(slope_angle);
    // Tilt up from horizontal, then flipped to tilt down from vertical
    let tilt_h = (flame_height * (FRAC_PI_2 - slope).sin() / flame_length).asin() + slope;
    Ok(floor_at_zero(FRAC_PI_2 - tilt_h).to_degrees())
}

/// Butler et al. (2004) crown fire flame tilt (degrees from vertical)
///
/// Calibrated for crown fires; surface fire tilt comes out too low.
///
/// # Arguments
/// * `wind_speed` - 10-m open wind speed, in `wind_speed_units`
/// * `wind_speed_units` - Units of `wind_speed`
/// * `canopy_ht` - Canopy height above ground (m)
pub fn butler_flame_tilt(
    wind_speed: f64,
    wind_speed_units: WindSpeedUnits,
    canopy_ht: f64,
) -> FlameResult<f64> {
    non_negative("wind_speed", wind_speed)?;
    positive("canopy_ht", canopy_ht)?;

    let wind_mps = wind_speed_units.to_mps(wind_speed);
    // Wind at the top of the canopy (Albini and Baughman 1979)
    let canopy_wind = wind_mps / (3.6 * (1.0 + (1.0 + 28.0 / canopy_ht).ln()));

    let tilt = ((3.0 * canopy_wind.powi(3)) / (2.0 * GRAVITY * 10.0))
        .sqrt()
        .atan();
    Ok(floor_at_zero(tilt).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_tilt() {
        assert_relative_eq!(standard_flame_tilt(2.0, 1.0).unwrap(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(standard_flame_tilt(2.0, 2.0).unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(standard_flame_tilt(2.0, 0.0).unwrap(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_finney_flat_matches_standard() {
        let finney = finney_flame_tilt(2.0, 1.0, 0.0, SlopeUnits::Degrees).unwrap();
        let standard = standard_flame_tilt(2.0, 1.0).unwrap();
        assert_relative_eq!(finney, standard, epsilon = 1e-9);
    }

    #[test]
    fn test_finney_upright_flame() {
        assert_eq!(
            finney_flame_tilt(1.5, 1.5, 30.0, SlopeUnits::Percent).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_finney_slope_reduces_tilt() {
        let flat = finney_flame_tilt(2.0, 1.0, 0.0, SlopeUnits::Degrees).unwrap();
        let sloped = finney_flame_tilt(2.0, 1.0, 15.0, SlopeUnits::Degrees).unwrap();
        assert!(sloped < flat, "flat {flat}, sloped {sloped}");
        assert!(sloped >= 0.0);
    }

    #[test]
    fn test_finney_slope_out_of_range() {
        for (slope, units) in [
            (120.0, SlopeUnits::Degrees),
            (90.0, SlopeUnits::Degrees),
            (-5.0, SlopeUnits::Percent),
        ] {
            assert!(
                matches!(
                    finney_flame_tilt(2.0, 1.0, slope, units),
                    Err(FlameError::InvalidInput {
                        parameter: "slope_angle",
                        ..
                    })
                ),
                "{slope} {units}"
            );
        }
        assert!(finney_flame_tilt(2.0, 1.0, f64::NAN, SlopeUnits::Degrees).unwrap().is_nan());
    }

    #[test]
    fn test_butler_tilt() {
        // 30 km/h over a 20 m canopy
        let tilt = butler_flame_tilt(30.0, WindSpeedUnits::Kph, 20.0).unwrap();
        assert_relative_eq!(tilt, 9.623484, epsilon = 1e-5);

        let same = butler_flame_tilt(30.0 / 3.6, WindSpeedUnits::Mps, 20.0).unwrap();
        assert_relative_eq!(same, tilt, epsilon = 1e-9);
    }

    #[test]
    fn test_butler_tilt_grows_with_wind() {
        let calm = butler_flame_tilt(5.0, WindSpeedUnits::Mph, 15.0).unwrap();
        let windy = butler_flame_tilt(40.0, WindSpeedUnits::Mph, 15.0).unwrap();
        assert!(windy > calm);
        assert!(windy < 90.0);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(standard_flame_tilt(1.0, 2.0).is_err());
        assert!(standard_flame_tilt(0.0, 0.0).is_err());
        assert!(finney_flame_tilt(1.0, -0.5, 0.0, SlopeUnits::Degrees).is_err());
        assert!(butler_flame_tilt(10.0, WindSpeedUnits::Kph, 0.0).is_err());
    }

    #[test]
    fn test_model_selectors() {
        assert_eq!(
            FlameTiltModel::from_selectors("Butler", None, Some("mph")).unwrap(),
            FlameTiltModel::Butler {
                wind_speed_units: WindSpeedUnits::Mph
            }
        );
        assert!(matches!(
            FlameTiltModel::from_selectors("Butler", Some("degrees"), None),
            Err(FlameError::MissingOption {
                option: "wind_speed_units",
                ..
            })
        ));
        assert!(matches!(
            FlameTiltModel::from_selectors("Nelson", None, None),
            Err(FlameError::UnsupportedModel { .. })
        ));
    }
}
