//! Mid-flame Wind Speed (Albini and Baughman 1979; Andrews 2012)
//!
//! Adjusts an open 20-ft wind speed down to the mid-height of the flame using a
//! wind adjustment factor that depends on canopy sheltering:
//! - Unsheltered fuels: `WAF = 1.83 / ln((20 + 0.36H) / 0.13H)`
//! - Sheltered fuels: `WAF = 0.555 / (sqrt(fH) × ln((20 + 0.36H) / 0.13H))`
//!
//! where `H` is stand height (ft) and `f = crown ratio × canopy cover / 3` is
//! the crown fill portion.
//!
//! # Scientific References
//! - Albini, F.A., Baughman, R.G. (1979). "Estimating windspeeds for predicting
//!   wildland fire behavior". USDA Forest Service Research Paper INT-221
//! - Lawson, B.D., Armitage, O.B. (2008). "Weather guide for the Canadian Forest
//!   Fire Danger Rating System"
//! - Andrews, P.L. (2012). "Modeling wind adjustment factor and midflame wind
//!   speed for Rothermel's surface fire spread model". RMRS-GTR-266

use crate::core_types::units::{UnitSystem, FEET_PER_METER};
use crate::error::{FlameError, FlameResult};
use crate::physics::guards::{floor_at_zero, non_negative, within};

/// Crown fill (percent) at or below which fuels are treated as unsheltered
pub const SHELTER_THRESHOLD_PERCENT: f64 = 5.0;

/// Substitute stand height (ft) for cells with no canopy
const OPEN_STAND_HEIGHT_FT: f64 = 0.5 * FEET_PER_METER;

/// Canopy sheltering regime selecting the wind adjustment branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindShelter {
    /// Open conditions, crown fill at or below 5%
    Unsheltered,
    /// Fuels beneath a canopy with crown fill above 5%
    Sheltered,
}

/// Canopy geometry in feet after unit conversion and validation
#[derive(Debug, Clone, Copy)]
struct Canopy {
    /// Stand height used in the log profile (ft)
    height_ft: f64,
    /// Crown fill portion (fraction)
    crown_fill: f64,
}

impl Canopy {
    fn new(
        canopy_cover: f64,
        canopy_ht: f64,
        canopy_baseht: f64,
        units: UnitSystem,
    ) -> FlameResult<Self> {
        within(
            "canopy_cover",
            canopy_cover,
            0.0,
            100.0,
            "must be within [0, 100] percent",
        )?;
        non_negative("canopy_ht", canopy_ht)?;
        non_negative("canopy_baseht", canopy_baseht)?;
        if canopy_baseht > canopy_ht {
            return Err(FlameError::InvalidInput {
                parameter: "canopy_baseht",
                value: canopy_baseht,
                constraint: "must not exceed canopy_ht",
            });
        }

        let height_ft = units.height_to_feet(canopy_ht);
        let base_ft = units.height_to_feet(canopy_baseht);

        if height_ft == 0.0 {
            return Ok(Self {
                height_ft: OPEN_STAND_HEIGHT_FT,
                crown_fill: 0.0,
            });
        }

        let crown_ratio = (height_ft - base_ft) / height_ft;
        Ok(Self {
            height_ft,
            crown_fill: crown_ratio * canopy_cover / 300.0,
        })
    }

    fn shelter(&self) -> WindShelter {
        if self.crown_fill * 100.0 <= SHELTER_THRESHOLD_PERCENT {
            WindShelter::Unsheltered
        } else {
            WindShelter::Sheltered
        }
    }

    /// Logarithmic wind profile term shared by both branches
    fn log_profile(&self) -> f64 {
        let h = self.height_ft;
        ((20.0 + 0.36 * h) / (0.13 * h)).ln()
    }

    fn adjustment_factor(&self) -> f64 {
        match self.shelter() {
            WindShelter::Unsheltered => 1.83 / self.log_profile(),
            WindShelter::Sheltered => {
                0.555 / ((self.crown_fill * self.height_ft).sqrt() * self.log_profile())
            }
        }
    }
}

/// Classify a canopy as sheltered or unsheltered
///
/// NaN canopy inputs compare false against the threshold and classify as
/// sheltered; callers evaluating no-data cells get NaN from
/// [`midflame_wind_speed`] regardless.
pub fn wind_shelter(
    canopy_cover: f64,
    canopy_ht: f64,
    canopy_baseht: f64,
    units: UnitSystem,
) -> FlameResult<WindShelter> {
    Canopy::new(canopy_cover, canopy_ht, canopy_baseht, units).map(|c| c.shelter())
}

/// Calculate mid-flame wind speed
///
/// # Arguments
/// * `wind_speed` - Open wind speed: 10-m km/h (SI) or 20-ft mi/h (IMP)
/// * `canopy_cover` - Canopy cover (percent, 0-100)
/// * `canopy_ht` - Stand height (m or ft)
/// * `canopy_baseht` - Canopy base height (m or ft)
/// * `units` - Units convention of the inputs
///
/// # Returns
/// Mid-flame wind speed in m/s for either unit system, the unit the
/// residence time and Nelson flame height formulas take
pub fn midflame_wind_speed(
    wind_speed: f64,
    canopy_cover: f64,
    canopy_ht: f64,
    canopy_baseht: f64,
    units: UnitSystem,
) -> FlameResult<f64> {
    non_negative("wind_speed", wind_speed)?;
    let canopy = Canopy::new(canopy_cover, canopy_ht, canopy_baseht, units)?;

    let open_wind = units.open_wind_to_mps(wind_speed);
    Ok(floor_at_zero(open_wind * canopy.adjustment_factor()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{KPH_PER_MPS, MPH_PER_MPS, TEN_METER_TO_TWENTY_FOOT};
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_stand_si() {
        // 15 km/h, 50% cover, 10 m stand, 2 m base:
        // U = 15 / 4.14 = 3.6232 m/s, CR = 0.8, f = 0.1333 (13.3% -> sheltered)
        // WAF = 0.555 / (sqrt(0.1333 × 32.81) × ln(31.81 / 4.265)) = 0.1321
        let ws = midflame_wind_speed(15.0, 50.0, 10.0, 2.0, UnitSystem::Si).unwrap();
        assert_relative_eq!(ws, 0.478483, epsilon = 1e-5);
    }

    #[test]
    fn test_open_ground_uses_unsheltered_branch() {
        let ws = midflame_wind_speed(15.0, 0.0, 10.0, 2.0, UnitSystem::Si).unwrap();
        assert_relative_eq!(ws, 3.299792, epsilon = 1e-5);
        assert_eq!(
            wind_shelter(0.0, 10.0, 2.0, UnitSystem::Si).unwrap(),
            WindShelter::Unsheltered
        );
    }

    #[test]
    fn test_full_cover_uses_sheltered_branch() {
        assert_eq!(
            wind_shelter(100.0, 10.0, 2.0, UnitSystem::Si).unwrap(),
            WindShelter::Sheltered
        );
        let ws = midflame_wind_speed(15.0, 100.0, 10.0, 2.0, UnitSystem::Si).unwrap();
        assert_relative_eq!(ws, 0.338339, epsilon = 1e-5);
    }

    #[test]
    fn test_us_customary_inputs() {
        // 10 mi/h, 40% cover, 60 ft stand, 20 ft base
        let ws = midflame_wind_speed(10.0, 40.0, 60.0, 20.0, UnitSystem::UsCustomary).unwrap();
        assert_relative_eq!(ws, 0.641786, epsilon = 1e-5);
    }

    #[test]
    fn test_output_is_mps_for_both_unit_systems() {
        // 10 mi/h over an open 60 ft stand is 4.47 m/s of 20-ft wind
        let imperial =
            midflame_wind_speed(10.0, 0.0, 60.0, 20.0, UnitSystem::UsCustomary).unwrap();
        assert_relative_eq!(imperial, 4.887057, epsilon = 1e-5);

        // Same stand and wind stated as 10-m km/h and metres
        let open_kph = 10.0 / MPH_PER_MPS * KPH_PER_MPS * TEN_METER_TO_TWENTY_FOOT;
        let si = midflame_wind_speed(
            open_kph,
            0.0,
            60.0 / FEET_PER_METER,
            20.0 / FEET_PER_METER,
            UnitSystem::Si,
        )
        .unwrap();
        assert_relative_eq!(si, imperial, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_height_canopy_is_open() {
        assert_eq!(
            wind_shelter(80.0, 0.0, 0.0, UnitSystem::Si).unwrap(),
            WindShelter::Unsheltered
        );
        let ws = midflame_wind_speed(20.0, 80.0, 0.0, 0.0, UnitSystem::Si).unwrap();
        assert!(ws.is_finite() && ws > 0.0, "ws was {ws}");
    }

    #[test]
    fn test_canopy_cover_out_of_range_rejected() {
        for cover in [-1.0, 101.0] {
            let err = midflame_wind_speed(15.0, cover, 10.0, 2.0, UnitSystem::Si).unwrap_err();
            assert!(
                matches!(
                    err,
                    FlameError::InvalidInput {
                        parameter: "canopy_cover",
                        ..
                    }
                ),
                "{err}"
            );
        }
    }

    #[test]
    fn test_negative_heights_rejected() {
        assert!(midflame_wind_speed(15.0, 50.0, -1.0, 0.0, UnitSystem::Si).is_err());
        assert!(midflame_wind_speed(15.0, 50.0, 10.0, -1.0, UnitSystem::Si).is_err());
        assert!(midflame_wind_speed(15.0, 50.0, 5.0, 8.0, UnitSystem::Si).is_err());
    }

    #[test]
    fn test_nan_propagates() {
        let ws = midflame_wind_speed(f64::NAN, 50.0, 10.0, 2.0, UnitSystem::Si).unwrap();
        assert!(ws.is_nan());
    }

    #[test]
    fn test_deterministic() {
        let a = midflame_wind_speed(23.7, 61.0, 18.0, 4.5, UnitSystem::Si).unwrap();
        let b = midflame_wind_speed(23.7, 61.0, 18.0, 4.5, UnitSystem::Si).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
