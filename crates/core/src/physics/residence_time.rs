//! Flame Residence Time (Nelson and Adkins 1988)
//!
//! `t = 0.39 × W^0.25 × U^1.51 / (R / 60)` seconds
//!
//! # Scientific References
//! - Nelson, R.M., Adkins, C.W. (1988). "A dimensionless correlation for the
//!   spread of wind-driven fires". Canadian Journal of Forest Research, 18(4)

use crate::core_types::units::{TimeUnits, SECONDS_PER_MINUTE};
use crate::error::FlameResult;
use crate::physics::guards::{floor_at_zero, non_negative, positive};

/// Calculate flame residence time
///
/// # Arguments
/// * `ros` - Fire rate of spread (m/min)
/// * `fuel_consumption` - Fuel consumed by the fire front (kg/m²)
/// * `midflame_ws` - Mid-flame wind speed (m/s)
/// * `time_units` - Units of the returned duration
pub fn flame_residence_time(
    ros: f64,
    fuel_consumption: f64,
    midflame_ws: f64,
    time_units: TimeUnits,
) -> FlameResult<f64> {
    positive("ros", ros)?;
    non_negative("fuel_consumption", fuel_consumption)?;
    non_negative("midflame_ws", midflame_ws)?;

    let ros_per_second = ros / SECONDS_PER_MINUTE;
    let seconds = 0.39 * fuel_consumption.powf(0.25) * midflame_ws.powf(1.51) / ros_per_second;
    Ok(floor_at_zero(time_units.convert_seconds(seconds)))
}
