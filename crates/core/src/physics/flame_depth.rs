//! Flame Depth (Fons et al. 1963)
//!
//! `D = R × t_r`, with the residence time measured from the initial
//! temperature rise to the definite drop after peak temperature
//! (Rothermel and Deeming 1980).

use crate::error::FlameResult;
use crate::physics::guards::{floor_at_zero, non_negative};

/// Calculate flame depth
///
/// # Arguments
/// * `ros` - Fire rate of spread (m/min)
/// * `res_time` - Flame residence time (min)
///
/// # Returns
/// Flame depth in metres
pub fn flame_depth(ros: f64, res_time: f64) -> FlameResult<f64> {
    non_negative("ros", ros)?;
    non_negative("res_time", res_time)?;
    Ok(floor_at_zero(ros * res_time))
}
