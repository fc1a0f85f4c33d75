//! Fire behavior formulas
//!
//! Each formula is a pure scalar function returning [`FlameResult`]. Array
//! evaluation lives in [`crate::catalog`], which applies these element-wise.
//!
//! [`FlameResult`]: crate::error::FlameResult

pub mod flame_depth;
pub mod flame_height;
pub mod flame_length;
pub mod flame_tilt;
pub(crate) mod guards;
pub mod midflame_wind;
pub mod residence_time;

pub use flame_depth::flame_depth;
pub use flame_height::{finney_flame_height, nelson_flame_height, FlameHeightModel};
pub use flame_length::{flame_length, FireCategory, FlameLengthModel, PowerLawParams};
pub use flame_tilt::{butler_flame_tilt, finney_flame_tilt, standard_flame_tilt, FlameTiltModel};
pub use midflame_wind::{midflame_wind_speed, wind_shelter, WindShelter};
pub use residence_time::flame_residence_time;
