//! Core types and utilities

pub mod fire_type;
pub mod units;

pub use fire_type::FireType;
pub use units::{SlopeUnits, TimeUnits, UnitSystem, WindSpeedUnits};
