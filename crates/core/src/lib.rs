//! Flame Metrics Core Library
//!
//! Fire-behavior flame metrics from published fire-science correlations,
//! applied element-wise over gridded `ndarray` inputs.
//!
//! ## Formulas
//!
//! - Mid-flame wind speed from open wind and canopy structure
//! - Flame length from fireline intensity (29 published correlations)
//! - Flame height, flame tilt, flame residence time and flame depth
//!
//! ## Parallel Dispatch
//!
//! [`Dispatcher`] splits the leading row axis into contiguous blocks,
//! evaluates them on a per-call rayon pool and reassembles the result in
//! input order.

// Core types and utilities
pub mod core_types;
pub mod error;

// Scalar formulas
pub mod physics;

// Named calculations over array arguments
pub mod catalog;
pub mod config;
pub mod dispatch;

// Re-export core types
pub use core_types::{FireType, SlopeUnits, TimeUnits, UnitSystem, WindSpeedUnits};
pub use error::{FlameError, FlameResult};

// Re-export calculation and dispatch types
pub use catalog::{Arg, Arguments, Calculation, CalculationKind, Parameter};
pub use config::{CalculationConfig, DispatchConfig};
pub use dispatch::{dispatch, DispatchReport, Dispatcher, RowBlock};
