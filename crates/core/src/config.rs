//! Dispatcher and calculation request configuration
//!
//! Both types are plain serde structs so callers can load them from any
//! serde format; missing dispatcher fields fall back to their defaults.

use std::num::NonZeroUsize;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::catalog::Calculation;
use crate::physics::{FlameHeightModel, FlameTiltModel};

/// Default prefix for worker thread names
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "flame-worker";

/// Worker pool settings for [`crate::dispatch::Dispatcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Requested worker count; clamped to the row count at dispatch time
    pub num_workers: usize,
    /// Worker threads are named `{prefix}-{index}`
    pub thread_name_prefix: String,
}

impl DispatchConfig {
    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers,
            ..Self::default()
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            num_workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
        }
    }
}

/// Untyped calculation request: a catalog name plus selector tokens
///
/// Resolved with [`Calculation::from_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculationConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// `"SI"` or `"IMP"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// `"degrees"` or `"percent"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_units: Option<String>,
    /// `"kph"`, `"mps"` or `"mph"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_units: Option<String>,
    /// `"sec"` or `"min"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_units: Option<String>,
}

impl CalculationConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_slope_units(mut self, slope_units: impl Into<String>) -> Self {
        self.slope_units = Some(slope_units.into());
        self
    }

    pub fn with_wind_speed_units(mut self, wind_speed_units: impl Into<String>) -> Self {
        self.wind_speed_units = Some(wind_speed_units.into());
        self
    }

    pub fn with_time_units(mut self, time_units: impl Into<String>) -> Self {
        self.time_units = Some(time_units.into());
        self
    }

    /// Supplied selectors that `calculation` does not read
    pub(crate) fn ignored_options(&self, calculation: &Calculation) -> Vec<&'static str> {
        let (model, units, slope, wind, time) = match calculation {
            Calculation::MidflameWindSpeed { .. } => (false, true, false, false, false),
            Calculation::FlameLength { .. } => (true, false, false, false, false),
            Calculation::FlameHeight { model } => (
                true,
                false,
                matches!(model, FlameHeightModel::Finney { .. }),
                false,
                false,
            ),
            Calculation::FlameTilt { model } => (
                true,
                false,
                matches!(model, FlameTiltModel::Finney { .. }),
                matches!(model, FlameTiltModel::Butler { .. }),
                false,
            ),
            Calculation::FlameResidenceTime { .. } => (false, false, false, false, true),
            Calculation::FlameDepth => (false, false, false, false, false),
        };

        [
            ("model", self.model.is_some() && !model),
            ("units", self.units.is_some() && !units),
            ("slope_units", self.slope_units.is_some() && !slope),
            ("wind_speed_units", self.wind_speed_units.is_some() && !wind),
            ("time_units", self.time_units.is_some() && !time),
        ]
        .into_iter()
        .filter_map(|(option, ignored)| ignored.then_some(option))
        .collect()
    }
}
