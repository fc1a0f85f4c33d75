//! Unit selectors and the conversion factors the flame formulas need
//!
//! Each selector is a closed enum parsed from the token set the formula
//! library accepts. Any other token fails with
//! [`FlameError::InvalidConfiguration`] so an unrecognized units string can
//! never silently fall through to a default.
//!
//! # Usage
//! ```
//! use flame_metrics_core::core_types::units::UnitSystem;
//!
//! let units: UnitSystem = "SI".parse().unwrap();
//! assert_eq!(units, UnitSystem::Si);
//! assert!("metric".parse::<UnitSystem>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{FlameError, FlameResult};

// ============================================================================
// CONVERSION FACTORS
// ============================================================================

/// Feet per metre
pub const FEET_PER_METER: f64 = 3.28084;

/// km/h per m/s
pub const KPH_PER_MPS: f64 = 3.6;

/// mi/h per m/s
pub const MPH_PER_MPS: f64 = 2.23694;

/// Ratio of 10-m open wind to 20-ft open wind (Lawson and Armitage 2008)
pub const TEN_METER_TO_TWENTY_FOOT: f64 = 1.15;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

fn parse_token<T: Copy>(
    option: &'static str,
    expected: &'static str,
    table: &[(&str, T)],
    token: &str,
) -> FlameResult<T> {
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|&(_, value)| value)
        .ok_or_else(|| FlameError::InvalidConfiguration {
            option,
            value: token.to_string(),
            expected,
        })
}

// ============================================================================
// UNIT SYSTEM
// ============================================================================

/// Units convention of a mid-flame wind speed request
///
/// - `Si`: 10-m open wind in km/h, heights in metres
/// - `UsCustomary`: 20-ft open wind in mi/h, heights in feet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    /// US customary (`"IMP"`)
    UsCustomary,
    /// Metric (`"SI"`)
    Si,
}

impl UnitSystem {
    const TOKENS: [(&'static str, UnitSystem); 2] =
        [("SI", UnitSystem::Si), ("IMP", UnitSystem::UsCustomary)];

    /// Token accepted by [`FromStr`]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Si => "SI",
            Self::UsCustomary => "IMP",
        }
    }

    /// Convert an open wind speed to 20-ft equivalent m/s
    #[inline]
    pub fn open_wind_to_mps(self, wind_speed: f64) -> f64 {
        match self {
            Self::Si => wind_speed / (KPH_PER_MPS * TEN_METER_TO_TWENTY_FOOT),
            Self::UsCustomary => wind_speed / MPH_PER_MPS,
        }
    }

    /// Convert a height to feet
    #[inline]
    pub fn height_to_feet(self, height: f64) -> f64 {
        match self {
            Self::Si => height * FEET_PER_METER,
            Self::UsCustomary => height,
        }
    }
}

impl FromStr for UnitSystem {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        parse_token("units", "SI, IMP", &Self::TOKENS, s)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ============================================================================
// SLOPE UNITS
// ============================================================================

/// Units of a ground slope input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlopeUnits {
    Degrees,
    Percent,
}

impl SlopeUnits {
    const TOKENS: [(&'static str, SlopeUnits); 2] = [
        ("degrees", SlopeUnits::Degrees),
        ("percent", SlopeUnits::Percent),
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Percent => "percent",
        }
    }

    /// Slope angle in radians
    #[inline]
    pub fn to_radians(self, slope: f64) -> f64 {
        match self {
            Self::Degrees => slope.to_radians(),
            Self::Percent => (slope / 100.0).atan(),
        }
    }
}

impl FromStr for SlopeUnits {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        parse_token("slope_units", "degrees, percent", &Self::TOKENS, s)
    }
}

impl fmt::Display for SlopeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ============================================================================
// WIND SPEED UNITS
// ============================================================================

/// Units of a 10-m wind speed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindSpeedUnits {
    /// Kilometres per hour
    Kph,
    /// Metres per second
    Mps,
    /// Miles per hour
    Mph,
}

impl WindSpeedUnits {
    const TOKENS: [(&'static str, WindSpeedUnits); 3] = [
        ("kph", WindSpeedUnits::Kph),
        ("mps", WindSpeedUnits::Mps),
        ("mph", WindSpeedUnits::Mph),
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Self::Kph => "kph",
            Self::Mps => "mps",
            Self::Mph => "mph",
        }
    }

    #[inline]
    pub fn to_mps(self, wind_speed: f64) -> f64 {
        match self {
            Self::Kph => wind_speed / KPH_PER_MPS,
            Self::Mps => wind_speed,
            Self::Mph => wind_speed / MPH_PER_MPS,
        }
    }
}

impl FromStr for WindSpeedUnits {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        parse_token("wind_speed_units", "kph, mps, mph", &Self::TOKENS, s)
    }
}

impl fmt::Display for WindSpeedUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ============================================================================
// TIME UNITS
// ============================================================================

/// Units of a returned duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeUnits {
    #[default]
    Seconds,
    Minutes,
}

impl TimeUnits {
    const TOKENS: [(&'static str, TimeUnits); 2] =
        [("sec", TimeUnits::Seconds), ("min", TimeUnits::Minutes)];

    pub const fn token(self) -> &'static str {
        match self {
            Self::Seconds => "sec",
            Self::Minutes => "min",
        }
    }

    /// Express a duration given in seconds in these units
    #[inline]
    pub fn convert_seconds(self, seconds: f64) -> f64 {
        match self {
            Self::Seconds => seconds,
            Self::Minutes => seconds / SECONDS_PER_MINUTE,
        }
    }
}

impl FromStr for TimeUnits {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        parse_token("time_units", "sec, min", &Self::TOKENS, s)
    }
}

impl fmt::Display for TimeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
