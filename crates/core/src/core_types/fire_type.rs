//! Fire type classification used by flame height models

use std::fmt;
use std::str::FromStr;

use crate::error::{FlameError, FlameResult};

/// Fire type, by how far the fire has moved into the canopy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireType {
    /// Surface fire (code 1)
    Surface,
    /// Passive crown fire - intermittent torching (code 2)
    PassiveCrown,
    /// Active crown fire - continuous crown involvement (code 3)
    ActiveCrown,
}

impl FireType {
    /// Numeric code used when fire type arrives as a raster band
    pub const fn code(self) -> u8 {
        match self {
            Self::Surface => 1,
            Self::PassiveCrown => 2,
            Self::ActiveCrown => 3,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::PassiveCrown => "passive crown",
            Self::ActiveCrown => "active crown",
        }
    }

    /// Decode a numeric raster value (1, 2 or 3)
    pub fn from_code(value: f64) -> FlameResult<Self> {
        if value == 1.0 {
            Ok(Self::Surface)
        } else if value == 2.0 {
            Ok(Self::PassiveCrown)
        } else if value == 3.0 {
            Ok(Self::ActiveCrown)
        } else {
            Err(FlameError::InvalidInput {
                parameter: "fire_type",
                value,
                constraint: "must be 1 (surface), 2 (passive crown) or 3 (active crown)",
            })
        }
    }

    pub const fn is_active_crown(self) -> bool {
        matches!(self, Self::ActiveCrown)
    }
}

impl FromStr for FireType {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        match s {
            "surface" => Ok(Self::Surface),
            "passive crown" => Ok(Self::PassiveCrown),
            "active crown" => Ok(Self::ActiveCrown),
            _ => Err(FlameError::InvalidConfiguration {
                option: "fire_type",
                value: s.to_string(),
                expected: "surface, passive crown, active crown",
            }),
        }
    }
}

impl fmt::Display for FireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
