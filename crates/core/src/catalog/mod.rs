//! Calculation catalog
//!
//! Maps calculation names to typed [`Calculation`] values and applies the
//! scalar formulas of [`crate::physics`] element-wise over a request's
//! arguments. Scalars broadcast to every element; arrays must share one shape.

pub mod args;

use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayD, IxDyn};
use tracing::debug;

pub use args::{Arg, ArgView, Arguments, ArgumentsView, Parameter};

use crate::config::CalculationConfig;
use crate::core_types::{FireType, TimeUnits, UnitSystem};
use crate::error::{FlameError, FlameResult};
use crate::physics::{
    butler_flame_tilt, finney_flame_height, finney_flame_tilt, flame_depth, flame_length,
    flame_residence_time, midflame_wind_speed, nelson_flame_height, standard_flame_tilt,
    FlameHeightModel, FlameLengthModel, FlameTiltModel,
};
use args::Column;

/// Names of the calculations the catalog can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationKind {
    MidflameWindSpeed,
    FlameLength,
    FlameHeight,
    FlameTilt,
    FlameResidenceTime,
    FlameDepth,
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 6] = [
        CalculationKind::MidflameWindSpeed,
        CalculationKind::FlameLength,
        CalculationKind::FlameHeight,
        CalculationKind::FlameTilt,
        CalculationKind::FlameResidenceTime,
        CalculationKind::FlameDepth,
    ];

    pub const NAMES: [&'static str; 6] = [
        "midflame_ws",
        "flame_length",
        "flame_height",
        "flame_tilt",
        "flame_residence_time",
        "flame_depth",
    ];

    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl FromStr for CalculationKind {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FlameError::UnknownCalculation {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved calculation: formula plus model and unit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calculation {
    MidflameWindSpeed { units: UnitSystem },
    FlameLength { model: FlameLengthModel },
    FlameHeight { model: FlameHeightModel },
    FlameTilt { model: FlameTiltModel },
    FlameResidenceTime { time_units: TimeUnits },
    FlameDepth,
}

impl Calculation {
    pub const fn kind(&self) -> CalculationKind {
        match self {
            Self::MidflameWindSpeed { .. } => CalculationKind::MidflameWindSpeed,
            Self::FlameLength { .. } => CalculationKind::FlameLength,
            Self::FlameHeight { .. } => CalculationKind::FlameHeight,
            Self::FlameTilt { .. } => CalculationKind::FlameTilt,
            Self::FlameResidenceTime { .. } => CalculationKind::FlameResidenceTime,
            Self::FlameDepth => CalculationKind::FlameDepth,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Parameters this calculation takes, in formula order
    pub fn parameters(&self) -> &'static [Parameter] {
        use Parameter as P;
        match self {
            Self::MidflameWindSpeed { .. } => &[
                P::WindSpeed,
                P::CanopyCover,
                P::CanopyHeight,
                P::CanopyBaseHeight,
            ],
            Self::FlameLength { model } if model.requires_flame_depth() => {
                &[P::FireIntensity, P::FlameDepth]
            }
            Self::FlameLength { .. } => &[P::FireIntensity],
            Self::FlameHeight {
                model: FlameHeightModel::Nelson,
            } => &[
                P::FlameLength,
                P::FireType,
                P::FireIntensity,
                P::MidflameWindSpeed,
            ],
            Self::FlameHeight {
                model: FlameHeightModel::Finney { .. },
            } => &[P::FlameLength, P::FlameTilt, P::SlopeAngle],
            Self::FlameTilt {
                model: FlameTiltModel::Standard,
            } => &[P::FlameLength, P::FlameHeight],
            Self::FlameTilt {
                model: FlameTiltModel::Finney { .. },
            } => &[P::FlameLength, P::FlameHeight, P::SlopeAngle],
            Self::FlameTilt {
                model: FlameTiltModel::Butler { .. },
            } => &[P::WindSpeed, P::CanopyHeight],
            Self::FlameResidenceTime { .. } => {
                &[P::RateOfSpread, P::FuelConsumption, P::MidflameWindSpeed]
            }
            Self::FlameDepth => &[P::RateOfSpread, P::ResidenceTime],
        }
    }

    /// Resolve a name/model/units request into a typed calculation
    ///
    /// Selectors the calculation does not use are ignored.
    pub fn from_config(config: &CalculationConfig) -> FlameResult<Self> {
        let kind: CalculationKind = config.name.parse()?;
        let name = kind.name();
        let model = || {
            config.model.as_deref().ok_or(FlameError::MissingOption {
                calculation: name,
                option: "model",
            })
        };

        let calculation = match kind {
            CalculationKind::MidflameWindSpeed => {
                let units = config.units.as_deref().ok_or(FlameError::MissingOption {
                    calculation: name,
                    option: "units",
                })?;
                Self::MidflameWindSpeed {
                    units: units.parse()?,
                }
            }
            CalculationKind::FlameLength => Self::FlameLength {
                model: model()?.parse()?,
            },
            CalculationKind::FlameHeight => Self::FlameHeight {
                model: FlameHeightModel::from_selectors(
                    model()?,
                    config.slope_units.as_deref(),
                )?,
            },
            CalculationKind::FlameTilt => Self::FlameTilt {
                model: FlameTiltModel::from_selectors(
                    model()?,
                    config.slope_units.as_deref(),
                    config.wind_speed_units.as_deref(),
                )?,
            },
            CalculationKind::FlameResidenceTime => Self::FlameResidenceTime {
                time_units: config
                    .time_units
                    .as_deref()
                    .map(str::parse::<TimeUnits>)
                    .transpose()?
                    .unwrap_or_default(),
            },
            CalculationKind::FlameDepth => Self::FlameDepth,
        };

        let ignored = config.ignored_options(&calculation);
        if !ignored.is_empty() {
            debug!(calculation = name, ?ignored, "ignoring unused options");
        }
        Ok(calculation)
    }

    /// Reject missing and unexpected arguments
    pub(crate) fn check_arguments(&self, args: &ArgumentsView<'_>) -> FlameResult<()> {
        let parameters = self.parameters();
        if let Some(missing) = parameters.iter().find(|p| !args.contains(**p)) {
            return Err(FlameError::MissingArgument {
                calculation: self.name(),
                parameter: missing.name(),
            });
        }

        let supplied = args.parameters();
        if let Some(extra) = supplied.into_iter().find(|p| !parameters.contains(p)) {
            return Err(FlameError::UnexpectedArgument {
                calculation: self.name(),
                parameter: extra.name().to_string(),
            });
        }
        Ok(())
    }

    /// Shape of the output for `args`, `None` when every argument is scalar
    pub(crate) fn output_shape(&self, args: &ArgumentsView<'_>) -> FlameResult<Option<Vec<usize>>> {
        self.check_arguments(args)?;
        args.common_shape(self.parameters())
    }

    /// Evaluate over a whole request in the calling thread
    pub fn evaluate(&self, args: &Arguments) -> FlameResult<ArrayD<f64>> {
        self.evaluate_view(&args.view())
    }

    /// Evaluate over borrowed arguments, typically one row block
    ///
    /// The result has the common shape of the array arguments, or is
    /// zero-dimensional when all arguments are scalars.
    pub fn evaluate_view(&self, args: &ArgumentsView<'_>) -> FlameResult<ArrayD<f64>> {
        let shape = self.output_shape(args)?.unwrap_or_default();

        let columns: Vec<Column<'_>> = self
            .parameters()
            .iter()
            .filter_map(|p| args.get(*p))
            .map(Column::new)
            .collect();

        let len: usize = shape.iter().product();
        let mut point = vec![0.0; columns.len()];
        let mut values = Vec::with_capacity(len);
        for index in 0..len {
            for (slot, column) in point.iter_mut().zip(&columns) {
                *slot = column.value(index);
            }
            values.push(self.evaluate_point(&point)?);
        }

        ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|e| FlameError::Layout(e.to_string()))
    }

    /// Apply the formula to one element; `inputs` follow `parameters()`
    fn evaluate_point(&self, inputs: &[f64]) -> FlameResult<f64> {
        if inputs.iter().any(|v| v.is_nan()) {
            return Ok(f64::NAN);
        }

        match self {
            Self::MidflameWindSpeed { units } => {
                let [ws, cover, ht, baseht] = unpack(inputs)?;
                midflame_wind_speed(ws, cover, ht, baseht, *units)
            }
            Self::FlameLength { model } if model.requires_flame_depth() => {
                let [intensity, depth] = unpack(inputs)?;
                flame_length(*model, intensity, Some(depth))
            }
            Self::FlameLength { model } => {
                let [intensity] = unpack(inputs)?;
                flame_length(*model, intensity, None)
            }
            Self::FlameHeight {
                model: FlameHeightModel::Nelson,
            } => {
                let [length, fire_type, intensity, mws] = unpack(inputs)?;
                nelson_flame_height(length, FireType::from_code(fire_type)?, intensity, mws)
            }
            Self::FlameHeight {
                model: FlameHeightModel::Finney { slope_units },
            } => {
                let [length, tilt, slope] = unpack(inputs)?;
                finney_flame_height(length, tilt, slope, *slope_units)
            }
            Self::FlameTilt {
                model: FlameTiltModel::Standard,
            } => {
                let [length, height] = unpack(inputs)?;
                standard_flame_tilt(length, height)
            }
            Self::FlameTilt {
                model: FlameTiltModel::Finney { slope_units },
            } => {
                let [length, height, slope] = unpack(inputs)?;
                finney_flame_tilt(length, height, slope, *slope_units)
            }
            Self::FlameTilt {
                model: FlameTiltModel::Butler { wind_speed_units },
            } => {
                let [ws, canopy_ht] = unpack(inputs)?;
                butler_flame_tilt(ws, *wind_speed_units, canopy_ht)
            }
            Self::FlameResidenceTime { time_units } => {
                let [ros, consumption, mws] = unpack(inputs)?;
                flame_residence_time(ros, consumption, mws, *time_units)
            }
            Self::FlameDepth => {
                let [ros, res_time] = unpack(inputs)?;
                flame_depth(ros, res_time)
            }
        }
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MidflameWindSpeed { units } => write!(f, "midflame_ws[{units}]"),
            Self::FlameLength { model } => write!(f, "flame_length[{model}]"),
            Self::FlameHeight { model } => write!(f, "flame_height[{}]", model.token()),
            Self::FlameTilt { model } => write!(f, "flame_tilt[{}]", model.token()),
            Self::FlameResidenceTime { time_units } => {
                write!(f, "flame_residence_time[{time_units}]")
            }
            Self::FlameDepth => f.write_str("flame_depth"),
        }
    }
}

fn unpack<const N: usize>(inputs: &[f64]) -> FlameResult<[f64; N]> {
    <[f64; N]>::try_from(inputs).map_err(|_| {
        FlameError::Layout(format!("expected {N} inputs, got {}", inputs.len()))
    })
}
