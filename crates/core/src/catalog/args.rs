//! Named formula arguments
//!
//! A request carries one value per [`Parameter`]: either a scalar that
//! broadcasts to every element, or an `ndarray` array. All arrays of one
//! request must share the same shape.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use ndarray::{Array1, ArrayD, ArrayViewD, Axis, Slice};
use rustc_hash::FxHashMap;

use crate::error::{FlameError, FlameResult};

/// Input parameters understood by the formula library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    WindSpeed,
    CanopyCover,
    CanopyHeight,
    CanopyBaseHeight,
    FireIntensity,
    FlameDepth,
    FlameLength,
    FlameHeight,
    FireType,
    MidflameWindSpeed,
    FlameTilt,
    SlopeAngle,
    RateOfSpread,
    FuelConsumption,
    ResidenceTime,
}

impl Parameter {
    pub const ALL: [Parameter; 15] = [
        Parameter::WindSpeed,
        Parameter::CanopyCover,
        Parameter::CanopyHeight,
        Parameter::CanopyBaseHeight,
        Parameter::FireIntensity,
        Parameter::FlameDepth,
        Parameter::FlameLength,
        Parameter::FlameHeight,
        Parameter::FireType,
        Parameter::MidflameWindSpeed,
        Parameter::FlameTilt,
        Parameter::SlopeAngle,
        Parameter::RateOfSpread,
        Parameter::FuelConsumption,
        Parameter::ResidenceTime,
    ];

    /// Argument name used in requests
    pub const fn name(self) -> &'static str {
        match self {
            Self::WindSpeed => "wind_speed",
            Self::CanopyCover => "canopy_cover",
            Self::CanopyHeight => "canopy_ht",
            Self::CanopyBaseHeight => "canopy_baseht",
            Self::FireIntensity => "fire_intensity",
            Self::FlameDepth => "flame_depth",
            Self::FlameLength => "flame_length",
            Self::FlameHeight => "flame_height",
            Self::FireType => "fire_type",
            Self::MidflameWindSpeed => "midflame_ws",
            Self::FlameTilt => "flame_tilt",
            Self::SlopeAngle => "slope_angle",
            Self::RateOfSpread => "ros",
            Self::FuelConsumption => "fuel_consumption",
            Self::ResidenceTime => "res_time",
        }
    }
}

impl FromStr for Parameter {
    type Err = FlameError;

    fn from_str(s: &str) -> FlameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| FlameError::UnknownArgument {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One argument value
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Broadcast to every element
    Scalar(f64),
    /// Evaluated element-wise
    Array(ArrayD<f64>),
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Scalar(value)
    }
}

impl From<ArrayD<f64>> for Arg {
    fn from(value: ArrayD<f64>) -> Self {
        Arg::Array(value)
    }
}

impl From<Array1<f64>> for Arg {
    fn from(value: Array1<f64>) -> Self {
        Arg::Array(value.into_dyn())
    }
}

impl From<Vec<f64>> for Arg {
    fn from(value: Vec<f64>) -> Self {
        Arg::Array(Array1::from(value).into_dyn())
    }
}

/// Arguments of one calculation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: FxHashMap<Parameter, Arg>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, parameter: Parameter, value: impl Into<Arg>) -> Self {
        self.set(parameter, value);
        self
    }

    /// Insert or replace a value
    pub fn set(&mut self, parameter: Parameter, value: impl Into<Arg>) {
        self.values.insert(parameter, value.into());
    }

    /// Insert a value by argument name
    pub fn set_named(&mut self, name: &str, value: impl Into<Arg>) -> FlameResult<()> {
        let parameter = name.parse()?;
        self.set(parameter, value);
        Ok(())
    }

    pub fn get(&self, parameter: Parameter) -> Option<&Arg> {
        self.values.get(&parameter)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow every value as a view
    pub fn view(&self) -> ArgumentsView<'_> {
        let values = self
            .values
            .iter()
            .map(|(&parameter, arg)| {
                let view = match arg {
                    Arg::Scalar(v) => ArgView::Scalar(*v),
                    Arg::Array(a) => ArgView::Array(a.view()),
                };
                (parameter, view)
            })
            .collect();
        ArgumentsView { values }
    }
}

/// Borrowed argument value
#[derive(Debug, Clone)]
pub enum ArgView<'a> {
    Scalar(f64),
    Array(ArrayViewD<'a, f64>),
}

/// Borrowed arguments, either a whole request or one row block of it
#[derive(Debug, Clone)]
pub struct ArgumentsView<'a> {
    values: FxHashMap<Parameter, ArgView<'a>>,
}

impl<'a> ArgumentsView<'a> {
    pub fn get(&self, parameter: Parameter) -> Option<&ArgView<'a>> {
        self.values.get(&parameter)
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.values.contains_key(&parameter)
    }

    /// Shape shared by every array among `parameters`
    ///
    /// `None` when all of them are scalars. Parameters are checked in the
    /// given order so the reported mismatch is stable.
    pub fn common_shape(&self, parameters: &[Parameter]) -> FlameResult<Option<Vec<usize>>> {
        let mut shape: Option<&[usize]> = None;
        for &parameter in parameters {
            let Some(ArgView::Array(array)) = self.values.get(&parameter) else {
                continue;
            };
            match shape {
                None => shape = Some(array.shape()),
                Some(expected) if expected != array.shape() => {
                    return Err(FlameError::ShapeMismatch {
                        parameter: parameter.name(),
                        expected: expected.to_vec(),
                        found: array.shape().to_vec(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(shape.map(<[usize]>::to_vec))
    }

    /// Restrict every array to `rows` along axis 0; scalars pass unchanged
    ///
    /// Every array must have at least one axis and `rows` must lie within it.
    pub fn slice_rows(&self, rows: Range<usize>) -> ArgumentsView<'a> {
        let values = self
            .values
            .iter()
            .map(|(&parameter, view)| {
                let sliced = match view {
                    ArgView::Scalar(v) => ArgView::Scalar(*v),
                    ArgView::Array(a) => ArgView::Array(
                        a.clone()
                            .slice_axis_move(Axis(0), Slice::from(rows.clone())),
                    ),
                };
                (parameter, sliced)
            })
            .collect();
        ArgumentsView { values }
    }

    /// Supplied parameter names in declaration order
    pub(crate) fn parameters(&self) -> Vec<Parameter> {
        let mut supplied: Vec<Parameter> = self.values.keys().copied().collect();
        supplied.sort_unstable();
        supplied
    }
}

/// Flat element access for one parameter
pub(crate) enum Column<'v> {
    Scalar(f64),
    Values(Cow<'v, [f64]>),
}

impl<'v> Column<'v> {
    pub(crate) fn new(view: &'v ArgView<'_>) -> Self {
        match view {
            ArgView::Scalar(v) => Column::Scalar(*v),
            ArgView::Array(a) => match a.as_slice() {
                Some(values) => Column::Values(Cow::Borrowed(values)),
                // Non-contiguous views are copied once in logical order
                None => Column::Values(Cow::Owned(a.iter().copied().collect())),
            },
        }
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> f64 {
        match self {
            Column::Scalar(v) => *v,
            Column::Values(values) => values[index],
        }
    }
}
