//! Error taxonomy for formula evaluation and block dispatch
//!
//! Every failure is deterministic: an input outside a formula's physical
//! domain, an unrecognized selector token, or a malformed request. Errors are
//! returned at the point of detection and never recovered internally.

use thiserror::Error;

use crate::catalog::CalculationKind;

/// Errors raised by the formula library and the dispatcher
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlameError {
    /// A numeric input violates a formula's domain constraint
    #[error("invalid input `{parameter}` = {value}: {constraint}")]
    InvalidInput {
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A model selector is not among the formula's published variants
    #[error("unsupported {calculation} model `{model}`; expected one of: {}", .supported.join(", "))]
    UnsupportedModel {
        calculation: &'static str,
        model: String,
        supported: Vec<&'static str>,
    },

    /// The calculation name is not in the catalog
    #[error("unknown calculation `{name}`; expected one of: {}", CalculationKind::NAMES.join(", "))]
    UnknownCalculation { name: String },

    /// A units or option token is not recognized
    #[error("invalid `{option}` token `{value}`; expected one of: {expected}")]
    InvalidConfiguration {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A selector the chosen calculation needs was not supplied
    #[error("`{calculation}` requires `{option}`")]
    MissingOption {
        calculation: &'static str,
        option: &'static str,
    },

    /// A parameter the calculation needs was not supplied
    #[error("`{calculation}` requires argument `{parameter}`")]
    MissingArgument {
        calculation: &'static str,
        parameter: &'static str,
    },

    /// An argument name is not a known formula parameter
    #[error("unknown argument `{name}`")]
    UnknownArgument { name: String },

    /// A parameter was supplied that the calculation does not accept
    #[error("`{calculation}` does not accept argument `{parameter}`")]
    UnexpectedArgument {
        calculation: &'static str,
        parameter: String,
    },

    /// Array arguments of one request do not share a common shape
    #[error("argument `{parameter}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        parameter: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// No array argument establishes a leading row axis to partition
    #[error("dispatch requires at least one array argument with a leading row axis")]
    NoRowAxis,

    /// Block results could not be assembled into the output array
    #[error("array layout error: {0}")]
    Layout(String),

    /// The requested worker count is not positive
    #[error("worker count must be positive, got {0}")]
    InvalidWorkerCount(usize),

    /// The per-call worker pool could not be built
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

pub type FlameResult<T> = Result<T, FlameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_parameter_and_constraint() {
        let err = FlameError::InvalidInput {
            parameter: "canopy_cover",
            value: 101.0,
            constraint: "must be within [0, 100] percent",
        };
        let msg = err.to_string();
        assert!(msg.contains("canopy_cover"), "{msg}");
        assert!(msg.contains("101"), "{msg}");
        assert!(msg.contains("[0, 100]"), "{msg}");
    }

    #[test]
    fn test_unknown_calculation_lists_catalog() {
        let err = FlameError::UnknownCalculation {
            name: "flame_width".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("flame_width"));
        assert!(msg.contains("midflame_ws"));
        assert!(msg.contains("flame_depth"));
    }

    #[test]
    fn test_unsupported_model_lists_known_models() {
        let err = FlameError::UnsupportedModel {
            calculation: "flame_tilt",
            model: "Nelson".to_string(),
            supported: vec!["Standard", "Finney", "Butler"],
        };
        assert_eq!(
            err.to_string(),
            "unsupported flame_tilt model `Nelson`; expected one of: Standard, Finney, Butler"
        );
    }
}
