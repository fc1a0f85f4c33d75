//! Parallel row-block dispatcher
//!
//! Splits the leading axis of a request into contiguous blocks, evaluates
//! each block on a worker pool built for the call, and concatenates the block
//! results back in row order. The output equals [`Calculation::evaluate`] on
//! the whole request for every worker count.
//!
//! All request-level validation (catalog lookup, selector tokens, argument
//! names, shapes, worker count) runs before the pool is built. The first
//! block error aborts the call and no partial result is returned.

pub mod partition;
pub mod profiler;

use ndarray::{concatenate, ArrayD, ArrayViewD, Axis, IxDyn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use tracing::{debug, trace};

pub use partition::{effective_workers, partition_rows, RowBlock};
pub use profiler::ProfilerScope;

use crate::catalog::{Arguments, Calculation};
use crate::config::{CalculationConfig, DispatchConfig};
use crate::error::{FlameError, FlameResult};

/// How a dispatch call was executed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchReport {
    /// Worker count after clamping to the row count
    pub workers: usize,
    /// Row blocks in evaluation order; empty when there were no rows
    pub blocks: Vec<RowBlock>,
    pub elapsed_ms: f64,
}

/// Runs catalog calculations over row blocks in parallel
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    pub fn with_workers(num_workers: usize) -> Self {
        Self::new(DispatchConfig::with_workers(num_workers))
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Evaluate `calculation` over `args` in parallel
    pub fn dispatch(&self, calculation: &Calculation, args: &Arguments) -> FlameResult<ArrayD<f64>> {
        self.dispatch_with_report(calculation, args)
            .map(|(output, _)| output)
    }

    /// Resolve a name/model/units request, then dispatch it
    pub fn dispatch_request(
        &self,
        request: &CalculationConfig,
        args: &Arguments,
    ) -> FlameResult<ArrayD<f64>> {
        let calculation = Calculation::from_config(request)?;
        self.dispatch(&calculation, args)
    }

    /// Like [`Dispatcher::dispatch`], also reporting the partition used
    pub fn dispatch_with_report(
        &self,
        calculation: &Calculation,
        args: &Arguments,
    ) -> FlameResult<(ArrayD<f64>, DispatchReport)> {
        let mut scope = ProfilerScope::new("dispatch");
        let view = args.view();

        let shape = calculation
            .output_shape(&view)?
            .filter(|shape| !shape.is_empty())
            .ok_or(FlameError::NoRowAxis)?;
        let rows = shape[0];
        scope.record_rows(rows);
        let workers = effective_workers(self.config.num_workers, rows)?;

        if rows == 0 {
            debug!(calculation = %calculation, "no rows to dispatch");
            let report = DispatchReport {
                workers: 0,
                blocks: Vec::new(),
                elapsed_ms: scope.elapsed_ms(),
            };
            return Ok((ArrayD::zeros(IxDyn(&shape)), report));
        }
        if workers < self.config.num_workers {
            debug!(
                requested = self.config.num_workers,
                workers, rows, "clamped worker count to row count"
            );
        }

        let blocks = partition_rows(rows, workers);
        debug!(
            calculation = %calculation,
            rows,
            workers,
            blocks = blocks.len(),
            "dispatching row blocks"
        );

        let prefix = self.config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()
            .map_err(|e| FlameError::WorkerPool(e.to_string()))?;

        let parts = pool.install(|| {
            blocks
                .par_iter()
                .map(|block| {
                    trace!(block = block.index, rows = ?block.rows, "evaluating block");
                    calculation
                        .evaluate_view(&view.slice_rows(block.rows.clone()))
                        .inspect_err(|e| debug!(block = block.index, error = %e, "block failed"))
                })
                .collect::<FlameResult<Vec<_>>>()
        })?;

        let output = gather(parts)?;
        let report = DispatchReport {
            workers,
            blocks,
            elapsed_ms: scope.elapsed_ms(),
        };
        Ok((output, report))
    }
}

/// Concatenate block results along the row axis
fn gather(mut parts: Vec<ArrayD<f64>>) -> FlameResult<ArrayD<f64>> {
    if parts.len() == 1 {
        if let Some(only) = parts.pop() {
            return Ok(only);
        }
    }
    let views: Vec<ArrayViewD<'_, f64>> = parts.iter().map(ArrayD::view).collect();
    concatenate(Axis(0), &views).map_err(|e| FlameError::Layout(e.to_string()))
}

/// Resolve `request` and evaluate it on `num_workers` workers
///
/// Convenience wrapper over [`Dispatcher::dispatch_request`].
pub fn dispatch(
    request: &CalculationConfig,
    num_workers: usize,
    args: &Arguments,
) -> FlameResult<ArrayD<f64>> {
    Dispatcher::with_workers(num_workers).dispatch_request(request, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Parameter;
    use crate::core_types::UnitSystem;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    fn depth_args(rows: usize) -> Arguments {
        let ros = Array1::from_iter((0..rows).map(|i| i as f64 + 1.0));
        Arguments::new()
            .with(Parameter::RateOfSpread, ros)
            .with(Parameter::ResidenceTime, 0.5)
    }

    #[test]
    fn test_report_describes_partition() {
        let dispatcher = Dispatcher::with_workers(4);
        let (output, report) = dispatcher
            .dispatch_with_report(&Calculation::FlameDepth, &depth_args(10))
            .unwrap();
        assert_eq!(report.workers, 4);
        assert_eq!(
            report.blocks.iter().map(RowBlock::len).collect::<Vec<_>>(),
            vec![3, 3, 2, 2]
        );
        assert_eq!(output.shape(), &[10]);
        assert_relative_eq!(output[9], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_workers_clamped_to_rows() {
        let (output, report) = Dispatcher::with_workers(16)
            .dispatch_with_report(&Calculation::FlameDepth, &depth_args(3))
            .unwrap();
        assert_eq!(report.workers, 3);
        assert!(report.blocks.iter().all(|b| b.len() == 1));
        assert_eq!(output.iter().copied().collect::<Vec<_>>(), vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_zero_rows_returns_empty() {
        let (output, report) = Dispatcher::with_workers(4)
            .dispatch_with_report(&Calculation::FlameDepth, &depth_args(0))
            .unwrap();
        assert_eq!(output.shape(), &[0]);
        assert!(report.blocks.is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert_eq!(
            Dispatcher::with_workers(0).dispatch(&Calculation::FlameDepth, &depth_args(5)),
            Err(FlameError::InvalidWorkerCount(0))
        );
    }

    #[test]
    fn test_scalar_only_request_has_no_row_axis() {
        let args = Arguments::new()
            .with(Parameter::RateOfSpread, 2.0)
            .with(Parameter::ResidenceTime, 0.5);
        assert_eq!(
            Dispatcher::with_workers(2).dispatch(&Calculation::FlameDepth, &args),
            Err(FlameError::NoRowAxis)
        );
    }

    #[test]
    fn test_block_error_aborts_call() {
        let ros = Array1::from(vec![1.0, 2.0, 3.0, -1.0, 5.0, 6.0]);
        let args = Arguments::new()
            .with(Parameter::RateOfSpread, ros)
            .with(Parameter::ResidenceTime, 0.5);
        let err = Dispatcher::with_workers(3)
            .dispatch(&Calculation::FlameDepth, &args)
            .unwrap_err();
        assert!(matches!(err, FlameError::InvalidInput { parameter: "ros", .. }));
    }

    #[test]
    fn test_dispatch_request_resolves_config() {
        let args = Arguments::new()
            .with(Parameter::WindSpeed, vec![15.0; 6])
            .with(Parameter::CanopyCover, 50.0)
            .with(Parameter::CanopyHeight, 10.0)
            .with(Parameter::CanopyBaseHeight, 2.0);
        let request = CalculationConfig::named("midflame_ws").with_units("SI");
        let output = dispatch(&request, 2, &args).unwrap();

        let serial = Calculation::MidflameWindSpeed {
            units: UnitSystem::Si,
        }
        .evaluate(&args)
        .unwrap();
        assert_eq!(output, serial);
    }
}
