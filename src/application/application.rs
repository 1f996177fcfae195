use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::data::Verdict;
use crate::compare::CompareError;
use crate::pipeline::{Pipeline, PipelineCreationError, SupplierError};
use crate::report::{ConsoleReporter, report_error, report_note};
use crate::supplier::SupplySummary;

pub struct Application;

impl Application {
    /// Compares the two roots, printing findings as they are found.
    ///
    /// Root-level failures of either side are reported here, after both sides
    /// have been drained, and turn the verdict into `Failed`. Only a failure of
    /// the comparison itself is returned as an error.
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<Verdict, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        if app_config.verbose {
            report_note(format_args!(
                "comparing {} to {}",
                app_config.left.display(),
                app_config.right.display()
            ));
        }

        let pipeline = Pipeline::new(&app_config.left, &app_config.right)
            .context(PipelineCreationSnafu)?
            .with_queue_capacity(app_config.queue_capacity)
            .with_abort_policy(app_config.abort_policy)
            .with_progress(app_config.verbose);

        let outcome = pipeline.run(&mut ConsoleReporter).await;

        let errors = supplier_errors(outcome.left) + supplier_errors(outcome.right);
        let summary = outcome.comparison.context(ComparisonSnafu)?;
        info!(
            "Compared {} left and {} right entries: {} findings, {} errors",
            summary.left_processed, summary.right_processed, summary.findings, errors
        );

        Ok(Verdict::from_counts(summary.findings, errors))
    }
}

/// Number of errors a supplier ran into, reporting its fatal one if any
fn supplier_errors(outcome: Result<SupplySummary, SupplierError>) -> u64 {
    match outcome {
        Ok(summary) => summary.errors,
        Err(error) => {
            report_error(&error);
            1
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while starting the comparison"))]
    PipelineCreationError { source: PipelineCreationError },
    #[snafu(display("Comparison aborted"))]
    ComparisonError { source: CompareError },
}
