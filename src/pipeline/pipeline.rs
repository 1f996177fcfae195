use std::num::NonZeroUsize;
use std::path::PathBuf;

use compio::dispatcher::{Dispatcher, DispatcherBuilder};
use futures_channel::oneshot;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::compare::{AbortPolicy, CompareError, ComparisonSummary, MergeCompare};
use crate::queue::{DEFAULT_QUEUE_CAPACITY, EntrySender, entry_queue};
use crate::report::Reporter;
use crate::supplier::{Side, Supplier, SupplySummary, WalkError};

/// One worker thread per supplier; walking and reading attributes block
const SUPPLIER_THREADS: usize = 2;

/// Runs two suppliers and the merge-compare over their queues
pub struct Pipeline {
    dispatcher: Dispatcher,
    left_root: PathBuf,
    right_root: PathBuf,
    queue_capacity: usize,
    abort_policy: AbortPolicy,
    progress: bool,
}

/// Everything the pipeline learned, gathered after all three parts ended
#[derive(Debug)]
pub struct PipelineOutcome {
    /// `Err` when the comparison itself failed and stopped early
    pub comparison: Result<ComparisonSummary, CompareError>,
    pub left: Result<SupplySummary, SupplierError>,
    pub right: Result<SupplySummary, SupplierError>,
}

impl Pipeline {
    pub fn new(
        left_root: impl Into<PathBuf>,
        right_root: impl Into<PathBuf>,
    ) -> Result<Self, PipelineCreationError> {
        let workers_num = NonZeroUsize::new(SUPPLIER_THREADS).unwrap_or(NonZeroUsize::MIN);
        debug!("Using {} worker threads for the suppliers", workers_num);

        let dispatcher = DispatcherBuilder::new()
            .worker_threads(workers_num)
            .build()
            .context(DispatcherSnafu)?;

        Ok(Self {
            dispatcher,
            left_root: left_root.into(),
            right_root: right_root.into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            abort_policy: AbortPolicy::default(),
            progress: false,
        })
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Runs the comparison to completion and joins both suppliers.
    ///
    /// Findings are reported as they are found; failures of any part are
    /// collected into the outcome instead of cutting the others short.
    pub async fn run(&self, reporter: &mut impl Reporter) -> PipelineOutcome {
        let (left_sender, left_queue) = entry_queue(self.queue_capacity);
        let (right_sender, right_queue) = entry_queue(self.queue_capacity);

        let left = self.dispatch_supplier(Supplier::new(Side::Left, &self.left_root), left_sender);
        let right =
            self.dispatch_supplier(Supplier::new(Side::Right, &self.right_root), right_sender);

        info!(
            "Comparing {} to {}",
            self.left_root.display(),
            self.right_root.display()
        );
        let comparison = MergeCompare::new(&self.left_root, &self.right_root)
            .with_abort_policy(self.abort_policy)
            .with_progress(self.progress)
            .run(left_queue, right_queue, reporter)
            .await;

        PipelineOutcome {
            comparison,
            left: Self::join_supplier(Side::Left, left).await,
            right: Self::join_supplier(Side::Right, right).await,
        }
    }

    /// Starts a supplier on a worker thread. If it cannot be started its
    /// sender is dropped with it, so the comparison sees an empty side.
    fn dispatch_supplier(
        &self,
        supplier: Supplier,
        sender: EntrySender,
    ) -> Result<SupplierHandle, SupplierError> {
        let side = supplier.side();
        let receiver = self
            .dispatcher
            .dispatch(move || async move { supplier.run(sender).await })
            .map_err(|e| SupplierError::DispatchError {
                side,
                error: e.to_string(),
            })?;

        debug!("Dispatched the {} supplier", side);
        Ok(receiver)
    }

    async fn join_supplier(
        side: Side,
        handle: Result<SupplierHandle, SupplierError>,
    ) -> Result<SupplySummary, SupplierError> {
        match handle?.await {
            Ok(result) => Ok(result?),
            Err(source) => {
                debug!("The {} supplier was canceled: {}", side, source);
                Err(SupplierError::CanceledError { side, source })
            }
        }
    }
}

type SupplierHandle = oneshot::Receiver<Result<SupplySummary, WalkError>>;

#[derive(Debug, Snafu)]
pub enum PipelineCreationError {
    #[snafu(display("Failed to create the supplier dispatcher"))]
    DispatcherError { source: std::io::Error },
}

#[derive(Debug, Snafu)]
pub enum SupplierError {
    #[snafu(display("Failed to start the {side} supplier: {error}"))]
    DispatchError { side: Side, error: String },
    #[snafu(display("The {side} supplier stopped without a result"))]
    CanceledError {
        side: Side,
        source: oneshot::Canceled,
    },
    #[snafu(transparent)]
    WalkError { source: WalkError },
}
