use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::ValueEnum;
use futures::StreamExt;
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::compare::differ::diff_attributes;
use crate::compare::progress::{PROGRESS_INTERVAL, Progress, ProgressThrottle, SideProgress};
use crate::compare::Finding;
use crate::queue::{EntryReceiver, QueueItem};
use crate::report::Reporter;
use crate::supplier::{Entry, Side};

/// What to do when one side's walk ends with a root-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AbortPolicy {
    /// Stop classifying; nothing after the failure can be trusted
    #[default]
    Suppress,
    /// Treat the failed side as finished, reporting the rest of the other
    /// side as only present there
    Exhaust,
}

/// Streaming merge of two path-ordered entry queues.
///
/// Holds at most one entry per side at a time; neither tree is buffered.
pub struct MergeCompare {
    left: Cursor,
    right: Cursor,
    policy: AbortPolicy,
    throttle: Option<ProgressThrottle>,
}

/// Counts from a finished comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComparisonSummary {
    pub left_processed: u64,
    pub right_processed: u64,
    pub findings: u64,
    /// Classification stopped early because a side aborted
    pub aborted: bool,
}

/// An entry along with its path relative to its root
#[derive(Debug)]
struct Positioned {
    entry: Entry,
    relative: PathBuf,
}

/// Per-side state of the merge
#[derive(Debug)]
struct Cursor {
    side: Side,
    root: PathBuf,
    current: Option<Positioned>,
    finished: bool,
    aborted: bool,
    processed: u64,
    last: Option<PathBuf>,
}

impl Cursor {
    fn new(side: Side, root: PathBuf) -> Self {
        Self {
            side,
            root,
            current: None,
            finished: false,
            aborted: false,
            processed: 0,
            last: None,
        }
    }

    /// Waits on this side's queue until it yields an entry or ends.
    /// Does nothing while an entry is already held or the side is done.
    async fn fill(&mut self, queue: &mut EntryReceiver) -> Result<(), CompareError> {
        if self.current.is_some() || self.finished {
            return Ok(());
        }

        match queue.next().await {
            Some(QueueItem::Entry(entry)) => {
                self.current = Some(self.position(entry)?);
            }
            Some(QueueItem::Aborted) => {
                warn!("The {} side aborted its walk", self.side);
                self.finished = true;
                self.aborted = true;
            }
            None => {
                debug!(
                    "The {} side is exhausted after {} entries",
                    self.side, self.processed
                );
                self.finished = true;
            }
        }
        Ok(())
    }

    fn position(&mut self, entry: Entry) -> Result<Positioned, CompareError> {
        let relative = relative_to(&entry.absolute_path, &self.root)?;

        if let Some(previous) = &self.last {
            ensure!(
                previous.as_path() < relative.as_path(),
                OutOfOrderSnafu {
                    side: self.side,
                    previous: previous.clone(),
                    current: relative,
                }
            );
        }
        self.last = Some(relative.clone());

        Ok(Positioned { entry, relative })
    }

    fn only_in(&mut self, positioned: Positioned) -> Finding {
        self.processed += 1;
        Finding::OnlyIn {
            root: self.root.clone(),
            path: positioned.relative,
        }
    }

    fn progress(&self, queue: &EntryReceiver) -> SideProgress {
        SideProgress {
            processed: self.processed,
            depth: queue.depth(),
            capacity: queue.capacity(),
        }
    }
}

fn relative_to(path: &Path, root: &Path) -> Result<PathBuf, CompareError> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .ok()
        .context(RelativizeSnafu { path, root })
}

impl MergeCompare {
    pub fn new(left_root: impl Into<PathBuf>, right_root: impl Into<PathBuf>) -> Self {
        Self {
            left: Cursor::new(Side::Left, left_root.into()),
            right: Cursor::new(Side::Right, right_root.into()),
            policy: AbortPolicy::default(),
            throttle: None,
        }
    }

    pub fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables progress reports, at most one per [`PROGRESS_INTERVAL`].
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.throttle = enabled.then(|| ProgressThrottle::new(PROGRESS_INTERVAL));
        self
    }

    /// Consumes both queues to the end, reporting every difference.
    ///
    /// The queues are dropped on return, which tells their suppliers to stop
    /// if they are still walking.
    pub async fn run(
        mut self,
        mut left_queue: EntryReceiver,
        mut right_queue: EntryReceiver,
        reporter: &mut impl Reporter,
    ) -> Result<ComparisonSummary, CompareError> {
        let mut summary = ComparisonSummary::default();

        loop {
            self.left.fill(&mut left_queue).await?;
            if self.should_stop() {
                break;
            }
            self.right.fill(&mut right_queue).await?;
            if self.should_stop() {
                break;
            }

            let findings = match (self.left.current.take(), self.right.current.take()) {
                (None, None) => break,
                (Some(left), None) => vec![self.left.only_in(left)],
                (None, Some(right)) => vec![self.right.only_in(right)],
                (Some(left), Some(right)) => match left.relative.cmp(&right.relative) {
                    Ordering::Less => {
                        self.right.current = Some(right);
                        vec![self.left.only_in(left)]
                    }
                    Ordering::Greater => {
                        self.left.current = Some(left);
                        vec![self.right.only_in(right)]
                    }
                    Ordering::Equal => {
                        self.left.processed += 1;
                        self.right.processed += 1;
                        diff_attributes(&left.entry, &left.relative, &right.entry, &right.relative)
                    }
                },
            };

            for finding in &findings {
                reporter.finding(finding).context(OutputSnafu)?;
            }
            summary.findings += findings.len() as u64;

            self.report_progress(&left_queue, &right_queue, reporter)?;
        }

        summary.left_processed = self.left.processed;
        summary.right_processed = self.right.processed;
        summary.aborted = self.should_stop();
        if summary.aborted {
            debug!("Stopped classifying after a side aborted");
        }
        Ok(summary)
    }

    fn should_stop(&self) -> bool {
        self.policy == AbortPolicy::Suppress && (self.left.aborted || self.right.aborted)
    }

    fn report_progress(
        &mut self,
        left_queue: &EntryReceiver,
        right_queue: &EntryReceiver,
        reporter: &mut impl Reporter,
    ) -> Result<(), CompareError> {
        let Some(throttle) = self.throttle.as_mut() else {
            return Ok(());
        };
        if !throttle.is_due(Instant::now()) {
            return Ok(());
        }

        let progress = Progress {
            left: self.left.progress(left_queue),
            right: self.right.progress(right_queue),
        };
        reporter.progress(&progress).context(OutputSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum CompareError {
    #[snafu(display("{} is not inside root {}", path.display(), root.display()))]
    RelativizeError { path: PathBuf, root: PathBuf },
    #[snafu(display(
        "{side} entries out of order: {} came after {}",
        current.display(),
        previous.display()
    ))]
    OutOfOrderError {
        side: Side,
        previous: PathBuf,
        current: PathBuf,
    },
    #[snafu(display("cannot write report"))]
    OutputError { source: std::io::Error },
}
