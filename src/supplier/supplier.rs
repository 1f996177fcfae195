use std::path::{Path, PathBuf};

use snafu::prelude::*;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::queue::{EntrySender, QueueClosed, QueueItem};
use crate::report::report_error;
use crate::supplier::attributes::read_attributes;
use crate::supplier::{Entry, Side};

/// Walks one root and feeds its regular files, in path order, into a queue
#[derive(Debug, Clone)]
pub struct Supplier {
    side: Side,
    root: PathBuf,
}

/// What a supplier did before its sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupplySummary {
    pub entries: u64,
    /// Per-entry problems that were reported and skipped over
    pub errors: u64,
    /// The consumer stopped listening before the walk finished
    pub canceled: bool,
}

impl Supplier {
    pub fn new(side: Side, root: impl Into<PathBuf>) -> Self {
        Self {
            side,
            root: root.into(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Runs the walk to completion.
    ///
    /// The queue is always closed on return. A root-level failure puts an
    /// `Aborted` marker on the queue first and is returned to the caller.
    pub async fn run(self, mut queue: EntrySender) -> Result<SupplySummary, WalkError> {
        debug!("Walking {} root {}", self.side, self.root.display());

        if let Err(error) = self.check_root().await {
            // A closed queue means nobody is left to tell
            let _ = queue.send(QueueItem::Aborted).await;
            return Err(error);
        }

        let mut summary = SupplySummary::default();
        match self.walk(&mut queue, &mut summary).await {
            Ok(()) => {
                info!(
                    "Finished walking {} root: {} entries, {} errors",
                    self.side, summary.entries, summary.errors
                );
                Ok(summary)
            }
            Err(WalkStop::Canceled) => {
                debug!("Comparison stopped listening to the {} side", self.side);
                summary.canceled = true;
                Ok(summary)
            }
            Err(WalkStop::Fatal(error)) => {
                let _ = queue.send(QueueItem::Aborted).await;
                Err(error)
            }
        }
    }

    async fn check_root(&self) -> Result<(), WalkError> {
        let metadata = compio::fs::metadata(&self.root)
            .await
            .context(RootUnavailableSnafu {
                side: self.side,
                root: self.root.clone(),
            })?;
        ensure!(
            metadata.is_dir(),
            RootNotDirectorySnafu {
                side: self.side,
                root: self.root.clone(),
            }
        );
        Ok(())
    }

    async fn walk(
        &self,
        queue: &mut EntrySender,
        summary: &mut SupplySummary,
    ) -> Result<(), WalkStop> {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        for item in walker {
            let dir_entry = match item {
                Ok(dir_entry) => dir_entry,
                Err(source) if source.depth() == 0 => {
                    return Err(WalkStop::Fatal(WalkError::RootUnavailableError {
                        side: self.side,
                        root: self.root.clone(),
                        source: source.into(),
                    }));
                }
                Err(source) => {
                    self.report(summary, &EntryError::TraversalError { source });
                    continue;
                }
            };

            if !dir_entry.file_type().is_file() {
                continue;
            }

            let entry = self.load_entry(dir_entry.path(), summary);
            queue
                .send(QueueItem::Entry(entry))
                .await
                .map_err(|QueueClosed| WalkStop::Canceled)?;
            summary.entries += 1;
        }

        Ok(())
    }

    fn load_entry(&self, path: &Path, summary: &mut SupplySummary) -> Entry {
        let (attributes, errors) = read_attributes(path);
        for error in &errors {
            self.report(summary, error);
        }
        Entry::new(path, attributes)
    }

    fn report(&self, summary: &mut SupplySummary, error: &EntryError) {
        summary.errors += 1;
        report_error(error);
    }
}

enum WalkStop {
    Canceled,
    Fatal(WalkError),
}

/// Failures that end a side's walk
#[derive(Debug, Snafu)]
pub enum WalkError {
    #[snafu(display("cannot read {side} root {}", root.display()))]
    RootUnavailableError {
        side: Side,
        root: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{side} root {} is not a directory", root.display()))]
    RootNotDirectoryError { side: Side, root: PathBuf },
}

/// Problems with a single file that are reported but do not stop the walk
#[derive(Debug, Snafu)]
pub enum EntryError {
    #[snafu(display("walk failed"))]
    TraversalError { source: walkdir::Error },
    #[snafu(display("cannot list extended attributes of {}", path.display()))]
    ListAttributesError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("cannot read extended attribute {name} of {}", path.display()))]
    ReadAttributeError {
        path: PathBuf,
        name: String,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::entry_queue;
    use futures::StreamExt;
    use std::fs;
    use tempfile::TempDir;

    async fn collect(root: &Path) -> (Result<SupplySummary, WalkError>, Vec<QueueItem>) {
        let (sender, receiver) = entry_queue(64);
        let result = Supplier::new(Side::Left, root).run(sender).await;
        let items = receiver.collect::<Vec<_>>().await;
        (result, items)
    }

    fn paths(items: &[QueueItem], root: &Path) -> Vec<String> {
        items
            .iter()
            .filter_map(|item| match item {
                QueueItem::Entry(entry) => Some(
                    entry
                        .absolute_path
                        .strip_prefix(root)
                        .expect("Entry outside of root")
                        .to_string_lossy()
                        .into_owned(),
                ),
                QueueItem::Aborted => None,
            })
            .collect()
    }

    #[compio::test]
    async fn test_emits_regular_files_in_path_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/nested")).expect("Failed to create dirs");
        fs::create_dir_all(root.join("b")).expect("Failed to create dirs");
        fs::write(root.join("z.txt"), "z").expect("Failed to write file");
        fs::write(root.join("a-c"), "ac").expect("Failed to write file");
        fs::write(root.join("a/nested/deep"), "d").expect("Failed to write file");
        fs::write(root.join("a/x"), "x").expect("Failed to write file");
        fs::write(root.join("b/y"), "y").expect("Failed to write file");

        let (result, items) = collect(root).await;

        let summary = result.expect("Walk should succeed");
        assert_eq!(summary.entries, 5);
        assert_eq!(summary.errors, 0);
        assert_eq!(
            paths(&items, root),
            vec!["a/nested/deep", "a/x", "a-c", "b/y", "z.txt"]
        );
    }

    #[compio::test]
    async fn test_empty_root_closes_without_entries() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let (result, items) = collect(temp_dir.path()).await;

        assert_eq!(result.expect("Walk should succeed").entries, 0);
        assert!(items.is_empty());
    }

    #[cfg(unix)]
    #[compio::test]
    async fn test_skips_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("target"), "t").expect("Failed to write file");
        std::os::unix::fs::symlink(root.join("target"), root.join("link"))
            .expect("Failed to create symlink");

        let (_, items) = collect(root).await;

        assert_eq!(paths(&items, root), vec!["target"]);
    }

    #[compio::test]
    async fn test_missing_root_aborts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let (result, items) = collect(&missing).await;

        assert!(matches!(
            result,
            Err(WalkError::RootUnavailableError { side: Side::Left, .. })
        ));
        assert_eq!(items, vec![QueueItem::Aborted]);
    }

    #[compio::test]
    async fn test_file_root_aborts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("plain");
        fs::write(&file, "p").expect("Failed to write file");

        let (result, items) = collect(&file).await;

        assert!(matches!(
            result,
            Err(WalkError::RootNotDirectoryError { .. })
        ));
        assert_eq!(items, vec![QueueItem::Aborted]);
    }

    #[compio::test]
    async fn test_stops_when_receiver_is_dropped() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("one"), "1").expect("Failed to write file");
        let (sender, receiver) = entry_queue(1);
        drop(receiver);

        let summary = Supplier::new(Side::Right, temp_dir.path())
            .run(sender)
            .await
            .expect("Cancellation is not an error");

        assert!(summary.canceled);
        assert_eq!(summary.entries, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_attributes_keep_entry_and_count_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let vanished = temp_dir.path().join("vanished");
        let supplier = Supplier::new(Side::Left, temp_dir.path());
        let mut summary = SupplySummary::default();

        let entry = supplier.load_entry(&vanished, &mut summary);

        assert_eq!(entry.absolute_path, vanished);
        assert!(entry.attributes.is_empty());
        assert_eq!(summary.errors, 1);
        assert!(!summary.canceled);
    }

    #[test]
    fn test_walk_error_display() {
        let error = WalkError::RootNotDirectoryError {
            side: Side::Right,
            root: PathBuf::from("/tmp/file"),
        };

        assert_eq!(error.to_string(), "right root /tmp/file is not a directory");
    }
}
