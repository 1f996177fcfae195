use std::path::PathBuf;

use crate::cli::Cli;
use crate::compare::AbortPolicy;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub left: PathBuf,
    pub right: PathBuf,
    pub verbose: bool,
    pub queue_capacity: usize,
    pub abort_policy: AbortPolicy,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            left: cli.left,
            right: cli.right,
            verbose: cli.verbose,
            queue_capacity: cli.queue_capacity,
            abort_policy: cli.on_abort,
        }
    }
}
