use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser as _;

use crate::application::data::LogLevel;
use crate::compare::AbortPolicy;
use crate::queue::DEFAULT_QUEUE_CAPACITY;

/// Report regular files and extended attributes that differ between two trees
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Left (source) root
    pub left: PathBuf,
    /// Right (destination) root
    pub right: PathBuf,

    /// Print progress and what is being compared to stderr
    #[clap(long, short)]
    pub verbose: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Entries a walker may get ahead of the comparison
    #[clap(long, default_value_t = DEFAULT_QUEUE_CAPACITY, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    pub queue_capacity: usize,

    /// What to do with the other side when one root cannot be walked
    #[clap(long, default_value = "suppress", value_enum)]
    pub on_abort: AbortPolicy,
}
