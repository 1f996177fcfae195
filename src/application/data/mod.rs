mod log_level;
mod verdict;

pub use log_level::LogLevel;
pub use verdict::Verdict;
