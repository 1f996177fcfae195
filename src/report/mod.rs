//! Output of the tool: findings on stdout, `error:` diagnostics and progress
//! on stderr. Internal logging goes through `tracing` instead.

mod diagnostics;
mod reporter;

pub use diagnostics::{report_error, report_note};
#[cfg(test)]
pub use reporter::MemoryReporter;
pub use reporter::{ConsoleReporter, Reporter};
