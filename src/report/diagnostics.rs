use std::error::Error;
use std::io::{self, Write};
use std::sync::OnceLock;

use colored::Colorize;
use snafu::CleanedErrorText;

/// Renders an error and its sources on one line, `outer: inner: root cause`.
pub fn error_message(error: &dyn Error) -> String {
    CleanedErrorText::new(error)
        .map(|(_, text, _)| text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(": ")
}

/// Writes `error: <message>` to stderr. Safe to call from any thread.
pub fn report_error(error: &dyn Error) {
    let prefix = if stderr_supports_color() {
        "error".red().bold().to_string()
    } else {
        "error".to_string()
    };
    // Nothing sensible left to do if stderr itself is gone
    let _ = writeln!(io::stderr().lock(), "{prefix}: {}", error_message(error));
}

/// Writes an informational line to stderr, used by verbose mode.
pub fn report_note(message: impl std::fmt::Display) {
    let _ = writeln!(io::stderr().lock(), "{message}");
}

fn stderr_supports_color() -> bool {
    static SUPPORTED: OnceLock<bool> = OnceLock::new();
    *SUPPORTED.get_or_init(|| supports_color::on(supports_color::Stream::Stderr).is_some())
}
