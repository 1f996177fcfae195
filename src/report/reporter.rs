use std::io::{self, Write};

use crate::compare::{Finding, Progress};

/// Receives the output of a comparison as it is produced
pub trait Reporter {
    fn finding(&mut self, finding: &Finding) -> io::Result<()>;
    fn progress(&mut self, progress: &Progress) -> io::Result<()>;
}

/// Findings on stdout, progress on stderr, one line each
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn finding(&mut self, finding: &Finding) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{finding}")
    }

    fn progress(&mut self, progress: &Progress) -> io::Result<()> {
        writeln!(io::stderr().lock(), "{progress}")
    }
}

/// Keeps everything in memory, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub findings: Vec<Finding>,
    pub progress: Vec<Progress>,
}

#[cfg(test)]
impl MemoryReporter {
    pub fn lines(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
impl Reporter for MemoryReporter {
    fn finding(&mut self, finding: &Finding) -> io::Result<()> {
        self.findings.push(finding.clone());
        Ok(())
    }

    fn progress(&mut self, progress: &Progress) -> io::Result<()> {
        self.progress.push(*progress);
        Ok(())
    }
}
