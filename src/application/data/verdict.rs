use std::process::ExitCode;

/// Overall result of a run, mapped onto the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No differences and no errors
    Identical,
    /// At least one difference, no errors
    Different,
    /// Something could not be read or compared
    Failed,
}

impl Verdict {
    pub fn from_counts(findings: u64, errors: u64) -> Self {
        match (findings, errors) {
            (_, 1..) => Verdict::Failed,
            (1.., 0) => Verdict::Different,
            (0, 0) => Verdict::Identical,
        }
    }

    pub fn exit_status(self) -> u8 {
        match self {
            Verdict::Identical => 0,
            Verdict::Different => 1,
            Verdict::Failed => 2,
        }
    }
}

impl From<Verdict> for ExitCode {
    fn from(verdict: Verdict) -> Self {
        ExitCode::from(verdict.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(0, 0, Verdict::Identical, 0)]
    #[case(3, 0, Verdict::Different, 1)]
    #[case(0, 1, Verdict::Failed, 2)]
    #[case(5, 2, Verdict::Failed, 2)]
    fn test_verdict_from_counts(
        #[case] findings: u64,
        #[case] errors: u64,
        #[case] verdict: Verdict,
        #[case] status: u8,
    ) {
        let actual = Verdict::from_counts(findings, errors);
        assert_eq!(actual, verdict);
        assert_eq!(actual.exit_status(), status);
    }
}
