use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeKind {
    Success,
    Fail,
    Error,
    Skip,
    ExpectedFailure,
    UnexpectedSuccess,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 6] = [
        OutcomeKind::Success,
        OutcomeKind::Fail,
        OutcomeKind::Error,
        OutcomeKind::Skip,
        OutcomeKind::ExpectedFailure,
        OutcomeKind::UnexpectedSuccess,
    ];

    /// Status word printed at the end of a case's log line.
    pub fn log_tag(self) -> &'static str {
        match self {
            OutcomeKind::Success => "ok",
            OutcomeKind::Fail => "FAIL",
            OutcomeKind::Error => "ERROR",
            OutcomeKind::Skip => "skipped",
            OutcomeKind::ExpectedFailure => "expected failure",
            OutcomeKind::UnexpectedSuccess => "unexpected success",
        }
    }

    /// Whether this outcome makes the run unsuccessful.
    pub fn is_problem(self) -> bool {
        matches!(
            self,
            OutcomeKind::Fail | OutcomeKind::Error | OutcomeKind::UnexpectedSuccess
        )
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Success => "success",
            OutcomeKind::Fail => "fail",
            OutcomeKind::Error => "error",
            OutcomeKind::Skip => "skip",
            OutcomeKind::ExpectedFailure => "expected_failure",
            OutcomeKind::UnexpectedSuccess => "unexpected_success",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl TestOutcome {
    pub fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success() -> Self {
        Self::new(OutcomeKind::Success, "success!")
    }

    pub fn unexpected_success() -> Self {
        Self::new(
            OutcomeKind::UnexpectedSuccess,
            "I didn't expect to get this far...",
        )
    }

    pub fn is_problem(&self) -> bool {
        self.kind.is_problem()
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
