use super::outcome::{OutcomeKind, TestOutcome};
use crate::core::models::structure::AtomicStructure;
use crate::engine::threshold::Threshold;
use crate::engine::validator::{ComparisonResult, StructureValidator};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// The verdict a case expects from the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    #[default]
    Match,
    Differ,
}

/// A named comparison of a test structure against a reference structure.
#[derive(Debug, Clone)]
pub struct ValidationCase {
    pub name: String,
    pub test: Arc<AtomicStructure>,
    pub reference: Arc<AtomicStructure>,
    /// Threshold in its string form; `None` defers to the suite's default threshold.
    pub threshold: Option<String>,
    pub expect: Expectation,
    /// The case is known to fail; a failure is then reported as expected.
    pub expected_failure: bool,
    /// Reason for skipping the case, if it should not run.
    pub skip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub name: String,
    pub outcome: TestOutcome,
    pub duration: Duration,
    /// Absent when the case was skipped or the validator returned an error.
    pub comparison: Option<ComparisonResult>,
}

impl ValidationCase {
    pub fn new(name: &str, test: Arc<AtomicStructure>, reference: Arc<AtomicStructure>) -> Self {
        Self {
            name: name.to_string(),
            test,
            reference,
            threshold: None,
            expect: Expectation::Match,
            expected_failure: false,
            skip: None,
        }
    }

    pub fn with_threshold(mut self, threshold: &str) -> Self {
        self.threshold = Some(threshold.to_string());
        self
    }

    pub fn expecting(mut self, expect: Expectation) -> Self {
        self.expect = expect;
        self
    }

    pub fn expected_failure(mut self, expected_failure: bool) -> Self {
        self.expected_failure = expected_failure;
        self
    }

    pub fn skipped(mut self, reason: &str) -> Self {
        self.skip = Some(reason.to_string());
        self
    }

    /// Runs the comparison and classifies the verdict.
    ///
    /// Skipped cases never reach the validator. Errors from the validator, including an
    /// unparseable threshold, become [`OutcomeKind::Error`], or
    /// [`OutcomeKind::ExpectedFailure`] when the case is flagged as such. Otherwise the
    /// verdict is checked against [`expect`](Self::expect) and the `expected_failure` flag
    /// decides between success/fail and their inverted counterparts.
    pub fn run(&self, validator: &StructureValidator, default_threshold: &Threshold) -> CaseResult {
        let start = Instant::now();
        let (outcome, comparison) = self.evaluate(validator, default_threshold);
        let duration = start.elapsed();

        debug!(case = %self.name, outcome = %outcome.kind, ?duration, "Case finished.");
        CaseResult {
            name: self.name.clone(),
            outcome,
            duration,
            comparison,
        }
    }

    fn evaluate(
        &self,
        validator: &StructureValidator,
        default_threshold: &Threshold,
    ) -> (TestOutcome, Option<ComparisonResult>) {
        if let Some(reason) = &self.skip {
            return (TestOutcome::new(OutcomeKind::Skip, reason.as_str()), None);
        }

        let validated = match &self.threshold {
            Some(text) => text.parse::<Threshold>(),
            None => Ok(*default_threshold),
        }
        .and_then(|threshold| validator.validate(&self.test, &self.reference, &threshold));

        let comparison = match validated {
            Ok(comparison) => comparison,
            Err(e) => {
                let kind = if self.expected_failure {
                    OutcomeKind::ExpectedFailure
                } else {
                    OutcomeKind::Error
                };
                return (TestOutcome::new(kind, e.to_string()), None);
            }
        };

        let met = comparison.passed == (self.expect == Expectation::Match);
        let outcome = match (met, self.expected_failure) {
            (true, false) => TestOutcome::success(),
            (true, true) => TestOutcome::unexpected_success(),
            (false, expected_failure) => {
                let kind = if expected_failure {
                    OutcomeKind::ExpectedFailure
                } else {
                    OutcomeKind::Fail
                };
                TestOutcome::new(kind, self.describe_mismatch(&comparison))
            }
        };
        (outcome, Some(comparison))
    }

    fn describe_mismatch(&self, comparison: &ComparisonResult) -> String {
        match (self.expect, comparison.failed_stage) {
            (Expectation::Match, Some(stage)) => match comparison.rmsd {
                Some(rmsd) => format!(
                    "'{}' does not match '{}': {stage} (RMSD {rmsd:.4} >= {:.4})",
                    self.test.name(),
                    self.reference.name(),
                    comparison.threshold
                ),
                None => format!(
                    "'{}' does not match '{}': {stage}",
                    self.test.name(),
                    self.reference.name()
                ),
            },
            _ => format!(
                "'{}' unexpectedly matches '{}' (RMSD {:.4} < {:.4})",
                self.test.name(),
                self.reference.name(),
                comparison.rmsd.unwrap_or(0.0),
                comparison.threshold
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn diatomic(name: &str, element: &str, length: f64) -> Arc<AtomicStructure> {
        let mut structure = AtomicStructure::new(name);
        structure.add_atom(Atom::new(element, "A1"), Point3::origin());
        structure.add_atom(Atom::new(element, "A2"), Point3::new(length, 0.0, 0.0));
        Arc::new(structure)
    }

    fn run(case: &ValidationCase) -> CaseResult {
        case.run(&StructureValidator::default(), &Threshold::Auto)
    }

    #[test]
    fn matching_structures_succeed() {
        let n2 = diatomic("n2", "N", 1.1);
        let result = run(&ValidationCase::new("identity", n2.clone(), n2));
        assert_eq!(result.outcome, TestOutcome::success());
        assert!(result.comparison.unwrap().passed);
    }

    #[test]
    fn differing_structures_fail() {
        let case = ValidationCase::new("swap", diatomic("a", "N", 1.1), diatomic("b", "O", 1.1));
        let result = run(&case);
        assert_eq!(result.outcome.kind, OutcomeKind::Fail);
        assert!(result.outcome.message.contains("bad elements"));
    }

    #[test]
    fn differ_expectation_inverts_the_verdict() {
        let case = ValidationCase::new("swap", diatomic("a", "N", 1.1), diatomic("b", "O", 1.1))
            .expecting(Expectation::Differ);
        assert_eq!(run(&case).outcome.kind, OutcomeKind::Success);

        let n2 = diatomic("n2", "N", 1.1);
        let case = ValidationCase::new("same", n2.clone(), n2).expecting(Expectation::Differ);
        let result = run(&case);
        assert_eq!(result.outcome.kind, OutcomeKind::Fail);
        assert!(result.outcome.message.contains("unexpectedly matches"));
    }

    #[test]
    fn expected_failure_flag_flips_both_ways() {
        let case = ValidationCase::new("stretch", diatomic("a", "N", 1.1), diatomic("b", "N", 3.0))
            .expected_failure(true);
        assert_eq!(run(&case).outcome.kind, OutcomeKind::ExpectedFailure);

        let n2 = diatomic("n2", "N", 1.1);
        let case = ValidationCase::new("identity", n2.clone(), n2).expected_failure(true);
        assert_eq!(run(&case).outcome, TestOutcome::unexpected_success());
    }

    #[test]
    fn skipped_cases_never_run() {
        let n2 = diatomic("n2", "N", 1.1);
        let case = ValidationCase::new("later", n2.clone(), n2)
            .with_threshold("bogus")
            .skipped("not ready");
        let result = run(&case);
        assert_eq!(result.outcome, TestOutcome::new(OutcomeKind::Skip, "not ready"));
        assert!(result.comparison.is_none());
    }

    #[test]
    fn bad_threshold_is_an_error() {
        let n2 = diatomic("n2", "N", 1.1);
        let case = ValidationCase::new("bad", n2.clone(), n2).with_threshold("normal");
        let result = run(&case);
        assert_eq!(result.outcome.kind, OutcomeKind::Error);
        assert!(result.outcome.message.contains("Bad threshold"));
    }

    #[test]
    fn errors_count_as_expected_failures_when_flagged() {
        let n2 = diatomic("n2", "N", 1.1);
        let case = ValidationCase::new("bad", n2.clone(), n2)
            .with_threshold("normal")
            .expected_failure(true);
        let result = run(&case);
        assert_eq!(result.outcome.kind, OutcomeKind::ExpectedFailure);
        assert!(result.outcome.message.contains("Bad threshold"));
        assert!(result.comparison.is_none());

        let mut broken = AtomicStructure::new("broken");
        broken.add_atom(Atom::new("N", "A1"), Point3::origin());
        broken.add_atom(Atom::new("N", "A2"), Point3::new(f64::NAN, 0.0, 0.0));
        let case = ValidationCase::new("nan", Arc::new(broken), diatomic("n2", "N", 1.1))
            .expected_failure(true);
        assert_eq!(run(&case).outcome.kind, OutcomeKind::ExpectedFailure);
    }

    #[test]
    fn case_threshold_overrides_default() {
        let case = ValidationCase::new("stretch", diatomic("a", "N", 1.1), diatomic("b", "N", 1.3))
            .with_threshold("0.5");
        let result = case.run(&StructureValidator::default(), &Threshold::Value(1e-9));
        assert_eq!(result.outcome.kind, OutcomeKind::Success);
        assert_eq!(result.comparison.unwrap().threshold, 0.5);
    }
}
