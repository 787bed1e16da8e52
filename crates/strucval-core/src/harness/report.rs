use super::case::CaseResult;
use super::outcome::OutcomeKind;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub name: String,
    pub results: Vec<CaseResult>,
}

impl GroupReport {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            results: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }
}

/// Results of a harness run, grouped by provider in the order they ran.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
    pub tallies: BTreeMap<OutcomeKind, usize>,
    /// Per-group log blocks as produced by the run context.
    pub log: Vec<String>,
}

impl RunReport {
    pub fn total_tests(&self) -> usize {
        self.groups.iter().map(|g| g.results.len()).sum()
    }

    pub fn total_time(&self) -> Duration {
        self.groups.iter().map(GroupReport::elapsed).sum()
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.tallies.get(&kind).copied().unwrap_or(0)
    }

    pub fn group(&self, name: &str) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn results(&self) -> impl Iterator<Item = (&str, &CaseResult)> {
        self.groups
            .iter()
            .flat_map(|g| g.results.iter().map(move |r| (g.name.as_str(), r)))
    }

    /// `true` when no case failed, errored or succeeded against expectations.
    pub fn all_passed(&self) -> bool {
        !self.tallies.iter().any(|(kind, &n)| n > 0 && kind.is_problem())
    }

    /// One-line tally, e.g. `3 passed, 1 failed, 1 skipped`.
    pub fn summary(&self) -> String {
        OutcomeKind::ALL
            .iter()
            .filter_map(|&kind| {
                let n = self.count(kind);
                (n > 0).then(|| format!("{n} {}", summary_word(kind)))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn summary_word(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Success => "passed",
        OutcomeKind::Fail => "failed",
        OutcomeKind::Error => "errors",
        OutcomeKind::Skip => "skipped",
        OutcomeKind::ExpectedFailure => "expected failures",
        OutcomeKind::UnexpectedSuccess => "unexpected successes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::outcome::TestOutcome;

    fn report(kinds: &[OutcomeKind]) -> RunReport {
        let mut tallies: BTreeMap<OutcomeKind, usize> = BTreeMap::new();
        let results = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                *tallies.entry(kind).or_default() += 1;
                CaseResult {
                    name: format!("case{i}"),
                    outcome: TestOutcome::new(kind, ""),
                    duration: Duration::from_millis(10),
                    comparison: None,
                }
            })
            .collect();
        RunReport {
            groups: vec![GroupReport {
                name: "group".to_string(),
                results,
            }],
            tallies,
            log: Vec::new(),
        }
    }

    #[test]
    fn skips_and_expected_failures_do_not_fail_the_run() {
        let report = report(&[
            OutcomeKind::Success,
            OutcomeKind::Skip,
            OutcomeKind::ExpectedFailure,
        ]);
        assert!(report.all_passed());
        assert_eq!(report.total_tests(), 3);
        assert_eq!(report.total_time(), Duration::from_millis(30));
    }

    #[test]
    fn problems_fail_the_run() {
        for kind in [
            OutcomeKind::Fail,
            OutcomeKind::Error,
            OutcomeKind::UnexpectedSuccess,
        ] {
            assert!(!report(&[OutcomeKind::Success, kind]).all_passed());
        }
    }

    #[test]
    fn summary_lists_nonzero_tallies_in_fixed_order() {
        let report = report(&[
            OutcomeKind::Skip,
            OutcomeKind::Success,
            OutcomeKind::Success,
            OutcomeKind::Fail,
        ]);
        assert_eq!(report.summary(), "2 passed, 1 failed, 1 skipped");
        assert_eq!(report.results().count(), 4);
        assert!(report.group("group").is_some());
    }
}
