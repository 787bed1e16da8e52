use super::case::CaseResult;
use super::outcome::OutcomeKind;
use super::report::{GroupReport, RunReport};
use std::collections::BTreeMap;
use std::time::Duration;

const SEPARATOR_WIDTH: usize = 70;

/// Bookkeeping for one run of the harness.
///
/// Results are recorded group by group. Each group produces a log block headed by the group
/// name, one line per case, and a trailer with the group's test count and time.
#[derive(Debug, Default)]
pub struct TestRunContext {
    groups: Vec<GroupReport>,
    count: usize,
    elapsed: Duration,
    tallies: BTreeMap<OutcomeKind, usize>,
    log: Vec<String>,
}

impl TestRunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a case result under `group`, starting a new group when it changes.
    pub fn record(&mut self, group: &str, result: CaseResult) {
        if self.current_group() != Some(group) {
            self.close_group();
            self.log.push(format!("{group}:"));
            self.groups.push(GroupReport::new(group));
            self.count = 0;
            self.elapsed = Duration::ZERO;
        }

        self.count += 1;
        self.elapsed += result.duration;
        *self.tallies.entry(result.outcome.kind).or_default() += 1;
        self.log.push(format_case_line(self.count, &result));

        if let Some(current) = self.groups.last_mut() {
            current.results.push(result);
        }
    }

    pub fn current_group(&self) -> Option<&str> {
        self.groups.last().map(|g| g.name.as_str())
    }

    /// Number of cases recorded in the current group.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Time spent in the cases of the current group.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tally(&self, kind: OutcomeKind) -> usize {
        self.tallies.get(&kind).copied().unwrap_or(0)
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    /// Writes the trailer of the current group, if one is open.
    fn close_group(&mut self) {
        if self.groups.is_empty() || self.count == 0 {
            return;
        }
        self.log.push(format!(
            "Ran {} tests in {:.3}s",
            self.count,
            self.elapsed.as_secs_f64()
        ));
        self.log.push("-".repeat(SEPARATOR_WIDTH));
        self.count = 0;
        self.elapsed = Duration::ZERO;
    }

    pub fn finish(mut self) -> RunReport {
        self.close_group();
        RunReport {
            groups: self.groups,
            tallies: self.tallies,
            log: self.log,
        }
    }
}

// Times are non-negative, so the sign column is always a blank.
fn format_case_line(index: usize, result: &CaseResult) -> String {
    format!(
        "    {:3}: {:<30}  {:.3}s  {}",
        index,
        result.name,
        result.duration.as_secs_f64(),
        result.outcome.kind.log_tag()
    )
}
