use crate::engine::config::SuiteConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::threshold::Threshold;
use crate::engine::validator::StructureValidator;
use crate::harness::case::{CaseResult, ValidationCase};
use crate::harness::context::TestRunContext;
use crate::harness::error::HarnessError;
use crate::harness::filter::NameFilter;
use crate::harness::registry::TestRegistry;
use crate::harness::report::RunReport;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

struct PlannedGroup {
    name: String,
    cases: Vec<ValidationCase>,
}

/// Runs the selected providers' cases and collects their outcomes.
///
/// Cases within a group may run concurrently, but results are recorded in declaration
/// order, so the report is the same whether or not the `parallel` feature is enabled.
#[instrument(skip_all, name = "suite_workflow")]
pub fn run<S: AsRef<str>>(
    registry: &TestRegistry,
    selection: &[S],
    filter: &NameFilter,
    config: &SuiteConfig,
    reporter: &ProgressReporter,
) -> Result<RunReport, HarnessError> {
    // === Phase 1: Selection ===
    reporter.report(Progress::PhaseStart { name: "Selection" });
    let plan = plan_groups(registry, selection, filter)?;
    let total: usize = plan.iter().map(|g| g.cases.len()).sum();
    info!(
        groups = plan.len(),
        cases = total,
        "Selected test cases."
    );
    if total == 0 {
        warn!("No test cases matched the selection.");
        reporter.report(Progress::Message(
            "No test cases matched the selection.".to_string(),
        ));
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Validation ===
    reporter.report(Progress::PhaseStart { name: "Validation" });
    reporter.report(Progress::TaskStart {
        total_steps: total as u64,
    });

    let validator = StructureValidator::new(config.validator);
    let mut context = TestRunContext::new();
    for group in plan {
        reporter.report(Progress::Message(format!(
            "{}: {} case(s)",
            group.name,
            group.cases.len()
        )));
        let results = run_cases(
            &group.cases,
            &validator,
            &config.default_threshold,
            reporter,
        );
        for result in results {
            reporter.report(Progress::CaseFinished {
                group: group.name.clone(),
                case: result.name.clone(),
                passed: !result.outcome.is_problem(),
            });
            context.record(&group.name, result);
        }
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let report = context.finish();
    info!(
        tests = report.total_tests(),
        all_passed = report.all_passed(),
        "Suite complete: {}.",
        report.summary()
    );
    Ok(report)
}

fn plan_groups<S: AsRef<str>>(
    registry: &TestRegistry,
    selection: &[S],
    filter: &NameFilter,
) -> Result<Vec<PlannedGroup>, HarnessError> {
    let providers = registry.resolve(selection)?;
    Ok(providers
        .into_iter()
        .filter_map(|provider| {
            let cases: Vec<_> = provider
                .cases()
                .into_iter()
                .filter(|case| filter.matches_case(provider.name(), &case.name))
                .collect();
            (!cases.is_empty()).then(|| PlannedGroup {
                name: provider.name().to_string(),
                cases,
            })
        })
        .collect())
}

fn run_cases(
    cases: &[ValidationCase],
    validator: &StructureValidator,
    default_threshold: &Threshold,
    reporter: &ProgressReporter,
) -> Vec<CaseResult> {
    #[cfg(not(feature = "parallel"))]
    let iterator = cases.iter();

    #[cfg(feature = "parallel")]
    let iterator = cases.par_iter();

    iterator
        .map(|case| {
            let result = case.run(validator, default_threshold);
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect()
}
