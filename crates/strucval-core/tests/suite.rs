use std::fs;
use strucval::engine::config::SuiteConfigBuilder;
use strucval::engine::progress::ProgressReporter;
use strucval::engine::threshold::Threshold;
use strucval::harness::error::HarnessError;
use strucval::harness::filter::NameFilter;
use strucval::harness::manifest::Manifest;
use strucval::harness::outcome::OutcomeKind;
use strucval::harness::registry::TestRegistry;
use strucval::workflows::suite;
use tempfile::TempDir;

const METHANOL: &str = r#"
name = "methanol"

[[structures]]
name = "reference"
atoms = [
    { element = "C", label = "C1", coord = [-0.047, 0.665, 0.000] },
    { element = "O", label = "O1", coord = [-0.047, -0.758, 0.000] },
    { element = "H", label = "H1", coord = [-1.086, 0.975, 0.000] },
    { element = "H", label = "H2", coord = [0.437, 1.071, 0.890] },
    { element = "H", label = "H3", coord = [0.437, 1.071, -0.890] },
    { element = "H", label = "HO", coord = [0.897, -1.010, 0.000] },
]
bonds = [[0, 1], [0, 2], [0, 3], [0, 4], [1, 5]]

[[structures]]
name = "rotated"
atoms = [
    { element = "C", label = "C1", coord = [9.335, 9.953, 10.000] },
    { element = "O", label = "O1", coord = [10.758, 9.953, 10.000] },
    { element = "H", label = "H1", coord = [9.025, 8.914, 10.000] },
    { element = "H", label = "H2", coord = [8.929, 10.437, 10.890] },
    { element = "H", label = "H3", coord = [8.929, 10.437, 9.110] },
    { element = "H", label = "HO", coord = [11.010, 10.897, 10.000] },
]
bonds = [[1, 0], [2, 0], [3, 0], [4, 0], [5, 1]]

[[structures]]
name = "broken"
atoms = [
    { element = "C", label = "C1", coord = [-0.047, 0.665, 0.000] },
    { element = "O", label = "O1", coord = [-0.047, -0.758, 0.000] },
    { element = "H", label = "H1", coord = [-1.086, 0.975, 0.000] },
    { element = "H", label = "H2", coord = [0.437, 1.071, 0.890] },
    { element = "H", label = "H3", coord = [0.437, 1.071, -0.890] },
    { element = "H", label = "HO", coord = [0.897, -1.010, 0.000] },
]
bonds = [[0, 1], [0, 2], [0, 3], [0, 4]]

[[cases]]
name = "identity"
test = "reference"
reference = "reference"

[[cases]]
name = "rotated"
test = "rotated"
reference = "reference"

[[cases]]
name = "missing-bond"
test = "broken"
reference = "reference"
expect = "differ"

[[cases]]
name = "bad-token"
test = "reference"
reference = "reference"
threshold = "normal"

[[cases]]
name = "known-issue"
test = "broken"
reference = "reference"
expected-failure = true
"#;

const WATER: &str = r#"
name = "water"

[[structures]]
name = "water"
atoms = [
    { element = "O", label = "O1", coord = [0.0, 0.0, 0.0] },
    { element = "H", label = "H1", coord = [0.96, 0.0, 0.0] },
    { element = "H", label = "H2", coord = [-0.24, 0.93, 0.0] },
]
bonds = [[0, 1], [0, 2]]

[[cases]]
name = "identity"
test = "water"
reference = "water"
threshold = 0.001
"#;

fn registry_from_files() -> (TempDir, TestRegistry) {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TestRegistry::new();
    for (file, content) in [("methanol.toml", METHANOL), ("water.toml", WATER)] {
        let path = dir.path().join(file);
        fs::write(&path, content).unwrap();
        registry
            .register(Box::new(Manifest::load(&path).unwrap()))
            .unwrap();
    }
    (dir, registry)
}

#[test]
fn manifests_run_end_to_end() {
    let (_dir, registry) = registry_from_files();
    let config = SuiteConfigBuilder::new().build().unwrap();

    let report = suite::run(
        &registry,
        &["all"],
        &NameFilter::default(),
        &config,
        &ProgressReporter::new(),
    )
    .unwrap();

    let outcomes: Vec<_> = report
        .results()
        .map(|(group, result)| (group, result.name.as_str(), result.outcome.kind))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("methanol", "identity", OutcomeKind::Success),
            ("methanol", "rotated", OutcomeKind::Success),
            ("methanol", "missing-bond", OutcomeKind::Success),
            ("methanol", "bad-token", OutcomeKind::Error),
            ("methanol", "known-issue", OutcomeKind::ExpectedFailure),
            ("water", "identity", OutcomeKind::Success),
        ]
    );
    assert!(!report.all_passed());
    assert_eq!(report.log.first().map(String::as_str), Some("methanol:"));
    assert!(report.log.iter().any(|l| l.starts_with("Ran 5 tests in ")));
    assert!(report.log.iter().any(|l| l.starts_with("Ran 1 tests in ")));
}

#[test]
fn selection_and_filter_narrow_the_run() {
    let (_dir, registry) = registry_from_files();
    let config = SuiteConfigBuilder::new()
        .debug(true)
        .default_threshold(Threshold::Value(0.01))
        .build()
        .unwrap();

    let report = suite::run(
        &registry,
        &["methanol"],
        &NameFilter::new("ROT"),
        &config,
        &ProgressReporter::new(),
    )
    .unwrap();

    assert_eq!(report.total_tests(), 1);
    assert!(report.all_passed());
    let comparison = report.groups[0].results[0].comparison.as_ref().unwrap();
    assert_eq!(comparison.threshold, 0.01);
    assert!(!comparison.trace.is_empty());
}

#[test]
fn unknown_selection_names_are_errors() {
    let (_dir, registry) = registry_from_files();
    let config = SuiteConfigBuilder::new().build().unwrap();

    let result = suite::run(
        &registry,
        &["ethanol"],
        &NameFilter::default(),
        &config,
        &ProgressReporter::new(),
    );
    assert!(matches!(
        result,
        Err(HarnessError::UnknownProvider { name, .. }) if name == "ethanol"
    ));
}
