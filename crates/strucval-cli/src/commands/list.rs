use crate::cli::ListArgs;
use crate::error::Result;
use strucval::harness::filter::NameFilter;
use strucval::harness::registry::TestRegistry;

pub fn run(args: ListArgs) -> Result<()> {
    let registry = super::load_registry(&args.manifests)?;
    let filter = NameFilter::from(args.filter.as_deref());
    for line in render(&registry, &filter) {
        println!("{line}");
    }
    Ok(())
}

fn render(registry: &TestRegistry, filter: &NameFilter) -> Vec<String> {
    let mut lines = Vec::new();
    for provider in registry.iter() {
        let cases: Vec<_> = provider
            .cases()
            .into_iter()
            .filter(|case| filter.matches_case(provider.name(), &case.name))
            .collect();
        if cases.is_empty() {
            continue;
        }

        match provider.description() {
            Some(description) => lines.push(format!("{} - {description}", provider.name())),
            None => lines.push(provider.name().to_string()),
        }
        for case in cases {
            let mut line = format!("    {}", case.name);
            if let Some(reason) = &case.skip {
                line.push_str(&format!(" [skip: {reason}]"));
            }
            if case.expected_failure {
                line.push_str(" [expected failure]");
            }
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::*;
    use crate::commands::load_registry;

    #[test]
    fn lists_groups_with_their_cases() {
        let (_dir, paths) = write_manifests(&[("water.toml", WATER), ("broken.toml", BROKEN)]);
        let registry = load_registry(&paths).unwrap();
        assert_eq!(
            render(&registry, &NameFilter::default()),
            vec![
                "water - Water against rigidly moved copies of itself",
                "    identity",
                "    rotated",
                "broken",
                "    stretched",
            ]
        );
    }

    #[test]
    fn filter_hides_unmatched_groups() {
        let (_dir, paths) = write_manifests(&[("water.toml", WATER), ("broken.toml", BROKEN)]);
        let registry = load_registry(&paths).unwrap();
        assert_eq!(
            render(&registry, &NameFilter::new("ROT")),
            vec![
                "water - Water against rigidly moved copies of itself",
                "    rotated",
            ]
        );
    }
}
