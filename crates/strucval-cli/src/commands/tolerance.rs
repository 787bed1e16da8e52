use crate::cli::ToleranceArgs;
use crate::error::{CliError, Result};
use strucval::engine::tolerance::{self, Sensitivity};
use strucval::harness::manifest::Manifest;

pub fn run(args: ToleranceArgs) -> Result<()> {
    for (sensitivity, value) in estimates(&args)? {
        println!("{sensitivity:<6}  {value:.6e}");
    }
    Ok(())
}

fn estimates(args: &ToleranceArgs) -> Result<Vec<(Sensitivity, f64)>> {
    let manifest = Manifest::load(&args.manifest)?;
    let structure = manifest.structure(&args.structure).ok_or_else(|| {
        CliError::Argument(format!(
            "Structure '{}' is not defined in manifest '{}'",
            args.structure,
            manifest.name()
        ))
    })?;

    let sensitivities = match args.sensitivity {
        Some(sensitivity) => vec![sensitivity],
        None => vec![Sensitivity::Tight, Sensitivity::Normal, Sensitivity::Loose],
    };
    Ok(sensitivities
        .into_iter()
        .map(|s| (s, tolerance::estimate(structure, s)))
        .collect())
}
