use super::checks::superposition::Degeneracy;
use super::checks::{connectivity, elements, superposition};
use super::config::ValidatorConfig;
use super::error::ValidationError;
use super::threshold::Threshold;
use super::trace::DebugTrace;
use crate::core::models::structure::AtomicStructure;
use std::fmt;
use tracing::{debug, instrument};

/// The check that decided a failed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Elements,
    Connectivity,
    Geometry,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Elements => "bad elements",
            Stage::Connectivity => "bad connectivity",
            Stage::Geometry => "bad geometry",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub passed: bool,
    /// `None` when the comparison passed.
    pub failed_stage: Option<Stage>,
    /// The resolved RMSD acceptance threshold.
    pub threshold: f64,
    /// Present once the geometry stage has run.
    pub rmsd: Option<f64>,
    pub degeneracy: Option<Degeneracy>,
    /// Bond pairs `(i, j)`, `i > j`, whose presence differs between the structures.
    pub differing_bonds: Vec<(usize, usize)>,
    /// Diagnostic lines; empty unless the validator runs in debug mode.
    pub trace: Vec<String>,
}

/// Decides whether a test structure and a reference structure describe the same molecule.
///
/// Runs element sequence, connectivity and superposition checks in that order and stops at
/// the first one that fails. Neither structure is modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureValidator {
    config: ValidatorConfig,
}

impl StructureValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn with_debug(debug: bool) -> Self {
        Self::new(ValidatorConfig { debug })
    }

    /// Compares `test` against `reference`.
    ///
    /// The threshold is resolved before any structural work, so an invalid threshold is
    /// reported even for structures that would fail an earlier check.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for invalid thresholds and malformed coordinates. Structural
    /// differences are reported through [`ComparisonResult::passed`], never as errors.
    #[instrument(skip_all, name = "structure_validation", fields(test = test.name(), reference = reference.name()))]
    pub fn validate(
        &self,
        test: &AtomicStructure,
        reference: &AtomicStructure,
        threshold: &Threshold,
    ) -> Result<ComparisonResult, ValidationError> {
        let threshold = threshold.resolve(reference)?;
        let mut trace = DebugTrace::new(self.config.debug);

        if trace.is_enabled() {
            trace.line(|| "ref and test:".to_string());
            for structure in [reference, test] {
                trace.line(|| structure.num_atoms().to_string());
                let raw: Vec<_> = structure.coords().iter().map(|p| p.coords).collect();
                trace.coordinates(structure.atoms(), &raw);
            }
        }

        let mut result = ComparisonResult {
            passed: false,
            failed_stage: None,
            threshold,
            rmsd: None,
            degeneracy: None,
            differing_bonds: Vec::new(),
            trace: Vec::new(),
        };

        if !elements::check(test, reference, &mut trace) {
            return Ok(Self::fail(result, Stage::Elements, trace));
        }

        let connectivity = connectivity::check(test, reference, &mut trace);
        if !connectivity.matches {
            result.differing_bonds = connectivity.differences;
            return Ok(Self::fail(result, Stage::Connectivity, trace));
        }

        let geometry = superposition::validate(test, reference, threshold, &mut trace)?;
        result.rmsd = Some(geometry.rmsd);
        result.degeneracy = geometry.degeneracy;
        if !geometry.passed {
            return Ok(Self::fail(result, Stage::Geometry, trace));
        }

        debug!(rmsd = geometry.rmsd, threshold, "Structures match.");
        result.passed = true;
        result.trace = trace.into_lines();
        Ok(result)
    }

    /// Like [`validate`](Self::validate), with the threshold given in its string form: a
    /// number, `"tight"` or `"loose"`. `None` means [`Threshold::Auto`].
    pub fn validate_str(
        &self,
        test: &AtomicStructure,
        reference: &AtomicStructure,
        threshold: Option<&str>,
    ) -> Result<ComparisonResult, ValidationError> {
        let threshold = match threshold {
            Some(text) => text.parse()?,
            None => Threshold::Auto,
        };
        self.validate(test, reference, &threshold)
    }

    fn fail(mut result: ComparisonResult, stage: Stage, mut trace: DebugTrace) -> ComparisonResult {
        trace.line(|| stage.to_string());
        debug!(%stage, rmsd = ?result.rmsd, threshold = result.threshold, "Structures differ.");
        result.failed_stage = Some(stage);
        result.trace = trace.into_lines();
        result
    }
}

/// Returns whether `test` and `reference` describe the same molecule.
///
/// Shorthand for [`StructureValidator::validate_str`] that keeps only the verdict.
pub fn validate_atomic_structures(
    test: &AtomicStructure,
    reference: &AtomicStructure,
    threshold: Option<&str>,
    debug: bool,
) -> Result<bool, ValidationError> {
    StructureValidator::with_debug(debug)
        .validate_str(test, reference, threshold)
        .map(|result| result.passed)
}
