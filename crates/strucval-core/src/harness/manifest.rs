//! TOML suite manifests.
//!
//! A manifest declares structures literally (atoms, coordinates, bonds) and the cases that
//! compare them:
//!
//! ```toml
//! name = "water"
//!
//! [[structures]]
//! name = "ref"
//! atoms = [
//!     { element = "O", label = "O1", coord = [0.0, 0.0, 0.0] },
//!     { element = "H", label = "H1", coord = [0.96, 0.0, 0.0] },
//! ]
//! bonds = [[0, 1]]
//!
//! [[cases]]
//! name = "identity"
//! test = "ref"
//! reference = "ref"
//! ```

use super::case::{Expectation, ValidationCase};
use super::registry::TestProvider;
use crate::core::models::atom::Atom;
use crate::core::models::structure::{AtomicStructure, StructureError};
use crate::core::models::topology::BondKind;
use crate::core::utils::elements::is_known_element;
use nalgebra::Point3;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Structure '{0}' is defined more than once")]
    DuplicateStructure(String),
    #[error("Case '{0}' is defined more than once")]
    DuplicateCase(String),
    #[error("Invalid structure '{structure}': {source}")]
    Structure {
        structure: String,
        source: StructureError,
    },
    #[error("Case '{case}' refers to undefined structure '{structure}'")]
    UndefinedStructure { case: String, structure: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawManifest {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    structures: Vec<RawStructure>,
    #[serde(default)]
    cases: Vec<RawCase>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawStructure {
    name: String,
    atoms: Vec<RawAtom>,
    #[serde(default)]
    bonds: Vec<[usize; 2]>,
    #[serde(default)]
    pseudo_bonds: Vec<[usize; 2]>,
    /// Additional coordinate frames after the one given by the atoms.
    #[serde(default)]
    frames: Vec<Vec<[f64; 3]>>,
    #[serde(default)]
    active_frame: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAtom {
    element: String,
    #[serde(default)]
    label: String,
    coord: [f64; 3],
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawCase {
    name: String,
    test: String,
    reference: String,
    #[serde(default)]
    threshold: Option<RawThreshold>,
    #[serde(default)]
    expect: Expectation,
    #[serde(default)]
    expected_failure: bool,
    #[serde(default)]
    skip: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawThreshold {
    Number(f64),
    Text(String),
}

impl RawThreshold {
    fn into_text(self) -> String {
        match self {
            RawThreshold::Number(value) => value.to_string(),
            RawThreshold::Text(text) => text,
        }
    }
}

/// A loaded manifest: named structures and the cases comparing them.
#[derive(Debug, Clone)]
pub struct Manifest {
    name: String,
    description: Option<String>,
    structures: Vec<Arc<AtomicStructure>>,
    cases: Vec<ValidationCase>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawManifest = toml::from_str(&content).map_err(|e| ManifestError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let manifest = Self::from_raw(raw)?;
        info!(
            path = %path.display(),
            name = %manifest.name,
            structures = manifest.structures.len(),
            cases = manifest.cases.len(),
            "Loaded manifest."
        );
        Ok(manifest)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| ManifestError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawManifest) -> Result<Self, ManifestError> {
        let mut by_name: HashMap<String, Arc<AtomicStructure>> = HashMap::new();
        let mut structures = Vec::with_capacity(raw.structures.len());
        for raw_structure in raw.structures {
            let name = raw_structure.name.clone();
            if by_name.contains_key(&name) {
                return Err(ManifestError::DuplicateStructure(name));
            }
            let structure = Arc::new(build_structure(raw_structure).map_err(|source| {
                ManifestError::Structure {
                    structure: name.clone(),
                    source,
                }
            })?);
            by_name.insert(name, Arc::clone(&structure));
            structures.push(structure);
        }

        let lookup = |case: &str, structure: &str| {
            by_name
                .get(structure)
                .cloned()
                .ok_or_else(|| ManifestError::UndefinedStructure {
                    case: case.to_string(),
                    structure: structure.to_string(),
                })
        };

        let mut cases: Vec<ValidationCase> = Vec::with_capacity(raw.cases.len());
        for raw_case in raw.cases {
            if cases.iter().any(|c| c.name == raw_case.name) {
                return Err(ManifestError::DuplicateCase(raw_case.name));
            }
            let test = lookup(&raw_case.name, &raw_case.test)?;
            let reference = lookup(&raw_case.name, &raw_case.reference)?;
            cases.push(ValidationCase {
                name: raw_case.name,
                test,
                reference,
                threshold: raw_case.threshold.map(RawThreshold::into_text),
                expect: raw_case.expect,
                expected_failure: raw_case.expected_failure,
                skip: raw_case.skip,
            });
        }

        Ok(Self {
            name: raw.name,
            description: raw.description,
            structures,
            cases,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structures(&self) -> &[Arc<AtomicStructure>] {
        &self.structures
    }

    pub fn structure(&self, name: &str) -> Option<&Arc<AtomicStructure>> {
        self.structures.iter().find(|s| s.name() == name)
    }
}

impl TestProvider for Manifest {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn cases(&self) -> Vec<ValidationCase> {
        self.cases.clone()
    }
}

fn build_structure(raw: RawStructure) -> Result<AtomicStructure, StructureError> {
    let mut structure = AtomicStructure::new(&raw.name);
    for atom in &raw.atoms {
        if !is_known_element(atom.element.trim()) {
            warn!(
                structure = %raw.name,
                element = %atom.element,
                "Unknown element symbol; it will still be compared literally."
            );
        }
        let [x, y, z] = atom.coord;
        structure.add_atom(Atom::new(&atom.element, &atom.label), Point3::new(x, y, z));
    }

    for [a, b] in raw.bonds {
        structure.add_bond(a, b, BondKind::Covalent)?;
    }
    for [a, b] in raw.pseudo_bonds {
        structure.add_bond(a, b, BondKind::Pseudo)?;
    }

    for frame in raw.frames {
        let points = frame
            .into_iter()
            .map(|[x, y, z]| Point3::new(x, y, z))
            .collect();
        structure.add_frame(points)?;
    }
    structure.set_active_frame(raw.active_frame)?;

    Ok(structure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const WATER: &str = r#"
name = "water"
description = "water against itself"

[[structures]]
name = "ref"
atoms = [
    { element = "O", label = "O1", coord = [0.0, 0.0, 0.0] },
    { element = "H", label = "H1", coord = [0.96, 0.0, 0.0] },
    { element = "H", label = "H2", coord = [-0.24, 0.93, 0.0] },
]
bonds = [[0, 1], [0, 2]]
frames = [[[0.0, 0.0, 0.0], [0.9, 0.0, 0.0], [-0.24, 0.93, 0.0]]]

[[cases]]
name = "identity"
test = "ref"
reference = "ref"

[[cases]]
name = "numeric"
test = "ref"
reference = "ref"
threshold = 1
expect = "match"
expected-failure = true
skip = "not today"

[[cases]]
name = "preset"
test = "ref"
reference = "ref"
threshold = "tight"
expect = "differ"
"#;

    #[test]
    fn loads_structures_and_cases() {
        let manifest = Manifest::from_toml_str(WATER).unwrap();
        assert_eq!(TestProvider::name(&manifest), "water");
        assert_eq!(manifest.description(), Some("water against itself"));

        let water = manifest.structure("ref").unwrap();
        assert_eq!(water.num_atoms(), 3);
        assert_eq!(water.num_frames(), 2);
        assert_eq!(water.active_frame_index(), 0);
        assert_eq!(water.bonded_neighbors(0), Some(&[1, 2][..]));

        let cases = manifest.cases();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].threshold, None);
        assert_eq!(cases[0].expect, Expectation::Match);
        assert_eq!(cases[1].threshold.as_deref(), Some("1"));
        assert!(cases[1].expected_failure);
        assert_eq!(cases[1].skip.as_deref(), Some("not today"));
        assert_eq!(cases[2].threshold.as_deref(), Some("tight"));
        assert_eq!(cases[2].expect, Expectation::Differ);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(WATER.as_bytes()).unwrap();
        let manifest = Manifest::load(file.path()).unwrap();
        assert_eq!(manifest.structures().len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Manifest::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let content = r#"
name = "x"
colour = "blue"
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(ManifestError::Toml { .. })
        ));
    }

    #[test]
    fn out_of_range_bonds_are_rejected() {
        let content = r#"
name = "x"
[[structures]]
name = "s"
atoms = [{ element = "C", coord = [0.0, 0.0, 0.0] }]
bonds = [[0, 3]]
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(ManifestError::Structure {
                source: StructureError::AtomIndexOutOfRange { index: 3, len: 1 },
                ..
            })
        ));
    }

    #[test]
    fn short_frames_are_rejected() {
        let content = r#"
name = "x"
[[structures]]
name = "s"
atoms = [
    { element = "C", coord = [0.0, 0.0, 0.0] },
    { element = "C", coord = [1.5, 0.0, 0.0] },
]
frames = [[[0.0, 0.0, 0.0]]]
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(ManifestError::Structure {
                source: StructureError::FrameLengthMismatch {
                    expected: 2,
                    found: 1
                },
                ..
            })
        ));
    }

    #[test]
    fn duplicate_structures_are_rejected() {
        let content = r#"
name = "x"
[[structures]]
name = "s"
atoms = []
[[structures]]
name = "s"
atoms = []
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(ManifestError::DuplicateStructure(name)) if name == "s"
        ));
    }

    #[test]
    fn undefined_structures_are_rejected() {
        let content = r#"
name = "x"
[[structures]]
name = "s"
atoms = []
[[cases]]
name = "c"
test = "s"
reference = "missing"
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(ManifestError::UndefinedStructure { case, structure })
                if case == "c" && structure == "missing"
        ));
    }

    #[test]
    fn duplicate_cases_are_rejected() {
        let content = r#"
name = "x"
[[structures]]
name = "s"
atoms = []
[[cases]]
name = "c"
test = "s"
reference = "s"
[[cases]]
name = "c"
test = "s"
reference = "s"
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(ManifestError::DuplicateCase(name)) if name == "c"
        ));
    }
}
