pub mod list;
pub mod run;
pub mod tolerance;

use crate::error::Result;
use std::path::PathBuf;
use strucval::harness::manifest::Manifest;
use strucval::harness::registry::TestRegistry;
use tracing::info;

/// Loads every manifest and registers it as a test group under its declared name.
pub(crate) fn load_registry(paths: &[PathBuf]) -> Result<TestRegistry> {
    let mut registry = TestRegistry::new();
    for path in paths {
        let manifest = Manifest::load(path)?;
        registry.register(Box::new(manifest))?;
    }
    info!("Registered {} test group(s).", registry.len());
    Ok(registry)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub const WATER: &str = r#"
name = "water"
description = "Water against rigidly moved copies of itself"

[[structures]]
name = "ref"
atoms = [
    { element = "O", label = "O1", coord = [0.0, 0.0, 0.0] },
    { element = "H", label = "H1", coord = [0.96, 0.0, 0.0] },
    { element = "H", label = "H2", coord = [-0.24, 0.93, 0.0] },
]
bonds = [[0, 1], [0, 2]]

[[structures]]
name = "moved"
atoms = [
    { element = "O", label = "O1", coord = [10.0, 10.0, 10.0] },
    { element = "H", label = "H1", coord = [10.0, 10.96, 10.0] },
    { element = "H", label = "H2", coord = [9.07, 9.76, 10.0] },
]
bonds = [[0, 1], [0, 2]]

[[cases]]
name = "identity"
test = "ref"
reference = "ref"

[[cases]]
name = "rotated"
test = "moved"
reference = "ref"
"#;

    pub const BROKEN: &str = r#"
name = "broken"

[[structures]]
name = "a"
atoms = [
    { element = "C", label = "C1", coord = [0.0, 0.0, 0.0] },
    { element = "C", label = "C2", coord = [1.5, 0.0, 0.0] },
]

[[structures]]
name = "b"
atoms = [
    { element = "C", label = "C1", coord = [0.0, 0.0, 0.0] },
    { element = "C", label = "C2", coord = [2.5, 0.0, 0.0] },
]

[[cases]]
name = "stretched"
test = "b"
reference = "a"
"#;

    pub fn write_manifests(manifests: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let paths = manifests
            .iter()
            .map(|(file, content)| {
                let path = dir.path().join(file);
                fs::write(&path, content).unwrap();
                path
            })
            .collect();
        (dir, paths)
    }
}
