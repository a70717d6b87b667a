//! BDD project skeleton scaffolding.

use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// The standard layout: step definitions, page objects, feature files.
pub const BDD_DIRS: &[&str] = &[
    "src/test/java/stepDefinitions",
    "src/test/java/pages",
    "src/test/resources/features",
];

/// Create the BDD folder structure under `base/name`. Existing directories
/// are left alone, so re-running on the same project is harmless.
pub fn scaffold_bdd_project(name: &str, base: &Path) -> Result<PathBuf, EngineError> {
    let root = base.join(name);
    for dir in BDD_DIRS {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).map_err(|e| EngineError::Io {
            context: format!("creating {}", path.display()),
            source: e,
        })?;
    }
    Ok(root)
}
