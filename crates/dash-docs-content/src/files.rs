// crates/dash-docs-content/src/files.rs
// ============================================================================
// Module: Collection Files
// Description: Deterministic directory walking for content collections.
// Purpose: List collection files by extension in stable order.
// Dependencies: std
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::ContentError;

/// Recursively lists files under `root` whose extension is in `extensions`,
/// sorted by path. Entries whose name starts with `.` are skipped.
pub(crate) fn collect_files(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, ContentError> {
    if !root.is_dir() {
        return Err(ContentError::Io(format!("not a directory: {}", root.display())));
    }
    let mut files = Vec::new();
    collect_recursive(root, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

/// Walks one directory level.
fn collect_recursive(
    current: &Path,
    extensions: &[&str],
    files: &mut Vec<PathBuf>,
) -> Result<(), ContentError> {
    let entries = fs::read_dir(current).map_err(|err| ContentError::Io(err.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|err| ContentError::Io(err.to_string()))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, extensions, files)?;
        } else if path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extensions.contains(&extension))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Returns `path` relative to `root` with `/` separators.
pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/")
}
