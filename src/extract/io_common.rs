use std::path::Path;

use precinct_results::Cell;

pub const STDOUT: &str = "stdout";

/// Resolves a path relative to a directory. Absolute paths and `stdout` are kept.
pub fn resolve_path(root: &Path, path: &str) -> String {
    if path == STDOUT || Path::new(path).is_absolute() {
        return path.to_string();
    }
    root.join(path).display().to_string()
}

/// For inputs that do not distinguish blank cells from empty text.
pub fn text_to_cell(text: String) -> Cell {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
