//! Build output asset discovery.

use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use stripfont_font_container::ContainerKind;

use crate::{
    Result, StripError,
    config::{CODE_EXTENSIONS, FONT_EXTENSIONS, FONT_STEM, STYLESHEET_EXTENSIONS},
};

/// Generated code to scan for icon usage, sorted by path.
pub fn code_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    find(dir, "*", CODE_EXTENSIONS)
}

/// Stylesheets to prune, sorted by path.
pub fn stylesheets(dir: &Path) -> Result<Vec<PathBuf>> {
    find(dir, "*", STYLESHEET_EXTENSIONS)
}

/// Icon font assets with their container kind, sorted by path.
pub fn icon_fonts(dir: &Path) -> Result<Vec<(PathBuf, ContainerKind)>> {
    let stem = format!("{}*", Pattern::escape(FONT_STEM));
    Ok(find(dir, &stem, FONT_EXTENSIONS)?
        .into_iter()
        .filter_map(|path| ContainerKind::from_path(&path).map(|kind| (path, kind)))
        .collect())
}

/// Finds regular files under `dir` named `<stem>.<ext>` for any of `extensions`.
fn find(dir: &Path, stem: &str, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let root = Pattern::escape(&dir.to_string_lossy());

    let mut paths = Vec::new();
    for extension in extensions {
        let pattern = format!("{root}/**/{stem}.{extension}");
        let entries = glob(&pattern).map_err(|source| StripError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        paths.extend(entries.filter_map(|entry| entry.ok()).filter(|path| path.is_file()));
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}
