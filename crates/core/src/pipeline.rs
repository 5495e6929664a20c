//! The two-phase stripping pipeline over a build output directory.
//!
//! [`scan_output`] feeds generated code into a caller-owned
//! [`UsageCollector`]. [`rewrite_output`] then prunes stylesheets and subsets
//! icon fonts against the collected [`UsageSet`]. Every rewritten asset is
//! computed in memory first and written only once all of them succeeded.

use std::path::{Path, PathBuf};

use log::{error, info, warn};
use rayon::prelude::*;
use stripfont_font_container::{self as container, ContainerKind};

use crate::{
    Options, Result, StripError, assets,
    io::AssetFile,
    stylesheet::prune,
    usage::{UsageCollector, UsageSet},
};

/// Scans the generated code under `dir` and returns the identifiers in use.
///
/// The collector keeps everything it has seen, so a later pass over another
/// output observes a superset of this one.
pub fn scan_output(dir: &Path, collector: &mut UsageCollector, options: &Options) -> Result<UsageSet> {
    let artifacts = assets::code_artifacts(dir)?;

    // Read in parallel, scan in path order
    let texts: Vec<Result<String>> = artifacts
        .par_iter()
        .map(|path| AssetFile::new(path).read_text())
        .collect();
    for text in texts {
        collector.scan(&text?);
    }
    collector.extend(&options.whitelist);

    let used = collector.snapshot();
    info!(
        "Scanned {} code artifacts in {}: {} icons in use",
        artifacts.len(),
        dir.display(),
        used.icon_count()
    );
    Ok(used)
}

/// What happened to one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stylesheet { kept: usize, removed: usize },
    Font { kind: ContainerKind, glyphs_before: u16, glyphs_after: u16 },
}

/// One rewritten asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub path: PathBuf,
    pub original_size: usize,
    pub new_size: usize,
    pub outcome: Outcome,
}

impl AssetReport {
    /// Size reduction in percent.
    pub fn reduction(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.new_size as f64 / self.original_size as f64) * 100.0
    }
}

/// The assets rewritten in one output directory, stylesheets first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub assets: Vec<AssetReport>,
}

impl RewriteReport {
    pub fn original_size(&self) -> usize {
        self.assets.iter().map(|a| a.original_size).sum()
    }

    pub fn new_size(&self) -> usize {
        self.assets.iter().map(|a| a.new_size).sum()
    }

    pub fn fonts(&self) -> impl Iterator<Item = &AssetReport> {
        self.assets.iter().filter(|a| matches!(a.outcome, Outcome::Font { .. }))
    }
}

enum Asset {
    Stylesheet(PathBuf),
    Font(PathBuf, ContainerKind),
}

struct Rewritten {
    /// New contents, or `None` when the asset is unchanged.
    data: Option<Vec<u8>>,
    report: AssetReport,
}

impl Asset {
    fn rewrite(&self, used: &UsageSet) -> Result<Rewritten> {
        match self {
            Asset::Stylesheet(path) => rewrite_stylesheet(path, used),
            Asset::Font(path, kind) => rewrite_font(path, *kind, used),
        }
    }
}

fn rewrite_stylesheet(path: &Path, used: &UsageSet) -> Result<Rewritten> {
    let original = AssetFile::new(path).read()?;
    let pruned = prune(&original, used);

    info!(
        "{}: removed {} icon rules, kept {}",
        path.display(),
        pruned.removed,
        pruned.kept
    );

    let report = AssetReport {
        path: path.to_path_buf(),
        original_size: original.len(),
        new_size: pruned.text.len(),
        outcome: Outcome::Stylesheet { kept: pruned.kept, removed: pruned.removed },
    };
    let data = pruned.changed().then_some(pruned.text);
    Ok(Rewritten { data, report })
}

fn rewrite_font(path: &Path, kind: ContainerKind, used: &UsageSet) -> Result<Rewritten> {
    let data = AssetFile::new(path).read()?;

    let font = container::decode(&data, kind)
        .map_err(|source| StripError::Decode { path: path.to_path_buf(), source })?;
    let glyphs_before = font.num_glyphs();

    let font = font
        .subset(used)
        .map_err(|source| StripError::Subset { path: path.to_path_buf(), source })?;
    let glyphs_after = font.num_glyphs();

    let encoded = container::encode(&font, kind)
        .map_err(|source| StripError::Encode { path: path.to_path_buf(), source })?;

    let report = AssetReport {
        path: path.to_path_buf(),
        original_size: data.len(),
        new_size: encoded.len(),
        outcome: Outcome::Font { kind, glyphs_before, glyphs_after },
    };
    info!(
        "{}: {glyphs_before} -> {glyphs_after} glyphs, {} -> {} bytes ({:.1}% smaller)",
        path.display(),
        report.original_size,
        report.new_size,
        report.reduction()
    );

    Ok(Rewritten { data: Some(encoded), report })
}

/// Prunes stylesheets and subsets icon fonts under `dir` in place.
///
/// Nothing is written unless every asset was rewritten successfully; on
/// failure every error is logged and the first one is returned. Stylesheets
/// without unused rules are left untouched on disk.
pub fn rewrite_output(dir: &Path, used: &UsageSet) -> Result<RewriteReport> {
    let fonts = assets::icon_fonts(dir)?;
    if fonts.is_empty() {
        warn!("No icon fonts found in {}", dir.display());
    }

    let jobs: Vec<Asset> = assets::stylesheets(dir)?
        .into_iter()
        .map(Asset::Stylesheet)
        .chain(fonts.into_iter().map(|(path, kind)| Asset::Font(path, kind)))
        .collect();

    let results: Vec<Result<Rewritten>> = jobs.par_iter().map(|job| job.rewrite(used)).collect();

    let mut rewritten = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(asset) => rewritten.push(asset),
            Err(e) => {
                error!("{e}");
                failures.push(e);
            }
        }
    }

    let failed = failures.len();
    if let Some(first) = failures.into_iter().next() {
        error!("{failed} assets in {} failed; nothing was written", dir.display());
        return Err(first);
    }

    for asset in &rewritten {
        if let Some(data) = &asset.data {
            AssetFile::new(&asset.report.path).write(data)?;
        }
    }

    Ok(RewriteReport { assets: rewritten.into_iter().map(|asset| asset.report).collect() })
}

/// Runs both phases over a single output directory.
pub fn strip_output(dir: &Path, collector: &mut UsageCollector, options: &Options) -> Result<RewriteReport> {
    let used = scan_output(dir, collector, options)?;
    rewrite_output(dir, &used)
}

/// Scans every directory first, then rewrites each against the shared set.
///
/// This matches a multi-target build where each target's assets must keep
/// the icons referenced by any target.
pub fn strip_outputs<P: AsRef<Path>>(
    dirs: &[P],
    collector: &mut UsageCollector,
    options: &Options,
) -> Result<Vec<RewriteReport>> {
    for dir in dirs {
        scan_output(dir.as_ref(), collector, options)?;
    }
    let used = collector.snapshot();
    dirs.iter().map(|dir| rewrite_output(dir.as_ref(), &used)).collect()
}
