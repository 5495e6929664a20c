//! CLI definitions and command dispatch.

use std::{
    fs::read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use stripfont_core::{
    ContainerKind, Options, Outcome, RewriteReport, UsageCollector, decode_font, scan_output,
    strip_outputs,
};

#[derive(Parser)]
#[command(name = "stripfont")]
#[command(about = "Strip unused icons from a web build's icon font and stylesheet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ScanArgs {
    /// Build output directories
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,
    /// Icons to keep even if no generated code references them
    #[arg(short, long, value_delimiter = ',')]
    pub whitelist: Vec<String>,
}

impl ScanArgs {
    fn options(&self) -> Options {
        Options::new().with_whitelist(self.whitelist.iter().cloned())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan every directory, then prune stylesheets and subset icon fonts in place
    Strip {
        #[command(flatten)]
        args: ScanArgs,
    },
    /// Print the icons the generated code references
    Scan {
        #[command(flatten)]
        args: ScanArgs,
    },
    /// Print the glyph order of a font
    Glyphs {
        #[arg(required = true)]
        font: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Strip { args } => strip(&args)?,
            Commands::Scan { args } => scan(&args)?,
            Commands::Glyphs { font } => glyphs(&font)?,
        }
        Ok(())
    }
}

fn strip(args: &ScanArgs) -> Result<()> {
    let mut collector = UsageCollector::new();
    let reports = strip_outputs(args.dirs.as_slice(), &mut collector, &args.options())
        .context("Failed to strip icon fonts")?;

    for (dir, report) in args.dirs.iter().zip(&reports) {
        print_report(dir, report);
    }
    Ok(())
}

fn print_report(dir: &Path, report: &RewriteReport) {
    println!("{}", dir.display());
    for asset in &report.assets {
        let detail = match asset.outcome {
            Outcome::Stylesheet { kept, removed } => format!("{kept} rules kept, {removed} removed"),
            Outcome::Font { kind, glyphs_before, glyphs_after } => {
                format!("{kind}, {glyphs_before} -> {glyphs_after} glyphs")
            }
        };
        println!(
            "  {}: {} -> {} bytes ({:.1}% smaller), {detail}",
            asset.path.display(),
            asset.original_size,
            asset.new_size,
            asset.reduction()
        );
    }
    info!(
        "{}: {} -> {} bytes in total",
        dir.display(),
        report.original_size(),
        report.new_size()
    );
}

fn scan(args: &ScanArgs) -> Result<()> {
    let mut collector = UsageCollector::new();
    let options = args.options();
    for dir in &args.dirs {
        scan_output(dir, &mut collector, &options)
            .with_context(|| format!("Failed to scan {}", dir.display()))?;
    }

    for identifier in collector.snapshot().iter().filter(|id| !id.is_empty()) {
        println!("{identifier}");
    }
    Ok(())
}

fn glyphs(path: &Path) -> Result<()> {
    let data = read(path).with_context(|| format!("Failed to read font: {}", path.display()))?;

    let Some(kind) = ContainerKind::from_path(path).or_else(|| ContainerKind::sniff(&data)) else {
        bail!("Unrecognized font container: {}", path.display());
    };
    let font = decode_font(&data, kind)
        .with_context(|| format!("Unable to import font {}", path.display()))?;

    println!("{} ({kind}, {} glyphs)", font.full_name(), font.num_glyphs());
    for glyph in font.glyphs() {
        let codepoints: Vec<String> = glyph.codepoints().iter().map(ToString::to_string).collect();
        println!("{:>5}  {:?}  {}", glyph.index().to_u16(), glyph.name(), codepoints.join(" "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_whitelist_is_comma_separated_and_repeatable() {
        let cli = Cli::parse_from(["stripfont", "scan", "dist", "-w", "house,x", "--whitelist", "bell"]);
        let Commands::Scan { args } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.dirs, [PathBuf::from("dist")]);
        assert_eq!(args.options().whitelist, ["house", "x", "bell"]);
    }
}
