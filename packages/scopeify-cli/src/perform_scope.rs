//! Perform Scope
//!
//! Reads stylesheets, scopes them in parallel and emits the results either as one
//! JSON report or as a `.css` / `.map.json` pair per input.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use scopeify::{NameMapping, ScopeOptions, Scopeify};
use serde::Serialize;

/// Name reported for CSS read from standard input.
pub const STDIN_NAME: &str = "stdin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub css: String,
}

/// Scoped output of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub css: String,
    pub mapping: NameMapping,
}

/// Read every path, or standard input when there are none.
pub fn read_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<SourceFile>> {
    if paths.is_empty() {
        let mut css = String::new();
        std::io::stdin()
            .read_to_string(&mut css)
            .context("failed to read stylesheet from stdin")?;
        return Ok(vec![SourceFile {
            name: STDIN_NAME.to_string(),
            css,
        }]);
    }

    paths
        .iter()
        .map(|path| {
            let css = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(SourceFile {
                name: path.to_string_lossy().to_string(),
                css,
            })
        })
        .collect()
}

/// Scope every source. Reports keep the order of `sources`.
pub fn scope_sources(sources: &[SourceFile], options: &ScopeOptions) -> Vec<FileReport> {
    let scopeify = Scopeify::new(options.clone());

    sources
        .par_iter()
        .map(|source| {
            let result = scopeify.process(&source.css);
            for warning in &result.warnings {
                tracing::warn!(file = %source.name, "{}", warning);
            }
            FileReport {
                file: source.name.clone(),
                css: result.css,
                mapping: result.mapping,
            }
        })
        .collect()
}

pub fn render_json(reports: &[FileReport]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(reports).context("failed to serialize report")
}

fn output_stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| STDIN_NAME.to_string())
}

/// Write `<stem>.css` and `<stem>.map.json` for every report into `out_dir`.
/// Nothing is written when two inputs share a stem.
pub fn write_reports(reports: &[FileReport], out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(reports.len());
    let mut stems = Vec::with_capacity(reports.len());
    for report in reports {
        let stem = output_stem(&report.file);
        if let Some(previous) = seen.insert(stem.clone(), &report.file) {
            anyhow::bail!(
                "{} and {} would both be written as {}.css",
                previous,
                report.file,
                stem
            );
        }
        stems.push(stem);
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(reports.len() * 2);
    for (report, stem) in reports.iter().zip(stems) {
        let css_path = out_dir.join(format!("{}.css", stem));
        fs::write(&css_path, &report.css)
            .with_context(|| format!("failed to write {}", css_path.display()))?;

        let map_path = out_dir.join(format!("{}.map.json", stem));
        let map = serde_json::to_string_pretty(&report.mapping)
            .context("failed to serialize mapping")?;
        fs::write(&map_path, map)
            .with_context(|| format!("failed to write {}", map_path.display()))?;

        tracing::info!(file = %report.file, css = %css_path.display(), "wrote scoped stylesheet");
        written.push(css_path);
        written.push(map_path);
    }
    Ok(written)
}

/// Read, scope and emit. Without `out_dir` the JSON report is returned for printing.
pub fn perform_scope(
    paths: &[PathBuf],
    options: &ScopeOptions,
    out_dir: Option<&Path>,
) -> anyhow::Result<Option<String>> {
    let sources = read_sources(paths)?;
    tracing::debug!(files = sources.len(), "scoping stylesheets");
    let reports = scope_sources(&sources, options);

    match out_dir {
        Some(dir) => {
            write_reports(&reports, dir)?;
            Ok(None)
        }
        None => render_json(&reports).map(Some),
    }
}
