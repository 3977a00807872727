//! Folder runs: scan a source tree, write the extracted text and the tagged
//! text of every document into mirrored `clean/` and `parsed/` trees.

use std::path::{Path, PathBuf};

use anyhow::Context;
use relative_path::{RelativePath, RelativePathBuf};

use crate::io::{self, IoError};
use crate::tagging::{self, render::TagStyle};

/// Where to read from and where to write to.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Glob patterns matched against file names.
    pub patterns: Vec<String>,
    /// Maximum number of files; `None` for all.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Sources tagged successfully, relative to the source directory.
    pub processed: Vec<RelativePathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }
}

/// Runs the tagger over every matching file below `request.source_dir`.
///
/// Failures of single documents are recorded in the report; only a failed
/// scan aborts the run.
pub fn run_batch(request: &BatchRequest, style: &TagStyle) -> Result<BatchReport, IoError> {
    let sources = io::scan_sources(&request.source_dir, &request.patterns, request.limit)?;
    log::info!(
        "Tagging {} files from {} into {}",
        sources.len(),
        request.source_dir.display(),
        request.output_dir.display()
    );

    let mut report = BatchReport::default();
    for source in sources {
        match process_file(request, &source, style) {
            Ok(relative) => {
                log::debug!("tagged {relative}");
                report.processed.push(relative);
            }
            Err(err) => {
                log::warn!("Skipping {}: {err:#}", source.display());
                report.failures.push(BatchFailure {
                    path: source,
                    error: format!("{err:#}"),
                });
            }
        }
    }
    Ok(report)
}

fn source_relative(source_dir: &Path, source: &Path) -> anyhow::Result<RelativePathBuf> {
    let relative = source
        .strip_prefix(source_dir)
        .with_context(|| format!("{} is outside {}", source.display(), source_dir.display()))?;
    RelativePathBuf::from_path(relative)
        .with_context(|| format!("{} is not a portable path", relative.display()))
}

/// `<relative source path>` with its extension replaced by `.txt`.
pub fn output_name(source_dir: &Path, source: &Path) -> anyhow::Result<RelativePathBuf> {
    Ok(source_relative(source_dir, source)?.with_extension("txt"))
}

fn process_file(
    request: &BatchRequest,
    source: &Path,
    style: &TagStyle,
) -> anyhow::Result<RelativePathBuf> {
    let relative = source_relative(&request.source_dir, source)?;
    let name = output_name(&request.source_dir, source)?;

    let clean = io::read_source(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    io::write_output(
        &RelativePath::new("clean").join(&name),
        &request.output_dir,
        &clean,
    )
    .context("Failed to write clean text")?;

    let tagged = tagging::tag_text(&clean, style)
        .with_context(|| format!("Failed to tag {}", source.display()))?;
    io::write_output(
        &RelativePath::new("parsed").join(&name),
        &request.output_dir,
        &tagged,
    )
    .context("Failed to write tagged text")?;

    Ok(relative)
}
