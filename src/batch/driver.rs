use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{ThumbError, ThumbResult},
    render::{
        compositor::{Compositor, RenderOutcome},
        config::OutputNaming,
    },
};

/// Prefix of every output file name.
pub const OUTPUT_PREFIX: &str = "thumbnail_";

/// Per-file results of one folder run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<RenderOutcome>,
    skipped: Vec<String>,
}

/// Counts derived from a [`BatchReport`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub matched: usize,
    pub written: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} written, {} failed, {} skipped",
            self.matched, self.written, self.failed, self.skipped
        )
    }
}

impl BatchReport {
    pub fn outcomes(&self) -> &[RenderOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> impl Iterator<Item = &RenderOutcome> {
        self.outcomes.iter().filter(|o| o.is_written())
    }

    pub fn failed(&self) -> impl Iterator<Item = &RenderOutcome> {
        self.outcomes.iter().filter(|o| !o.is_written())
    }

    /// Names of entries that were not processed (wrong extension, not a file, not UTF-8).
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn summary(&self) -> BatchSummary {
        let written = self.written().count();
        BatchSummary {
            matched: self.outcomes.len(),
            written,
            failed: self.outcomes.len() - written,
            skipped: self.skipped.len(),
        }
    }
}

/// Case-sensitive suffix match against `.<ext>` for each accepted extension.
pub fn is_supported_image(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| {
        name.strip_suffix(ext.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

pub fn output_file_name(name: &str, naming: OutputNaming) -> String {
    match naming {
        OutputNaming::PreserveExtension => format!("{OUTPUT_PREFIX}{name}"),
        OutputNaming::JpgExtension => {
            let stem = Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name);
            format!("{OUTPUT_PREFIX}{stem}.jpg")
        }
    }
}

/// Render every matching image directly inside `folder` into the configured output directory.
///
/// Only listing the folder or creating the output directory can fail the whole batch;
/// per-file failures are recorded in the report and processing continues.
#[tracing::instrument(level = "debug", skip_all, fields(folder = %folder.display()))]
pub fn process_folder(
    compositor: &mut Compositor,
    folder: &Path,
    title: &str,
    subtitle: &str,
) -> ThumbResult<BatchReport> {
    let entries = std::fs::read_dir(folder).map_err(|e| ThumbError::io(folder, e))?;

    let output_dir = compositor.config().output_dir.clone();
    std::fs::create_dir_all(&output_dir).map_err(|e| ThumbError::io(&output_dir, e))?;

    let mut report = BatchReport::default();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("unreadable entry in {}: {e}", folder.display());
                continue;
            }
        };

        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!("skipping non-UTF-8 name {}", path.display());
            report.skipped.push(entry.file_name().to_string_lossy().into_owned());
            continue;
        };

        if !path.is_file() || !is_supported_image(&name, &compositor.config().extensions) {
            tracing::debug!("skipping {name}");
            report.skipped.push(name);
            continue;
        }

        let output: PathBuf =
            output_dir.join(output_file_name(&name, compositor.config().output_naming));
        let outcome = compositor.render(&path, &output, title, subtitle);
        report.outcomes.push(outcome);
    }

    tracing::info!("batch finished: {}", report.summary());
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/driver.rs"]
mod tests;
