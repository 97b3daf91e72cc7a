use std::fmt;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::diff::output_diff;
use crate::error::{UsageError, UsageResult};
use crate::fs::{append_existing, write_atomic};

/// Literal markers delimiting the region to regenerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub start: String,
    pub end: String,
}

impl Placeholder {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    fn validate(&self) -> UsageResult<()> {
        if self.start.is_empty() || self.end.is_empty() {
            return Err(UsageError::InvalidArguments(
                "placeholder start and end markers cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
    ReplacePlaceholder(Placeholder),
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMode::Overwrite => "overwrite",
            WriteMode::Append => "append",
            WriteMode::ReplacePlaceholder(_) => "replace-placeholder",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub mode: WriteMode,
    pub dry_run: bool,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            mode,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub diff: Option<String>,
}

/// Byte range covering the first `start` marker through the last `end`
/// marker that follows it, both markers included.
pub fn placeholder_span(content: &str, placeholder: &Placeholder) -> Option<(usize, usize)> {
    let start = content.find(&placeholder.start)?;
    let after_start = start + placeholder.start.len();
    let end = content[after_start..].rfind(&placeholder.end)? + after_start;
    Some((start, end + placeholder.end.len()))
}

/// Replace the whole placeholder span with the markers wrapped around
/// `markdown`. `None` when the content holds no span.
pub fn replace_placeholder_span(
    content: &str,
    placeholder: &Placeholder,
    markdown: &str,
) -> Option<String> {
    placeholder_span(content, placeholder).map(|span| splice(content, placeholder, span, markdown))
}

fn splice(
    content: &str,
    placeholder: &Placeholder,
    (start, end): (usize, usize),
    markdown: &str,
) -> String {
    let mut output = String::with_capacity(content.len() + markdown.len());
    output.push_str(&content[..start]);
    output.push_str(&placeholder.start);
    output.push('\n');
    output.push_str(markdown);
    output.push('\n');
    output.push_str(&placeholder.end);
    output.push_str(&content[end..]);
    output
}

pub fn write_output(
    markdown: &str,
    target: &OutputTarget,
    sink: &dyn DiagnosticSink,
) -> UsageResult<WriteOutcome> {
    let path = target.path.as_path();
    let fs_error = |source: std::io::Error| UsageError::FilesystemWrite {
        path: path.to_path_buf(),
        source,
    };

    let (original, updated) = match &target.mode {
        WriteMode::Overwrite => {
            let original = read_if_exists(path).map_err(fs_error)?;
            (original, markdown.to_string())
        }
        WriteMode::Append => {
            let original = std::fs::read_to_string(path).map_err(fs_error)?;
            let updated = format!("{original}{markdown}");
            (Some(original), updated)
        }
        WriteMode::ReplacePlaceholder(placeholder) => {
            placeholder.validate()?;
            let original = std::fs::read_to_string(path).map_err(fs_error)?;
            match placeholder_span(&original, placeholder) {
                Some((start, end)) => {
                    sink.record(Diagnostic::PlaceholderLocated { path, start, end });
                    let updated = splice(&original, placeholder, (start, end), markdown);
                    (Some(original), updated)
                }
                None => {
                    sink.record(Diagnostic::PlaceholderMissing {
                        path,
                        start_marker: &placeholder.start,
                        end_marker: &placeholder.end,
                    });
                    return Ok(WriteOutcome {
                        path: path.to_path_buf(),
                        changed: false,
                        diff: None,
                    });
                }
            }
        }
    };

    let diff = output_diff(path, original.as_deref(), &updated);
    let changed = diff.is_some();

    if changed && !target.dry_run {
        let written = match &target.mode {
            WriteMode::Append => append_existing(path, markdown),
            WriteMode::Overwrite | WriteMode::ReplacePlaceholder(_) => {
                write_atomic(path, &updated)
            }
        };
        written.map_err(fs_error)?;

        sink.record(Diagnostic::OutputWritten {
            path,
            mode: &target.mode,
            changed,
        });
    }

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        changed,
        diff,
    })
}

fn read_if_exists(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
