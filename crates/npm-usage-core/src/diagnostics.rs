//! Opt-in diagnostic events emitted while generating usage docs.
//!
//! The library never logs on its own: callers hand a [`DiagnosticSink`] to
//! [`crate::generate`] and decide where (if anywhere) the events end up.

use std::path::Path;

use crate::output::WriteMode;

/// Where a resolved input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Caller,
    Manifest,
}

#[derive(Debug, Clone, Copy)]
pub enum Diagnostic<'a> {
    ManifestRead {
        path: &'a Path,
    },
    PackageNameResolved {
        name: &'a str,
        source: InputSource,
    },
    CommandNamesResolved {
        names: &'a [String],
        source: InputSource,
    },
    Rendered {
        markdown: &'a str,
    },
    PlaceholderLocated {
        path: &'a Path,
        start: usize,
        end: usize,
    },
    PlaceholderMissing {
        path: &'a Path,
        start_marker: &'a str,
        end_marker: &'a str,
    },
    OutputWritten {
        path: &'a Path,
        mode: &'a WriteMode,
        changed: bool,
    },
}

pub trait DiagnosticSink {
    fn record(&self, event: Diagnostic<'_>);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn record(&self, _event: Diagnostic<'_>) {}
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: Diagnostic<'_>) {
        match event {
            Diagnostic::ManifestRead { path } => {
                tracing::debug!(path = %path.display(), "reading manifest");
            }
            Diagnostic::PackageNameResolved { name, source } => {
                tracing::debug!(name, ?source, "resolved package name");
            }
            Diagnostic::CommandNamesResolved { names, source } => {
                tracing::debug!(?names, ?source, "resolved command names");
            }
            Diagnostic::Rendered { markdown } => {
                tracing::debug!(bytes = markdown.len(), "rendered markdown:\n{markdown}");
            }
            Diagnostic::PlaceholderLocated { path, start, end } => {
                tracing::debug!(path = %path.display(), start, end, "located placeholder span");
            }
            Diagnostic::PlaceholderMissing {
                path,
                start_marker,
                end_marker,
            } => {
                tracing::debug!(
                    path = %path.display(),
                    start_marker,
                    end_marker,
                    "no placeholder span found, leaving file unchanged"
                );
            }
            Diagnostic::OutputWritten {
                path,
                mode,
                changed,
            } => {
                tracing::debug!(path = %path.display(), mode = %mode, changed, "output written");
            }
        }
    }
}
