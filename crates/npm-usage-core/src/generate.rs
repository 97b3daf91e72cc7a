use std::path::PathBuf;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{UsageError, UsageResult};
use crate::manifest::{resolve_command_names, resolve_package_name, MANIFEST_FILE_NAME};
use crate::output::{write_output, OutputTarget, WriteOutcome};
use crate::render::ResolvedInputs;

pub const DEFAULT_ROOT_HEADER_LEVEL: u8 = 3;

/// Caller-facing knobs. Anything left `None` is read from the manifest.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub package_name: Option<String>,
    pub cli_utility_names: Option<Vec<String>>,
    pub root_header_level: u8,
    pub output: Option<OutputTarget>,
    pub manifest_path: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package_name: None,
            cli_utility_names: None,
            root_header_level: DEFAULT_ROOT_HEADER_LEVEL,
            output: None,
            manifest_path: PathBuf::from(MANIFEST_FILE_NAME),
        }
    }
}

impl GenerateOptions {
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn with_cli_utility_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cli_utility_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_root_header_level(mut self, level: u8) -> Self {
        self.root_header_level = level;
        self
    }

    pub fn with_output(mut self, target: OutputTarget) -> Self {
        self.output = Some(target);
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub markdown: String,
    pub write: Option<WriteOutcome>,
}

/// Resolve inputs, render the usage document and, when asked, persist it.
pub fn generate(
    options: GenerateOptions,
    sink: &dyn DiagnosticSink,
) -> UsageResult<GenerateOutcome> {
    let GenerateOptions {
        package_name,
        cli_utility_names,
        root_header_level,
        output,
        manifest_path,
    } = options;

    if root_header_level == 0 {
        return Err(UsageError::InvalidArguments(
            "root header level must be at least 1".to_string(),
        ));
    }

    let command_names = resolve_command_names(cli_utility_names, &manifest_path, sink)?;
    let package_name = resolve_package_name(package_name, &manifest_path, sink)?;

    let inputs = ResolvedInputs {
        package_name,
        command_names,
        heading_level: root_header_level,
    };
    let markdown = inputs.render();
    sink.record(Diagnostic::Rendered {
        markdown: &markdown,
    });

    let write = output
        .map(|target| write_output(&markdown, &target, sink))
        .transpose()?;

    Ok(GenerateOutcome { markdown, write })
}
