pub mod diagnostics;
pub mod diff;
pub mod error;
pub mod fs;
pub mod generate;
pub mod manifest;
pub mod output;
pub mod render;

pub use diagnostics::{Diagnostic, DiagnosticSink, InputSource, SilentSink, TracingSink};
pub use error::{ManifestFailure, MissingInput, UsageError, UsageResult};
pub use generate::{generate, GenerateOptions, GenerateOutcome, DEFAULT_ROOT_HEADER_LEVEL};
pub use manifest::{resolve_command_names, resolve_package_name, Manifest, MANIFEST_FILE_NAME};
pub use output::{
    placeholder_span, replace_placeholder_span, write_output, OutputTarget, Placeholder,
    WriteMode, WriteOutcome,
};
pub use render::{render_usage, ResolvedInputs};
