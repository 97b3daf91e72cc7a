use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink, InputSource};
use crate::error::{ManifestFailure, MissingInput, UsageError, UsageResult};

/// Fixed manifest location, relative to the working directory.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Rendered in place of a package name the manifest does not declare.
pub const UNDECLARED_NAME: &str = "undefined";

/// The subset of `package.json` this crate looks at.
///
/// Both fields stay raw JSON so that an odd `bin` never blocks reading the
/// name, and the other way round.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub bin: Option<Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestFailure> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The `name` field as text. Strings are taken as is, other values in
    /// their JSON form, and an absent field as [`UNDECLARED_NAME`].
    pub fn package_name(&self) -> String {
        match &self.name {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => UNDECLARED_NAME.to_string(),
        }
    }

    /// Command names in declaration order, `None` when `bin` is missing or
    /// empty (`null`, `false`, `0`, `""`).
    ///
    /// A single-path `bin` installs one command named after the package,
    /// without its `@scope/` prefix. Arrays yield their indices and any
    /// other value yields no commands.
    pub fn command_names(&self) -> Option<Vec<String>> {
        match self.bin.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(path) if path.is_empty() => None,
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            Value::Object(map) => Some(map.keys().cloned().collect()),
            Value::String(_) => Some(vec![unscoped(&self.package_name()).to_string()]),
            Value::Array(items) => Some((0..items.len()).map(|index| index.to_string()).collect()),
            Value::Bool(true) | Value::Number(_) => Some(Vec::new()),
        }
    }
}

fn unscoped(name: &str) -> &str {
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((_, bare)) => bare,
        None => name,
    }
}

fn read_manifest(
    path: &Path,
    missing: MissingInput,
    sink: &dyn DiagnosticSink,
) -> UsageResult<Manifest> {
    sink.record(Diagnostic::ManifestRead { path });
    Manifest::load(path).map_err(|source| UsageError::ManifestRead {
        path: path.to_path_buf(),
        missing,
        source,
    })
}

pub fn resolve_package_name(
    explicit: Option<String>,
    manifest_path: &Path,
    sink: &dyn DiagnosticSink,
) -> UsageResult<String> {
    if let Some(name) = explicit {
        sink.record(Diagnostic::PackageNameResolved {
            name: &name,
            source: InputSource::Caller,
        });
        return Ok(name);
    }

    let manifest = read_manifest(manifest_path, MissingInput::PackageName, sink)?;
    let name = manifest.package_name();

    sink.record(Diagnostic::PackageNameResolved {
        name: &name,
        source: InputSource::Manifest,
    });
    Ok(name)
}

pub fn resolve_command_names(
    explicit: Option<Vec<String>>,
    manifest_path: &Path,
    sink: &dyn DiagnosticSink,
) -> UsageResult<Vec<String>> {
    if let Some(names) = explicit {
        sink.record(Diagnostic::CommandNamesResolved {
            names: &names,
            source: InputSource::Caller,
        });
        return Ok(names);
    }

    let manifest = read_manifest(manifest_path, MissingInput::CommandNames, sink)?;
    let Some(names) = manifest.command_names() else {
        return Err(UsageError::MissingCommandMap {
            path: manifest_path.to_path_buf(),
        });
    };

    sink.record(Diagnostic::CommandNamesResolved {
        names: &names,
        source: InputSource::Manifest,
    });
    Ok(names)
}
