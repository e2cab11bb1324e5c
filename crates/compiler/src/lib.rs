//! Library surface of the `sharpcheck` driver.
//!
//! A model file is a JSON [`ModelDecl`] with an optional `options` object
//! next to the declarations:
//!
//! ```json
//! {
//!   "path": "Program.cs",
//!   "types": [{ "name": "C", "kind": "class", "members": [] }],
//!   "options": { "language_version": "10.0" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sharpcheck_compiler_diagnostics::{build_diagnostic_message, Diagnostic, DiagnosticCollection};
use sharpcheck_compiler_semantic::{
    validate_model, CompilationOptions, LanguageVersion, ModelBuilder, ModelDecl, ModelError,
};
use thiserror::Error;
use tracing::debug;

/// Result type for driver operations
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Errors that stop a model file from being checked at all
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid symbol model in '{}': {source}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// On-disk form of a symbol model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(flatten)]
    pub model: ModelDecl,
    #[serde(default)]
    pub options: Option<CompilationOptions>,
}

/// Command-line overrides applied on top of a file's own options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub language_version: Option<LanguageVersion>,
    pub no_static_abstract_runtime: bool,
}

impl CheckOptions {
    pub fn apply(&self, mut options: CompilationOptions) -> CompilationOptions {
        if let Some(version) = self.language_version {
            options.language_version = version;
        }
        if self.no_static_abstract_runtime {
            options.runtime.supports_static_abstract_members_in_interfaces = false;
        }
        options
    }
}

/// Diagnostics for one model, together with the text their spans index into.
#[derive(Debug, Clone)]
pub struct CheckOutput {
    pub path: String,
    pub source: String,
    pub diagnostics: DiagnosticCollection,
}

impl CheckOutput {
    pub fn render(&self, use_color: bool) -> String {
        format_diagnostics(&self.source, self.diagnostics.all(), use_color)
    }
}

/// Build a model from declarations and run every rule over it
pub fn check_model(
    decl: ModelDecl,
    options: CompilationOptions,
) -> std::result::Result<CheckOutput, ModelError> {
    let model = ModelBuilder::from_decl(decl).finish()?;
    debug!(
        "Checking {} ({} types) as C# {}",
        model.file_path(),
        model.type_count(),
        options.language_version
    );
    let diagnostics = validate_model(&model, options);
    Ok(CheckOutput {
        path: model.file_path().to_string(),
        source: model.source().text.clone(),
        diagnostics,
    })
}

/// Read, decode and check one model file
pub fn check_file(path: &Path, overrides: CheckOptions) -> Result<CheckOutput> {
    let text = fs::read_to_string(path).map_err(|source| CompilerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ModelFile = serde_json::from_str(&text).map_err(|source| CompilerError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let options = overrides.apply(file.options.unwrap_or_default());
    check_model(file.model, options).map_err(|source| CompilerError::Model {
        path: path.to_path_buf(),
        source,
    })
}

/// Formats diagnostics for display
///
/// # Arguments
/// * `source_text` - The rendered model text the spans point into
/// * `diagnostics` - The diagnostics to format
/// * `use_color` - Whether to use color in the output
pub fn format_diagnostics(source_text: &str, diagnostics: &[Diagnostic], use_color: bool) -> String {
    diagnostics
        .iter()
        .map(|d| build_diagnostic_message(source_text, d, use_color))
        .collect::<Vec<_>>()
        .join("\n")
}
