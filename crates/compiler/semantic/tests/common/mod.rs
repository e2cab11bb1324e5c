//! Common test utilities for semantic validation tests
//!
//! - Option presets for language versions and runtimes
//! - Model building and validation
//! - Diagnostic formatting for assertion messages

use sharpcheck_compiler_diagnostics::{
    build_diagnostic_message, DiagnosticCode, DiagnosticCollection,
};
use sharpcheck_compiler_semantic::{
    validate_model, CompilationOptions, LanguageVersion, ModelBuilder, RuntimeCapabilities,
    SymbolModel,
};

// ===== Options =====

pub fn latest() -> CompilationOptions {
    CompilationOptions::default()
}

/// Options for a language version written the way it is on the command line
pub fn version(version: &str) -> CompilationOptions {
    let version: LanguageVersion = version.parse().expect("invalid language version in test");
    CompilationOptions::default().with_language_version(version)
}

pub fn without_runtime_support() -> CompilationOptions {
    CompilationOptions::default().with_runtime(RuntimeCapabilities {
        supports_static_abstract_members_in_interfaces: false,
    })
}

// ===== Validation =====

pub fn build(builder: ModelBuilder) -> SymbolModel {
    builder
        .finish()
        .unwrap_or_else(|e| panic!("test model failed to build: {e}"))
}

pub fn check(builder: ModelBuilder, options: CompilationOptions) -> (SymbolModel, DiagnosticCollection) {
    let model = build(builder);
    let diagnostics = validate_model(&model, options);
    (model, diagnostics)
}

/// `(code, text under the span)` for each diagnostic, in reported order
pub fn code_and_text(model: &SymbolModel, diagnostics: &DiagnosticCollection) -> Vec<(DiagnosticCode, String)> {
    diagnostics
        .iter()
        .map(|d| (d.code, model.source().slice(d.span).to_string()))
        .collect()
}

/// Messages of every diagnostic, in reported order
pub fn messages(builder: ModelBuilder, options: CompilationOptions) -> Vec<String> {
    let (_, diagnostics) = check(builder, options);
    diagnostics.iter().map(|d| d.message.clone()).collect()
}

pub fn format_diagnostics(model: &SymbolModel, diagnostics: &DiagnosticCollection) -> String {
    let source = &model.source().text;
    let rendered: Vec<String> = diagnostics
        .iter()
        .map(|d| build_diagnostic_message(source, d, false))
        .collect();
    format!(
        "--- source ---\n{source}\n--- diagnostics ---\n{}",
        rendered.join("\n")
    )
}

// ===== Assertions =====

pub fn assert_semantic_ok_impl(builder: ModelBuilder, options: CompilationOptions, test_name: &str) {
    let (model, diagnostics) = check(builder, options);
    assert!(
        diagnostics.is_empty(),
        "[{test_name}] expected no diagnostics, got {}:\n{}",
        diagnostics.len(),
        format_diagnostics(&model, &diagnostics)
    );
}

pub fn assert_semantic_err_impl(builder: ModelBuilder, options: CompilationOptions, test_name: &str) {
    let (model, diagnostics) = check(builder, options);
    assert!(
        diagnostics.has_errors(),
        "[{test_name}] expected errors, got none:\n{}",
        format_diagnostics(&model, &diagnostics)
    );
}

pub fn assert_diagnostics_impl(
    builder: ModelBuilder,
    options: CompilationOptions,
    expected: &[(DiagnosticCode, &str)],
    test_name: &str,
) {
    let (model, diagnostics) = check(builder, options);
    let actual = code_and_text(&model, &diagnostics);
    let expected: Vec<(DiagnosticCode, String)> = expected
        .iter()
        .map(|(code, text)| (*code, (*text).to_string()))
        .collect();
    assert_eq!(
        actual,
        expected,
        "[{test_name}] diagnostics differ:\n{}",
        format_diagnostics(&model, &diagnostics)
    );
}
