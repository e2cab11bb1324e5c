//! # Semantic Validation Tests
//!
//! Rule tests organized by concern. Every test builds a symbol model from
//! declarations, validates it, and compares the diagnostics as
//! `(DiagnosticCode, text under the span)` pairs in source order.
//!
//! ## Test Organization
//!
//! - `modifiers/` - modifier legality, body rules and language-version gates
//! - `required_members/` - declaration, hiding, constructor and creation-site rules
//! - `static_abstract/` - runtime support, variance, operator shapes, constraints
//! - `local_functions/` - static local function modifiers and captures
//! - `model/` - model construction and end-to-end validation
//!
//! ## Test Utilities
//!
//! - `assert_semantic_ok!(builder [, options])` - Assert the model validates without diagnostics
//! - `assert_semantic_err!(builder [, options])` - Assert the model produces diagnostics
//! - `assert_diagnostics!(builder [, options], [(Code, "text"), ...])` - Assert the exact diagnostics

pub mod common;
pub use common::*;

pub use sharpcheck_compiler_diagnostics::DiagnosticCode;
pub use sharpcheck_compiler_semantic::model::decl::AccessorDecl;
pub use sharpcheck_compiler_semantic::model::{
    AccessorKind, MetadataRequiredMembers, OperatorToken, RefKind, WellKnownTypes,
};
pub use sharpcheck_compiler_semantic::{
    CompilationOptions, CreationDecl, InstantiationDecl, LanguageVersion, LocalFunctionDecl,
    MemberDecl, ModelBuilder, RuntimeCapabilities, TypeDecl, TypeParamDecl,
};

/// Macro to assert that a model validates without diagnostics
#[macro_export]
macro_rules! assert_semantic_ok {
    ($builder:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_semantic_ok_impl($builder, $crate::latest(), function_name)
    }};
    ($builder:expr, $options:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_semantic_ok_impl($builder, $options, function_name)
    }};
}

/// Macro to assert that a model fails validation
#[macro_export]
macro_rules! assert_semantic_err {
    ($builder:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_semantic_err_impl($builder, $crate::latest(), function_name)
    }};
    ($builder:expr, $options:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_semantic_err_impl($builder, $options, function_name)
    }};
}

/// Macro to assert the exact diagnostics of a model, in source order
///
/// Usage: assert_diagnostics!(builder, [(StaticNotVirtual, "M01"), (AbstractHasBody, "M01")])
#[macro_export]
macro_rules! assert_diagnostics {
    ($builder:expr, [$(($code:ident, $text:expr)),* $(,)?]) => {{
        let function_name = stdext::function_name!();
        let expected: Vec<($crate::DiagnosticCode, &str)> =
            vec![$(($crate::DiagnosticCode::$code, $text)),*];
        $crate::assert_diagnostics_impl($builder, $crate::latest(), &expected, function_name)
    }};
    ($builder:expr, $options:expr, [$(($code:ident, $text:expr)),* $(,)?]) => {{
        let function_name = stdext::function_name!();
        let expected: Vec<($crate::DiagnosticCode, &str)> =
            vec![$(($crate::DiagnosticCode::$code, $text)),*];
        $crate::assert_diagnostics_impl($builder, $options, &expected, function_name)
    }};
}

// Test modules organized by concern
pub mod local_functions;
pub mod required_members;
pub mod static_abstract;
