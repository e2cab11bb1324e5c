//! # Diagnostics
//!
//! Shared diagnostic types for the member validation passes and the
//! driver that renders them.

pub mod diagnostics;
pub mod reporting;

pub use diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticCollection, DiagnosticSeverity, DiagnosticSink, VecSink,
};
pub use reporting::build_diagnostic_message;
