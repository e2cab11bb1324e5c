//! # C# Member Semantic Rules
//!
//! Declaration-level rules a C# compiler applies to type members once names
//! are bound: which modifier combinations are legal where, how `required`
//! members are accumulated and enforced at construction sites, and the extra
//! constraints on static abstract and static virtual interface members.
//!
//! ## Architecture
//!
//! 1. **Symbol model** ([`model`]): an immutable arena of types and members,
//!    built from serde declarations by [`ModelBuilder`]
//! 2. **Language options** ([`language`]): language version and runtime
//!    capabilities that gate features
//! 3. **Required members** ([`required_members`]): the per-type required
//!    member sets, computed lazily and cached
//! 4. **Validation** ([`validation`]): independent rule families behind the
//!    [`validation::Validator`] trait, reporting into a diagnostic sink
//!
//! ## Main Entry Point
//!
//! [`validate_model`] runs every rule family and returns the diagnostics
//! sorted by location.

pub mod language;
pub mod model;
pub mod required_members;
pub mod validation;

use sharpcheck_compiler_diagnostics::DiagnosticCollection;

pub use language::{CompilationOptions, Feature, LanguageVersion, RuntimeCapabilities};
pub use model::decl::{
    CreationDecl, InstantiationDecl, LocalFunctionDecl, MemberDecl, ModelDecl, TypeDecl,
    TypeParamDecl,
};
pub use model::{Modifier, ModelBuilder, ModelError, SymbolModel};
pub use validation::{create_default_registry, ValidationContext, Validator, ValidatorRegistry};

/// Run every default rule family over `model` under `options`.
pub fn validate_model(model: &SymbolModel, options: CompilationOptions) -> DiagnosticCollection {
    let ctx = ValidationContext::new(model, options);
    create_default_registry().validate_all(&ctx)
}
