//! # Semantic Validation Framework
//!
//! Rule families run over a finished [`crate::model::SymbolModel`]. Each family
//! is a [`Validator`]; the [`ValidatorRegistry`] runs them in registration
//! order and returns the diagnostics sorted by location.

mod context;
pub mod local_function_validator;
pub mod modifier_validator;
pub mod operator_signatures;
pub mod required_member_validator;
pub mod static_abstract_validator;
pub mod validator;
pub mod variance;

pub use context::ValidationContext;
pub use local_function_validator::LocalFunctionValidator;
pub use modifier_validator::ModifierValidator;
pub use required_member_validator::RequiredMemberValidator;
pub use static_abstract_validator::StaticAbstractValidator;
pub use validator::{create_default_registry, Validator, ValidatorRegistry};
