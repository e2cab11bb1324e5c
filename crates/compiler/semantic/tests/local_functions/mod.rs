//! Local function tests

pub mod modifiers;

use crate::*;

/// A class `C` whose method `M` declares `function`
pub fn host(function: LocalFunctionDecl) -> ModelBuilder {
    host_method(MemberDecl::method("M", "void").local_function(function))
}

pub fn host_method(method: MemberDecl) -> ModelBuilder {
    ModelBuilder::new().add_type(
        TypeDecl::class("C")
            .member(MemberDecl::field("field", "int"))
            .member(MemberDecl::field("S", "int").modifiers("static"))
            .member(method),
    )
}
