//! Interfaces as type arguments for parameters constrained to interfaces
//! with static abstract members

use crate::*;

fn with_generic(builder: ModelBuilder, constraint: &str) -> ModelBuilder {
    builder.add_type(
        TypeDecl::class("G")
            .modifiers("public")
            .type_param(TypeParamDecl::new("T").constraint(constraint)),
    )
}

fn interface_i() -> TypeDecl {
    TypeDecl::interface("I")
        .modifiers("public")
        .member(MemberDecl::method("M01", "void").modifiers("static abstract").no_body())
}

#[test]
fn test_interface_with_static_abstract_as_argument() {
    let builder = || {
        with_generic(ModelBuilder::new().add_type(interface_i()), "I")
            .add_instantiation(InstantiationDecl::new("G", "T", "I"))
    };
    assert_diagnostics!(
        builder(),
        [(GenericConstraintNotSatisfiedInterfaceWithStaticAbstractMembers, "I")]
    );
    assert_eq!(
        messages(builder(), latest()),
        vec![
            "The interface 'I' cannot be used as type argument. Static member 'I.M01()' does not have a most specific implementation in the interface."
                .to_string()
        ]
    );
}

#[test]
fn test_derived_interface_inherits_the_problem() {
    assert_diagnostics!(
        with_generic(
            ModelBuilder::new()
                .add_type(interface_i())
                .add_type(TypeDecl::interface("J").modifiers("public").implements("I")),
            "I"
        )
        .add_instantiation(InstantiationDecl::new("G", "T", "J")),
        [(GenericConstraintNotSatisfiedInterfaceWithStaticAbstractMembers, "J")]
    );
}

#[test]
fn test_class_argument_is_fine() {
    assert_semantic_ok!(with_generic(
        ModelBuilder::new().add_type(interface_i()).add_type(
            TypeDecl::class("C")
                .modifiers("public")
                .implements("I")
                .member(MemberDecl::method("M01", "void").modifiers("public static"))
        ),
        "I"
    )
    .add_instantiation(InstantiationDecl::new("G", "T", "C")));
}

#[test]
fn test_constraint_without_static_members_is_fine() {
    assert_semantic_ok!(with_generic(
        ModelBuilder::new()
            .add_type(interface_i())
            .add_type(TypeDecl::interface("IPlain").modifiers("public")),
        "IPlain"
    )
    .add_instantiation(InstantiationDecl::new("G", "T", "I")));
}
