//! Variance of interface type parameters in static member signatures

use crate::*;

#[test]
fn test_covariant_parameter_as_static_abstract_input() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .type_param(TypeParamDecl::new("T").covariant())
                .member(
                    MemberDecl::method("M01", "void")
                        .modifiers("static abstract")
                        .param("x", "T")
                        .no_body()
                )
                .member(
                    MemberDecl::method("M02", "T")
                        .modifiers("static abstract")
                        .no_body()
                )
        ),
        [(UnexpectedVariance, "M01")]
    );
}

#[test]
fn test_contravariant_parameter_as_static_abstract_output() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .type_param(TypeParamDecl::new("T").contravariant())
                .member(MemberDecl::property("P01", "T").modifiers("static abstract").get())
                .member(MemberDecl::property("P02", "T").modifiers("static abstract").set())
        ),
        [(UnexpectedVariance, "P01")]
    );
}

#[test]
fn test_static_member_with_implementation_is_not_checked() {
    assert_semantic_ok!(ModelBuilder::new().add_type(
        TypeDecl::interface("I1")
            .type_param(TypeParamDecl::new("T").covariant())
            .member(MemberDecl::method("M01", "void").modifiers("static").param("x", "T"))
            .member(MemberDecl::field("F01", "T").modifiers("static"))
    ));
}

#[test]
fn test_instance_members_are_checked_too() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .type_param(TypeParamDecl::new("T").covariant())
                .member(MemberDecl::method("M01", "void").param("x", "T").no_body())
                .member(
                    MemberDecl::method("M02", "void")
                        .modifiers("static abstract")
                        .param("x", "T")
                        .no_body()
                )
        ),
        [(UnexpectedVariance, "M01"), (UnexpectedVariance, "M02")]
    );
}

#[test]
fn test_variance_message() {
    let messages = messages(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .type_param(TypeParamDecl::new("T").covariant())
                .member(
                    MemberDecl::method("M01", "void")
                        .modifiers("static abstract")
                        .param("x", "T")
                        .no_body(),
                ),
        ),
        latest(),
    );
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].starts_with("Invalid variance: The type parameter 'T' must be contravariantly valid on 'I1<T>.M01("),
        "{}",
        messages[0]
    );
    assert!(messages[0].ends_with("'T' is covariant."), "{}", messages[0]);
}
