//! Tests for `abstract`/`virtual`/`sealed`/`override` on static members

use crate::*;

#[test]
fn test_static_virtual_interface_member() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .member(MemberDecl::method("M01", "void").modifiers("static virtual"))
        ),
        [(StaticNotVirtual, "M01")]
    );
}

#[test]
fn test_static_abstract_virtual_with_body() {
    // Both the modifier rule and the body rule fire for one member.
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .member(MemberDecl::method("M01", "void").modifiers("static abstract virtual"))
        ),
        [(StaticNotVirtual, "M01"), (AbstractHasBody, "M01")]
    );
}

#[test]
fn test_static_interface_member_rejects_override_and_abstract_sealed() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .member(MemberDecl::method("M01", "void").modifiers("static override"))
                .member(
                    MemberDecl::method("M02", "void")
                        .modifiers("abstract sealed static")
                        .no_body()
                )
        ),
        [(BadMemberFlag, "M01"), (BadMemberFlag, "M02")]
    );
}

#[test]
fn test_static_abstract_interface_members_are_legal() {
    assert_semantic_ok!(ModelBuilder::new().add_type(
        TypeDecl::interface("I1")
            .member(MemberDecl::method("M01", "void").modifiers("abstract static").no_body())
            .member(
                MemberDecl::property("P01", "int")
                    .modifiers("abstract static")
                    .get()
                    .set()
            )
            .member(MemberDecl::event("E01", "int").modifiers("static abstract"))
            .member(MemberDecl::method("M02", "void").modifiers("static sealed"))
    ));
}

#[test]
fn test_static_class_members() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C")
                .modifiers("public abstract")
                .member(
                    MemberDecl::method("M01", "void")
                        .modifiers("public static abstract")
                        .no_body()
                )
                .member(MemberDecl::method("M02", "void").modifiers("public static sealed"))
                .member(MemberDecl::method("M03", "void").modifiers("public static override"))
                .member(
                    MemberDecl::property("P01", "int")
                        .modifiers("public static virtual")
                        .get()
                )
        ),
        [
            (StaticNotVirtual, "M01"),
            (SealedNonOverride, "M02"),
            (StaticNotVirtual, "M03"),
            (StaticNotVirtual, "P01"),
        ]
    );
}

#[test]
fn test_static_not_virtual_message() {
    let messages = messages(
        ModelBuilder::new().add_type(
            TypeDecl::class("C").member(MemberDecl::method("M01", "void").modifiers("static virtual")),
        ),
        latest(),
    );
    assert_eq!(
        messages,
        vec!["A static member cannot be marked as 'virtual'".to_string()]
    );
}
