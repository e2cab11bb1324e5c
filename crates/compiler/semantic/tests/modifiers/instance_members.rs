//! Tests for modifier rules on instance members, fields, operators,
//! constructors, events and accessors

use crate::*;

#[test]
fn test_instance_member_rules() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C")
                .modifiers("public abstract")
                .member(MemberDecl::method("M01", "void").modifiers("public sealed"))
                .member(
                    MemberDecl::method("M02", "void")
                        .modifiers("public extern abstract")
                        .no_body()
                )
                .member(MemberDecl::method("M03", "void").modifiers("private virtual"))
                .member(MemberDecl::method("M04", "void").modifiers("public").no_body())
                .member(MemberDecl::method("M05", "void").modifiers("public abstract"))
                .member(MemberDecl::method("M06", "void").modifiers("virtual"))
        ),
        [
            (SealedNonOverride, "M01"),
            (AbstractAndExtern, "M02"),
            (VirtualPrivate, "M03"),
            (ConcreteMissingBody, "M04"),
            (AbstractHasBody, "M05"),
            (VirtualPrivate, "M06"),
        ]
    );
}

#[test]
fn test_extern_and_partial_members_need_no_body() {
    assert_semantic_ok!(ModelBuilder::new().add_type(
        TypeDecl::class("C")
            .modifiers("public partial")
            .member(MemberDecl::method("M01", "void").modifiers("public static extern").no_body())
            .member(MemberDecl::method("M02", "void").modifiers("partial").no_body())
    ));
}

#[test]
fn test_sealed_override_is_legal() {
    assert_semantic_ok!(ModelBuilder::new()
        .add_type(
            TypeDecl::class("B")
                .modifiers("public")
                .member(MemberDecl::method("M01", "void").modifiers("public virtual"))
        )
        .add_type(
            TypeDecl::class("C")
                .modifiers("public")
                .base("B")
                .member(MemberDecl::method("M01", "void").modifiers("public sealed override"))
        ));
}

#[test]
fn test_interface_instance_members_are_implicitly_abstract() {
    assert_semantic_ok!(ModelBuilder::new().add_type(
        TypeDecl::interface("I1")
            .member(MemberDecl::method("M01", "void").no_body())
            .member(MemberDecl::method("M02", "void").modifiers("sealed"))
    ));
}

#[test]
fn test_field_modifiers() {
    assert_diagnostics!(
        ModelBuilder::new()
            .add_type(
                TypeDecl::class("C")
                    .member(MemberDecl::field("F1", "int").modifiers("public abstract"))
                    .member(MemberDecl::field("F2", "int").modifiers("public virtual"))
            )
            .add_type(
                TypeDecl::interface("I1")
                    .member(MemberDecl::field("F3", "int"))
                    .member(MemberDecl::field("F4", "int").modifiers("static"))
            ),
        [
            (AbstractField, "F1"),
            (BadMemberFlag, "F2"),
            (InterfacesCantContainFields, "F3"),
        ]
    );
}

#[test]
fn test_duplicate_modifiers() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C")
                .member(MemberDecl::method("M01", "void").modifiers("public public"))
                .member(
                    MemberDecl::property("P01", "int")
                        .modifiers("public")
                        .get()
                        .accessor(AccessorDecl::new(AccessorKind::Set).modifiers("private private"))
                )
        ),
        [(DuplicateModifier, "public"), (DuplicateModifier, "private")]
    );
}

#[test]
fn test_accessor_modifiers() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C").member(
                MemberDecl::property("P01", "int")
                    .modifiers("public")
                    .accessor(AccessorDecl::new(AccessorKind::Get).modifiers("readonly"))
                    .accessor(AccessorDecl::new(AccessorKind::Set).modifiers("static"))
            )
        ),
        [(BadMemberFlag, "static")]
    );
}

#[test]
fn test_class_operators() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C")
                .modifiers("public")
                .member(
                    MemberDecl::operator(OperatorToken::Plus, "C")
                        .modifiers("public")
                        .param("a", "C")
                        .param("b", "C")
                )
                .member(
                    MemberDecl::operator(OperatorToken::Minus, "C")
                        .modifiers("public static virtual")
                        .param("x", "C")
                )
                .member(
                    MemberDecl::operator(OperatorToken::Equality, "bool")
                        .modifiers("static")
                        .param("a", "C")
                        .param("b", "C")
                )
        ),
        [
            (OperatorsMustBeStatic, "+"),
            (BadMemberFlag, "-"),
            (OperatorsMustBeStatic, "=="),
        ]
    );
}

#[test]
fn test_interface_equality_and_conversion_operators() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .member(
                    MemberDecl::operator(OperatorToken::Equality, "bool")
                        .modifiers("static abstract")
                        .param("x", "I1")
                        .param("y", "I1")
                        .no_body()
                )
                .member(
                    MemberDecl::conversion(false, "int")
                        .modifiers("static abstract")
                        .param("x", "I1")
                        .no_body()
                )
        ),
        [
            (InterfacesCantContainConversionOrEqualityOperators, "=="),
            (InterfacesCantContainConversionOrEqualityOperators, "int"),
        ]
    );
}

#[test]
fn test_constructor_and_destructor_modifiers() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C")
                .member(MemberDecl::constructor().modifiers("public virtual"))
                .member(MemberDecl::destructor().modifiers("override"))
                .member(MemberDecl::static_constructor().modifiers("static virtual"))
        ),
        [
            (BadMemberFlag, "C"),
            (BadMemberFlag, "C"),
            (BadMemberFlag, "C"),
        ]
    );
}

#[test]
fn test_abstract_event_with_accessors() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            TypeDecl::class("C")
                .modifiers("public abstract")
                .member(MemberDecl::event("E1", "int").modifiers("public abstract").with_accessors())
                .member(MemberDecl::event("E2", "int").modifiers("public virtual").with_accessors())
        ),
        [(AbstractEventHasAccessors, "{")]
    );
}
