//! Tests for where `required` may appear and what it demands of the member

use crate::*;

fn public_class(name: &str) -> TypeDecl {
    TypeDecl::class(name).modifiers("public")
}

#[test]
fn test_required_ref_property_is_not_settable() {
    let builder = || {
        ModelBuilder::new().add_type(
            public_class("C")
                .member(MemberDecl::field("i", "int").modifiers("private"))
                .member(
                    MemberDecl::property("Prop", "int")
                        .modifiers("public required")
                        .by_ref()
                        .get(),
                ),
        )
    };
    assert_diagnostics!(builder(), [(RequiredMemberMustBeSettable, "Prop")]);
    assert_diagnostics!(
        builder(),
        version("10"),
        [
            (FeatureNotAvailableInVersion, "required"),
            (RequiredMemberMustBeSettable, "Prop"),
        ]
    );
}

#[test]
fn test_required_members_must_be_settable() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            public_class("C")
                .member(MemberDecl::field("Field1", "int").modifiers("public required readonly"))
                .member(MemberDecl::property("Prop1", "int").modifiers("public required").get())
                .member(
                    MemberDecl::property("Prop2", "int")
                        .modifiers("public required")
                        .get()
                        .init()
                )
                .member(MemberDecl::field("Field2", "int").modifiers("public required"))
        ),
        [
            (RequiredMemberMustBeSettable, "Field1"),
            (RequiredMemberMustBeSettable, "Prop1"),
        ]
    );
}

#[test]
fn test_settable_message() {
    let messages = messages(
        ModelBuilder::new().add_type(
            public_class("C")
                .member(MemberDecl::property("Prop1", "int").modifiers("public required").get()),
        ),
        latest(),
    );
    assert_eq!(
        messages,
        vec!["Required member 'C.Prop1' must be settable.".to_string()]
    );
}

#[test]
fn test_required_on_invalid_members() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            public_class("C")
                .member(MemberDecl::method("M", "void").modifiers("public required"))
                .member(MemberDecl::field("F", "int").modifiers("public static required"))
                .member(MemberDecl::field("K", "int").modifiers("public const required"))
                .member(
                    MemberDecl::indexer("int")
                        .modifiers("public required")
                        .param("i", "int")
                        .get()
                        .set()
                )
                .member(MemberDecl::event("E", "int").modifiers("public required"))
        ),
        [
            (BadMemberFlag, "required"),
            (BadMemberFlag, "required"),
            (BadMemberFlag, "required"),
            (BadMemberFlag, "required"),
            (BadMemberFlag, "required"),
        ]
    );
}

#[test]
fn test_required_member_visibility() {
    assert_diagnostics!(
        ModelBuilder::new()
            .add_type(
                public_class("C")
                    .member(
                        MemberDecl::property("Prop1", "int")
                            .modifiers("internal required")
                            .get()
                            .set()
                    )
                    .member(
                        MemberDecl::property("Prop2", "int")
                            .modifiers("public required")
                            .get()
                            .accessor(AccessorDecl::new(AccessorKind::Set).modifiers("private"))
                    )
                    .member(
                        MemberDecl::property("Prop3", "int")
                            .modifiers("protected required")
                            .get()
                            .accessor(AccessorDecl::new(AccessorKind::Set).modifiers("private"))
                    )
                    .member(MemberDecl::field("Field1", "int").modifiers("public required"))
            )
            .add_type(
                TypeDecl::class("D")
                    .modifiers("internal")
                    .member(
                        MemberDecl::property("Prop1", "int")
                            .modifiers("internal required")
                            .get()
                            .set()
                    )
            ),
        [
            (RequiredMemberCannotBeLessVisibleThanContainingType, "Prop1"),
            (RequiredMemberCannotBeLessVisibleThanContainingType, "Prop2"),
            (RequiredMemberCannotBeLessVisibleThanContainingType, "Prop3"),
        ]
    );
}

#[test]
fn test_nested_type_visibility_is_effective() {
    // A public member of a private nested type is as visible as the type.
    assert_semantic_ok!(ModelBuilder::new()
        .add_type(public_class("Outer"))
        .add_type(
            TypeDecl::class("Inner")
                .modifiers("private")
                .nested_in("Outer")
                .member(
                    MemberDecl::property("Prop1", "int")
                        .modifiers("internal required")
                        .get()
                        .set()
                )
        ));
}

#[test]
fn test_visibility_message() {
    let messages = messages(
        ModelBuilder::new().add_type(
            public_class("C").member(
                MemberDecl::field("Field1", "int").modifiers("internal required"),
            ),
        ),
        latest(),
    );
    assert_eq!(
        messages,
        vec![
            "Required member 'C.Field1' cannot be less visible or have a setter less visible than the containing type 'C'."
                .to_string()
        ]
    );
}

#[test]
fn test_required_before_csharp_11() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            public_class("C").member(MemberDecl::field("Field1", "int").modifiers("public required"))
        ),
        version("10"),
        [(FeatureNotAvailableInVersion, "required")]
    );
}

#[test]
fn test_duplicate_required() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            public_class("C")
                .member(MemberDecl::field("Field1", "int").modifiers("public required required"))
        ),
        [(DuplicateModifier, "required")]
    );
}

#[test]
fn test_missing_required_member_attribute() {
    let well_known = WellKnownTypes {
        required_member_attribute: false,
        sets_required_members_attribute: true,
    };
    let (model, diagnostics) = check(
        ModelBuilder::new()
            .well_known(well_known)
            .add_type(
                public_class("C")
                    .member(MemberDecl::field("Field1", "int").modifiers("internal required"))
                    .member(MemberDecl::property("Prop1", "int").modifiers("public required").get()),
            )
            .add_type(public_class("D").member(MemberDecl::field("Field1", "int").modifiers("public"))),
        version("10"),
    );
    assert_eq!(
        code_and_text(&model, &diagnostics),
        vec![(DiagnosticCode::MissingPredefinedMember, "C".to_string())]
    );
    assert_eq!(
        diagnostics.all()[0].message,
        "Missing compiler required member 'System.Runtime.CompilerServices.RequiredMemberAttribute..ctor'"
    );
}
