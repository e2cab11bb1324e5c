//! Tests for the sets-required-members exemption on constructors

use crate::*;

fn class_with_required(name: &str) -> TypeDecl {
    TypeDecl::class(name).modifiers("public").member(
        MemberDecl::property("Prop1", "int")
            .modifiers("public required")
            .get()
            .set(),
    )
}

#[test]
fn test_chaining_to_exempt_base_constructor() {
    let builder = || {
        ModelBuilder::new()
            .add_type(
                class_with_required("Base")
                    .member(MemberDecl::constructor().modifiers("public").sets_required_members()),
            )
            .add_type(
                TypeDecl::class("Derived")
                    .modifiers("public")
                    .base("Base")
                    .member(MemberDecl::constructor().modifiers("public").chains_to_base(0)),
            )
    };
    assert_diagnostics!(
        builder(),
        [(ChainingToSetsRequiredMembersRequiresSetsRequiredMembers, "base()")]
    );
    assert_eq!(
        messages(builder(), latest()),
        vec![
            "This constructor must add 'SetsRequiredMembers' because it chains to a constructor that has that attribute."
                .to_string()
        ]
    );
}

#[test]
fn test_chaining_to_exempt_this_constructor() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(
            class_with_required("C")
                .member(
                    MemberDecl::constructor()
                        .modifiers("public")
                        .param("x", "int")
                        .sets_required_members()
                )
                .member(MemberDecl::constructor().modifiers("public").chains_to_this(1))
                .member(
                    MemberDecl::constructor()
                        .modifiers("public")
                        .param("x", "int")
                        .param("y", "int")
                        .sets_required_members()
                        .chains_to_this(1)
                )
        ),
        [(ChainingToSetsRequiredMembersRequiresSetsRequiredMembers, "this(default)")]
    );
}

#[test]
fn test_chaining_to_plain_constructor_is_fine() {
    assert_semantic_ok!(ModelBuilder::new()
        .add_type(class_with_required("Base").member(MemberDecl::constructor().modifiers("public")))
        .add_type(
            TypeDecl::class("Derived")
                .modifiers("public")
                .base("Base")
                .member(MemberDecl::constructor().modifiers("public").chains_to_base(0))
        ));
}

#[test]
fn test_malformed_base_metadata() {
    let (model, diagnostics) = check(
        ModelBuilder::new()
            .add_type(
                TypeDecl::class("Base")
                    .modifiers("public")
                    .from_metadata(MetadataRequiredMembers::Malformed),
            )
            .add_type(TypeDecl::class("Implicit").modifiers("public").base("Base"))
            .add_type(
                TypeDecl::class("Explicit")
                    .modifiers("public")
                    .base("Base")
                    .member(MemberDecl::constructor().modifiers("public"))
                    .member(
                        MemberDecl::constructor()
                            .modifiers("public")
                            .param("x", "int")
                            .sets_required_members(),
                    ),
            ),
        latest(),
    );
    assert_eq!(
        code_and_text(&model, &diagnostics),
        vec![
            (DiagnosticCode::RequiredMembersBaseTypeInvalid, "Implicit".to_string()),
            (DiagnosticCode::RequiredMembersBaseTypeInvalid, "Explicit".to_string()),
        ]
    );
    assert_eq!(
        diagnostics.all()[0].message,
        "The required members list for the base type 'Base' is malformed and cannot be interpreted. To use this constructor, apply the 'SetsRequiredMembers' attribute."
    );
}

#[test]
fn test_missing_sets_required_members_attribute() {
    let well_known = WellKnownTypes {
        required_member_attribute: true,
        sets_required_members_attribute: false,
    };
    assert_diagnostics!(
        ModelBuilder::new()
            .well_known(well_known)
            .add_type(
                TypeDecl::record("R").modifiers("public").member(
                    MemberDecl::property("Prop1", "int")
                        .modifiers("public required")
                        .get()
                        .init()
                )
            )
            .add_type(TypeDecl::record("Plain").modifiers("public")),
        [(MissingPredefinedMember, "R")]
    );
}
