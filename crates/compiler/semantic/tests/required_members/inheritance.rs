//! Tests for required members across base types: hiding and overriding

use crate::*;

fn base_with_required_prop() -> TypeDecl {
    TypeDecl::class("B").modifiers("public").member(
        MemberDecl::property("Prop", "int")
            .modifiers("public virtual required")
            .get()
            .set(),
    )
}

#[test]
fn test_hiding_required_member() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(base_with_required_prop()).add_type(
            TypeDecl::class("D")
                .modifiers("public")
                .base("B")
                .member(MemberDecl::property("Prop", "int").modifiers("public new").get().set())
        ),
        [(RequiredMemberCannotBeHidden, "Prop")]
    );
}

#[test]
fn test_hiding_with_field_and_method() {
    assert_diagnostics!(
        ModelBuilder::new().add_type(base_with_required_prop()).add_type(
            TypeDecl::class("D")
                .modifiers("public")
                .base("B")
                .member(MemberDecl::method("Prop", "void").modifiers("public new"))
        ),
        [(RequiredMemberCannotBeHidden, "Prop")]
    );
}

#[test]
fn test_hiding_message() {
    let messages = messages(
        ModelBuilder::new().add_type(base_with_required_prop()).add_type(
            TypeDecl::class("D")
                .modifiers("public")
                .base("B")
                .member(MemberDecl::field("Prop", "int").modifiers("public new")),
        ),
        latest(),
    );
    assert_eq!(
        messages,
        vec!["Required member 'B.Prop' cannot be hidden by 'D.Prop'.".to_string()]
    );
}

#[test]
fn test_hiding_points_at_hidden_member() {
    let (model, diagnostics) = check(
        ModelBuilder::new().add_type(base_with_required_prop()).add_type(
            TypeDecl::class("D")
                .modifiers("public")
                .base("B")
                .member(MemberDecl::field("Prop", "int").modifiers("public new")),
        ),
        latest(),
    );
    let diagnostic = diagnostics.iter().next().unwrap();
    let [(span, note)] = diagnostic.related_spans.as_slice() else {
        panic!("expected one related span, got {:?}", diagnostic.related_spans);
    };
    assert_eq!(model.source().slice(*span), "Prop");
    assert!(span.start < diagnostic.span.start);
    assert_eq!(note, "required member declared here");
}

#[test]
fn test_redeclaring_as_required_is_allowed() {
    assert_semantic_ok!(ModelBuilder::new().add_type(base_with_required_prop()).add_type(
        TypeDecl::class("D")
            .modifiers("public")
            .base("B")
            .member(
                MemberDecl::property("Prop", "int")
                    .modifiers("public new required")
                    .get()
                    .set()
            )
    ));
    assert_semantic_ok!(ModelBuilder::new().add_type(base_with_required_prop()).add_type(
        TypeDecl::class("D")
            .modifiers("public")
            .base("B")
            .member(
                MemberDecl::property("Prop", "int")
                    .modifiers("public required override")
                    .get()
                    .set()
            )
    ));
}

#[test]
fn test_override_must_be_required() {
    let builder = || {
        ModelBuilder::new().add_type(base_with_required_prop()).add_type(
            TypeDecl::class("D")
                .modifiers("public")
                .base("B")
                .member(MemberDecl::property("Prop", "int").modifiers("public override").get().set()),
        )
    };
    assert_diagnostics!(builder(), [(OverrideMustHaveRequired, "Prop")]);
    assert_eq!(
        messages(builder(), latest()),
        vec!["'D.Prop' must be required because it overrides required member 'B.Prop'".to_string()]
    );
}

#[test]
fn test_hiding_two_levels_down() {
    assert_diagnostics!(
        ModelBuilder::new()
            .add_type(base_with_required_prop())
            .add_type(TypeDecl::class("M").modifiers("public").base("B"))
            .add_type(
                TypeDecl::class("D")
                    .modifiers("public")
                    .base("M")
                    .member(MemberDecl::field("Prop", "int").modifiers("public new"))
            ),
        [(RequiredMemberCannotBeHidden, "Prop")]
    );
}

#[test]
fn test_metadata_base_matches_source_base() {
    let codes = |base: TypeDecl, creation: CreationDecl| {
        let (model, diagnostics) = check(
            ModelBuilder::new()
                .add_type(base)
                .add_type(
                    TypeDecl::class("D")
                        .modifiers("public")
                        .base("B")
                        .member(
                            MemberDecl::property("Prop", "int")
                                .modifiers("public required override")
                                .get()
                                .set(),
                        ),
                )
                .add_creation(creation),
            latest(),
        );
        code_and_text(&model, &diagnostics)
            .into_iter()
            .map(|(code, _)| code)
            .collect::<Vec<_>>()
    };
    let metadata_base =
        || base_with_required_prop().from_metadata(MetadataRequiredMembers::WellFormed);

    let unset = codes(base_with_required_prop(), CreationDecl::new("D"));
    assert_eq!(unset, vec![DiagnosticCode::RequiredMemberMustBeSet]);
    assert_eq!(codes(metadata_base(), CreationDecl::new("D")), unset);

    let set = || CreationDecl::new("D").assign("Prop");
    assert!(codes(base_with_required_prop(), set()).is_empty());
    assert!(codes(metadata_base(), set()).is_empty());
}
