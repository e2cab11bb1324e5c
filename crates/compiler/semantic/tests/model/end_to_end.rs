//! Whole models through every rule family

use sharpcheck_compiler_semantic::{create_default_registry, ModelDecl, ValidationContext};

use crate::*;

fn mixed_model() -> ModelBuilder {
    ModelBuilder::new()
        .path("mixed.cs")
        .add_type(
            TypeDecl::interface("I1")
                .type_param(TypeParamDecl::new("T").covariant())
                .member(
                    MemberDecl::method("M01", "void")
                        .modifiers("static virtual")
                        .param("x", "T"),
                ),
        )
        .add_type(
            TypeDecl::class("C")
                .modifiers("public")
                .member(MemberDecl::field("Field1", "int").modifiers("public required"))
                .member(
                    MemberDecl::method("M", "void").local_function(
                        LocalFunctionDecl::new("F").modifiers("static").uses_this(),
                    ),
                ),
        )
        .add_creation(CreationDecl::new("C"))
}

#[test]
fn test_every_rule_family_reports() {
    assert_diagnostics!(
        mixed_model(),
        [
            (StaticNotVirtual, "M01"),
            (UnexpectedVariance, "M01"),
            (StaticLocalFunctionCannotCaptureThis, "this"),
            (RequiredMemberMustBeSet, "C"),
        ]
    );
}

#[test]
fn test_diagnostics_carry_the_model_path() {
    let (_, diagnostics) = check(mixed_model(), latest());
    assert!(diagnostics.iter().all(|d| d.file_path == "mixed.cs"));
}

#[test]
fn test_default_registry_runs_all_families() {
    let registry = create_default_registry();
    assert_eq!(registry.len(), 4);

    let model = build(mixed_model());
    let ctx = ValidationContext::new(&model, latest());
    assert_eq!(registry.validate_all(&ctx).len(), 4);
}

#[test]
fn test_validation_is_deterministic() {
    let first = messages(mixed_model(), latest());
    let second = messages(mixed_model(), latest());
    assert_eq!(first, second);
}

#[test]
fn test_model_from_json_declarations() {
    let json = r#"{
        "path": "from_json.cs",
        "types": [
            {
                "name": "I1",
                "kind": "interface",
                "members": [
                    { "name": "M01", "kind": "method", "modifiers": ["static", "virtual"] }
                ]
            }
        ]
    }"#;
    let decl: ModelDecl = serde_json::from_str(json).expect("declarations should parse");
    assert_diagnostics!(
        ModelBuilder::from_decl(decl),
        [(StaticNotVirtual, "M01")]
    );
}

#[test]
fn test_clean_model() {
    assert_semantic_ok!(ModelBuilder::new()
        .add_type(
            TypeDecl::interface("INumber")
                .type_param(TypeParamDecl::new("T").constraint("INumber<T>"))
                .member(
                    MemberDecl::operator(OperatorToken::Plus, "T")
                        .modifiers("static abstract")
                        .param("left", "T")
                        .param("right", "T")
                        .no_body()
                )
                .member(MemberDecl::property("Zero", "T").modifiers("static abstract").get())
        )
        .add_type(
            TypeDecl::record("Point")
                .modifiers("public")
                .member(MemberDecl::property("X", "int").modifiers("public required").get().init())
        )
        .add_creation(CreationDecl::new("Point").assign("X"))
        .add_creation(CreationDecl::new("Point").copy()));
}

#[test]
fn test_errors_with_older_language_version() {
    assert_semantic_err!(mixed_model(), version("7.3"));
}
