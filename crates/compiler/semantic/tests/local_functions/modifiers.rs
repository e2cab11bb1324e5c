use super::host;
use crate::*;

#[test]
fn test_allowed_modifiers() {
    assert_semantic_ok!(host(LocalFunctionDecl::new("F").modifiers("static async")));
    assert_semantic_ok!(host(LocalFunctionDecl::new("F").modifiers("unsafe")));
    assert_semantic_ok!(host(LocalFunctionDecl::new("F").modifiers("static extern")));
}

#[test]
fn test_bad_modifiers() {
    assert_diagnostics!(
        host(
            LocalFunctionDecl::new("F")
                .modifiers("public static")
                .nested(LocalFunctionDecl::new("G").modifiers("virtual"))
        ),
        [(BadMemberFlag, "public"), (BadMemberFlag, "virtual")]
    );
}

#[test]
fn test_duplicate_modifiers_are_reported_once() {
    assert_diagnostics!(
        host(LocalFunctionDecl::new("F").modifiers("static static")),
        [(DuplicateModifier, "static")]
    );
    assert_diagnostics!(
        host(LocalFunctionDecl::new("F").modifiers("readonly readonly")),
        [(BadMemberFlag, "readonly"), (DuplicateModifier, "readonly")]
    );
}

#[test]
fn test_static_local_function_before_csharp_8() {
    let builder = || host(LocalFunctionDecl::new("F").modifiers("static"));
    assert_diagnostics!(
        builder(),
        version("7.3"),
        [(FeatureNotAvailableInVersion, "static")]
    );
    assert_semantic_ok!(builder(), version("8.0"));
}
