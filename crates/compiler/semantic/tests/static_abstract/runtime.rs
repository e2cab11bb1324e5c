use crate::*;

fn interface_with_statics() -> ModelBuilder {
    ModelBuilder::new()
        .add_type(
            TypeDecl::interface("I1")
                .member(MemberDecl::method("M01", "void").modifiers("static abstract").no_body())
                .member(MemberDecl::property("P01", "int").modifiers("abstract static").get())
                .member(MemberDecl::method("M02", "void").modifiers("static"))
                .member(MemberDecl::method("M03", "void").no_body()),
        )
        .add_type(
            TypeDecl::class("C")
                .implements("I1")
                .member(MemberDecl::method("M01", "void").modifiers("public static")),
        )
}

#[test]
fn test_runtime_without_support() {
    assert_diagnostics!(
        interface_with_statics(),
        without_runtime_support(),
        [
            (RuntimeDoesNotSupportStaticAbstractMembersInInterfaces, "M01"),
            (RuntimeDoesNotSupportStaticAbstractMembersInInterfaces, "P01"),
        ]
    );
}

#[test]
fn test_runtime_with_support() {
    assert_semantic_ok!(interface_with_statics());
}

#[test]
fn test_runtime_message() {
    let messages = messages(
        ModelBuilder::new().add_type(
            TypeDecl::interface("I1")
                .member(MemberDecl::event("E01", "int").modifiers("static abstract")),
        ),
        without_runtime_support(),
    );
    assert_eq!(
        messages,
        vec!["Target runtime doesn't support static abstract members in interfaces.".to_string()]
    );
}
