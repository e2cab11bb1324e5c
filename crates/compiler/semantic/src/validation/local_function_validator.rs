//! # Local Function Validator
//!
//! Modifier rules for local functions and the capture rules of `static`
//! local functions: a static local function, and everything nested inside
//! it, cannot reach `this`, `base`, instance members through an implicit
//! `this`, or variables declared outside the static function.

use chumsky::span::SimpleSpan;
use sharpcheck_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tracing::trace;

use crate::language::{modifier_feature, ModifierSite};
use crate::model::{DeclarationScope, LocalFunction, Member, Modifier, Reference, ReferenceKind};
use crate::validation::{ValidationContext, Validator};

const ALLOWED_MODIFIERS: [Modifier; 4] = [
    Modifier::Static,
    Modifier::Async,
    Modifier::Unsafe,
    Modifier::Extern,
];

pub struct LocalFunctionValidator;

impl Validator for LocalFunctionValidator {
    fn validate(&self, ctx: &ValidationContext<'_>, sink: &dyn DiagnosticSink) {
        for (ty_id, _) in ctx.model.source_types() {
            for (_, member) in ctx.model.members_of(ty_id) {
                let mut walk = Walk {
                    ctx,
                    sink,
                    member,
                    path: Vec::new(),
                    innermost_static: None,
                };
                for function in &member.local_functions {
                    walk.visit(function);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "LocalFunctionValidator"
    }
}

/// Depth-first traversal of one member's local functions.
struct Walk<'a, 'm> {
    ctx: &'a ValidationContext<'m>,
    sink: &'a dyn DiagnosticSink,
    member: &'a Member,
    /// Preorder indices of the functions enclosing the current one, outermost first
    path: Vec<usize>,
    /// Depth in `path` of the innermost static function
    innermost_static: Option<usize>,
}

impl Walk<'_, '_> {
    fn visit(&mut self, function: &LocalFunction) {
        trace!(
            "[LocalFunctionValidator] {}.{} (static: {})",
            self.member.name,
            function.name,
            function.is_static()
        );
        self.check_modifiers(function);

        let depth = self.path.len();
        let saved = self.innermost_static;
        self.path.push(function.index);
        if function.is_static() {
            self.innermost_static = Some(depth);
        }

        if let Some(static_depth) = self.innermost_static {
            for reference in &function.references {
                self.check_capture(reference, static_depth);
            }
        }
        for nested in &function.nested {
            self.visit(nested);
        }

        self.path.pop();
        self.innermost_static = saved;
    }

    fn report(&self, diagnostic: Diagnostic, span: SimpleSpan<usize>) {
        self.sink
            .push(diagnostic.with_location(self.ctx.file_path().to_string(), span));
    }

    fn check_modifiers(&self, function: &LocalFunction) {
        for duplicate in function.modifiers.duplicates() {
            self.report(
                Diagnostic::duplicate_modifier(duplicate.value().keyword()),
                duplicate.span(),
            );
        }

        let mut seen = Vec::new();
        for entry in function.modifiers.entries() {
            let modifier = *entry.value();
            if seen.contains(&modifier) {
                continue;
            }
            seen.push(modifier);
            if !ALLOWED_MODIFIERS.contains(&modifier) {
                self.report(Diagnostic::bad_member_flag(modifier.keyword()), entry.span());
            }
        }

        let Some(feature) = modifier_feature(Modifier::Static, ModifierSite::LocalFunction) else {
            return;
        };
        if let Some(span) = function.modifiers.span_of(Modifier::Static) {
            if !self.ctx.supports(feature) {
                self.report(
                    Diagnostic::feature_not_available(
                        feature.display_name(),
                        &self.ctx.language_version().to_string(),
                        &feature.required_version().to_string(),
                    ),
                    span,
                );
            }
        }
    }

    fn check_capture(&self, reference: &Reference, static_depth: usize) {
        let model = self.ctx.model;
        let diagnostic = match &reference.kind {
            ReferenceKind::This | ReferenceKind::Base => this_capture(),
            ReferenceKind::ImplicitThis { member } => {
                let instance = model
                    .lookup_member(self.member.containing_type, member)
                    .is_some_and(|id| !model.member(id).is_static());
                if !instance {
                    return;
                }
                this_capture()
            }
            ReferenceKind::Variable {
                name,
                declared_in,
                is_const,
            } => {
                let outside = match declared_in {
                    DeclarationScope::Member => true,
                    DeclarationScope::LocalFunction(index) => {
                        self.path[..static_depth].contains(index)
                    }
                };
                if *is_const || !outside {
                    return;
                }
                Diagnostic::error(
                    DiagnosticCode::StaticLocalFunctionCannotCaptureVariable,
                    format!("A static local function cannot contain a reference to '{name}'."),
                )
            }
        };
        self.report(diagnostic, reference.span);
    }
}

fn this_capture() -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::StaticLocalFunctionCannotCaptureThis,
        "A static local function cannot contain a reference to 'this' or 'base'.".to_string(),
    )
}
