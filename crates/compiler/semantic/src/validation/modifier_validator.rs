//! # Modifier Validator
//!
//! Checks each member's modifier combination against its kind and the kind of
//! its containing type:
//! - duplicate keywords on members and accessors
//! - `abstract`/`virtual`/`sealed`/`override` on static members, with the
//!   interface exception and its language-version gates
//! - field, operator, constructor and event specific restrictions
//! - body presence against `abstract`/`extern`/`partial`
//!
//! `required` is left to the required-member validator and local functions to
//! the local-function validator.

use chumsky::span::SimpleSpan;
use sharpcheck_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tracing::trace;

use crate::language::{modifier_feature, Feature, ModifierSite};
use crate::model::{
    Accessibility, Member, MemberId, MemberKind, Modifier, ModifierList, OperatorShape, TypeDef,
};
use crate::validation::{ValidationContext, Validator};

/// Modifiers that only apply to members taking part in overriding
const OVERRIDE_FAMILY: [Modifier; 4] = [
    Modifier::Abstract,
    Modifier::Sealed,
    Modifier::Virtual,
    Modifier::Override,
];

pub struct ModifierValidator;

impl Validator for ModifierValidator {
    fn validate(&self, ctx: &ValidationContext<'_>, sink: &dyn DiagnosticSink) {
        for (ty_id, ty) in ctx.model.source_types() {
            trace!("[ModifierValidator] checking {}", ty.name);
            for (id, member) in ctx.model.members_of(ty_id) {
                MemberCheck {
                    ctx,
                    sink,
                    ty,
                    id,
                    member,
                }
                .run();
            }
        }
    }

    fn name(&self) -> &'static str {
        "ModifierValidator"
    }
}

struct MemberCheck<'a, 'm> {
    ctx: &'a ValidationContext<'m>,
    sink: &'a dyn DiagnosticSink,
    ty: &'a TypeDef,
    id: MemberId,
    member: &'a Member,
}

impl MemberCheck<'_, '_> {
    fn report(&self, diagnostic: Diagnostic, span: SimpleSpan<usize>) {
        self.sink
            .push(diagnostic.with_location(self.ctx.file_path().to_string(), span));
    }

    fn modifiers(&self) -> &ModifierList {
        &self.member.modifiers
    }

    fn has(&self, modifier: Modifier) -> bool {
        self.member.modifiers.contains(modifier)
    }

    fn display(&self) -> String {
        self.ctx.model.display_member(self.id)
    }

    /// Report `make(keyword)` at the member name for every listed modifier
    /// that is present
    fn flag_each(&self, modifiers: &[Modifier], make: impl Fn(&str) -> Diagnostic) {
        for modifier in modifiers {
            if self.has(*modifier) {
                self.report(make(modifier.keyword()), self.member.name_span);
            }
        }
    }

    fn run(&self) {
        self.check_duplicates();

        let in_interface = self.ty.is_interface();
        let is_static = self.has(Modifier::Static);
        match &self.member.kind {
            MemberKind::Field { .. } => self.check_field(in_interface),
            MemberKind::Constructor { .. } | MemberKind::Destructor { .. } => {
                self.flag_each(&OVERRIDE_FAMILY, Diagnostic::bad_member_flag);
            }
            MemberKind::Operator { .. } | MemberKind::Conversion { .. } => {
                if in_interface && self.is_conversion_or_equality() {
                    self.report(
                        Diagnostic::error(
                            DiagnosticCode::InterfacesCantContainConversionOrEqualityOperators,
                            "Interfaces cannot contain conversion, equality, or inequality operators"
                                .to_string(),
                        ),
                        self.member.name_span,
                    );
                    return;
                }
                self.check_operator(in_interface, is_static);
            }
            MemberKind::Method { .. } | MemberKind::Property { .. } | MemberKind::Event { .. } => {
                if is_static && in_interface {
                    self.check_static_interface_member();
                } else if is_static {
                    self.check_static_class_member();
                } else {
                    self.check_instance_member(in_interface);
                }
            }
        }

        self.check_event_accessors();
        self.check_body(in_interface);
    }

    fn check_duplicates(&self) {
        for duplicate in self.modifiers().duplicates() {
            self.report(
                Diagnostic::duplicate_modifier(duplicate.value().keyword()),
                duplicate.span(),
            );
        }
        for accessor in self.member.accessors() {
            for duplicate in accessor.modifiers.duplicates() {
                self.report(
                    Diagnostic::duplicate_modifier(duplicate.value().keyword()),
                    duplicate.span(),
                );
            }
            // Accessors take an accessibility and nothing else.
            for entry in accessor.modifiers.entries() {
                let modifier = *entry.value();
                if modifier.is_accessibility() || modifier == Modifier::Readonly {
                    continue;
                }
                self.report(Diagnostic::bad_member_flag(modifier.keyword()), entry.span());
            }
        }
    }

    fn is_conversion_or_equality(&self) -> bool {
        match &self.member.kind {
            MemberKind::Conversion { .. } => true,
            MemberKind::Operator {
                token, parameters, ..
            } => token.shape(parameters.len()) == OperatorShape::Equality,
            _ => false,
        }
    }

    fn check_field(&self, in_interface: bool) {
        if self.has(Modifier::Abstract) {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::AbstractField,
                    "The modifier 'abstract' is not valid on fields. Try using a property instead."
                        .to_string(),
                ),
                self.member.name_span,
            );
        }
        self.flag_each(
            &[Modifier::Sealed, Modifier::Virtual, Modifier::Override],
            Diagnostic::bad_member_flag,
        );

        if !in_interface {
            return;
        }
        if !self.member.is_static() {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::InterfacesCantContainFields,
                    "Interfaces cannot contain instance fields".to_string(),
                ),
                self.member.name_span,
            );
        } else if let Some(diagnostic) = self.static_gate() {
            self.report(diagnostic, self.member.name_span);
        }
    }

    fn check_operator(&self, in_interface: bool, is_static: bool) {
        if in_interface && is_static {
            self.check_static_interface_member();
            return;
        }

        self.flag_each(&[Modifier::Virtual, Modifier::Override], Diagnostic::bad_member_flag);
        if !in_interface {
            self.flag_each(&[Modifier::Abstract, Modifier::Sealed], Diagnostic::bad_member_flag);
        }

        let is_public = self.ctx.model.member_accessibility(self.id) == Accessibility::Public;
        if !is_static || !is_public {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::OperatorsMustBeStatic,
                    format!(
                        "User-defined operator '{}' must be declared static and public",
                        self.display()
                    ),
                ),
                self.member.name_span,
            );
        }
    }

    /// Static members of interfaces: `abstract` and `sealed` are gated by
    /// language version, `virtual` and `override` are rejected outright.
    fn check_static_interface_member(&self) {
        self.flag_each(&[Modifier::Override], Diagnostic::bad_member_flag);
        self.flag_each(&[Modifier::Virtual], static_not_virtual);
        if self.has(Modifier::Abstract) {
            self.flag_each(&[Modifier::Sealed], Diagnostic::bad_member_flag);
        }

        if let Some(diagnostic) = self.static_interface_gate() {
            self.report(diagnostic, self.member.name_span);
        }
    }

    /// At most one version diagnostic per static interface member.
    fn static_interface_gate(&self) -> Option<Diagnostic> {
        for modifier in [Modifier::Abstract, Modifier::Sealed] {
            if !self.has(modifier) {
                continue;
            }
            let Some(feature) = modifier_feature(modifier, ModifierSite::StaticInterfaceMember)
            else {
                continue;
            };
            if !self.ctx.supports(feature) {
                return Some(self.invalid_modifier(modifier, feature));
            }
        }

        let dim = Feature::DefaultInterfaceImplementation;
        if self.member.has_body() == Some(true) && !self.ctx.supports(dim) {
            return Some(self.feature_not_available(dim));
        }
        self.static_gate()
    }

    /// `static` inside an interface before interfaces could hold statics
    fn static_gate(&self) -> Option<Diagnostic> {
        let feature = modifier_feature(Modifier::Static, ModifierSite::StaticInterfaceMember)?;
        (self.has(Modifier::Static) && !self.ctx.supports(feature))
            .then(|| self.invalid_modifier(Modifier::Static, feature))
    }

    fn invalid_modifier(&self, modifier: Modifier, feature: Feature) -> Diagnostic {
        Diagnostic::invalid_modifier_for_language_version(
            modifier.keyword(),
            &self.ctx.language_version().to_string(),
            &feature.required_version().to_string(),
        )
    }

    fn feature_not_available(&self, feature: Feature) -> Diagnostic {
        Diagnostic::feature_not_available(
            feature.display_name(),
            &self.ctx.language_version().to_string(),
            &feature.required_version().to_string(),
        )
    }

    fn check_static_class_member(&self) {
        self.flag_each(
            &[Modifier::Abstract, Modifier::Virtual, Modifier::Override],
            static_not_virtual,
        );
        if self.has(Modifier::Sealed) {
            self.report(self.sealed_non_override(), self.member.name_span);
        }
    }

    fn sealed_non_override(&self) -> Diagnostic {
        Diagnostic::error(
            DiagnosticCode::SealedNonOverride,
            format!(
                "'{}' cannot be sealed because it is not an override",
                self.display()
            ),
        )
    }

    fn check_instance_member(&self, in_interface: bool) {
        let name_span = self.member.name_span;
        if !in_interface && self.has(Modifier::Sealed) && !self.has(Modifier::Override) {
            self.report(self.sealed_non_override(), name_span);
        }
        if self.has(Modifier::Extern) && self.has(Modifier::Abstract) {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::AbstractAndExtern,
                    format!("'{}' cannot be both extern and abstract", self.display()),
                ),
                name_span,
            );
        }

        let dispatched = [Modifier::Abstract, Modifier::Virtual, Modifier::Override]
            .into_iter()
            .any(|m| self.has(m));
        if dispatched && self.ctx.model.member_accessibility(self.id) == Accessibility::Private {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::VirtualPrivate,
                    format!(
                        "'{}': virtual or abstract members cannot be private",
                        self.display()
                    ),
                ),
                name_span,
            );
        }

        let dim = Feature::DefaultInterfaceImplementation;
        if in_interface && self.member.has_body() == Some(true) && !self.ctx.supports(dim) {
            self.report(self.feature_not_available(dim), name_span);
        }
    }

    fn check_event_accessors(&self) {
        if let MemberKind::Event {
            accessor_list: Some(span),
            ..
        } = &self.member.kind
        {
            if self.has(Modifier::Abstract) {
                self.report(
                    Diagnostic::error(
                        DiagnosticCode::AbstractEventHasAccessors,
                        format!(
                            "'{}': abstract event cannot use event accessor syntax",
                            self.display()
                        ),
                    ),
                    *span,
                );
            }
        }
    }

    fn check_body(&self, in_interface: bool) {
        let Some(has_body) = self.member.has_body() else {
            return;
        };
        let is_abstract = self.has(Modifier::Abstract);
        let is_extern = self.has(Modifier::Extern);

        if has_body && is_abstract && !is_extern {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::AbstractHasBody,
                    format!(
                        "'{}' cannot declare a body because it is marked abstract",
                        self.display()
                    ),
                ),
                self.member.name_span,
            );
        }

        // Instance members of interfaces without a body are implicitly abstract.
        let implicitly_abstract = in_interface && !self.member.is_static();
        if !has_body
            && !is_abstract
            && !is_extern
            && !self.has(Modifier::Partial)
            && !implicitly_abstract
        {
            self.report(
                Diagnostic::error(
                    DiagnosticCode::ConcreteMissingBody,
                    format!(
                        "'{}' must declare a body because it is not marked abstract, extern, or partial",
                        self.display()
                    ),
                ),
                self.member.name_span,
            );
        }
    }
}

fn static_not_virtual(modifier: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::StaticNotVirtual,
        format!("A static member cannot be marked as '{modifier}'"),
    )
}
