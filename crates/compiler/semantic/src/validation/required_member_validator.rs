//! # Required Member Validator
//!
//! Declaration rules for `required` fields and properties (legal targets,
//! settability, visibility, hiding and overriding), constructor rules for the
//! sets-required-members exemption, and the per-site check that every
//! `new` expression assigns all required members of the created type.
//!
//! The required-member sets themselves come from
//! [`crate::required_members::RequiredMembersTable`].

use rustc_hash::FxHashSet;
use sharpcheck_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tracing::trace;

use crate::language::{modifier_feature, ModifierSite};
use crate::model::{
    GenericInstantiation, InitializerEntryKind, MemberId, MemberKind, Modifier, ObjectCreation,
    ParameterlessConstructor, TypeId, TypeKind, WellKnownTypes,
};
use crate::required_members::is_required_declaration;
use crate::validation::{ValidationContext, Validator};

pub struct RequiredMemberValidator;

impl Validator for RequiredMemberValidator {
    fn validate(&self, ctx: &ValidationContext<'_>, sink: &dyn DiagnosticSink) {
        for (ty_id, ty) in ctx.model.source_types() {
            trace!(
                "[RequiredMemberValidator] {} has {} required members",
                ty.name,
                ctx.required.get(ty_id).len()
            );
            self.check_declarations(ctx, ty_id, sink);
            self.check_hiding(ctx, ty_id, sink);
            self.check_constructors(ctx, ty_id, sink);
        }

        for creation in ctx.model.creations() {
            self.check_creation(ctx, creation, sink);
        }
        for instantiation in ctx.model.instantiations() {
            self.check_new_constraint(ctx, instantiation, sink);
        }
    }

    fn name(&self) -> &'static str {
        "RequiredMemberValidator"
    }
}

impl RequiredMemberValidator {
    fn check_declarations(
        &self,
        ctx: &ValidationContext<'_>,
        ty_id: TypeId,
        sink: &dyn DiagnosticSink,
    ) {
        let model = ctx.model;
        let file_path = ctx.file_path();
        let ty = model.ty(ty_id);
        let declared: Vec<MemberId> = model
            .members_of(ty_id)
            .filter(|(_, m)| m.modifiers.contains(Modifier::Required))
            .map(|(id, _)| id)
            .collect();
        if declared.is_empty() {
            return;
        }

        // Without the marker attribute nothing about `required` can be emitted.
        if !model.well_known().required_member_attribute {
            sink.push(
                Diagnostic::missing_predefined_member(
                    WellKnownTypes::REQUIRED_MEMBER_ATTRIBUTE,
                    ".ctor",
                )
                .with_location(file_path.to_string(), ty.name_span),
            );
            return;
        }

        let type_accessibility = model.effective_accessibility(ty_id);
        let gate = modifier_feature(Modifier::Required, ModifierSite::TypeMember)
            .filter(|feature| !ctx.supports(*feature));

        for id in declared {
            let member = model.member(id);
            let Some(required_span) = member.modifiers.span_of(Modifier::Required) else {
                continue;
            };
            let report = |diagnostic: Diagnostic, span| {
                sink.push(diagnostic.with_location(file_path.to_string(), span));
            };

            if let Some(feature) = gate {
                report(
                    Diagnostic::feature_not_available(
                        feature.display_name(),
                        &ctx.language_version().to_string(),
                        &feature.required_version().to_string(),
                    ),
                    required_span,
                );
            }

            let legal_container = !matches!(ty.kind, TypeKind::Enum | TypeKind::Delegate);
            if !is_required_declaration(model, id) || !legal_container {
                report(Diagnostic::bad_member_flag("required"), required_span);
                continue;
            }

            let settable = match &member.kind {
                MemberKind::Field { .. } => !member.modifiers.contains(Modifier::Readonly),
                MemberKind::Property {
                    is_ref, accessors, ..
                } => !is_ref && accessors.iter().any(|a| a.kind.is_setter()),
                _ => true,
            };
            if !settable {
                report(
                    Diagnostic::error(
                        DiagnosticCode::RequiredMemberMustBeSettable,
                        format!(
                            "Required member '{}' must be settable.",
                            model.display_member(id)
                        ),
                    ),
                    member.name_span,
                );
            }

            let member_accessibility = model.member_accessibility(id);
            let setter_accessibility = member
                .accessors()
                .iter()
                .find(|a| a.kind.is_setter())
                .map(|a| {
                    a.modifiers
                        .declared_accessibility()
                        .unwrap_or(member_accessibility)
                });
            let less_visible = !member_accessibility.is_at_least(type_accessibility)
                || setter_accessibility.is_some_and(|s| !s.is_at_least(type_accessibility));
            if less_visible {
                report(
                    Diagnostic::error(
                        DiagnosticCode::RequiredMemberCannotBeLessVisibleThanContainingType,
                        format!(
                            "Required member '{}' cannot be less visible or have a setter less visible than the containing type '{}'.",
                            model.display_member(id),
                            model.display_type_def(ty_id),
                        ),
                    ),
                    member.name_span,
                );
            }
        }
    }

    /// Derived declarations that shadow a required member of a base class
    fn check_hiding(&self, ctx: &ValidationContext<'_>, ty_id: TypeId, sink: &dyn DiagnosticSink) {
        let model = ctx.model;
        let Some(base) = model.base_type(ty_id) else {
            return;
        };
        let base_set = ctx.required.get(base);
        if base_set.is_empty() {
            return;
        }

        for (id, member) in model.members_of(ty_id) {
            if member.is_constructor() {
                continue;
            }
            let Some(hidden) = base_set.get(&member.name) else {
                continue;
            };
            let is_required = member.modifiers.contains(Modifier::Required);

            let diagnostic = if member.modifiers.contains(Modifier::Override) {
                if is_required || member.overridden != Some(hidden) {
                    continue;
                }
                Diagnostic::error(
                    DiagnosticCode::OverrideMustHaveRequired,
                    format!(
                        "'{}' must be required because it overrides required member '{}'",
                        model.display_member(id),
                        model.display_member(hidden),
                    ),
                )
            } else if !is_required {
                Diagnostic::error(
                    DiagnosticCode::RequiredMemberCannotBeHidden,
                    format!(
                        "Required member '{}' cannot be hidden by '{}'.",
                        model.display_member(hidden),
                        model.display_member(id),
                    ),
                )
            } else {
                continue;
            };
            let hidden_member = model.member(hidden);
            let diagnostic = if model.ty(hidden_member.containing_type).is_from_source() {
                diagnostic.with_related_span(
                    hidden_member.name_span,
                    "required member declared here".to_string(),
                )
            } else {
                diagnostic
            };
            sink.push(diagnostic.with_location(ctx.file_path().to_string(), member.name_span));
        }
    }

    fn check_constructors(
        &self,
        ctx: &ValidationContext<'_>,
        ty_id: TypeId,
        sink: &dyn DiagnosticSink,
    ) {
        let model = ctx.model;
        let file_path = ctx.file_path();
        let ty = model.ty(ty_id);

        for (_, ctor) in model.instance_constructors_of(ty_id) {
            let MemberKind::Constructor {
                sets_required_members: false,
                initializer: Some(initializer),
                ..
            } = &ctor.kind
            else {
                continue;
            };
            let chains_to_exempt = initializer.target.is_some_and(|target| {
                matches!(
                    model.member(target).kind,
                    MemberKind::Constructor {
                        sets_required_members: true,
                        ..
                    }
                )
            });
            if chains_to_exempt {
                sink.push(
                    Diagnostic::error(
                        DiagnosticCode::ChainingToSetsRequiredMembersRequiresSetsRequiredMembers,
                        "This constructor must add 'SetsRequiredMembers' because it chains to a constructor that has that attribute."
                            .to_string(),
                    )
                    .with_location(file_path.to_string(), initializer.span),
                );
            }
        }

        let set = ctx.required.get(ty_id);
        let synthesized = |id: MemberId| {
            matches!(
                model.member(id).kind,
                MemberKind::Constructor {
                    is_synthesized_copy: true,
                    ..
                }
            )
        };

        if matches!(ty.kind, TypeKind::Record | TypeKind::RecordStruct)
            && set.needs_checking()
            && !model.well_known().sets_required_members_attribute
            && model
                .instance_constructors_of(ty_id)
                .any(|(id, _)| synthesized(id))
        {
            sink.push(
                Diagnostic::missing_predefined_member(
                    WellKnownTypes::SETS_REQUIRED_MEMBERS_ATTRIBUTE,
                    ".ctor",
                )
                .with_location(file_path.to_string(), ty.name_span),
            );
        }

        let Some(origin) = set.invalid_origin().filter(|origin| *origin != ty_id) else {
            return;
        };
        if ty.is_interface() {
            return;
        }
        let message = format!(
            "The required members list for the base type '{}' is malformed and cannot be interpreted. To use this constructor, apply the 'SetsRequiredMembers' attribute.",
            model.display_type_def(origin)
        );
        let explicit: Vec<_> = model
            .instance_constructors_of(ty_id)
            .filter(|(id, _)| !synthesized(*id))
            .collect();
        if explicit.is_empty() {
            // The implicit constructor is reported at the type.
            sink.push(
                Diagnostic::error(DiagnosticCode::RequiredMembersBaseTypeInvalid, message)
                    .with_location(file_path.to_string(), ty.name_span),
            );
            return;
        }
        for (id, ctor) in explicit {
            if ctx.required.is_exempt(id) {
                continue;
            }
            sink.push(
                Diagnostic::error(DiagnosticCode::RequiredMembersBaseTypeInvalid, message.clone())
                    .with_location(file_path.to_string(), ctor.name_span),
            );
        }
    }

    fn check_creation(
        &self,
        ctx: &ValidationContext<'_>,
        creation: &ObjectCreation,
        sink: &dyn DiagnosticSink,
    ) {
        let model = ctx.model;
        let file_path = ctx.file_path();
        let Some(ty) = creation.created.named_id() else {
            return;
        };
        let set = ctx.required.get(ty);
        if !set.needs_checking() {
            return;
        }
        if creation
            .constructor
            .is_some_and(|ctor| ctx.required.is_exempt(ctor))
        {
            return;
        }

        if set.invalid_origin().is_some() {
            sink.push(
                Diagnostic::error(
                    DiagnosticCode::RequiredMembersInvalid,
                    format!(
                        "The required members list for '{}' is malformed and cannot be interpreted.",
                        model.display_type(&creation.created)
                    ),
                )
                .with_location(file_path.to_string(), creation.location),
            );
            return;
        }

        let mut assigned = FxHashSet::default();
        for entry in &creation.initializers {
            if !set.contains(entry.member) {
                continue;
            }
            assigned.insert(entry.member);
            if entry.kind == InitializerEntryKind::NestedInitializer {
                sink.push(
                    Diagnostic::error(
                        DiagnosticCode::RequiredMembersMustBeAssignedValue,
                        format!(
                            "Required member '{}' must be assigned a value, it cannot use a nested member or collection initializer.",
                            model.display_member(entry.member)
                        ),
                    )
                    .with_location(file_path.to_string(), entry.span),
                );
            }
        }

        for member in set.iter().filter(|m| !assigned.contains(m)) {
            sink.push(
                Diagnostic::error(
                    DiagnosticCode::RequiredMemberMustBeSet,
                    format!(
                        "Required member '{}' must be set in the object initializer or attribute constructor.",
                        model.display_member(member)
                    ),
                )
                .with_location(file_path.to_string(), creation.location),
            );
        }
    }

    /// A type whose parameterless constructor leaves required members unset
    /// cannot be created through a `new()` constraint.
    fn check_new_constraint(
        &self,
        ctx: &ValidationContext<'_>,
        instantiation: &GenericInstantiation,
        sink: &dyn DiagnosticSink,
    ) {
        let model = ctx.model;
        let Some(param) = model.type_param(instantiation.type_param) else {
            return;
        };
        let Some(argument) = instantiation.argument.named_id() else {
            return;
        };
        if !param.has_new_constraint
            || model.ty(argument).is_interface()
            || !ctx.required.get(argument).needs_checking()
        {
            return;
        }
        match model.parameterless_constructor(argument) {
            ParameterlessConstructor::Declared(ctor) if ctx.required.is_exempt(ctor) => return,
            ParameterlessConstructor::None => return,
            ParameterlessConstructor::Declared(_) | ParameterlessConstructor::Implicit => {}
        }

        let argument_name = model.display_type(&instantiation.argument);
        sink.push(
            Diagnostic::error(
                DiagnosticCode::NewConstraintCannotHaveRequiredMembers,
                format!(
                    "'{argument_name}' cannot satisfy the 'new()' constraint on parameter '{}' in the generic type or method '{}' because '{argument_name}' has required members.",
                    param.name,
                    model.display_type_param_owner(instantiation.type_param.owner),
                ),
            )
            .with_location(ctx.file_path().to_string(), instantiation.span),
        );
    }
}
