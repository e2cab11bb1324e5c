//! # Static Abstract Interface Member Validator
//!
//! Rules that only exist because interfaces can declare static members that
//! implementing types must supply:
//! - the target runtime must be able to represent them
//! - variant type parameters must be used safely in their signatures, the
//!   same way as in instance member signatures
//! - operator declarations must have the right operand shapes
//! - an interface type argument cannot stand in for a type parameter whose
//!   constraint needs static members it does not implement

use sharpcheck_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tracing::trace;

use crate::model::{
    GenericInstantiation, MemberId, MemberKind, Modifier, SymbolModel, TypeId, TypeRef, Variance,
};
use crate::validation::variance::member_violations;
use crate::validation::{operator_signatures, ValidationContext, Validator};

pub struct StaticAbstractValidator;

impl Validator for StaticAbstractValidator {
    fn validate(&self, ctx: &ValidationContext<'_>, sink: &dyn DiagnosticSink) {
        let model = ctx.model;
        let file_path = ctx.file_path();

        for (ty_id, ty) in model.source_types() {
            trace!("[StaticAbstractValidator] checking {}", ty.name);
            if ty.is_interface() {
                if !ctx.options.runtime.supports_static_abstract_members_in_interfaces {
                    for (_, member) in model.static_abstract_members(ty_id) {
                        sink.push(
                            Diagnostic::error(
                                DiagnosticCode::RuntimeDoesNotSupportStaticAbstractMembersInInterfaces,
                                "Target runtime doesn't support static abstract members in interfaces."
                                    .to_string(),
                            )
                            .with_location(file_path.to_string(), member.name_span),
                        );
                    }
                }
                self.check_variance(model, ty_id, file_path, sink);
            }

            for (id, member) in model.members_of(ty_id) {
                if !matches!(member.kind, MemberKind::Operator { .. }) || !member.is_static() {
                    continue;
                }
                if let Some(diagnostic) = operator_signatures::check_operator(model, id) {
                    sink.push(diagnostic.with_location(file_path.to_string(), member.name_span));
                }
            }
        }

        for instantiation in model.instantiations() {
            self.check_instantiation(model, instantiation, file_path, sink);
        }
    }

    fn name(&self) -> &'static str {
        "StaticAbstractValidator"
    }
}

impl StaticAbstractValidator {
    fn check_variance(
        &self,
        model: &SymbolModel,
        interface: TypeId,
        file_path: &str,
        sink: &dyn DiagnosticSink,
    ) {
        let def = model.ty(interface);
        if def.type_params.iter().all(|p| p.variance == Variance::Invariant) {
            return;
        }

        for (id, member) in model.members_of(interface) {
            // Static members outside the abstract/virtual family have no implementer.
            let dispatched = member.modifiers.contains(Modifier::Abstract)
                || member.modifiers.contains(Modifier::Virtual);
            if member.is_static() && !dispatched {
                continue;
            }

            for violation in member_violations(model, id) {
                let Some(param) = model.type_param(violation.param) else {
                    continue;
                };
                let declared = match violation.variance {
                    Variance::Out => "covariant",
                    _ => "contravariant",
                };
                sink.push(
                    Diagnostic::error(
                        DiagnosticCode::UnexpectedVariance,
                        format!(
                            "Invalid variance: The type parameter '{name}' must be {} valid on '{}'. '{name}' is {declared}.",
                            violation.required.adverb(),
                            model.display_member(id),
                            name = param.name,
                        ),
                    )
                    .with_location(file_path.to_string(), member.name_span),
                );
            }
        }
    }

    fn check_instantiation(
        &self,
        model: &SymbolModel,
        instantiation: &GenericInstantiation,
        file_path: &str,
        sink: &dyn DiagnosticSink,
    ) {
        let Some(param) = model.type_param(instantiation.type_param) else {
            return;
        };
        let Some(argument) = instantiation.argument.named_id() else {
            return;
        };
        if !model.ty(argument).is_interface() {
            return;
        }

        let constraint_needs_statics = param
            .constraints
            .iter()
            .filter_map(TypeRef::named_id)
            .any(|constraint| first_unimplemented_static(model, constraint).is_some());
        if !constraint_needs_statics {
            return;
        }

        if let Some(member) = first_unimplemented_static(model, argument) {
            sink.push(
                Diagnostic::error(
                    DiagnosticCode::GenericConstraintNotSatisfiedInterfaceWithStaticAbstractMembers,
                    format!(
                        "The interface '{}' cannot be used as type argument. Static member '{}' does not have a most specific implementation in the interface.",
                        model.display_type(&instantiation.argument),
                        model.display_member(member),
                    ),
                )
                .with_location(file_path.to_string(), instantiation.span),
            );
        }
        trace!(
            "[StaticAbstractValidator] checked {} for {}",
            model.display_type(&instantiation.argument),
            model.display_type_param_owner(instantiation.type_param.owner)
        );
    }
}

/// First static abstract member `interface` or its bases leave without a body
fn first_unimplemented_static(model: &SymbolModel, interface: TypeId) -> Option<MemberId> {
    std::iter::once(interface)
        .chain(model.all_interfaces(interface).iter().copied())
        .flat_map(|i| model.static_abstract_members(i))
        .find(|(_, member)| member.modifiers.contains(Modifier::Abstract))
        .map(|(id, _)| id)
}
