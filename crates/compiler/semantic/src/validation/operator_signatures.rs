//! Parameter and return type shapes of user-defined operators.
//!
//! Ordinary operators need the containing type (or its nullable form) in
//! the right operand positions. Operators that are static abstract or virtual
//! in an interface are stricter: the operand must be the interface itself or
//! one of its type parameters constrained to it.

use sharpcheck_compiler_diagnostics::{Diagnostic, DiagnosticCode};

use crate::model::{
    MemberId, MemberKind, Modifier, OperatorShape, SymbolModel, TypeId, TypeParamOwner, TypeRef,
};

struct Operands<'m> {
    model: &'m SymbolModel,
    container: TypeId,
    is_abstract: bool,
}

impl Operands<'_> {
    /// The containing type applied to its own type parameters, in order
    fn is_instance_type(&self, ty: &TypeRef) -> bool {
        let TypeRef::Named { id, args } = ty else {
            return false;
        };
        *id == self.container
            && args.iter().enumerate().all(|(index, arg)| {
                matches!(
                    arg,
                    TypeRef::TypeParameter(param)
                        if param.owner == TypeParamOwner::Type(self.container)
                            && param.index == index
                )
            })
    }

    /// The containing type itself, or a nullable of it
    fn is_container(&self, ty: &TypeRef) -> bool {
        self.is_instance_type(ty.strip_nullable())
    }

    /// The containing type, or its own type parameter constrained to it
    fn is_container_or_constrained(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named { .. } => self.is_instance_type(ty),
            TypeRef::TypeParameter(param) => {
                param.owner == TypeParamOwner::Type(self.container)
                    && self.model.type_param(*param).is_some_and(|declared| {
                        declared
                            .constraints
                            .iter()
                            .any(|c| self.is_instance_type(c))
                    })
            }
            _ => false,
        }
    }

    fn is_operand(&self, ty: &TypeRef) -> bool {
        if self.is_abstract {
            self.is_container_or_constrained(ty)
        } else {
            self.is_container(ty)
        }
    }

    /// `ret` matches `param`, up to nullability, or derives from it
    fn is_same_or_derived(&self, ret: &TypeRef, param: &TypeRef) -> bool {
        let (ret, param) = (ret.strip_nullable(), param.strip_nullable());
        if ret == param {
            return true;
        }
        match (ret.named_id(), param.named_id()) {
            (Some(ret), Some(param)) => self.model.is_or_derives_from(ret, param),
            _ => false,
        }
    }
}

/// The signature diagnostic for an operator, if its shape is wrong.
///
/// Equality operators and conversions declared in interfaces are rejected as
/// a whole elsewhere and are not looked at here.
pub fn check_operator(model: &SymbolModel, id: MemberId) -> Option<Diagnostic> {
    let member = model.member(id);
    let MemberKind::Operator {
        token,
        parameters,
        return_type,
        ..
    } = &member.kind
    else {
        return None;
    };
    let in_interface = model.ty(member.containing_type).is_interface();
    if in_interface && token.shape(parameters.len()) == OperatorShape::Equality {
        return None;
    }
    let operands = Operands {
        model,
        container: member.containing_type,
        is_abstract: in_interface
            && member.is_static()
            && (member.modifiers.contains(Modifier::Abstract)
                || member.modifiers.contains(Modifier::Virtual)),
    };
    let abstract_or = |abstract_code, code| {
        if operands.is_abstract {
            abstract_code
        } else {
            code
        }
    };

    let types: Vec<&TypeRef> = parameters.iter().map(|p| &p.ty).collect();
    let code = match (token.shape(types.len()), types.as_slice()) {
        (OperatorShape::Unary, [operand]) if !operands.is_operand(operand) => abstract_or(
            DiagnosticCode::BadAbstractUnaryOperatorSignature,
            DiagnosticCode::BadUnaryOperatorSignature,
        ),
        (OperatorShape::IncrementDecrement, [operand]) => {
            if !operands.is_operand(operand) {
                abstract_or(
                    DiagnosticCode::BadAbstractIncDecSignature,
                    DiagnosticCode::BadIncDecSignature,
                )
            } else if !operands.is_same_or_derived(return_type, operand) {
                abstract_or(
                    DiagnosticCode::BadAbstractIncDecRetType,
                    DiagnosticCode::BadIncDecRetType,
                )
            } else {
                return None;
            }
        }
        (OperatorShape::Binary | OperatorShape::Equality, [left, right])
            if !operands.is_operand(left) && !operands.is_operand(right) =>
        {
            abstract_or(
                DiagnosticCode::BadAbstractBinaryOperatorSignature,
                DiagnosticCode::BadBinaryOperatorSignature,
            )
        }
        (OperatorShape::Shift, [left, right])
            if !operands.is_operand(left) || *right != &TypeRef::INT =>
        {
            abstract_or(
                DiagnosticCode::BadAbstractShiftOperatorSignature,
                DiagnosticCode::BadShiftOperatorSignature,
            )
        }
        _ => return None,
    };
    Some(Diagnostic::error(code, signature_message(code).to_string()))
}

const fn signature_message(code: DiagnosticCode) -> &'static str {
    match code {
        DiagnosticCode::BadAbstractUnaryOperatorSignature => {
            "The parameter of a unary operator must be the containing type, or its type parameter constrained to it."
        }
        DiagnosticCode::BadAbstractIncDecSignature => {
            "The parameter type for ++ or -- operator must be the containing type, or its type parameter constrained to it."
        }
        DiagnosticCode::BadAbstractIncDecRetType | DiagnosticCode::BadIncDecRetType => {
            "The return type for ++ or -- operator must either match the parameter type, or be derived from the parameter type."
        }
        DiagnosticCode::BadAbstractBinaryOperatorSignature => {
            "One of the parameters of a binary operator must be the containing type, or its type parameter constrained to it."
        }
        DiagnosticCode::BadAbstractShiftOperatorSignature => {
            "The first operand of an overloaded shift operator must have the same type as the containing type or its type parameter constrained to it, and the type of the second operand must be int"
        }
        DiagnosticCode::BadUnaryOperatorSignature => {
            "The parameter of a unary operator must be the containing type"
        }
        DiagnosticCode::BadIncDecSignature => {
            "The parameter type for ++ or -- operator must be the containing type"
        }
        DiagnosticCode::BadBinaryOperatorSignature => {
            "One of the parameters of a binary operator must be the containing type"
        }
        _ => {
            "The first operand of an overloaded shift operator must have the same type as the containing type, and the type of the second operand must be int"
        }
    }
}
