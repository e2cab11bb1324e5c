//! Variance safety of type parameters in member signatures.
//!
//! Every type in a signature sits in an output position (return types,
//! getters), an input position (parameters, setters, event types, method
//! constraints) or both (`ref` returns and by-reference parameters). A
//! covariant parameter may only appear where output is required, a
//! contravariant one only where input is required. Type arguments of generic
//! types flip or fix the requirement according to the variance of the
//! parameter they are passed to.

use crate::model::{
    AccessorKind, MemberId, MemberKind, RefKind, SymbolModel, TypeParamRef, TypeRef, Variance,
};

/// Which kinds of safety a position demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Safety {
    pub output: bool,
    pub input: bool,
}

impl Safety {
    pub const OUTPUT: Self = Self {
        output: true,
        input: false,
    };
    pub const INPUT: Self = Self {
        output: false,
        input: true,
    };
    pub const INVARIANT: Self = Self {
        output: true,
        input: true,
    };

    const fn flipped(self) -> Self {
        Self {
            output: self.input,
            input: self.output,
        }
    }

    /// "covariantly", "contravariantly" or "invariantly", as in the message
    pub const fn adverb(self) -> &'static str {
        match (self.output, self.input) {
            (true, true) => "invariantly",
            (false, true) => "contravariantly",
            _ => "covariantly",
        }
    }
}

/// A variant type parameter used where its variance is not allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarianceViolation {
    pub param: TypeParamRef,
    pub variance: Variance,
    pub required: Safety,
}

/// Every variance violation in the signature of `member`, in signature order
pub fn member_violations(model: &SymbolModel, member: MemberId) -> Vec<VarianceViolation> {
    let mut walker = Walker {
        model,
        violations: Vec::new(),
    };
    match &model.member(member).kind {
        MemberKind::Method {
            return_type,
            is_ref_return,
            parameters,
            type_params,
            ..
        } => {
            let output = if *is_ref_return {
                Safety::INVARIANT
            } else {
                Safety::OUTPUT
            };
            walker.walk(return_type, output);
            for param in parameters {
                walker.walk(&param.ty, parameter_safety(param.ref_kind));
            }
            for constraint in type_params.iter().flat_map(|p| &p.constraints) {
                walker.walk(constraint, Safety::INPUT);
            }
        }
        MemberKind::Property {
            ty,
            is_ref,
            parameters,
            accessors,
        } => {
            let safety = if *is_ref {
                Safety::INVARIANT
            } else {
                Safety {
                    output: accessors.iter().any(|a| a.kind == AccessorKind::Get),
                    input: accessors.iter().any(|a| a.kind.is_setter()),
                }
            };
            walker.walk(ty, safety);
            for param in parameters {
                walker.walk(&param.ty, parameter_safety(param.ref_kind));
            }
        }
        MemberKind::Event { ty, .. } => walker.walk(ty, Safety::INPUT),
        MemberKind::Operator {
            parameters,
            return_type,
            ..
        }
        | MemberKind::Conversion {
            parameters,
            return_type,
            ..
        } => {
            walker.walk(return_type, Safety::OUTPUT);
            for param in parameters {
                walker.walk(&param.ty, Safety::INPUT);
            }
        }
        MemberKind::Field { .. } | MemberKind::Constructor { .. } | MemberKind::Destructor { .. } => {
        }
    }
    walker.violations
}

const fn parameter_safety(ref_kind: RefKind) -> Safety {
    match ref_kind {
        RefKind::None => Safety::INPUT,
        RefKind::Ref | RefKind::Out | RefKind::In => Safety::INVARIANT,
    }
}

struct Walker<'m> {
    model: &'m SymbolModel,
    violations: Vec<VarianceViolation>,
}

impl Walker<'_> {
    fn walk(&mut self, ty: &TypeRef, required: Safety) {
        match ty {
            TypeRef::TypeParameter(param) => {
                let Some(declared) = self.model.type_param(*param) else {
                    return;
                };
                let unsafe_use = match declared.variance {
                    Variance::Out => required.input,
                    Variance::In => required.output,
                    Variance::Invariant => false,
                };
                if unsafe_use {
                    self.violations.push(VarianceViolation {
                        param: *param,
                        variance: declared.variance,
                        required,
                    });
                }
            }
            TypeRef::Named { id, args } => {
                let model = self.model;
                for (arg, param) in args.iter().zip(&model.ty(*id).type_params) {
                    let next = match param.variance {
                        Variance::Out => required,
                        Variance::In => required.flipped(),
                        Variance::Invariant => Safety::INVARIANT,
                    };
                    self.walk(arg, next);
                }
            }
            TypeRef::Nullable(inner) | TypeRef::Array(inner) => self.walk(inner, required),
            TypeRef::Void | TypeRef::Special(_) => {}
        }
    }
}
