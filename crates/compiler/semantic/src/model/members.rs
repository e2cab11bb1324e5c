//! Members owned by a type, and the local functions declared in their bodies.

use chumsky::span::SimpleSpan;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{MemberId, ModifierList, TypeId, TypeParam, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl RefKind {
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ref => Some("ref"),
            Self::Out => Some("out"),
            Self::In => Some("in"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: SmolStr,
    pub ty: TypeRef,
    pub ref_kind: RefKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

impl AccessorKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Init => "init",
        }
    }

    pub const fn is_setter(self) -> bool {
        matches!(self, Self::Set | Self::Init)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub modifiers: ModifierList,
    pub span: SimpleSpan<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorToken {
    Plus,
    Minus,
    Not,
    Tilde,
    Increment,
    Decrement,
    True,
    False,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Xor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

/// How an operator declaration is checked, decided by token and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorShape {
    Unary,
    IncrementDecrement,
    Binary,
    Shift,
    Equality,
    /// The token cannot be overloaded with this many parameters
    Malformed,
}

impl OperatorToken {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::Tilde => "~",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::True => "true",
            Self::False => "false",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Equality => "==",
            Self::Inequality => "!=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    pub const fn shape(self, arity: usize) -> OperatorShape {
        match (self, arity) {
            (Self::Equality | Self::Inequality, _) => OperatorShape::Equality,
            (Self::Increment | Self::Decrement, 1) => OperatorShape::IncrementDecrement,
            (Self::Plus | Self::Minus | Self::Not | Self::Tilde | Self::True | Self::False, 1) => {
                OperatorShape::Unary
            }
            (Self::LeftShift | Self::RightShift | Self::UnsignedRightShift, 2) => {
                OperatorShape::Shift
            }
            (
                Self::Plus
                | Self::Minus
                | Self::Multiply
                | Self::Divide
                | Self::Modulo
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::LessThan
                | Self::GreaterThan
                | Self::LessThanOrEqual
                | Self::GreaterThanOrEqual,
                2,
            ) => OperatorShape::Binary,
            _ => OperatorShape::Malformed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructorInitializerKind {
    This,
    Base,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorInitializer {
    pub kind: ConstructorInitializerKind,
    /// `None` when the target is an implicit parameterless constructor
    pub target: Option<MemberId>,
    pub span: SimpleSpan<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Field {
        ty: TypeRef,
    },
    Property {
        ty: TypeRef,
        is_ref: bool,
        /// Non-empty for indexers
        parameters: Vec<Parameter>,
        accessors: Vec<Accessor>,
    },
    Method {
        return_type: TypeRef,
        is_ref_return: bool,
        parameters: Vec<Parameter>,
        type_params: Vec<TypeParam>,
        has_body: bool,
    },
    Constructor {
        parameters: Vec<Parameter>,
        has_body: bool,
        sets_required_members: bool,
        initializer: Option<ConstructorInitializer>,
        is_synthesized_copy: bool,
    },
    Destructor {
        has_body: bool,
    },
    Event {
        ty: TypeRef,
        accessor_list: Option<SimpleSpan<usize>>,
    },
    Operator {
        token: OperatorToken,
        parameters: Vec<Parameter>,
        return_type: TypeRef,
        has_body: bool,
    },
    Conversion {
        is_explicit: bool,
        parameters: Vec<Parameter>,
        return_type: TypeRef,
        has_body: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: SmolStr,
    pub containing_type: TypeId,
    pub modifiers: ModifierList,
    pub name_span: SimpleSpan<usize>,
    pub kind: MemberKind,
    /// Member this one overrides, when declared `override` and resolvable
    pub overridden: Option<MemberId>,
    pub local_functions: Vec<LocalFunction>,
}

impl Member {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(super::Modifier::Static)
            || self.modifiers.contains(super::Modifier::Const)
    }

    /// Whether a body was written, for members that can have one
    pub const fn has_body(&self) -> Option<bool> {
        match &self.kind {
            MemberKind::Method { has_body, .. }
            | MemberKind::Constructor { has_body, .. }
            | MemberKind::Destructor { has_body }
            | MemberKind::Operator { has_body, .. }
            | MemberKind::Conversion { has_body, .. } => Some(*has_body),
            MemberKind::Field { .. } | MemberKind::Property { .. } | MemberKind::Event { .. } => {
                None
            }
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Property { parameters, .. }
            | MemberKind::Method { parameters, .. }
            | MemberKind::Constructor { parameters, .. }
            | MemberKind::Operator { parameters, .. }
            | MemberKind::Conversion { parameters, .. } => parameters,
            MemberKind::Field { .. } | MemberKind::Destructor { .. } | MemberKind::Event { .. } => {
                &[]
            }
        }
    }

    pub fn accessors(&self) -> &[Accessor] {
        match &self.kind {
            MemberKind::Property { accessors, .. } => accessors,
            _ => &[],
        }
    }

    pub const fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor { .. })
    }

    pub const fn is_field_or_property(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::Field { .. } | MemberKind::Property { .. }
        )
    }
}

/// Where a local variable or parameter was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationScope {
    /// The enclosing member body, including its parameters
    Member,
    /// A local function, by its preorder index within the member
    LocalFunction(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    This,
    Base,
    /// A simple name that binds to an instance member through implicit `this`
    ImplicitThis { member: SmolStr },
    Variable {
        name: SmolStr,
        declared_in: DeclarationScope,
        is_const: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub span: SimpleSpan<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFunction {
    /// Preorder position among the member's local functions
    pub index: usize,
    pub name: SmolStr,
    pub name_span: SimpleSpan<usize>,
    pub modifiers: ModifierList,
    pub references: Vec<Reference>,
    pub nested: Vec<LocalFunction>,
}

impl LocalFunction {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(super::Modifier::Static)
    }
}
