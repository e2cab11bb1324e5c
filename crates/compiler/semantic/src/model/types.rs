//! Type definitions and type references.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{MemberId, TypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
    Enum,
    Delegate,
}

impl TypeKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
        }
    }

    pub const fn is_interface(self) -> bool {
        matches!(self, Self::Interface)
    }

    pub const fn is_value_type(self) -> bool {
        matches!(self, Self::Struct | Self::RecordStruct | Self::Enum)
    }
}

/// Built-in types with a keyword spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    Bool,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Char,
    Single,
    Double,
    Decimal,
    String,
    Object,
}

impl SpecialType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let special = match keyword {
            "bool" => Self::Bool,
            "byte" => Self::Byte,
            "sbyte" => Self::SByte,
            "short" => Self::Int16,
            "ushort" => Self::UInt16,
            "int" => Self::Int32,
            "uint" => Self::UInt32,
            "long" => Self::Int64,
            "ulong" => Self::UInt64,
            "char" => Self::Char,
            "float" => Self::Single,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "string" => Self::String,
            "object" => Self::Object,
            _ => return None,
        };
        Some(special)
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::SByte => "sbyte",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Int64 => "long",
            Self::UInt64 => "ulong",
            Self::Char => "char",
            Self::Single => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

/// Declares which generic definition a type parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeParamOwner {
    Type(TypeId),
    Method(MemberId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeParamRef {
    pub owner: TypeParamOwner,
    pub index: usize,
}

/// A resolved type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Void,
    Special(SpecialType),
    Named { id: TypeId, args: Vec<TypeRef> },
    TypeParameter(TypeParamRef),
    Nullable(Box<TypeRef>),
    Array(Box<TypeRef>),
}

impl TypeRef {
    pub const INT: Self = Self::Special(SpecialType::Int32);

    /// `T?` becomes `T`, anything else is returned as is
    pub fn strip_nullable(&self) -> &Self {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    pub const fn named_id(&self) -> Option<TypeId> {
        match self {
            Self::Named { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    #[default]
    Invariant,
    /// `out T`
    Out,
    /// `in T`
    In,
}

impl Variance {
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Invariant => None,
            Self::Out => Some("out"),
            Self::In => Some("in"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: SmolStr,
    pub variance: Variance,
    pub constraints: Vec<TypeRef>,
    pub has_new_constraint: bool,
}
