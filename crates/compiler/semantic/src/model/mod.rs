//! # Symbol Model
//!
//! The bound view of a compilation that every validator reads: types and
//! their members in an arena, inheritance resolved into cached ancestor
//! lists, plus the construction sites and generic instantiations found in
//! method bodies.
//!
//! The model is immutable once [`ModelBuilder::finish`] returns. Types refer
//! to members and members refer back to their containing type through
//! [`TypeId`] / [`MemberId`] indices, never through pointers.
//!
//! ## Layout
//!
//! - [`modifiers`]: modifier keywords and accessibility
//! - [`types`]: type definitions and type references
//! - [`members`]: member kinds and local functions
//! - [`decl`]: serde declarations handed over by a binder
//! - [`builder`]: name resolution and model construction
//! - [`layout`]: C#-like rendering of the declarations, which provides spans
//! - [`display`]: member and type names as they appear in messages

pub mod builder;
pub mod decl;
pub mod display;
pub mod layout;
pub mod members;
pub mod modifiers;
pub mod type_syntax;
pub mod types;

use chumsky::span::SimpleSpan;
use index_vec::IndexVec;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

pub use builder::{ModelBuilder, ModelError};
pub use members::*;
pub use modifiers::{Accessibility, Modifier, ModifierFlags, ModifierList};
pub use types::*;

index_vec::define_index_type! {
    /// A type definition in the model arena
    pub struct TypeId = usize;

    MAX_INDEX = usize::MAX;
}

index_vec::define_index_type! {
    /// A member definition in the model arena
    pub struct MemberId = usize;

    MAX_INDEX = usize::MAX;
}

/// A value paired with the span it was declared at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spanned<T>(T, SimpleSpan<usize>);

impl<T> Spanned<T> {
    pub const fn new(value: T, span: SimpleSpan<usize>) -> Self {
        Self(value, span)
    }

    pub const fn value(&self) -> &T {
        &self.0
    }

    pub const fn span(&self) -> SimpleSpan<usize> {
        self.1
    }
}

/// Whether required-member metadata on a referenced type could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataRequiredMembers {
    #[default]
    WellFormed,
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOrigin {
    Source,
    Metadata(MetadataRequiredMembers),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: SmolStr,
    pub kind: TypeKind,
    pub modifiers: ModifierList,
    /// Declared accessibility, or the default for the declaration context
    pub accessibility: Accessibility,
    pub containing_type: Option<TypeId>,
    pub type_params: Vec<TypeParam>,
    pub base: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub members: Vec<MemberId>,
    pub origin: TypeOrigin,
    pub name_span: SimpleSpan<usize>,
}

impl TypeDef {
    pub const fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    pub const fn is_from_source(&self) -> bool {
        matches!(self.origin, TypeOrigin::Source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializerEntryKind {
    /// `Member = value`
    #[default]
    Assignment,
    /// `Member = { ... }`
    NestedInitializer,
    /// `Member = new(...) { ... }`
    NewWithInitializer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializerEntry {
    pub member: MemberId,
    pub kind: InitializerEntryKind,
    pub span: SimpleSpan<usize>,
}

/// A `new T(...) { ... }` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCreation {
    pub created: TypeRef,
    /// `None` selects the implicit parameterless constructor
    pub constructor: Option<MemberId>,
    pub initializers: Vec<InitializerEntry>,
    /// The type name after `new`, or `new` itself when target-typed
    pub location: SimpleSpan<usize>,
    pub target_typed: bool,
}

/// A type argument supplied for a type parameter somewhere in the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericInstantiation {
    pub type_param: TypeParamRef,
    pub argument: TypeRef,
    pub span: SimpleSpan<usize>,
}

/// Marker attribute types the required-member rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WellKnownTypes {
    pub required_member_attribute: bool,
    pub sets_required_members_attribute: bool,
}

impl Default for WellKnownTypes {
    fn default() -> Self {
        Self {
            required_member_attribute: true,
            sets_required_members_attribute: true,
        }
    }
}

impl WellKnownTypes {
    pub const REQUIRED_MEMBER_ATTRIBUTE: &'static str =
        "System.Runtime.CompilerServices.RequiredMemberAttribute";
    pub const SETS_REQUIRED_MEMBERS_ATTRIBUTE: &'static str =
        "System.Diagnostics.CodeAnalysis.SetsRequiredMembersAttribute";
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    /// The text a span covers, empty when out of range
    pub fn slice(&self, span: SimpleSpan<usize>) -> &str {
        self.text.get(span.into_range()).unwrap_or_default()
    }
}

/// Which constructor a parameterless `new()` would bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterlessConstructor {
    Declared(MemberId),
    Implicit,
    /// The type declares constructors, none of them parameterless
    None,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolModel {
    source: SourceFile,
    types: IndexVec<TypeId, TypeDef>,
    members: IndexVec<MemberId, Member>,
    creations: Vec<ObjectCreation>,
    instantiations: Vec<GenericInstantiation>,
    well_known: WellKnownTypes,
    /// Base classes, most-base first, excluding the type itself
    base_chains: IndexVec<TypeId, Vec<TypeId>>,
    /// Every interface a type implements, directly or through bases
    interface_closures: IndexVec<TypeId, Vec<TypeId>>,
}

impl SymbolModel {
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn file_path(&self) -> &str {
        &self.source.path
    }

    pub fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> + '_ {
        self.types.iter_enumerated()
    }

    /// Types declared in source, in declaration order
    pub fn source_types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> + '_ {
        self.types().filter(|(_, ty)| ty.is_from_source())
    }

    pub fn ty(&self, id: TypeId) -> &TypeDef {
        &self.types[id]
    }

    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id]
    }

    pub fn members_of(&self, ty: TypeId) -> impl Iterator<Item = (MemberId, &Member)> + '_ {
        self.types[ty]
            .members
            .iter()
            .map(move |id| (*id, &self.members[*id]))
    }

    pub fn instance_constructors_of(
        &self,
        ty: TypeId,
    ) -> impl Iterator<Item = (MemberId, &Member)> + '_ {
        self.members_of(ty)
            .filter(|(_, m)| m.is_constructor() && !m.is_static())
    }

    pub fn creations(&self) -> &[ObjectCreation] {
        &self.creations
    }

    pub fn instantiations(&self) -> &[GenericInstantiation] {
        &self.instantiations
    }

    pub fn base_chain(&self, ty: TypeId) -> &[TypeId] {
        &self.base_chains[ty]
    }

    pub fn base_type(&self, ty: TypeId) -> Option<TypeId> {
        self.base_chains[ty].last().copied()
    }

    pub fn all_interfaces(&self, ty: TypeId) -> &[TypeId] {
        &self.interface_closures[ty]
    }

    /// Find a type by simple name, ignoring arity
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter_enumerated()
            .find(|(_, ty)| ty.name == name)
            .map(|(id, _)| id)
    }

    /// Find a member declared directly on `ty`
    pub fn find_member(&self, ty: TypeId, name: &str) -> Option<MemberId> {
        self.members_of(ty)
            .find(|(_, m)| m.name == name)
            .map(|(id, _)| id)
    }

    /// Nearest member named `name` on `ty` or one of its base classes
    pub fn lookup_member(&self, ty: TypeId, name: &str) -> Option<MemberId> {
        std::iter::once(ty)
            .chain(self.base_chains[ty].iter().rev().copied())
            .find_map(|t| self.find_member(t, name))
    }

    /// Declared accessibility, or the default for the containing type kind
    pub fn member_accessibility(&self, id: MemberId) -> Accessibility {
        let member = &self.members[id];
        member.modifiers.declared_accessibility().unwrap_or_else(|| {
            if self.types[member.containing_type].is_interface() {
                Accessibility::Public
            } else {
                Accessibility::Private
            }
        })
    }

    pub fn type_param(&self, param: TypeParamRef) -> Option<&TypeParam> {
        match param.owner {
            TypeParamOwner::Type(ty) => self.types[ty].type_params.get(param.index),
            TypeParamOwner::Method(method) => match &self.members[method].kind {
                MemberKind::Method { type_params, .. } => type_params.get(param.index),
                _ => None,
            },
        }
    }

    /// Accessibility after intersecting with every containing type
    pub fn effective_accessibility(&self, ty: TypeId) -> Accessibility {
        let def = &self.types[ty];
        match def.containing_type {
            Some(container) => def
                .accessibility
                .intersect(self.effective_accessibility(container)),
            None => def.accessibility,
        }
    }

    pub fn parameterless_constructor(&self, ty: TypeId) -> ParameterlessConstructor {
        let mut declared_any = false;
        for (id, ctor) in self.instance_constructors_of(ty) {
            if ctor.parameters().is_empty() {
                return ParameterlessConstructor::Declared(id);
            }
            declared_any |= !matches!(
                ctor.kind,
                MemberKind::Constructor {
                    is_synthesized_copy: true,
                    ..
                }
            );
        }
        if declared_any && !self.types[ty].kind.is_value_type() {
            ParameterlessConstructor::None
        } else {
            ParameterlessConstructor::Implicit
        }
    }

    /// True when `ty` is `target` or derives from it
    pub fn is_or_derives_from(&self, ty: TypeId, target: TypeId) -> bool {
        ty == target || self.base_chains[ty].contains(&target)
    }

    pub fn static_abstract_members(
        &self,
        interface: TypeId,
    ) -> impl Iterator<Item = (MemberId, &Member)> + '_ {
        self.members_of(interface).filter(|(_, m)| {
            m.is_static()
                && (m.modifiers.contains(Modifier::Abstract)
                    || m.modifiers.contains(Modifier::Virtual))
        })
    }
}
