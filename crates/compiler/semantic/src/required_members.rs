//! # Required Member Sets
//!
//! For every type, the required fields and properties it and its base classes
//! declare, keyed by simple name so that a derived declaration with the same
//! name lands in the same slot. Slots keep the position of their first
//! declaration, so iteration is base-first declaration order.
//!
//! Sets are computed on first use and cached for the lifetime of the table.
//! A type's set is derived from its direct base's set, which is computed by
//! walking the precomputed ancestor list rather than by recursion.

use std::cell::OnceCell;

use index_vec::IndexVec;
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::model::{
    MemberId, MemberKind, MetadataRequiredMembers, Modifier, SymbolModel, TypeId, TypeOrigin,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredMemberSet {
    members: IndexMap<SmolStr, MemberId>,
    /// The nearest type in the chain whose required-member list could not be read
    invalid_origin: Option<TypeId>,
}

impl RequiredMemberSet {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Required members in base-first declaration order
    pub fn iter(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.values().copied()
    }

    pub fn get(&self, name: &str) -> Option<MemberId> {
        self.members.get(name).copied()
    }

    pub fn contains(&self, member: MemberId) -> bool {
        self.members.values().any(|m| *m == member)
    }

    pub const fn invalid_origin(&self) -> Option<TypeId> {
        self.invalid_origin
    }

    /// Either the type has required members or its list is unreadable
    pub fn needs_checking(&self) -> bool {
        !self.is_empty() || self.invalid_origin.is_some()
    }
}

/// Whether `member` is declared as a required instance field or property
pub fn is_required_declaration(model: &SymbolModel, member: MemberId) -> bool {
    let member = model.member(member);
    member.modifiers.contains(Modifier::Required)
        && !member.is_static()
        && member.is_field_or_property()
        && member.parameters().is_empty()
}

#[derive(Debug)]
pub struct RequiredMembersTable<'m> {
    model: &'m SymbolModel,
    sets: IndexVec<TypeId, OnceCell<RequiredMemberSet>>,
}

impl<'m> RequiredMembersTable<'m> {
    pub fn new(model: &'m SymbolModel) -> Self {
        Self {
            model,
            sets: (0..model.type_count()).map(|_| OnceCell::new()).collect(),
        }
    }

    pub fn get(&self, ty: TypeId) -> &RequiredMemberSet {
        if let Some(set) = self.sets[ty].get() {
            return set;
        }
        let mut inherited = None;
        for &ancestor in self.model.base_chain(ty) {
            let base = inherited;
            inherited = Some(self.sets[ancestor].get_or_init(move || self.extend(ancestor, base)));
        }
        self.sets[ty].get_or_init(|| self.extend(ty, inherited))
    }

    fn extend(&self, ty: TypeId, base: Option<&RequiredMemberSet>) -> RequiredMemberSet {
        let mut set = base.cloned().unwrap_or_default();
        let def = self.model.ty(ty);
        if def.origin == TypeOrigin::Metadata(MetadataRequiredMembers::Malformed) {
            set.invalid_origin = Some(ty);
        }

        for (id, member) in self.model.members_of(ty) {
            if !is_required_declaration(self.model, id) {
                // A non-required override still takes over the slot it overrides.
                let overrides_slot = member.modifiers.contains(Modifier::Override)
                    && member.is_field_or_property()
                    && member
                        .overridden
                        .is_some_and(|overridden| set.get(&member.name) == Some(overridden));
                if overrides_slot {
                    set.members.insert(member.name.clone(), id);
                }
                continue;
            }
            set.members.insert(member.name.clone(), id);
        }

        trace!(
            "[RequiredMembersTable] {} has {} required members",
            def.name,
            set.len()
        );
        set
    }

    /// Whether constructing through `constructor` skips the per-site check
    pub fn is_exempt(&self, constructor: MemberId) -> bool {
        let member = self.model.member(constructor);
        match &member.kind {
            MemberKind::Constructor {
                sets_required_members: true,
                ..
            } => true,
            MemberKind::Constructor {
                is_synthesized_copy: true,
                ..
            } => self.get(member.containing_type).needs_checking(),
            _ => false,
        }
    }
}
