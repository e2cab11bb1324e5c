//! Declaration modifiers and accessibility.

use bitflags::bitflags;
use chumsky::span::SimpleSpan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Spanned;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Internal,
    Private,
    Static,
    Abstract,
    Virtual,
    Sealed,
    Override,
    Extern,
    Required,
    Partial,
    Readonly,
    Const,
    New,
    Async,
    Unsafe,
    Volatile,
}

impl Modifier {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::Static => "static",
            Self::Abstract => "abstract",
            Self::Virtual => "virtual",
            Self::Sealed => "sealed",
            Self::Override => "override",
            Self::Extern => "extern",
            Self::Required => "required",
            Self::Partial => "partial",
            Self::Readonly => "readonly",
            Self::Const => "const",
            Self::New => "new",
            Self::Async => "async",
            Self::Unsafe => "unsafe",
            Self::Volatile => "volatile",
        }
    }

    pub const fn is_accessibility(self) -> bool {
        matches!(
            self,
            Self::Public | Self::Protected | Self::Internal | Self::Private
        )
    }

    const fn flag(self) -> ModifierFlags {
        match self {
            Self::Public => ModifierFlags::PUBLIC,
            Self::Protected => ModifierFlags::PROTECTED,
            Self::Internal => ModifierFlags::INTERNAL,
            Self::Private => ModifierFlags::PRIVATE,
            Self::Static => ModifierFlags::STATIC,
            Self::Abstract => ModifierFlags::ABSTRACT,
            Self::Virtual => ModifierFlags::VIRTUAL,
            Self::Sealed => ModifierFlags::SEALED,
            Self::Override => ModifierFlags::OVERRIDE,
            Self::Extern => ModifierFlags::EXTERN,
            Self::Required => ModifierFlags::REQUIRED,
            Self::Partial => ModifierFlags::PARTIAL,
            Self::Readonly => ModifierFlags::READONLY,
            Self::Const => ModifierFlags::CONST,
            Self::New => ModifierFlags::NEW,
            Self::Async => ModifierFlags::ASYNC,
            Self::Unsafe => ModifierFlags::UNSAFE,
            Self::Volatile => ModifierFlags::VOLATILE,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let modifier = match s {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "internal" => Self::Internal,
            "private" => Self::Private,
            "static" => Self::Static,
            "abstract" => Self::Abstract,
            "virtual" => Self::Virtual,
            "sealed" => Self::Sealed,
            "override" => Self::Override,
            "extern" => Self::Extern,
            "required" => Self::Required,
            "partial" => Self::Partial,
            "readonly" => Self::Readonly,
            "const" => Self::Const,
            "new" => Self::New,
            "async" => Self::Async,
            "unsafe" => Self::Unsafe,
            "volatile" => Self::Volatile,
            other => return Err(other.to_string()),
        };
        Ok(modifier)
    }
}

bitflags! {
    /// Set view over a declaration's modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const PUBLIC    = 1 << 0;
        const PROTECTED = 1 << 1;
        const INTERNAL  = 1 << 2;
        const PRIVATE   = 1 << 3;
        const STATIC    = 1 << 4;
        const ABSTRACT  = 1 << 5;
        const VIRTUAL   = 1 << 6;
        const SEALED    = 1 << 7;
        const OVERRIDE  = 1 << 8;
        const EXTERN    = 1 << 9;
        const REQUIRED  = 1 << 10;
        const PARTIAL   = 1 << 11;
        const READONLY  = 1 << 12;
        const CONST     = 1 << 13;
        const NEW       = 1 << 14;
        const ASYNC     = 1 << 15;
        const UNSAFE    = 1 << 16;
        const VOLATILE  = 1 << 17;

        const ACCESSIBILITY = Self::PUBLIC.bits()
            | Self::PROTECTED.bits()
            | Self::INTERNAL.bits()
            | Self::PRIVATE.bits();
    }
}

/// The modifiers written on one declaration, in source order.
///
/// Repeated keywords are kept so that duplicates can be reported at the
/// second occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierList {
    entries: Vec<Spanned<Modifier>>,
    flags: ModifierFlags,
}

impl ModifierList {
    pub fn new(entries: Vec<Spanned<Modifier>>) -> Self {
        let flags = entries
            .iter()
            .fold(ModifierFlags::empty(), |acc, m| acc | m.value().flag());
        Self { entries, flags }
    }

    pub const fn flags(&self) -> ModifierFlags {
        self.flags
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.flags.contains(modifier.flag())
    }

    pub fn entries(&self) -> &[Spanned<Modifier>] {
        &self.entries
    }

    /// Span of the first occurrence of `modifier`
    pub fn span_of(&self, modifier: Modifier) -> Option<SimpleSpan<usize>> {
        self.entries
            .iter()
            .find(|m| *m.value() == modifier)
            .map(|m| m.span())
    }

    /// Every occurrence after the first of an already-seen keyword
    pub fn duplicates(&self) -> impl Iterator<Item = &Spanned<Modifier>> + '_ {
        let mut seen = ModifierFlags::empty();
        self.entries.iter().filter(move |m| {
            let flag = m.value().flag();
            let duplicate = seen.contains(flag);
            seen |= flag;
            duplicate
        })
    }

    /// Accessibility spelled out by the modifiers, if any
    pub fn declared_accessibility(&self) -> Option<Accessibility> {
        let access = self.flags & ModifierFlags::ACCESSIBILITY;
        if access == ModifierFlags::PROTECTED | ModifierFlags::INTERNAL {
            Some(Accessibility::ProtectedInternal)
        } else if access == ModifierFlags::PRIVATE | ModifierFlags::PROTECTED {
            Some(Accessibility::PrivateProtected)
        } else if access.contains(ModifierFlags::PUBLIC) {
            Some(Accessibility::Public)
        } else if access.contains(ModifierFlags::INTERNAL) {
            Some(Accessibility::Internal)
        } else if access.contains(ModifierFlags::PROTECTED) {
            Some(Accessibility::Protected)
        } else if access.contains(ModifierFlags::PRIVATE) {
            Some(Accessibility::Private)
        } else {
            None
        }
    }
}

bitflags! {
    /// Which callers, besides the declaring type itself, can see a symbol.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Audience: u8 {
        const SAME_ASSEMBLY           = 1 << 0;
        const DERIVED_OTHER_ASSEMBLY  = 1 << 1;
        const DERIVED_SAME_ASSEMBLY   = 1 << 2;
        const OTHER_ASSEMBLY          = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    PrivateProtected,
    Private,
}

impl Accessibility {
    const fn audience(self) -> Audience {
        match self {
            Self::Public => Audience::all(),
            Self::ProtectedInternal => Audience::SAME_ASSEMBLY
                .union(Audience::DERIVED_OTHER_ASSEMBLY)
                .union(Audience::DERIVED_SAME_ASSEMBLY),
            Self::Internal => Audience::SAME_ASSEMBLY.union(Audience::DERIVED_SAME_ASSEMBLY),
            Self::Protected => {
                Audience::DERIVED_OTHER_ASSEMBLY.union(Audience::DERIVED_SAME_ASSEMBLY)
            }
            Self::PrivateProtected => Audience::DERIVED_SAME_ASSEMBLY,
            Self::Private => Audience::empty(),
        }
    }

    fn from_audience(audience: Audience) -> Self {
        [
            Self::Public,
            Self::ProtectedInternal,
            Self::Internal,
            Self::Protected,
            Self::PrivateProtected,
        ]
        .into_iter()
        .find(|candidate| candidate.audience() == audience)
        .unwrap_or(Self::Private)
    }

    /// True when everyone who can see `other` can also see `self`
    pub fn is_at_least(self, other: Self) -> bool {
        self.audience().contains(other.audience())
    }

    /// Accessibility of a symbol declared `self` inside a container that is `container`
    pub fn intersect(self, container: Self) -> Self {
        Self::from_audience(self.audience() & container.audience())
    }

    pub const fn keywords(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::ProtectedInternal => "protected internal",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::PrivateProtected => "private protected",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keywords())
    }
}
