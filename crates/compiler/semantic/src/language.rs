//! # Language Versions and Feature Gates
//!
//! Every version-dependent check goes through [`Feature::required_version`]
//! or [`modifier_feature`], so the gate table lives in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageVersion {
    CSharp7_3,
    CSharp8,
    CSharp9,
    CSharp10,
    CSharp11,
    CSharp12,
    Preview,
}

impl LanguageVersion {
    pub const LATEST: Self = Self::CSharp12;

    pub const fn supports(self, feature: Feature) -> bool {
        self as u8 >= feature.required_version() as u8
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CSharp7_3 => "7.3",
            Self::CSharp8 => "8.0",
            Self::CSharp9 => "9.0",
            Self::CSharp10 => "10.0",
            Self::CSharp11 => "11.0",
            Self::CSharp12 => "12.0",
            Self::Preview => "preview",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language version '{0}'")]
pub struct UnknownLanguageVersion(pub String);

impl FromStr for LanguageVersion {
    type Err = UnknownLanguageVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7.3" => Ok(Self::CSharp7_3),
            "8" | "8.0" => Ok(Self::CSharp8),
            "9" | "9.0" => Ok(Self::CSharp9),
            "10" | "10.0" => Ok(Self::CSharp10),
            "11" | "11.0" => Ok(Self::CSharp11),
            "12" | "12.0" | "latest" | "default" => Ok(Self::CSharp12),
            "preview" => Ok(Self::Preview),
            _ => Err(UnknownLanguageVersion(s.to_string())),
        }
    }
}

impl TryFrom<String> for LanguageVersion {
    type Error = UnknownLanguageVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageVersion> for String {
    fn from(version: LanguageVersion) -> Self {
        version.to_string()
    }
}

/// Language features whose availability depends on the language version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    DefaultInterfaceImplementation,
    StaticLocalFunctions,
    StaticAbstractMembersInInterfaces,
    RequiredMembers,
}

impl Feature {
    pub const fn required_version(self) -> LanguageVersion {
        match self {
            Self::DefaultInterfaceImplementation | Self::StaticLocalFunctions => {
                LanguageVersion::CSharp8
            }
            Self::StaticAbstractMembersInInterfaces | Self::RequiredMembers => {
                LanguageVersion::CSharp11
            }
        }
    }

    /// Name used in "feature is not available" messages
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DefaultInterfaceImplementation => "default interface implementation",
            Self::StaticLocalFunctions => "static local functions",
            Self::StaticAbstractMembersInInterfaces => "static abstract members in interfaces",
            Self::RequiredMembers => "required members",
        }
    }
}

/// Where a version-gated modifier appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierSite {
    StaticInterfaceMember,
    LocalFunction,
    TypeMember,
}

/// The (modifier, site) -> feature table behind modifier version gates.
pub fn modifier_feature(modifier: crate::Modifier, site: ModifierSite) -> Option<Feature> {
    use crate::Modifier;

    match (modifier, site) {
        (Modifier::Static, ModifierSite::StaticInterfaceMember) => {
            Some(Feature::DefaultInterfaceImplementation)
        }
        (Modifier::Abstract | Modifier::Sealed, ModifierSite::StaticInterfaceMember) => {
            Some(Feature::StaticAbstractMembersInInterfaces)
        }
        (Modifier::Static, ModifierSite::LocalFunction) => Some(Feature::StaticLocalFunctions),
        (Modifier::Required, _) => Some(Feature::RequiredMembers),
        _ => None,
    }
}

/// What the target runtime can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeCapabilities {
    pub supports_static_abstract_members_in_interfaces: bool,
}

impl Default for RuntimeCapabilities {
    fn default() -> Self {
        Self {
            supports_static_abstract_members_in_interfaces: true,
        }
    }
}

/// Per-compilation knobs threaded through every validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilationOptions {
    pub language_version: LanguageVersion,
    pub runtime: RuntimeCapabilities,
}

impl CompilationOptions {
    pub fn with_language_version(mut self, language_version: LanguageVersion) -> Self {
        self.language_version = language_version;
        self
    }

    pub fn with_runtime(mut self, runtime: RuntimeCapabilities) -> Self {
        self.runtime = runtime;
        self
    }

    pub const fn supports(&self, feature: Feature) -> bool {
        self.language_version.supports(feature)
    }
}
