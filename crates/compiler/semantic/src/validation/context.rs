//! Per-compilation state shared by every validator.

use crate::language::{CompilationOptions, Feature, LanguageVersion};
use crate::model::SymbolModel;
use crate::required_members::RequiredMembersTable;

/// What a validator reads: the finished model, the options it is checked
/// under, and the derived required-member cache.
///
/// Validators never mutate the model; the cache fills itself on first use.
pub struct ValidationContext<'m> {
    pub model: &'m SymbolModel,
    pub options: CompilationOptions,
    pub required: RequiredMembersTable<'m>,
}

impl<'m> ValidationContext<'m> {
    pub fn new(model: &'m SymbolModel, options: CompilationOptions) -> Self {
        Self {
            model,
            options,
            required: RequiredMembersTable::new(model),
        }
    }

    pub fn file_path(&self) -> &str {
        self.model.file_path()
    }

    pub const fn language_version(&self) -> LanguageVersion {
        self.options.language_version
    }

    pub const fn supports(&self, feature: Feature) -> bool {
        self.options.supports(feature)
    }
}
