//! # Diagnostic System for Member Validation
//!
//! This module provides the diagnostic infrastructure for reporting rule
//! violations found while validating a symbol model: modifier legality,
//! version gates, required-member enforcement, static interface members and
//! local function staticness.

use ariadne::ReportKind;
use chumsky::span::SimpleSpan;
use std::cell::RefCell;
use std::fmt;

/// A diagnostic emitted by a validator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: DiagnosticCode,
    pub message: String,
    /// Path of the file the span points into
    pub file_path: String,
    /// Source span where this diagnostic applies
    pub span: SimpleSpan<usize>,
    /// Optional related spans for additional context
    pub related_spans: Vec<(SimpleSpan<usize>, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl From<DiagnosticSeverity> for ReportKind<'static> {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => ReportKind::Error,
            DiagnosticSeverity::Warning => ReportKind::Warning,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Stable rule identifiers.
///
/// Numbers are grouped by category. Within one source location diagnostics
/// are ordered by number, so the numbering also fixes the order in which
/// several findings on the same token are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Modifier legality (1000-1999)
    DuplicateModifier,
    StaticNotVirtual,
    BadMemberFlag,
    SealedNonOverride,
    AbstractAndExtern,
    VirtualPrivate,
    AbstractField,
    InterfacesCantContainFields,
    OperatorsMustBeStatic,
    InterfacesCantContainConversionOrEqualityOperators,
    AbstractEventHasAccessors,

    // Version and runtime gates (2000-2999)
    InvalidModifierForLanguageVersion,
    FeatureNotAvailableInVersion,
    RuntimeDoesNotSupportStaticAbstractMembersInInterfaces,

    // Member bodies (3000-3999)
    AbstractHasBody,
    ConcreteMissingBody,

    // Required members (4000-4999)
    RequiredMemberCannotBeHidden,
    RequiredMemberCannotBeLessVisibleThanContainingType,
    RequiredMemberMustBeSettable,
    OverrideMustHaveRequired,
    RequiredMemberMustBeSet,
    RequiredMembersMustBeAssignedValue,
    ChainingToSetsRequiredMembersRequiresSetsRequiredMembers,
    RequiredMembersBaseTypeInvalid,
    RequiredMembersInvalid,
    NewConstraintCannotHaveRequiredMembers,

    // Static interface members, operators and variance (5000-5999)
    UnexpectedVariance,
    BadAbstractUnaryOperatorSignature,
    BadAbstractIncDecSignature,
    BadAbstractIncDecRetType,
    BadAbstractBinaryOperatorSignature,
    BadAbstractShiftOperatorSignature,
    BadUnaryOperatorSignature,
    BadIncDecSignature,
    BadIncDecRetType,
    BadBinaryOperatorSignature,
    BadShiftOperatorSignature,
    GenericConstraintNotSatisfiedInterfaceWithStaticAbstractMembers,

    // Local functions (6000-6999)
    StaticLocalFunctionCannotCaptureThis,
    StaticLocalFunctionCannotCaptureVariable,

    // Compilation infrastructure (9000-9999)
    MissingPredefinedMember,
}

impl From<DiagnosticCode> for u32 {
    fn from(code: DiagnosticCode) -> Self {
        match code {
            DiagnosticCode::DuplicateModifier => 1001,
            DiagnosticCode::StaticNotVirtual => 1002,
            DiagnosticCode::BadMemberFlag => 1003,
            DiagnosticCode::SealedNonOverride => 1004,
            DiagnosticCode::AbstractAndExtern => 1005,
            DiagnosticCode::VirtualPrivate => 1006,
            DiagnosticCode::AbstractField => 1007,
            DiagnosticCode::InterfacesCantContainFields => 1008,
            DiagnosticCode::OperatorsMustBeStatic => 1009,
            DiagnosticCode::InterfacesCantContainConversionOrEqualityOperators => 1010,
            DiagnosticCode::AbstractEventHasAccessors => 1011,
            DiagnosticCode::InvalidModifierForLanguageVersion => 2001,
            DiagnosticCode::FeatureNotAvailableInVersion => 2002,
            DiagnosticCode::RuntimeDoesNotSupportStaticAbstractMembersInInterfaces => 2003,
            DiagnosticCode::AbstractHasBody => 3001,
            DiagnosticCode::ConcreteMissingBody => 3002,
            DiagnosticCode::RequiredMemberCannotBeHidden => 4001,
            DiagnosticCode::RequiredMemberCannotBeLessVisibleThanContainingType => 4002,
            DiagnosticCode::RequiredMemberMustBeSettable => 4003,
            DiagnosticCode::OverrideMustHaveRequired => 4004,
            DiagnosticCode::RequiredMemberMustBeSet => 4005,
            DiagnosticCode::RequiredMembersMustBeAssignedValue => 4006,
            DiagnosticCode::ChainingToSetsRequiredMembersRequiresSetsRequiredMembers => 4007,
            DiagnosticCode::RequiredMembersBaseTypeInvalid => 4008,
            DiagnosticCode::RequiredMembersInvalid => 4009,
            DiagnosticCode::NewConstraintCannotHaveRequiredMembers => 4010,
            DiagnosticCode::UnexpectedVariance => 5001,
            DiagnosticCode::BadAbstractUnaryOperatorSignature => 5002,
            DiagnosticCode::BadAbstractIncDecSignature => 5003,
            DiagnosticCode::BadAbstractIncDecRetType => 5004,
            DiagnosticCode::BadAbstractBinaryOperatorSignature => 5005,
            DiagnosticCode::BadAbstractShiftOperatorSignature => 5006,
            DiagnosticCode::BadUnaryOperatorSignature => 5007,
            DiagnosticCode::BadIncDecSignature => 5008,
            DiagnosticCode::BadIncDecRetType => 5009,
            DiagnosticCode::BadBinaryOperatorSignature => 5010,
            DiagnosticCode::BadShiftOperatorSignature => 5011,
            DiagnosticCode::GenericConstraintNotSatisfiedInterfaceWithStaticAbstractMembers => {
                5012
            }
            DiagnosticCode::StaticLocalFunctionCannotCaptureThis => 6001,
            DiagnosticCode::StaticLocalFunctionCannotCaptureVariable => 6002,
            DiagnosticCode::MissingPredefinedMember => 9001,
        }
    }
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(code: DiagnosticCode, message: String) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code,
            message,
            file_path: String::new(),
            span: SimpleSpan::from(0..0),
            related_spans: Vec::new(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(code: DiagnosticCode, message: String) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            ..Self::error(code, message)
        }
    }

    /// Add location information to this diagnostic
    pub fn with_location(mut self, file_path: String, span: SimpleSpan<usize>) -> Self {
        self.file_path = file_path;
        self.span = span;
        self
    }

    /// Add a related span with context message
    pub fn with_related_span(mut self, span: SimpleSpan<usize>, message: String) -> Self {
        self.related_spans.push((span, message));
        self
    }

    /// The modifier is not allowed on this kind of declaration.
    pub fn bad_member_flag(modifier: &str) -> Self {
        Self::error(
            DiagnosticCode::BadMemberFlag,
            format!("The modifier '{modifier}' is not valid for this item"),
        )
    }

    pub fn duplicate_modifier(modifier: &str) -> Self {
        Self::error(
            DiagnosticCode::DuplicateModifier,
            format!("Duplicate '{modifier}' modifier"),
        )
    }

    /// The modifier is legal here but only from `required_version` on.
    pub fn invalid_modifier_for_language_version(
        modifier: &str,
        current_version: &str,
        required_version: &str,
    ) -> Self {
        Self::error(
            DiagnosticCode::InvalidModifierForLanguageVersion,
            format!(
                "The modifier '{modifier}' is not valid for this item in C# {current_version}. Please use language version '{required_version}' or greater."
            ),
        )
    }

    pub fn feature_not_available(
        feature: &str,
        current_version: &str,
        required_version: &str,
    ) -> Self {
        Self::error(
            DiagnosticCode::FeatureNotAvailableInVersion,
            format!(
                "Feature '{feature}' is not available in C# {current_version}. Please use language version {required_version} or greater."
            ),
        )
    }

    pub fn missing_predefined_member(type_name: &str, member_name: &str) -> Self {
        Self::error(
            DiagnosticCode::MissingPredefinedMember,
            format!("Missing compiler required member '{type_name}.{member_name}'"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code: u32 = self.code.into();
        write!(f, "{}[{code}]: {}", self.severity, self.message)?;
        if self.file_path.is_empty() {
            write!(f, " (at {}:{})", self.span.start, self.span.end)?;
        } else {
            write!(
                f,
                " (at {}:{}:{})",
                self.file_path, self.span.start, self.span.end
            )?;
        }
        for (span, message) in &self.related_spans {
            write!(f, "\n  note: {} (at {}:{})", message, span.start, span.end)?;
        }
        Ok(())
    }
}

/// Receiver for diagnostics produced by validators.
///
/// Validators only ever push; ordering is restored by the collection.
pub trait DiagnosticSink {
    fn push(&self, diagnostic: Diagnostic);
}

/// A sink that buffers diagnostics in emission order.
#[derive(Debug, Default)]
pub struct VecSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn into_collection(self) -> DiagnosticCollection {
        DiagnosticCollection::from(self.diagnostics.into_inner())
    }
}

impl DiagnosticSink for VecSink {
    fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Collection of diagnostics from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add multiple diagnostics
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Get all diagnostics in their current order
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get only error diagnostics
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .collect()
    }

    /// Get only warning diagnostics
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .collect()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Get the total number of diagnostics
    pub const fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the collection is empty
    pub const fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Stable sort by file, then span start, then rule number.
    ///
    /// Diagnostics that tie on all three keep their emission order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then(a.span.start.cmp(&b.span.start))
                .then(u32::from(a.code).cmp(&u32::from(b.code)))
        });
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let errors = self.errors().len();
        let warnings = self.warnings().len();
        let total = self.diagnostics.len();

        if total == 0 {
            "No issues found".to_string()
        } else {
            format!("{errors} errors, {warnings} warnings")
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl From<Vec<Diagnostic>> for DiagnosticCollection {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
