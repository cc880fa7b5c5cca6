//! Diagnostic reporting for gsdl.
//!
//! Diagnostics are accumulated rather than thrown: every phase pushes into a
//! [`DiagnosticBag`] and keeps going. The rendered messages follow fixed
//! formats that callers and fixtures match on verbatim.

use crate::span::{Position, Span};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pipeline phase that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Phase 1: tokenizing and parsing.
    Parse,
    /// Phase 2: binding type references to definitions.
    Resolve,
    /// Phase 3: interface conformance.
    Conformance,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Resolve => "resolve",
            Self::Conformance => "conformance",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong, independent of where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticClass {
    /// Malformed statement, keyword or type wrapper.
    Syntax,
    /// Locally inconsistent structure, e.g. a repeated interface name.
    Structural,
    /// A name that does not exist or has the wrong kind.
    Reference,
    /// An implementer missing interface fields.
    Conformance,
}

impl DiagnosticClass {
    /// The phase this class of diagnostic is raised in.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::Syntax | Self::Structural => Phase::Parse,
            Self::Reference => Phase::Resolve,
            Self::Conformance => Phase::Conformance,
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticSeverity {
    /// Halted top-level parsing. Everything collected so far is still reported.
    Fatal,
    /// Recoverable; the pipeline carried on.
    Error,
}

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub class: DiagnosticClass,
    /// Stable error code, see [`codes`].
    pub code: &'static str,
    /// Fully rendered message.
    pub message: String,
    pub position: Position,
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new recoverable diagnostic.
    pub fn error(
        class: DiagnosticClass,
        code: &'static str,
        message: impl Into<String>,
        position: Position,
        span: Span,
    ) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            class,
            code,
            message: message.into(),
            position,
            span,
        }
    }

    /// A malformed construct inside a statement.
    pub fn syntax(message: impl std::fmt::Display, position: Position, span: Span) -> Self {
        Self::error(
            DiagnosticClass::Syntax,
            codes::INVALID_SYNTAX,
            format!("{message} at {position}"),
            position,
            span,
        )
    }

    /// A top-level token that does not start a statement. Halts parsing.
    pub fn not_a_statement(token: &str, position: Position, span: Span) -> Self {
        Self {
            severity: DiagnosticSeverity::Fatal,
            class: DiagnosticClass::Syntax,
            code: codes::NOT_A_STATEMENT,
            message: format!(
                "Parse aborted. \"{token}\" is not a statement keyword at line: {}, column: {}",
                position.line, position.column
            ),
            position,
            span,
        }
    }

    /// The same interface named twice in one `implements` clause.
    pub fn duplicate_interface(position: Position, span: Span) -> Self {
        Self::error(
            DiagnosticClass::Structural,
            codes::DUPLICATE_INTERFACE,
            format!("Duplicate interface name at {position}"),
            position,
            span,
        )
    }

    /// A field declared twice in one type body.
    pub fn duplicate_field(name: &str, position: Position, span: Span) -> Self {
        Self::error(
            DiagnosticClass::Structural,
            codes::DUPLICATE_FIELD,
            format!("Duplicate field name \"{name}\" at {position}"),
            position,
            span,
        )
    }

    /// A type reference that names nothing.
    pub fn undefined_type(name: &str, document: &str, position: Position, span: Span) -> Self {
        Self::error(
            DiagnosticClass::Reference,
            codes::UNDEFINED_TYPE,
            format!("\"{name}\" does not exist in document \"{document}\" at {position}"),
            position,
            span,
        )
    }

    /// An `implements` entry naming a type that is not an interface.
    pub fn not_an_interface(name: &str, position: Position, span: Span) -> Self {
        Self::error(
            DiagnosticClass::Reference,
            codes::NOT_AN_INTERFACE,
            format!("\"{name}\" is not an interface type, at {position}"),
            position,
            span,
        )
    }

    /// An implementer lacking some of an interface's fields.
    ///
    /// Field names are space-separated, each quoted, after a single space.
    pub fn missing_interface_fields<S: AsRef<str>>(
        type_name: &str,
        interface: &str,
        missing: &[S],
        position: Position,
        span: Span,
    ) -> Self {
        let fields = missing
            .iter()
            .map(|f| format!("\"{}\"", f.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        Self::error(
            DiagnosticClass::Conformance,
            codes::MISSING_INTERFACE_FIELDS,
            format!(
                "Type \"{type_name}\" does not implement interface \"{interface}\", missing {fields}"
            ),
            position,
            span,
        )
    }

    /// The phase that produced this diagnostic.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.class.phase()
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == DiagnosticSeverity::Fatal
    }

    /// Renders this diagnostic against its source as a [`miette::Report`].
    pub fn to_report(&self, source_name: &str, source: &str) -> miette::Report {
        miette::Report::new(SourceDiagnostic {
            code: self.code,
            message: self.message.clone(),
            label: self.class_label().to_string(),
            severity: self.severity,
            span: self.span.into(),
            source_code: miette::NamedSource::new(source_name, source.to_string()),
        })
    }

    fn class_label(&self) -> &'static str {
        match self.class {
            DiagnosticClass::Syntax => "syntax error",
            DiagnosticClass::Structural => "duplicate",
            DiagnosticClass::Reference => "unresolved",
            DiagnosticClass::Conformance => "declared here",
        }
    }
}

/// A diagnostic bundled with its source, for miette rendering.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct SourceDiagnostic {
    code: &'static str,
    message: String,
    label: String,
    severity: DiagnosticSeverity,
    span: miette::SourceSpan,
    source_code: miette::NamedSource<String>,
}

impl miette::Diagnostic for SourceDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        // miette has no fatal level; a fatal abort renders as an error.
        match self.severity {
            DiagnosticSeverity::Fatal | DiagnosticSeverity::Error => Some(miette::Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self.severity {
            DiagnosticSeverity::Fatal => Some(Box::new("parsing stopped at this token")),
            DiagnosticSeverity::Error => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

/// A collection of diagnostics, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Creates a new empty diagnostic bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Moves every diagnostic of `other` to the end of this bag.
    pub fn append(&mut self, other: &mut DiagnosticBag) {
        self.diagnostics.append(&mut other.diagnostics);
    }

    /// Returns true if a fatal diagnostic was recorded.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Returns true if any diagnostic of `class` was recorded.
    #[must_use]
    pub fn has_class(&self, class: DiagnosticClass) -> bool {
        self.diagnostics.iter().any(|d| d.class == class)
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns an iterator over the diagnostics raised in `phase`.
    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.phase() == phase)
    }

    /// Rendered messages, in detection order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

/// Diagnostic codes.
pub mod codes {
    pub const NOT_A_STATEMENT: &str = "E0002";
    pub const INVALID_SYNTAX: &str = "E0003";
    pub const DUPLICATE_INTERFACE: &str = "E0004";
    pub const DUPLICATE_FIELD: &str = "E0005";
    pub const UNDEFINED_TYPE: &str = "E0010";
    pub const NOT_AN_INTERFACE: &str = "E0011";
    pub const MISSING_INTERFACE_FIELDS: &str = "E0020";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_type_message() {
        let diag = Diagnostic::undefined_type(
            "Int2",
            "DefaultDoc",
            Position::new(4, 10),
            Span::new(40, 44),
        );
        assert_eq!(
            diag.to_string(),
            r#""Int2" does not exist in document "DefaultDoc" at line: 4 column: 10"#
        );
        assert_eq!(diag.phase(), Phase::Resolve);
        assert!(!diag.is_fatal());
    }

    #[test]
    fn test_not_a_statement_is_fatal() {
        let diag = Diagnostic::not_a_statement("interfacei", Position::new(2, 1), Span::new(1, 11));
        assert_eq!(
            diag.message,
            r#"Parse aborted. "interfacei" is not a statement keyword at line: 2, column: 1"#
        );
        assert!(diag.is_fatal());
        assert_eq!(diag.phase(), Phase::Parse);
    }

    #[test]
    fn test_missing_fields_single_separator() {
        let one = Diagnostic::missing_interface_fields(
            "Person",
            "NamedEntity",
            &["name2"],
            Position::new(1, 1),
            Span::default(),
        );
        assert_eq!(
            one.message,
            r#"Type "Person" does not implement interface "NamedEntity", missing "name2""#
        );

        let many = Diagnostic::missing_interface_fields(
            "Person",
            "ValuedEntity",
            &["value2", "value3", "value4"],
            Position::new(1, 1),
            Span::default(),
        );
        assert_eq!(
            many.message,
            r#"Type "Person" does not implement interface "ValuedEntity", missing "value2" "value3" "value4""#
        );
    }

    #[test]
    fn test_diagnostic_bag() {
        let mut bag = DiagnosticBag::new();
        bag.add(Diagnostic::duplicate_interface(
            Position::new(15, 55),
            Span::new(0, 1),
        ));
        bag.add(Diagnostic::not_an_interface(
            "NamedEntity",
            Position::new(6, 24),
            Span::new(2, 3),
        ));

        assert_eq!(bag.len(), 2);
        assert!(!bag.has_fatal());
        assert!(bag.has_class(DiagnosticClass::Reference));
        assert_eq!(bag.in_phase(Phase::Parse).count(), 1);
        assert_eq!(
            bag.messages()[0],
            "Duplicate interface name at line: 15 column: 55"
        );
    }

    #[test]
    fn test_to_report() {
        let source = "type A { b: Nope }";
        let diag = Diagnostic::undefined_type("Nope", "Doc", Position::new(1, 13), Span::new(12, 16));
        let report = diag.to_report("schema.graphql", source);
        assert_eq!(report.to_string(), diag.message);
        let code = report.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some(codes::UNDEFINED_TYPE));
        assert_eq!(report.severity(), Some(miette::Severity::Error));
        assert!(report.help().is_none());
    }

    #[test]
    fn test_fatal_report_severity() {
        let source = "\tinterfacei A {}";
        let diag = Diagnostic::not_a_statement("interfacei", Position::new(1, 2), Span::new(1, 11));
        let report = diag.to_report("schema.graphql", source);
        assert_eq!(report.severity(), Some(miette::Severity::Error));
        let help = report.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("parsing stopped at this token"));
    }
}
