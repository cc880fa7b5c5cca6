//! GraphQL schema definition language parsing with reference resolution and
//! interface conformance checking.
//!
//! [`SchemaParser`] runs three phases against an injected
//! [`DocumentRegistry`]:
//!
//! 1. parse: tokens to a [`Document`] of possibly unresolved type references
//! 2. resolve: bind every reference to a built-in, local or registry type
//! 3. conformance: check object types against the interfaces they implement
//!
//! Diagnostics from all phases are accumulated and returned together with
//! the best-effort document. Only an unrecognized top-level keyword stops
//! the pipeline early.
//!
//! ```
//! use gsdl::{InMemoryRegistry, SchemaParser};
//!
//! let mut registry = InMemoryRegistry::new();
//! let output = SchemaParser::new(&mut registry).parse_document(
//!     "interface Named { name: String }\ntype Person implements Named { age: Int }",
//! );
//! assert_eq!(
//!     output.messages(),
//!     ["Type \"Person\" does not implement interface \"Named\", missing \"name\""]
//! );
//! ```

pub use gsdl_core::{
    codes, Diagnostic, DiagnosticBag, DiagnosticClass, DiagnosticSeverity, Phase, Position, Span,
};
pub use gsdl_semantic::{DocumentRegistry, InMemoryRegistry, RegistryError, DEFAULT_DOCUMENT};
pub use gsdl_syntax::{
    format, format_with_options, Binding, Document, FormatOptions, TypeDef, TypeKind, TypeRef,
};

/// When parsed types are written back to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persist {
    /// Only when the run produced no diagnostics.
    #[default]
    OnSuccess,
    Never,
}

/// Per-call pipeline settings.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Document to resolve against and persist into. Defaults to the
    /// registry's current document.
    pub document: Option<String>,
    pub persist: Persist,
}

impl ParseOptions {
    #[must_use]
    pub fn document(mut self, name: impl Into<String>) -> Self {
        self.document = Some(name.into());
        self
    }

    #[must_use]
    pub fn persist(mut self, persist: Persist) -> Self {
        self.persist = persist;
        self
    }
}

/// Everything a pipeline run produced.
#[derive(Debug)]
pub struct ParseOutput {
    pub document: Document,
    pub diagnostics: DiagnosticBag,
    /// True if parsing stopped at an unrecognized top-level keyword.
    pub aborted: bool,
}

impl ParseOutput {
    /// Returns true if no phase reported anything.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Rendered messages in the order they were reported.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.messages()
    }

    /// Source-annotated reports, one per diagnostic.
    pub fn reports(&self, source_name: &str, source: &str) -> Vec<miette::Report> {
        self.diagnostics
            .iter()
            .map(|d| d.to_report(source_name, source))
            .collect()
    }
}

/// Runs the parse/resolve/conformance pipeline against a registry.
pub struct SchemaParser<'r> {
    registry: &'r mut dyn DocumentRegistry,
}

impl<'r> SchemaParser<'r> {
    pub fn new(registry: &'r mut dyn DocumentRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &dyn DocumentRegistry {
        &*self.registry
    }

    /// Parses `source` with default options.
    pub fn parse_document(&mut self, source: &str) -> ParseOutput {
        self.parse_document_with(source, &ParseOptions::default())
    }

    /// Parses `source`, resolves it and checks conformance.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn parse_document_with(&mut self, source: &str, options: &ParseOptions) -> ParseOutput {
        let context = options
            .document
            .clone()
            .unwrap_or_else(|| self.registry.current_document_name().to_string());

        let parsed = gsdl_syntax::parse(source, &context);
        tracing::debug!(
            phase = %Phase::Parse,
            types = parsed.document.type_count(),
            diagnostics = parsed.diagnostics.len(),
            "phase complete"
        );
        let mut document = parsed.document;
        let mut diagnostics = parsed.diagnostics;
        if parsed.aborted {
            return ParseOutput {
                document,
                diagnostics,
                aborted: true,
            };
        }

        let mut resolved =
            gsdl_resolver::resolve(&mut document, &parsed.references, &*self.registry, &context);
        tracing::debug!(
            phase = %Phase::Resolve,
            diagnostics = resolved.diagnostics.len(),
            "phase complete"
        );
        diagnostics.append(&mut resolved.diagnostics);

        if resolved.implements_failed() {
            tracing::debug!(phase = %Phase::Conformance, "skipped");
        } else {
            let skip = resolved.types_with_unresolved_fields();
            let mut checked = gsdl_semantic::check(&document, &*self.registry, &skip);
            tracing::debug!(
                phase = %Phase::Conformance,
                diagnostics = checked.diagnostics.len(),
                "phase complete"
            );
            diagnostics.append(&mut checked.diagnostics);
        }

        if options.persist == Persist::OnSuccess && diagnostics.is_empty() {
            self.persist(&document, &context);
        }

        ParseOutput {
            document,
            diagnostics,
            aborted: false,
        }
    }

    /// Writes every type of `document` into the registry under `context`.
    fn persist(&mut self, document: &Document, context: &str) {
        for def in document.types.values() {
            let mut def = def.clone();
            def.for_each_type_ref_mut(|ty| {
                if let Some(Binding::Local { kind, .. }) = ty.binding {
                    ty.binding = Some(Binding::Registry {
                        document: context.to_string(),
                        kind,
                    });
                }
            });
            let name = def.name.value.clone();
            self.registry.set_type(context, &name, def);
        }
    }
}
