//! Reference resolution for gsdl (phase 2).
//!
//! Every type name recorded by the parser is looked up in three layers, in
//! order: the built-in scalars, the document being built, and the registry's
//! context document. Declaration order never matters because the whole
//! document is parsed before anything is resolved.

use gsdl_core::{Diagnostic, DiagnosticBag};
use gsdl_semantic::DocumentRegistry;
use gsdl_syntax::{is_builtin_scalar, Binding, Document, RefPath, RefSite, TypeKind};
use rustc_hash::FxHashSet;

/// The name resolver.
pub struct Resolver<'a> {
    registry: &'a dyn DocumentRegistry,
    /// Registry document consulted for names the local document lacks.
    context: &'a str,
    diagnostics: DiagnosticBag,
    failed: Vec<RefPath>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a dyn DocumentRegistry, context: &'a str) -> Self {
        Self {
            registry,
            context,
            diagnostics: DiagnosticBag::new(),
            failed: Vec::new(),
        }
    }

    /// Finds what `name` refers to, without reporting anything.
    pub fn lookup(&self, document: &Document, name: &str) -> Option<Binding> {
        if is_builtin_scalar(name) {
            return Some(Binding::Builtin);
        }
        if let Some((index, _, def)) = document.types.get_full(name) {
            return Some(Binding::Local {
                index,
                kind: def.type_kind(),
            });
        }
        self.registry
            .get_type(self.context, name)
            .map(|def| Binding::Registry {
                document: self.context.to_string(),
                kind: def.type_kind(),
            })
    }

    /// Binds every reference in `references`, reporting the ones that fail.
    pub fn resolve(mut self, document: &mut Document, references: &[RefSite]) -> ResolveResult {
        for site in references {
            let binding = match self.lookup(document, &site.name) {
                Some(binding) => binding,
                None => {
                    tracing::trace!(name = %site.name, position = %site.position, "undefined");
                    self.report(
                        site,
                        Diagnostic::undefined_type(&site.name, self.context, site.position, site.span),
                    );
                    continue;
                }
            };

            if site.path.is_implements() && binding.kind() != TypeKind::Interface {
                tracing::trace!(name = %site.name, kind = ?binding.kind(), "not an interface");
                self.report(
                    site,
                    Diagnostic::not_an_interface(&site.name, site.position, site.span),
                );
                continue;
            }

            tracing::trace!(name = %site.name, ?binding, "resolved");
            if let Some(ty) = document.type_ref_mut(&site.path) {
                ty.binding = Some(binding);
            }
        }

        ResolveResult {
            diagnostics: self.diagnostics,
            failed: self.failed,
        }
    }

    fn report(&mut self, site: &RefSite, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
        self.failed.push(site.path);
    }
}

/// Result of resolution.
#[derive(Debug, Default)]
pub struct ResolveResult {
    pub diagnostics: DiagnosticBag,
    /// Sites left unbound.
    pub failed: Vec<RefPath>,
}

impl ResolveResult {
    /// Returns true if every reference was bound.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// Returns true if some `implements` clause names a missing or
    /// non-interface type.
    #[must_use]
    pub fn implements_failed(&self) -> bool {
        self.failed.iter().any(RefPath::is_implements)
    }

    /// Slots of the types whose own field types failed to resolve.
    #[must_use]
    pub fn types_with_unresolved_fields(&self) -> FxHashSet<usize> {
        self.failed
            .iter()
            .filter_map(|path| match path {
                RefPath::Field { ty, .. } => Some(*ty),
                _ => None,
            })
            .collect()
    }
}

/// Resolves the recorded references of a freshly parsed document.
///
/// Names absent locally are looked up in `context` within the registry.
pub fn resolve(
    document: &mut Document,
    references: &[RefSite],
    registry: &dyn DocumentRegistry,
    context: &str,
) -> ResolveResult {
    Resolver::new(registry, context).resolve(document, references)
}
