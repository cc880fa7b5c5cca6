//! Interface conformance checker (phase 3).
//!
//! Every object type must declare each field of each interface it
//! implements, with the same name and a structurally equal type: same
//! named type under the same sequence of list and non-null wrappers.

use crate::registry::DocumentRegistry;
use gsdl_core::{Diagnostic, DiagnosticBag};
use gsdl_syntax::{Binding, Document, TypeDef, TypeDefKind, TypeRef};
use rustc_hash::FxHashSet;

/// Conformance checker.
pub struct TypeChecker<'a> {
    document: &'a Document,
    registry: &'a dyn DocumentRegistry,
    diagnostics: DiagnosticBag,
}

/// Result of conformance checking.
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: DiagnosticBag,
}

impl CheckResult {
    /// Returns true if every checked object conforms.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl<'a> TypeChecker<'a> {
    /// Creates a checker for a resolved document.
    pub fn new(document: &'a Document, registry: &'a dyn DocumentRegistry) -> Self {
        Self {
            document,
            registry,
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Checks every object type except the slots in `skip`.
    pub fn check(&mut self, skip: &FxHashSet<usize>) -> CheckResult {
        let document = self.document;
        for (index, def) in document.types.values().enumerate() {
            if skip.contains(&index) {
                tracing::trace!(name = %def.name, "conformance skipped");
                continue;
            }
            if let TypeDefKind::Object(object) = &def.kind {
                for iface in &object.implements {
                    self.check_implements(def, iface);
                }
            }
        }

        CheckResult {
            diagnostics: std::mem::take(&mut self.diagnostics),
        }
    }

    fn check_implements(&mut self, object: &TypeDef, iface: &TypeRef) {
        let Some(interface) = self.lookup(iface) else {
            return;
        };
        let (Some(own), Some(required)) = (object.fields(), interface.fields()) else {
            return;
        };

        let missing: Vec<&str> = required
            .values()
            .filter(|field| {
                own.get(&field.name.value)
                    .map_or(true, |f| !f.ty.is_structurally_equal(&field.ty))
            })
            .map(|field| field.name.as_str())
            .collect();

        if !missing.is_empty() {
            tracing::trace!(object = %object.name, interface = %iface.name, ?missing, "missing fields");
            self.diagnostics.add(Diagnostic::missing_interface_fields(
                &object.name.value,
                &iface.name,
                &missing,
                object.name.position,
                object.name.span,
            ));
        }
    }

    /// The interface definition a resolved reference is bound to.
    fn lookup(&self, iface: &TypeRef) -> Option<&'a TypeDef> {
        match iface.binding.as_ref()? {
            Binding::Local { index, .. } => {
                self.document.types.get_index(*index).map(|(_, def)| def)
            }
            Binding::Registry { document, .. } => self.registry.get_type(document, &iface.name),
            Binding::Builtin => None,
        }
    }
}

/// Checks interface conformance of every object type outside `skip`.
pub fn check(
    document: &Document,
    registry: &dyn DocumentRegistry,
    skip: &FxHashSet<usize>,
) -> CheckResult {
    let mut checker = TypeChecker::new(document, registry);
    checker.check(skip)
}
