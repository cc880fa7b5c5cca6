//! Type-system AST for the schema definition language.
//!
//! A [`Document`] owns its type definitions in declaration order. Every place
//! a type is named is a [`TypeRef`]; the parser leaves them unbound and records
//! a [`RefSite`] for each, and the resolver later binds them in place.
//!
//! Equality on AST values is structural: source positions and bindings are
//! ignored, so a printed-then-reparsed document compares equal to the one it
//! was printed from.

use crate::token::DirectiveLocation;
use gsdl_core::{Position, Span};
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scalars every document can name without declaring them.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Returns true if `name` is one of [`BUILTIN_SCALARS`].
#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// A named document of type definitions.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub name: String,
    pub schema: Option<SchemaDefinition>,
    pub directives: IndexMap<String, DirectiveDefinition>,
    pub types: IndexMap<String, TypeDef>,
}

impl Document {
    /// Creates an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Inserts a type, replacing any earlier definition of the same name.
    ///
    /// A replaced definition keeps its original slot. Returns the slot index
    /// and the replaced definition.
    pub fn insert(&mut self, def: TypeDef) -> (usize, Option<TypeDef>) {
        self.types.insert_full(def.name.value.clone(), def)
    }

    /// Removes a type, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<TypeDef> {
        self.types.shift_remove(name)
    }

    /// Number of type definitions.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the document defines nothing: no types, directives or
    /// schema.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.directives.is_empty() && self.schema.is_none()
    }

    /// Every type reference in the document, in source order.
    #[must_use]
    pub fn reference_sites(&self) -> Vec<RefSite> {
        let mut sites: Vec<RefSite> = self
            .types
            .values()
            .enumerate()
            .flat_map(|(index, def)| def.reference_sites(index))
            .collect();
        for (index, def) in self.directives.values().enumerate() {
            sites.extend(def.reference_sites(index));
        }
        if let Some(schema) = &self.schema {
            for (index, op) in schema.operations.iter().enumerate() {
                sites.push(RefSite::new(RefPath::RootOperation { index }, &op.ty));
            }
        }
        sites.sort_by_key(|site| site.position);
        sites
    }

    /// Mutable access to the type reference a site points at.
    pub fn type_ref_mut(&mut self, path: &RefPath) -> Option<&mut TypeRef> {
        match *path {
            RefPath::Field { ty, field } => match &mut self.types.get_index_mut(ty)?.1.kind {
                TypeDefKind::Object(o) => Some(&mut o.fields.get_index_mut(field)?.1.ty),
                TypeDefKind::Interface(i) => Some(&mut i.fields.get_index_mut(field)?.1.ty),
                _ => None,
            },
            RefPath::FieldArgument {
                ty,
                field,
                argument,
            } => {
                let fields = match &mut self.types.get_index_mut(ty)?.1.kind {
                    TypeDefKind::Object(o) => &mut o.fields,
                    TypeDefKind::Interface(i) => &mut i.fields,
                    _ => return None,
                };
                Some(&mut fields.get_index_mut(field)?.1.arguments.get_mut(argument)?.ty)
            }
            RefPath::InputField { ty, field } => match &mut self.types.get_index_mut(ty)?.1.kind {
                TypeDefKind::Input(i) => Some(&mut i.fields.get_index_mut(field)?.1.ty),
                _ => None,
            },
            RefPath::Implements { ty, index } => match &mut self.types.get_index_mut(ty)?.1.kind {
                TypeDefKind::Object(o) => o.implements.get_mut(index),
                TypeDefKind::Interface(i) => i.implements.get_mut(index),
                _ => None,
            },
            RefPath::UnionMember { ty, index } => match &mut self.types.get_index_mut(ty)?.1.kind {
                TypeDefKind::Union(u) => u.members.get_mut(index),
                _ => None,
            },
            RefPath::RootOperation { index } => {
                Some(&mut self.schema.as_mut()?.operations.get_mut(index)?.ty)
            }
            RefPath::DirectiveArgument {
                directive,
                argument,
            } => Some(
                &mut self
                    .directives
                    .get_index_mut(directive)?
                    .1
                    .arguments
                    .get_mut(argument)?
                    .ty,
            ),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.directives.len() == other.directives.len()
            && self
                .directives
                .iter()
                .all(|(k, v)| other.directives.get(k) == Some(v))
            && self.types.len() == other.types.len()
            && self.types.iter().all(|(k, v)| other.types.get(k) == Some(v))
    }
}

/// A name with its source location.
#[derive(Debug, Clone)]
pub struct Name {
    pub value: String,
    pub position: Position,
    pub span: Span,
}

impl Name {
    pub fn new(value: impl Into<String>, position: Position, span: Span) -> Self {
        Self {
            value: value.into(),
            position,
            span,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A type modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wrapper {
    /// `[T]`
    List,
    /// `T!`
    NonNull,
}

/// The variant of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    Input,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Object => "type",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Input => "input",
        }
    }
}

/// What a resolved [`TypeRef`] is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// One of [`BUILTIN_SCALARS`].
    Builtin,
    /// A type in the document being built, by slot index.
    Local { index: usize, kind: TypeKind },
    /// A type held by the registry under `document`.
    Registry { document: String, kind: TypeKind },
}

impl Binding {
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Builtin => TypeKind::Scalar,
            Self::Local { kind, .. } | Self::Registry { kind, .. } => *kind,
        }
    }
}

/// A type occurrence: a name under zero or more wrappers.
///
/// `wrappers` is innermost-first, so `[[String!]!]!` is
/// `[NonNull, List, NonNull, List, NonNull]`. The position is that of the
/// innermost name.
#[derive(Debug, Clone)]
pub struct TypeRef {
    pub name: String,
    pub wrappers: Vec<Wrapper>,
    pub position: Position,
    pub span: Span,
    /// Set by the resolver.
    pub binding: Option<Binding>,
}

impl TypeRef {
    /// An unwrapped, unresolved reference.
    pub fn named(name: impl Into<String>, position: Position, span: Span) -> Self {
        Self {
            name: name.into(),
            wrappers: Vec::new(),
            position,
            span,
            binding: None,
        }
    }

    /// Applies a wrapper outside the existing ones.
    #[must_use]
    pub fn wrap(mut self, wrapper: Wrapper) -> Self {
        self.wrappers.push(wrapper);
        self
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.binding.is_some()
    }

    #[must_use]
    pub fn is_non_null(&self) -> bool {
        self.wrappers.last() == Some(&Wrapper::NonNull)
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.wrappers.contains(&Wrapper::List)
    }

    /// Same wrapper sequence over the same named type.
    #[must_use]
    pub fn is_structurally_equal(&self, other: &Self) -> bool {
        self.wrappers == other.wrappers && self.name == other.name
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.is_structurally_equal(other)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = self.name.clone();
        for wrapper in &self.wrappers {
            match wrapper {
                Wrapper::List => out = format!("[{out}]"),
                Wrapper::NonNull => out.push('!'),
            }
        }
        f.write_str(&out)
    }
}

/// A type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub kind: TypeDefKind,
}

/// Type definition variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    Scalar,
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    Input(InputObjectType),
}

impl TypeDef {
    /// Position of the declared name.
    #[must_use]
    pub fn position(&self) -> Position {
        self.name.position
    }

    #[must_use]
    pub fn type_kind(&self) -> TypeKind {
        match &self.kind {
            TypeDefKind::Scalar => TypeKind::Scalar,
            TypeDefKind::Object(_) => TypeKind::Object,
            TypeDefKind::Interface(_) => TypeKind::Interface,
            TypeDefKind::Union(_) => TypeKind::Union,
            TypeDefKind::Enum(_) => TypeKind::Enum,
            TypeDefKind::Input(_) => TypeKind::Input,
        }
    }

    /// Output fields, for object and interface types.
    #[must_use]
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match &self.kind {
            TypeDefKind::Object(o) => Some(&o.fields),
            TypeDefKind::Interface(i) => Some(&i.fields),
            TypeDefKind::Scalar
            | TypeDefKind::Union(_)
            | TypeDefKind::Enum(_)
            | TypeDefKind::Input(_) => None,
        }
    }

    /// Names in the `implements` clause, in declaration order.
    #[must_use]
    pub fn implements(&self) -> &[TypeRef] {
        match &self.kind {
            TypeDefKind::Object(o) => &o.implements,
            TypeDefKind::Interface(i) => &i.implements,
            TypeDefKind::Scalar
            | TypeDefKind::Union(_)
            | TypeDefKind::Enum(_)
            | TypeDefKind::Input(_) => &[],
        }
    }

    /// Every type reference this definition makes, assuming it sits in slot `ty`.
    #[must_use]
    pub fn reference_sites(&self, ty: usize) -> Vec<RefSite> {
        let mut sites = Vec::new();
        match &self.kind {
            TypeDefKind::Scalar | TypeDefKind::Enum(_) => {}
            TypeDefKind::Object(ObjectType { implements, fields })
            | TypeDefKind::Interface(InterfaceType { implements, fields }) => {
                for (index, iface) in implements.iter().enumerate() {
                    sites.push(RefSite::new(RefPath::Implements { ty, index }, iface));
                }
                for (field, (_, def)) in fields.iter().enumerate() {
                    sites.push(RefSite::new(RefPath::Field { ty, field }, &def.ty));
                    for (argument, arg) in def.arguments.iter().enumerate() {
                        sites.push(RefSite::new(
                            RefPath::FieldArgument {
                                ty,
                                field,
                                argument,
                            },
                            &arg.ty,
                        ));
                    }
                }
            }
            TypeDefKind::Union(u) => {
                for (index, member) in u.members.iter().enumerate() {
                    sites.push(RefSite::new(RefPath::UnionMember { ty, index }, member));
                }
            }
            TypeDefKind::Input(i) => {
                for (field, (_, def)) in i.fields.iter().enumerate() {
                    sites.push(RefSite::new(RefPath::InputField { ty, field }, &def.ty));
                }
            }
        }
        sites
    }

    /// Visits every type reference in this definition.
    pub fn for_each_type_ref_mut(&mut self, mut f: impl FnMut(&mut TypeRef)) {
        match &mut self.kind {
            TypeDefKind::Scalar | TypeDefKind::Enum(_) => {}
            TypeDefKind::Object(ObjectType { implements, fields })
            | TypeDefKind::Interface(InterfaceType { implements, fields }) => {
                implements.iter_mut().for_each(&mut f);
                for def in fields.values_mut() {
                    f(&mut def.ty);
                    def.arguments.iter_mut().for_each(|a| f(&mut a.ty));
                }
            }
            TypeDefKind::Union(u) => u.members.iter_mut().for_each(f),
            TypeDefKind::Input(i) => i.fields.values_mut().for_each(|d| f(&mut d.ty)),
        }
    }
}

/// Object type body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    pub implements: Vec<TypeRef>,
    pub fields: IndexMap<String, FieldDefinition>,
}

/// Interface type body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceType {
    pub implements: Vec<TypeRef>,
    pub fields: IndexMap<String, FieldDefinition>,
}

/// Union type body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionType {
    pub members: Vec<TypeRef>,
}

/// Enum type body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumType {
    pub values: Vec<EnumValueDefinition>,
}

/// Input object type body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputObjectType {
    pub fields: IndexMap<String, InputValueDefinition>,
}

/// Field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
}

/// Input value definition (arguments, input fields).
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

/// Enum value definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

/// Schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub operations: Vec<RootOperation>,
}

/// `query: Query` inside a schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RootOperation {
    pub operation: OperationType,
    pub ty: TypeRef,
}

/// Type of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// Directive definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

impl DirectiveDefinition {
    /// Every type reference this definition makes, assuming it sits in slot `directive`.
    #[must_use]
    pub fn reference_sites(&self, directive: usize) -> Vec<RefSite> {
        self.arguments
            .iter()
            .enumerate()
            .map(|(argument, arg)| {
                RefSite::new(
                    RefPath::DirectiveArgument {
                        directive,
                        argument,
                    },
                    &arg.ty,
                )
            })
            .collect()
    }
}

/// Directive usage.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Argument>,
}

/// `name: value` inside a directive usage.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
}

/// A constant value. Numbers keep their literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

/// Where a type reference lives inside a [`Document`].
///
/// Indices are slot positions in the owning `IndexMap`/`Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefPath {
    Field { ty: usize, field: usize },
    FieldArgument { ty: usize, field: usize, argument: usize },
    InputField { ty: usize, field: usize },
    Implements { ty: usize, index: usize },
    UnionMember { ty: usize, index: usize },
    RootOperation { index: usize },
    DirectiveArgument { directive: usize, argument: usize },
}

impl RefPath {
    /// Slot of the owning type definition, if the owner is a type.
    #[must_use]
    pub const fn type_index(&self) -> Option<usize> {
        match *self {
            Self::Field { ty, .. }
            | Self::FieldArgument { ty, .. }
            | Self::InputField { ty, .. }
            | Self::Implements { ty, .. }
            | Self::UnionMember { ty, .. } => Some(ty),
            Self::RootOperation { .. } | Self::DirectiveArgument { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_implements(&self) -> bool {
        matches!(self, Self::Implements { .. })
    }
}

/// A recorded, not yet resolved, type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSite {
    pub path: RefPath,
    pub name: String,
    pub position: Position,
    pub span: Span,
}

impl RefSite {
    #[must_use]
    pub fn new(path: RefPath, ty: &TypeRef) -> Self {
        Self {
            path,
            name: ty.name.clone(),
            position: ty.position,
            span: ty.span,
        }
    }
}
