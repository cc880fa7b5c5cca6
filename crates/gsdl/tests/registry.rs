mod common;

use common::{init_tracing, run_in};
use gsdl::{
    Binding, DocumentRegistry, InMemoryRegistry, ParseOptions, Persist, SchemaParser, TypeKind,
    DEFAULT_DOCUMENT,
};

const INTERFACES: &str = r#"
interface NamedEntity {
  name: String
}

interface ValuedEntity {
  value: Int
}
"#;

#[test]
fn test_clean_run_persists_types() {
    let mut registry = InMemoryRegistry::new();
    let output = run_in(&mut registry, INTERFACES);
    assert!(output.is_ok());

    let stored = registry.document(DEFAULT_DOCUMENT).unwrap();
    assert_eq!(
        stored.types.keys().collect::<Vec<_>>(),
        ["NamedEntity", "ValuedEntity"]
    );
}

#[test]
fn test_later_document_resolves_against_registry() {
    let mut registry = InMemoryRegistry::new();
    assert!(run_in(&mut registry, INTERFACES).is_ok());

    let output = run_in(
        &mut registry,
        "type Business implements NamedEntity & ValuedEntity {\n  name: String\n}",
    );
    assert_eq!(
        output.messages(),
        [r#"Type "Business" does not implement interface "ValuedEntity", missing "value""#]
    );

    let business = output.document.get("Business").unwrap();
    assert_eq!(
        business.implements()[0].binding,
        Some(Binding::Registry {
            document: DEFAULT_DOCUMENT.to_string(),
            kind: TypeKind::Interface,
        })
    );
}

#[test]
fn test_failed_run_does_not_persist() {
    let mut registry = InMemoryRegistry::new();
    let output = run_in(&mut registry, "type Person { pet: Pet }");
    assert!(!output.is_ok());
    assert!(registry.document(DEFAULT_DOCUMENT).is_none());
}

#[test]
fn test_delete_type_then_reparse() {
    let mut registry = InMemoryRegistry::new();
    assert!(run_in(&mut registry, INTERFACES).is_ok());

    registry.delete_type("NamedEntity").unwrap();
    let err = registry.delete_type("NamedEntity").unwrap_err();
    assert!(err.is_not_found());

    let output = run_in(
        &mut registry,
        "type Person implements NamedEntity {\n  name: String\n}",
    );
    assert_eq!(
        output.messages(),
        [r#""NamedEntity" does not exist in document "DefaultDoc" at line: 1 column: 24"#]
    );
}

#[test]
fn test_redeclaration_overwrites() {
    let mut registry = InMemoryRegistry::new();
    assert!(run_in(&mut registry, "type Person { name: String }").is_ok());
    assert!(run_in(&mut registry, "type Person { age: Int }").is_ok());

    let person = registry.get_type(DEFAULT_DOCUMENT, "Person").unwrap();
    let fields = person.fields().unwrap();
    assert!(fields.contains_key("age"));
    assert!(!fields.contains_key("name"));
}

#[test]
fn test_persisted_bindings_point_at_registry() {
    let mut registry = InMemoryRegistry::new();
    assert!(run_in(&mut registry, "type A { b: B }\ntype B { x: Int }").is_ok());

    let a = registry.get_type(DEFAULT_DOCUMENT, "A").unwrap();
    assert_eq!(
        a.fields().unwrap()["b"].ty.binding,
        Some(Binding::Registry {
            document: DEFAULT_DOCUMENT.to_string(),
            kind: TypeKind::Object,
        })
    );
}

#[test]
fn test_explicit_document_and_persist_never() {
    init_tracing();
    let mut registry = InMemoryRegistry::new();
    let mut parser = SchemaParser::new(&mut registry);

    let options = ParseOptions::default().document("Shapes");
    assert!(parser
        .parse_document_with("interface Shape { area: Float }", &options)
        .is_ok());

    let dry_run = ParseOptions::default()
        .document("Shapes")
        .persist(Persist::Never);
    let output = parser.parse_document_with("type Square implements Shape { area: Float }", &dry_run);
    assert!(output.is_ok());
    assert_eq!(output.document.name, "Shapes");

    assert!(parser.registry().get_type("Shapes", "Shape").is_some());
    assert!(parser.registry().get_type("Shapes", "Square").is_none());
    assert!(parser.registry().document(DEFAULT_DOCUMENT).is_none());
}

#[test]
fn test_current_document_is_the_context() {
    let mut registry = InMemoryRegistry::new();
    registry.set_current_document("Animals");
    assert!(run_in(&mut registry, "interface Pet { name: String }").is_ok());

    let output = run_in(&mut registry, "type Dog implements Pet { name: String }");
    assert!(output.is_ok());

    registry.set_current_document("Plants");
    let output = run_in(&mut registry, "type Fern implements Pet { name: String }");
    assert_eq!(
        output.messages(),
        [r#""Pet" does not exist in document "Plants" at line: 1 column: 22"#]
    );
}

#[test]
fn test_print_document() {
    let mut registry = InMemoryRegistry::new();
    let source = r#"
interface NamedEntity {
  name: String
}

interface ValuedEntity {
  value: Int
}

type Person implements NamedEntity {
  name: String
  age: Int
}

type Business implements NamedEntity & ValuedEntity {
  name: String
  value: Int
  employeeCount: Int
}
"#;
    assert!(run_in(&mut registry, source).is_ok());

    let printed = registry.print_document(DEFAULT_DOCUMENT).unwrap();
    insta::assert_snapshot!(printed, @r"
    interface NamedEntity {
      name: String
    }

    interface ValuedEntity {
      value: Int
    }

    type Person implements NamedEntity {
      name: String
      age: Int
    }

    type Business implements NamedEntity & ValuedEntity {
      name: String
      value: Int
      employeeCount: Int
    }
    ");

    let mut reparsed = InMemoryRegistry::new();
    let output = run_in(&mut reparsed, &printed);
    assert!(output.is_ok());
    assert_eq!(&output.document, registry.document(DEFAULT_DOCUMENT).unwrap());
}
