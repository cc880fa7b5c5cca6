mod common;

use common::run;
use gsdl::{DiagnosticClass, Phase};

#[test]
fn test_implements_undeclared_interface() {
    let output = run(r#"
interface ValuedEntity {
  value: Int
}

type Person implements NamedEntity {
  name: String
  age: Int
}
"#);
    assert_eq!(
        output.messages(),
        [r#""NamedEntity" does not exist in document "DefaultDoc" at line: 6 column: 24"#]
    );
    assert!(output.diagnostics.has_class(DiagnosticClass::Reference));
}

#[test]
fn test_implements_non_interface() {
    let output = run(r#"
type NamedEntity {
  value: Int
}

type Person implements NamedEntity {
  name: String
  age: Int
}
"#);
    assert_eq!(
        output.messages(),
        [r#""NamedEntity" is not an interface type, at line: 6 column: 24"#]
    );
}

#[test]
fn test_dangling_interface_suppresses_conformance() {
    let output = run(r#"
interface NamedEntity {
  name: String
  name2: Int

}
interface ValuedEntity {
  value: Int
}

type Person implements NamedEntity & ValuedEntity2 {
  name: String
  age: Int
}
"#);
    assert_eq!(
        output.messages(),
        [r#""ValuedEntity2" does not exist in document "DefaultDoc" at line: 11 column: 38"#]
    );
    assert_eq!(output.diagnostics.in_phase(Phase::Conformance).count(), 0);
}

#[test]
fn test_unresolved_field_types_suppress_conformance_for_that_type() {
    let output = run(r#"
interface NamedEntity {
  name: String
  name2: Int2

}
interface ValuedEntity {
  value: Int
  value2: FLoat
  value3: Boolean
  value4: Bool
}

type Person implements NamedEntity & ValuedEntity {
  name: String
  age: In
}
"#);
    assert_eq!(
        output.messages(),
        [
            r#""Int2" does not exist in document "DefaultDoc" at line: 4 column: 10"#,
            r#""FLoat" does not exist in document "DefaultDoc" at line: 9 column: 11"#,
            r#""Bool" does not exist in document "DefaultDoc" at line: 11 column: 11"#,
            r#""In" does not exist in document "DefaultDoc" at line: 16 column: 8"#,
        ]
    );
}

#[test]
fn test_missing_fields_reported_alongside_reference_errors() {
    let output = run(r#"
interface NamedEntity {
  name: String
  name2: Int2

}
interface ValuedEntity {
  value: Int
  value2: FLoat
  value3: Boolean
  value4: Bool
}

type Int2 {
	x: Int
}

type In {
	Age: Int
}

type Bool {
	z: Boolean
}


type Person implements NamedEntity & ValuedEntity {
  name: String
  age: Int
  value: Int
}
"#);
    assert_eq!(
        output.messages(),
        [
            r#""FLoat" does not exist in document "DefaultDoc" at line: 9 column: 11"#,
            r#"Type "Person" does not implement interface "NamedEntity", missing "name2""#,
            r#"Type "Person" does not implement interface "ValuedEntity", missing "value2" "value3" "value4""#,
        ]
    );
}

#[test]
fn test_duplicate_interface_in_clause() {
    let output = run(r#"
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

type Business implements NamedEntity & ValuedEntity & NamedEntity {
  name: String
  value: Int
  employeeCount: Int
}
"#);
    assert_eq!(
        output.messages(),
        ["Duplicate interface name at line: 15 column: 55"]
    );
    assert!(output.diagnostics.has_class(DiagnosticClass::Structural));
    assert_eq!(
        output.document.get("Business").unwrap().implements().len(),
        2
    );
}

#[test]
fn test_duplicate_field_is_not_resolved() {
    let output = run("type T {\n  a: Int\n  a: Missing\n}");
    assert_eq!(
        output.messages(),
        [r#"Duplicate field name "a" at line: 3 column: 3"#]
    );
    assert_eq!(output.diagnostics.in_phase(Phase::Resolve).count(), 0);
}

#[test]
fn test_forward_references_conform() {
    let output = run(r#"
type Business implements NamedEntity & ValuedEntity {
  name: [[String!]!]!
  value: Int
  employeeCount: Int
}

interface NamedEntity {
  name: [[String!]!]!
}

type Person implements NamedEntity {
  name: [[String!]!]!
  age: Int
}

interface ValuedEntity {
  value: Int
}
"#);
    assert!(output.is_ok(), "{:?}", output.messages());
}

#[test]
fn test_wrapper_mismatch_is_missing() {
    let output = run(r#"
interface NamedEntity {
  name: [[String!]!]!
}

interface ValuedEntity {
  value: Int
}

type Person implements NamedEntity {
  name: [[String!]!]!
  age: Int
}

type Business implements NamedEntity & ValuedEntity {
  name: [[String!]]!
  value: Int
  employeeCount: Int
}
"#);
    assert_eq!(
        output.messages(),
        [r#"Type "Business" does not implement interface "NamedEntity", missing "name""#]
    );
}

#[test]
fn test_bad_statement_keyword_aborts() {
    let source = "
\tinterfacei NamedEntity6b {
\t  name: String!
\t}

\tinterface ValuedEntity6b {
\t  value: Int
\t}
";
    let output = run(source);
    assert!(output.aborted);
    assert_eq!(
        output.messages(),
        [r#"Parse aborted. "interfacei" is not a statement keyword at line: 2, column: 2"#]
    );
    assert!(output.diagnostics.has_fatal());
    assert!(output.document.is_empty());
}

#[test]
fn test_abort_keeps_earlier_definitions_and_skips_resolution() {
    let output = run("type A { a: Missing }\nextend type A { b: Int }");
    assert!(output.aborted);
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.document.get("A").is_some());
}

#[test]
fn test_leading_ampersand_and_partial_fields() {
    let output = run(r#"
interface NamedEntity {
  name: String
  XXX: Boolean
}

interface ValuedEntity {
  value: Int
  size: [String]
  length: Float
}

type Person implements NamedEntity {
  name: String
  age: Int
}

type Business implements & NamedEntity & ValuedEntity {
  name: String
  value: Int
  length: String
  employeeCount: Int
}

type Business2 implements & NamedEntity & ValuedEntity {
  name: String
  XXX: Boolean
  size: String
  length: Float
  value: Int
  employeeCount: Int
}
"#);
    assert_eq!(
        output.messages(),
        [
            r#"Type "Person" does not implement interface "NamedEntity", missing "XXX""#,
            r#"Type "Business" does not implement interface "NamedEntity", missing "XXX""#,
            r#"Type "Business" does not implement interface "ValuedEntity", missing "size" "length""#,
            r#"Type "Business2" does not implement interface "ValuedEntity", missing "size""#,
        ]
    );
    assert!(output
        .diagnostics
        .iter()
        .all(|d| d.phase() == Phase::Conformance));
}

#[test]
fn test_star_wars_schema_is_clean() {
    let output = run(r#"
enum Episode {
  NEWHOPE
  EMPIRE
  JEDI
}

type Starship {
  id: ID!
  name: String!
  length(unit: LengthUnit = METER): Float
}

interface Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode]!
}

type Human implements Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode]!
  starships: [Starship]
  totalCredits: Int
}

type Droid implements Character {
  id: ID!
  name: String!
  friends: [Character]
  appearsIn: [Episode]!
  primaryFunction: String
}

enum LengthUnit{
METER
CENTERMETER
MILLIMETER
KILOMETER
}
"#);
    assert!(output.is_ok(), "{:?}", output.messages());
    assert_eq!(output.document.type_count(), 6);
}

#[test]
fn test_reports_carry_messages() {
    let source = "type Person implements NamedEntity { name: String }";
    let output = run(source);
    let reports = output.reports("schema.graphql", source);
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].to_string(),
        r#""NamedEntity" does not exist in document "DefaultDoc" at line: 1 column: 24"#
    );
}
