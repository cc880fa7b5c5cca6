//! Recursive descent parser for the schema definition language.
//!
//! Parsing never stops at the first problem. A malformed statement is
//! reported, abandoned, and parsing resumes at the next top-level statement
//! keyword. Only a top-level token that cannot start a statement halts the
//! parse; everything collected before it is still returned.

use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{DirectiveLocation, Token, TokenKind};
use gsdl_core::{Diagnostic, DiagnosticBag};
use indexmap::IndexMap;

/// Marker for a statement that has been reported and must be skipped.
#[derive(Debug)]
struct ParseError;

type PResult<T> = Result<T, ParseError>;

/// Output of phase 1.
#[derive(Debug)]
pub struct ParseResult {
    /// Every definition parsed before EOF or the fatal abort.
    pub document: Document,
    /// Unresolved type references in source order.
    pub references: Vec<RefSite>,
    pub diagnostics: DiagnosticBag,
    /// True if a fatal top-level error halted the parse.
    pub aborted: bool,
}

/// Parses `source` into a document named `document_name`.
pub fn parse(source: &str, document_name: &str) -> ParseResult {
    let mut parser = Parser::new(Lexer::new(source), document_name);
    parser.parse_document();
    parser.finish()
}

/// Parser for the schema definition language.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    /// Open braces consumed so far.
    depth: u32,
    document: Document,
    diagnostics: DiagnosticBag,
    aborted: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser.
    pub fn new(mut lexer: Lexer<'a>, document_name: &str) -> Self {
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
            document: Document::new(document_name),
            diagnostics: DiagnosticBag::new(),
            aborted: false,
        }
    }

    /// Consumes the parser.
    pub fn finish(self) -> ParseResult {
        let references = self.document.reference_sites();
        ParseResult {
            document: self.document,
            references,
            diagnostics: self.diagnostics,
            aborted: self.aborted,
        }
    }

    #[inline]
    fn at(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    fn at_kind(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Advances to the next token, returning the consumed one.
    fn bump(&mut self) -> Token<'a> {
        let token = self.current;
        match token.kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        if !token.is_eof() {
            self.current = self.lexer.next_token();
        }
        token
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token<'a>> {
        if self.at_kind(kind) {
            Ok(self.bump())
        } else {
            Err(self.error_expected(&format!("\"{kind}\"")))
        }
    }

    /// Reports a syntax error at the current token.
    fn error(&mut self, message: impl std::fmt::Display) -> ParseError {
        self.diagnostics.add(Diagnostic::syntax(
            message,
            self.current.position,
            self.current.span,
        ));
        ParseError
    }

    fn error_expected(&mut self, expected: &str) -> ParseError {
        let found = self.current.describe();
        self.error(format!("Expected {expected}, found \"{found}\""))
    }

    /// Skips the rest of a malformed statement.
    ///
    /// Stops at a statement keyword outside any braces, or right after the
    /// `}` that closes the statement's body, so whatever follows is checked
    /// as a top-level token again.
    fn synchronize(&mut self) {
        while !self.current.is_eof() {
            if self.depth == 0 && self.at().is_statement_keyword() {
                break;
            }
            let token = self.bump();
            if token.kind == TokenKind::RBrace && self.depth == 0 {
                break;
            }
        }
    }

    /// Parses statements until EOF or a fatal error.
    pub fn parse_document(&mut self) {
        while !self.current.is_eof() {
            let description = match self.parse_description() {
                Ok(description) => description,
                Err(ParseError) => {
                    self.synchronize();
                    continue;
                }
            };

            if !self.at().is_statement_keyword() {
                let token = self.current;
                self.diagnostics.add(Diagnostic::not_a_statement(
                    token.describe(),
                    token.position,
                    token.span,
                ));
                self.aborted = true;
                tracing::debug!(token = token.text, "parse aborted");
                break;
            }

            if self.parse_statement(description).is_err() {
                self.synchronize();
            }
        }
    }

    fn parse_statement(&mut self, description: Option<String>) -> PResult<()> {
        match self.at() {
            TokenKind::Schema => {
                let schema = self.parse_schema_definition(description)?;
                self.document.schema = Some(schema);
            }
            TokenKind::Directive => {
                let def = self.parse_directive_definition(description)?;
                self.document.directives.insert(def.name.value.clone(), def);
            }
            TokenKind::Type => {
                let def = self.parse_object_type(description)?;
                self.define(def);
            }
            TokenKind::Interface => {
                let def = self.parse_interface_type(description)?;
                self.define(def);
            }
            TokenKind::Union => {
                let def = self.parse_union_type(description)?;
                self.define(def);
            }
            TokenKind::Enum => {
                let def = self.parse_enum_type(description)?;
                self.define(def);
            }
            TokenKind::Input => {
                let def = self.parse_input_object_type(description)?;
                self.define(def);
            }
            TokenKind::Scalar => {
                let def = self.parse_scalar_type(description)?;
                self.define(def);
            }
            _ => return Err(self.error_expected("a statement keyword")),
        }
        Ok(())
    }

    /// Adds a type to the document; a later declaration replaces an earlier one.
    fn define(&mut self, def: TypeDef) {
        let name = def.name.value.clone();
        if self.document.insert(def).1.is_some() {
            tracing::debug!(%name, "type redeclared");
        }
    }

    fn parse_description(&mut self) -> PResult<Option<String>> {
        if self.at().is_string() {
            let token = self.bump();
            return self.string_value(token).map(Some);
        }
        Ok(None)
    }

    fn string_value(&mut self, token: Token<'a>) -> PResult<String> {
        match token.kind {
            TokenKind::StringLiteral => {
                let inner = &token.text[1..token.text.len() - 1];
                Ok(unescape_string(inner))
            }
            TokenKind::BlockStringLiteral => {
                let inner = &token.text[3..token.text.len() - 3];
                Ok(block_string_value(inner))
            }
            _ => Err(self.error_expected("a string")),
        }
    }

    /// Parses a name. Keywords are valid names.
    fn parse_name(&mut self) -> PResult<Name> {
        if self.at_kind(TokenKind::Ident) || self.at().is_keyword() {
            let token = self.bump();
            Ok(Name::new(token.text, token.position, token.span))
        } else {
            Err(self.error_expected("name"))
        }
    }

    fn parse_schema_definition(&mut self, description: Option<String>) -> PResult<SchemaDefinition> {
        self.expect(TokenKind::Schema)?;
        let directives = self.parse_directives()?;
        self.expect(TokenKind::LBrace)?;

        let mut operations = Vec::new();
        while !self.at_kind(TokenKind::RBrace) {
            let operation = match self.at() {
                TokenKind::Query => OperationType::Query,
                TokenKind::Mutation => OperationType::Mutation,
                TokenKind::Subscription => OperationType::Subscription,
                _ => return Err(self.error_expected("an operation type")),
            };
            self.bump();
            self.expect(TokenKind::Colon)?;
            let name = self.parse_name()?;
            operations.push(RootOperation {
                operation,
                ty: TypeRef::named(name.value, name.position, name.span),
            });
        }
        self.expect(TokenKind::RBrace)?;

        Ok(SchemaDefinition {
            description,
            directives,
            operations,
        })
    }

    fn parse_directive_definition(
        &mut self,
        description: Option<String>,
    ) -> PResult<DirectiveDefinition> {
        self.expect(TokenKind::Directive)?;
        self.expect(TokenKind::At)?;
        let name = self.parse_name()?;
        let arguments = self.parse_argument_definitions()?;
        let repeatable = self.eat(TokenKind::Repeatable);
        self.expect(TokenKind::On)?;

        self.eat(TokenKind::Pipe);
        let mut locations = vec![self.parse_directive_location()?];
        while self.eat(TokenKind::Pipe) {
            locations.push(self.parse_directive_location()?);
        }

        Ok(DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
        })
    }

    fn parse_directive_location(&mut self) -> PResult<DirectiveLocation> {
        if !self.at_kind(TokenKind::Ident) {
            return Err(self.error_expected("a directive location"));
        }
        match DirectiveLocation::parse(self.current.text) {
            Some(location) => {
                self.bump();
                Ok(location)
            }
            None => {
                let text = self.current.text;
                Err(self.error(format!("Unknown directive location \"{text}\"")))
            }
        }
    }

    fn parse_object_type(&mut self, description: Option<String>) -> PResult<TypeDef> {
        self.expect(TokenKind::Type)?;
        let name = self.parse_name()?;
        let implements = self.parse_implements()?;
        let directives = self.parse_directives()?;
        let fields = self.parse_field_definitions()?;

        Ok(TypeDef {
            description,
            name,
            directives,
            kind: TypeDefKind::Object(ObjectType { implements, fields }),
        })
    }

    fn parse_interface_type(&mut self, description: Option<String>) -> PResult<TypeDef> {
        self.expect(TokenKind::Interface)?;
        let name = self.parse_name()?;
        let implements = self.parse_implements()?;
        let directives = self.parse_directives()?;
        let fields = self.parse_field_definitions()?;

        Ok(TypeDef {
            description,
            name,
            directives,
            kind: TypeDefKind::Interface(InterfaceType { implements, fields }),
        })
    }

    fn parse_union_type(&mut self, description: Option<String>) -> PResult<TypeDef> {
        self.expect(TokenKind::Union)?;
        let name = self.parse_name()?;
        let directives = self.parse_directives()?;

        let mut members = Vec::new();
        if self.eat(TokenKind::Eq) {
            self.eat(TokenKind::Pipe);
            loop {
                let member = self.parse_name()?;
                members.push(TypeRef::named(member.value, member.position, member.span));
                if !self.eat(TokenKind::Pipe) {
                    break;
                }
            }
        }

        Ok(TypeDef {
            description,
            name,
            directives,
            kind: TypeDefKind::Union(UnionType { members }),
        })
    }

    fn parse_enum_type(&mut self, description: Option<String>) -> PResult<TypeDef> {
        self.expect(TokenKind::Enum)?;
        let name = self.parse_name()?;
        let directives = self.parse_directives()?;

        let mut values = Vec::new();
        if self.eat(TokenKind::LBrace) {
            while !self.at_kind(TokenKind::RBrace) {
                let description = self.parse_description()?;
                if matches!(self.at(), TokenKind::True | TokenKind::False | TokenKind::Null) {
                    return Err(self.error_expected("an enum value"));
                }
                let name = self.parse_name()?;
                let directives = self.parse_directives()?;
                values.push(EnumValueDefinition {
                    description,
                    name,
                    directives,
                });
            }
            self.expect(TokenKind::RBrace)?;
        }

        Ok(TypeDef {
            description,
            name,
            directives,
            kind: TypeDefKind::Enum(EnumType { values }),
        })
    }

    fn parse_input_object_type(&mut self, description: Option<String>) -> PResult<TypeDef> {
        self.expect(TokenKind::Input)?;
        let name = self.parse_name()?;
        let directives = self.parse_directives()?;

        let mut fields = IndexMap::new();
        if self.eat(TokenKind::LBrace) {
            while !self.at_kind(TokenKind::RBrace) {
                let field = self.parse_input_value_definition()?;
                if fields.contains_key(&field.name.value) {
                    self.report_duplicate(&field.name);
                } else {
                    fields.insert(field.name.value.clone(), field);
                }
            }
            self.expect(TokenKind::RBrace)?;
        }

        Ok(TypeDef {
            description,
            name,
            directives,
            kind: TypeDefKind::Input(InputObjectType { fields }),
        })
    }

    fn parse_scalar_type(&mut self, description: Option<String>) -> PResult<TypeDef> {
        self.expect(TokenKind::Scalar)?;
        let name = self.parse_name()?;
        let directives = self.parse_directives()?;

        Ok(TypeDef {
            description,
            name,
            directives,
            kind: TypeDefKind::Scalar,
        })
    }

    /// Parses `implements A & B`, reporting repeated names.
    fn parse_implements(&mut self) -> PResult<Vec<TypeRef>> {
        let mut interfaces: Vec<TypeRef> = Vec::new();
        if !self.eat(TokenKind::Implements) {
            return Ok(interfaces);
        }

        self.eat(TokenKind::Amp);
        loop {
            let name = self.parse_name()?;
            if interfaces.iter().any(|i| i.name == name.value) {
                self.diagnostics
                    .add(Diagnostic::duplicate_interface(name.position, name.span));
            } else {
                interfaces.push(TypeRef::named(name.value, name.position, name.span));
            }
            if !self.eat(TokenKind::Amp) {
                break;
            }
        }
        Ok(interfaces)
    }

    fn parse_field_definitions(&mut self) -> PResult<IndexMap<String, FieldDefinition>> {
        let mut fields = IndexMap::new();
        if !self.eat(TokenKind::LBrace) {
            return Ok(fields);
        }
        while !self.at_kind(TokenKind::RBrace) {
            let field = self.parse_field_definition()?;
            if fields.contains_key(&field.name.value) {
                self.report_duplicate(&field.name);
            } else {
                fields.insert(field.name.value.clone(), field);
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(fields)
    }

    /// The first definition of a name is kept; repeats are reported.
    fn report_duplicate(&mut self, name: &Name) {
        self.diagnostics
            .add(Diagnostic::duplicate_field(&name.value, name.position, name.span));
    }

    fn parse_field_definition(&mut self) -> PResult<FieldDefinition> {
        let description = self.parse_description()?;
        let name = self.parse_name()?;
        let arguments = self.parse_argument_definitions()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let directives = self.parse_directives()?;

        Ok(FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives,
        })
    }

    fn parse_argument_definitions(&mut self) -> PResult<Vec<InputValueDefinition>> {
        let mut arguments: Vec<InputValueDefinition> = Vec::new();
        if !self.eat(TokenKind::LParen) {
            return Ok(arguments);
        }
        while !self.at_kind(TokenKind::RParen) {
            let argument = self.parse_input_value_definition()?;
            if arguments.iter().any(|a| a.name == argument.name) {
                self.report_duplicate(&argument.name);
            } else {
                arguments.push(argument);
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(arguments)
    }

    fn parse_input_value_definition(&mut self) -> PResult<InputValueDefinition> {
        let description = self.parse_description()?;
        let name = self.parse_name()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let default_value = if self.eat(TokenKind::Eq) {
            Some(self.parse_value()?)
        } else {
            None
        };
        let directives = self.parse_directives()?;

        Ok(InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives,
        })
    }

    /// Parses `Name`, `[Type]` and either followed by `!`.
    fn parse_type(&mut self) -> PResult<TypeRef> {
        let ty = if self.eat(TokenKind::LBracket) {
            let inner = self.parse_type()?;
            self.expect(TokenKind::RBracket)?;
            inner.wrap(Wrapper::List)
        } else {
            let name = self.parse_name()?;
            TypeRef::named(name.value, name.position, name.span)
        };

        if self.eat(TokenKind::Bang) {
            Ok(ty.wrap(Wrapper::NonNull))
        } else {
            Ok(ty)
        }
    }

    fn parse_directives(&mut self) -> PResult<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.eat(TokenKind::At) {
            let name = self.parse_name()?;
            let mut arguments = Vec::new();
            if self.eat(TokenKind::LParen) {
                while !self.at_kind(TokenKind::RParen) {
                    let name = self.parse_name()?;
                    self.expect(TokenKind::Colon)?;
                    let value = self.parse_value()?;
                    arguments.push(Argument { name, value });
                }
                self.expect(TokenKind::RParen)?;
            }
            directives.push(Directive { name, arguments });
        }
        Ok(directives)
    }

    /// Parses a constant value.
    fn parse_value(&mut self) -> PResult<Value> {
        match self.at() {
            TokenKind::IntLiteral => Ok(Value::Int(self.bump().text.to_string())),
            TokenKind::FloatLiteral => Ok(Value::Float(self.bump().text.to_string())),
            TokenKind::StringLiteral | TokenKind::BlockStringLiteral => {
                let token = self.bump();
                self.string_value(token).map(Value::String)
            }
            TokenKind::True => {
                self.bump();
                Ok(Value::Boolean(true))
            }
            TokenKind::False => {
                self.bump();
                Ok(Value::Boolean(false))
            }
            TokenKind::Null => {
                self.bump();
                Ok(Value::Null)
            }
            TokenKind::LBracket => {
                self.bump();
                let mut items = Vec::new();
                while !self.at_kind(TokenKind::RBracket) {
                    items.push(self.parse_value()?);
                }
                self.expect(TokenKind::RBracket)?;
                Ok(Value::List(items))
            }
            TokenKind::LBrace => {
                self.bump();
                let mut fields = Vec::new();
                while !self.at_kind(TokenKind::RBrace) {
                    let name = self.parse_name()?;
                    self.expect(TokenKind::Colon)?;
                    fields.push((name.value, self.parse_value()?));
                }
                self.expect(TokenKind::RBrace)?;
                Ok(Value::Object(fields))
            }
            kind if kind == TokenKind::Ident || kind.is_keyword() => {
                Ok(Value::Enum(self.bump().text.to_string()))
            }
            _ => Err(self.error_expected("a value")),
        }
    }
}

/// Decodes the escapes of a quoted string body.
fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Computes the value of a block string body: common indentation and
/// leading/trailing blank lines are removed.
fn block_string_value(raw: &str) -> String {
    let raw = raw.replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = raw.lines().collect();

    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| if i == 0 { *line } else { line.get(indent..).unwrap_or("") })
        .collect();

    while out.first().is_some_and(|line| line.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|line| line.trim().is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsdl_core::{DiagnosticClass, Position};

    fn parse_ok(source: &str) -> Document {
        let result = parse(source, "DefaultDoc");
        assert!(
            result.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            result.diagnostics.messages()
        );
        result.document
    }

    #[test]
    fn test_parse_object_type() {
        let doc = parse_ok("type Person { name: String age: Int! }");
        let person = doc.get("Person").unwrap();
        let fields = person.fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["age"].ty.to_string(), "Int!");
        assert_eq!(person.position(), Position::new(1, 6));
    }

    #[test]
    fn test_parse_nested_wrappers() {
        let doc = parse_ok("type T { grid: [[String!]!]! }");
        let ty = &doc.get("T").unwrap().fields().unwrap()["grid"].ty;
        assert_eq!(
            ty.wrappers,
            vec![
                Wrapper::NonNull,
                Wrapper::List,
                Wrapper::NonNull,
                Wrapper::List,
                Wrapper::NonNull
            ]
        );
        assert_eq!(ty.position, Position::new(1, 18));
    }

    #[test]
    fn test_parse_implements() {
        let doc = parse_ok("type Business implements & NamedEntity & ValuedEntity { name: String }");
        let names: Vec<_> = doc
            .get("Business")
            .unwrap()
            .implements()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["NamedEntity", "ValuedEntity"]);
    }

    #[test]
    fn test_duplicate_interface_continues() {
        let source = "type B implements N & V & N {\n  name: String\n}\nscalar Date\n";
        let result = parse(source, "DefaultDoc");
        assert_eq!(
            result.diagnostics.messages(),
            ["Duplicate interface name at line: 1 column: 27"]
        );
        assert!(result.diagnostics.has_class(DiagnosticClass::Structural));
        assert_eq!(result.document.get("B").unwrap().implements().len(), 2);
        assert!(result.document.get("Date").is_some());
    }

    #[test]
    fn test_duplicate_field_keeps_first() {
        let result = parse("type T {\n  a: Int\n  a: String\n}", "DefaultDoc");
        assert_eq!(
            result.diagnostics.messages(),
            ["Duplicate field name \"a\" at line: 3 column: 3"]
        );
        let fields = result.document.get("T").unwrap().fields().unwrap();
        assert_eq!(fields["a"].ty.name, "Int");
    }

    #[test]
    fn test_fatal_statement_keyword() {
        let source = "interface A {\n  a: Int\n}\ninterfacei B {\n  b: Int\n}\ntype C { c: Int }";
        let result = parse(source, "DefaultDoc");
        assert!(result.aborted);
        assert_eq!(
            result.diagnostics.messages(),
            ["Parse aborted. \"interfacei\" is not a statement keyword at line: 4, column: 1"]
        );
        assert!(result.diagnostics.has_fatal());
        assert!(result.document.get("A").is_some());
        assert!(result.document.get("C").is_none());
    }

    #[test]
    fn test_malformed_wrapper_skips_statement() {
        let source = "type A {\n  xs: [String\n  y: Int\n}\ntype B { b: Int }";
        let result = parse(source, "DefaultDoc");
        assert!(!result.aborted);
        assert_eq!(
            result.diagnostics.messages(),
            ["Expected \"]\", found \"y\" at line: 3 column: 3"]
        );
        assert!(result.document.get("A").is_none());
        assert!(result.document.get("B").is_some());
    }

    #[test]
    fn test_bad_keyword_after_recovered_statement_aborts() {
        let source = "type A {\n  xs: [Int\n}\ninterfacei B {\n  b: Int\n}\ntype C { c: Int }";
        let result = parse(source, "DefaultDoc");
        assert!(result.aborted);
        assert_eq!(
            result.diagnostics.messages(),
            [
                "Expected \"]\", found \"}\" at line: 3 column: 1",
                "Parse aborted. \"interfacei\" is not a statement keyword at line: 4, column: 1",
            ]
        );
        assert!(result.document.get("A").is_none());
        assert!(result.document.get("C").is_none());
    }

    #[test]
    fn test_recovery_resumes_after_closing_brace() {
        let source = "type A { a: }\ntype B { b: Int }";
        let result = parse(source, "DefaultDoc");
        assert!(!result.aborted);
        assert_eq!(
            result.diagnostics.messages(),
            ["Expected name, found \"}\" at line: 1 column: 13"]
        );
        assert!(result.document.get("B").is_some());
    }

    #[test]
    fn test_unclosed_body_reports_eof() {
        let result = parse("type A {\n  a: Int\n", "DefaultDoc");
        assert_eq!(
            result.diagnostics.messages(),
            ["Expected name, found \"<eof>\" at line: 3 column: 1"]
        );
        assert!(!result.aborted);
    }

    #[test]
    fn test_redeclaration_last_write_wins() {
        let doc = parse_ok("type A { x: Int }\nscalar B\ntype A { y: String }");
        assert_eq!(doc.type_count(), 2);
        assert_eq!(doc.types.get_index_of("A"), Some(0));
        assert!(doc.get("A").unwrap().fields().unwrap().contains_key("y"));
    }

    #[test]
    fn test_references_in_source_order() {
        let result = parse(
            "type P implements N {\n  a(first: Int): [Foo!]\n}\nunion U = P | Q",
            "DefaultDoc",
        );
        let names: Vec<_> = result.references.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["N", "Int", "Foo", "P", "Q"]);
        assert!(result.references[0].path.is_implements());
    }

    #[test]
    fn test_parse_descriptions() {
        let source = r#"
"A person"
type Person {
  """
  Full name.
    Indented line.
  """
  name: String
}
"#;
        let doc = parse_ok(source);
        let person = doc.get("Person").unwrap();
        assert_eq!(person.description.as_deref(), Some("A person"));
        assert_eq!(
            person.fields().unwrap()["name"].description.as_deref(),
            Some("Full name.\n  Indented line.")
        );
    }

    #[test]
    fn test_parse_arguments_defaults_and_directives() {
        let source = r#"type Query {
  users(first: Int = 10, order: Order = ASC, tags: [String] = ["a" "b"], filter: F = { active: true, name: null }): [User] @deprecated(reason: "use people")
}"#;
        let doc = parse_ok(source);
        let field = &doc.get("Query").unwrap().fields().unwrap()["users"];
        assert_eq!(field.arguments.len(), 4);
        assert_eq!(field.arguments[0].default_value, Some(Value::Int("10".into())));
        assert_eq!(field.arguments[1].default_value, Some(Value::Enum("ASC".into())));
        assert_eq!(
            field.arguments[2].default_value,
            Some(Value::List(vec![
                Value::String("a".into()),
                Value::String("b".into())
            ]))
        );
        assert_eq!(
            field.arguments[3].default_value,
            Some(Value::Object(vec![
                ("active".into(), Value::Boolean(true)),
                ("name".into(), Value::Null)
            ]))
        );
        assert_eq!(field.directives[0].name.value, "deprecated");
        assert_eq!(
            field.directives[0].arguments[0].value,
            Value::String("use people".into())
        );
    }

    #[test]
    fn test_parse_other_definitions() {
        let source = r#"
schema { query: Query mutation: Mutation }
directive @auth(role: Role = ADMIN) repeatable on | OBJECT | FIELD_DEFINITION
scalar Date @specifiedBy(url: "https://example.com")
union SearchResult = | User | Post
enum Role { ADMIN USER }
input NewUser { name: String! role: Role = USER }
interface Node implements Entity { id: ID! }
"#;
        let doc = parse_ok(source);
        let schema = doc.schema.as_ref().unwrap();
        assert_eq!(schema.operations.len(), 2);
        assert_eq!(schema.operations[1].operation, OperationType::Mutation);

        let auth = &doc.directives["auth"];
        assert!(auth.repeatable);
        assert_eq!(
            auth.locations,
            [DirectiveLocation::Object, DirectiveLocation::FieldDefinition]
        );

        assert_eq!(doc.get("Date").unwrap().type_kind(), TypeKind::Scalar);
        match &doc.get("SearchResult").unwrap().kind {
            TypeDefKind::Union(u) => assert_eq!(u.members.len(), 2),
            other => panic!("expected union, got {other:?}"),
        }
        match &doc.get("Role").unwrap().kind {
            TypeDefKind::Enum(e) => assert_eq!(e.values.len(), 2),
            other => panic!("expected enum, got {other:?}"),
        }
        assert_eq!(doc.get("NewUser").unwrap().type_kind(), TypeKind::Input);
        assert_eq!(doc.get("Node").unwrap().implements()[0].name, "Entity");
    }

    #[test]
    fn test_unknown_directive_location() {
        let result = parse("directive @d on NOWHERE\nscalar S", "DefaultDoc");
        assert_eq!(
            result.diagnostics.messages(),
            ["Unknown directive location \"NOWHERE\" at line: 1 column: 17"]
        );
        assert!(result.document.directives.is_empty());
        assert!(result.document.get("S").is_some());
    }

    #[test]
    fn test_keywords_as_field_names() {
        let doc = parse_ok("type T { type: String input: Int query: ID }");
        let fields = doc.get("T").unwrap().fields().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["type", "input", "query"]);
    }

    #[test]
    fn test_unescape_string() {
        assert_eq!(unescape_string(r#"a\"b\\c\ndA"#), "a\"b\\c\ndA");
    }
}
