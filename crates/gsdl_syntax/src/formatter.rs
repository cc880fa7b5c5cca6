//! SDL printing.
//!
//! Output order follows the document: schema definition, directive
//! definitions, then types in insertion order. Printing and re-parsing a
//! document yields a structurally equal document.

use crate::ast::*;

/// Formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Number of spaces for indentation.
    pub indent_size: usize,
    /// Use tabs instead of spaces.
    pub use_tabs: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: false,
        }
    }
}

/// SDL formatter.
pub struct Formatter {
    options: FormatOptions,
    output: String,
    indent: usize,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            output: String::new(),
            indent: 0,
        }
    }

    /// Formats a document.
    pub fn format(&mut self, document: &Document) -> String {
        self.output.clear();
        let mut first = true;
        let mut separate = |output: &mut String| {
            if !std::mem::take(&mut first) {
                output.push_str("\n\n");
            }
        };

        if let Some(schema) = &document.schema {
            separate(&mut self.output);
            self.format_schema(schema);
        }
        for directive in document.directives.values() {
            separate(&mut self.output);
            self.format_directive_definition(directive);
        }
        for def in document.types.values() {
            separate(&mut self.output);
            self.format_type_definition(def);
        }

        std::mem::take(&mut self.output)
    }

    fn format_schema(&mut self, schema: &SchemaDefinition) {
        if let Some(desc) = &schema.description {
            self.format_description(desc);
        }
        self.output.push_str("schema");
        self.format_directives(&schema.directives);
        self.output.push_str(" {\n");
        self.indent += 1;
        for op in &schema.operations {
            self.push_indent();
            self.output.push_str(op.operation.as_str());
            self.output.push_str(": ");
            self.output.push_str(&op.ty.name);
            self.output.push('\n');
        }
        self.indent -= 1;
        self.output.push('}');
    }

    fn format_directive_definition(&mut self, def: &DirectiveDefinition) {
        if let Some(desc) = &def.description {
            self.format_description(desc);
        }
        self.output.push_str("directive @");
        self.output.push_str(&def.name.value);
        self.format_argument_definitions(&def.arguments);
        if def.repeatable {
            self.output.push_str(" repeatable");
        }
        self.output.push_str(" on ");
        for (i, location) in def.locations.iter().enumerate() {
            if i > 0 {
                self.output.push_str(" | ");
            }
            self.output.push_str(location.as_str());
        }
    }

    fn format_type_definition(&mut self, def: &TypeDef) {
        if let Some(desc) = &def.description {
            self.format_description(desc);
        }
        self.output.push_str(def.type_kind().as_str());
        self.output.push(' ');
        self.output.push_str(&def.name.value);

        match &def.kind {
            TypeDefKind::Scalar => self.format_directives(&def.directives),
            TypeDefKind::Object(ObjectType { implements, fields })
            | TypeDefKind::Interface(InterfaceType { implements, fields }) => {
                self.format_implements(implements);
                self.format_directives(&def.directives);
                if !fields.is_empty() {
                    self.open_block();
                    for field in fields.values() {
                        self.format_field(field);
                    }
                    self.close_block();
                }
            }
            TypeDefKind::Union(u) => {
                self.format_directives(&def.directives);
                if !u.members.is_empty() {
                    self.output.push_str(" = ");
                    for (i, member) in u.members.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(" | ");
                        }
                        self.output.push_str(&member.name);
                    }
                }
            }
            TypeDefKind::Enum(e) => {
                self.format_directives(&def.directives);
                if !e.values.is_empty() {
                    self.open_block();
                    for value in &e.values {
                        if let Some(desc) = &value.description {
                            self.format_description(desc);
                        }
                        self.push_indent();
                        self.output.push_str(&value.name.value);
                        self.format_directives(&value.directives);
                        self.output.push('\n');
                    }
                    self.close_block();
                }
            }
            TypeDefKind::Input(i) => {
                self.format_directives(&def.directives);
                if !i.fields.is_empty() {
                    self.open_block();
                    for field in i.fields.values() {
                        if let Some(desc) = &field.description {
                            self.format_description(desc);
                        }
                        self.push_indent();
                        self.format_input_value(field);
                        self.output.push('\n');
                    }
                    self.close_block();
                }
            }
        }
    }

    fn open_block(&mut self) {
        self.output.push_str(" {\n");
        self.indent += 1;
    }

    fn close_block(&mut self) {
        self.indent -= 1;
        self.push_indent();
        self.output.push('}');
    }

    fn format_field(&mut self, field: &FieldDefinition) {
        if let Some(desc) = &field.description {
            self.format_description(desc);
        }
        self.push_indent();
        self.output.push_str(&field.name.value);
        self.format_argument_definitions(&field.arguments);
        self.output.push_str(": ");
        self.output.push_str(&field.ty.to_string());
        self.format_directives(&field.directives);
        self.output.push('\n');
    }

    fn format_argument_definitions(&mut self, arguments: &[InputValueDefinition]) {
        if arguments.is_empty() {
            return;
        }
        self.output.push('(');
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            if let Some(desc) = &arg.description {
                self.format_string(desc);
                self.output.push(' ');
            }
            self.format_input_value(arg);
        }
        self.output.push(')');
    }

    fn format_input_value(&mut self, value: &InputValueDefinition) {
        self.output.push_str(&value.name.value);
        self.output.push_str(": ");
        self.output.push_str(&value.ty.to_string());
        if let Some(default) = &value.default_value {
            self.output.push_str(" = ");
            self.format_value(default);
        }
        self.format_directives(&value.directives);
    }

    fn format_implements(&mut self, implements: &[TypeRef]) {
        if implements.is_empty() {
            return;
        }
        self.output.push_str(" implements ");
        for (i, iface) in implements.iter().enumerate() {
            if i > 0 {
                self.output.push_str(" & ");
            }
            self.output.push_str(&iface.name);
        }
    }

    fn format_directives(&mut self, directives: &[Directive]) {
        for directive in directives {
            self.output.push_str(" @");
            self.output.push_str(&directive.name.value);
            if !directive.arguments.is_empty() {
                self.output.push('(');
                for (i, arg) in directive.arguments.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(&arg.name.value);
                    self.output.push_str(": ");
                    self.format_value(&arg.value);
                }
                self.output.push(')');
            }
        }
    }

    fn format_value(&mut self, value: &Value) {
        match value {
            Value::Int(n) | Value::Float(n) => self.output.push_str(n),
            Value::String(s) => self.format_string(s),
            Value::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Null => self.output.push_str("null"),
            Value::Enum(name) => self.output.push_str(name),
            Value::List(items) => {
                self.output.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.format_value(item);
                }
                self.output.push(']');
            }
            Value::Object(fields) => {
                self.output.push('{');
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(name);
                    self.output.push_str(": ");
                    self.format_value(value);
                }
                self.output.push('}');
            }
        }
    }

    /// Writes a quoted string literal.
    fn format_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if c.is_control() => {
                    self.output.push_str(&format!("\\u{:04X}", u32::from(c)));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    /// Writes a description on its own line(s) at the current indent.
    fn format_description(&mut self, desc: &str) {
        self.push_indent();
        if desc.contains('\n') {
            self.output.push_str("\"\"\"\n");
            for line in desc.lines() {
                if !line.is_empty() {
                    self.push_indent();
                    self.output.push_str(&line.replace("\"\"\"", "\\\"\"\""));
                }
                self.output.push('\n');
            }
            self.push_indent();
            self.output.push_str("\"\"\"\n");
        } else {
            self.format_string(desc);
            self.output.push('\n');
        }
    }

    fn push_indent(&mut self) {
        if self.options.use_tabs {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
        } else {
            for _ in 0..(self.indent * self.options.indent_size) {
                self.output.push(' ');
            }
        }
    }
}

/// Formats a document with default options.
#[must_use]
pub fn format(document: &Document) -> String {
    let mut formatter = Formatter::new(FormatOptions::default());
    formatter.format(document)
}

/// Formats a document with custom options.
#[must_use]
pub fn format_with_options(document: &Document, options: FormatOptions) -> String {
    let mut formatter = Formatter::new(options);
    formatter.format(document)
}
