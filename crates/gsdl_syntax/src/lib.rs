//! Syntax layer for gsdl.
//!
//! This crate provides:
//! - `token`: Token kinds and token structures
//! - `lexer`: Tokenization with line/column tracking
//! - `ast`: Type-system definitions and type references
//! - `parser`: Recursive descent parser (phase 1)
//! - `formatter`: SDL printing

pub mod ast;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use formatter::{format, format_with_options, FormatOptions, Formatter};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, ParseResult, Parser};
pub use token::{DirectiveLocation, Token, TokenKind};
