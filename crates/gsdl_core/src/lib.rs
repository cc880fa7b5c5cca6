//! Core utilities for gsdl.
//!
//! This crate provides foundational types used throughout gsdl:
//! - `span`: byte spans and 1-based line/column positions
//! - `diagnostics`: accumulated, phase-tagged error reporting

pub mod diagnostics;
pub mod span;

pub use diagnostics::{
    codes, Diagnostic, DiagnosticBag, DiagnosticClass, DiagnosticSeverity, Phase,
};
pub use span::{Position, Span};
