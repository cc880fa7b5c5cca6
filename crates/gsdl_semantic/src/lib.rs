//! Semantic layer for gsdl.
//!
//! This crate provides:
//! - `registry`: The named document store the pipeline resolves against
//! - `checker`: Interface conformance checking (phase 3)

pub mod checker;
pub mod registry;

pub use checker::{check, CheckResult, TypeChecker};
pub use registry::{DocumentRegistry, InMemoryRegistry, RegistryError, DEFAULT_DOCUMENT};
