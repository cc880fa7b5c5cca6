#![allow(dead_code)]

use gsdl::{InMemoryRegistry, ParseOutput, SchemaParser};
use tracing_subscriber::EnvFilter;

/// Routes pipeline traces to the test output, e.g. `RUST_LOG=gsdl=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gsdl=warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Runs the pipeline against a fresh registry.
pub fn run(source: &str) -> ParseOutput {
    init_tracing();
    let mut registry = InMemoryRegistry::new();
    SchemaParser::new(&mut registry).parse_document(source)
}

/// Runs the pipeline against `registry`.
pub fn run_in(registry: &mut InMemoryRegistry, source: &str) -> ParseOutput {
    init_tracing();
    SchemaParser::new(registry).parse_document(source)
}
