//! CLI command implementations.

mod generate;

pub use generate::{generate_qr, Invocation, OutputMode};
