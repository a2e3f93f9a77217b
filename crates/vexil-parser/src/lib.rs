//! Vexil Parser - JSON/YAML to AST parser for Vexil flag definitions
//!
//! This crate converts flag definitions as delivered by the flag registry
//! (JSON) or written by hand (YAML) into validated [`FlagDefinition`]s.
//!
//! [`FlagDefinition`]: vexil_core::FlagDefinition

pub mod error;
pub mod flag_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use flag_parser::{FlagParser, FlagSet};
