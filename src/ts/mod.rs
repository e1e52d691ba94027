//! Tree-sitter integration for locating declarations.
//!
//! This module parses source files with tree-sitter, reduces each tree to an
//! ordered list of class and method declarations, and extracts the exact
//! byte span of a declaration without losing comments or formatting.

pub mod errors;
pub mod locator;
pub mod parser;
pub mod unit;

pub use errors::TreeSitterError;
pub use locator::{unqualified, DeclarationLocator, LocatorResult};
pub use parser::{ParsedSource, SourceParser};
pub use unit::{CollectOptions, Declaration, DeclarationKind, ParsedUnit};
