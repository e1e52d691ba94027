//! Code Extractor: find a class or method by name in a source tree.
//!
//! The extractor walks a directory, parses each source file with
//! tree-sitter, and returns the verbatim text of the first class, interface
//! or method whose name matches the target.
//!
//! # Architecture
//!
//! - [`scan`] walks the tree and stops at the first file that declares the
//!   name. Unreadable or unparseable files are skipped.
//! - [`ts`] turns one file into a [`ParsedUnit`]: an ordered declaration
//!   list searched in two stages (types first, then methods).
//! - [`report`] renders the outcome as a one-line JSON record.
//!
//! The matched file is parsed exactly once; the unit that satisfied the
//! lookup is the one the text is extracted from.
//!
//! # Example
//!
//! ```no_run
//! use code_extractor::{search, Report, SearchOptions};
//! use std::path::Path;
//!
//! let options = SearchOptions::default();
//! match search(Path::new("src/main/java"), "OrderService", options) {
//!     Ok(found) => {
//!         let report = Report::from_search(found.as_ref(), options.language);
//!         println!("{}", report.to_json().unwrap());
//!     }
//!     Err(e) => eprintln!("Search failed: {}", e),
//! }
//! ```

pub mod lang;
pub mod report;
pub mod scan;
pub mod ts;

// Re-exports
pub use lang::{Language, LanguageError};
pub use report::Report;
pub use scan::{extract, find, search, Match, ScanError, Scanner, SearchOptions};
pub use ts::{
    Declaration, DeclarationKind, DeclarationLocator, LocatorResult, ParsedUnit, SourceParser,
    TreeSitterError,
};
