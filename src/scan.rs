//! Directory tree scanning.
//!
//! The scanner walks a root directory, parses every source file of the
//! configured language, and stops at the first file that declares the
//! requested name. Files that cannot be read or parsed are skipped.

use crate::lang::Language;
use crate::ts::{
    CollectOptions, DeclarationKind, DeclarationLocator, LocatorResult, ParsedUnit,
    TreeSitterError,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to traverse {path}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to resolve absolute path for {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parser(#[from] TreeSitterError),
}

/// Scan configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub language: Language,
    /// Visit directory entries sorted by file name instead of in file-system
    /// order.
    pub sorted: bool,
    /// Include the comment block attached to a declaration.
    pub leading_comments: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            sorted: false,
            leading_comments: true,
        }
    }
}

impl SearchOptions {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            leading_comments: self.leading_comments,
        }
    }
}

/// The declaration found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Absolute path of the file containing the declaration.
    pub path: PathBuf,
    pub kind: DeclarationKind,
    pub line: usize,
    /// Source text of the declaration.
    pub source: String,
}

/// Walks a directory tree looking for a declaration.
pub struct Scanner {
    locator: DeclarationLocator,
    options: SearchOptions,
    visited: usize,
}

impl Scanner {
    pub fn new(options: SearchOptions) -> Result<Self, ScanError> {
        let locator = DeclarationLocator::with_options(options.language, options.collect_options())?;
        Ok(Self {
            locator,
            options,
            visited: 0,
        })
    }

    /// Number of source files parsed by the most recent walk.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Find the first file under `root` that declares `name`.
    pub fn find(&mut self, root: &Path, name: &str) -> Result<Option<PathBuf>, ScanError> {
        let found = self.first_unit(root, name)?;
        Ok(found.map(|(path, _)| path))
    }

    /// Find the first file under `root` that declares `name` and extract the
    /// declaration from the same parse.
    pub fn search(&mut self, root: &Path, name: &str) -> Result<Option<Match>, ScanError> {
        let Some((path, unit)) = self.first_unit(root, name)? else {
            return Ok(None);
        };

        Ok(LocatorResult::from_unit(&unit, name).map(|found| Match {
            path,
            kind: found.kind,
            line: found.line,
            source: found.text,
        }))
    }

    /// Extract the declaration named `name` from a single file.
    ///
    /// Unreadable or unparseable files yield `None`.
    pub fn extract(&mut self, file: &Path, name: &str) -> Option<String> {
        match self.locator.locate_in_file(file, name) {
            Ok(found) => found.map(|r| r.text),
            Err(e) => {
                debug!(path = %file.display(), error = %e, "extraction failed");
                None
            }
        }
    }

    fn first_unit(&mut self, root: &Path, name: &str) -> Result<Option<(PathBuf, ParsedUnit)>, ScanError> {
        let root = std::path::absolute(root).map_err(|e| ScanError::Resolve {
            path: root.to_path_buf(),
            source: e,
        })?;
        let target = crate::ts::unqualified(name);
        let language = self.options.language;

        let mut walker = WalkDir::new(&root);
        if self.options.sorted {
            walker = walker.sort_by_file_name();
        }

        self.visited = 0;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Only an unreadable root fails the run; unreadable subtrees are skipped.
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Traversal {
                        path: e.path().map_or_else(|| root.clone(), Path::to_path_buf),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            // Symlinks to regular files count; symlinked directories are not followed.
            if !language.is_source_file(path) || !path.is_file() {
                continue;
            }

            self.visited += 1;
            trace!(path = %path.display(), "parsing candidate");
            let unit = match self.locator.parse_file(path) {
                Ok(unit) => unit,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unparseable file");
                    continue;
                }
            };

            if unit.contains(target) {
                debug!(path = %path.display(), visited = self.visited, "declaration found");
                return Ok(Some((path.to_path_buf(), unit)));
            }
        }

        debug!(root = %root.display(), visited = self.visited, name = target, "no declaration found");
        Ok(None)
    }
}

/// Find the first source file under `root` that declares `name`.
pub fn find(root: &Path, name: &str, options: SearchOptions) -> Result<Option<PathBuf>, ScanError> {
    Scanner::new(options)?.find(root, name)
}

/// Search `root` for `name` and extract its declaration in one pass.
pub fn search(root: &Path, name: &str, options: SearchOptions) -> Result<Option<Match>, ScanError> {
    Scanner::new(options)?.search(root, name)
}

/// Extract the declaration named `name` from one file.
pub fn extract(file: &Path, name: &str, options: SearchOptions) -> Option<String> {
    match Scanner::new(options) {
        Ok(mut scanner) => scanner.extract(file, name),
        Err(e) => {
            debug!(error = %e, "failed to create scanner");
            None
        }
    }
}
