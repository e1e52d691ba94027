//! Source languages the extractor understands.
//!
//! Grammars come from `ast-grep-language`, which ships the tree-sitter
//! grammars for every language listed here. Each language describes which
//! syntax nodes count as type-like declarations (searched first) and which
//! count as method-like declarations (searched second).

use ast_grep_language::{LanguageExt, SupportLang};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported language '{name}' (expected one of: java, csharp, go)")]
pub struct LanguageError {
    pub name: String,
}

/// A language whose declarations can be located and extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Java,
    CSharp,
    Go,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Java, Language::CSharp, Language::Go];

    /// The tree-sitter grammar for this language.
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        self.support_lang().get_ts_language()
    }

    fn support_lang(self) -> SupportLang {
        match self {
            Language::Java => SupportLang::Java,
            Language::CSharp => SupportLang::CSharp,
            Language::Go => SupportLang::Go,
        }
    }

    /// File extension (without the dot) of source files in this language.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::CSharp => "cs",
            Language::Go => "go",
        }
    }

    /// Human-readable name, used in error records.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Go => "Go",
        }
    }

    /// Node kinds for class and interface style declarations.
    pub fn type_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Java | Language::CSharp => &["class_declaration", "interface_declaration"],
            Language::Go => &["type_spec", "type_alias"],
        }
    }

    /// Node kinds for method and function declarations.
    pub fn method_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Java | Language::CSharp => &["method_declaration"],
            Language::Go => &["function_declaration", "method_declaration"],
        }
    }

    /// Parent node kind whose span replaces a type declaration's own span.
    ///
    /// Go names types inside `type_spec` nodes, but the extractable unit is
    /// the surrounding `type Foo struct { .. }` declaration.
    pub fn type_container_kind(self) -> Option<&'static str> {
        match self {
            Language::Go => Some("type_declaration"),
            Language::Java | Language::CSharp => None,
        }
    }

    /// Whether `path` has this language's source extension.
    pub fn is_source_file(self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Go => "go",
        };
        f.write_str(name)
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "csharp" | "cs" | "c#" => Ok(Language::CSharp),
            "go" | "golang" => Ok(Language::Go),
            _ => Err(LanguageError { name: s.to_string() }),
        }
    }
}
