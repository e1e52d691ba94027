use crate::lang::Language;
use crate::ts::errors::TreeSitterError;
use crate::ts::parser::SourceParser;
use crate::ts::unit::{CollectOptions, DeclarationKind, ParsedUnit};
use std::path::Path;

/// Result of locating a declaration in one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorResult {
    pub kind: DeclarationKind,
    /// Byte range of the extracted text within the file.
    pub byte_start: usize,
    pub byte_end: usize,
    /// 1-based line of the declaration.
    pub line: usize,
    /// The extracted text.
    pub text: String,
}

impl LocatorResult {
    /// Locate `name` in an already parsed unit.
    pub fn from_unit(unit: &ParsedUnit, name: &str) -> Option<Self> {
        let declaration = unit.find(unqualified(name))?;
        Some(LocatorResult {
            kind: declaration.kind,
            byte_start: declaration.span.start,
            byte_end: declaration.span.end,
            line: declaration.line,
            text: unit.text(declaration).to_string(),
        })
    }
}

/// Reduce a dotted name such as `middleware.StaticContentsMiddleware` to its
/// final segment.
pub fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Finds class and method declarations by name.
pub struct DeclarationLocator {
    parser: SourceParser,
    options: CollectOptions,
}

impl DeclarationLocator {
    /// Create a locator for one language with default options.
    pub fn new(language: Language) -> Result<Self, TreeSitterError> {
        Self::with_options(language, CollectOptions::default())
    }

    pub fn with_options(language: Language, options: CollectOptions) -> Result<Self, TreeSitterError> {
        Ok(Self {
            parser: SourceParser::new(language)?,
            options,
        })
    }

    pub fn language(&self) -> Language {
        self.parser.language()
    }

    /// Parse source into a declaration list.
    ///
    /// Sources with any syntax error are rejected.
    pub fn parse_source(&mut self, source: &str) -> Result<ParsedUnit, TreeSitterError> {
        ParsedUnit::parse(source.to_owned(), &mut self.parser, self.options)
    }

    /// Read and parse a file into a declaration list.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedUnit, TreeSitterError> {
        let bytes = std::fs::read(path).map_err(|e| TreeSitterError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let source = String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        ParsedUnit::parse(source, &mut self.parser, self.options)
    }

    /// Locate the declaration named `name` in source code.
    ///
    /// Returns `Ok(None)` when the source parses but declares nothing by that
    /// name.
    pub fn locate(&mut self, source: &str, name: &str) -> Result<Option<LocatorResult>, TreeSitterError> {
        let unit = self.parse_source(source)?;
        Ok(LocatorResult::from_unit(&unit, name))
    }

    /// Locate a declaration in a file.
    pub fn locate_in_file(
        &mut self,
        path: &Path,
        name: &str,
    ) -> Result<Option<LocatorResult>, TreeSitterError> {
        let unit = self.parse_file(path)?;
        Ok(LocatorResult::from_unit(&unit, name))
    }

    /// Check whether a source declares anything named `name`.
    pub fn declares(&mut self, source: &str, name: &str) -> Result<bool, TreeSitterError> {
        let unit = self.parse_source(source)?;
        Ok(unit.contains(unqualified(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_class() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let source = r#"
package com.example;

import java.util.List;

public class Repository {
    private final List<String> items;

    public Repository(List<String> items) {
        this.items = items;
    }

    public int size() {
        return items.size();
    }
}
"#;

        let result = locator.locate(source, "Repository").unwrap().unwrap();
        assert_eq!(result.kind, DeclarationKind::Type);
        assert!(result.text.starts_with("public class Repository {"));
        assert!(result.text.contains("return items.size();"));
        assert!(result.text.ends_with('}'));
        assert_eq!(result.line, 6);
    }

    #[test]
    fn locate_method() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let source = "class Util {\n    static int twice(int x) {\n        return x * 2;\n    }\n}\n";

        let result = locator.locate(source, "twice").unwrap().unwrap();
        assert_eq!(result.kind, DeclarationKind::Method);
        assert_eq!(
            result.text,
            "static int twice(int x) {\n        return x * 2;\n    }"
        );
    }

    #[test]
    fn constructors_are_not_methods() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let source = "class Outer { static class Box { Box() {} } }";

        let result = locator.locate(source, "Box").unwrap().unwrap();
        assert!(result.text.starts_with("static class Box"));

        let source = "interface Shape { double area(); }";
        assert!(locator.locate(source, "Shape").unwrap().is_some());
        assert!(locator.locate(source, "Circle").unwrap().is_none());
    }

    #[test]
    fn byte_span_accuracy() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let source = "class A {}\nclass B {}";

        let result = locator.locate(source, "B").unwrap().unwrap();

        let extracted = &source[result.byte_start..result.byte_end];
        assert_eq!(extracted, "class B {}");
        assert_eq!(extracted, result.text);
    }

    #[test]
    fn syntax_errors_are_reported() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let result = locator.locate("public class Broken { void run( }", "Broken");
        assert!(result.is_err());
    }

    #[test]
    fn qualified_names_match_last_segment() {
        assert_eq!(unqualified("middleware.StaticContentsMiddleware"), "StaticContentsMiddleware");
        assert_eq!(unqualified("Plain"), "Plain");
        assert_eq!(unqualified(""), "");

        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        assert!(locator.declares("class Widget {}", "com.example.Widget").unwrap());
        assert!(!locator.declares("class Widget {}", "com.example.Gadget").unwrap());
    }

    #[test]
    fn extracted_class_reparses_to_same_name() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let source = "/** A point. */\nfinal class Point {\n    int x, y;\n}\n";

        let first = locator.locate(source, "Point").unwrap().unwrap();
        let second = locator.locate(&first.text, "Point").unwrap().unwrap();
        assert_eq!(second.text, first.text);
        assert_eq!(second.kind, DeclarationKind::Type);
    }

    #[test]
    fn locate_in_missing_file_is_io_error() {
        let mut locator = DeclarationLocator::new(Language::Java).unwrap();
        let err = locator
            .locate_in_file(Path::new("/nonexistent/Nope.java"), "Nope")
            .unwrap_err();
        assert!(matches!(err, TreeSitterError::Io { .. }));
    }
}
