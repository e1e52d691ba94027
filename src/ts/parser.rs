use crate::lang::Language;
use crate::ts::errors::TreeSitterError;
use tree_sitter::{Parser, Tree};

/// Tree-sitter parser wrapper bound to one source language.
pub struct SourceParser {
    parser: Parser,
    language: Language,
}

impl SourceParser {
    /// Create a parser for the given language.
    pub fn new(language: Language) -> Result<Self, TreeSitterError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|_| TreeSitterError::LanguageSet {
                language: language.display_name(),
            })?;

        Ok(Self { parser, language })
    }

    /// Get the configured language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse source code into a tree-sitter Tree.
    pub fn parse(&mut self, source: &str) -> Result<Tree, TreeSitterError> {
        self.parser
            .parse(source, None)
            .ok_or(TreeSitterError::ParseFailed)
    }

    /// Parse source code and return the tree along with the source.
    pub fn parse_with_source<'a>(
        &mut self,
        source: &'a str,
    ) -> Result<ParsedSource<'a>, TreeSitterError> {
        let tree = self.parse(source)?;
        Ok(ParsedSource { source, tree })
    }

    /// Parse source code, rejecting trees that contain syntax errors.
    pub fn parse_strict<'a>(&mut self, source: &'a str) -> Result<ParsedSource<'a>, TreeSitterError> {
        let parsed = self.parse_with_source(source)?;
        if !parsed.has_errors() {
            return Ok(parsed);
        }

        let errors = parsed.error_nodes();
        match errors.len() {
            0 => Ok(parsed),
            1 => Err(TreeSitterError::SyntaxError {
                byte_start: errors[0].byte_start,
                byte_end: errors[0].byte_end,
                line: errors[0].start_point.row + 1,
            }),
            n => Err(TreeSitterError::MultipleSyntaxErrors { count: n }),
        }
    }
}

/// A parsed source file with its tree-sitter tree.
pub struct ParsedSource<'a> {
    pub source: &'a str,
    pub tree: Tree,
}

impl<'a> ParsedSource<'a> {
    /// Get the root node of the tree.
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Check if the tree contains any ERROR or MISSING nodes.
    pub fn has_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Get all ERROR and MISSING nodes in the tree.
    pub fn error_nodes(&self) -> Vec<ErrorNode> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &mut errors);
        errors
    }
}

/// Information about an ERROR node in the parse tree.
#[derive(Debug, Clone)]
pub struct ErrorNode {
    pub byte_start: usize,
    pub byte_end: usize,
    pub start_point: tree_sitter::Point,
}

fn has_error_nodes(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }

    // Subtrees without errors can be skipped entirely.
    if !node.has_error() {
        return false;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if has_error_nodes(child) {
            return true;
        }
    }

    false
}

fn collect_error_nodes(node: tree_sitter::Node<'_>, errors: &mut Vec<ErrorNode>) {
    if node.is_error() || node.is_missing() {
        errors.push(ErrorNode {
            byte_start: node.start_byte(),
            byte_end: node.end_byte(),
            start_point: node.start_position(),
        });
    }

    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}
