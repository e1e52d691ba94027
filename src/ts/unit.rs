//! Declaration lists built from tree-sitter trees.
//!
//! A [`ParsedUnit`] is the structural view of one source file: the file text
//! plus every type-like and method-like declaration in depth-first,
//! declaration order. The syntax tree is dropped once the list is built.

use crate::lang::Language;
use crate::ts::errors::TreeSitterError;
use crate::ts::parser::{ParsedSource, SourceParser};
use std::ops::Range;
use tree_sitter::Node;

/// Category of a declaration, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Class or interface (Go: named type).
    Type,
    /// Method (Go: function or method).
    Method,
}

/// A named declaration and the span of its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Grammar node kind, e.g. `interface_declaration`.
    pub node_kind: &'static str,
    /// Bytes of the declaration, including its leading comment block when
    /// comments were requested.
    pub span: Range<usize>,
    /// 1-based line of the declaration keyword or first modifier.
    pub line: usize,
}

/// Options controlling how declaration spans are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// Extend spans backwards over an attached comment block.
    pub leading_comments: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            leading_comments: true,
        }
    }
}

/// The structural view of one source file.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    source: String,
    declarations: Vec<Declaration>,
}

impl ParsedUnit {
    /// Parse `source` and collect its declarations.
    ///
    /// The unit takes ownership of the text; the syntax tree is dropped
    /// before returning.
    pub fn parse(
        source: String,
        parser: &mut SourceParser,
        options: CollectOptions,
    ) -> Result<Self, TreeSitterError> {
        let language = parser.language();
        let parsed = parser.parse_strict(&source)?;
        let declarations = collect(&parsed, language, options);
        drop(parsed);

        Ok(Self {
            source,
            declarations,
        })
    }

    /// All declarations in depth-first, declaration order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// The full text of the file this unit was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Find the declaration named `name`.
    ///
    /// Type declarations are searched first; methods are only considered when
    /// no type carries the name. Within each stage the first declaration in
    /// tree order wins.
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.first_of(DeclarationKind::Type, name)
            .or_else(|| self.first_of(DeclarationKind::Method, name))
    }

    /// Whether any declaration is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Source text of a declaration from this unit.
    pub fn text(&self, declaration: &Declaration) -> &str {
        &self.source[declaration.span.clone()]
    }

    fn first_of(&self, kind: DeclarationKind, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| d.kind == kind && d.name == name)
    }
}

fn collect(parsed: &ParsedSource<'_>, language: Language, options: CollectOptions) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    collect_declarations(
        parsed.root_node(),
        parsed.source,
        language,
        options,
        &mut declarations,
    );
    declarations
}

fn collect_declarations(
    node: Node<'_>,
    source: &str,
    language: Language,
    options: CollectOptions,
    out: &mut Vec<Declaration>,
) {
    if let Some(declaration) = declaration_at(node, source, language, options) {
        out.push(declaration);
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_declarations(child, source, language, options, out);
    }
}

fn declaration_at(
    node: Node<'_>,
    source: &str,
    language: Language,
    options: CollectOptions,
) -> Option<Declaration> {
    let (kind, node_kind) = classify(node.kind(), language)?;
    let name = node.child_by_field_name("name")?;

    let outer = match (kind, language.type_container_kind()) {
        (DeclarationKind::Type, Some(container)) => node
            .parent()
            .filter(|parent| parent.kind() == container)
            .unwrap_or(node),
        _ => node,
    };

    let start = if options.leading_comments {
        leading_comment_start(outer)
    } else {
        outer.start_byte()
    };

    Some(Declaration {
        kind,
        name: source[name.byte_range()].to_string(),
        node_kind,
        span: start..outer.end_byte(),
        line: outer.start_position().row + 1,
    })
}

fn classify(kind: &str, language: Language) -> Option<(DeclarationKind, &'static str)> {
    if let Some(k) = language.type_kinds().iter().find(|k| **k == kind) {
        return Some((DeclarationKind::Type, *k));
    }
    language
        .method_kinds()
        .iter()
        .find(|k| **k == kind)
        .map(|k| (DeclarationKind::Method, *k))
}

fn is_comment(node: Node<'_>) -> bool {
    node.kind().ends_with("comment")
}

/// Last row holding text of `node`. Tokens that end with a newline (Go
/// statement terminators, some line comments) end at column 0 of the next row.
fn last_row(node: Node<'_>) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row - 1
    } else {
        end.row
    }
}

/// Start byte of the comment block attached to `node`, or the node's own
/// start when nothing is attached.
///
/// A comment is attached when it sits directly above the declaration (no
/// blank line in between) and does not trail code on its own line.
fn leading_comment_start(node: Node<'_>) -> usize {
    let mut start = node.start_byte();
    let mut top_row = node.start_position().row;
    let mut previous = node.prev_sibling();

    while let Some(comment) = previous.filter(|n| is_comment(*n)) {
        if last_row(comment) + 1 < top_row {
            break;
        }

        let before = comment.prev_sibling();
        let trails_code =
            before.is_some_and(|b| !is_comment(b) && last_row(b) == comment.start_position().row);
        if trails_code {
            break;
        }

        start = comment.start_byte();
        top_row = comment.start_position().row;
        previous = before;
    }

    start
}
