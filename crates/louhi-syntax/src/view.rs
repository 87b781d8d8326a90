//! The node-navigation contract shared by both tree backends.
//!
//! Positioning strategies are written once against [`NodeView`]; the flat
//! tree and the red tree each provide an adapter. Both adapters must report
//! identical kinds and trimmed ranges for the same source text.

use salsa::Database;
use text_size::TextRange;

use crate::{NodeOrToken, Red, SyntaxElement, SyntaxKind};

/// Read-only view of a node or token inside a syntax tree.
///
/// `children` yields nodes and tokens uniformly, in source order, with
/// trivia already filtered out. `range` is the trivia-trimmed range. All
/// methods are total: absence is `None` or an empty iterator, never a panic.
pub trait NodeView: Copy {
    fn kind(self) -> SyntaxKind;

    fn range(self) -> TextRange;

    fn parent(self) -> Option<Self>;

    fn children(self) -> impl Iterator<Item = Self>;

    /// Returns `true` when this element has no children (tokens, and nodes
    /// produced by error recovery with nothing inside).
    fn is_leaf(self) -> bool {
        self.children().next().is_none()
    }

    /// Backend-neutral identity of this element.
    fn ptr(self) -> SyntaxNodePtr {
        SyntaxNodePtr { kind: self.kind(), range: self.range() }
    }
}

/// Stable identifier for an element by kind and trimmed text range.
///
/// Two backends parsing the same text produce equal pointers for the same
/// element, which is what lets payload-carrying diagnostics reference nodes
/// without pinning a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNodePtr {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl SyntaxNodePtr {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self { kind, range }
    }
}

impl<'a> NodeView for SyntaxElement<'a> {
    fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    fn range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_trimmed_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    fn parent(self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.parent().map(NodeOrToken::Node),
            NodeOrToken::Token(token) => Some(NodeOrToken::Node(token.parent())),
        }
    }

    fn children(self) -> impl Iterator<Item = Self> {
        self.into_node().map(|node| node.children_with_tokens()).into_iter().flatten()
    }
}

/// Red-tree element paired with the database it lives in.
#[derive(Clone, Copy)]
pub struct RedRef<'db> {
    pub db: &'db dyn Database,
    pub element: Red<'db>,
}

impl<'db> RedRef<'db> {
    pub fn new(db: &'db dyn Database, element: Red<'db>) -> Self {
        Self { db, element }
    }
}

impl<'db> NodeView for RedRef<'db> {
    fn kind(self) -> SyntaxKind {
        self.element.kind(self.db)
    }

    fn range(self) -> TextRange {
        self.element.text_trimmed_range(self.db)
    }

    fn parent(self) -> Option<Self> {
        let db = self.db;
        self.element.parent(db).map(|parent| Self { db, element: NodeOrToken::Node(parent) })
    }

    fn children(self) -> impl Iterator<Item = Self> {
        let db = self.db;
        self.element
            .into_node()
            .map(|node| node.children(db))
            .into_iter()
            .flatten()
            .map(move |child| Self { db, element: child })
    }
}
