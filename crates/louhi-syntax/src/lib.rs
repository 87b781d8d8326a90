//! Lossless, immutable syntax trees for the Louhi frontend.
//!
//! Two backends share one grammar and one navigation contract: a flat arena
//! tree built once per parse for bulk analysis, and a green/red tree whose
//! handles are materialized lazily inside tracked queries for incremental
//! use. Strategies and other consumers navigate both through [`NodeView`].

mod builder;
mod flat;
mod green;
mod red;
mod syntax_kind;
mod syntax_set;
mod trivia;
mod view;

/// Builders feeding parser events into either backend.
pub use builder::{GreenBuilder, TreeBuilder, TreeSink};
/// Flat-tree API types.
pub use flat::{ChildrenWithTokens, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};
/// Green-tree layer shared by red handles.
pub use green::{Green, GreenNode, GreenToken, GreenTrivia};
/// Red-tree handles.
pub use red::{Red, RedNode, RedToken};
/// Token and node kinds used throughout the trees.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{TriviaPiece, TriviaPieceKind};
/// The backend-independent navigation contract.
pub use view::{NodeView, RedRef, SyntaxNodePtr};

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}
