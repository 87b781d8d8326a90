//! Builders that materialize parser output into the two tree backends.
//!
//! The parser emits one event stream; a [`TreeSink`] consumes it. Feeding the
//! same stream to both sinks yields trees that agree on every kind and
//! offset, which the positioning engine relies on.

use salsa::Database;
use text_size::TextSize;

use crate::flat::{ChildRef, NO_PARENT, NodeData, SyntaxTree, TokenData};
use crate::{Green, GreenNode, GreenToken, GreenTrivia, SyntaxKind, TriviaPiece};

/// Consumer of parser events.
pub trait TreeSink {
    fn start_node(&mut self, kind: SyntaxKind);

    /// Adds a token with its leading and trailing trivia. `len` is the length
    /// of the token itself, excluding trivia.
    fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        len: TextSize,
        trailing: &[TriviaPiece],
    );

    fn finish_node(&mut self);
}

/// Builds the flat [`SyntaxTree`].
pub struct TreeBuilder {
    text: Box<str>,
    tokens: Vec<TokenData>,
    nodes: Vec<NodeData>,
    children: Vec<ChildRef>,
    /// Stack of open nodes with their collected children.
    opened: Vec<(u32, Vec<ChildRef>)>,
    text_len: TextSize,
    last_token_index: u32,
}

impl TreeBuilder {
    /// Creates a new builder for `text`.
    ///
    /// The token buffer is seeded with a zero-length sentinel at index 0 to
    /// make token start offsets uniform.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            tokens: vec![TokenData {
                kind: SyntaxKind::TOMBSTONE,
                end: TextSize::new(0),
                parent: 0,
            }],
            nodes: Vec::new(),
            children: Vec::new(),
            opened: Vec::new(),
            text_len: TextSize::new(0),
            last_token_index: 0,
        }
    }

    fn push_text_len(&mut self, len: TextSize) -> TextSize {
        self.text_len += len;
        assert!(self.text.is_char_boundary(usize::from(self.text_len)));
        self.text_len
    }

    /// Updates token spans for all open ancestor nodes.
    fn update_first_last_tokens(&mut self, first_token: u32, last_token: u32) {
        for &(node, _) in &self.opened {
            let node = &mut self.nodes[node as usize];
            if node.first_token == 0 {
                node.first_token = first_token;
            }
            node.last_token = last_token;
        }
    }

    /// Finishes building and returns the immutable tree.
    pub fn finish(self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "you should call `TreeBuilder::finish_node()`");
        assert!(!self.nodes.is_empty());
        SyntaxTree {
            text: self.text,
            tokens: self.tokens,
            nodes: self.nodes,
            children: self.children,
        }
    }
}

impl TreeSink for TreeBuilder {
    fn start_node(&mut self, kind: SyntaxKind) {
        let index = self.nodes.len() as u32;
        let parent = self.opened.last().map_or(NO_PARENT, |&(parent, _)| parent);
        self.nodes.push(NodeData {
            kind,
            parent,
            children_start: 0,
            children_len: 0,
            first_token: 0,
            last_token: 0,
        });
        if let Some((_, children)) = self.opened.last_mut() {
            children.push(ChildRef::Node(index));
        }
        self.opened.push((index, Vec::new()));
    }

    fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        len: TextSize,
        trailing: &[TriviaPiece],
    ) {
        let parent = self.opened.last().expect("token outside of a node").0;

        let first_token = self.tokens.len() as u32;
        for piece in leading {
            let end = self.push_text_len(piece.len);
            self.tokens.push(TokenData { kind: trivia_piece_kind(piece.kind), end, parent });
        }

        let token = self.tokens.len() as u32;
        let end = self.push_text_len(len);
        self.tokens.push(TokenData { kind, end, parent });

        for piece in trailing {
            let end = self.push_text_len(piece.len);
            self.tokens.push(TokenData { kind: trivia_piece_kind(piece.kind), end, parent });
        }
        let last_token = self.tokens.len() as u32 - 1;

        if let Some((_, children)) = self.opened.last_mut() {
            children.push(ChildRef::Token(token));
        }

        self.update_first_last_tokens(first_token, last_token);
        self.last_token_index = last_token;
    }

    fn finish_node(&mut self) {
        let (index, children) = self.opened.pop().expect("no opened nodes?");
        let node = &mut self.nodes[index as usize];
        if node.last_token == 0 {
            node.first_token = self.last_token_index;
            node.last_token = self.last_token_index;
        }
        node.children_start = self.children.len() as u32;
        node.children_len = children.len() as u32;
        self.children.extend(children);
    }
}

/// Builds the green tree for the incremental backend.
pub struct GreenBuilder<'db, 't> {
    db: &'db dyn Database,
    text: &'t str,
    /// Stack of open nodes with their collected children.
    opened: Vec<(SyntaxKind, Vec<Green<'db>>)>,
    offset: TextSize,
    root: Option<GreenNode<'db>>,
}

impl<'db, 't> GreenBuilder<'db, 't> {
    pub fn new(db: &'db dyn Database, text: &'t str) -> Self {
        Self { db, text, opened: Vec::new(), offset: TextSize::new(0), root: None }
    }

    /// Finishes building and returns the green root.
    pub fn finish(self) -> GreenNode<'db> {
        assert!(self.opened.is_empty(), "you should call `GreenBuilder::finish_node()`");
        self.root.expect("no root node?")
    }
}

impl TreeSink for GreenBuilder<'_, '_> {
    fn start_node(&mut self, kind: SyntaxKind) {
        self.opened.push((kind, Vec::new()));
    }

    fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        len: TextSize,
        trailing: &[TriviaPiece],
    ) {
        let leading_len = leading.iter().map(|piece| piece.len).sum::<TextSize>();
        let trailing_len = trailing.iter().map(|piece| piece.len).sum::<TextSize>();
        let total = leading_len + len + trailing_len;

        let start = usize::from(self.offset);
        let end = usize::from(self.offset + total);
        let token = GreenToken::new(
            self.db,
            GreenTrivia::new(leading),
            kind,
            Box::<str>::from(&self.text[start..end]),
            GreenTrivia::new(trailing),
        );

        self.opened.last_mut().expect("token outside of a node").1.push(Green::Token(token));
        self.offset += total;
    }

    fn finish_node(&mut self) {
        let (kind, children) = self.opened.pop().expect("no opened nodes?");
        let node = GreenNode::new(self.db, kind, children);
        match self.opened.last_mut() {
            Some((_, siblings)) => siblings.push(Green::Node(node)),
            None => {
                assert!(self.root.is_none(), "more than one root node");
                self.root = Some(node);
            }
        }
    }
}

/// Maps trivia piece kinds to syntax kinds.
#[inline]
fn trivia_piece_kind(kind: crate::TriviaPieceKind) -> SyntaxKind {
    match kind {
        crate::TriviaPieceKind::Whitespace => SyntaxKind::WHITESPACE,
        crate::TriviaPieceKind::Newline => SyntaxKind::NEWLINE,
        crate::TriviaPieceKind::SingleLineComment => SyntaxKind::LINE_COMMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriviaPieceKind;

    fn ws(len: u32) -> TriviaPiece {
        TriviaPiece::new(TriviaPieceKind::Whitespace, len.into())
    }

    /// `val x` with a trailing space after `val`.
    fn build_small_tree() -> SyntaxTree {
        let mut builder = TreeBuilder::new("val x");
        builder.start_node(SyntaxKind::MODULE);
        builder.start_node(SyntaxKind::PROPERTY);
        builder.token(&[], SyntaxKind::VAL_KW, 3.into(), &[ws(1)]);
        builder.token(&[], SyntaxKind::NAME, 1.into(), &[]);
        builder.finish_node();
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn ranges_and_navigation() {
        let tree = build_small_tree();
        let root = tree.root();

        assert_eq!(root.kind(), SyntaxKind::MODULE);
        assert_eq!(root.text(), "val x");
        assert_eq!(root.text_trimmed(), "val x");

        let property = root.children().next().unwrap();
        assert_eq!(property.kind(), SyntaxKind::PROPERTY);
        assert_eq!(property.parent(), Some(root));

        let tokens: Vec<_> = property
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), SyntaxKind::VAL_KW);
        assert_eq!(tokens[0].text(), "val");
        assert_eq!(tokens[1].kind(), SyntaxKind::NAME);
        assert_eq!(tokens[1].text(), "x");
        assert_eq!(tokens[1].parent(), property);
    }

    #[test]
    fn trivia_is_kept_out_of_trimmed_ranges() {
        let mut builder = TreeBuilder::new("  val x ");
        builder.start_node(SyntaxKind::MODULE);
        builder.start_node(SyntaxKind::PROPERTY);
        builder.token(&[ws(2)], SyntaxKind::VAL_KW, 3.into(), &[ws(1)]);
        builder.token(&[], SyntaxKind::NAME, 1.into(), &[ws(1)]);
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        let property = tree.root().children().next().unwrap();
        assert_eq!(property.text(), "  val x ");
        assert_eq!(property.text_trimmed(), "val x");
        assert_eq!(property.text_trimmed_range(), text_size::TextRange::new(2.into(), 7.into()));
    }

    #[test]
    fn green_and_flat_builders_agree_on_text_len() {
        let db = salsa::DatabaseImpl::new();
        let text = "  val x ";

        let mut green = GreenBuilder::new(&db, text);
        green.start_node(SyntaxKind::MODULE);
        green.token(&[ws(2)], SyntaxKind::VAL_KW, 3.into(), &[ws(1)]);
        green.token(&[], SyntaxKind::NAME, 1.into(), &[ws(1)]);
        green.finish_node();
        let root = green.finish();

        assert_eq!(root.text_len(&db), TextSize::new(8));
        let children = root.children(&db);
        assert_eq!(children.len(), 2);
        match &children[0] {
            Green::Token(token) => assert_eq!(token.text_trimmed(&db), "val"),
            Green::Node(_) => panic!("expected a token"),
        }
    }
}
