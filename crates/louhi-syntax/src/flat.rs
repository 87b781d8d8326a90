//! Flat syntax tree used for bulk analysis.
//!
//! The whole tree lives in three arenas (tokens, nodes, child slices) that
//! are filled once by the builder and never mutated. Handles are plain
//! `(tree, index)` pairs, so navigation allocates nothing.

use text_size::{TextRange, TextSize};

use crate::{NodeOrToken, SyntaxKind};

pub(crate) const NO_PARENT: u32 = u32::MAX;

/// Owned syntax tree for a single source text.
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    /// Always starts with a zero-length sentinel so that every real token can
    /// derive its start offset from its predecessor's end.
    pub(crate) tokens: Vec<TokenData>,
    /// The root is always index 0.
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) children: Vec<ChildRef>,
}

#[derive(Clone, Copy)]
pub(crate) struct TokenData {
    pub(crate) kind: SyntaxKind,
    pub(crate) end: TextSize,
    pub(crate) parent: u32,
}

pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) parent: u32,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    pub(crate) first_token: u32,
    pub(crate) last_token: u32,
}

/// Child entry pointing into either the node or the token arena.
///
/// Trivia tokens are stored in the token arena for offset bookkeeping but are
/// never referenced from here, so traversal only ever sees meaningful
/// children.
#[derive(Clone, Copy)]
pub(crate) enum ChildRef {
    Node(u32),
    Token(u32),
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.text.len()).finish_non_exhaustive()
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    pub(crate) tree: &'a SyntaxTree,
    pub(crate) index: u32,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn data(self) -> TokenData {
        self.tree.tokens[self.index as usize]
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns `true` if this token is trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// Returns the token range. Trivia around the token belongs to separate
    /// trivia tokens, so this is already the trimmed range.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let start = self.tree.tokens[self.index as usize - 1].end;
        TextRange::new(start, self.data().end)
    }

    /// Returns the token text.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.data().parent }
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxToken<'_> {}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    pub(crate) tree: &'a SyntaxTree,
    pub(crate) index: u32,
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    fn data(self) -> &'a NodeData {
        &self.tree.nodes[self.index as usize]
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the text range covered by this node, attached trivia included.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let data = self.data();
        if data.last_token == 0 {
            // Only the sentinel: the node spans no tokens at all.
            return TextRange::empty(TextSize::new(0));
        }
        let start = self.tree.tokens[data.first_token as usize - 1].end;
        let end = self.tree.tokens[data.last_token as usize].end;
        TextRange::new(start, end)
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    pub fn text_trimmed_range(self) -> TextRange {
        let data = self.data();
        if data.last_token == 0 {
            return TextRange::empty(TextSize::new(0));
        }
        let tokens = &self.tree.tokens;

        let mut first = data.first_token as usize;
        let mut last = data.last_token as usize;
        while first <= last && tokens[first].kind.is_trivia() {
            first += 1;
        }
        while last > first && tokens[last].kind.is_trivia() {
            last -= 1;
        }
        if first > last || tokens[first].kind.is_trivia() {
            return TextRange::empty(self.text_range().start());
        }

        TextRange::new(tokens[first - 1].end, tokens[last].end)
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the text slice excluding leading/trailing trivia.
    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.text_trimmed_range()]
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        let parent = self.data().parent;
        (parent != NO_PARENT).then(|| Self { tree: self.tree, index: parent })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// Iterates children including tokens, in source order.
    #[inline]
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        let data = self.data();
        let start = data.children_start as usize;
        let end = start + data.children_len as usize;
        ChildrenWithTokens { tree: self.tree, children: self.tree.children[start..end].iter() }
    }

    /// Iterates child nodes, skipping tokens.
    #[inline]
    pub fn children(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_trimmed_range())
    }
}

impl std::fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    /// Returns this element's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    /// Returns the trivia-trimmed range of this element.
    #[inline]
    pub fn text_trimmed_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_trimmed_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }
}

/// Iterator over children including tokens.
#[derive(Clone)]
pub struct ChildrenWithTokens<'a> {
    tree: &'a SyntaxTree,
    children: std::slice::Iter<'a, ChildRef>,
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.children.next().map(|child| match *child {
            ChildRef::Node(index) => NodeOrToken::Node(SyntaxNode { tree, index }),
            ChildRef::Token(index) => NodeOrToken::Token(SyntaxToken { tree, index }),
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl<'a> DoubleEndedIterator for ChildrenWithTokens<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.children.next_back().map(|child| match *child {
            ChildRef::Node(index) => NodeOrToken::Node(SyntaxNode { tree, index }),
            ChildRef::Token(index) => NodeOrToken::Token(SyntaxToken { tree, index }),
        })
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.children.len()
    }
}
