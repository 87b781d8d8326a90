//! Offset-carrying handles over the green tree, created lazily during
//! traversal inside tracked queries.

use salsa::Database;
use text_size::{TextRange, TextSize};

use crate::{Green, GreenNode, GreenToken, NodeOrToken, SyntaxKind};

pub type Red<'db> = NodeOrToken<RedNode<'db>, RedToken<'db>>;

impl<'db> Red<'db> {
    pub fn kind(self, db: &'db dyn Database) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(db),
            NodeOrToken::Token(token) => token.kind(db),
        }
    }

    pub fn parent(self, db: &'db dyn Database) -> Option<RedNode<'db>> {
        match self {
            NodeOrToken::Node(node) => node.parent(db),
            NodeOrToken::Token(token) => token.parent(db),
        }
    }

    pub fn text_trimmed_range(self, db: &'db dyn Database) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_trimmed_range(db),
            NodeOrToken::Token(token) => token.text_trimmed_range(db),
        }
    }
}

#[salsa::tracked]
pub struct RedNode<'db> {
    pub parent: Option<RedNode<'db>>,
    pub text_offset: TextSize,
    pub green: GreenNode<'db>,
}

impl<'db> RedNode<'db> {
    pub fn new_root(db: &'db dyn Database, root: GreenNode<'db>) -> Self {
        Self::new(db, None, TextSize::new(0), root)
    }

    pub fn kind(self, db: &'db dyn Database) -> SyntaxKind {
        self.green(db).kind(db)
    }

    pub fn children(self, db: &'db dyn Database) -> impl Iterator<Item = Red<'db>> + 'db {
        let mut offset_in_parent = TextSize::new(0);

        self.green(db).children(db).iter().map(move |&green_child| {
            let text_offset = self.text_offset(db) + offset_in_parent;
            offset_in_parent += green_child.text_len(db);

            match green_child {
                NodeOrToken::Node(node) => {
                    Red::Node(RedNode::new(db, self.into(), text_offset, node))
                }
                NodeOrToken::Token(token) => {
                    Red::Token(RedToken::new(db, self.into(), text_offset, token))
                }
            }
        })
    }

    pub fn text_range(self, db: &'db dyn Database) -> TextRange {
        TextRange::at(self.text_offset(db), self.green(db).text_len(db))
    }

    /// Range with leading/trailing trivia trimmed away.
    pub fn text_trimmed_range(self, db: &'db dyn Database) -> TextRange {
        let range = self.text_range(db);
        let green = self.green(db);

        match (first_token(db, green), last_token(db, green)) {
            (Some(first), Some(last)) => TextRange::new(
                range.start() + first.leading(db).len(),
                range.end() - last.trailing(db).len(),
            ),
            _ => TextRange::empty(range.start()),
        }
    }
}

#[salsa::tracked]
pub struct RedToken<'db> {
    pub parent: Option<RedNode<'db>>,
    pub text_offset: TextSize,
    pub green: GreenToken<'db>,
}

impl<'db> RedToken<'db> {
    pub fn kind(self, db: &'db dyn Database) -> SyntaxKind {
        self.green(db).kind(db)
    }

    fn text_range(self, db: &'db dyn Database) -> TextRange {
        let offset = self.text_offset(db);
        let len = TextSize::new(self.green(db).text(db).len() as u32);
        TextRange::at(offset, len)
    }

    pub fn text_trimmed_range(self, db: &'db dyn Database) -> TextRange {
        let green_token = self.green(db);
        let leading_len = green_token.leading(db).len();
        let trailing_len = green_token.trailing(db).len();

        let range = self.text_range(db);
        TextRange::new(range.start() + leading_len, range.end() - trailing_len)
    }
}

fn first_token<'db>(db: &'db dyn Database, node: GreenNode<'db>) -> Option<GreenToken<'db>> {
    node.children(db).iter().find_map(|child| match child {
        Green::Token(token) => Some(*token),
        Green::Node(node) => first_token(db, *node),
    })
}

fn last_token<'db>(db: &'db dyn Database, node: GreenNode<'db>) -> Option<GreenToken<'db>> {
    node.children(db).iter().rev().find_map(|child| match child {
        Green::Token(token) => Some(*token),
        Green::Node(node) => last_token(db, *node),
    })
}
