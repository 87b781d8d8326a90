//! Event-based parser producing both syntax tree backends from one grammar.

use louhi_inputs::File;
use louhi_syntax::{GreenBuilder, NodeOrToken, RedNode, SyntaxTree, TreeBuilder};
use text_size::TextRange;

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// Parses `text` into the flat tree backend.
pub fn parse(text: &str) -> (SyntaxTree, Vec<ParseError>) {
    let (events, errors) = parse_events(text);
    let mut builder = TreeBuilder::new(text);
    parser::apply(events, &mut builder);
    (builder.finish(), errors)
}

/// Parses a file into the red tree backend, accumulating parse errors as
/// diagnostics.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file: File) -> RedNode<'_> {
    use salsa::Accumulator as _;

    let text = file.text(db);
    let (events, errors) = parse_events(text);
    for error in errors {
        louhi_errors::Diagnostic::error(error.message, error.range).accumulate(db);
    }

    let mut builder = GreenBuilder::new(db, text);
    parser::apply(events, &mut builder);
    RedNode::new_root(db, builder.finish())
}

fn parse_events(text: &str) -> (Vec<parser::Event>, Vec<ParseError>) {
    let mut parser = parser::Parser::new(text);
    grammar::items::module(&mut parser);
    parser.finish()
}

/// Renders the tree as an indented kind dump, for tests.
pub fn debug_dump(tree: &SyntaxTree) -> String {
    use std::fmt::Write as _;

    fn go(element: louhi_syntax::SyntaxElement<'_>, depth: usize, out: &mut String) {
        let indent = depth * 2;
        match element {
            NodeOrToken::Node(node) => {
                let _ = writeln!(out, "{:indent$}{:?}", "", node.kind());
                for child in node.children_with_tokens() {
                    go(child, depth + 1, out);
                }
            }
            NodeOrToken::Token(token) => {
                let _ = writeln!(out, "{:indent$}{:?} {:?}", "", token.kind(), token.text());
            }
        }
    }

    let mut out = String::new();
    go(NodeOrToken::Node(tree.root()), 0, &mut out);
    out
}
