use drop_bomb::DropBomb;
use louhi_syntax::{SyntaxKind, SyntaxSet, TreeSink};
use louhi_tokenizer::{Token, Tokenizer};
use text_size::TextRange;

use crate::ParseError;

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    errors: Vec<ParseError>,
    /// Cleared where a `{` must belong to the enclosing construct rather
    /// than a trailing lambda (supertype delegation).
    trailing_lambda_allowed: bool,
}

impl Parser {
    pub(crate) fn new(text: &str) -> Self {
        let mut tokenizer = Tokenizer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            let at_eof = token.kind == SyntaxKind::EOF;
            tokens.push(token);
            if at_eof {
                break;
            }
        }

        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
            trailing_lambda_allowed: true,
        }
    }

    pub(crate) fn trailing_lambda_allowed(&self) -> bool {
        self.trailing_lambda_allowed
    }

    /// Sets whether a `{` after an expression starts a trailing lambda and
    /// returns the previous setting.
    pub(crate) fn set_trailing_lambda_allowed(&mut self, allowed: bool) -> bool {
        std::mem::replace(&mut self.trailing_lambda_allowed, allowed)
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokens[self.pos].kind
    }

    /// Kind of the token `n` positions ahead; EOF past the end.
    pub(crate) fn nth_kind(&self, n: usize) -> SyntaxKind {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn advance(&mut self) {
        if self.peek_kind() == SyntaxKind::EOF {
            return;
        }

        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        self.events.push(Event::Token(token));
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) {
        if !self.eat(kind) {
            self.error(format!("expected {kind:?}"));
        }
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(ParseError { message: message.into(), range });
    }

    pub(crate) fn error_and_bump(&mut self, message: &str) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    pub(crate) fn error_recover(&mut self, message: &str, recovery: &SyntaxSet) {
        if self.at_set(recovery) || self.at(SyntaxKind::EOF) {
            self.error(message);
        } else {
            self.error_and_bump(message);
        }
    }

    fn current_range(&self) -> TextRange {
        self.tokens[self.pos].kind_range
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn finish(self) -> (Vec<Event>, Vec<ParseError>) {
        (self.events, self.errors)
    }
}

/// Replays parser events into a tree sink, resolving forward parents the way
/// the event model requires.
pub(crate) fn apply(mut events: Vec<Event>, sink: &mut impl TreeSink) {
    let mut forward_parents = Vec::new();

    for i in 0..events.len() {
        match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
            Event::Start { kind, forward_parent } => {
                if kind == SyntaxKind::TOMBSTONE {
                    continue;
                }

                forward_parents.push(kind);
                let mut idx = i;
                let mut fp = forward_parent;
                while let Some(fwd) = fp {
                    idx += fwd as usize;

                    fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                        Event::Start { kind, forward_parent } => {
                            if kind != SyntaxKind::TOMBSTONE {
                                forward_parents.push(kind);
                            }
                            forward_parent
                        }
                        _ => unreachable!(),
                    };
                }

                for kind in forward_parents.drain(..).rev() {
                    sink.start_node(kind);
                }
            }
            Event::Finish => {
                sink.finish_node();
            }
            Event::Token(token) => {
                sink.token(
                    token.leading.pieces(),
                    token.kind,
                    token.kind_range.len(),
                    token.trailing.pieces(),
                );
            }
        }
    }
}

pub(crate) enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
