//! Tokenizer producing kind/range tokens with attached trivia.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use louhi_syntax::SyntaxKind;
use louhi_syntax::SyntaxKind::*;
use louhi_syntax::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };
}

pub struct Tokenizer<'t> {
    text: &'t str,
    cursor: Cursor<'t>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end: u32 = self.offset().into();
        let len: u32 = self.cursor.pos_within_token().into();

        TextRange::at((end - len).into(), len.into())
    }

    fn text(&self) -> &'t str {
        let range: std::ops::Range<usize> = self.range().into();
        &self.text[range]
    }

    /// Returns the current token and advances past it. At the end of input
    /// this keeps returning EOF tokens.
    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        self.trivia();

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                    TriviaPieceKind::SingleLineComment
                }
                '\n' | '\r' => {
                    self.cursor.advance_while(|c| c == '\n' || c == '\r');
                    TriviaPieceKind::Newline
                }
                first_char => {
                    if first_char.is_whitespace() {
                        self.cursor.advance_while(|c| c.is_whitespace() && c != '\n' && c != '\r');
                        TriviaPieceKind::Whitespace
                    } else {
                        break;
                    }
                }
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        let kind = match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            ';' => SEMICOLON,
            '@' => AT,
            '.' => DOT,
            ':' => {
                if self.cursor.advance_if(':') {
                    COLONCOLON
                } else {
                    COLON
                }
            }
            '?' => match self.cursor.peek() {
                '.' => {
                    self.cursor.advance();
                    SAFE_ACCESS
                }
                ':' => {
                    self.cursor.advance();
                    ELVIS
                }
                _ => QUEST,
            },
            '=' => {
                if self.cursor.advance_if('=') {
                    EQEQ
                } else {
                    EQ
                }
            }
            '!' => {
                if self.cursor.advance_if('=') {
                    NOT_EQ
                } else {
                    EXCL
                }
            }
            '+' => {
                if self.cursor.advance_if('=') {
                    PLUS_EQ
                } else {
                    PLUS
                }
            }
            '-' => match self.cursor.peek() {
                '=' => {
                    self.cursor.advance();
                    MINUS_EQ
                }
                '>' => {
                    self.cursor.advance();
                    ARROW
                }
                _ => MINUS,
            },
            '*' => {
                if self.cursor.advance_if('=') {
                    STAR_EQ
                } else {
                    STAR
                }
            }
            '/' => {
                if self.cursor.advance_if('=') {
                    SLASH_EQ
                } else {
                    SLASH
                }
            }
            '%' => {
                if self.cursor.advance_if('=') {
                    PERCENT_EQ
                } else {
                    PERCENT
                }
            }
            '<' => {
                if self.cursor.advance_if('=') {
                    LT_EQ
                } else {
                    LT
                }
            }
            '>' => {
                if self.cursor.advance_if('=') {
                    GT_EQ
                } else {
                    GT
                }
            }
            '&' => {
                if self.cursor.advance_if('&') {
                    AND_AND
                } else {
                    UNKNOWN
                }
            }
            '|' => {
                if self.cursor.advance_if('|') {
                    OR_OR
                } else {
                    UNKNOWN
                }
            }
            '\'' => self.char_literal(),
            '"' => self.string_literal(),
            c @ '0'..='9' => self.number(c),
            'A'..='Z' | 'a'..='z' | '_' => {
                self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
                keyword_or_name(self.text())
            }
            EOF_CHAR => EOF,
            _ => UNKNOWN,
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn number(&mut self, _first: char) -> SyntaxKind {
        self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
        // Long literals carry an `L` suffix.
        self.cursor.advance_if('L');
        INT_NUMBER
    }

    fn char_literal(&mut self) -> SyntaxKind {
        if self.cursor.matches('\\') {
            self.cursor.advance();
            self.cursor.advance();
        } else if !self.cursor.matches('\'') {
            self.cursor.advance();
        }
        self.cursor.advance_if('\'');
        CHAR_LITERAL
    }

    fn string_literal(&mut self) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '\n' | EOF_CHAR => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
        STRING
    }
}

fn keyword_or_name(text: &str) -> SyntaxKind {
    match text {
        "package" => PACKAGE_KW,
        "import" => IMPORT_KW,
        "class" => CLASS_KW,
        "object" => OBJECT_KW,
        "fun" => FUN_KW,
        "val" => VAL_KW,
        "var" => VAR_KW,
        "constructor" => CONSTRUCTOR_KW,
        "init" => INIT_KW,
        "get" => GET_KW,
        "set" => SET_KW,
        "if" => IF_KW,
        "else" => ELSE_KW,
        "when" => WHEN_KW,
        "return" => RETURN_KW,
        "as" => AS_KW,
        "is" => IS_KW,
        "in" => IN_KW,
        "out" => OUT_KW,
        "by" => BY_KW,
        "this" => THIS_KW,
        "super" => SUPER_KW,
        "abstract" => ABSTRACT_KW,
        "open" => OPEN_KW,
        "override" => OVERRIDE_KW,
        "public" => PUBLIC_KW,
        "private" => PRIVATE_KW,
        "internal" => INTERNAL_KW,
        "protected" => PROTECTED_KW,
        "final" => FINAL_KW,
        "sealed" => SEALED_KW,
        "const" => CONST_KW,
        "lateinit" => LATEINIT_KW,
        "inline" => INLINE_KW,
        "noinline" => NOINLINE_KW,
        "crossinline" => CROSSINLINE_KW,
        "vararg" => VARARG_KW,
        "reified" => REIFIED_KW,
        "suspend" => SUSPEND_KW,
        "operator" => OPERATOR_KW,
        "data" => DATA_KW,
        "inner" => INNER_KW,
        "external" => EXTERNAL_KW,
        "tailrec" => TAILREC_KW,
        "expect" => EXPECT_KW,
        "actual" => ACTUAL_KW,
        "enum" => ENUM_KW,
        "companion" => COMPANION_KW,
        "value" => VALUE_KW,
        "field" => FIELD_KW,
        _ => NAME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut tokenizer = Tokenizer::new(text);
        let mut kinds = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn keywords_and_names() {
        assert_eq!(
            kinds("abstract class Foo"),
            vec![ABSTRACT_KW, CLASS_KW, NAME],
        );
        assert_eq!(kinds("val x = 1"), vec![VAL_KW, NAME, EQ, INT_NUMBER]);
    }

    #[test]
    fn compound_operators() {
        assert_eq!(kinds("a?.b"), vec![NAME, SAFE_ACCESS, NAME]);
        assert_eq!(kinds("a ?: b"), vec![NAME, ELVIS, NAME]);
        assert_eq!(kinds("a::b"), vec![NAME, COLONCOLON, NAME]);
        assert_eq!(kinds("a += 1"), vec![NAME, PLUS_EQ, INT_NUMBER]);
        assert_eq!(kinds("x -> y"), vec![NAME, ARROW, NAME]);
        assert_eq!(kinds("T?"), vec![NAME, QUEST]);
    }

    #[test]
    fn token_ranges_exclude_trivia() {
        let mut tokenizer = Tokenizer::new("  val  x // tail");
        let val = tokenizer.next_token();
        assert_eq!(val.kind, VAL_KW);
        assert_eq!(val.kind_range, TextRange::new(2.into(), 5.into()));
        assert_eq!(val.leading.len(), TextSize::new(2));
        assert_eq!(val.trailing.len(), TextSize::new(2));

        let name = tokenizer.next_token();
        assert_eq!(name.kind, NAME);
        assert_eq!(name.kind_range, TextRange::new(7.into(), 8.into()));
        // The comment and the space before it trail the name.
        assert_eq!(name.trailing.len(), TextSize::new(8));
    }

    #[test]
    fn literals() {
        assert_eq!(kinds("42L"), vec![INT_NUMBER]);
        assert_eq!(kinds("'a'"), vec![CHAR_LITERAL]);
        assert_eq!(kinds("'\\n'"), vec![CHAR_LITERAL]);
        assert_eq!(kinds("\"hi\""), vec![STRING]);
    }
}
