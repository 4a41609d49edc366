pub mod ast;
pub mod error;
pub mod op;

use error::{kind, Error};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use teachers_error::ErrorKind;

/// The deepest syntax tree accepted in an answer. Every operator, group and command adds a level.
pub const MAX_DEPTH: usize = 128;

/// A high-level parser for LaTeX answers. This is the type to use to parse an arbitrary piece of
/// LaTeX into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// Single-letter names that denote functions, so that `f(x)` is parsed as an application
    /// instead of the product `f \cdot x`.
    functions: Vec<String>,

    /// The number of levels of the syntax tree above the expression being parsed.
    depth: usize,

    /// Set once the answer has gone deeper than [`MAX_DEPTH`]. Such an answer is never backtracked
    /// into another reading.
    too_deep: bool,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            functions: Vec::new(),
            depth: 0,
            too_deep: false,
        }
    }

    /// Create a new parser that treats the given names as functions.
    pub fn with_functions<S: AsRef<str>>(source: &'source str, functions: &[S]) -> Self {
        Self {
            functions: functions.iter().map(|name| name.as_ref().to_string()).collect(),
            ..Self::new(source)
        }
    }

    /// Returns true if the given name was declared as a function.
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.iter().any(|function| function == name)
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there is none.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Moves one level deeper into the syntax tree, failing if the answer is nested deeper than
    /// [`MAX_DEPTH`].
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            self.too_deep = true;
            return Err(self.error(kind::TooDeep { limit: MAX_DEPTH }));
        }
        self.depth += 1;
        Ok(())
    }

    /// Returns true if parsing has failed somewhere for going deeper than [`MAX_DEPTH`].
    pub fn is_too_deep(&self) -> bool {
        self.too_deep
    }

    /// Returns the current depth, to restore it later with [`Parser::leave`].
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Moves back up to a depth returned by [`Parser::depth`].
    pub fn leave(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns the position of the cursor, to restore it later with [`Parser::restore`].
    pub fn checkpoint(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor back to a position returned by [`Parser::checkpoint`].
    pub fn restore(&mut self, checkpoint: usize) {
        self.cursor = checkpoint;
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns true if the very next token, whitespace included, has the given kind.
    pub fn is_adjacent(&self, kind: TokenKind) -> bool {
        self.tokens.get(self.cursor).map_or(false, |token| token.kind == kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Consumes the next token if it has the given kind, or returns an error pointing at it.
    pub fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let start = self.cursor;
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            self.cursor = start;
            Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected,
                found: token.kind,
            }))
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_token().is_none() {
            Ok(value)
        } else if self.at_decimal_comma() {
            Err(self.error(kind::DecimalComma))
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }

    /// Returns true if the cursor is on a comma written between two digits, as in `0,75`.
    fn at_decimal_comma(&self) -> bool {
        let kind = |i: usize| self.tokens.get(i).map(|token| token.kind);
        self.cursor > 0
            && kind(self.cursor - 1) == Some(TokenKind::Int)
            && kind(self.cursor) == Some(TokenKind::Comma)
            && kind(self.cursor + 1) == Some(TokenKind::Int)
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The operation is left-associative: `a op b op c` is `(a op b) op c`.
    Left,

    /// The operation is right-associative: `a op b op c` is `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of relations (`=`, `>` and `<`).
    Compare,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (explicit or implicit) and division, which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// Parses a whole answer, rejecting trees deeper than [`MAX_DEPTH`].
fn parse_answer(mut parser: Parser<'_>) -> Result<ast::Expr, Error> {
    let expr = parser.try_parse_full::<ast::Expr>()?;
    if expr.depth() > MAX_DEPTH {
        return Err(Error::new(vec![expr.span()], kind::TooDeep { limit: MAX_DEPTH }));
    }
    Ok(expr)
}

/// Parses a complete LaTeX answer.
pub fn parse(source: &str) -> Result<ast::Expr, Error> {
    parse_answer(Parser::new(source))
}

/// Parses a complete LaTeX answer, treating the given single-letter names as functions.
pub fn parse_with_functions<S: AsRef<str>>(source: &str, functions: &[S]) -> Result<ast::Expr, Error> {
    parse_answer(Parser::with_functions(source, functions))
}
