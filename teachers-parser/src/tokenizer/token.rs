use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    #[regex(r"\\[,;:! ]")]
    #[token("\\quad")]
    #[token("\\qquad")]
    Whitespace,

    #[token("=")]
    Eq,

    #[token(">")]
    #[token("\\gt")]
    Greater,

    #[token("<")]
    #[token("\\lt")]
    Less,

    #[token("≥")]
    #[token("\\ge")]
    #[token("\\geq")]
    GreaterEq,

    #[token("≤")]
    #[token("\\le")]
    #[token("\\leq")]
    LessEq,

    #[token("≠")]
    #[token("\\ne")]
    #[token("\\neq")]
    NotEq,

    #[token("+")]
    Add,

    #[token("-")]
    #[token("−")]
    Sub,

    #[token("*")]
    #[token("\\cdot")]
    #[token("\\times")]
    Mul,

    #[token("/")]
    #[token("\\div")]
    Div,

    #[token("^")]
    Exp,

    #[token("\\frac")]
    #[token("\\dfrac")]
    #[token("\\tfrac")]
    Frac,

    #[token("\\sqrt")]
    Sqrt,

    #[token("\\pi")]
    Pi,

    #[token("\\infty")]
    Infinity,

    /// Any other command, such as `\sin` or `\alpha`.
    #[regex(r"\\[a-zA-Z]+")]
    Command,

    /// A single letter. Consecutive letters are separate symbols multiplied together.
    #[regex(r"[a-zA-Z]")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("(")]
    #[token("\\left(")]
    OpenParen,

    #[token(")")]
    #[token("\\right)")]
    CloseParen,

    #[token("[")]
    #[token("\\left[")]
    OpenSquare,

    #[token("]")]
    #[token("\\right]")]
    CloseSquare,

    #[token("\\lbracket")]
    #[token("\\lbrack")]
    LBracket,

    #[token("\\rbracket")]
    #[token("\\rbrack")]
    RBracket,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if the token is a relation symbol.
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Greater
                | TokenKind::Less
                | TokenKind::GreaterEq
                | TokenKind::LessEq
                | TokenKind::NotEq
        )
    }

    /// Returns true if the token can start an operand, and therefore follow another operand
    /// with an implicit multiplication in between.
    pub fn starts_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Frac
                | TokenKind::Sqrt
                | TokenKind::Pi
                | TokenKind::Infinity
                | TokenKind::Command
                | TokenKind::Name
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::OpenParen
                | TokenKind::OpenBrace
        )
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
