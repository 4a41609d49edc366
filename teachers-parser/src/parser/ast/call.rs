use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr, paren::parse_delimited},
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Commands that name a function rather than a symbol.
const FUNCTION_COMMANDS: &[&str] = &[
    "sin", "cos", "tan", "arcsin", "arccos", "arctan", "sinh", "cosh", "tanh", "ln", "log", "exp",
];

/// Returns true if the given command lexeme, such as `\sin`, names a function.
pub fn is_function_command(lexeme: &str) -> bool {
    lexeme
        .strip_prefix('\\')
        .map_or(false, |name| FUNCTION_COMMANDS.contains(&name))
}

/// A function application, such as `\ln(x)`, `\sin 2x` or `f(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function, without any leading backslash.
    pub name: String,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error> {
        let name = input.next_token()?;
        let (function, is_command) = match name.kind {
            TokenKind::Command if is_function_command(name.lexeme) => (&name.lexeme[1..], true),
            TokenKind::Name if input.is_function(name.lexeme) => (name.lexeme, false),
            _ => return Err(Error::new(vec![name.span.clone()], kind::UnexpectedToken {
                expected: &[TokenKind::Command, TokenKind::Name],
                found: name.kind,
            })),
        };

        let next = input.peek_token().map(|token| token.kind);
        let (args, end) = match next {
            Some(TokenKind::OpenParen) => {
                let (open, args, close) = parse_delimited(
                    input,
                    &[TokenKind::OpenParen],
                    TokenKind::CloseParen,
                    ")",
                    true,
                )?;
                if args.is_empty() {
                    return Err(Error::new(vec![open.start..close.end], kind::EmptyGroup));
                }
                (args, close.end)
            },
            // `\sin 2x`: the argument runs until the next term
            _ if is_command => {
                let arg = Binary::parse_expr(input, Precedence::Term)?;
                let end = arg.span().end;
                (vec![arg], end)
            },
            _ => return Err(input.error(kind::UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: next.unwrap_or(TokenKind::Whitespace),
            })),
        };

        Ok(Self {
            name: function.to_owned(),
            args,
            span: name.span.start..end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            arg.fmt(f)?;
        }
        write!(f, ")")
    }
}
