//! The formal representation of a node, such as `Add(l=Symbol(s='x'), r=Integer(n=1))`.
//!
//! [`Display`](fmt::Display) writes it and [`FromStr`] reads it back, so that expressions can be
//! stored as plain text:
//!
//! ```
//! use teachers_maths::MathsObject;
//!
//! let expr = (MathsObject::symbol("x") + 1).unwrap();
//! let formal = expr.to_string();
//! assert_eq!(formal, "Add(l=Symbol(s='x'), r=Integer(n=1))");
//! assert_eq!(formal.parse::<MathsObject>().unwrap(), expr);
//! ```

use logos::Logos;
use rug::{Integer, Rational};
use std::{fmt, str::FromStr};
use crate::error::ReprError;
use super::{MathsObject, ObjectKind};

impl fmt::Display for MathsObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ObjectKind::Integer(n) => write!(f, "Integer(n={})", n),
            ObjectKind::Symbol(name) => write!(f, "Symbol(s='{}')", name),
            ObjectKind::Decimal(value) => write!(f, "Decimal(p={}, q={})", value.numer(), value.denom()),
            ObjectKind::Inf => write!(f, "Inf()"),
            ObjectKind::Pi => write!(f, "Pi()"),
            ObjectKind::Add(l, r) => write!(f, "Add(l={}, r={})", l, r),
            ObjectKind::Mul(l, r) => write!(f, "Mul(l={}, r={})", l, r),
            ObjectKind::Pow(base, exp) => write!(f, "Pow(base={}, exp={})", base, exp),
            ObjectKind::Fraction(p, q) => write!(f, "Fraction(p={}, q={})", p, q),
            ObjectKind::Equality(l, r) => write!(f, "Equality(l={}, r={})", l, r),
            ObjectKind::StrictGreaterThan(l, r) => write!(f, "StrictGreaterThan(l={}, r={})", l, r),
            ObjectKind::Interval { left, right, left_open, right_open } => write!(
                f,
                "Interval(l={}, r={}, left_open={}, right_open={})",
                left, right, left_open, right_open,
            ),
            ObjectKind::Collection(elements) => {
                write!(f, "Collection(elements=[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "])")
            },
            ObjectKind::Function(name) => write!(f, "Function(name={})", name),
            ObjectKind::Image { function, argument } => {
                write!(f, "Image(f=Function(name={}), pre={})", function, argument)
            },
        }
    }
}

/// The tokens of the formal representation.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
enum ReprToken {
    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,

    /// A value in single quotes, such as the name in `Symbol(s='\alpha')`.
    #[regex(r"'[^']*'")]
    Quoted,

    /// A variant name, a field name or a plain value such as `-42` or `true`.
    #[regex(r"[^()\[\],='\s]+")]
    Word,
}

/// A token with its text and the offset it starts at.
#[derive(Debug, Clone, Copy)]
struct Lexeme<'a> {
    kind: ReprToken,
    text: &'a str,
    at: usize,
}

impl Lexeme<'_> {
    fn unexpected(&self) -> ReprError {
        match self.text.chars().next() {
            Some(found) => ReprError::Unexpected { found, at: self.at },
            None => ReprError::UnexpectedEnd,
        }
    }
}

/// A value in the formal representation, before it is checked.
#[derive(Debug)]
enum Formal<'a> {
    Node(&'a str, Vec<(&'a str, Formal<'a>)>),
    Word(&'a str),
    List(Vec<Formal<'a>>),
}

/// Reads [`Formal`] values from the tokens of the source.
struct Reader<'a> {
    lexemes: Vec<Lexeme<'a>>,
    cursor: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Result<Self, ReprError> {
        let mut lexer = ReprToken::lexer(source);
        let mut lexemes = Vec::new();
        while let Some(kind) = lexer.next() {
            let lexeme = Lexeme { kind: ReprToken::Word, text: lexer.slice(), at: lexer.span().start };
            match kind {
                Ok(kind) => lexemes.push(Lexeme { kind, ..lexeme }),
                Err(()) => return Err(lexeme.unexpected()),
            }
        }
        Ok(Self { lexemes, cursor: 0 })
    }

    fn peek(&self) -> Option<ReprToken> {
        self.lexemes.get(self.cursor).map(|lexeme| lexeme.kind)
    }

    fn advance(&mut self) -> Result<Lexeme<'a>, ReprError> {
        let lexeme = self.lexemes.get(self.cursor).copied().ok_or(ReprError::UnexpectedEnd)?;
        self.cursor += 1;
        Ok(lexeme)
    }

    fn expect(&mut self, expected: ReprToken) -> Result<(), ReprError> {
        let lexeme = self.advance()?;
        if lexeme.kind == expected {
            Ok(())
        } else {
            Err(lexeme.unexpected())
        }
    }

    /// Reads a plain or quoted value. The quotes are not part of the value.
    fn word(&mut self) -> Result<&'a str, ReprError> {
        let lexeme = self.advance()?;
        match lexeme.kind {
            ReprToken::Word => Ok(lexeme.text),
            ReprToken::Quoted => Ok(&lexeme.text[1..lexeme.text.len() - 1]),
            _ => Err(lexeme.unexpected()),
        }
    }

    /// Reads a comma-separated sequence until the closing token.
    fn sequence<T>(
        &mut self,
        close: ReprToken,
        mut item: impl FnMut(&mut Self) -> Result<T, ReprError>,
    ) -> Result<Vec<T>, ReprError> {
        let mut items = Vec::new();
        if self.peek() == Some(close) {
            self.expect(close)?;
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.peek() == Some(ReprToken::Comma) {
                self.expect(ReprToken::Comma)?;
            } else {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn value(&mut self) -> Result<Formal<'a>, ReprError> {
        if self.peek() == Some(ReprToken::OpenSquare) {
            self.expect(ReprToken::OpenSquare)?;
            return Ok(Formal::List(self.sequence(ReprToken::CloseSquare, Self::value)?));
        }

        let word = self.word()?;
        if self.peek() != Some(ReprToken::OpenParen) {
            return Ok(Formal::Word(word));
        }
        self.expect(ReprToken::OpenParen)?;
        let fields = self.sequence(ReprToken::CloseParen, |reader| {
            let key = reader.word()?;
            reader.expect(ReprToken::Eq)?;
            Ok((key, reader.value()?))
        })?;
        Ok(Formal::Node(word, fields))
    }

    /// Fails on the first token after the value, if any.
    fn finish(&mut self) -> Result<(), ReprError> {
        match self.lexemes.get(self.cursor) {
            Some(lexeme) => Err(lexeme.unexpected()),
            None => Ok(()),
        }
    }
}

/// The fields of a node being converted.
struct Fields<'a> {
    variant: &'a str,
    fields: Vec<(&'a str, Formal<'a>)>,
}

impl<'a> Fields<'a> {
    fn take(&mut self, key: &'static str) -> Result<Formal<'a>, ReprError> {
        let index = self.fields.iter()
            .position(|(name, _)| *name == key)
            .ok_or_else(|| ReprError::MissingField { variant: self.variant.to_string(), field: key })?;
        Ok(self.fields.remove(index).1)
    }

    fn word(&mut self, key: &'static str) -> Result<&'a str, ReprError> {
        match self.take(key)? {
            Formal::Word(word) => Ok(word),
            _ => Err(ReprError::ExpectedWord(key)),
        }
    }

    fn integer(&mut self, key: &'static str) -> Result<Integer, ReprError> {
        let word = self.word(key)?;
        Integer::from_str_radix(word, 10).map_err(|_| ReprError::InvalidNumber(word.to_string()))
    }

    fn flag(&mut self, key: &'static str) -> Result<bool, ReprError> {
        match self.word(key)? {
            "true" | "True" => Ok(true),
            "false" | "False" => Ok(false),
            word => Err(ReprError::InvalidNumber(word.to_string())),
        }
    }

    fn node(&mut self, key: &'static str) -> Result<Box<MathsObject>, ReprError> {
        Ok(Box::new(build(self.take(key)?)?))
    }
}

/// Checks a formal value and builds the node it describes.
fn build(formal: Formal<'_>) -> Result<MathsObject, ReprError> {
    let (variant, fields) = match formal {
        Formal::Node(variant, fields) => (variant, fields),
        Formal::Word(word) => return Err(ReprError::UnknownVariant(word.to_string())),
        Formal::List(_) => return Err(ReprError::UnknownVariant("[...]".to_string())),
    };
    let mut fields = Fields { variant, fields };

    let kind = match variant {
        "Integer" => ObjectKind::Integer(fields.integer("n")?),
        "Symbol" => ObjectKind::Symbol(fields.word("s")?.to_string()),
        "Decimal" => {
            let p = fields.integer("p")?;
            let q = fields.integer("q")?;
            if q == 0 {
                return Err(ReprError::InvalidNumber("0".to_string()));
            }
            ObjectKind::Decimal(Rational::from((p, q)))
        },
        "Inf" => ObjectKind::Inf,
        "Pi" => ObjectKind::Pi,
        "Add" => ObjectKind::Add(fields.node("l")?, fields.node("r")?),
        "Mul" => ObjectKind::Mul(fields.node("l")?, fields.node("r")?),
        "Pow" => ObjectKind::Pow(fields.node("base")?, fields.node("exp")?),
        "Fraction" => ObjectKind::Fraction(fields.node("p")?, fields.node("q")?),
        "Equality" => ObjectKind::Equality(fields.node("l")?, fields.node("r")?),
        "StrictGreaterThan" => ObjectKind::StrictGreaterThan(fields.node("l")?, fields.node("r")?),
        "Interval" => ObjectKind::Interval {
            left: fields.node("l")?,
            right: fields.node("r")?,
            left_open: fields.flag("left_open")?,
            right_open: fields.flag("right_open")?,
        },
        "Collection" => match fields.take("elements")? {
            Formal::List(elements) => ObjectKind::Collection(
                elements.into_iter().map(build).collect::<Result<_, _>>()?,
            ),
            _ => return Err(ReprError::ExpectedWord("elements")),
        },
        "Function" => ObjectKind::Function(fields.word("name")?.to_string()),
        "Image" => {
            let function = fields.node("f")?;
            let ObjectKind::Function(name) = function.into_kind() else {
                return Err(ReprError::UnknownVariant("Image(f=...)".to_string()));
            };
            ObjectKind::Image { function: name, argument: fields.node("pre")? }
        },
        other => return Err(ReprError::UnknownVariant(other.to_string())),
    };

    Ok(MathsObject::from_kind(kind)?)
}

impl FromStr for MathsObject {
    type Err = ReprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = Reader::new(s)?;
        let formal = reader.value()?;
        reader.finish()?;
        build(formal)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::error::ConstructionError;
    use super::*;

    fn round_trip(expr: MathsObject) {
        let formal = expr.to_string();
        assert_eq!(formal.parse::<MathsObject>(), Ok(expr), "{}", formal);
    }

    #[test]
    fn formal_form() {
        let expr = MathsObject::new_pow(
            MathsObject::new_fraction(MathsObject::pi(), MathsObject::decimal(2.5).unwrap()).unwrap(),
            -2,
        ).unwrap();
        assert_eq!(
            expr.to_string(),
            "Pow(base=Fraction(p=Pi(), q=Decimal(p=5, q=2)), exp=Integer(n=-2))",
        );
    }

    #[test]
    fn round_trips() {
        let x = MathsObject::symbol("x");
        round_trip(MathsObject::integer(42));
        round_trip(MathsObject::symbol("\\alpha"));
        round_trip(MathsObject::decimal(0.75).unwrap());
        round_trip(MathsObject::inf());
        round_trip(((x.clone() * 3).unwrap() - 8).unwrap());
        round_trip(x.clone().greater_than(MathsObject::new_fraction(1, 2).unwrap()).unwrap());
        round_trip(MathsObject::new_interval(0, MathsObject::inf(), false, true).unwrap());
        round_trip(MathsObject::new_image(
            MathsObject::function("f"),
            MathsObject::new_collection(vec![x.clone(), MathsObject::pi()]).unwrap(),
        ).unwrap());
        round_trip(MathsObject::new_collection(vec![]).unwrap());
    }

    #[test]
    fn symbols_are_quoted() {
        let x = MathsObject::symbol("x");
        assert_eq!(x.to_string(), "Symbol(s='x')");
        assert_eq!("Symbol(s='x')".parse::<MathsObject>(), Ok(x.clone()));
        assert_eq!("Symbol(s=x)".parse::<MathsObject>(), Ok(x));
        assert_eq!(
            MathsObject::new_image(MathsObject::function("f"), MathsObject::symbol("y")).unwrap().to_string(),
            "Image(f=Function(name=f), pre=Symbol(s='y'))",
        );
    }

    #[test]
    fn whitespace_between_tokens() {
        let expr = "Add( l = Symbol( s = 'x' ) ,\n r = Integer( n = 1 ) )".parse::<MathsObject>();
        assert_eq!(expr, Ok(MathsObject::new_add(MathsObject::symbol("x"), 1).unwrap()));
    }

    #[test]
    fn invalid_representations() {
        assert_eq!("Integer(n=)".parse::<MathsObject>(), Err(ReprError::Unexpected { found: ')', at: 10 }));
        assert_eq!(
            "Add(l=Integer(n=1))".parse::<MathsObject>(),
            Err(ReprError::MissingField { variant: "Add".to_string(), field: "r" }),
        );
        assert_eq!("Matrix()".parse::<MathsObject>(), Err(ReprError::UnknownVariant("Matrix".to_string())));
        assert_eq!(
            "Fraction(p=Integer(n=1), q=Integer(n=0))".parse::<MathsObject>(),
            Err(ReprError::Construction(ConstructionError::InvalidDenominator)),
        );
        assert_eq!("Pi() Pi()".parse::<MathsObject>(), Err(ReprError::Unexpected { found: 'P', at: 5 }));
        assert_eq!("Symbol(s='x)".parse::<MathsObject>(), Err(ReprError::Unexpected { found: '\'', at: 9 }));
        assert_eq!("Add(l=Pi(), ".parse::<MathsObject>(), Err(ReprError::UnexpectedEnd));
    }
}
