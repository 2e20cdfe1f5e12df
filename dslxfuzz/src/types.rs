//! Concrete types of fuzz function parameters.
//!
//! A [`ConcreteType`] is the fully resolved type the front end reports for a
//! parameter. Types can also be written as DSLX-style text, which is how the
//! command-line tools accept them:
//!
//! ```text
//! type     := primary ('[' INT ']')*
//! primary  := 'uN' '[' INT ']' | 'sN' '[' INT ']' | 'bits' '[' INT ']'
//!           | 'u' INT | 's' INT | 'bool' | 'token'
//!           | '(' [type (',' type)* [',']] ')'
//! ```
//!
//! `T[N][M]` is an array of `M` elements of `T[N]`, matching DSLX.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use logos::Logos;
use thiserror::Error;

/// A resolved parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    /// A bit vector; `width` is at least one.
    Bits { width: usize, signed: bool },
    /// A fixed-length array.
    Array { element: Box<ConcreteType>, length: usize },
    /// A tuple; may be empty.
    Tuple { members: Vec<ConcreteType> },
    /// The DSLX token type.
    Token,
    /// A function type.
    Function {
        params: Vec<ConcreteType>,
        return_type: Box<ConcreteType>,
    },
}

impl ConcreteType {
    pub fn bits(width: usize, signed: bool) -> Self {
        ConcreteType::Bits { width, signed }
    }

    pub fn ubits(width: usize) -> Self {
        Self::bits(width, false)
    }

    pub fn sbits(width: usize) -> Self {
        Self::bits(width, true)
    }

    pub fn array(element: ConcreteType, length: usize) -> Self {
        ConcreteType::Array {
            element: Box::new(element),
            length,
        }
    }

    pub fn tuple(members: Vec<ConcreteType>) -> Self {
        ConcreteType::Tuple { members }
    }

    /// Total number of bits in a flattened value of this type, saturating at
    /// `usize::MAX`. Tokens and functions carry no bits.
    pub fn total_bit_count(&self) -> usize {
        match self {
            ConcreteType::Bits { width, .. } => *width,
            ConcreteType::Array { element, length } => {
                element.total_bit_count().saturating_mul(*length)
            }
            ConcreteType::Tuple { members } => members
                .iter()
                .map(Self::total_bit_count)
                .fold(0, usize::saturating_add),
            ConcreteType::Token | ConcreteType::Function { .. } => 0,
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Bits { width, signed } => {
                write!(f, "{}N[{}]", if *signed { 's' } else { 'u' }, width)
            }
            ConcreteType::Array { element, length } => write!(f, "{}[{}]", element, length),
            ConcreteType::Tuple { members } => {
                f.write_str("(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", member)?;
                }
                if members.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            ConcreteType::Token => f.write_str("token"),
            ConcreteType::Function { params, return_type } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", return_type)
            }
        }
    }
}

/// Error produced when type text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type at offset {offset}: {message}")]
pub struct TypeParseError {
    /// Byte offset into the input where the problem was found.
    pub offset: usize,
    pub message: String,
}

impl FromStr for ConcreteType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeParser::new(s)?.parse()
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum TypeToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

struct TypeParser<'src> {
    source: &'src str,
    tokens: Vec<(TypeToken, Range<usize>)>,
    pos: usize,
}

impl<'src> TypeParser<'src> {
    fn new(source: &'src str) -> Result<Self, TypeParseError> {
        let mut tokens = Vec::new();
        for (token, span) in TypeToken::lexer(source).spanned() {
            match token {
                Ok(kind) => tokens.push((kind, span)),
                Err(()) => {
                    return Err(TypeParseError {
                        offset: span.start,
                        message: format!("unexpected character `{}`", &source[span]),
                    })
                }
            }
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    fn parse(mut self) -> Result<ConcreteType, TypeParseError> {
        let ty = self.parse_type()?;
        if let Some((_, span)) = self.tokens.get(self.pos) {
            return Err(self.error_at(span.start, "trailing input after type"));
        }
        Ok(ty)
    }

    fn parse_type(&mut self) -> Result<ConcreteType, TypeParseError> {
        let mut ty = self.parse_primary()?;
        while self.eat(TypeToken::LBracket) {
            let length = self.expect_int()?;
            self.expect(TypeToken::RBracket, "`]`")?;
            ty = ConcreteType::array(ty, length);
        }
        Ok(ty)
    }

    fn parse_primary(&mut self) -> Result<ConcreteType, TypeParseError> {
        let (token, span) = match self.tokens.get(self.pos) {
            Some((token, span)) => (*token, span.clone()),
            None => return Err(self.error_at(self.source.len(), "expected a type")),
        };
        self.pos += 1;

        match token {
            TypeToken::LParen => self.parse_tuple_rest(),
            TypeToken::Ident => {
                let source = self.source;
                let text = &source[span.clone()];
                match text {
                    "uN" | "sN" | "bits" => {
                        self.expect(TypeToken::LBracket, "`[`")?;
                        let width = self.expect_width()?;
                        self.expect(TypeToken::RBracket, "`]`")?;
                        Ok(ConcreteType::bits(width, text == "sN"))
                    }
                    "bool" => Ok(ConcreteType::ubits(1)),
                    "token" => Ok(ConcreteType::Token),
                    _ => parse_shorthand(text).ok_or_else(|| {
                        self.error_at(span.start, format!("unknown type `{}`", text))
                    }),
                }
            }
            _ => Err(self.error_at(span.start, "expected a type")),
        }
    }

    fn parse_tuple_rest(&mut self) -> Result<ConcreteType, TypeParseError> {
        let mut members = Vec::new();
        loop {
            if self.eat(TypeToken::RParen) {
                break;
            }
            members.push(self.parse_type()?);
            if self.eat(TypeToken::Comma) {
                continue;
            }
            self.expect(TypeToken::RParen, "`,` or `)`")?;
            break;
        }
        Ok(ConcreteType::tuple(members))
    }

    fn eat(&mut self, kind: TypeToken) -> bool {
        match self.tokens.get(self.pos) {
            Some((token, _)) if *token == kind => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, kind: TypeToken, what: &str) -> Result<(), TypeParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!("expected {}", what)))
        }
    }

    fn expect_int(&mut self) -> Result<usize, TypeParseError> {
        match self.tokens.get(self.pos) {
            Some((TypeToken::Int, span)) => {
                let span = span.clone();
                self.pos += 1;
                self.source[span.clone()]
                    .parse()
                    .map_err(|_| self.error_at(span.start, "integer out of range"))
            }
            _ => Err(self.error_here("expected an integer")),
        }
    }

    fn expect_width(&mut self) -> Result<usize, TypeParseError> {
        let offset = self.current_offset();
        match self.expect_int()? {
            0 => Err(self.error_at(offset, "bit width must be positive")),
            width => Ok(width),
        }
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |(_, span)| span.start)
    }

    fn error_here(&self, message: impl Into<String>) -> TypeParseError {
        self.error_at(self.current_offset(), message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> TypeParseError {
        TypeParseError {
            offset,
            message: message.into(),
        }
    }
}

/// `u8`, `s32` and friends.
fn parse_shorthand(text: &str) -> Option<ConcreteType> {
    let signed = match text.as_bytes().first()? {
        b'u' => false,
        b's' => true,
        _ => return None,
    };
    let digits = &text[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<usize>().ok()? {
        0 => None,
        width => Some(ConcreteType::bits(width, signed)),
    }
}
