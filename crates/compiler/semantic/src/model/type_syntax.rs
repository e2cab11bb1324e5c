//! Compact type spelling used by declarations: `int`, `I1<T>`, `T?`, `int[]`.

use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    Named { name: SmolStr, args: Vec<TypeSyntax> },
    Nullable(Box<TypeSyntax>),
    Array(Box<TypeSyntax>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed type '{text}': {reason}")]
pub struct TypeSyntaxError {
    pub text: String,
    pub reason: &'static str,
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.text[self.pos..]
            .chars()
            .next()
            .filter(|c| c.is_whitespace())
        {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.text[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = &self.text[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn error(&self, reason: &'static str) -> TypeSyntaxError {
        TypeSyntaxError {
            text: self.text.to_string(),
            reason,
        }
    }

    fn parse_type(&mut self) -> Result<TypeSyntax, TypeSyntaxError> {
        let name = self
            .identifier()
            .ok_or_else(|| self.error("expected a type name"))?;
        let mut args = Vec::new();
        if self.eat("<") {
            loop {
                args.push(self.parse_type()?);
                if self.eat(",") {
                    continue;
                }
                if self.eat(">") {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }
        let mut ty = TypeSyntax::Named {
            name: SmolStr::new(name),
            args,
        };
        loop {
            if self.eat("?") {
                ty = TypeSyntax::Nullable(Box::new(ty));
            } else if self.eat("[") {
                if !self.eat("]") {
                    return Err(self.error("expected ']'"));
                }
                ty = TypeSyntax::Array(Box::new(ty));
            } else {
                return Ok(ty);
            }
        }
    }
}

impl FromStr for TypeSyntax {
    type Err = TypeSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor { text: s, pos: 0 };
        let ty = cursor.parse_type()?;
        cursor.skip_whitespace();
        if cursor.pos != s.len() {
            return Err(cursor.error("unexpected trailing text"));
        }
        Ok(ty)
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Self::Nullable(inner) => write!(f, "{inner}?"),
            Self::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}
