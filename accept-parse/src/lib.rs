//! Internal grammar scanners for the `http-accept` crate.
//!
//! Every scanner consumes a whole header value and either returns every
//! element it found, in header order, or an error. Partial results are
//! never returned.

use std::error::Error;
use std::fmt;

mod rfc4647;
mod rfc7231;

pub use self::rfc4647::language_ranges;
pub use self::rfc7231::{charsets, codings, media_range, media_ranges, media_type};

/// One million, the fixed-point scale of a parsed qvalue.
pub const QUALITY_SCALE: u32 = 1_000_000;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    MissingSlash,
    MissingEqual,
    MissingQuote,
    InvalidToken {
        pos: usize,
        byte: u8,
    },
    InvalidQuality {
        pos: usize,
    },
    UnexpectedEnd,
    InvalidRange,
    Empty,
}

impl ParseError {
    fn description(&self) -> &str {
        match self {
            ParseError::MissingSlash => "a slash (/) was missing between the type and subtype",
            ParseError::MissingEqual => "an equals sign (=) was missing between a parameter and its value",
            ParseError::MissingQuote => "a quote (\") was missing from a parameter value",
            ParseError::InvalidToken { .. } => "invalid token",
            ParseError::InvalidQuality { .. } => "invalid quality value",
            ParseError::UnexpectedEnd => "the value ended unexpectedly",
            ParseError::InvalidRange => "unexpected asterisk",
            ParseError::Empty => "at least one element is required",
        }
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::InvalidToken { pos, byte } => {
                write!(f, "{}, {:X} at position {}", self.description(), byte, pos)
            },
            ParseError::InvalidQuality { pos } => {
                write!(f, "{} at position {}", self.description(), pos)
            },
            _ => f.write_str(self.description()),
        }
    }
}

/// A `value [";q=" qvalue]` element of `Accept-Charset`, `Accept-Encoding`
/// or `Accept-Language`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item<'a> {
    pub value: &'a str,
    /// The qvalue in millionths, if one was given.
    pub quality: Option<u32>,
}

/// A `type "/" subtype *( ";" parameter )` element of `Accept`.
#[derive(Clone, Debug, PartialEq)]
pub struct Range<'a> {
    pub type_: &'a str,
    pub subtype: &'a str,
    pub params: Vec<Param<'a>>,
}

/// A single media type parameter.
///
/// When `quoted` is true, `value` is the raw quoted-string including the
/// surrounding double quotes and any quoted-pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Param<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub quoted: bool,
}

pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Cursor<'a> {
        Cursor { src, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    pub(crate) fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.src[self.pos..].as_bytes().starts_with(s.as_bytes()) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if !is_ws(b) {
                break;
            }
            self.pos += 1;
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.src.as_bytes()[self.pos..].iter().all(|&b| is_ws(b))
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    /// Consumes bytes while `pred` holds, up to `max` of them.
    pub(crate) fn take_while(&mut self, max: usize, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.pos - start < max {
            match self.peek() {
                Some(b) if pred(b) => self.pos += 1,
                _ => break,
            }
        }
        self.slice(start)
    }

    /// `token = 1*tchar`
    pub(crate) fn token(&mut self) -> Result<&'a str, ParseError> {
        let token = self.take_while(usize::MAX, is_token);
        if token.is_empty() {
            Err(self.unexpected())
        } else {
            Ok(token)
        }
    }

    /// `qvalue = ( "0" [ "." 0*N DIGIT ] ) / ( "1" [ "." 0*N "0" ] )`
    ///
    /// Returns the value in millionths. More than `precision` digits after
    /// the point is an error rather than a truncation.
    pub(crate) fn qvalue(&mut self, precision: usize) -> Result<u32, ParseError> {
        debug_assert!(precision <= 6, "qvalue precision beyond millionths");
        let start = self.pos;
        let value = match self.bump() {
            Some(b'0') => {
                let mut value = 0;
                if self.eat(b'.') {
                    let mut scale = QUALITY_SCALE;
                    for digit in self.take_while(precision, |b| b.is_ascii_digit()).bytes() {
                        scale /= 10;
                        value += u32::from(digit - b'0') * scale;
                    }
                }
                value
            },
            Some(b'1') => {
                if self.eat(b'.') {
                    self.take_while(precision, |b| b == b'0');
                }
                QUALITY_SCALE
            },
            _ => return Err(ParseError::InvalidQuality { pos: start }),
        };

        match self.peek() {
            Some(b) if b.is_ascii_digit() => Err(ParseError::InvalidQuality { pos: start }),
            _ => Ok(value),
        }
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(byte) => ParseError::InvalidToken {
                pos: self.pos,
                byte,
            },
            None => ParseError::UnexpectedEnd,
        }
    }
}

/// Drives `element` over a comma separated list.
///
/// `header-list = element *( OWS "," OWS element )`
///
/// A value that is blank yields no elements. Trailing whitespace and a
/// single trailing comma are tolerated; anything else left over fails the
/// whole list.
pub(crate) fn list<'a, T, F>(src: &'a str, mut element: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&mut Cursor<'a>) -> Result<T, ParseError>,
{
    let mut cursor = Cursor::new(src);
    let mut items = Vec::new();

    while !cursor.is_blank() {
        items.push(element(&mut cursor)?);

        cursor.skip_ws();
        if cursor.peek().is_none() {
            break;
        }
        if !cursor.eat(b',') {
            return Err(cursor.unexpected());
        }
        cursor.skip_ws();
    }

    Ok(items)
}

#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

// From [RFC7230](https://tools.ietf.org/html/rfc7230#section-3.2.6):
//
// >     token = 1*tchar
// >     tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
// >        "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA

macro_rules! byte_map {
    ($($flag:expr,)*) => ([
        $($flag != 0,)*
    ])
}

static TOKEN_MAP: [bool; 256] = byte_map![
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 1, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 0, 1, 1, 0,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0,
    0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[inline]
pub fn is_token(c: u8) -> bool {
    TOKEN_MAP[c as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_tables() {
        for (i, &valid) in TOKEN_MAP.iter().enumerate() {
            let i = i as u8;
            let should = match i {
                b'a'..=b'z' |
                b'A'..=b'Z' |
                b'0'..=b'9' |
                b'!' |
                b'#' |
                b'$' |
                b'%' |
                b'&' |
                b'\'' |
                b'*' |
                b'+' |
                b'-' |
                b'.' |
                b'^' |
                b'_' |
                b'`' |
                b'|' |
                b'~' => true,
                _ => false
            };
            assert_eq!(valid, should, "{:?} ({}) should be {}", i as char, i, should);
        }
    }

    fn q(s: &str, precision: usize) -> Result<u32, ParseError> {
        let mut cursor = Cursor::new(s);
        let value = cursor.qvalue(precision)?;
        assert_eq!(cursor.pos(), s.len(), "qvalue {:?} not fully consumed", s);
        Ok(value)
    }

    #[test]
    fn qvalue_digits() {
        assert_eq!(q("0", 3), Ok(0));
        assert_eq!(q("0.", 3), Ok(0));
        assert_eq!(q("0.5", 3), Ok(500_000));
        assert_eq!(q("0.25", 3), Ok(250_000));
        assert_eq!(q("0.123", 3), Ok(123_000));
        assert_eq!(q("0.123456", 6), Ok(123_456));
        assert_eq!(q("1", 3), Ok(QUALITY_SCALE));
        assert_eq!(q("1.000", 3), Ok(QUALITY_SCALE));
    }

    #[test]
    fn qvalue_overflow_is_an_error() {
        assert_eq!(q("0.1234", 3), Err(ParseError::InvalidQuality { pos: 0 }));
        assert_eq!(q("0.1234567", 6), Err(ParseError::InvalidQuality { pos: 0 }));
        assert_eq!(q("2", 3), Err(ParseError::InvalidQuality { pos: 0 }));
        assert_eq!(q("", 3), Err(ParseError::InvalidQuality { pos: 0 }));
    }

    #[test]
    fn qvalue_above_one_is_an_error() {
        assert_eq!(q("1.5", 3), Err(ParseError::InvalidQuality { pos: 0 }));
        assert_eq!(q("1.0001", 3), Err(ParseError::InvalidQuality { pos: 0 }));
    }

    fn tokens(s: &str) -> Result<Vec<&str>, ParseError> {
        list(s, |c| c.token())
    }

    #[test]
    fn list_separators() {
        assert_eq!(tokens(""), Ok(vec![]));
        assert_eq!(tokens("   "), Ok(vec![]));
        assert_eq!(tokens("a"), Ok(vec!["a"]));
        assert_eq!(tokens("a,b"), Ok(vec!["a", "b"]));
        assert_eq!(tokens("a ,\n\tb  "), Ok(vec!["a", "b"]));
        assert_eq!(tokens("a, "), Ok(vec!["a"]));

        assert_eq!(tokens(","), Err(ParseError::InvalidToken { pos: 0, byte: b',' }));
        assert_eq!(tokens("a, , b"), Err(ParseError::InvalidToken { pos: 3, byte: b',' }));
        assert_eq!(tokens("a b"), Err(ParseError::InvalidToken { pos: 2, byte: b'b' }));
        assert_eq!(tokens(" a"), Err(ParseError::InvalidToken { pos: 0, byte: b' ' }));
    }

    #[test]
    fn error_display() {
        let err = ParseError::InvalidToken { pos: 3, byte: b';' };
        assert_eq!(err.to_string(), "invalid token, 3B at position 3");
        assert_eq!(ParseError::Empty.to_string(), "at least one element is required");
    }
}
