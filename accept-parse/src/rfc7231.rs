use crate::{list, Cursor, Item, Param, ParseError, Range};

// From [RFC7231](https://tools.ietf.org/html/rfc7231#section-5.3):
//
// >     Accept          = #( media-range [ accept-params ] )
// >     media-range     = ( "*/*"
// >                       / ( type "/" "*" )
// >                       / ( type "/" subtype )
// >                       ) *( OWS ";" OWS parameter )
// >
// >     Accept-Charset  = 1#( ( charset / "*" ) [ weight ] )
// >     Accept-Encoding = #( codings [ weight ] )
// >     codings         = content-coding / "identity" / "*"
// >
// >     weight          = OWS ";" OWS "q=" qvalue
// >     qvalue          = ( "0" [ "." 0*3DIGIT ] )
// >                     / ( "1" [ "." 0*3("0") ] )
//
// Charsets and codings here take the weight without surrounding
// whitespace, and the `q` of a media range is kept as an ordinary
// parameter.

const QVALUE_PRECISION: usize = 3;

/// Parses an `Accept-Charset` value.
pub fn charsets(s: &str) -> Result<Vec<Item>, ParseError> {
    list(s, weighted_token)
}

/// Parses an `Accept-Encoding` value.
pub fn codings(s: &str) -> Result<Vec<Item>, ParseError> {
    list(s, weighted_token)
}

/// Parses an `Accept` value.
pub fn media_ranges(s: &str) -> Result<Vec<Range>, ParseError> {
    list(s, range)
}

/// Parses exactly one media range.
pub fn media_range(s: &str) -> Result<Range, ParseError> {
    let mut cursor = Cursor::new(s);
    let range = range(&mut cursor)?;

    cursor.skip_ws();
    if cursor.peek().is_some() {
        return Err(cursor.unexpected());
    }

    Ok(range)
}

/// Parses a single, concrete media type such as a `Content-Type` value.
///
/// Wildcards are rejected.
pub fn media_type(s: &str) -> Result<Range, ParseError> {
    let range = media_range(s)?;

    if range.type_ == "*" || range.subtype == "*" {
        return Err(ParseError::InvalidRange);
    }

    Ok(range)
}

fn weighted_token<'a>(cursor: &mut Cursor<'a>) -> Result<Item<'a>, ParseError> {
    let value = cursor.token()?;

    let quality = if cursor.eat(b';') {
        if !cursor.eat_str("q=") {
            return Err(cursor.unexpected());
        }
        Some(cursor.qvalue(QVALUE_PRECISION)?)
    } else {
        None
    };

    Ok(Item { value, quality })
}

fn range<'a>(cursor: &mut Cursor<'a>) -> Result<Range<'a>, ParseError> {
    let type_ = cursor.token()?;
    if !cursor.eat(b'/') {
        return Err(match cursor.peek() {
            None => ParseError::MissingSlash,
            Some(_) => cursor.unexpected(),
        });
    }
    let subtype = cursor.token()?;

    let mut params = Vec::new();
    loop {
        let mark = cursor.pos();
        cursor.skip_ws();
        if !cursor.eat(b';') {
            cursor.reset(mark);
            break;
        }
        cursor.skip_ws();
        params.push(param(cursor)?);
    }

    Ok(Range {
        type_,
        subtype,
        params,
    })
}

fn param<'a>(cursor: &mut Cursor<'a>) -> Result<Param<'a>, ParseError> {
    let name = cursor.token()?;
    if !cursor.eat(b'=') {
        return Err(ParseError::MissingEqual);
    }

    if cursor.peek() == Some(b'"') {
        let value = quoted_string(cursor)?;
        Ok(Param {
            name,
            value,
            quoted: true,
        })
    } else {
        let value = cursor.token()?;
        Ok(Param {
            name,
            value,
            quoted: false,
        })
    }
}

// >     quoted-string  = DQUOTE *( qdtext / quoted-pair ) DQUOTE
// >     quoted-pair    = "\" ( HTAB / SP / VCHAR / obs-text )
fn quoted_string<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, ParseError> {
    let start = cursor.pos();
    debug_assert_eq!(cursor.peek(), Some(b'"'));
    cursor.bump();

    loop {
        match cursor.bump() {
            Some(b'"') => return Ok(cursor.slice(start)),
            Some(b'\\') => {
                if cursor.bump().is_none() {
                    return Err(ParseError::MissingQuote);
                }
            },
            Some(_) => (),
            None => return Err(ParseError::MissingQuote),
        }
    }
}
