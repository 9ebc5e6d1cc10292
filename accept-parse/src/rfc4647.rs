use crate::{list, Cursor, Item, ParseError};

// From [RFC4647](https://tools.ietf.org/html/rfc4647#section-2.1):
//
// >     language-range   = (1*8ALPHA *("-" 1*8alphanum)) / "*"
// >     alphanum         = ALPHA / DIGIT
//
// And [RFC7231](https://tools.ietf.org/html/rfc7231#section-5.3.5):
//
// >     Accept-Language = 1#( language-range [ weight ] )
//
// Language weights are accepted with up to six digits after the point.

const QVALUE_PRECISION: usize = 6;
const SUBTAG_MAX: usize = 8;

/// Parses an `Accept-Language` value.
pub fn language_ranges(s: &str) -> Result<Vec<Item>, ParseError> {
    list(s, language_range)
}

fn language_range<'a>(cursor: &mut Cursor<'a>) -> Result<Item<'a>, ParseError> {
    let value = locale(cursor)?;

    let mark = cursor.pos();
    cursor.skip_ws();
    let quality = if cursor.eat(b';') {
        cursor.skip_ws();
        if !cursor.eat_str("q=") {
            return Err(cursor.unexpected());
        }
        Some(cursor.qvalue(QVALUE_PRECISION)?)
    } else {
        cursor.reset(mark);
        None
    };

    Ok(Item { value, quality })
}

fn locale<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, ParseError> {
    let start = cursor.pos();
    if cursor.eat(b'*') {
        return Ok(cursor.slice(start));
    }

    if cursor.take_while(SUBTAG_MAX, |b| b.is_ascii_alphabetic()).is_empty() {
        return Err(cursor.unexpected());
    }

    while cursor.peek() == Some(b'-') && cursor.peek_at(1).map_or(false, |b| b.is_ascii_alphanumeric()) {
        cursor.bump();
        cursor.take_while(SUBTAG_MAX, |b| b.is_ascii_alphanumeric());
    }

    Ok(cursor.slice(start))
}
