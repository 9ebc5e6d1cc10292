//! RFC 7230 quoted-strings, as found in media type parameters.

use std::borrow::Cow;

/// Unquotes a quoted-string.
///
/// Strips the surrounding double quotes and resolves quoted-pairs
/// (`\X` becomes `X`). With `normalize_whitespace`, every line break
/// followed by more whitespace is folded into a single space.
///
/// The input must already be a valid quoted-string; it is not validated
/// again here.
///
/// # Example
///
/// ```
/// use http_accept::quoted_string::unquote;
///
/// assert_eq!(unquote(r#""say \"hi\"""#, true), r#"say "hi""#);
/// assert_eq!(unquote("\"Hello\r\n  World\"", true), "Hello World");
/// assert_eq!(unquote("\"Hello\r\n  World\"", false), "Hello\r\n  World");
/// ```
pub fn unquote(raw: &str, normalize_whitespace: bool) -> Cow<str> {
    let content = quoted_string::unquote_unchecked(raw);

    if normalize_whitespace && content.contains(|c| c == '\r' || c == '\n') {
        Cow::Owned(fold_whitespace(&content))
    } else {
        content
    }
}

// LWS = [CRLF] 1*( SP | HT )
fn fold_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '\r' && c != '\n' {
            out.push(c);
            continue;
        }

        let mut end = start + 1;
        let mut run = 1;
        while let Some(&(i, next)) = chars.peek() {
            if !next.is_ascii_whitespace() && next != '\x0B' {
                break;
            }
            chars.next();
            end = i + 1;
            run += 1;
        }

        if run > 1 {
            out.push(' ');
        } else {
            out.push_str(&s[start..end]);
        }
    }

    out
}

/// Quotes a value, if needed.
///
/// The value is wrapped in double quotes, with embedded quotes and
/// backslashes escaped, when it contains a `"` or when `force` is set.
/// Otherwise it is returned unchanged.
///
/// # Example
///
/// ```
/// use http_accept::quoted_string::quote;
///
/// assert_eq!(quote("utf-8", false), "utf-8");
/// assert_eq!(quote("a b", true), r#""a b""#);
/// assert_eq!(quote(r#"["bar", "baz"]"#, false), r#""[\"bar\", \"baz\"]""#);
/// ```
pub fn quote(value: &str, force: bool) -> Cow<str> {
    if !force && !value.contains('"') {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');

    Cow::Owned(quoted)
}

/// Quotes a parameter value unless it is a non-empty token.
pub(crate) fn quote_param(value: &str) -> Cow<str> {
    let is_token = !value.is_empty() && value.bytes().all(accept_parse::is_token);
    quote(value, !is_token)
}
