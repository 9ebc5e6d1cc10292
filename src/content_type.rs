use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::media_range::{essence, fmt_params, param, params_from_parsed, Params};

/// A concrete media type, such as the value of a `Content-Type` header.
///
/// Unlike a [`MediaRange`](crate::MediaRange), neither the type nor the
/// subtype may be `*`.
///
/// # Example
///
/// ```
/// use http_accept::ContentType;
///
/// let json = ContentType::parse("Application/JSON; charset=utf-8").unwrap();
/// assert_eq!(json.mime_type(), "application/json");
/// assert_eq!(json.param("charset"), Some("utf-8"));
/// assert_eq!(json.to_string(), "application/json; charset=utf-8");
///
/// assert!(ContentType::parse("text/*").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
    essence: String,
    slash: usize,
    params: Params,
}

impl ContentType {
    /// Creates a content type without parameters.
    ///
    /// # Errors
    ///
    /// Both parts must be non-empty tokens, and neither may be `*`.
    pub fn new(type_: &str, subtype: &str) -> Result<ContentType, ParseError> {
        check_token(type_, 0)?;
        check_token(subtype, type_.len() + 1)?;

        let (essence, slash) = essence(type_, subtype);
        Ok(ContentType {
            essence,
            slash,
            params: Params::new(),
        })
    }

    /// Adds a parameter. A parameter of the same name is replaced in place.
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> ContentType {
        self.params.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Parses a single media type, with optional parameters.
    pub fn parse(source: &str) -> Result<ContentType, ParseError> {
        let range = accept_parse::media_type(source)?;
        let (essence, slash) = essence(range.type_, range.subtype);

        Ok(ContentType {
            essence,
            slash,
            params: params_from_parsed(&range.params, true),
        })
    }

    #[inline]
    pub fn type_(&self) -> &str {
        &self.essence[..self.slash]
    }

    #[inline]
    pub fn subtype(&self) -> &str {
        &self.essence[self.slash + 1..]
    }

    /// The `type/subtype` part, without parameters.
    #[inline]
    pub fn mime_type(&self) -> &str {
        &self.essence
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        param(&self.params, name)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub(crate) fn into_parts(self) -> (String, usize, Params) {
        (self.essence, self.slash, self.params)
    }
}

fn check_token(s: &str, offset: usize) -> Result<(), accept_parse::ParseError> {
    if s.is_empty() {
        return Err(accept_parse::ParseError::UnexpectedEnd);
    }
    if s == "*" {
        return Err(accept_parse::ParseError::InvalidRange);
    }
    match s.bytes().position(|b| !accept_parse::is_token(b)) {
        Some(pos) => Err(accept_parse::ParseError::InvalidToken {
            pos: offset + pos,
            byte: s.as_bytes()[pos],
        }),
        None => Ok(()),
    }
}

impl FromStr for ContentType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<ContentType, ParseError> {
        ContentType::parse(s)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.essence)?;
        fmt_params(f, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaRange;

    #[test]
    fn new_validates_parts() {
        let html = ContentType::new("Text", "HTML").unwrap();
        assert_eq!(html.type_(), "text");
        assert_eq!(html.subtype(), "html");

        assert!(ContentType::new("text", "*").is_err());
        assert!(ContentType::new("*", "plain").is_err());
        assert!(ContentType::new("", "plain").is_err());
        assert!(ContentType::new("text", "pl ain").is_err());
    }

    #[test]
    fn new_error_positions() {
        let err = ContentType::new("text", "pl ain").unwrap_err();
        assert_eq!(
            err.inner,
            accept_parse::ParseError::InvalidToken { pos: 7, byte: b' ' }
        );
    }

    #[test]
    fn parse_params() {
        let content_type: ContentType = "text/plain; charset=utf-8; format=flowed".parse().unwrap();
        assert_eq!(
            content_type.params().collect::<Vec<_>>(),
            [("charset", "utf-8"), ("format", "flowed")]
        );
        assert_eq!(content_type.param("CHARSET"), Some("utf-8"));
        assert_eq!(content_type.param("q"), None);
    }

    #[test]
    fn parse_invalid() {
        assert!(ContentType::parse("text").is_err());
        assert!(ContentType::parse("*/*").is_err());
        assert!(ContentType::parse("text/plain, text/html").is_err());
        assert!(ContentType::parse("text/plain;charset").is_err());
    }

    #[test]
    fn quoted_values_round_trip() {
        let text = "text/plain; value=\"[\\\"bar\\\", \\\"baz\\\"]\"";

        let content_type = ContentType::parse(text).unwrap();
        assert_eq!(content_type.param("value"), Some(r#"["bar", "baz"]"#));
        assert_eq!(content_type.to_string(), text);
    }

    #[test]
    fn into_media_range() {
        let content_type = ContentType::new("text", "plain").unwrap().with_param("charset", "utf-8");
        let range = MediaRange::from(content_type.clone());

        assert_eq!(range.mime_type(), "text/plain");
        assert_eq!(range.param("charset"), Some("utf-8"));
        assert!(range.matches(&content_type));
    }
}
