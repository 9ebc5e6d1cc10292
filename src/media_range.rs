use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{rejected, ParseError};
use crate::quoted_string::{quote_param, unquote};
use crate::{sort_by_quality, ContentType, Quality, Weighted, ACCEPT};

pub(crate) type Params = IndexMap<String, String>;

/// A media range from an `Accept` header, such as `text/*;q=0.5`.
///
/// The type and subtype are lower-cased, either may be `*`. Parameters keep
/// the order they were given in, and `q` is one of them: the quality of a
/// media range is read from its `q` parameter.
///
/// # Example
///
/// ```
/// let ranges = http_accept::parse_media_types("text/html;q=0.5, application/json").unwrap();
///
/// assert_eq!(ranges[0].mime_type(), "application/json");
/// assert_eq!(ranges[1].type_(), "text");
/// assert_eq!(ranges[1].subtype(), "html");
/// assert_eq!(ranges[1].param("q"), Some("0.5"));
/// assert_eq!(ranges[1].quality().as_f32(), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRange {
    essence: String,
    slash: usize,
    params: Params,
    quality: Quality,
}

impl MediaRange {
    /// Creates a media range without parameters.
    pub fn new(type_: &str, subtype: &str) -> MediaRange {
        let (essence, slash) = essence(type_, subtype);
        MediaRange {
            essence,
            slash,
            params: Params::new(),
            quality: Quality::ONE,
        }
    }

    /// The `*/*` range, matching any media type.
    pub fn wildcard() -> MediaRange {
        MediaRange::new("*", "*")
    }

    /// Adds a parameter. A parameter of the same name is replaced in place.
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> MediaRange {
        self.params.insert(name.to_ascii_lowercase(), value.into());
        self.quality = quality_of(&self.params);
        self
    }

    /// Parses a single media range.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not exactly one valid media range.
    pub fn parse(source: &str) -> Result<MediaRange, ParseError> {
        let range = accept_parse::media_range(source)?;
        Ok(MediaRange::from_parsed(&range, true))
    }

    fn from_parsed(range: &accept_parse::Range, normalize_whitespace: bool) -> MediaRange {
        let (essence, slash) = essence(range.type_, range.subtype);
        let params = params_from_parsed(&range.params, normalize_whitespace);
        let quality = quality_of(&params);

        MediaRange {
            essence,
            slash,
            params,
            quality,
        }
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

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        param(&self.params, name)
    }

    /// Returns an iterator over the parameters, in the order given.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The weight of this range, from its `q` parameter.
    ///
    /// A missing `q` is `1`. A `q` that is not a number counts as `0`, and
    /// numbers outside `[0, 1]` are clamped.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Returns true for `*/*`.
    pub fn is_wildcard(&self) -> bool {
        self.essence == "*/*"
    }

    /// Checks if this range matches a concrete content type.
    ///
    /// Every parameter of the range other than `q` must also be present,
    /// with the same value, on the content type.
    ///
    /// # Example
    ///
    /// ```
    /// use http_accept::{ContentType, MediaRange};
    ///
    /// let html = ContentType::new("text", "html").unwrap();
    /// let json = ContentType::new("application", "json").unwrap();
    ///
    /// let range = MediaRange::parse("text/*; q=0.8").unwrap();
    /// assert!(range.matches(&html));
    /// assert!(!range.matches(&json));
    /// assert!(MediaRange::wildcard().matches(&json));
    /// ```
    pub fn matches(&self, content_type: &ContentType) -> bool {
        let type_ = self.type_();

        if type_ != "*" {
            if type_ != content_type.type_() {
                return false;
            }

            let subtype = self.subtype();
            if subtype != "*" && subtype != content_type.subtype() {
                return false;
            }
        }

        self.matches_params(content_type)
    }

    fn matches_params(&self, content_type: &ContentType) -> bool {
        self.params
            .iter()
            .filter(|&(name, _)| name != "q")
            .all(|(name, value)| match content_type.param(name) {
                Some(other) if name == "charset" => other.eq_ignore_ascii_case(value),
                Some(other) => other == value,
                None => false,
            })
    }
}

impl Weighted for MediaRange {
    fn quality(&self) -> Quality {
        self.quality
    }
}

/// Any `ContentType` can be used as a `MediaRange` that matches exactly it.
impl From<ContentType> for MediaRange {
    fn from(content_type: ContentType) -> MediaRange {
        let (essence, slash, params) = content_type.into_parts();
        let quality = quality_of(&params);
        MediaRange {
            essence,
            slash,
            params,
            quality,
        }
    }
}

impl FromStr for MediaRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<MediaRange, ParseError> {
        MediaRange::parse(s)
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.essence)?;
        fmt_params(f, &self.params)
    }
}

pub(crate) fn essence(type_: &str, subtype: &str) -> (String, usize) {
    let mut essence = String::with_capacity(type_.len() + subtype.len() + 1);
    essence.push_str(type_);
    essence.push('/');
    essence.push_str(subtype);
    essence.make_ascii_lowercase();
    (essence, type_.len())
}

pub(crate) fn params_from_parsed(parsed: &[accept_parse::Param], normalize_whitespace: bool) -> Params {
    let mut params = Params::with_capacity(parsed.len());
    for param in parsed {
        let value = if param.quoted {
            unquote(param.value, normalize_whitespace).into_owned()
        } else {
            param.value.to_owned()
        };
        params.insert(param.name.to_ascii_lowercase(), value);
    }
    params
}

pub(crate) fn param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    let value = match params.get(name) {
        Some(value) => Some(value),
        None if name.bytes().any(|b| b.is_ascii_uppercase()) => params.get(&name.to_ascii_lowercase()),
        None => None,
    };
    value.map(String::as_str)
}

pub(crate) fn fmt_params(f: &mut fmt::Formatter, params: &Params) -> fmt::Result {
    for (name, value) in params {
        write!(f, "; {}={}", name, quote_param(value))?;
    }
    Ok(())
}

fn quality_of(params: &Params) -> Quality {
    match params.get("q") {
        Some(q) => q.trim().parse::<f64>().map(Quality::from_f64).unwrap_or(Quality::ZERO),
        None => Quality::ONE,
    }
}

/// Parses an `Accept` value into media ranges, most preferred first.
///
/// Quoted parameter values are unquoted, with folded line breaks
/// normalized to single spaces.
///
/// # Errors
///
/// Returns an error unless the whole value matches the grammar.
pub fn parse_media_types(text: &str) -> Result<Vec<MediaRange>, ParseError> {
    parse_media_types_with(text, true)
}

/// Like [`parse_media_types`], choosing whether line breaks inside quoted
/// parameter values are normalized.
pub fn parse_media_types_with(text: &str, normalize_whitespace: bool) -> Result<Vec<MediaRange>, ParseError> {
    let ranges = accept_parse::media_ranges(text).map_err(|e| rejected(ACCEPT, e))?;
    Ok(sort_by_quality(
        ranges.iter().map(|range| MediaRange::from_parsed(range, normalize_whitespace)),
    ))
}

/// The media ranges a client prefers, given its `Accept` header.
///
/// This never fails: a missing or empty header accepts anything (`*/*`),
/// and so does a header that cannot be parsed.
///
/// # Example
///
/// ```
/// use http_accept::{preferred_media_types, MediaRange};
///
/// assert_eq!(preferred_media_types(None), [MediaRange::wildcard()]);
/// assert_eq!(preferred_media_types(Some("   ")), [MediaRange::wildcard()]);
/// assert_eq!(preferred_media_types(Some("text/plain"))[0].mime_type(), "text/plain");
/// ```
pub fn preferred_media_types(header: Option<&str>) -> Vec<MediaRange> {
    match header.map(str::trim) {
        None | Some("") => vec![MediaRange::wildcard()],
        Some(value) => parse_media_types(value).unwrap_or_else(|_| {
            tracing::debug!(header = ACCEPT, "accepting */* in place of an invalid header");
            vec![MediaRange::wildcard()]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(type_: &str, subtype: &str, params: &[(&str, &str)]) -> MediaRange {
        params
            .iter()
            .fold(MediaRange::new(type_, subtype), |range, &(name, value)| range.with_param(name, value))
    }

    #[test]
    fn parse_basic() {
        let ranges = parse_media_types("text/html;q=0.5, application/json").unwrap();

        assert_eq!(ranges[0].mime_type(), "application/json");
        assert_eq!(ranges[0].params().count(), 0);
        assert_eq!(ranges[1].mime_type(), "text/html");
        assert_eq!(ranges[1].params().collect::<Vec<_>>(), [("q", "0.5")]);
    }

    #[test]
    fn parse_multiple_params() {
        let ranges = parse_media_types("text/html;q=0.5, application/json;q=1.0; version=1").unwrap();

        assert_eq!(ranges[0].mime_type(), "application/json");
        assert_eq!(ranges[0].params().collect::<Vec<_>>(), [("q", "1.0"), ("version", "1")]);
        assert_eq!(ranges[1].mime_type(), "text/html");
        assert_eq!(ranges[1].params().collect::<Vec<_>>(), [("q", "0.5")]);
    }

    #[test]
    fn parse_quoted_strings() {
        // splitting on ',' first would break this apart
        let ranges = parse_media_types("foo/bar;key=\"A,B,C\"").unwrap();

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].mime_type(), "foo/bar");
        assert_eq!(ranges[0].param("key"), Some("A,B,C"));
    }

    #[test]
    fn parse_quoted_whitespace() {
        let text = "text/plain;title=\"Hello\r\n  World\"";

        let ranges = parse_media_types(text).unwrap();
        assert_eq!(ranges[0].param("title"), Some("Hello World"));

        let ranges = parse_media_types_with(text, false).unwrap();
        assert_eq!(ranges[0].param("title"), Some("Hello\r\n  World"));
    }

    #[test]
    fn parse_invalid() {
        for text in &[
            "foo",
            "foo/",
            "foo/bar;",
            "foo/bar;x",
            "foo/bar;x=",
            "foo/bar;x=\"",
            "foo/bar;x=\"baz",
            "foo/bar;x=\"unterminated",
            ";foo/bar",
            ",",
        ] {
            assert!(parse_media_types(text).is_err(), "{:?} should be rejected", text);
        }
    }

    #[test]
    fn parse_rfc_examples() {
        for text in &[
            "audio/*; q=0.2, audio/basic",
            "text/plain; q=0.5, text/html,\n text/x-dvi; q=0.8, text/x-c",
            "text/*, text/plain, text/plain;format=flowed, */*",
        ] {
            assert!(!parse_media_types(text).unwrap().is_empty(), "{:?}", text);
        }

        let ranges = parse_media_types(
            "text/*;q=0.3, text/html;q=0.7, text/html;level=1,\n text/html;level=2;q=0.4, */*;q=0.5",
        )
        .unwrap();

        assert_eq!(
            ranges,
            [
                range("text", "html", &[("level", "1")]),
                range("text", "html", &[("q", "0.7")]),
                range("*", "*", &[("q", "0.5")]),
                range("text", "html", &[("level", "2"), ("q", "0.4")]),
                range("text", "*", &[("q", "0.3")]),
            ]
        );
    }

    #[test]
    fn parse_lowercases_names() {
        let ranges = parse_media_types("Text/HTML; Level=1; Q=0.5").unwrap();
        assert_eq!(ranges[0].mime_type(), "text/html");
        assert_eq!(ranges[0].param("level"), Some("1"));
        assert_eq!(ranges[0].param("LEVEL"), Some("1"));
        assert_eq!(ranges[0].quality().as_f32(), 0.5);
    }

    #[test]
    fn quality_from_q_param() {
        assert_eq!(MediaRange::new("text", "html").quality(), Quality::ONE);
        assert_eq!(range("text", "html", &[("q", "0.25")]).quality().as_f32(), 0.25);
        assert_eq!(range("text", "html", &[("q", "abc")]).quality(), Quality::ZERO);
        assert_eq!(range("text", "html", &[("q", "5")]).quality(), Quality::ONE);
    }

    #[test]
    fn preferred() {
        assert_eq!(preferred_media_types(None), [MediaRange::wildcard()]);
        assert_eq!(preferred_media_types(Some("")), [MediaRange::wildcard()]);
        assert_eq!(preferred_media_types(Some("   */*   ")), [MediaRange::wildcard()]);
        assert_eq!(preferred_media_types(Some("foo/bar;")), [MediaRange::wildcard()]);

        let ranges = preferred_media_types(Some("text/plain"));
        assert_eq!(ranges, [MediaRange::new("text", "plain")]);
    }

    #[test]
    fn single_range() {
        let any: MediaRange = "*/*".parse().unwrap();
        assert!(any.is_wildcard());

        let text = MediaRange::parse("text/*; charset=utf-8").unwrap();
        assert_eq!(text.subtype(), "*");
        assert_eq!(text.param("charset"), Some("utf-8"));

        assert!(MediaRange::parse("text/plain, text/html").is_err());
    }

    #[test]
    fn matches() {
        let plain = ContentType::new("text", "plain").unwrap();
        let plain_utf8 = plain.clone().with_param("charset", "utf-8");
        let gif = ContentType::new("image", "gif").unwrap();

        assert!(MediaRange::wildcard().matches(&gif));
        assert!(MediaRange::new("text", "*").matches(&plain));
        assert!(!MediaRange::new("text", "*").matches(&gif));
        assert!(MediaRange::new("text", "plain").matches(&plain_utf8));

        let text_utf8 = range("text", "*", &[("charset", "UTF-8"), ("q", "0.8")]);
        assert!(text_utf8.matches(&plain_utf8));
        assert!(!text_utf8.matches(&plain));
    }

    #[test]
    fn display() {
        let range = range("text", "html", &[("level", "1"), ("title", "a b"), ("q", "0.4")]);
        assert_eq!(range.to_string(), "text/html; level=1; title=\"a b\"; q=0.4");
        assert_eq!(MediaRange::wildcard().to_string(), "*/*");
    }
}
