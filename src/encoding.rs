use std::fmt;

use crate::error::{rejected, ParseError};
use crate::{sort_by_quality, Quality, Weighted, ACCEPT_ENCODING};

/// A content-coding preference from an `Accept-Encoding` header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentCoding {
    coding: String,
    quality: Option<Quality>,
}

impl ContentCoding {
    /// Creates a content-coding preference without an explicit weight.
    pub fn new(coding: impl Into<String>) -> ContentCoding {
        ContentCoding {
            coding: coding.into(),
            quality: None,
        }
    }

    /// The `*` coding, matching any content-coding.
    pub fn wildcard() -> ContentCoding {
        ContentCoding::new("*")
    }

    /// The `identity` coding, meaning no encoding at all.
    pub fn identity() -> ContentCoding {
        ContentCoding::new("identity")
    }

    pub fn with_quality(mut self, quality: Quality) -> ContentCoding {
        self.quality = Some(quality);
        self
    }

    pub fn encoding(&self) -> &str {
        &self.coding
    }

    pub fn quality(&self) -> Quality {
        self.quality.unwrap_or(Quality::ONE)
    }

    pub fn is_wildcard(&self) -> bool {
        self.coding == "*"
    }

    pub fn is_identity(&self) -> bool {
        self.coding.eq_ignore_ascii_case("identity")
    }

    fn from_item(item: accept_parse::Item) -> ContentCoding {
        ContentCoding {
            coding: item.value.to_owned(),
            quality: item.quality.map(Quality::from_millionths),
        }
    }
}

impl Weighted for ContentCoding {
    fn quality(&self) -> Quality {
        ContentCoding::quality(self)
    }
}

impl fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.coding)?;
        if let Some(q) = self.quality {
            write!(f, ";q={}", q)?;
        }
        Ok(())
    }
}

/// Parses an `Accept-Encoding` value into preferences, most preferred first.
///
/// # Example
///
/// ```
/// let codings = http_accept::parse_encodings("identity;q=0.25, deflate;q=0.5, gzip").unwrap();
/// let names: Vec<_> = codings.iter().map(|c| c.encoding()).collect();
///
/// assert_eq!(names, ["gzip", "deflate", "identity"]);
/// ```
pub fn parse_encodings(text: &str) -> Result<Vec<ContentCoding>, ParseError> {
    let items = accept_parse::codings(text).map_err(|e| rejected(ACCEPT_ENCODING, e))?;
    Ok(sort_by_quality(items.into_iter().map(ContentCoding::from_item)))
}

/// The content-codings a client prefers, given its `Accept-Encoding` header.
///
/// A missing header accepts any coding (`*`). A header that is present but
/// empty means the client wants no coding at all, so only `identity` is
/// returned.
///
/// # Example
///
/// ```
/// use http_accept::preferred_encodings;
///
/// assert!(preferred_encodings(None).unwrap()[0].is_wildcard());
/// assert!(preferred_encodings(Some("")).unwrap()[0].is_identity());
/// ```
pub fn preferred_encodings(header: Option<&str>) -> Result<Vec<ContentCoding>, ParseError> {
    match header.map(str::trim) {
        None => Ok(vec![ContentCoding::wildcard()]),
        Some("") => Ok(vec![ContentCoding::identity()]),
        Some(value) => parse_encodings(value),
    }
}
