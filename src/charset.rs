use std::fmt;

use crate::error::{rejected, ParseError};
use crate::{sort_by_quality, Quality, Weighted, ACCEPT_CHARSET};

/// A charset preference from an `Accept-Charset` header.
///
/// # Example
///
/// ```
/// let charsets = http_accept::parse_charsets("iso-8859-1;q=0.5, utf-8").unwrap();
///
/// assert_eq!(charsets[0].charset(), "utf-8");
/// assert_eq!(charsets[0].quality(), http_accept::Quality::ONE);
/// assert_eq!(charsets[1].to_string(), "iso-8859-1;q=0.5");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Charset {
    name: String,
    quality: Option<Quality>,
}

impl Charset {
    /// Creates a charset preference without an explicit weight.
    pub fn new(name: impl Into<String>) -> Charset {
        Charset {
            name: name.into(),
            quality: None,
        }
    }

    /// The `*` charset, matching any charset.
    pub fn wildcard() -> Charset {
        Charset::new("*")
    }

    /// Sets an explicit weight.
    pub fn with_quality(mut self, quality: Quality) -> Charset {
        self.quality = Some(quality);
        self
    }

    /// The charset name, exactly as given.
    pub fn charset(&self) -> &str {
        &self.name
    }

    /// The weight of this preference, `1` when none was given.
    pub fn quality(&self) -> Quality {
        self.quality.unwrap_or(Quality::ONE)
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }

    fn from_item(item: accept_parse::Item) -> Charset {
        Charset {
            name: item.value.to_owned(),
            quality: item.quality.map(Quality::from_millionths),
        }
    }
}

impl Weighted for Charset {
    fn quality(&self) -> Quality {
        Charset::quality(self)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(q) = self.quality {
            write!(f, ";q={}", q)?;
        }
        Ok(())
    }
}

/// Parses an `Accept-Charset` value into preferences, most preferred first.
///
/// # Errors
///
/// Returns an error unless the whole value matches the grammar.
pub fn parse_charsets(text: &str) -> Result<Vec<Charset>, ParseError> {
    let items = accept_parse::charsets(text).map_err(|e| rejected(ACCEPT_CHARSET, e))?;
    Ok(sort_by_quality(items.into_iter().map(Charset::from_item)))
}

/// The charsets a client prefers, given its `Accept-Charset` header.
///
/// A missing header accepts any charset (`*`). A header that is present
/// but empty is an error, since the header requires at least one element.
///
/// # Example
///
/// ```
/// use http_accept::preferred_charsets;
///
/// assert_eq!(preferred_charsets(None).unwrap()[0].charset(), "*");
/// assert!(preferred_charsets(Some("  ")).is_err());
/// assert_eq!(preferred_charsets(Some("utf-8, sdch")).unwrap().len(), 2);
/// ```
pub fn preferred_charsets(header: Option<&str>) -> Result<Vec<Charset>, ParseError> {
    match header.map(str::trim) {
        None => Ok(vec![Charset::wildcard()]),
        Some("") => Err(rejected(ACCEPT_CHARSET, accept_parse::ParseError::Empty)),
        Some(value) => parse_charsets(value),
    }
}
