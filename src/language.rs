use std::fmt;

use crate::error::{rejected, ParseError};
use crate::{sort_by_quality, Quality, Weighted, ACCEPT_LANGUAGE};

/// A language range from an `Accept-Language` header, such as `en-gb` or `*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageRange {
    locale: String,
    quality: Option<Quality>,
}

impl LanguageRange {
    pub fn new(locale: impl Into<String>) -> LanguageRange {
        LanguageRange {
            locale: locale.into(),
            quality: None,
        }
    }

    /// The `*` range, matching any language.
    pub fn wildcard() -> LanguageRange {
        LanguageRange::new("*")
    }

    pub fn with_quality(mut self, quality: Quality) -> LanguageRange {
        self.quality = Some(quality);
        self
    }

    /// The language tag, with the case the client sent.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn quality(&self) -> Quality {
        self.quality.unwrap_or(Quality::ONE)
    }

    pub fn is_wildcard(&self) -> bool {
        self.locale == "*"
    }

    fn from_item(item: accept_parse::Item) -> LanguageRange {
        LanguageRange {
            locale: item.value.to_owned(),
            quality: item.quality.map(Quality::from_millionths),
        }
    }
}

impl Weighted for LanguageRange {
    fn quality(&self) -> Quality {
        LanguageRange::quality(self)
    }
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.locale)?;
        if let Some(q) = self.quality {
            write!(f, ";q={}", q)?;
        }
        Ok(())
    }
}

/// Parses an `Accept-Language` value into language ranges, most preferred
/// first.
///
/// Weights may carry up to six decimal digits.
///
/// # Example
///
/// ```
/// let languages = http_accept::parse_languages("da, en-gb;q=0.5, en;q=0.25").unwrap();
///
/// assert_eq!(languages[0].locale(), "da");
/// assert_eq!(languages[1].locale(), "en-gb");
/// assert_eq!(languages[2].quality().as_f32(), 0.25);
///
/// assert!(http_accept::parse_languages("en;q=0.1234567").is_err());
/// ```
pub fn parse_languages(text: &str) -> Result<Vec<LanguageRange>, ParseError> {
    let items = accept_parse::language_ranges(text).map_err(|e| rejected(ACCEPT_LANGUAGE, e))?;
    Ok(sort_by_quality(items.into_iter().map(LanguageRange::from_item)))
}

/// The languages a client prefers, given its `Accept-Language` header.
///
/// A missing or empty header accepts any language (`*`).
pub fn preferred_languages(header: Option<&str>) -> Result<Vec<LanguageRange>, ParseError> {
    match header.map(str::trim) {
        None | Some("") => Ok(vec![LanguageRange::wildcard()]),
        Some(value) => parse_languages(value),
    }
}
