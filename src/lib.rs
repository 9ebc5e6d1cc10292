//! # http-accept
//!
//! Parsing and negotiation of the HTTP `Accept`, `Accept-Charset`,
//! `Accept-Encoding` and `Accept-Language` headers
//! ([RFC 7231 §5.3](https://tools.ietf.org/html/rfc7231#section-5.3)).
//!
//! Every header parses into a list of preferences, most preferred first.
//! Preferences of equal quality keep the order the client sent them in.
//!
//! ```
//! let languages = http_accept::parse_languages("da, en-gb;q=0.8, en;q=0.7").unwrap();
//! assert_eq!(languages[0].locale(), "da");
//!
//! let media_types = http_accept::parse_media_types("text/html;q=0.5, application/json").unwrap();
//! assert_eq!(media_types[0].mime_type(), "application/json");
//! ```
//!
//! ## Negotiating
//!
//! A server declares what it can produce, and matches the client's
//! preferences against that: [`Locales`] for languages, [`Map`] for media
//! types.
//!
//! ```
//! use http_accept::{preferred_languages, preferred_media_types, Locales, Map};
//!
//! let locales = Locales::new(vec!["en-us", "en-nz", "en-au"]);
//! let languages = preferred_languages(Some("ja, en-au, en")).unwrap();
//! assert_eq!(locales.intersect(&languages), ["en-au", "en-us"]);
//!
//! let mut converters = Map::new();
//! converters.insert("text/html").insert("application/json");
//!
//! // no `Accept` header at all: the first converter is the default
//! let accept = preferred_media_types(None);
//! let (converter, _) = converters.resolve(&accept).unwrap();
//! assert_eq!(*converter, "text/html");
//! ```
//!
//! ## Missing and empty headers
//!
//! The `preferred_*` functions take the raw header value, `None` when the
//! request did not carry the header. A missing header always means
//! "anything". An empty header differs per header:
//!
//! - `Accept` and `Accept-Language`: anything.
//! - `Accept-Charset`: an error, at least one charset is required.
//! - `Accept-Encoding`: `identity` only.

#![doc(html_root_url = "https://docs.rs/http-accept/0.1.0")]
#![deny(missing_debug_implementations)]

#[cfg(feature = "serde1")]
extern crate serde1 as serde;

mod charset;
mod content_type;
mod encoding;
mod error;
mod language;
mod locales;
mod map;
mod media_range;
mod quality;
pub mod quoted_string;
#[cfg(feature = "serde1")]
mod serde_impl;

pub use self::charset::{parse_charsets, preferred_charsets, Charset};
pub use self::content_type::ContentType;
pub use self::encoding::{parse_encodings, preferred_encodings, ContentCoding};
pub use self::error::ParseError;
pub use self::language::{parse_languages, preferred_languages, LanguageRange};
pub use self::locales::{Iter, Locales};
pub use self::map::{AsMediaType, Map};
pub use self::media_range::{parse_media_types, parse_media_types_with, preferred_media_types, MediaRange};
pub use self::quality::{sort_by_quality, Quality, Weighted};

/// `Accept`
pub const ACCEPT: &str = "accept";
/// `Accept-Charset`
pub const ACCEPT_CHARSET: &str = "accept-charset";
/// `Accept-Encoding`
pub const ACCEPT_ENCODING: &str = "accept-encoding";
/// `Accept-Language`
pub const ACCEPT_LANGUAGE: &str = "accept-language";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_headers_accept_anything() {
        assert_eq!(preferred_media_types(None), [MediaRange::wildcard()]);
        assert_eq!(preferred_charsets(None).unwrap(), [Charset::wildcard()]);
        assert_eq!(preferred_encodings(None).unwrap(), [ContentCoding::wildcard()]);
        assert_eq!(preferred_languages(None).unwrap(), [LanguageRange::wildcard()]);
    }

    #[test]
    fn empty_headers_differ() {
        assert_eq!(preferred_media_types(Some("")), [MediaRange::wildcard()]);
        assert_eq!(preferred_languages(Some("")).unwrap(), [LanguageRange::wildcard()]);
        assert_eq!(preferred_encodings(Some("")).unwrap(), [ContentCoding::identity()]);
        assert!(preferred_charsets(Some("")).is_err());
    }

    #[test]
    fn malformed_headers_are_rejected_whole() {
        assert!(parse_charsets("utf-8, iso-8859-1;q=abc").is_err());
        assert!(parse_encodings("gzip, deflate;q=0.1234").is_err());
        assert!(parse_languages("en, en-gb;q=").is_err());
        assert!(parse_media_types("text/html, foo").is_err());
    }

    #[test]
    fn error_display() {
        let err = parse_media_types("foo").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid header value: a slash (/) was missing between the type and subtype"
        );

        let err = preferred_charsets(Some(" ")).unwrap_err();
        assert_eq!(err.to_string(), "invalid header value: at least one element is required");
    }

    #[test]
    fn negotiate_language() {
        let locales = Locales::new(vec!["en-us", "en-nz", "en-au"]);
        let languages = preferred_languages(Some("ja, en-au, en")).unwrap();
        assert_eq!(locales.intersect(&languages), ["en-au", "en-us"]);
    }

    #[test]
    fn negotiate_media_type() {
        let mut map = Map::new();
        map.insert("text/html").insert("text/plain");

        let accept = preferred_media_types(Some("text/plain, text/*, */*"));
        assert_eq!(map.resolve(&accept).map(|(h, _)| *h), Some("text/plain"));

        let accept = preferred_media_types(Some("text/*, */*"));
        assert_eq!(map.resolve(&accept).map(|(h, _)| *h), Some("text/html"));
    }
}
