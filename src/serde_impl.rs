use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, SeqAccess};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::{ContentType, Locales, MediaRange};

impl Serialize for MediaRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MediaRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(FromStrVisitor::new("a valid media range"))
    }
}

impl Serialize for ContentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(FromStrVisitor::new("a valid media type"))
    }
}

struct FromStrVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<T> FromStrVisitor<T> {
    fn new(expecting: &'static str) -> FromStrVisitor<T> {
        FromStrVisitor {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, T> de::Visitor<'de> for FromStrVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E>(self, value: &str) -> Result<T, E>
    where
        E: de::Error,
    {
        T::from_str(value).map_err(E::custom)
    }
}

impl Serialize for Locales {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for name in self {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Locales {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Locales;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of locale tags")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Locales, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut names: Vec<String> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(name) = seq.next_element()? {
                    names.push(name);
                }
                Ok(Locales::new(names))
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use super::*;

    #[test]
    fn media_range_tokens() {
        let range = MediaRange::new("text", "html").with_param("q", "0.5");
        assert_tokens(&range, &[Token::Str("text/html; q=0.5")]);
    }

    #[test]
    fn content_type_tokens() {
        let content_type = ContentType::new("text", "plain").unwrap().with_param("charset", "utf-8");
        assert_tokens(&content_type, &[Token::Str("text/plain; charset=utf-8")]);
    }

    #[test]
    fn content_type_rejects_wildcards() {
        assert_de_tokens_error::<ContentType>(
            &[Token::Str("text/*")],
            "invalid header value: unexpected asterisk",
        );
    }

    #[test]
    fn locales_tokens() {
        let locales = Locales::new(vec!["en-us", "de"]);
        assert_tokens(
            &locales,
            &[
                Token::Seq { len: Some(2) },
                Token::Str("en-us"),
                Token::Str("de"),
                Token::SeqEnd,
            ],
        );
    }
}
