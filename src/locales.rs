use std::collections::HashMap;
use std::iter::FromIterator;
use std::ops::Add;
use std::slice;

use crate::LanguageRange;

/// The set of locales a server can respond in, in the server's own order
/// of priority.
///
/// Every declared tag is expanded into all of its prefixes, each pointing
/// at the first declared tag that generalizes to it. Matching a client's
/// `Accept-Language` against the set is then one lookup per language range
/// ([RFC 4647 §2.3](https://tools.ietf.org/html/rfc4647#section-2.3)
/// "lookup" matching).
///
/// A `Locales` is not changed after construction. Share it between
/// requests by reference; building a new set is the only way to change it.
///
/// # Example
///
/// ```
/// use http_accept::{parse_languages, Locales};
///
/// // Provided by the server, the localizations that actually exist:
/// let locales = Locales::new(vec!["en-us", "en-nz", "en-au"]);
///
/// // Provided by the client:
/// let languages = parse_languages("ja, en-au, en").unwrap();
///
/// // The localized content which is best for this user:
/// assert_eq!(locales.intersect(&languages), ["en-au", "en-us"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Locales {
    names: Vec<String>,
    // lower-cased prefix -> index into `names`
    patterns: HashMap<String, usize>,
}

impl Locales {
    /// Creates a set from locale tags given in order of priority.
    pub fn new<I, S>(names: I) -> Locales
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut patterns = HashMap::new();

        for (index, name) in names.iter().enumerate() {
            expand(&mut patterns, name, index);
        }

        Locales { names, patterns }
    }

    /// The declared locale tags, in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> Iter {
        Iter {
            inner: self.names.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns whether `locale` is a declared tag or a prefix of one.
    ///
    /// ```
    /// let locales = http_accept::Locales::new(vec!["en-us"]);
    ///
    /// assert!(locales.contains("en-us"));
    /// assert!(locales.contains("EN"));
    /// assert!(!locales.contains("en-gb"));
    /// ```
    pub fn contains(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    /// Returns the first declared tag that `locale` is equal to, or is a
    /// prefix of.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.patterns
            .get(&locale.to_ascii_lowercase())
            .map(|&index| self.names[index].as_str())
    }

    /// Returns the declared tags matching the client's language ranges,
    /// best first.
    ///
    /// `languages` should already be ordered by preference, as returned by
    /// [`parse_languages`](crate::parse_languages). Ranges that match
    /// nothing are skipped; no further sorting happens here.
    pub fn intersect<'a, I>(&self, languages: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a LanguageRange>,
    {
        languages
            .into_iter()
            .filter_map(|language| self.get(language.locale()))
            .collect()
    }

    /// Returns a new set with `other`'s tags after this set's tags.
    ///
    /// Tags of `other` never take over a prefix already claimed by a tag of
    /// `self`.
    pub fn union(&self, other: &Locales) -> Locales {
        Locales::new(self.names.iter().chain(other.names.iter()).cloned())
    }

    /// Joins the declared tags with `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.names.join(sep)
    }
}

fn expand(patterns: &mut HashMap<String, usize>, name: &str, index: usize) {
    let lower = name.to_ascii_lowercase();
    let mut prefix = lower.as_str();

    loop {
        patterns.entry(prefix.to_owned()).or_insert(index);

        match prefix.rfind('-') {
            Some(i) => prefix = &prefix[..i],
            None => break,
        }
    }
}

impl PartialEq for Locales {
    fn eq(&self, other: &Locales) -> bool {
        self.names == other.names
    }
}

impl Eq for Locales {}

impl<'a> Add<&'a Locales> for &'a Locales {
    type Output = Locales;

    fn add(self, other: &'a Locales) -> Locales {
        self.union(other)
    }
}

impl Add for Locales {
    type Output = Locales;

    fn add(mut self, other: Locales) -> Locales {
        self.names.extend(other.names);
        Locales::new(self.names)
    }
}

impl<S: Into<String>> FromIterator<S> for Locales {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Locales {
        Locales::new(iter)
    }
}

impl<'a> IntoIterator for &'a Locales {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over the declared tags of a [`Locales`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(String::as_str)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}
