use std::borrow::Cow;
use std::collections::HashMap;

use crate::{ContentType, MediaRange};

/// Something that names a media type, as a `(type, subtype)` pair.
///
/// Handlers stored in a [`Map`] implement this to say what they produce,
/// and client preferences implement it to say what they ask for.
pub trait AsMediaType {
    fn media_type(&self) -> (&str, &str);
}

impl AsMediaType for MediaRange {
    fn media_type(&self) -> (&str, &str) {
        (self.type_(), self.subtype())
    }
}

impl AsMediaType for ContentType {
    fn media_type(&self) -> (&str, &str) {
        (self.type_(), self.subtype())
    }
}

/// `"type/subtype"`, ignoring any parameters. A missing subtype is `*`.
impl AsMediaType for str {
    fn media_type(&self) -> (&str, &str) {
        let essence = match self.find(';') {
            Some(i) => &self[..i],
            None => self,
        };
        let essence = essence.trim();

        match essence.find('/') {
            Some(i) => (&essence[..i], &essence[i + 1..]),
            None => (essence, "*"),
        }
    }
}

impl AsMediaType for String {
    fn media_type(&self) -> (&str, &str) {
        self.as_str().media_type()
    }
}

impl<'a, T: AsMediaType + ?Sized> AsMediaType for &'a T {
    fn media_type(&self) -> (&str, &str) {
        (**self).media_type()
    }
}

/// Dispatches negotiated media types to handlers.
///
/// Wildcard keys are filled in as handlers are inserted: the first handler
/// becomes the default for `*/*`, and the first handler of each type the
/// default for `type/*`. Resolving a client's preferences is then a direct
/// lookup per preference.
///
/// Build the map once, then share it by reference; it is only changed
/// through `&mut self`.
///
/// # Example
///
/// ```
/// use http_accept::{parse_media_types, Map};
///
/// let mut map = Map::new();
/// map.insert("text/html").insert("application/json");
///
/// let accept = parse_media_types("application/xml, text/*;q=0.5").unwrap();
/// let (handler, range) = map.resolve(&accept).unwrap();
///
/// assert_eq!(*handler, "text/html");
/// assert_eq!(range.mime_type(), "text/*");
/// ```
#[derive(Clone, Debug)]
pub struct Map<T> {
    handlers: Vec<T>,
    // type -> subtype -> index into `handlers`
    types: HashMap<String, HashMap<String, usize>>,
}

impl<T> Map<T> {
    pub fn new() -> Map<T> {
        Map {
            handlers: Vec::new(),
            types: HashMap::new(),
        }
    }

    /// Binds `handler` to the media type it produces, and to `type/*` and
    /// `*/*` if those are still free.
    ///
    /// Keys that are already bound are never replaced here; use
    /// [`set`](Map::set) to overwrite one.
    pub fn insert(&mut self, handler: T) -> &mut Map<T>
    where
        T: AsMediaType,
    {
        let (type_, subtype) = lower(handler.media_type());
        let (type_, subtype) = (type_.into_owned(), subtype.into_owned());
        let index = self.handlers.len();
        let mut bound = false;

        if self.is_empty() {
            bound |= self.bind("*", "*", index);
        }
        if type_ != "*" {
            bound |= self.bind(&type_, "*", index);
        }
        if subtype != "*" {
            bound |= self.bind(&type_, &subtype, index);
        }

        if bound {
            self.handlers.push(handler);
        } else {
            tracing::trace!(type_ = %type_, subtype = %subtype, "handler shadowed by earlier insertions");
        }

        self
    }

    /// Binds `handler` to exactly `key`, replacing any handler bound there.
    ///
    /// No wildcard keys are filled in.
    pub fn set<K>(&mut self, key: &K, handler: T) -> &mut Map<T>
    where
        K: AsMediaType + ?Sized,
    {
        let (type_, subtype) = lower(key.media_type());
        let index = self.handlers.len();
        self.handlers.push(handler);

        self.types
            .entry(type_.into_owned())
            .or_insert_with(HashMap::new)
            .insert(subtype.into_owned(), index);

        self
    }

    /// Returns the handler bound to exactly `key`.
    ///
    /// ```
    /// let mut map = http_accept::Map::new();
    /// map.insert("text/html");
    ///
    /// assert_eq!(map.get("text/html"), Some(&"text/html"));
    /// assert_eq!(map.get("text/*"), Some(&"text/html"));
    /// assert_eq!(map.get("text/plain"), None);
    /// ```
    pub fn get<K>(&self, key: &K) -> Option<&T>
    where
        K: AsMediaType + ?Sized,
    {
        let (type_, subtype) = lower(key.media_type());
        let index = *self.types.get(&*type_)?.get(&*subtype)?;
        self.handlers.get(index)
    }

    /// Finds the handler for the first preference that has one.
    ///
    /// `preferences` should already be ordered best first, as returned by
    /// [`parse_media_types`](crate::parse_media_types). Each preference is
    /// looked up by its exact `type/subtype`, so `text/*` only matches the
    /// `text/*` key filled in by [`insert`](Map::insert). Returns the
    /// handler and the preference that selected it, or `None` when nothing
    /// is acceptable.
    pub fn resolve<'r, I, R>(&self, preferences: I) -> Option<(&T, &'r R)>
    where
        I: IntoIterator<Item = &'r R>,
        R: AsMediaType + ?Sized + 'r,
    {
        for preference in preferences {
            if let Some(handler) = self.get(preference) {
                let (type_, subtype) = preference.media_type();
                tracing::trace!(type_, subtype, "resolved media type");
                return Some((handler, preference));
            }
        }

        None
    }

    /// The number of bound keys, wildcards included.
    pub fn len(&self) -> usize {
        self.types.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn bind(&mut self, type_: &str, subtype: &str, index: usize) -> bool {
        let subtypes = self.types.entry(type_.to_owned()).or_insert_with(HashMap::new);
        if subtypes.contains_key(subtype) {
            return false;
        }
        subtypes.insert(subtype.to_owned(), index);
        true
    }
}

impl<T> Default for Map<T> {
    fn default() -> Map<T> {
        Map::new()
    }
}

fn lower<'a>((type_, subtype): (&'a str, &'a str)) -> (Cow<'a, str>, Cow<'a, str>) {
    (lower_str(type_), lower_str(subtype))
}

fn lower_str(s: &str) -> Cow<str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}
