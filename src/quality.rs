use std::fmt;

use accept_parse::QUALITY_SCALE;

/// A quality factor (`q`), the relative weight of a preference.
///
/// Stored as an integer number of millionths, so the six decimal digits an
/// `Accept-Language` weight may carry are kept exactly and qualities have a
/// total order.
///
/// # Example
///
/// ```
/// use http_accept::Quality;
///
/// assert_eq!(Quality::default(), Quality::ONE);
/// assert_eq!(Quality::from_f32(0.5).to_string(), "0.5");
/// assert!(Quality::ONE > Quality::from_f32(0.999));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u32);

impl Quality {
    /// The most preferred quality, `q=1`.
    pub const ONE: Quality = Quality(QUALITY_SCALE);

    /// "Not acceptable", `q=0`.
    pub const ZERO: Quality = Quality(0);

    pub(crate) fn from_millionths(millionths: u32) -> Quality {
        debug_assert!(millionths <= QUALITY_SCALE, "quality above 1");
        Quality(millionths)
    }

    /// Creates a quality from a float, clamped into `[0, 1]` and rounded
    /// to six decimal digits. `NaN` becomes `0`.
    pub fn from_f32(value: f32) -> Quality {
        Quality::from_f64(f64::from(value))
    }

    pub(crate) fn from_f64(value: f64) -> Quality {
        if value.is_nan() {
            return Quality::ZERO;
        }
        let clamped = value.max(0.0).min(1.0);
        Quality((clamped * f64::from(QUALITY_SCALE)).round() as u32)
    }

    /// Returns this quality as a float in `[0, 1]`.
    pub fn as_f32(self) -> f32 {
        (f64::from(self.0) / f64::from(QUALITY_SCALE)) as f32
    }
}

impl Default for Quality {
    fn default() -> Quality {
        Quality::ONE
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let whole = self.0 / QUALITY_SCALE;
        let fraction = self.0 % QUALITY_SCALE;
        if fraction == 0 {
            return write!(f, "{}", whole);
        }

        let digits = format!("{:06}", fraction);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

/// Anything carrying a quality factor.
pub trait Weighted {
    /// The weight of this preference, `1` when none was given.
    fn quality(&self) -> Quality;
}

impl<'a, T: Weighted + ?Sized> Weighted for &'a T {
    fn quality(&self) -> Quality {
        (**self).quality()
    }
}

/// Orders preferences by descending quality.
///
/// The sort is stable: preferences of equal quality keep the order they
/// were given in.
///
/// # Example
///
/// ```
/// let languages = http_accept::parse_languages("en, de;q=0.5, jp;q=0.5").unwrap();
/// let sorted = http_accept::sort_by_quality(languages.iter().rev());
///
/// let locales: Vec<_> = sorted.iter().map(|l| l.locale()).collect();
/// assert_eq!(locales, ["en", "jp", "de"]);
/// ```
pub fn sort_by_quality<T, I>(items: I) -> Vec<T>
where
    T: Weighted,
    I: IntoIterator<Item = T>,
{
    let mut items: Vec<T> = items.into_iter().collect();
    // `sort_by` is a stable merge sort.
    items.sort_by(|a, b| b.quality().cmp(&a.quality()));
    items
}
