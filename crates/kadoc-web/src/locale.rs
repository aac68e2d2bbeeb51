use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WebError;
use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }
}

impl FromStr for Locale {
    type Err = WebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| WebError::UnknownLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale named by the first path segment, if any.
pub fn locale_prefix(location: &Location) -> Option<Locale> {
    location.segments().first().and_then(|s| s.parse().ok())
}

/// `location` with its locale prefix set to `locale`. A path without a
/// prefix gains one; the rest of the path and the query are kept.
pub fn switch_locale(location: &Location, locale: Locale) -> Location {
    let mut segments = location.segments();
    if locale_prefix(location).is_some() {
        segments.remove(0);
    }
    let path = Location::from_segments(
        std::iter::once(locale.as_str()).chain(segments.iter().map(String::as_str)),
    );
    location.with_path_of(&path)
}
