//! Supported locales and text direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// A supported site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Turkish (default)
    Tr,
    /// English
    En,
    /// Arabic
    Ar,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Locale; 3] = [Locale::Tr, Locale::En, Locale::Ar];

    /// Locale used when a request carries none.
    pub const DEFAULT: Locale = Locale::Tr;

    /// Path segment / language tag for this locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::Ar => Direction::Rtl,
            Self::Tr | Self::En => Direction::Ltr,
        }
    }

    /// Exact, case-sensitive match of a path segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == segment)
    }

    /// Pick the first supported language from an `Accept-Language` header.
    ///
    /// Entries are taken in order of appearance; quality weights are not
    /// ranked. Region subtags are ignored (`en-GB` selects English).
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .filter_map(|entry| {
                let tag = entry.split(';').next()?.trim();
                let primary = tag.split(['-', '_']).next()?;
                Self::from_segment(&primary.to_ascii_lowercase())
            })
            .next()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segment(s).ok_or_else(|| Error::locale_not_found(s))
    }
}
