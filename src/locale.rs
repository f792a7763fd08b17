//! Languages the catalog serves movie data in.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Languages the catalog can be served in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Turkish.
    Tr,
}

impl Locale {
    /// Picks a locale from a BCP 47 language tag such as `tr-TR` or `en-US`.
    ///
    /// Anything that isn't Turkish falls back to English.
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("tr") {
            Self::Tr
        } else {
            Self::En
        }
    }

    /// Value sent as the `lang` query parameter.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
