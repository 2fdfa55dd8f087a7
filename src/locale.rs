//! Locale tags and ambient locale detection
//!
//! Tags are parsed leniently so that both BCP-47 (`en-US`) and POSIX
//! (`en_US.UTF-8`) spellings work. The ambient locale is read once at the
//! call boundary and handed to the formatters explicitly.

use std::fmt;
use std::str::FromStr;

use icu_locid::LanguageIdentifier;
use thiserror::Error;

/// Locale used when nothing else is configured
pub const DEFAULT_LOCALE: &str = "en-US";

/// Environment variables consulted for the ambient locale, in priority order
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("locale tag is empty")]
    Empty,
    #[error("invalid locale tag '{0}'")]
    Invalid(String),
}

/// A normalized language/region tag such as `en-US` or `tr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Parse a tag, accepting `_` separators and dropping POSIX suffixes
    pub fn parse(raw: &str) -> Result<Self, LocaleError> {
        let trimmed = raw.trim();
        // "en_US.UTF-8@euro" -> "en_US"
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();

        if base.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut parts = Vec::new();
        for (i, subtag) in base.split(['-', '_']).enumerate() {
            if subtag.is_empty() || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(LocaleError::Invalid(raw.to_string()));
            }

            let normalized = if i == 0 {
                if !(2..=8).contains(&subtag.len()) || !subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(LocaleError::Invalid(raw.to_string()));
                }
                subtag.to_ascii_lowercase()
            } else if subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                subtag.to_ascii_uppercase()
            } else if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                // Script subtag: "latn" -> "Latn"
                let mut script = subtag.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                script
            } else {
                subtag.to_string()
            };
            parts.push(normalized);
        }

        Ok(Self(parts.join("-")))
    }

    /// Pick the first usable locale: explicit argument, configured value, environment
    pub fn resolve(explicit: Option<&str>, configured: Option<&str>) -> Self {
        for candidate in [explicit, configured].into_iter().flatten() {
            match Self::parse(candidate) {
                Ok(tag) => return tag,
                Err(e) => tracing::warn!("Ignoring locale '{}': {}", candidate, e),
            }
        }
        Self::ambient()
    }

    /// Locale from the process environment (`LC_ALL`, `LC_MESSAGES`, `LANG`)
    pub fn ambient() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Ambient detection against an arbitrary variable lookup
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        for key in LOCALE_ENV_VARS {
            let Some(value) = lookup(key) else { continue };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if value == "C" || value == "POSIX" || value.starts_with("C.") {
                return Self::default();
            }
            match Self::parse(value) {
                Ok(tag) => return tag,
                Err(e) => tracing::debug!("Skipping {}={}: {}", key, value, e),
            }
        }
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-US`)
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// True when the tag starts with "en"
    pub fn is_english(&self) -> bool {
        self.0.starts_with("en")
    }

    /// ICU language identifier for case mapping; unknown tags map to `und`
    pub(crate) fn language_identifier(&self) -> LanguageIdentifier {
        self.0
            .parse::<LanguageIdentifier>()
            .or_else(|_| self.language().parse::<LanguageIdentifier>())
            .unwrap_or(LanguageIdentifier::UND)
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl FromStr for LocaleTag {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
