//! Shared enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Content-depth tier of an author page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Discover,
    Research,
    Material,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Discover => "discover",
            Level::Research => "research",
            Level::Material => "material",
        }
    }

    pub fn all() -> &'static [Level] {
        &[Level::Discover, Level::Research, Level::Material]
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Discover
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discover" => Ok(Level::Discover),
            "research" => Ok(Level::Research),
            "material" => Ok(Level::Material),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// Delivery language of the content API and the UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
    Cs,
}

impl Language {
    /// Two-letter code used in API paths.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Cs => "cs",
        }
    }

    /// Name of the language in that language, for language pickers.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::De => "Deutsch",
            Language::Cs => "Česky",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::En, Language::De, Language::Cs]
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::De
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown language code: {0}")]
pub struct ParseLanguageError(pub String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            "cs" => Ok(Language::Cs),
            other => Err(ParseLanguageError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_roundtrips_through_str() {
        for level in Level::all() {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), *level);
        }
    }

    #[test]
    fn test_level_default_is_discover() {
        assert_eq!(Level::default(), Level::Discover);
    }

    #[test]
    fn test_level_rejects_unknown() {
        assert!("overview".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Level::Research).unwrap(),
            "\"research\""
        );
    }

    #[test]
    fn test_language_codes() {
        for language in Language::all() {
            assert_eq!(language.code().parse::<Language>().unwrap(), *language);
        }
    }

    #[test]
    fn test_language_default_is_german() {
        assert_eq!(Language::default(), Language::De);
    }
}
