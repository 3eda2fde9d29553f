//! Shared data types for the directory.

use serde::{Deserialize, Serialize};

/// The category sentinel that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A news source listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub website: String,
    /// Open-ended category, compared case-insensitively.
    #[serde(rename = "type")]
    pub kind: String,
    /// Logo URL. When missing, a favicon is derived from the website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Empty when the static file omits it; filled in by the catalog loader.
    #[serde(default)]
    pub language: String,
}

impl Entry {
    /// Lower-cased category used for every comparison.
    pub fn category(&self) -> String {
        self.kind.to_lowercase()
    }
}

/// Language of a catalog instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Hindi,
    Malayalam,
}

impl Language {
    /// Name stamped on entries of this catalog.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Hindi => "Hindi",
            Language::Malayalam => "Malayalam",
        }
    }

    /// File holding the static catalog for this language.
    pub fn data_file(&self) -> &'static str {
        match self {
            Language::Hindi => "hi.json",
            Language::Malayalam => "ml.json",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hindi" | "hi" => Ok(Language::Hindi),
            "malayalam" | "ml" => Ok(Language::Malayalam),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// Colour scheme preference, persisted under the `theme` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value; anything unrecognised falls back to light.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Session-scoped filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub category: String,
    pub search: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

/// Which subset of the catalog is currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Category and search filters apply.
    #[default]
    Filtered,
    /// Only favorited entries, filters ignored.
    Favorites,
}
