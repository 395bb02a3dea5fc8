//! Core tag domain types.

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, database_id::DatabaseID};

/// Database identifier for a tag.
pub type TagId = DatabaseID;

/// The maximum length of a tag name in bytes.
pub const MAX_TAG_NAME_LENGTH: usize = 256;

/// A validated, non-empty tag name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a tag name.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTagName] if `name` is an
    /// empty string, or [Error::TagNameTooLong] if the trimmed name is longer
    /// than [MAX_TAG_NAME_LENGTH] bytes.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyTagName)
        } else if name.len() > MAX_TAG_NAME_LENGTH {
            Err(Error::TagNameTooLong)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a tag name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::new(s)
    }
}

impl Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The display color assigned to new tags that do not specify one.
pub const DEFAULT_TAG_COLOR: &str = "d0d0d0";

/// A six-digit hex color for rendering a tag badge.
///
/// Stored without a leading `#`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagColor(String);

impl TagColor {
    /// Create a tag color from a six-digit hex string, with or without a
    /// leading `#`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidTagColor] if `color` is
    /// not exactly six hex digits.
    pub fn new(color: &str) -> Result<Self, Error> {
        let digits = color.trim().trim_start_matches('#');

        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(digits.to_lowercase()))
        } else {
            Err(Error::InvalidTagColor(color.to_string()))
        }
    }

    /// Create a tag color without validation.
    ///
    /// The caller should ensure that the string is six hex digits.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_string())
    }
}

impl Default for TagColor {
    fn default() -> Self {
        Self(DEFAULT_TAG_COLOR.to_string())
    }
}

impl AsRef<str> for TagColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TagColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named element of the tag universe.
///
/// Two tags are equal iff their IDs are equal, so renaming or recoloring a
/// tag does not change its identity.
#[derive(Debug, Clone, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
    pub color: TagColor,
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Form data for tag creation and editing.
#[derive(Debug, Deserialize)]
pub struct TagFormData {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Comma-separated names of supertags that should include this tag.
    #[serde(default)]
    pub supertags: Option<String>,
}
