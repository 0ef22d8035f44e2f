//! # Ward Types
//!
//! Validated primitives shared by the ward allocation crates.
//!
//! - [`NonEmptyText`]: trimmed text with at least one non-whitespace character
//! - [`PatientId`]: opaque patient identifier held by beds and queues
//! - [`WardType`]: the built-in wards plus arbitrary named wards from a ward plan

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Opaque identifier of a patient waiting for, or occupying, a bed.
///
/// Patient identifiers are not interpreted; the same identifier may legitimately appear
/// more than once in a queue (for example, a re-admission).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PatientId(NonEmptyText);

impl PatientId {
    /// Creates a patient identifier from non-empty text.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        NonEmptyText::new(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyText> for PatientId {
    fn from(text: NonEmptyText) -> Self {
        Self(text)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PatientId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Category of beds.
///
/// The three built-in wards are always recognised (case-insensitively, and `Paediatric` is
/// accepted as a spelling of `Pediatric`). Any other non-empty name is a [`WardType::Named`]
/// ward, as created when onboarding a hospital with its own ward list.
///
/// Equality and hashing go through [`WardType::as_str`], so `Named("ICU")` and `Icu` compare
/// equal even if a caller bypasses [`WardType::parse`].
#[derive(Debug, Clone)]
pub enum WardType {
    Icu,
    General,
    Pediatric,
    Named(NonEmptyText),
}

impl WardType {
    /// The built-in wards, in the order a default hospital declares them.
    pub const BUILT_IN: [WardType; 3] = [WardType::Icu, WardType::General, WardType::Pediatric];

    /// Parses a ward name.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the name is empty or whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let name = NonEmptyText::new(input)?;
        let ward = match name.as_str().to_ascii_lowercase().as_str() {
            "icu" => WardType::Icu,
            "general" => WardType::General,
            "pediatric" | "paediatric" => WardType::Pediatric,
            _ => WardType::Named(name),
        };
        Ok(ward)
    }

    /// Display name of the ward.
    pub fn as_str(&self) -> &str {
        match self {
            WardType::Icu => "ICU",
            WardType::General => "General",
            WardType::Pediatric => "Pediatric",
            WardType::Named(name) => name.as_str(),
        }
    }
}

impl PartialEq for WardType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for WardType {}

impl Hash for WardType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for WardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WardType {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for WardType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for WardType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WardType::parse(&s).map_err(serde::de::Error::custom)
    }
}
