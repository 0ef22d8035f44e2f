//! Deserializers for form fields that clients send either as text or as numbers.
//!
//! Web forms often run numeric inputs through `parseInt` before posting, so the same field
//! arrives as `"42"` from one client and `42` from another.

use serde::{de::Error, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Optional text that may arrive as a JSON number, e.g. a phone number.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }),
    )
}

/// Optional non-negative whole number that may arrive as a numeric string. Blank text is
/// treated as absent.
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TextOrNumber::Integer(n)) => u32::try_from(n).map(Some).map_err(|_| {
            D::Error::custom(format!("expected a non-negative whole number, got {}", n))
        }),
        Some(TextOrNumber::Float(n)) => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            n
        ))),
        Some(TextOrNumber::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<u32>().map(Some).map_err(|_| {
                D::Error::custom(format!("expected a non-negative whole number, got '{}'", text))
            })
        }
    }
}
