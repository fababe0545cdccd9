//! Serde helpers shared by the patch payloads.

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null` in a patch payload.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>`: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a string with surrounding whitespace removed.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_owned())
}

/// [`trimmed`] for optional patch fields. Pair with `#[serde(default)]`.
pub fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_owned()))
}
