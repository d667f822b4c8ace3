// ABOUTME: Serde helpers for partial-update payloads

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent key (outer `None`, via `#[serde(default)]`) from an
/// explicit `null` (`Some(None)`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
