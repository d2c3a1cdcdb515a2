//! Field helper for records the service may send with `null` values.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the type's default value.
///
/// `#[serde(default)]` only covers keys that are absent.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
