//! Nullable field deserialisation.

use serde::{Deserialize, Deserializer};

/// Tell an absent field (`None`) apart from an explicit `null` (`Some(None)`).
///
/// Only reached when the key is present, so pair it with `#[serde(default)]`.
pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
