//! JSON wire codec for persisted records.
//!
//! Absent keys decode to the record's default value. Arrays written as
//! `null` by older ledgers decode as empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;

/// Decode a stored value, treating an absent or empty value as `T::default()`.
pub fn decode_or_default<T>(bytes: Option<&[u8]>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match bytes {
        None => Ok(T::default()),
        Some(b) if b.iter().all(u8::is_ascii_whitespace) => Ok(T::default()),
        Some(b) => Ok(serde_json::from_slice::<Option<T>>(b)?.unwrap_or_default()),
    }
}

/// Encode a record for storage.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Field deserializer mapping `null` to `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
