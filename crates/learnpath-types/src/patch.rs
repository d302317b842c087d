//! Serde support for tri-state write fields.
//!
//! A nullable column in an `Insert` or `Update` is `Option<Option<T>>`:
//! `None` leaves the column to the database and is skipped on the wire,
//! `Some(None)` writes `null`, `Some(Some(v))` writes `v`. Plain serde
//! collapses a present `null` into `None`, so deserialization goes through
//! [`nullable`].

use serde::{Deserialize, Deserializer};

/// Deserializes a present key (even `null`) into `Some(..)`.
///
/// Pair it with `#[serde(default)]` so an absent key stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
