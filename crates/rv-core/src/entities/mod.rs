//! Read-only snapshots of the records served by the rules API and the
//! static policies document.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Decoding
//! is lenient: `null` or missing collections and strings fall back to their
//! empty values so a malformed record degrades instead of failing the batch.

mod policy;
mod rule;
mod search_log;

pub use policy::{Answer, Policy, PolicyDocument};
pub use rule::{Bullet, Card, Rule, RulesResponse};
pub use search_log::SearchLogEntry;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
