//! Cake entity and its request payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Cake record as stored in the `cakes` table and returned over HTTP.
///
/// Timestamps are decoded with the driver's native `TIMESTAMPTZ` support, so a
/// malformed value is a row decode error rather than a silent zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Cake {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub rating: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Never written by this service; delete removes the row instead.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Client-supplied cake fields for create and update.
///
/// Missing or `null` fields decode to zero values. Store-owned fields (`id`
/// and the timestamps) are not part of the payload and are dropped if sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeInput {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    pub image: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
