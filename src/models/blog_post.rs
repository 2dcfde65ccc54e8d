use crate::sync::FeedEntry;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct BlogPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    pub link: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    pub guid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub link: String,
    pub published_date: DateTime<Utc>,
    pub description: String,
    pub guid: String,
}

impl From<&FeedEntry> for NewBlogPost {
    fn from(entry: &FeedEntry) -> Self {
        NewBlogPost {
            title: entry.title.clone(),
            link: entry.link.clone(),
            published_date: entry.published_date,
            description: entry.description.clone(),
            guid: entry.identifier().to_string(),
        }
    }
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// `timestamp` columns come back without an offset, `timestamptz` ones with it.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    if let Ok(date) = DateTime::parse_from_rfc3339(&value) {
        return Ok(date.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
