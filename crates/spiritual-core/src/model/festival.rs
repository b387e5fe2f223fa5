use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::require_text;
use crate::error::{Error, Result};

/// A dated religious occasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub religion: String,
    pub date: NaiveDate,
    pub image_url: Option<String>,
    /// Mythology behind the festival, shown on the home page.
    pub story: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFestival {
    pub name: String,
    pub description: String,
    pub religion: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
}

impl NewFestival {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        require_text("religion", &self.religion)
    }

    pub(crate) fn into_festival(self, id: i64, created_at: DateTime<Utc>) -> Festival {
        Festival {
            id,
            name: self.name,
            description: self.description,
            religion: self.religion,
            date: self.date,
            image_url: self.image_url,
            story: self.story,
            created_at,
        }
    }
}

/// A guided procedure: materials to gather and ordered steps to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ritual {
    pub id: i64,
    pub festival_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub content: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub religion: String,
    pub verified: bool,
    pub contributor_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Ritual {
    pub fn apply(&mut self, update: &RitualUpdate) {
        if let Some(festival_id) = update.festival_id {
            self.festival_id = Some(festival_id);
        }
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(materials) = &update.materials {
            self.materials = materials.clone();
        }
        if let Some(steps) = &update.steps {
            self.steps = steps.clone();
        }
        if let Some(verified) = update.verified {
            self.verified = verified;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRitual {
    #[serde(default)]
    pub festival_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(deserialize_with = "steps_from_json")]
    pub steps: Vec<String>,
    pub religion: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub contributor_id: Option<i64>,
}

impl NewRitual {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("religion", &self.religion)?;
        if self.steps.iter().any(|step| step.trim().is_empty()) {
            return Err(Error::validation("ritual steps must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn into_ritual(self, id: i64, created_at: DateTime<Utc>) -> Ritual {
        Ritual {
            id,
            festival_id: self.festival_id,
            title: self.title,
            description: self.description,
            content: self.content,
            materials: self.materials,
            steps: self.steps,
            religion: self.religion,
            verified: self.verified,
            contributor_id: self.contributor_id,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualUpdate {
    #[serde(default)]
    pub festival_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub materials: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    #[serde(default)]
    pub verified: Option<bool>,
}

impl RitualUpdate {
    /// Present fields follow the same rules as [`NewRitual::validate`].
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(steps) = &self.steps {
            if steps.iter().any(|step| step.trim().is_empty()) {
                return Err(Error::validation("ritual steps must not be empty"));
            }
        }
        Ok(())
    }
}

/// A devotional song, referenced by an external video link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bhajan {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub religion: String,
    /// Display duration such as `5:28`.
    pub duration: Option<String>,
    pub festival_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBhajan {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub youtube_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub religion: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub festival_id: Option<i64>,
}

impl NewBhajan {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("type", &self.kind)?;
        require_text("religion", &self.religion)?;
        if !(self.youtube_url.starts_with("https://") || self.youtube_url.starts_with("http://")) {
            return Err(Error::validation("youtubeUrl must be an http(s) link"));
        }
        Ok(())
    }

    pub(crate) fn into_bhajan(self, id: i64, created_at: DateTime<Utc>) -> Bhajan {
        Bhajan {
            id,
            title: self.title,
            description: self.description,
            youtube_url: self.youtube_url,
            kind: self.kind,
            religion: self.religion,
            duration: self.duration,
            festival_id: self.festival_id,
            created_at,
        }
    }
}

/// Steps arrive either as a JSON array or as a string holding an encoded
/// array, which is how older clients and seed scripts submit them.
fn steps_from_json<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Steps {
        List(Vec<String>),
        Encoded(String),
    }

    match Steps::deserialize(deserializer)? {
        Steps::List(steps) => Ok(steps),
        Steps::Encoded(raw) => serde_json::from_str(&raw).map_err(serde::de::Error::custom),
    }
}
