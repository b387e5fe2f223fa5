use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::{Error, Result};

/// Moderation state of a community contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl ContributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionStatus::Pending => "pending",
            ContributionStatus::Verified => "verified",
            ContributionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ContributionStatus::Pending),
            // Older seed data used "approved".
            "verified" | "approved" => Ok(ContributionStatus::Verified),
            "rejected" => Ok(ContributionStatus::Rejected),
            other => Err(Error::InvalidData(format!("unknown contribution status: {other}"))),
        }
    }
}

/// A user-submitted document or calendar awaiting moderation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub content: Option<String>,
    pub religion: String,
    /// Free-text festival tag; not a foreign key.
    pub festival: Option<String>,
    pub status: ContributionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contribution {
    /// Merge an update into the stored row. Does not touch `updated_at`.
    pub fn apply(&mut self, update: &ContributionUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(file_url) = &update.file_url {
            self.file_url = Some(file_url.clone());
        }
        if let Some(content) = &update.content {
            self.content = Some(content.clone());
        }
        if let Some(religion) = &update.religion {
            self.religion = religion.clone();
        }
        if let Some(festival) = &update.festival {
            self.festival = Some(festival.clone());
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub religion: String,
    #[serde(default)]
    pub festival: Option<String>,
    #[serde(default)]
    pub status: ContributionStatus,
}

impl NewContribution {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("religion", &self.religion)
    }

    pub(crate) fn into_contribution(self, id: i64, now: DateTime<Utc>) -> Contribution {
        Contribution {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            file_url: self.file_url,
            content: self.content,
            religion: self.religion,
            festival: self.festival,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub festival: Option<String>,
    #[serde(default)]
    pub status: Option<ContributionStatus>,
}

impl ContributionUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(religion) = &self.religion {
            require_text("religion", religion)?;
        }
        Ok(())
    }

    pub fn status(status: ContributionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
