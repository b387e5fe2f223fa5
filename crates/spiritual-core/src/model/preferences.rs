use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::{Error, Result};

/// Longest reminder window a user may choose.
pub const MAX_REMINDER_DAYS: i32 = 365;

/// Per-user settings, one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub id: i64,
    pub user_id: i64,
    pub primary_religion: String,
    pub secondary_interests: Vec<String>,
    pub languages: Vec<String>,
    pub festival_reminder_days: i32,
    pub notify_festivals: bool,
    pub notify_daily_content: bool,
    pub notify_new_content: bool,
    pub notify_community_updates: bool,
    pub notify_emails: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Merge an update into the stored row. Does not touch `updated_at`.
    pub fn apply(&mut self, update: &PreferencesUpdate) {
        self.primary_religion = update.primary_religion.clone();
        if let Some(interests) = &update.secondary_interests {
            self.secondary_interests = interests.clone();
        }
        if let Some(languages) = &update.languages {
            self.languages = languages.clone();
        }
        if let Some(days) = update.festival_reminder_days {
            self.festival_reminder_days = days;
        }
        if let Some(v) = update.notify_festivals {
            self.notify_festivals = v;
        }
        if let Some(v) = update.notify_daily_content {
            self.notify_daily_content = v;
        }
        if let Some(v) = update.notify_new_content {
            self.notify_new_content = v;
        }
        if let Some(v) = update.notify_community_updates {
            self.notify_community_updates = v;
        }
        if let Some(v) = update.notify_emails {
            self.notify_emails = v;
        }
    }
}

/// Insert form for a preferences row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPreferences {
    pub user_id: i64,
    pub primary_religion: String,
    pub secondary_interests: Vec<String>,
    pub languages: Vec<String>,
    pub festival_reminder_days: i32,
    pub notify_festivals: bool,
    pub notify_daily_content: bool,
    pub notify_new_content: bool,
    pub notify_community_updates: bool,
    pub notify_emails: bool,
}

impl NewPreferences {
    /// Settings given to a user at first sign-in.
    pub fn defaults_for(user_id: i64) -> Self {
        Self {
            user_id,
            primary_religion: "Hinduism".to_string(),
            secondary_interests: Vec::new(),
            languages: vec!["English".to_string()],
            festival_reminder_days: 3,
            notify_festivals: true,
            notify_daily_content: true,
            notify_new_content: true,
            notify_community_updates: false,
            notify_emails: true,
        }
    }

    /// Build a row from an update when the user has none yet. Fields the
    /// update leaves out take the column defaults.
    pub fn from_update(user_id: i64, update: &PreferencesUpdate) -> Self {
        Self {
            user_id,
            primary_religion: update.primary_religion.clone(),
            secondary_interests: update.secondary_interests.clone().unwrap_or_default(),
            languages: update.languages.clone().unwrap_or_default(),
            festival_reminder_days: update.festival_reminder_days.unwrap_or(1),
            notify_festivals: update.notify_festivals.unwrap_or(true),
            notify_daily_content: update.notify_daily_content.unwrap_or(true),
            notify_new_content: update.notify_new_content.unwrap_or(true),
            notify_community_updates: update.notify_community_updates.unwrap_or(false),
            notify_emails: update.notify_emails.unwrap_or(true),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("primaryReligion", &self.primary_religion)?;
        validate_reminder_days(self.festival_reminder_days)
    }

    pub(crate) fn into_preferences(self, id: i64, now: DateTime<Utc>) -> UserPreferences {
        UserPreferences {
            id,
            user_id: self.user_id,
            primary_religion: self.primary_religion,
            secondary_interests: self.secondary_interests,
            languages: self.languages,
            festival_reminder_days: self.festival_reminder_days,
            notify_festivals: self.notify_festivals,
            notify_daily_content: self.notify_daily_content,
            notify_new_content: self.notify_new_content,
            notify_community_updates: self.notify_community_updates,
            notify_emails: self.notify_emails,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /api/preferences`. Only the primary religion is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub primary_religion: String,
    #[serde(default)]
    pub secondary_interests: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub festival_reminder_days: Option<i32>,
    #[serde(default)]
    pub notify_festivals: Option<bool>,
    #[serde(default)]
    pub notify_daily_content: Option<bool>,
    #[serde(default)]
    pub notify_new_content: Option<bool>,
    #[serde(default)]
    pub notify_community_updates: Option<bool>,
    #[serde(default)]
    pub notify_emails: Option<bool>,
}

impl PreferencesUpdate {
    pub fn new(primary_religion: impl Into<String>) -> Self {
        Self {
            primary_religion: primary_religion.into(),
            secondary_interests: None,
            languages: None,
            festival_reminder_days: None,
            notify_festivals: None,
            notify_daily_content: None,
            notify_new_content: None,
            notify_community_updates: None,
            notify_emails: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("primaryReligion", &self.primary_religion)?;
        match self.festival_reminder_days {
            Some(days) => validate_reminder_days(days),
            None => Ok(()),
        }
    }
}

fn validate_reminder_days(days: i32) -> Result<()> {
    if !(0..=MAX_REMINDER_DAYS).contains(&days) {
        return Err(Error::validation(format!(
            "festivalReminderDays must be between 0 and {MAX_REMINDER_DAYS}"
        )));
    }
    Ok(())
}
