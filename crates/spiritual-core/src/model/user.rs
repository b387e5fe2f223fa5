use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::{Error, Result};

/// A registered account, keyed by its Google identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub google_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn apply(&mut self, update: &UserUpdate) {
        if let Some(first_name) = &update.first_name {
            self.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &update.last_name {
            self.last_name = Some(last_name.clone());
        }
        if let Some(picture) = &update.profile_picture {
            self.profile_picture = Some(picture.clone());
        }
    }
}

/// Fields supplied when a user signs in for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub google_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        require_text("username", &self.username)?;
        require_text("googleId", &self.google_id)?;
        if !self.email.contains('@') {
            return Err(Error::validation("email must be a valid address"));
        }
        Ok(())
    }

    pub(crate) fn into_user(self, id: i64, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            google_id: self.google_id,
            first_name: self.first_name,
            last_name: self.last_name,
            profile_picture: self.profile_picture,
            created_at,
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Public view of a user returned by the auth and profile endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            google_id: "g-1".to_string(),
            first_name: Some("Asha".to_string()),
            last_name: None,
            profile_picture: None,
        }
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut user = new_user();
        assert!(user.validate().is_ok());
        user.email = "not-an-email".to_string();
        assert!(matches!(user.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut user = new_user().into_user(1, Utc::now());
        user.apply(&UserUpdate {
            last_name: Some("Rao".to_string()),
            ..Default::default()
        });
        assert_eq!(user.first_name.as_deref(), Some("Asha"));
        assert_eq!(user.last_name.as_deref(), Some("Rao"));
    }

    #[test]
    fn test_profile_hides_google_id() {
        let user = new_user().into_user(7, Utc::now());
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["firstName"], "Asha");
        assert!(json.get("googleId").is_none());
    }
}
