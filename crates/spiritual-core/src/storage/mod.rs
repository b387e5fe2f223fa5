//! Storage layer.
//!
//! [`Storage`] is the repository interface the HTTP layer talks to. Two
//! backends implement it with identical semantics:
//!
//! - [`MemStorage`]: map-based tables behind a lock, used for development
//!   and tests.
//! - [`SqliteStorage`]: a relational schema with unique and foreign key
//!   constraints enforced by SQLite.
//!
//! Lookups return `Ok(None)` for missing rows; updates return `Ok(None)` when
//! the row to update does not exist. Constraint violations surface as
//! [`Error::Conflict`](crate::Error::Conflict).

mod memory;
mod sqlite;

pub use memory::MemStorage;
pub use sqlite::SqliteStorage;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{
    Bhajan, Contribution, ContributionUpdate, Festival, NewBhajan, NewContribution, NewFestival,
    NewPreferences, NewRitual, NewUser, PreferencesUpdate, Ritual, RitualUpdate, User, UserPreferences,
    UserUpdate,
};

/// Repository interface shared by every backend.
pub trait Storage: Send + Sync {
    // Users
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>>;
    fn create_user(&self, user: NewUser) -> Result<User>;
    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>>;

    // Preferences
    fn get_user_preferences(&self, user_id: i64) -> Result<Option<UserPreferences>>;
    fn create_user_preferences(&self, preferences: NewPreferences) -> Result<UserPreferences>;
    fn update_user_preferences(
        &self,
        id: i64,
        update: &PreferencesUpdate,
    ) -> Result<Option<UserPreferences>>;

    // Festivals
    fn get_festival(&self, id: i64) -> Result<Option<Festival>>;
    /// Festivals falling on the given calendar day.
    fn get_festivals_by_date(&self, date: NaiveDate) -> Result<Vec<Festival>>;
    fn get_festivals_by_religion(&self, religion: &str) -> Result<Vec<Festival>>;
    fn get_all_festivals(&self) -> Result<Vec<Festival>>;
    /// Festivals of `religion` dated on or after `from`, soonest first.
    fn get_upcoming_festivals(
        &self,
        religion: &str,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Festival>>;
    /// Festivals of `religion` dated within `from..=to`, soonest first.
    fn get_festivals_between(
        &self,
        religion: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Festival>>;
    fn create_festival(&self, festival: NewFestival) -> Result<Festival>;

    // Rituals
    fn get_ritual(&self, id: i64) -> Result<Option<Ritual>>;
    fn get_rituals_by_festival(&self, festival_id: i64) -> Result<Vec<Ritual>>;
    fn get_rituals_by_religion(&self, religion: &str) -> Result<Vec<Ritual>>;
    fn create_ritual(&self, ritual: NewRitual) -> Result<Ritual>;
    fn update_ritual(&self, id: i64, update: &RitualUpdate) -> Result<Option<Ritual>>;

    // Bhajans
    fn get_bhajan(&self, id: i64) -> Result<Option<Bhajan>>;
    fn get_bhajans_by_festival(&self, festival_id: i64) -> Result<Vec<Bhajan>>;
    fn create_bhajan(&self, bhajan: NewBhajan) -> Result<Bhajan>;

    // Contributions
    fn get_contribution(&self, id: i64) -> Result<Option<Contribution>>;
    /// A user's contributions, newest first.
    fn get_contributions_by_user(&self, user_id: i64) -> Result<Vec<Contribution>>;
    fn create_contribution(&self, contribution: NewContribution) -> Result<Contribution>;
    fn update_contribution(
        &self,
        id: i64,
        update: &ContributionUpdate,
    ) -> Result<Option<Contribution>>;
}

#[cfg(test)]
pub(crate) mod conformance {
    //! Behaviour every backend must share. Each backend's test module runs
    //! these against a fresh instance.

    use super::*;
    use crate::error::Error;
    use crate::model::ContributionStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn new_user(tag: &str) -> NewUser {
        NewUser {
            username: format!("user-{tag}"),
            email: format!("{tag}@example.com"),
            google_id: format!("google-{tag}"),
            first_name: Some("Test".to_string()),
            last_name: None,
            profile_picture: None,
        }
    }

    pub fn new_festival(name: &str, religion: &str, on: NaiveDate) -> NewFestival {
        NewFestival {
            name: name.to_string(),
            description: format!("{name} description"),
            religion: religion.to_string(),
            date: on,
            image_url: None,
            story: Some(format!("The story of {name}")),
        }
    }

    pub fn user_roundtrip(storage: &dyn Storage) {
        let user = storage.create_user(new_user("asha")).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(storage.get_user(user.id).unwrap(), Some(user.clone()));
        assert_eq!(storage.get_user_by_email("asha@example.com").unwrap(), Some(user.clone()));
        assert_eq!(storage.get_user_by_google_id("google-asha").unwrap(), Some(user.clone()));
        assert_eq!(storage.get_user(99).unwrap(), None);

        let updated = storage
            .update_user(
                user.id,
                &UserUpdate {
                    last_name: Some("Rao".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Test"));
        assert_eq!(updated.last_name.as_deref(), Some("Rao"));
        assert_eq!(storage.update_user(42, &UserUpdate::default()).unwrap(), None);
    }

    pub fn user_uniqueness(storage: &dyn Storage) {
        storage.create_user(new_user("dup")).unwrap();

        let mut same_email = new_user("other");
        same_email.email = "dup@example.com".to_string();
        assert!(matches!(storage.create_user(same_email), Err(Error::Conflict(_))));

        let mut same_google = new_user("third");
        same_google.google_id = "google-dup".to_string();
        assert!(matches!(storage.create_user(same_google), Err(Error::Conflict(_))));
    }

    pub fn preferences_lifecycle(storage: &dyn Storage) {
        let user = storage.create_user(new_user("pref")).unwrap();
        assert_eq!(storage.get_user_preferences(user.id).unwrap(), None);

        let created = storage
            .create_user_preferences(NewPreferences::defaults_for(user.id))
            .unwrap();
        assert_eq!(created.primary_religion, "Hinduism");
        assert_eq!(created.languages, vec!["English".to_string()]);

        let mut update = PreferencesUpdate::new("Buddhism");
        update.secondary_interests = Some(vec!["yoga".to_string()]);
        let first = storage.update_user_preferences(created.id, &update).unwrap().unwrap();
        let second = storage.update_user_preferences(created.id, &update).unwrap().unwrap();
        assert_eq!(first.primary_religion, "Buddhism");
        assert_eq!(first.secondary_interests, second.secondary_interests);
        assert_eq!(first.festival_reminder_days, second.festival_reminder_days);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(
            storage.get_user_preferences(user.id).unwrap().unwrap().primary_religion,
            "Buddhism"
        );

        assert!(matches!(
            storage.create_user_preferences(NewPreferences::defaults_for(999)),
            Err(Error::Conflict(_))
        ));
    }

    pub fn festival_queries(storage: &dyn Storage) {
        let diwali = storage
            .create_festival(new_festival("Diwali", "Hinduism", date(2025, 10, 20)))
            .unwrap();
        storage
            .create_festival(new_festival("Holi", "Hinduism", date(2025, 3, 14)))
            .unwrap();
        storage
            .create_festival(new_festival("Bhai Dooj", "Hinduism", date(2025, 10, 23)))
            .unwrap();
        storage
            .create_festival(new_festival("Vesak", "Buddhism", date(2025, 10, 20)))
            .unwrap();

        let fetched = storage.get_festival(diwali.id).unwrap().unwrap();
        assert_eq!(fetched, diwali);
        assert_eq!(storage.get_all_festivals().unwrap().len(), 4);

        let hindu = storage.get_festivals_by_religion("hinduism").unwrap();
        assert_eq!(hindu.len(), 3);

        let on_day = storage.get_festivals_by_date(date(2025, 10, 20)).unwrap();
        let names: Vec<_> = on_day.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Diwali", "Vesak"]);

        let upcoming = storage
            .get_upcoming_festivals("Hinduism", date(2025, 10, 1), 5)
            .unwrap();
        let names: Vec<_> = upcoming.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Diwali", "Bhai Dooj"]);

        let limited = storage
            .get_upcoming_festivals("Hinduism", date(2025, 1, 1), 1)
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].name, "Holi");

        let window = storage
            .get_festivals_between("hinduism", date(2025, 10, 20), date(2025, 10, 23))
            .unwrap();
        let names: Vec<_> = window.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Diwali", "Bhai Dooj"]);
        assert!(storage
            .get_festivals_between("Hinduism", date(2025, 10, 21), date(2025, 10, 22))
            .unwrap()
            .is_empty());
    }

    pub fn religion_padding_ignored(storage: &dyn Storage) {
        storage
            .create_festival(new_festival("Vaisakhi", " Sikhism ", date(2026, 4, 14)))
            .unwrap();
        storage
            .create_ritual(NewRitual {
                festival_id: None,
                title: "Ardas".to_string(),
                description: "Standing prayer".to_string(),
                content: "Recited at the close of a service".to_string(),
                materials: Vec::new(),
                steps: vec!["Stand facing the Guru Granth Sahib".to_string()],
                religion: "sikhism ".to_string(),
                verified: true,
                contributor_id: None,
            })
            .unwrap();

        assert_eq!(storage.get_festivals_by_religion("Sikhism").unwrap().len(), 1);
        assert_eq!(storage.get_rituals_by_religion(" SIKHISM").unwrap().len(), 1);
        assert_eq!(
            storage
                .get_upcoming_festivals("Sikhism", date(2026, 1, 1), 5)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            storage
                .get_festivals_between("sikhism", date(2026, 4, 1), date(2026, 4, 30))
                .unwrap()
                .len(),
            1
        );
    }

    pub fn rituals_and_bhajans(storage: &dyn Storage) {
        let festival = storage
            .create_festival(new_festival("Diwali", "Hinduism", date(2025, 10, 20)))
            .unwrap();
        let ritual = storage
            .create_ritual(NewRitual {
                festival_id: Some(festival.id),
                title: "Lakshmi Puja".to_string(),
                description: "Prayer for prosperity".to_string(),
                content: "Detailed steps".to_string(),
                materials: vec!["Flowers".to_string(), "Ghee lamp".to_string()],
                steps: vec!["Light the lamp".to_string(), "Offer sweets".to_string()],
                religion: "Hinduism".to_string(),
                verified: false,
                contributor_id: None,
            })
            .unwrap();
        assert_eq!(storage.get_ritual(ritual.id).unwrap(), Some(ritual.clone()));
        assert_eq!(storage.get_rituals_by_festival(festival.id).unwrap().len(), 1);
        assert_eq!(storage.get_rituals_by_festival(festival.id + 10).unwrap().len(), 0);
        assert_eq!(storage.get_rituals_by_religion("HINDUISM").unwrap().len(), 1);

        let verified = storage
            .update_ritual(
                ritual.id,
                &RitualUpdate {
                    verified: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert!(verified.verified);
        assert_eq!(verified.steps, ritual.steps);

        let blanked = RitualUpdate {
            title: Some("   ".to_string()),
            steps: Some(vec![String::new(), " ".to_string()]),
            ..Default::default()
        };
        assert!(matches!(
            storage.update_ritual(ritual.id, &blanked),
            Err(Error::Validation(_))
        ));
        let stored = storage.get_ritual(ritual.id).unwrap().unwrap();
        assert_eq!(stored.title, "Lakshmi Puja");
        assert_eq!(stored.steps, ritual.steps);

        let missing_with_bad_festival = RitualUpdate {
            festival_id: Some(404),
            ..Default::default()
        };
        assert_eq!(storage.update_ritual(999, &missing_with_bad_festival).unwrap(), None);

        let bhajan = storage
            .create_bhajan(NewBhajan {
                title: "Om Jai Jagdish Hare".to_string(),
                description: None,
                youtube_url: "https://www.youtube.com/watch?v=TXLrJ4zCcbI".to_string(),
                kind: "Aarti".to_string(),
                religion: "Hinduism".to_string(),
                duration: Some("5:30".to_string()),
                festival_id: Some(festival.id),
            })
            .unwrap();
        assert_eq!(storage.get_bhajan(bhajan.id).unwrap(), Some(bhajan.clone()));
        assert_eq!(storage.get_bhajans_by_festival(festival.id).unwrap(), vec![bhajan]);

        let orphan = NewBhajan {
            title: "Orphan".to_string(),
            description: None,
            youtube_url: "https://www.youtube.com/watch?v=x".to_string(),
            kind: "Bhajan".to_string(),
            religion: "Hinduism".to_string(),
            duration: None,
            festival_id: Some(404),
        };
        assert!(matches!(storage.create_bhajan(orphan), Err(Error::Conflict(_))));
    }

    pub fn contributions_lifecycle(storage: &dyn Storage) {
        let user = storage.create_user(new_user("contrib")).unwrap();
        let other = storage.create_user(new_user("other")).unwrap();
        let new = |title: &str, user_id: i64| NewContribution {
            user_id,
            title: title.to_string(),
            description: None,
            file_url: None,
            content: Some("Text".to_string()),
            religion: "Hinduism".to_string(),
            festival: Some("Navratri".to_string()),
            status: ContributionStatus::Pending,
        };

        let first = storage.create_contribution(new("First", user.id)).unwrap();
        let second = storage.create_contribution(new("Second", user.id)).unwrap();
        storage.create_contribution(new("Elsewhere", other.id)).unwrap();

        let mine = storage.get_contributions_by_user(user.id).unwrap();
        let titles: Vec<_> = mine.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
        assert_eq!(second.status, ContributionStatus::Pending);

        let moderated = storage
            .update_contribution(first.id, &ContributionUpdate::status(ContributionStatus::Verified))
            .unwrap()
            .unwrap();
        assert_eq!(moderated.status, ContributionStatus::Verified);
        assert!(moderated.updated_at >= first.updated_at);
        assert_eq!(moderated.created_at, first.created_at);
        assert_eq!(
            storage.get_contribution(first.id).unwrap().unwrap().status,
            ContributionStatus::Verified
        );
        assert_eq!(storage.update_contribution(500, &ContributionUpdate::default()).unwrap(), None);

        let blank_title = ContributionUpdate {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            storage.update_contribution(first.id, &blank_title),
            Err(Error::Validation(_))
        ));
        assert_eq!(storage.get_contribution(first.id).unwrap().unwrap().title, "First");

        assert!(matches!(
            storage.create_contribution(new("Nobody", 999)),
            Err(Error::Conflict(_))
        ));
    }

    pub fn validation_runs_before_insert(storage: &dyn Storage) {
        let mut festival = new_festival("", "Hinduism", date(2025, 1, 1));
        festival.name = "   ".to_string();
        assert!(matches!(storage.create_festival(festival), Err(Error::Validation(_))));
        assert!(storage.get_all_festivals().unwrap().is_empty());
    }

    /// Run every conformance check, each against a fresh backend.
    pub fn run_all<S: Storage>(fresh: impl Fn() -> S) {
        user_roundtrip(&fresh());
        user_uniqueness(&fresh());
        preferences_lifecycle(&fresh());
        festival_queries(&fresh());
        rituals_and_bhajans(&fresh());
        contributions_lifecycle(&fresh());
        validation_runs_before_insert(&fresh());
        religion_padding_ignored(&fresh());
    }
}
