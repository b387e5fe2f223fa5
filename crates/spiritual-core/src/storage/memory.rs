//! In-memory storage backend.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

use super::Storage;
use crate::error::{Error, Result};
use crate::model::{
    same_religion, Bhajan, Contribution, ContributionUpdate, Festival, NewBhajan, NewContribution,
    NewFestival, NewPreferences, NewRitual, NewUser, PreferencesUpdate, Ritual, RitualUpdate, User,
    UserPreferences, UserUpdate,
};

/// One map per table, keyed by primary key so iteration follows id order.
#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    preferences: BTreeMap<i64, UserPreferences>,
    festivals: BTreeMap<i64, Festival>,
    rituals: BTreeMap<i64, Ritual>,
    bhajans: BTreeMap<i64, Bhajan>,
    contributions: BTreeMap<i64, Contribution>,
}

impl Tables {
    fn require_user(&self, id: i64) -> Result<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::Conflict(format!("user {id} does not exist")))
        }
    }

    fn require_festival(&self, id: Option<i64>) -> Result<()> {
        match id {
            Some(id) if !self.festivals.contains_key(&id) => {
                Err(Error::Conflict(format!("festival {id} does not exist")))
            }
            _ => Ok(()),
        }
    }
}

/// Next id for a table: one past the largest key, starting at 1.
fn next_id<T>(table: &BTreeMap<i64, T>) -> i64 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

/// Map-based [`Storage`] for development, seeding and tests.
#[derive(Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read();
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>> {
        let tables = self.tables.read();
        Ok(tables.users.values().find(|u| u.google_id == google_id).cloned())
    }

    fn create_user(&self, user: NewUser) -> Result<User> {
        user.validate()?;
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(Error::Conflict(format!("email {} already registered", user.email)));
        }
        if tables.users.values().any(|u| u.google_id == user.google_id) {
            return Err(Error::Conflict("google account already registered".to_string()));
        }
        let id = next_id(&tables.users);
        let user = user.into_user(id, Utc::now());
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        let mut tables = self.tables.write();
        Ok(tables.users.get_mut(&id).map(|user| {
            user.apply(update);
            user.clone()
        }))
    }

    fn get_user_preferences(&self, user_id: i64) -> Result<Option<UserPreferences>> {
        let tables = self.tables.read();
        Ok(tables
            .preferences
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    fn create_user_preferences(&self, preferences: NewPreferences) -> Result<UserPreferences> {
        preferences.validate()?;
        let mut tables = self.tables.write();
        tables.require_user(preferences.user_id)?;
        if tables
            .preferences
            .values()
            .any(|p| p.user_id == preferences.user_id)
        {
            return Err(Error::Conflict(format!(
                "user {} already has preferences",
                preferences.user_id
            )));
        }
        let id = next_id(&tables.preferences);
        let preferences = preferences.into_preferences(id, Utc::now());
        tables.preferences.insert(id, preferences.clone());
        Ok(preferences)
    }

    fn update_user_preferences(
        &self,
        id: i64,
        update: &PreferencesUpdate,
    ) -> Result<Option<UserPreferences>> {
        update.validate()?;
        let mut tables = self.tables.write();
        Ok(tables.preferences.get_mut(&id).map(|prefs| {
            prefs.apply(update);
            prefs.updated_at = Utc::now();
            prefs.clone()
        }))
    }

    fn get_festival(&self, id: i64) -> Result<Option<Festival>> {
        Ok(self.tables.read().festivals.get(&id).cloned())
    }

    fn get_festivals_by_date(&self, date: NaiveDate) -> Result<Vec<Festival>> {
        let tables = self.tables.read();
        Ok(tables
            .festivals
            .values()
            .filter(|f| f.date == date)
            .cloned()
            .collect())
    }

    fn get_festivals_by_religion(&self, religion: &str) -> Result<Vec<Festival>> {
        let tables = self.tables.read();
        Ok(tables
            .festivals
            .values()
            .filter(|f| same_religion(&f.religion, religion))
            .cloned()
            .collect())
    }

    fn get_all_festivals(&self) -> Result<Vec<Festival>> {
        Ok(self.tables.read().festivals.values().cloned().collect())
    }

    fn get_upcoming_festivals(
        &self,
        religion: &str,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Festival>> {
        let tables = self.tables.read();
        let mut upcoming: Vec<Festival> = tables
            .festivals
            .values()
            .filter(|f| f.date >= from && same_religion(&f.religion, religion))
            .cloned()
            .collect();
        upcoming.sort_by_key(|f| (f.date, f.id));
        upcoming.truncate(limit);
        Ok(upcoming)
    }

    fn get_festivals_between(
        &self,
        religion: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Festival>> {
        let tables = self.tables.read();
        let mut window: Vec<Festival> = tables
            .festivals
            .values()
            .filter(|f| (from..=to).contains(&f.date) && same_religion(&f.religion, religion))
            .cloned()
            .collect();
        window.sort_by_key(|f| (f.date, f.id));
        Ok(window)
    }

    fn create_festival(&self, festival: NewFestival) -> Result<Festival> {
        festival.validate()?;
        let mut tables = self.tables.write();
        let id = next_id(&tables.festivals);
        let festival = festival.into_festival(id, Utc::now());
        tables.festivals.insert(id, festival.clone());
        Ok(festival)
    }

    fn get_ritual(&self, id: i64) -> Result<Option<Ritual>> {
        Ok(self.tables.read().rituals.get(&id).cloned())
    }

    fn get_rituals_by_festival(&self, festival_id: i64) -> Result<Vec<Ritual>> {
        let tables = self.tables.read();
        Ok(tables
            .rituals
            .values()
            .filter(|r| r.festival_id == Some(festival_id))
            .cloned()
            .collect())
    }

    fn get_rituals_by_religion(&self, religion: &str) -> Result<Vec<Ritual>> {
        let tables = self.tables.read();
        Ok(tables
            .rituals
            .values()
            .filter(|r| same_religion(&r.religion, religion))
            .cloned()
            .collect())
    }

    fn create_ritual(&self, ritual: NewRitual) -> Result<Ritual> {
        ritual.validate()?;
        let mut tables = self.tables.write();
        tables.require_festival(ritual.festival_id)?;
        if let Some(contributor) = ritual.contributor_id {
            tables.require_user(contributor)?;
        }
        let id = next_id(&tables.rituals);
        let ritual = ritual.into_ritual(id, Utc::now());
        tables.rituals.insert(id, ritual.clone());
        Ok(ritual)
    }

    fn update_ritual(&self, id: i64, update: &RitualUpdate) -> Result<Option<Ritual>> {
        update.validate()?;
        let mut tables = self.tables.write();
        if !tables.rituals.contains_key(&id) {
            return Ok(None);
        }
        tables.require_festival(update.festival_id)?;
        Ok(tables.rituals.get_mut(&id).map(|ritual| {
            ritual.apply(update);
            ritual.clone()
        }))
    }

    fn get_bhajan(&self, id: i64) -> Result<Option<Bhajan>> {
        Ok(self.tables.read().bhajans.get(&id).cloned())
    }

    fn get_bhajans_by_festival(&self, festival_id: i64) -> Result<Vec<Bhajan>> {
        let tables = self.tables.read();
        Ok(tables
            .bhajans
            .values()
            .filter(|b| b.festival_id == Some(festival_id))
            .cloned()
            .collect())
    }

    fn create_bhajan(&self, bhajan: NewBhajan) -> Result<Bhajan> {
        bhajan.validate()?;
        let mut tables = self.tables.write();
        tables.require_festival(bhajan.festival_id)?;
        let id = next_id(&tables.bhajans);
        let bhajan = bhajan.into_bhajan(id, Utc::now());
        tables.bhajans.insert(id, bhajan.clone());
        Ok(bhajan)
    }

    fn get_contribution(&self, id: i64) -> Result<Option<Contribution>> {
        Ok(self.tables.read().contributions.get(&id).cloned())
    }

    fn get_contributions_by_user(&self, user_id: i64) -> Result<Vec<Contribution>> {
        let tables = self.tables.read();
        let mut contributions: Vec<Contribution> = tables
            .contributions
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        contributions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(contributions)
    }

    fn create_contribution(&self, contribution: NewContribution) -> Result<Contribution> {
        contribution.validate()?;
        let mut tables = self.tables.write();
        tables.require_user(contribution.user_id)?;
        let id = next_id(&tables.contributions);
        let contribution = contribution.into_contribution(id, Utc::now());
        tables.contributions.insert(id, contribution.clone());
        Ok(contribution)
    }

    fn update_contribution(
        &self,
        id: i64,
        update: &ContributionUpdate,
    ) -> Result<Option<Contribution>> {
        update.validate()?;
        let mut tables = self.tables.write();
        Ok(tables.contributions.get_mut(&id).map(|contribution| {
            contribution.apply(update);
            contribution.updated_at = Utc::now();
            contribution.clone()
        }))
    }
}
