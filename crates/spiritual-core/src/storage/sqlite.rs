//! SQLite storage backend.
//!
//! Lists (materials, steps, languages, interests) are stored as JSON text.
//! Dates are `YYYY-MM-DD` text so string comparison matches calendar order.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

use super::Storage;
use crate::error::{Error, Result};
use crate::model::{
    Bhajan, Contribution, ContributionStatus, ContributionUpdate, Festival, NewBhajan,
    NewContribution, NewFestival, NewPreferences, NewRitual, NewUser, PreferencesUpdate, Ritual,
    RitualUpdate, User, UserPreferences, UserUpdate,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    google_id TEXT NOT NULL UNIQUE,
    first_name TEXT,
    last_name TEXT,
    profile_picture TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_preferences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL UNIQUE REFERENCES users(id),
    primary_religion TEXT NOT NULL,
    secondary_interests TEXT NOT NULL DEFAULT '[]',
    languages TEXT NOT NULL DEFAULT '[]',
    festival_reminder_days INTEGER NOT NULL DEFAULT 1,
    notify_festivals INTEGER NOT NULL DEFAULT 1,
    notify_daily_content INTEGER NOT NULL DEFAULT 1,
    notify_new_content INTEGER NOT NULL DEFAULT 1,
    notify_community_updates INTEGER NOT NULL DEFAULT 0,
    notify_emails INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS festivals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    religion TEXT NOT NULL,
    date TEXT NOT NULL,
    image_url TEXT,
    story TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rituals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    festival_id INTEGER REFERENCES festivals(id),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    content TEXT NOT NULL,
    materials TEXT NOT NULL DEFAULT '[]',
    steps TEXT NOT NULL,
    religion TEXT NOT NULL,
    verified INTEGER NOT NULL DEFAULT 0,
    contributor_id INTEGER REFERENCES users(id),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS bhajans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    youtube_url TEXT NOT NULL,
    type TEXT NOT NULL,
    religion TEXT NOT NULL,
    duration TEXT,
    festival_id INTEGER REFERENCES festivals(id),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contributions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    title TEXT NOT NULL,
    description TEXT,
    file_url TEXT,
    content TEXT,
    religion TEXT NOT NULL,
    festival TEXT,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'verified', 'rejected')),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_festivals_date ON festivals(date);
CREATE INDEX IF NOT EXISTS idx_festivals_religion ON festivals(trim(religion) COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS idx_rituals_festival ON rituals(festival_id);
CREATE INDEX IF NOT EXISTS idx_bhajans_festival ON bhajans(festival_id);
CREATE INDEX IF NOT EXISTS idx_contributions_user ON contributions(user_id);
"#;

const USER_COLUMNS: &str =
    "id, username, email, google_id, first_name, last_name, profile_picture, created_at";
const PREFERENCES_COLUMNS: &str = "id, user_id, primary_religion, secondary_interests, languages, \
     festival_reminder_days, notify_festivals, notify_daily_content, notify_new_content, \
     notify_community_updates, notify_emails, created_at, updated_at";
const FESTIVAL_COLUMNS: &str = "id, name, description, religion, date, image_url, story, created_at";
const RITUAL_COLUMNS: &str = "id, festival_id, title, description, content, materials, steps, \
     religion, verified, contributor_id, created_at";
const BHAJAN_COLUMNS: &str =
    "id, title, description, youtube_url, type, religion, duration, festival_id, created_at";
const CONTRIBUTION_COLUMNS: &str = "id, user_id, title, description, file_url, content, religion, \
     festival, status, created_at, updated_at";

impl ToSql for ContributionStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ContributionStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// Relational [`Storage`] backed by a single SQLite connection.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) a database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened sqlite database");
        Self::with_connection(conn)
    }

    /// Create a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Turn constraint failures into [`Error::Conflict`]; everything else stays a
/// database error.
fn write_error(err: rusqlite::Error) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::Conflict(message.clone().unwrap_or_else(|| failure.to_string()))
        }
        _ => Error::Database(err),
    }
}

fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        google_id: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        profile_picture: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn preferences_from_row(row: &Row<'_>) -> rusqlite::Result<UserPreferences> {
    Ok(UserPreferences {
        id: row.get(0)?,
        user_id: row.get(1)?,
        primary_religion: row.get(2)?,
        secondary_interests: json_column(row, 3)?,
        languages: json_column(row, 4)?,
        festival_reminder_days: row.get(5)?,
        notify_festivals: row.get(6)?,
        notify_daily_content: row.get(7)?,
        notify_new_content: row.get(8)?,
        notify_community_updates: row.get(9)?,
        notify_emails: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn festival_from_row(row: &Row<'_>) -> rusqlite::Result<Festival> {
    Ok(Festival {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        religion: row.get(3)?,
        date: row.get(4)?,
        image_url: row.get(5)?,
        story: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn ritual_from_row(row: &Row<'_>) -> rusqlite::Result<Ritual> {
    Ok(Ritual {
        id: row.get(0)?,
        festival_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        content: row.get(4)?,
        materials: json_column(row, 5)?,
        steps: json_column(row, 6)?,
        religion: row.get(7)?,
        verified: row.get(8)?,
        contributor_id: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn bhajan_from_row(row: &Row<'_>) -> rusqlite::Result<Bhajan> {
    Ok(Bhajan {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        youtube_url: row.get(3)?,
        kind: row.get(4)?,
        religion: row.get(5)?,
        duration: row.get(6)?,
        festival_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn contribution_from_row(row: &Row<'_>) -> rusqlite::Result<Contribution> {
    Ok(Contribution {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        file_url: row.get(4)?,
        content: row.get(5)?,
        religion: row.get(6)?,
        festival: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn query_one<T, P>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>>
where
    P: rusqlite::Params,
{
    Ok(conn.query_row(sql, params, map).optional()?)
}

fn query_all<T, P>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn select_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        user_from_row,
    )
}

fn select_preferences(conn: &Connection, id: i64) -> Result<Option<UserPreferences>> {
    query_one(
        conn,
        &format!("SELECT {PREFERENCES_COLUMNS} FROM user_preferences WHERE id = ?1"),
        [id],
        preferences_from_row,
    )
}

fn select_ritual(conn: &Connection, id: i64) -> Result<Option<Ritual>> {
    query_one(
        conn,
        &format!("SELECT {RITUAL_COLUMNS} FROM rituals WHERE id = ?1"),
        [id],
        ritual_from_row,
    )
}

fn select_contribution(conn: &Connection, id: i64) -> Result<Option<Contribution>> {
    query_one(
        conn,
        &format!("SELECT {CONTRIBUTION_COLUMNS} FROM contributions WHERE id = ?1"),
        [id],
        contribution_from_row,
    )
}

impl Storage for SqliteStorage {
    fn get_user(&self, id: i64) -> Result<Option<User>> {
        select_user(&self.conn.lock(), id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        query_one(
            &self.conn.lock(),
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            [email],
            user_from_row,
        )
    }

    fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>> {
        query_one(
            &self.conn.lock(),
            &format!("SELECT {USER_COLUMNS} FROM users WHERE google_id = ?1"),
            [google_id],
            user_from_row,
        )
    }

    fn create_user(&self, user: NewUser) -> Result<User> {
        user.validate()?;
        let conn = self.conn.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (username, email, google_id, first_name, last_name, profile_picture, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.username,
                user.email,
                user.google_id,
                user.first_name,
                user.last_name,
                user.profile_picture,
                created_at
            ],
        )
        .map_err(write_error)?;
        Ok(user.into_user(conn.last_insert_rowid(), created_at))
    }

    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let Some(mut user) = select_user(&conn, id)? else {
            return Ok(None);
        };
        user.apply(update);
        conn.execute(
            "UPDATE users SET first_name = ?1, last_name = ?2, profile_picture = ?3 WHERE id = ?4",
            params![user.first_name, user.last_name, user.profile_picture, id],
        )
        .map_err(write_error)?;
        Ok(Some(user))
    }

    fn get_user_preferences(&self, user_id: i64) -> Result<Option<UserPreferences>> {
        query_one(
            &self.conn.lock(),
            &format!("SELECT {PREFERENCES_COLUMNS} FROM user_preferences WHERE user_id = ?1"),
            [user_id],
            preferences_from_row,
        )
    }

    fn create_user_preferences(&self, preferences: NewPreferences) -> Result<UserPreferences> {
        preferences.validate()?;
        let conn = self.conn.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO user_preferences (user_id, primary_religion, secondary_interests, languages,
                 festival_reminder_days, notify_festivals, notify_daily_content, notify_new_content,
                 notify_community_updates, notify_emails, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                preferences.user_id,
                preferences.primary_religion,
                serde_json::to_string(&preferences.secondary_interests)?,
                serde_json::to_string(&preferences.languages)?,
                preferences.festival_reminder_days,
                preferences.notify_festivals,
                preferences.notify_daily_content,
                preferences.notify_new_content,
                preferences.notify_community_updates,
                preferences.notify_emails,
                now
            ],
        )
        .map_err(write_error)?;
        Ok(preferences.into_preferences(conn.last_insert_rowid(), now))
    }

    fn update_user_preferences(
        &self,
        id: i64,
        update: &PreferencesUpdate,
    ) -> Result<Option<UserPreferences>> {
        update.validate()?;
        let conn = self.conn.lock();
        let Some(mut prefs) = select_preferences(&conn, id)? else {
            return Ok(None);
        };
        prefs.apply(update);
        prefs.updated_at = Utc::now();
        conn.execute(
            "UPDATE user_preferences SET primary_religion = ?1, secondary_interests = ?2,
                 languages = ?3, festival_reminder_days = ?4, notify_festivals = ?5,
                 notify_daily_content = ?6, notify_new_content = ?7,
                 notify_community_updates = ?8, notify_emails = ?9, updated_at = ?10
             WHERE id = ?11",
            params![
                prefs.primary_religion,
                serde_json::to_string(&prefs.secondary_interests)?,
                serde_json::to_string(&prefs.languages)?,
                prefs.festival_reminder_days,
                prefs.notify_festivals,
                prefs.notify_daily_content,
                prefs.notify_new_content,
                prefs.notify_community_updates,
                prefs.notify_emails,
                prefs.updated_at,
                id
            ],
        )
        .map_err(write_error)?;
        Ok(Some(prefs))
    }

    fn get_festival(&self, id: i64) -> Result<Option<Festival>> {
        query_one(
            &self.conn.lock(),
            &format!("SELECT {FESTIVAL_COLUMNS} FROM festivals WHERE id = ?1"),
            [id],
            festival_from_row,
        )
    }

    fn get_festivals_by_date(&self, date: NaiveDate) -> Result<Vec<Festival>> {
        query_all(
            &self.conn.lock(),
            &format!("SELECT {FESTIVAL_COLUMNS} FROM festivals WHERE date = ?1 ORDER BY id"),
            [date],
            festival_from_row,
        )
    }

    fn get_festivals_by_religion(&self, religion: &str) -> Result<Vec<Festival>> {
        query_all(
            &self.conn.lock(),
            &format!(
                "SELECT {FESTIVAL_COLUMNS} FROM festivals
                 WHERE trim(religion) = trim(?1) COLLATE NOCASE ORDER BY id"
            ),
            [religion],
            festival_from_row,
        )
    }

    fn get_all_festivals(&self) -> Result<Vec<Festival>> {
        query_all(
            &self.conn.lock(),
            &format!("SELECT {FESTIVAL_COLUMNS} FROM festivals ORDER BY id"),
            [],
            festival_from_row,
        )
    }

    fn get_upcoming_festivals(
        &self,
        religion: &str,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Festival>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        query_all(
            &self.conn.lock(),
            &format!(
                "SELECT {FESTIVAL_COLUMNS} FROM festivals
                 WHERE trim(religion) = trim(?1) COLLATE NOCASE AND date >= ?2
                 ORDER BY date, id LIMIT ?3"
            ),
            params![religion, from, limit],
            festival_from_row,
        )
    }

    fn get_festivals_between(
        &self,
        religion: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Festival>> {
        query_all(
            &self.conn.lock(),
            &format!(
                "SELECT {FESTIVAL_COLUMNS} FROM festivals
                 WHERE trim(religion) = trim(?1) COLLATE NOCASE AND date BETWEEN ?2 AND ?3
                 ORDER BY date, id"
            ),
            params![religion, from, to],
            festival_from_row,
        )
    }

    fn create_festival(&self, festival: NewFestival) -> Result<Festival> {
        festival.validate()?;
        let conn = self.conn.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO festivals (name, description, religion, date, image_url, story, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                festival.name,
                festival.description,
                festival.religion,
                festival.date,
                festival.image_url,
                festival.story,
                created_at
            ],
        )
        .map_err(write_error)?;
        Ok(festival.into_festival(conn.last_insert_rowid(), created_at))
    }

    fn get_ritual(&self, id: i64) -> Result<Option<Ritual>> {
        select_ritual(&self.conn.lock(), id)
    }

    fn get_rituals_by_festival(&self, festival_id: i64) -> Result<Vec<Ritual>> {
        query_all(
            &self.conn.lock(),
            &format!("SELECT {RITUAL_COLUMNS} FROM rituals WHERE festival_id = ?1 ORDER BY id"),
            [festival_id],
            ritual_from_row,
        )
    }

    fn get_rituals_by_religion(&self, religion: &str) -> Result<Vec<Ritual>> {
        query_all(
            &self.conn.lock(),
            &format!(
                "SELECT {RITUAL_COLUMNS} FROM rituals
                 WHERE trim(religion) = trim(?1) COLLATE NOCASE ORDER BY id"
            ),
            [religion],
            ritual_from_row,
        )
    }

    fn create_ritual(&self, ritual: NewRitual) -> Result<Ritual> {
        ritual.validate()?;
        let conn = self.conn.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO rituals (festival_id, title, description, content, materials, steps,
                 religion, verified, contributor_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                ritual.festival_id,
                ritual.title,
                ritual.description,
                ritual.content,
                serde_json::to_string(&ritual.materials)?,
                serde_json::to_string(&ritual.steps)?,
                ritual.religion,
                ritual.verified,
                ritual.contributor_id,
                created_at
            ],
        )
        .map_err(write_error)?;
        Ok(ritual.into_ritual(conn.last_insert_rowid(), created_at))
    }

    fn update_ritual(&self, id: i64, update: &RitualUpdate) -> Result<Option<Ritual>> {
        update.validate()?;
        let conn = self.conn.lock();
        let Some(mut ritual) = select_ritual(&conn, id)? else {
            return Ok(None);
        };
        ritual.apply(update);
        conn.execute(
            "UPDATE rituals SET festival_id = ?1, title = ?2, description = ?3, content = ?4,
                 materials = ?5, steps = ?6, verified = ?7
             WHERE id = ?8",
            params![
                ritual.festival_id,
                ritual.title,
                ritual.description,
                ritual.content,
                serde_json::to_string(&ritual.materials)?,
                serde_json::to_string(&ritual.steps)?,
                ritual.verified,
                id
            ],
        )
        .map_err(write_error)?;
        Ok(Some(ritual))
    }

    fn get_bhajan(&self, id: i64) -> Result<Option<Bhajan>> {
        query_one(
            &self.conn.lock(),
            &format!("SELECT {BHAJAN_COLUMNS} FROM bhajans WHERE id = ?1"),
            [id],
            bhajan_from_row,
        )
    }

    fn get_bhajans_by_festival(&self, festival_id: i64) -> Result<Vec<Bhajan>> {
        query_all(
            &self.conn.lock(),
            &format!("SELECT {BHAJAN_COLUMNS} FROM bhajans WHERE festival_id = ?1 ORDER BY id"),
            [festival_id],
            bhajan_from_row,
        )
    }

    fn create_bhajan(&self, bhajan: NewBhajan) -> Result<Bhajan> {
        bhajan.validate()?;
        let conn = self.conn.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO bhajans (title, description, youtube_url, type, religion, duration,
                 festival_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                bhajan.title,
                bhajan.description,
                bhajan.youtube_url,
                bhajan.kind,
                bhajan.religion,
                bhajan.duration,
                bhajan.festival_id,
                created_at
            ],
        )
        .map_err(write_error)?;
        Ok(bhajan.into_bhajan(conn.last_insert_rowid(), created_at))
    }

    fn get_contribution(&self, id: i64) -> Result<Option<Contribution>> {
        select_contribution(&self.conn.lock(), id)
    }

    fn get_contributions_by_user(&self, user_id: i64) -> Result<Vec<Contribution>> {
        query_all(
            &self.conn.lock(),
            &format!(
                "SELECT {CONTRIBUTION_COLUMNS} FROM contributions
                 WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
            ),
            [user_id],
            contribution_from_row,
        )
    }

    fn create_contribution(&self, contribution: NewContribution) -> Result<Contribution> {
        contribution.validate()?;
        let conn = self.conn.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO contributions (user_id, title, description, file_url, content, religion,
                 festival, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            params![
                contribution.user_id,
                contribution.title,
                contribution.description,
                contribution.file_url,
                contribution.content,
                contribution.religion,
                contribution.festival,
                contribution.status,
                now
            ],
        )
        .map_err(write_error)?;
        Ok(contribution.into_contribution(conn.last_insert_rowid(), now))
    }

    fn update_contribution(
        &self,
        id: i64,
        update: &ContributionUpdate,
    ) -> Result<Option<Contribution>> {
        update.validate()?;
        let conn = self.conn.lock();
        let Some(mut contribution) = select_contribution(&conn, id)? else {
            return Ok(None);
        };
        contribution.apply(update);
        contribution.updated_at = Utc::now();
        conn.execute(
            "UPDATE contributions SET title = ?1, description = ?2, file_url = ?3, content = ?4,
                 religion = ?5, festival = ?6, status = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                contribution.title,
                contribution.description,
                contribution.file_url,
                contribution.content,
                contribution.religion,
                contribution.festival,
                contribution.status,
                contribution.updated_at,
                id
            ],
        )
        .map_err(write_error)?;
        Ok(Some(contribution))
    }
}
