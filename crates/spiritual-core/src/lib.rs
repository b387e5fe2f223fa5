//! Spiritual Connect core - domain model, storage and calendar logic.
//!
//! This crate holds everything the HTTP server needs that does not depend on
//! HTTP: the festival/ritual/bhajan/contribution records, the [`Storage`]
//! repository interface with its in-memory and SQLite backends, sample data,
//! and the Priest Mode narration builder.

pub mod calendar;
pub mod error;
pub mod model;
pub mod narration;
pub mod seed;
pub mod storage;

pub use error::{Error, Result};
pub use model::{
    Bhajan, Contribution, ContributionStatus, ContributionUpdate, Festival, NewBhajan,
    NewContribution, NewFestival, NewPreferences, NewRitual, NewUser, PreferencesUpdate, Ritual,
    RitualUpdate, User, UserPreferences, UserProfile, UserUpdate,
};
pub use narration::{narration_script, NarrationScript, NarrationSegment, SegmentKind};
pub use seed::{load_sample_data, SeedReport};
pub use storage::{MemStorage, SqliteStorage, Storage};
