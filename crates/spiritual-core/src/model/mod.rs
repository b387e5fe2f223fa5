//! Domain records and their insert/update forms.
//!
//! Every record serializes to camelCase JSON, which is the shape the web
//! client consumes. Insert forms (`New*`) carry a `validate` method that the
//! storage backends call before touching any table.

mod contribution;
mod festival;
mod preferences;
mod user;

pub use contribution::{Contribution, ContributionStatus, ContributionUpdate, NewContribution};
pub use festival::{Bhajan, Festival, NewBhajan, NewFestival, NewRitual, Ritual, RitualUpdate};
pub use preferences::{NewPreferences, PreferencesUpdate, UserPreferences, MAX_REMINDER_DAYS};
pub use user::{NewUser, User, UserProfile, UserUpdate};

use crate::error::{Error, Result};

/// Reject a blank required text field.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Religion tags compare case-insensitively everywhere.
pub fn same_religion(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
