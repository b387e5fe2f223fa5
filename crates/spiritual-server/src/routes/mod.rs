//! HTTP route handlers.

pub mod auth;
pub mod bhajans;
pub mod catalog;
pub mod categorize;
pub mod contributions;
pub mod festivals;
pub mod health;
pub mod preferences;
pub mod rituals;
pub mod synthesize;
pub mod user;
