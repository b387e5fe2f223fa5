mod cookie;
mod extract;
mod manager;

pub use cookie::{clear_cookie, read_session_id, session_cookie, set_cookie_header, SESSION_COOKIE};
pub use extract::{CurrentUser, MaybeSession, Moderator};
pub use manager::{cleanup_task, Session, SessionManager};
