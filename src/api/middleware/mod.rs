//! API middleware

pub mod session;

pub use session::{RequireSession, SessionIdentity, SESSION_COOKIE};
