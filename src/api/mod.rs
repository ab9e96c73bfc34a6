//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod keys;
pub mod middleware;
pub mod projects;
pub mod router;
pub mod state;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod types;
pub mod user;

pub use middleware::RequireSession;
pub use router::{create_router, create_router_with_state};
pub use state::AppState;
