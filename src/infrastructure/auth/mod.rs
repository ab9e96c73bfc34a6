//! Session token infrastructure

mod jwt;

pub use jwt::{JwtSessionService, SessionClaims, SessionConfig, SessionTokenIssuer};
