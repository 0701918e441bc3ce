//! Authentication module
//!
//! Validates bearer JWTs issued by the external auth service.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
