//! Authentication
//!
//! Bearer-token auth: login exchanges credentials for an HS256 JWT, the
//! middleware validates it on every protected route and injects a
//! [`CurrentUser`] into the request.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};
