//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService, VerificationError};
pub use middleware::{authorize_roles, extract_bearer, jwt_auth_middleware, AuthContext};
pub use password::PasswordHasher;
