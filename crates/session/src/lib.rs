//! Session token model
//!
//! A `Token` is a read-only projection over claims that an external JWT
//! verifier has already checked. Nothing here touches signatures or the
//! network; every accessor is fail-soft so authorization checks can run
//! unconditionally on the request path.
//!
//! Typical use:
//! 1. Verifier produces a claims payload → `VerifiedClaims::from_payload()`
//! 2. `Token::new(jwt, Some(&claims))` builds the session token
//! 3. Request handlers query `tenants()`, `tenant_value()`, `is_mfa()`, ...

pub mod claims;
pub mod constants;
pub mod token;
pub mod types;

pub use claims::VerifiedClaims;
pub use constants::*;
pub use token::{AuthFactor, Token};
pub use types::{AssociatedTenant, AuthenticationInfo, JwtResponse, LoginOptions, User, UserResponse};
