//! Reserved claim keys and cookie/context names

/// Claim holding the tenant-authorization mapping (`{tenant_id: {...}}`).
pub const CLAIM_AUTHORIZED_TENANTS: &str = "tenants";

/// Claim holding the authentication-factor history (`["pwd", "otp_email"]`).
pub const CLAIM_AUTH_FACTORS: &str = "amr";

pub const SESSION_COOKIE_NAME: &str = "DS";
pub const REFRESH_COOKIE_NAME: &str = "DSR";
pub const REDIRECT_LOCATION_COOKIE_NAME: &str = "Location";

/// Request-context key under which middleware stores the authenticated user id.
pub const CONTEXT_USER_ID_PROPERTY: &str = "DESCOPE_USER_ID";
