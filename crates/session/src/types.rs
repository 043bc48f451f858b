//! Authentication results and user records returned by the service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::token::Token;

/// Basic user details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// Tenant association for a user or an access key. `roles` are the roles
/// held within that tenant only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociatedTenant {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "roleNames", default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl AssociatedTenant {
    pub fn new(tenant_id: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            roles,
        }
    }
}

/// Full user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub login_ids: Vec<String>,
    #[serde(default)]
    pub verified_email: bool,
    #[serde(default)]
    pub verified_phone: bool,
    #[serde(default)]
    pub role_names: Vec<String>,
    #[serde(default)]
    pub user_tenants: Vec<AssociatedTenant>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub picture: String,
}

/// Raw sign-in/refresh response before the JWTs are verified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    #[serde(default)]
    pub session_jwt: String,
    #[serde(default)]
    pub refresh_jwt: String,
    #[serde(default)]
    pub cookie_domain: String,
    #[serde(default)]
    pub cookie_path: String,
    #[serde(default)]
    pub cookie_max_age: i32,
    #[serde(default)]
    pub cookie_expiration: i32,
    #[serde(default)]
    pub user: Option<UserResponse>,
    #[serde(default)]
    pub first_seen: bool,
}

/// Result of a successful authentication or refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationInfo {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<Token>,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(rename = "firstSeen", default)]
    pub first_seen: bool,
}

impl AuthenticationInfo {
    pub fn new(
        response: Option<&JwtResponse>,
        session_token: Option<Token>,
        refresh_token: Option<Token>,
    ) -> Self {
        if session_token.is_none() || refresh_token.is_none() {
            debug!(
                missing_session = session_token.is_none(),
                missing_refresh = refresh_token.is_none(),
                "building authentication info with an empty token"
            );
        }

        Self {
            session_token,
            refresh_token,
            user: response.and_then(|r| r.user.clone()),
            first_seen: response.is_some_and(|r| r.first_seen),
        }
    }
}

/// Options for sign-in calls that may mint a step-up or MFA session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOptions {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stepup: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mfa: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_claims: Option<Map<String, Value>>,
}

impl LoginOptions {
    /// Step-up and MFA logins must present the existing session JWT.
    pub fn is_jwt_required(&self) -> bool {
        self.stepup || self.mfa
    }
}
