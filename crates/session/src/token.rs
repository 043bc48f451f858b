//! Session token and its derived views
//!
//! All accessors are total over a possibly absent claims map: missing or
//! mistyped data yields an empty result, never a failure. The claims map is
//! shared with the verifier output (`Arc`), not copied, and is treated as
//! immutable after handoff.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::claims::VerifiedClaims;
use crate::constants::{CLAIM_AUTH_FACTORS, CLAIM_AUTHORIZED_TENANTS};

/// One verified authentication method listed in the `amr` claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthFactor {
    Password,
    Email,
    Sms,
    /// Federated SSO (SAML/OIDC)
    Federated,
    OAuth,
    WebAuthn,
    Totp,
    Mfa,
    /// Any identifier this SDK does not know by name (e.g. "otp_email")
    Other(String),
}

impl AuthFactor {
    pub fn as_str(&self) -> &str {
        match self {
            AuthFactor::Password => "pwd",
            AuthFactor::Email => "email",
            AuthFactor::Sms => "sms",
            AuthFactor::Federated => "fed",
            AuthFactor::OAuth => "oauth",
            AuthFactor::WebAuthn => "webauthn",
            AuthFactor::Totp => "totp",
            AuthFactor::Mfa => "mfa",
            AuthFactor::Other(other) => other,
        }
    }
}

impl From<&str> for AuthFactor {
    fn from(value: &str) -> Self {
        match value {
            "pwd" => AuthFactor::Password,
            "email" => AuthFactor::Email,
            "sms" => AuthFactor::Sms,
            "fed" => AuthFactor::Federated,
            "oauth" => AuthFactor::OAuth,
            "webauthn" => AuthFactor::WebAuthn,
            "totp" => AuthFactor::Totp,
            "mfa" => AuthFactor::Mfa,
            other => AuthFactor::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AuthFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session or refresh token for one authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Unix seconds; zero when unknown
    #[serde(default, skip_serializing_if = "is_zero")]
    pub refresh_expiration: i64,
    /// Unix seconds
    #[serde(default, skip_serializing_if = "is_zero")]
    pub expiration: i64,
    /// The signed token string
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jwt: String,
    /// Subject (user id)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Arc<Map<String, Value>>>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl Token {
    /// Build a token from verifier output. No claims in, no token out.
    ///
    /// The project id is the issuer's last `/` segment
    /// (`https://api.descope.com/P2abc` → `P2abc`).
    pub fn new(jwt: impl Into<String>, verified: Option<&VerifiedClaims>) -> Option<Self> {
        let verified = verified?;
        let project_id = verified
            .issuer
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Some(Self {
            refresh_expiration: 0,
            expiration: verified.expiration,
            jwt: jwt.into(),
            id: verified.subject.clone(),
            project_id,
            claims: Some(Arc::clone(&verified.private_claims)),
        })
    }

    fn claims(&self) -> Option<&Map<String, Value>> {
        self.claims.as_deref()
    }

    fn tenant_map(&self) -> Option<&Map<String, Value>> {
        self.claims()?.get(CLAIM_AUTHORIZED_TENANTS)?.as_object()
    }

    /// Tenant ids the user is authorized for.
    pub fn tenants(&self) -> Vec<&str> {
        self.tenant_map()
            .map(|tenants| tenants.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the user holds any authorization in `tenant`.
    pub fn has_tenant(&self, tenant: &str) -> bool {
        self.tenant_map().is_some_and(|t| t.contains_key(tenant))
    }

    /// Attribute `key` of one tenant's entry, e.g. `("t1", "roles")`.
    pub fn tenant_value(&self, tenant: &str, key: &str) -> Option<&Value> {
        self.tenant_map()?.get(tenant)?.as_object()?.get(key)
    }

    /// Direct lookup into the claims map.
    pub fn custom_claim(&self, key: &str) -> Option<&Value> {
        self.claims()?.get(key)
    }

    /// Authentication factors in the order the issuer listed them.
    ///
    /// Non-string entries are skipped and logged.
    pub fn auth_factors(&self) -> Vec<AuthFactor> {
        let Some(factors) = self.claims().and_then(|c| c.get(CLAIM_AUTH_FACTORS)) else {
            return Vec::new();
        };
        let Some(factors) = factors.as_array() else {
            info!(value = %factors, "unknown amr value type");
            return Vec::new();
        };

        factors
            .iter()
            .filter_map(|factor| match factor.as_str() {
                Some(s) => Some(AuthFactor::from(s)),
                None => {
                    info!(value = %factor, "unknown auth-factor type");
                    None
                }
            })
            .collect()
    }

    /// More than one authentication factor was used.
    pub fn is_mfa(&self) -> bool {
        self.auth_factors().len() > 1
    }
}
