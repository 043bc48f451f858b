//! Custom-claim injection into existing JWTs

use api_client::{BoxFuture, Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::base::ManagementBase;

pub trait JwtApi: Send + Sync {
    /// Re-sign `jwt` with extra claims; returns the new token.
    fn update_jwt_with_custom_claims<'a>(
        &'a self,
        jwt: &'a str,
        custom_claims: &'a Map<String, Value>,
    ) -> BoxFuture<'a, Result<String>>;
}

pub struct JwtService {
    base: ManagementBase,
}

impl JwtService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }
}

#[derive(Deserialize)]
struct JwtResponse {
    jwt: String,
}

impl JwtApi for JwtService {
    fn update_jwt_with_custom_claims<'a>(
        &'a self,
        jwt: &'a str,
        custom_claims: &'a Map<String, Value>,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            if jwt.is_empty() {
                return Err(Error::invalid_argument("jwt"));
            }
            let body = json!({ "jwt": jwt, "customClaims": custom_claims });
            let res: JwtResponse = self
                .base
                .post_json(&self.base.routes().jwt_update(), &body)
                .await?;
            Ok(res.jwt)
        })
    }
}
