//! Access key management

use api_client::{BoxFuture, Error, Result};
use serde::Deserialize;
use serde_json::json;
use session::AssociatedTenant;

use crate::base::ManagementBase;
use crate::types::AccessKeyResponse;

pub trait AccessKeyApi: Send + Sync {
    /// Create a key. Returns the cleartext secret, which the service never
    /// shows again, alongside the key record. `expire_time` is seconds since
    /// epoch; 0 never expires.
    fn create<'a>(
        &'a self,
        name: &'a str,
        expire_time: i64,
        role_names: &'a [String],
        key_tenants: &'a [AssociatedTenant],
    ) -> BoxFuture<'a, Result<(String, AccessKeyResponse)>>;

    fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<AccessKeyResponse>>;

    /// Keys in any of the given tenants; empty means all keys.
    fn search_all<'a>(
        &'a self,
        tenant_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<AccessKeyResponse>>>;

    fn update<'a>(&'a self, id: &'a str, name: &'a str) -> BoxFuture<'a, Result<AccessKeyResponse>>;

    fn activate<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    fn deactivate<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
}

pub struct AccessKeyService {
    base: ManagementBase,
}

#[derive(Deserialize)]
struct CreateResponse {
    cleartext: String,
    key: AccessKeyResponse,
}

#[derive(Deserialize)]
struct KeyEnvelope {
    key: AccessKeyResponse,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    keys: Vec<AccessKeyResponse>,
}

impl AccessKeyService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }

    async fn post_id(&self, path: &str, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::invalid_argument("id"));
        }
        self.base.post(path, &json!({ "id": id })).await?;
        Ok(())
    }
}

impl AccessKeyApi for AccessKeyService {
    fn create<'a>(
        &'a self,
        name: &'a str,
        expire_time: i64,
        role_names: &'a [String],
        key_tenants: &'a [AssociatedTenant],
    ) -> BoxFuture<'a, Result<(String, AccessKeyResponse)>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let body = json!({
                "name": name,
                "expireTime": expire_time,
                "roleNames": role_names,
                "keyTenants": key_tenants,
            });
            let res: CreateResponse = self
                .base
                .post_json(&self.base.routes().access_key_create(), &body)
                .await?;
            Ok((res.cleartext, res.key))
        })
    }

    fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<AccessKeyResponse>> {
        Box::pin(async move {
            if id.is_empty() {
                return Err(Error::invalid_argument("id"));
            }
            let res: KeyEnvelope = self
                .base
                .get_json(&self.base.routes().access_key_load(), &[("id", id)])
                .await?;
            Ok(res.key)
        })
    }

    fn search_all<'a>(
        &'a self,
        tenant_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<AccessKeyResponse>>> {
        Box::pin(async move {
            let res: SearchResponse = self
                .base
                .post_json(
                    &self.base.routes().access_key_search_all(),
                    &json!({ "tenantIds": tenant_ids }),
                )
                .await?;
            Ok(res.keys)
        })
    }

    fn update<'a>(&'a self, id: &'a str, name: &'a str) -> BoxFuture<'a, Result<AccessKeyResponse>> {
        Box::pin(async move {
            if id.is_empty() {
                return Err(Error::invalid_argument("id"));
            }
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let res: KeyEnvelope = self
                .base
                .post_json(
                    &self.base.routes().access_key_update(),
                    &json!({ "id": id, "name": name }),
                )
                .await?;
            Ok(res.key)
        })
    }

    fn activate<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.post_id(&self.base.routes().access_key_activate(), id).await })
    }

    fn deactivate<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.post_id(&self.base.routes().access_key_deactivate(), id)
                .await
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.post_id(&self.base.routes().access_key_delete(), id).await })
    }
}
