//! Tenant management

use api_client::{BoxFuture, Error, Result};
use serde::Deserialize;
use serde_json::json;

use crate::base::ManagementBase;
use crate::types::Tenant;

pub trait TenantApi: Send + Sync {
    /// Create a tenant with a generated id; returns the id.
    fn create<'a>(
        &'a self,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<String>>;

    fn create_with_id<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<()>>;

    fn update<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<()>>;

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Tenant>>>;
}

pub struct TenantService {
    base: ManagementBase,
}

impl TenantService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }
}

#[derive(Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Deserialize)]
struct LoadAllResponse {
    #[serde(default)]
    tenants: Vec<Tenant>,
}

impl TenantApi for TenantService {
    fn create<'a>(
        &'a self,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let body = json!({
                "name": name,
                "selfProvisioningDomains": self_provisioning_domains,
            });
            let res: CreateResponse = self
                .base
                .post_json(&self.base.routes().tenant_create(), &body)
                .await?;
            Ok(res.id)
        })
    }

    fn create_with_id<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if id.is_empty() {
                return Err(Error::invalid_argument("id"));
            }
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let body = json!({
                "id": id,
                "name": name,
                "selfProvisioningDomains": self_provisioning_domains,
            });
            self.base.post(&self.base.routes().tenant_create(), &body).await?;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if id.is_empty() {
                return Err(Error::invalid_argument("id"));
            }
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let body = json!({
                "id": id,
                "name": name,
                "selfProvisioningDomains": self_provisioning_domains,
            });
            self.base.post(&self.base.routes().tenant_update(), &body).await?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if id.is_empty() {
                return Err(Error::invalid_argument("id"));
            }
            self.base
                .post(&self.base.routes().tenant_delete(), &json!({ "id": id }))
                .await?;
            Ok(())
        })
    }

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Tenant>>> {
        Box::pin(async move {
            let res: LoadAllResponse = self
                .base
                .get_json(&self.base.routes().tenant_load_all(), &[])
                .await?;
            Ok(res.tenants)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BEARER, base_with};
    use api_client::mock::MockReply;

    #[tokio::test]
    async fn create_returns_generated_id() {
        let (base, mock) = base_with(|_| MockReply::json(200, &json!({"id": "T2new"})));
        let service = TenantService::new(base);

        let id = service.create("Acme", &["acme.test".into()]).await.unwrap();
        assert_eq!(id, "T2new");

        let request = mock.last_request().unwrap();
        assert!(request.url.ends_with("/v1/mgmt/tenant/create"));
        assert_eq!(request.header("authorization"), Some(BEARER));
        assert_eq!(
            request.json().unwrap(),
            json!({"name": "Acme", "selfProvisioningDomains": ["acme.test"]})
        );
    }

    #[tokio::test]
    async fn create_with_id_sends_id() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = TenantService::new(base);

        service.create_with_id("t1", "Acme", &[]).await.unwrap();
        assert_eq!(mock.last_request().unwrap().json().unwrap()["id"], "t1");
    }

    #[tokio::test]
    async fn required_arguments_checked_before_sending() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = TenantService::new(base);

        assert_eq!(
            service.create("", &[]).await.unwrap_err(),
            Error::invalid_argument("name")
        );
        assert_eq!(
            service.create_with_id("", "Acme", &[]).await.unwrap_err(),
            Error::invalid_argument("id")
        );
        assert_eq!(
            service.update("t1", "", &[]).await.unwrap_err(),
            Error::invalid_argument("name")
        );
        assert_eq!(
            service.delete("").await.unwrap_err(),
            Error::invalid_argument("id")
        );
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn load_all_unwraps_tenants() {
        let (base, _) = base_with(|_| {
            MockReply::json(
                200,
                &json!({"tenants": [{"id": "t1", "name": "Acme", "selfProvisioningDomains": []}]}),
            )
        });
        let service = TenantService::new(base);

        let tenants = service.load_all().await.unwrap();
        assert_eq!(tenants[0].name, "Acme");
    }

    #[tokio::test]
    async fn not_found_carries_url() {
        let (base, _) = base_with(|_| MockReply::status(404, ""));
        let service = TenantService::new(base);

        let err = service.delete("t1").await.unwrap_err();
        assert_eq!(
            err,
            Error::NotFound {
                url: "https://api.example.test/v1/mgmt/tenant/delete".into()
            }
        );
    }
}
