//! Per-tenant SSO configuration

use api_client::{BoxFuture, Error, Result};
use serde_json::json;

use crate::base::ManagementBase;
use crate::types::{AttributeMapping, RoleMapping};

pub trait SsoApi: Send + Sync {
    /// Configure the tenant's identity provider by hand.
    /// `redirect_url` may be empty to use the project default.
    fn configure_settings<'a>(
        &'a self,
        tenant_id: &'a str,
        idp_url: &'a str,
        idp_cert: &'a str,
        entity_id: &'a str,
        redirect_url: &'a str,
    ) -> BoxFuture<'a, Result<()>>;

    /// Configure the tenant's identity provider from its metadata document.
    fn configure_metadata<'a>(
        &'a self,
        tenant_id: &'a str,
        idp_metadata_url: &'a str,
    ) -> BoxFuture<'a, Result<()>>;

    /// Map provider groups to roles and provider attributes to user fields.
    fn configure_mapping<'a>(
        &'a self,
        tenant_id: &'a str,
        role_mappings: &'a [RoleMapping],
        attribute_mapping: Option<&'a AttributeMapping>,
    ) -> BoxFuture<'a, Result<()>>;
}

pub struct SsoService {
    base: ManagementBase,
}

impl SsoService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }
}

impl SsoApi for SsoService {
    fn configure_settings<'a>(
        &'a self,
        tenant_id: &'a str,
        idp_url: &'a str,
        idp_cert: &'a str,
        entity_id: &'a str,
        redirect_url: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            for (name, value) in [
                ("tenantID", tenant_id),
                ("idpURL", idp_url),
                ("idpCert", idp_cert),
                ("entityID", entity_id),
            ] {
                if value.is_empty() {
                    return Err(Error::invalid_argument(name));
                }
            }
            let body = json!({
                "tenantId": tenant_id,
                "idpURL": idp_url,
                "idpCert": idp_cert,
                "entityId": entity_id,
                "redirectURL": redirect_url,
            });
            self.base.post(&self.base.routes().sso_settings(), &body).await?;
            Ok(())
        })
    }

    fn configure_metadata<'a>(
        &'a self,
        tenant_id: &'a str,
        idp_metadata_url: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if tenant_id.is_empty() {
                return Err(Error::invalid_argument("tenantID"));
            }
            if idp_metadata_url.is_empty() {
                return Err(Error::invalid_argument("idpMetadataURL"));
            }
            let body = json!({
                "tenantId": tenant_id,
                "idpMetadataURL": idp_metadata_url,
            });
            self.base.post(&self.base.routes().sso_metadata(), &body).await?;
            Ok(())
        })
    }

    fn configure_mapping<'a>(
        &'a self,
        tenant_id: &'a str,
        role_mappings: &'a [RoleMapping],
        attribute_mapping: Option<&'a AttributeMapping>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if tenant_id.is_empty() {
                return Err(Error::invalid_argument("tenantID"));
            }
            let mut body = json!({
                "tenantId": tenant_id,
                "roleMappings": role_mappings,
            });
            if let Some(mapping) = attribute_mapping {
                body["attributeMapping"] = json!(mapping);
            }
            self.base.post(&self.base.routes().sso_mapping(), &body).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BEARER, base_with};
    use api_client::mock::MockReply;

    #[tokio::test]
    async fn settings_posts_provider_details() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = SsoService::new(base);

        service
            .configure_settings("t1", "https://idp.test/sso", "CERT", "urn:idp", "")
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert!(request.url.ends_with("/v1/mgmt/sso/settings"));
        assert_eq!(request.header("authorization"), Some(BEARER));
        assert_eq!(
            request.json().unwrap(),
            json!({
                "tenantId": "t1",
                "idpURL": "https://idp.test/sso",
                "idpCert": "CERT",
                "entityId": "urn:idp",
                "redirectURL": ""
            })
        );
    }

    #[tokio::test]
    async fn settings_requires_provider_fields() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = SsoService::new(base);

        assert_eq!(
            service.configure_settings("", "u", "c", "e", "").await.unwrap_err(),
            Error::invalid_argument("tenantID")
        );
        assert_eq!(
            service.configure_settings("t1", "", "c", "e", "").await.unwrap_err(),
            Error::invalid_argument("idpURL")
        );
        assert_eq!(
            service.configure_settings("t1", "u", "", "e", "").await.unwrap_err(),
            Error::invalid_argument("idpCert")
        );
        assert_eq!(
            service.configure_settings("t1", "u", "c", "", "").await.unwrap_err(),
            Error::invalid_argument("entityID")
        );
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn metadata_requires_url() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = SsoService::new(base);

        assert_eq!(
            service.configure_metadata("t1", "").await.unwrap_err(),
            Error::invalid_argument("idpMetadataURL")
        );
        assert!(mock.requests().is_empty());

        service
            .configure_metadata("t1", "https://idp.test/metadata.xml")
            .await
            .unwrap();
        let request = mock.last_request().unwrap();
        assert!(request.url.ends_with("/v1/mgmt/sso/metadata"));
        assert_eq!(
            request.json().unwrap(),
            json!({"tenantId": "t1", "idpMetadataURL": "https://idp.test/metadata.xml"})
        );
    }

    #[tokio::test]
    async fn mapping_sends_roles_and_attributes() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = SsoService::new(base);

        let roles = [RoleMapping::new(vec!["eng".into(), "ops".into()], "developer")];
        let attributes = AttributeMapping {
            name: "displayName".into(),
            email: "mail".into(),
            ..Default::default()
        };
        service
            .configure_mapping("t1", &roles, Some(&attributes))
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert!(request.url.ends_with("/v1/mgmt/sso/mapping"));
        assert_eq!(
            request.json().unwrap(),
            json!({
                "tenantId": "t1",
                "roleMappings": [{"groups": ["eng", "ops"], "roleName": "developer"}],
                "attributeMapping": {"name": "displayName", "email": "mail"}
            })
        );
    }

    #[tokio::test]
    async fn mapping_without_attributes_omits_them() {
        let (base, mock) = base_with(|_| MockReply::ok_empty());
        let service = SsoService::new(base);

        assert_eq!(
            service.configure_mapping("", &[], None).await.unwrap_err(),
            Error::invalid_argument("tenantID")
        );
        assert!(mock.requests().is_empty());

        service.configure_mapping("t1", &[], None).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().json().unwrap(),
            json!({"tenantId": "t1", "roleMappings": []})
        );
    }

    #[tokio::test]
    async fn remote_error_propagates() {
        let (base, _) = base_with(|_| {
            MockReply::json(400, &json!({"errorCode": "E011", "errorDescription": "bad cert"}))
        });
        let service = SsoService::new(base);

        let err = service
            .configure_settings("t1", "u", "c", "e", "")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Remote {
                code: "E011".into(),
                message: "bad cert".into()
            }
        );
    }
}
