//! In-memory doubles for the management façades
//!
//! Each mock records the method name and arguments of every call and answers
//! with its canned value, or with `error` when one is set. Arguments are
//! captured as JSON so assertions don't depend on borrowed inputs.

use std::future::ready;
use std::sync::Mutex;

use api_client::{BoxFuture, Error, Result};
use serde_json::{Map, Value, json};
use session::{AssociatedTenant, UserResponse};

use crate::types::{
    AccessKeyResponse, AttributeMapping, Group, Permission, Role, RoleMapping, Tenant, UserRequest,
};
use crate::{
    AccessKeyApi, GroupApi, JwtApi, ManagementApi, PermissionApi, RoleApi, SsoApi, TenantApi,
    UserApi,
};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub method: &'static str,
    pub args: Value,
}

#[derive(Debug, Default)]
pub struct Recorder {
    calls: Mutex<Vec<MockCall>>,
}

impl Recorder {
    fn record(&self, method: &'static str, args: Value) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(MockCall { method, args });
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<MockCall> {
        self.calls().pop()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }
}

fn reply<'a, T: Clone + Send + 'a>(error: &Option<Error>, value: &T) -> BoxFuture<'a, Result<T>> {
    let result = match error {
        Some(err) => Err(err.clone()),
        None => Ok(value.clone()),
    };
    Box::pin(ready(result))
}

fn user_args(login_id: &str, user: &UserRequest) -> Value {
    json!({
        "loginId": login_id,
        "email": user.email,
        "phone": user.phone,
        "displayName": user.display_name,
        "roleNames": user.role_names,
        "tenants": user.tenants,
    })
}

#[derive(Debug, Default)]
pub struct MockTenant {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub created_id: String,
    pub tenants: Vec<Tenant>,
}

impl TenantApi for MockTenant {
    fn create<'a>(
        &'a self,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<String>> {
        self.calls.record(
            "create",
            json!({ "name": name, "selfProvisioningDomains": self_provisioning_domains }),
        );
        reply(&self.error, &self.created_id)
    }

    fn create_with_id<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "create_with_id",
            json!({ "id": id, "name": name, "selfProvisioningDomains": self_provisioning_domains }),
        );
        reply(&self.error, &())
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
        self_provisioning_domains: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "update",
            json!({ "id": id, "name": name, "selfProvisioningDomains": self_provisioning_domains }),
        );
        reply(&self.error, &())
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("delete", json!({ "id": id }));
        reply(&self.error, &())
    }

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Tenant>>> {
        self.calls.record("load_all", Value::Null);
        reply(&self.error, &self.tenants)
    }
}

#[derive(Debug, Default)]
pub struct MockUser {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub user: UserResponse,
    pub users: Vec<UserResponse>,
}

impl MockUser {
    fn user_call<'a>(&'a self, method: &'static str, args: Value) -> BoxFuture<'a, Result<UserResponse>> {
        self.calls.record(method, args);
        reply(&self.error, &self.user)
    }
}

impl UserApi for MockUser {
    fn create<'a>(
        &'a self,
        login_id: &'a str,
        user: &'a UserRequest,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("create", user_args(login_id, user))
    }

    fn update<'a>(
        &'a self,
        login_id: &'a str,
        user: &'a UserRequest,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("update", user_args(login_id, user))
    }

    fn delete<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("delete", json!({ "loginId": login_id }));
        reply(&self.error, &())
    }

    fn load<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("load", json!({ "loginId": login_id }))
    }

    fn load_by_user_id<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("load_by_user_id", json!({ "userId": user_id }))
    }

    fn search_all<'a>(
        &'a self,
        tenant_ids: &'a [String],
        role_names: &'a [String],
        limit: i32,
    ) -> BoxFuture<'a, Result<Vec<UserResponse>>> {
        self.calls.record(
            "search_all",
            json!({ "tenantIds": tenant_ids, "roleNames": role_names, "limit": limit }),
        );
        reply(&self.error, &self.users)
    }

    fn activate<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("activate", json!({ "loginId": login_id }))
    }

    fn deactivate<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("deactivate", json!({ "loginId": login_id }))
    }

    fn update_email<'a>(
        &'a self,
        login_id: &'a str,
        email: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call(
            "update_email",
            json!({ "loginId": login_id, "email": email, "verified": verified }),
        )
    }

    fn update_phone<'a>(
        &'a self,
        login_id: &'a str,
        phone: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call(
            "update_phone",
            json!({ "loginId": login_id, "phone": phone, "verified": verified }),
        )
    }

    fn update_display_name<'a>(
        &'a self,
        login_id: &'a str,
        display_name: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call(
            "update_display_name",
            json!({ "loginId": login_id, "displayName": display_name }),
        )
    }

    fn add_roles<'a>(
        &'a self,
        login_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("add_roles", json!({ "loginId": login_id, "roleNames": roles }))
    }

    fn remove_roles<'a>(
        &'a self,
        login_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("remove_roles", json!({ "loginId": login_id, "roleNames": roles }))
    }

    fn add_tenant<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call("add_tenant", json!({ "loginId": login_id, "tenantId": tenant_id }))
    }

    fn remove_tenant<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call(
            "remove_tenant",
            json!({ "loginId": login_id, "tenantId": tenant_id }),
        )
    }

    fn add_tenant_roles<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call(
            "add_tenant_roles",
            json!({ "loginId": login_id, "tenantId": tenant_id, "roleNames": roles }),
        )
    }

    fn remove_tenant_roles<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        self.user_call(
            "remove_tenant_roles",
            json!({ "loginId": login_id, "tenantId": tenant_id, "roleNames": roles }),
        )
    }
}

#[derive(Debug, Default)]
pub struct MockAccessKey {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub cleartext: String,
    pub key: AccessKeyResponse,
    pub keys: Vec<AccessKeyResponse>,
}

impl AccessKeyApi for MockAccessKey {
    fn create<'a>(
        &'a self,
        name: &'a str,
        expire_time: i64,
        role_names: &'a [String],
        key_tenants: &'a [AssociatedTenant],
    ) -> BoxFuture<'a, Result<(String, AccessKeyResponse)>> {
        self.calls.record(
            "create",
            json!({
                "name": name,
                "expireTime": expire_time,
                "roleNames": role_names,
                "keyTenants": key_tenants,
            }),
        );
        reply(&self.error, &(self.cleartext.clone(), self.key.clone()))
    }

    fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<AccessKeyResponse>> {
        self.calls.record("load", json!({ "id": id }));
        reply(&self.error, &self.key)
    }

    fn search_all<'a>(
        &'a self,
        tenant_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<AccessKeyResponse>>> {
        self.calls.record("search_all", json!({ "tenantIds": tenant_ids }));
        reply(&self.error, &self.keys)
    }

    fn update<'a>(&'a self, id: &'a str, name: &'a str) -> BoxFuture<'a, Result<AccessKeyResponse>> {
        self.calls.record("update", json!({ "id": id, "name": name }));
        reply(&self.error, &self.key)
    }

    fn activate<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("activate", json!({ "id": id }));
        reply(&self.error, &())
    }

    fn deactivate<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("deactivate", json!({ "id": id }));
        reply(&self.error, &())
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("delete", json!({ "id": id }));
        reply(&self.error, &())
    }
}

#[derive(Debug, Default)]
pub struct MockPermission {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub permissions: Vec<Permission>,
}

impl PermissionApi for MockPermission {
    fn create<'a>(&'a self, name: &'a str, description: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls
            .record("create", json!({ "name": name, "description": description }));
        reply(&self.error, &())
    }

    fn update<'a>(
        &'a self,
        name: &'a str,
        new_name: &'a str,
        description: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "update",
            json!({ "name": name, "newName": new_name, "description": description }),
        );
        reply(&self.error, &())
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("delete", json!({ "name": name }));
        reply(&self.error, &())
    }

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Permission>>> {
        self.calls.record("load_all", Value::Null);
        reply(&self.error, &self.permissions)
    }
}

#[derive(Debug, Default)]
pub struct MockRole {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub roles: Vec<Role>,
}

impl RoleApi for MockRole {
    fn create<'a>(
        &'a self,
        name: &'a str,
        description: &'a str,
        permission_names: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "create",
            json!({ "name": name, "description": description, "permissionNames": permission_names }),
        );
        reply(&self.error, &())
    }

    fn update<'a>(
        &'a self,
        name: &'a str,
        new_name: &'a str,
        description: &'a str,
        permission_names: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "update",
            json!({
                "name": name,
                "newName": new_name,
                "description": description,
                "permissionNames": permission_names,
            }),
        );
        reply(&self.error, &())
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>> {
        self.calls.record("delete", json!({ "name": name }));
        reply(&self.error, &())
    }

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Role>>> {
        self.calls.record("load_all", Value::Null);
        reply(&self.error, &self.roles)
    }
}

#[derive(Debug, Default)]
pub struct MockGroup {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub groups: Vec<Group>,
}

impl GroupApi for MockGroup {
    fn load_all_groups<'a>(&'a self, tenant_id: &'a str) -> BoxFuture<'a, Result<Vec<Group>>> {
        self.calls
            .record("load_all_groups", json!({ "tenantId": tenant_id }));
        reply(&self.error, &self.groups)
    }

    fn load_all_groups_for_members<'a>(
        &'a self,
        tenant_id: &'a str,
        user_ids: &'a [String],
        login_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Group>>> {
        self.calls.record(
            "load_all_groups_for_members",
            json!({ "tenantId": tenant_id, "userIds": user_ids, "loginIds": login_ids }),
        );
        reply(&self.error, &self.groups)
    }

    fn load_all_group_members<'a>(
        &'a self,
        tenant_id: &'a str,
        group_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Group>>> {
        self.calls.record(
            "load_all_group_members",
            json!({ "tenantId": tenant_id, "groupId": group_id }),
        );
        reply(&self.error, &self.groups)
    }
}

#[derive(Debug, Default)]
pub struct MockSso {
    pub calls: Recorder,
    pub error: Option<Error>,
}

impl SsoApi for MockSso {
    fn configure_settings<'a>(
        &'a self,
        tenant_id: &'a str,
        idp_url: &'a str,
        idp_cert: &'a str,
        entity_id: &'a str,
        redirect_url: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "configure_settings",
            json!({
                "tenantId": tenant_id,
                "idpURL": idp_url,
                "idpCert": idp_cert,
                "entityId": entity_id,
                "redirectURL": redirect_url,
            }),
        );
        reply(&self.error, &())
    }

    fn configure_metadata<'a>(
        &'a self,
        tenant_id: &'a str,
        idp_metadata_url: &'a str,
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "configure_metadata",
            json!({ "tenantId": tenant_id, "idpMetadataURL": idp_metadata_url }),
        );
        reply(&self.error, &())
    }

    fn configure_mapping<'a>(
        &'a self,
        tenant_id: &'a str,
        role_mappings: &'a [RoleMapping],
        attribute_mapping: Option<&'a AttributeMapping>,
    ) -> BoxFuture<'a, Result<()>> {
        self.calls.record(
            "configure_mapping",
            json!({
                "tenantId": tenant_id,
                "roleMappings": role_mappings,
                "attributeMapping": attribute_mapping,
            }),
        );
        reply(&self.error, &())
    }
}

#[derive(Debug, Default)]
pub struct MockJwt {
    pub calls: Recorder,
    pub error: Option<Error>,
    pub jwt: String,
}

impl JwtApi for MockJwt {
    fn update_jwt_with_custom_claims<'a>(
        &'a self,
        jwt: &'a str,
        custom_claims: &'a Map<String, Value>,
    ) -> BoxFuture<'a, Result<String>> {
        self.calls.record(
            "update_jwt_with_custom_claims",
            json!({ "jwt": jwt, "customClaims": custom_claims }),
        );
        reply(&self.error, &self.jwt)
    }
}

/// Every façade double behind one `ManagementApi`.
#[derive(Debug, Default)]
pub struct MockManagement {
    pub tenant: MockTenant,
    pub user: MockUser,
    pub access_key: MockAccessKey,
    pub permission: MockPermission,
    pub role: MockRole,
    pub group: MockGroup,
    pub sso: MockSso,
    pub jwt: MockJwt,
}

impl ManagementApi for MockManagement {
    fn tenant(&self) -> &dyn TenantApi {
        &self.tenant
    }

    fn user(&self) -> &dyn UserApi {
        &self.user
    }

    fn access_key(&self) -> &dyn AccessKeyApi {
        &self.access_key
    }

    fn permission(&self) -> &dyn PermissionApi {
        &self.permission
    }

    fn role(&self) -> &dyn RoleApi {
        &self.role
    }

    fn group(&self) -> &dyn GroupApi {
        &self.group
    }

    fn sso(&self) -> &dyn SsoApi {
        &self.sso
    }

    fn jwt(&self) -> &dyn JwtApi {
        &self.jwt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count_admins(mgmt: &dyn ManagementApi) -> Result<usize> {
        let roles = mgmt.role().load_all().await?;
        Ok(roles.iter().filter(|r| r.name == "admin").count())
    }

    #[tokio::test]
    async fn canned_values_flow_through_trait_objects() {
        let mgmt = MockManagement {
            role: MockRole {
                roles: vec![Role {
                    name: "admin".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(count_admins(&mgmt).await.unwrap(), 1);
        assert_eq!(mgmt.role.calls.count("load_all"), 1);
    }

    #[tokio::test]
    async fn error_overrides_canned_value() {
        let mgmt = MockManagement {
            tenant: MockTenant {
                created_id: "t1".into(),
                error: Some(Error::Unauthorized),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(
            mgmt.tenant().create("Acme", &[]).await.unwrap_err(),
            Error::Unauthorized
        );
    }

    #[tokio::test]
    async fn records_arguments() {
        let mgmt = MockManagement::default();
        let request = UserRequest::default().with_email("ada@example.test");

        mgmt.user().create("ada", &request).await.unwrap();
        mgmt.user()
            .add_tenant_roles("ada", "t1", &["viewer".into()])
            .await
            .unwrap();

        let calls = mgmt.user.calls.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, "create");
        assert_eq!(calls[0].args["email"], "ada@example.test");
        assert_eq!(
            calls[1].args,
            json!({"loginId": "ada", "tenantId": "t1", "roleNames": ["viewer"]})
        );
    }

    #[tokio::test]
    async fn sso_mock_records_mappings() {
        let mgmt = MockManagement::default();
        let roles = [RoleMapping::new(vec!["eng".into()], "developer")];

        mgmt.sso().configure_mapping("t1", &roles, None).await.unwrap();

        let call = mgmt.sso.calls.last().unwrap();
        assert_eq!(call.method, "configure_mapping");
        assert_eq!(
            call.args,
            json!({
                "tenantId": "t1",
                "roleMappings": [{"groups": ["eng"], "roleName": "developer"}],
                "attributeMapping": null
            })
        );
    }

    #[tokio::test]
    async fn jwt_mock_returns_configured_token() {
        let mgmt = MockManagement {
            jwt: MockJwt {
                jwt: "new.j.w".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut claims = Map::new();
        claims.insert("plan".into(), json!("pro"));

        let jwt = mgmt
            .jwt()
            .update_jwt_with_custom_claims("old.j.w", &claims)
            .await
            .unwrap();
        assert_eq!(jwt, "new.j.w");
        assert_eq!(
            mgmt.jwt.calls.last().unwrap().args["customClaims"]["plan"],
            "pro"
        );
    }
}
