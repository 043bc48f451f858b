//! Versioned route table
//!
//! Built once alongside the client and handed to every façade by reference.
//! All paths are joined onto the version prefix; nothing here is mutable after
//! construction.

const DEFAULT_VERSION: &str = "/v1";

/// Route table for auth and management endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    version: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

impl Routes {
    /// Create a route table under the given version prefix (e.g. "/v1").
    pub fn new(version: &str) -> Self {
        let trimmed = version.trim_matches('/');
        Self {
            version: format!("/{trimmed}"),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn join(&self, suffix: &str) -> String {
        format!("{}/{}", self.version, suffix.trim_start_matches('/'))
    }

    // Auth

    pub fn sign_in_otp(&self) -> String {
        self.join("auth/signin/otp")
    }

    pub fn sign_up_otp(&self) -> String {
        self.join("auth/signup/otp")
    }

    pub fn verify_code(&self) -> String {
        self.join("auth/code/verify")
    }

    pub fn logout_all(&self) -> String {
        self.join("logoutall")
    }

    /// Public keys for a project.
    pub fn keys(&self, project_id: &str) -> String {
        self.join(&format!("keys/{project_id}"))
    }

    pub fn refresh_token(&self) -> String {
        self.join("refresh")
    }

    // Management: tenants

    pub fn tenant_create(&self) -> String {
        self.join("mgmt/tenant/create")
    }

    pub fn tenant_update(&self) -> String {
        self.join("mgmt/tenant/update")
    }

    pub fn tenant_delete(&self) -> String {
        self.join("mgmt/tenant/delete")
    }

    pub fn tenant_load_all(&self) -> String {
        self.join("mgmt/tenant/all")
    }

    // Management: users

    pub fn user_create(&self) -> String {
        self.join("mgmt/user/create")
    }

    pub fn user_update(&self) -> String {
        self.join("mgmt/user/update")
    }

    pub fn user_delete(&self) -> String {
        self.join("mgmt/user/delete")
    }

    pub fn user_load(&self) -> String {
        self.join("mgmt/user")
    }

    pub fn user_search_all(&self) -> String {
        self.join("mgmt/user/search")
    }

    pub fn user_update_status(&self) -> String {
        self.join("mgmt/user/update/status")
    }

    pub fn user_update_email(&self) -> String {
        self.join("mgmt/user/update/email")
    }

    pub fn user_update_phone(&self) -> String {
        self.join("mgmt/user/update/phone")
    }

    pub fn user_update_name(&self) -> String {
        self.join("mgmt/user/update/name")
    }

    pub fn user_add_role(&self) -> String {
        self.join("mgmt/user/update/role/add")
    }

    pub fn user_remove_role(&self) -> String {
        self.join("mgmt/user/update/role/remove")
    }

    pub fn user_add_tenant(&self) -> String {
        self.join("mgmt/user/update/tenant/add")
    }

    pub fn user_remove_tenant(&self) -> String {
        self.join("mgmt/user/update/tenant/remove")
    }

    // Management: access keys

    pub fn access_key_create(&self) -> String {
        self.join("mgmt/accesskey/create")
    }

    pub fn access_key_load(&self) -> String {
        self.join("mgmt/accesskey")
    }

    pub fn access_key_search_all(&self) -> String {
        self.join("mgmt/accesskey/search")
    }

    pub fn access_key_update(&self) -> String {
        self.join("mgmt/accesskey/update")
    }

    pub fn access_key_deactivate(&self) -> String {
        self.join("mgmt/accesskey/deactivate")
    }

    pub fn access_key_activate(&self) -> String {
        self.join("mgmt/accesskey/activate")
    }

    pub fn access_key_delete(&self) -> String {
        self.join("mgmt/accesskey/delete")
    }

    // Management: permissions

    pub fn permission_create(&self) -> String {
        self.join("mgmt/permission/create")
    }

    pub fn permission_update(&self) -> String {
        self.join("mgmt/permission/update")
    }

    pub fn permission_delete(&self) -> String {
        self.join("mgmt/permission/delete")
    }

    pub fn permission_load_all(&self) -> String {
        self.join("mgmt/permission/all")
    }

    // Management: roles

    pub fn role_create(&self) -> String {
        self.join("mgmt/role/create")
    }

    pub fn role_update(&self) -> String {
        self.join("mgmt/role/update")
    }

    pub fn role_delete(&self) -> String {
        self.join("mgmt/role/delete")
    }

    pub fn role_load_all(&self) -> String {
        self.join("mgmt/role/all")
    }

    // Management: groups

    pub fn group_load_all(&self) -> String {
        self.join("mgmt/group/all")
    }

    pub fn group_load_all_for_members(&self) -> String {
        self.join("mgmt/group/member/all")
    }

    pub fn group_load_all_members(&self) -> String {
        self.join("mgmt/group/members")
    }

    // Management: SSO

    pub fn sso_settings(&self) -> String {
        self.join("mgmt/sso/settings")
    }

    pub fn sso_metadata(&self) -> String {
        self.join("mgmt/sso/metadata")
    }

    pub fn sso_mapping(&self) -> String {
        self.join("mgmt/sso/mapping")
    }

    // Management: JWT

    pub fn jwt_update(&self) -> String {
        self.join("mgmt/jwt/update")
    }
}
