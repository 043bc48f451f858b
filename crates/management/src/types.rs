//! Management resource records

use serde::{Deserialize, Serialize};
use session::AssociatedTenant;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub self_provisioning_domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    #[serde(rename = "loginID", default, skip_serializing_if = "String::is_empty")]
    pub login_id: String,
    #[serde(rename = "userId", default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display: String,
}

/// Group of users synced from an identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role_names: Vec<String>,
    #[serde(default)]
    pub key_tenants: Vec<AssociatedTenant>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_time: i64,
    #[serde(default)]
    pub expire_time: i64,
    #[serde(default)]
    pub created_by: String,
}

/// Maps identity-provider groups onto one project role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMapping {
    pub groups: Vec<String>,
    #[serde(rename = "roleName")]
    pub role: String,
}

impl RoleMapping {
    pub fn new(groups: Vec<String>, role: impl Into<String>) -> Self {
        Self {
            groups,
            role: role.into(),
        }
    }
}

/// Names of the identity-provider attributes that fill each user field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeMapping {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
}

/// Mutable user fields for create and update. Empty fields are sent as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRequest {
    pub email: String,
    pub phone: String,
    pub display_name: String,
    pub role_names: Vec<String>,
    pub tenants: Vec<AssociatedTenant>,
}

impl UserRequest {
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_roles(mut self, role_names: Vec<String>) -> Self {
        self.role_names = role_names;
        self
    }

    pub fn with_tenant(mut self, tenant: AssociatedTenant) -> Self {
        self.tenants.push(tenant);
        self
    }
}
