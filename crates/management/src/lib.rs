//! Management façades over the API client
//!
//! Each resource (tenants, users, access keys, permissions, roles, groups,
//! SSO settings, JWT claims) is a dyn-compatible trait plus a service that builds the
//! request body, posts it through `api_client::Client` with the management
//! key attached, and unmarshals the typed response. Façades only do shallow
//! validation (non-empty required arguments) and fail with
//! `Error::Validation` before any network round trip.
//!
//! `Management` bundles one service per resource; `mock::MockManagement`
//! provides recording doubles behind the same traits.

pub mod access_key;
mod base;
pub mod group;
pub mod jwt;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod permission;
pub mod role;
pub mod sso;
pub mod tenant;
pub mod types;
pub mod user;

use std::sync::Arc;

use api_client::Client;
use common::Secret;
use tracing::{info, warn};

pub use access_key::{AccessKeyApi, AccessKeyService};
pub use api_client::{BoxFuture, Error, Result};
pub use group::{GroupApi, GroupService};
pub use jwt::{JwtApi, JwtService};
pub use permission::{PermissionApi, PermissionService};
pub use role::{RoleApi, RoleService};
pub use sso::{SsoApi, SsoService};
pub use tenant::{TenantApi, TenantService};
pub use types::{
    AccessKeyResponse, AttributeMapping, Group, GroupMember, Permission, Role, RoleMapping, Tenant,
    UserRequest,
};
pub use user::{UserApi, UserService};

use crate::base::ManagementBase;

/// Credentials for management calls.
#[derive(Debug, Clone)]
pub struct ManagementParams {
    pub management_key: Secret<String>,
}

impl ManagementParams {
    pub fn new(management_key: impl Into<Secret<String>>) -> Self {
        Self {
            management_key: management_key.into(),
        }
    }

    /// Management key from config; empty when none is configured.
    pub fn from_config(config: &common::SdkConfig) -> Self {
        Self {
            management_key: config
                .management
                .key
                .clone()
                .unwrap_or_else(|| Secret::from("")),
        }
    }
}

/// Access to every management façade.
pub trait ManagementApi: Send + Sync {
    fn tenant(&self) -> &dyn TenantApi;
    fn user(&self) -> &dyn UserApi;
    fn access_key(&self) -> &dyn AccessKeyApi;
    fn permission(&self) -> &dyn PermissionApi;
    fn role(&self) -> &dyn RoleApi;
    fn group(&self) -> &dyn GroupApi;
    fn sso(&self) -> &dyn SsoApi;
    fn jwt(&self) -> &dyn JwtApi;
}

pub struct Management {
    key_missing: bool,
    tenant: TenantService,
    user: UserService,
    access_key: AccessKeyService,
    permission: PermissionService,
    role: RoleService,
    group: GroupService,
    sso: SsoService,
    jwt: JwtService,
}

impl Management {
    pub fn new(params: ManagementParams, client: Arc<Client>) -> Self {
        let key_missing = params.management_key.is_empty();
        if key_missing {
            warn!(
                env = common::ENV_MANAGEMENT_KEY,
                "management key is missing; management calls will be rejected"
            );
        }

        let base = ManagementBase::new(client, params.management_key);
        Self {
            key_missing,
            tenant: TenantService::new(base.clone()),
            user: UserService::new(base.clone()),
            access_key: AccessKeyService::new(base.clone()),
            permission: PermissionService::new(base.clone()),
            role: RoleService::new(base.clone()),
            group: GroupService::new(base.clone()),
            sso: SsoService::new(base.clone()),
            jwt: JwtService::new(base),
        }
    }

    fn ensure_management_key(&self) {
        if self.key_missing {
            info!(
                "management key is missing, make sure to set it in the config or the {} environment variable",
                common::ENV_MANAGEMENT_KEY
            );
        }
    }
}

impl ManagementApi for Management {
    fn tenant(&self) -> &dyn TenantApi {
        self.ensure_management_key();
        &self.tenant
    }

    fn user(&self) -> &dyn UserApi {
        self.ensure_management_key();
        &self.user
    }

    fn access_key(&self) -> &dyn AccessKeyApi {
        self.ensure_management_key();
        &self.access_key
    }

    fn permission(&self) -> &dyn PermissionApi {
        self.ensure_management_key();
        &self.permission
    }

    fn role(&self) -> &dyn RoleApi {
        self.ensure_management_key();
        &self.role
    }

    fn group(&self) -> &dyn GroupApi {
        self.ensure_management_key();
        &self.group
    }

    fn sso(&self) -> &dyn SsoApi {
        self.ensure_management_key();
        &self.sso
    }

    fn jwt(&self) -> &dyn JwtApi {
        self.ensure_management_key();
        &self.jwt
    }
}
