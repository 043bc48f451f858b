//! Group queries (read-only)

use api_client::{BoxFuture, Error, Result};
use serde_json::json;

use crate::base::ManagementBase;
use crate::types::Group;

pub trait GroupApi: Send + Sync {
    /// All groups in a tenant.
    fn load_all_groups<'a>(&'a self, tenant_id: &'a str) -> BoxFuture<'a, Result<Vec<Group>>>;

    /// Groups containing any of the given users. At least one id list must be
    /// non-empty.
    fn load_all_groups_for_members<'a>(
        &'a self,
        tenant_id: &'a str,
        user_ids: &'a [String],
        login_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Group>>>;

    fn load_all_group_members<'a>(
        &'a self,
        tenant_id: &'a str,
        group_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Group>>>;
}

pub struct GroupService {
    base: ManagementBase,
}

impl GroupService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }
}

impl GroupApi for GroupService {
    fn load_all_groups<'a>(&'a self, tenant_id: &'a str) -> BoxFuture<'a, Result<Vec<Group>>> {
        Box::pin(async move {
            if tenant_id.is_empty() {
                return Err(Error::invalid_argument("tenantID"));
            }
            let body = json!({ "tenantId": tenant_id });
            self.base
                .post_json(&self.base.routes().group_load_all(), &body)
                .await
        })
    }

    fn load_all_groups_for_members<'a>(
        &'a self,
        tenant_id: &'a str,
        user_ids: &'a [String],
        login_ids: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Group>>> {
        Box::pin(async move {
            if tenant_id.is_empty() {
                return Err(Error::invalid_argument("tenantID"));
            }
            if user_ids.is_empty() && login_ids.is_empty() {
                return Err(Error::invalid_argument("userIDs and loginIDs"));
            }
            let body = json!({
                "tenantId": tenant_id,
                "loginIds": login_ids,
                "userIds": user_ids,
            });
            self.base
                .post_json(&self.base.routes().group_load_all_for_members(), &body)
                .await
        })
    }

    fn load_all_group_members<'a>(
        &'a self,
        tenant_id: &'a str,
        group_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Group>>> {
        Box::pin(async move {
            if tenant_id.is_empty() {
                return Err(Error::invalid_argument("tenantID"));
            }
            if group_id.is_empty() {
                return Err(Error::invalid_argument("groupID"));
            }
            let body = json!({ "tenantId": tenant_id, "groupId": group_id });
            self.base
                .post_json(&self.base.routes().group_load_all_members(), &body)
                .await
        })
    }
}
