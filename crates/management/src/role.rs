//! Role management

use api_client::{BoxFuture, Error, Result};
use serde::Deserialize;
use serde_json::json;

use crate::base::ManagementBase;
use crate::types::Role;

pub trait RoleApi: Send + Sync {
    fn create<'a>(
        &'a self,
        name: &'a str,
        description: &'a str,
        permission_names: &'a [String],
    ) -> BoxFuture<'a, Result<()>>;

    fn update<'a>(
        &'a self,
        name: &'a str,
        new_name: &'a str,
        description: &'a str,
        permission_names: &'a [String],
    ) -> BoxFuture<'a, Result<()>>;

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>>;

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Role>>>;
}

pub struct RoleService {
    base: ManagementBase,
}

impl RoleService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }
}

#[derive(Deserialize)]
struct LoadAllResponse {
    #[serde(default)]
    roles: Vec<Role>,
}

impl RoleApi for RoleService {
    fn create<'a>(
        &'a self,
        name: &'a str,
        description: &'a str,
        permission_names: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let body = json!({
                "name": name,
                "description": description,
                "permissionNames": permission_names,
            });
            self.base.post(&self.base.routes().role_create(), &body).await?;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        name: &'a str,
        new_name: &'a str,
        description: &'a str,
        permission_names: &'a [String],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            if new_name.is_empty() {
                return Err(Error::invalid_argument("newName"));
            }
            let body = json!({
                "name": name,
                "newName": new_name,
                "description": description,
                "permissionNames": permission_names,
            });
            self.base.post(&self.base.routes().role_update(), &body).await?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            self.base
                .post(&self.base.routes().role_delete(), &json!({ "name": name }))
                .await?;
            Ok(())
        })
    }

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Role>>> {
        Box::pin(async move {
            let res: LoadAllResponse = self
                .base
                .get_json(&self.base.routes().role_load_all(), &[])
                .await?;
            Ok(res.roles)
        })
    }
}
