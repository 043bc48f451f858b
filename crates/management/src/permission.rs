//! Permission management

use api_client::{BoxFuture, Error, Result};
use serde::Deserialize;
use serde_json::json;

use crate::base::ManagementBase;
use crate::types::Permission;

pub trait PermissionApi: Send + Sync {
    fn create<'a>(&'a self, name: &'a str, description: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Rename and/or re-describe. `new_name` may equal `name`.
    fn update<'a>(
        &'a self,
        name: &'a str,
        new_name: &'a str,
        description: &'a str,
    ) -> BoxFuture<'a, Result<()>>;

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>>;

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Permission>>>;
}

pub struct PermissionService {
    base: ManagementBase,
}

impl PermissionService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }
}

#[derive(Deserialize)]
struct LoadAllResponse {
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl PermissionApi for PermissionService {
    fn create<'a>(&'a self, name: &'a str, description: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            let body = json!({ "name": name, "description": description });
            self.base
                .post(&self.base.routes().permission_create(), &body)
                .await?;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        name: &'a str,
        new_name: &'a str,
        description: &'a str,
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
            });
            self.base
                .post(&self.base.routes().permission_update(), &body)
                .await?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if name.is_empty() {
                return Err(Error::invalid_argument("name"));
            }
            self.base
                .post(&self.base.routes().permission_delete(), &json!({ "name": name }))
                .await?;
            Ok(())
        })
    }

    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Permission>>> {
        Box::pin(async move {
            let res: LoadAllResponse = self
                .base
                .get_json(&self.base.routes().permission_load_all(), &[])
                .await?;
            Ok(res.permissions)
        })
    }
}
