//! User management
//!
//! Every mutating call except `delete` answers with the updated user record,
//! wrapped as `{"user": {...}}` on the wire.

use api_client::{BoxFuture, Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use session::UserResponse;

use crate::base::ManagementBase;
use crate::types::UserRequest;

pub trait UserApi: Send + Sync {
    fn create<'a>(
        &'a self,
        login_id: &'a str,
        user: &'a UserRequest,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    /// Replace every mutable field of an existing user.
    fn update<'a>(
        &'a self,
        login_id: &'a str,
        user: &'a UserRequest,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn delete<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<()>>;

    fn load<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>>;

    fn load_by_user_id<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserResponse>>;

    /// Users matching every filter; empty filters match all. `limit` of 0
    /// means the service default.
    fn search_all<'a>(
        &'a self,
        tenant_ids: &'a [String],
        role_names: &'a [String],
        limit: i32,
    ) -> BoxFuture<'a, Result<Vec<UserResponse>>>;

    fn activate<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>>;

    fn deactivate<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>>;

    fn update_email<'a>(
        &'a self,
        login_id: &'a str,
        email: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn update_phone<'a>(
        &'a self,
        login_id: &'a str,
        phone: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn update_display_name<'a>(
        &'a self,
        login_id: &'a str,
        display_name: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    /// Project-level roles.
    fn add_roles<'a>(
        &'a self,
        login_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn remove_roles<'a>(
        &'a self,
        login_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn add_tenant<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn remove_tenant<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>>;

    /// Roles scoped to one tenant the user belongs to.
    fn add_tenant_roles<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>>;

    fn remove_tenant_roles<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>>;
}

pub struct UserService {
    base: ManagementBase,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserResponse,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<UserResponse>,
}

fn require(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(name));
    }
    Ok(())
}

fn user_body(login_id: &str, user: &UserRequest) -> Value {
    json!({
        "loginId": login_id,
        "email": user.email,
        "phone": user.phone,
        "name": user.display_name,
        "roleNames": user.role_names,
        "userTenants": user.tenants,
    })
}

impl UserService {
    pub(crate) fn new(base: ManagementBase) -> Self {
        Self { base }
    }

    async fn post_user(&self, path: &str, body: &Value) -> Result<UserResponse> {
        let res: UserEnvelope = self.base.post_json(path, body).await?;
        Ok(res.user)
    }

    async fn load_by(&self, param: &str, value: &str) -> Result<UserResponse> {
        let res: UserEnvelope = self
            .base
            .get_json(&self.base.routes().user_load(), &[(param, value)])
            .await?;
        Ok(res.user)
    }

    async fn set_status(&self, login_id: &str, status: &str) -> Result<UserResponse> {
        require(login_id, "loginID")?;
        let body = json!({ "loginId": login_id, "status": status });
        self.post_user(&self.base.routes().user_update_status(), &body)
            .await
    }
}

impl UserApi for UserService {
    fn create<'a>(
        &'a self,
        login_id: &'a str,
        user: &'a UserRequest,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            self.post_user(&self.base.routes().user_create(), &user_body(login_id, user))
                .await
        })
    }

    fn update<'a>(
        &'a self,
        login_id: &'a str,
        user: &'a UserRequest,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            self.post_user(&self.base.routes().user_update(), &user_body(login_id, user))
                .await
        })
    }

    fn delete<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            self.base
                .post(
                    &self.base.routes().user_delete(),
                    &json!({ "loginId": login_id }),
                )
                .await?;
            Ok(())
        })
    }

    fn load<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            self.load_by("loginId", login_id).await
        })
    }

    fn load_by_user_id<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(user_id, "userID")?;
            self.load_by("userId", user_id).await
        })
    }

    fn search_all<'a>(
        &'a self,
        tenant_ids: &'a [String],
        role_names: &'a [String],
        limit: i32,
    ) -> BoxFuture<'a, Result<Vec<UserResponse>>> {
        Box::pin(async move {
            if limit < 0 {
                return Err(Error::invalid_argument("limit"));
            }
            let body = json!({
                "tenantIds": tenant_ids,
                "roleNames": role_names,
                "limit": limit,
            });
            let res: UsersEnvelope = self
                .base
                .post_json(&self.base.routes().user_search_all(), &body)
                .await?;
            Ok(res.users)
        })
    }

    fn activate<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(self.set_status(login_id, "enabled"))
    }

    fn deactivate<'a>(&'a self, login_id: &'a str) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(self.set_status(login_id, "disabled"))
    }

    fn update_email<'a>(
        &'a self,
        login_id: &'a str,
        email: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            let body = json!({ "loginId": login_id, "email": email, "verified": verified });
            self.post_user(&self.base.routes().user_update_email(), &body)
                .await
        })
    }

    fn update_phone<'a>(
        &'a self,
        login_id: &'a str,
        phone: &'a str,
        verified: bool,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            let body = json!({ "loginId": login_id, "phone": phone, "verified": verified });
            self.post_user(&self.base.routes().user_update_phone(), &body)
                .await
        })
    }

    fn update_display_name<'a>(
        &'a self,
        login_id: &'a str,
        display_name: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            let body = json!({ "loginId": login_id, "displayName": display_name });
            self.post_user(&self.base.routes().user_update_name(), &body)
                .await
        })
    }

    fn add_roles<'a>(
        &'a self,
        login_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            let body = json!({ "loginId": login_id, "roleNames": roles });
            self.post_user(&self.base.routes().user_add_role(), &body)
                .await
        })
    }

    fn remove_roles<'a>(
        &'a self,
        login_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            let body = json!({ "loginId": login_id, "roleNames": roles });
            self.post_user(&self.base.routes().user_remove_role(), &body)
                .await
        })
    }

    fn add_tenant<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            require(tenant_id, "tenantID")?;
            let body = json!({ "loginId": login_id, "tenantId": tenant_id });
            self.post_user(&self.base.routes().user_add_tenant(), &body)
                .await
        })
    }

    fn remove_tenant<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            require(tenant_id, "tenantID")?;
            let body = json!({ "loginId": login_id, "tenantId": tenant_id });
            self.post_user(&self.base.routes().user_remove_tenant(), &body)
                .await
        })
    }

    fn add_tenant_roles<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            require(tenant_id, "tenantID")?;
            let body = json!({ "loginId": login_id, "tenantId": tenant_id, "roleNames": roles });
            self.post_user(&self.base.routes().user_add_role(), &body)
                .await
        })
    }

    fn remove_tenant_roles<'a>(
        &'a self,
        login_id: &'a str,
        tenant_id: &'a str,
        roles: &'a [String],
    ) -> BoxFuture<'a, Result<UserResponse>> {
        Box::pin(async move {
            require(login_id, "loginID")?;
            require(tenant_id, "tenantID")?;
            let body = json!({ "loginId": login_id, "tenantId": tenant_id, "roleNames": roles });
            self.post_user(&self.base.routes().user_remove_role(), &body)
                .await
        })
    }
}
