//! Shared plumbing for the management services

use std::sync::Arc;

use api_client::{Client, HttpResponse, RequestOptions, Result, Routes};
use common::Secret;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Client plus the management key every façade attaches.
#[derive(Clone)]
pub(crate) struct ManagementBase {
    client: Arc<Client>,
    key: Secret<String>,
}

impl ManagementBase {
    pub(crate) fn new(client: Arc<Client>, key: Secret<String>) -> Self {
        Self { client, key }
    }

    pub(crate) fn routes(&self) -> &Routes {
        self.client.routes()
    }

    fn options(&self) -> RequestOptions {
        RequestOptions::new().with_management_key(self.key.clone())
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        self.client.do_post(path, Some(body), &self.options()).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.post(path, body).await?.bind()
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut options = self.options();
        for (name, value) in query {
            options = options.with_query(*name, *value);
        }
        self.client.get_json(path, &options).await
    }
}
