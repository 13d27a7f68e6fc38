use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::Collection;

/// Everything that can go wrong talking to the data service. Transport
/// failures never reached the store; store failures carry the message the
/// store reported.
#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Store { message: String },
}

impl DatastoreError {
    pub fn store(message: impl Into<String>) -> Self {
        DatastoreError::Store {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Request/response client for the managed data service: row reads and
/// mutations, password sign-in, object storage and function invocation all go
/// through the same base URL and service key.
#[derive(Clone, Debug)]
pub struct DatastoreClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl DatastoreClient {
    pub fn new(base_url: Url, service_key: String) -> Result<Self, DatastoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            service_key,
        })
    }

    fn rest_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.as_str())
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    /// All rows of a collection, newest first.
    pub async fn fetch_rows(&self, collection: Collection) -> Result<Vec<Value>, DatastoreError> {
        let resp = self
            .authed(self.client.get(self.rest_url(collection)))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        Self::read_rows(resp).await
    }

    pub async fn fetch_row(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, DatastoreError> {
        let resp = self
            .authed(self.client.get(self.rest_url(collection)))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .send()
            .await?;
        let mut rows = Self::read_rows(resp).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    /// Partial update of one row. Returns the updated rows so the caller can
    /// tell a no-op apart from a real write.
    pub async fn update_rows(
        &self,
        collection: Collection,
        id: &str,
        body: &Value,
    ) -> Result<Vec<Value>, DatastoreError> {
        let resp = self
            .authed(self.client.patch(self.rest_url(collection)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        Self::read_rows(resp).await
    }

    /// Deletes one row, returning the deleted rows (empty when nothing
    /// matched the id).
    pub async fn delete_rows(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Vec<Value>, DatastoreError> {
        let resp = self
            .authed(self.client.delete(self.rest_url(collection)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Self::read_rows(resp).await
    }

    /// Password sign-in against the managed auth endpoint. Credential checks
    /// happen entirely on the service side.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, DatastoreError> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let resp = self
            .authed(self.client.post(url))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Self::store_error(resp).await)
        }
    }

    /// Uploads (or replaces) an object and returns its public URL.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DatastoreError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        let resp = self
            .authed(self.client.post(url))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(self.public_object_url(bucket, path))
        } else {
            Err(Self::store_error(resp).await)
        }
    }

    /// Removes an object again, e.g. when the row update after an upload
    /// failed and the file would otherwise be orphaned.
    pub async fn delete_object(&self, bucket: &str, path: &str) -> Result<(), DatastoreError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        let resp = self.authed(self.client.delete(url)).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::store_error(resp).await)
        }
    }

    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.base_url
        )
    }

    /// Invokes a service-side function (e.g. contact-mail dispatch).
    pub async fn invoke_function(
        &self,
        name: &str,
        payload: &Value,
    ) -> Result<Value, DatastoreError> {
        let url = format!("{}/functions/v1/{name}", self.base_url);
        let resp = self.authed(self.client.post(url)).json(payload).send().await?;
        if resp.status().is_success() {
            let text = resp.text().await?;
            Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
        } else {
            Err(Self::store_error(resp).await)
        }
    }

    async fn read_rows(resp: Response) -> Result<Vec<Value>, DatastoreError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Self::store_error(resp).await)
        }
    }

    /// Pulls the store's own message out of an error body; falls back to the
    /// status line when the body is not the expected JSON shape.
    async fn store_error(resp: Response) -> DatastoreError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                ["message", "msg", "error_description"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| format!("store responded with status {status}"));
        DatastoreError::store(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DatastoreClient {
        DatastoreClient::new(
            Url::parse("https://data.netieku.es/").unwrap(),
            "service-key".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        let c = client();
        assert_eq!(
            c.rest_url(Collection::RegisteredUsers),
            "https://data.netieku.es/rest/v1/registered_users"
        );
    }

    #[test]
    fn public_object_urls() {
        let c = client();
        assert_eq!(
            c.public_object_url("avatars", "u1/avatar-1.png"),
            "https://data.netieku.es/storage/v1/object/public/avatars/u1/avatar-1.png"
        );
    }

    #[test]
    fn store_error_display_is_the_raw_message() {
        let err = DatastoreError::store("duplicate key value violates unique constraint");
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint"
        );
    }
}
