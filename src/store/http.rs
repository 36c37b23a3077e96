use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error_body::BackendErrorBody;
use super::{
    created_record, list_items, records_from_body, DashboardCounts, DocumentStore, StoreError,
    StoreFactory,
};
use crate::certificate::model::{CertificateKind, CertificateRecord, CertificateStatus};
use crate::certificate::validation::CertificateSubmission;

/// REST client for the document store, bound to one caller's bearer token.
#[derive(Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpDocumentStore {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get(&self, path: &str) -> Result<Response, StoreError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::check(response, path).await
    }

    async fn get_json(&self, path: &str) -> Result<Value, StoreError> {
        let response = self.get(path).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Decode(format!("{path}: {e}")))
    }

    /// Pass successful responses through; turn failures into a normalized error.
    async fn check(response: Response, path: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            log::warn!("Document store has no resource at {}", path);
            return Err(StoreError::NotFound(path.to_string()));
        }

        let message = BackendErrorBody::parse_bytes(&body)
            .into_message(&format!("Request to {path} failed with status {status}"));
        log::error!("Document store rejected {}: {} ({})", path, message, status);
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn list(&self, kind: CertificateKind) -> Result<Vec<CertificateRecord>, StoreError> {
        let body = self.get_json(kind.collection_path()).await?;
        Ok(records_from_body(kind, body))
    }

    async fn fetch(
        &self,
        kind: CertificateKind,
        id: &str,
    ) -> Result<CertificateRecord, StoreError> {
        let path = format!("{}/{}", kind.collection_path(), id);
        let body = self.get_json(&path).await?;
        CertificateRecord::from_value(kind, body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create(
        &self,
        submission: &CertificateSubmission,
    ) -> Result<CertificateRecord, StoreError> {
        let path = submission.kind().collection_path();
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(submission)
            .send()
            .await?;
        let response = Self::check(response, path).await?;

        let body = response.bytes().await?;
        let body = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))?
        };
        created_record(submission, body)
    }

    async fn update_status(
        &self,
        kind: CertificateKind,
        id: &str,
        status: CertificateStatus,
    ) -> Result<(), StoreError> {
        let path = format!("{}/{}/status", kind.collection_path(), id);
        let response = self
            .client
            .patch(self.url(&path))
            .bearer_auth(&self.token)
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::check(response, &path).await?;
        Ok(())
    }

    async fn download_pdf(&self, kind: CertificateKind, id: &str) -> Result<Vec<u8>, StoreError> {
        let path = format!("{}/{}/pdf", kind.collection_path(), id);
        let response = self.get(&path).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn dashboard(&self) -> Result<DashboardCounts, StoreError> {
        let body = self.get_json("certificates/dashboard").await?;
        Ok(DashboardCounts::from_body(&body))
    }

    async fn students(&self) -> Result<Vec<Value>, StoreError> {
        Ok(list_items(self.get_json("students").await?, "students"))
    }

    async fn staff(&self) -> Result<Vec<Value>, StoreError> {
        Ok(list_items(self.get_json("staff").await?, "staff"))
    }

    async fn classes(&self) -> Result<Vec<Value>, StoreError> {
        Ok(list_items(self.get_json("classes").await?, "classes"))
    }

    async fn institution(&self) -> Result<Value, StoreError> {
        self.get_json("institution").await
    }

    async fn school_branding(&self) -> Result<Value, StoreError> {
        self.get_json("school-branding").await
    }

    async fn institution_settings(&self) -> Result<Value, StoreError> {
        self.get_json("institution/settings").await
    }
}

/// Hands out [`HttpDocumentStore`]s sharing one connection pool.
#[derive(Clone)]
pub struct HttpStoreFactory {
    client: Client,
    base_url: String,
}

impl HttpStoreFactory {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl StoreFactory for HttpStoreFactory {
    fn for_token(&self, token: &str) -> Arc<dyn DocumentStore> {
        Arc::new(HttpDocumentStore::new(
            self.client.clone(),
            self.base_url.clone(),
            token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let store = HttpDocumentStore::new(Client::new(), "http://backend/api/", "t");
        assert_eq!(
            store.url("/transfer-certificates"),
            "http://backend/api/transfer-certificates"
        );
        assert_eq!(store.url("students"), "http://backend/api/students");
    }
}
