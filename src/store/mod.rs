//! Access to the external document store.
//!
//! The store owns every certificate record and the people directories. The
//! service only ever talks to it through [`DocumentStore`], so tests can swap
//! the HTTP client for an in-memory double.

pub mod error_body;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::certificate::model::{CertificateKind, CertificateRecord, CertificateStatus};
use crate::certificate::validation::CertificateSubmission;

pub use self::http::{HttpDocumentStore, HttpStoreFactory};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("unexpected document store response: {0}")]
    Decode(String),
}

/// Headline totals shown above the certificate tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardCounts {
    pub total_issued: u64,
    pub pending: u64,
}

impl DashboardCounts {
    /// Missing or non-numeric totals count as zero.
    pub fn from_body(body: &Value) -> Self {
        let count = |key: &str| body.get(key).and_then(Value::as_u64).unwrap_or(0);
        Self {
            total_issued: count("total_issued"),
            pending: count("pending"),
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, kind: CertificateKind) -> Result<Vec<CertificateRecord>, StoreError>;

    async fn fetch(&self, kind: CertificateKind, id: &str)
        -> Result<CertificateRecord, StoreError>;

    async fn create(
        &self,
        submission: &CertificateSubmission,
    ) -> Result<CertificateRecord, StoreError>;

    /// Only defined for transfer certificates on the backend.
    async fn update_status(
        &self,
        kind: CertificateKind,
        id: &str,
        status: CertificateStatus,
    ) -> Result<(), StoreError>;

    async fn download_pdf(&self, kind: CertificateKind, id: &str) -> Result<Vec<u8>, StoreError>;

    async fn dashboard(&self) -> Result<DashboardCounts, StoreError>;

    async fn students(&self) -> Result<Vec<Value>, StoreError>;

    async fn staff(&self) -> Result<Vec<Value>, StoreError>;

    async fn classes(&self) -> Result<Vec<Value>, StoreError>;

    async fn institution(&self) -> Result<Value, StoreError>;

    async fn school_branding(&self) -> Result<Value, StoreError>;

    async fn institution_settings(&self) -> Result<Value, StoreError>;
}

/// Builds a store bound to one caller's bearer token.
pub trait StoreFactory: Send + Sync {
    fn for_token(&self, token: &str) -> std::sync::Arc<dyn DocumentStore>;
}

/// Items of a list body, bare or wrapped under `key`.
pub fn list_items(body: Value, key: &str) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Parse a list body into records, skipping malformed entries.
pub fn records_from_body(kind: CertificateKind, body: Value) -> Vec<CertificateRecord> {
    list_items(body, kind.collection_key())
        .into_iter()
        .filter_map(|item| match CertificateRecord::from_value(kind, item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed {} record: {}", kind, e);
                None
            }
        })
        .collect()
}

/// Build the record returned by a create call.
///
/// The backend may answer with the full record or only a subset (often just the
/// id), so the response is laid over the submitted fields before parsing.
pub fn created_record(
    submission: &CertificateSubmission,
    response: Value,
) -> Result<CertificateRecord, StoreError> {
    let mut merged = match serde_json::to_value(submission) {
        Ok(Value::Object(map)) => map,
        Ok(_) => serde_json::Map::new(),
        Err(e) => return Err(StoreError::Decode(e.to_string())),
    };
    let response = match response {
        Value::Object(mut map) => match map.remove("certificate").or_else(|| map.remove("data")) {
            Some(Value::Object(inner)) => inner,
            Some(_) | None => map,
        },
        _ => serde_json::Map::new(),
    };
    for (key, value) in response {
        if !value.is_null() {
            merged.insert(key, value);
        }
    }
    CertificateRecord::from_value(submission.kind(), Value::Object(merged))
        .map_err(|e| StoreError::Decode(e.to_string()))
}
