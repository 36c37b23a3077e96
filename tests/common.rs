#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Local;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use school_certificates::certificate::model::{CertificateKind, CertificateRecord, CertificateStatus};
use school_certificates::certificate::validation::CertificateSubmission;
use school_certificates::store::{created_record, DashboardCounts, DocumentStore, StoreError, StoreFactory};

/// In-memory document store that counts the calls it receives.
pub struct MockDocumentStore {
    records: Mutex<HashMap<CertificateKind, Vec<CertificateRecord>>>,
    pub students: Vec<Value>,
    pub staff: Vec<Value>,
    pub classes: Vec<Value>,
    pub settings: Value,
    create_calls: AtomicUsize,
    list_calls: AtomicUsize,
    status_calls: AtomicUsize,
    fail_lists: AtomicBool,
    institution_calls: AtomicUsize,
    fail_institution: AtomicBool,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            students: vec![
                json!({
                    "id": "S1",
                    "name": "Rahim Uddin",
                    "admission_no": "A-101",
                    "class_id": "c1",
                    "section_id": "B",
                    "father_name": "Karim Uddin",
                    "guardian_phone": "01700000000",
                    "created_at": "2020-01-05T09:00:00Z"
                }),
                json!({ "id": "S2", "student_name": "Ayesha", "admission_number": "A-102" }),
            ],
            staff: vec![json!({ "id": "T1", "name": "Mr. Hasan", "employee_id": "E-7" })],
            classes: vec![json!({ "id": "c1", "name": "Class Five", "sections": [] })],
            settings: json!({ "institution_type": "school" }),
            create_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            fail_lists: AtomicBool::new(false),
            institution_calls: AtomicUsize::new(0),
            fail_institution: AtomicBool::new(false),
        }
    }

    pub fn madrasah() -> Self {
        Self {
            settings: json!({ "institution_type": "madrasah" }),
            ..Self::new()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn institution_calls(&self) -> usize {
        self.institution_calls.load(Ordering::SeqCst)
    }

    pub fn fail_institution(&self, fail: bool) {
        self.fail_institution.store(fail, Ordering::SeqCst);
    }

    pub async fn seed(&self, kind: CertificateKind, record: Value) {
        let record = CertificateRecord::from_value(kind, record).expect("valid seed record");
        self.records.lock().await.entry(kind).or_default().push(record);
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn list(&self, kind: CertificateKind) -> Result<Vec<CertificateRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 503,
                message: "Service unavailable".into(),
            });
        }
        Ok(self.records.lock().await.get(&kind).cloned().unwrap_or_default())
    }

    async fn fetch(&self, kind: CertificateKind, id: &str) -> Result<CertificateRecord, StoreError> {
        self.records
            .lock()
            .await
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.id == id).cloned())
            .ok_or_else(|| StoreError::NotFound(format!("{kind} {id}")))
    }

    async fn create(&self, submission: &CertificateSubmission) -> Result<CertificateRecord, StoreError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = submission.kind();
        let record = created_record(submission, json!({ "id": format!("{}-{}", kind.slug(), n) }))?;
        self.records
            .lock()
            .await
            .entry(kind)
            .or_default()
            .insert(0, record.clone());
        Ok(record)
    }

    async fn update_status(
        &self,
        kind: CertificateKind,
        id: &str,
        status: CertificateStatus,
    ) -> Result<(), StoreError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&kind)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| StoreError::NotFound(format!("{kind} {id}")))?;
        record.status = status;
        record.issue_date = match status {
            CertificateStatus::Issued => record.issue_date.or(Some(Local::now().date_naive())),
            _ => None,
        };
        Ok(())
    }

    async fn download_pdf(&self, _kind: CertificateKind, _id: &str) -> Result<Vec<u8>, StoreError> {
        Ok(b"%PDF-1.4".to_vec())
    }

    async fn dashboard(&self) -> Result<DashboardCounts, StoreError> {
        Err(StoreError::Decode("dashboard unavailable".into()))
    }

    async fn students(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.students.clone())
    }

    async fn staff(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.staff.clone())
    }

    async fn classes(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.classes.clone())
    }

    async fn institution(&self) -> Result<Value, StoreError> {
        self.institution_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_institution.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 503,
                message: "Service unavailable".into(),
            });
        }
        Ok(json!({ "name": "Green Valley School", "address": "Dhaka", "phone": "0123" }))
    }

    async fn school_branding(&self) -> Result<Value, StoreError> {
        Err(StoreError::NotFound("school-branding".into()))
    }

    async fn institution_settings(&self) -> Result<Value, StoreError> {
        Ok(self.settings.clone())
    }
}

/// Hands the same mock to every session.
pub struct MockStoreFactory(pub Arc<MockDocumentStore>);

impl StoreFactory for MockStoreFactory {
    fn for_token(&self, _token: &str) -> Arc<dyn DocumentStore> {
        self.0.clone()
    }
}
