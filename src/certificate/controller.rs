//! Per-session certificate workflow: list and form views, record refresh,
//! creation and status changes for every certificate kind.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use super::filter::{filter_records, StatusFilter};
use super::model::{CertificateForm, CertificateKind, CertificateRecord, CertificateStatus};
use super::student::fill_from_student;
use super::validation::CertificateSubmission;
use crate::error::{CertificateError, Result};
use crate::institution::{InstitutionMode, QuickPick};
use crate::people::{person_id, PeopleDirectory};
use crate::render::common::download_filename;
use crate::store::{DashboardCounts, DocumentStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Form,
}

/// View state of one certificate kind.
#[derive(Debug, Clone, Serialize)]
pub struct KindState {
    pub view: ViewMode,
    pub records: Vec<CertificateRecord>,
    pub form: CertificateForm,
    pub selected_student: Option<Value>,
}

impl KindState {
    fn new(kind: CertificateKind) -> Self {
        Self {
            view: ViewMode::List,
            records: Vec::new(),
            form: CertificateForm::new(kind),
            selected_student: None,
        }
    }

    fn reset_form(&mut self) {
        self.form = CertificateForm::new(self.form.kind());
        self.selected_student = None;
    }
}

pub struct CertificateController {
    store: Arc<dyn DocumentStore>,
    mode: InstitutionMode,
    people: PeopleDirectory,
    kinds: HashMap<CertificateKind, KindState>,
}

impl CertificateController {
    pub fn new(store: Arc<dyn DocumentStore>, mode: InstitutionMode) -> Self {
        let kinds = CertificateKind::ALL
            .into_iter()
            .map(|kind| (kind, KindState::new(kind)))
            .collect();
        Self {
            store,
            mode,
            people: PeopleDirectory::default(),
            kinds,
        }
    }

    /// Load the people directories and the records of every visible kind.
    ///
    /// Failures are logged and leave the affected lists empty.
    pub async fn bootstrap(&mut self) {
        self.people = PeopleDirectory::load(self.store.as_ref()).await;
        for kind in self.mode.visible_kinds() {
            if let Err(e) = self.refresh(kind).await {
                log::warn!("Initial load of {} certificates failed: {}", kind, e);
            }
        }
    }

    pub fn mode(&self) -> InstitutionMode {
        self.mode
    }

    pub fn people(&self) -> &PeopleDirectory {
        &self.people
    }

    pub fn set_people(&mut self, people: PeopleDirectory) {
        self.people = people;
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn state(&self, kind: CertificateKind) -> &KindState {
        self.kinds
            .get(&kind)
            .unwrap_or_else(|| unreachable!("every kind is initialised in new()"))
    }

    fn state_mut(&mut self, kind: CertificateKind) -> &mut KindState {
        self.kinds
            .entry(kind)
            .or_insert_with(|| KindState::new(kind))
    }

    /// Re-fetch the records of `kind`. The previous list survives a failure.
    pub async fn refresh(&mut self, kind: CertificateKind) -> Result<&[CertificateRecord]> {
        let records = self.store.list(kind).await?;
        log::debug!("Fetched {} {} certificates", records.len(), kind);
        let state = self.state_mut(kind);
        state.records = records;
        Ok(&state.records)
    }

    pub fn open_form(&mut self, kind: CertificateKind) -> &KindState {
        let state = self.state_mut(kind);
        state.reset_form();
        state.view = ViewMode::Form;
        state
    }

    pub fn show_list(&mut self, kind: CertificateKind) -> &KindState {
        let state = self.state_mut(kind);
        state.view = ViewMode::List;
        state
    }

    pub fn reset_form(&mut self, kind: CertificateKind) -> &CertificateForm {
        let state = self.state_mut(kind);
        state.reset_form();
        &state.form
    }

    /// Apply typed field values to the form of `kind`.
    pub fn update_form(&mut self, kind: CertificateKind, patch: &Value) -> Result<&CertificateForm> {
        let state = self.state_mut(kind);
        let mut form = state.form.clone();
        form.merge_patch(patch)
            .map_err(|e| CertificateError::InvalidForm(e.to_string()))?;
        state.form = form;
        Ok(&state.form)
    }

    /// Copy a student's details into the form of `kind`.
    pub fn select_student(&mut self, kind: CertificateKind, student: &Value) -> &CertificateForm {
        let state = self
            .kinds
            .entry(kind)
            .or_insert_with(|| KindState::new(kind));
        fill_from_student(&mut state.form, student, &self.people.classes);
        state.selected_student = Some(student.clone());
        &state.form
    }

    /// Like [`select_student`](Self::select_student), looking the student up by id.
    pub fn select_student_by_id(
        &mut self,
        kind: CertificateKind,
        student_id: &str,
    ) -> Result<&CertificateForm> {
        let student = self
            .people
            .find_student(student_id)
            .cloned()
            .ok_or_else(|| CertificateError::NotFound(format!("student {student_id}")))?;
        Ok(self.select_student(kind, &student))
    }

    /// Write a suggested phrase into its target field, as if typed.
    pub fn apply_quick_pick(
        &mut self,
        kind: CertificateKind,
        pick: QuickPick,
        index: usize,
    ) -> Result<&CertificateForm> {
        let unavailable = || CertificateError::SuggestionUnavailable { pick, index };
        let phrase = self
            .mode
            .suggestions()
            .and_then(|s| s.phrase(pick, index))
            .ok_or_else(unavailable)?;
        let field = pick.target_field(kind).ok_or_else(unavailable)?;
        self.update_form(kind, &serde_json::json!({ field: phrase }))
    }

    pub fn filter(
        &self,
        kind: CertificateKind,
        search: &str,
        status: StatusFilter,
    ) -> Vec<&CertificateRecord> {
        filter_records(&self.state(kind).records, search, status)
    }

    /// Validate and submit the current form of `kind`.
    pub async fn create(
        &mut self,
        kind: CertificateKind,
        requested: CertificateStatus,
    ) -> Result<CertificateRecord> {
        let form = self.state(kind).form.clone();
        self.create_from(form, requested, Local::now().date_naive())
            .await
    }

    /// Validate and submit `form`, stamping `today` as the issue date if issued.
    ///
    /// Nothing is sent to the store when validation fails.
    pub async fn create_from(
        &mut self,
        form: CertificateForm,
        requested: CertificateStatus,
        today: NaiveDate,
    ) -> Result<CertificateRecord> {
        let kind = form.kind();
        let submission = CertificateSubmission::prepare(form, requested, today)?;
        let record = self.store.create(&submission).await.map_err(|e| {
            log::error!("Failed to create {} certificate: {}", kind, e);
            e
        })?;
        log::info!(
            "Created {} certificate {} for {} ({})",
            kind,
            record.id,
            record.student_name,
            record.status
        );

        {
            let state = self.state_mut(kind);
            state.reset_form();
            state.view = ViewMode::List;
        }
        let refreshed = self.refresh(kind).await.map(|_| ());
        if let Err(e) = refreshed {
            log::warn!("Refresh after creating {} failed, keeping local copy: {}", kind, e);
            let state = self.state_mut(kind);
            if !state.records.iter().any(|r| r.id == record.id) {
                state.records.insert(0, record.clone());
            }
        }
        Ok(record)
    }

    /// Move a transfer certificate to `new_status`.
    pub async fn change_status(
        &mut self,
        kind: CertificateKind,
        id: &str,
        new_status: CertificateStatus,
    ) -> Result<CertificateRecord> {
        if !kind.supports_status_change() {
            return Err(CertificateError::StatusChangeUnsupported(kind));
        }
        let current = self.record(kind, id).await?;
        current.status.transition_to(new_status)?;

        self.store
            .update_status(kind, id, new_status)
            .await
            .map_err(|e| {
                log::error!("Failed to move {} {} to {}: {}", kind, id, new_status, e);
                e
            })?;
        log::info!("{} certificate {} moved {} -> {}", kind, id, current.status, new_status);

        if let Err(e) = self.refresh(kind).await {
            log::warn!("Refresh after status change failed: {}", e);
        }
        match self.state(kind).records.iter().find(|r| r.id == id) {
            Some(record) if record.status == new_status => Ok(record.clone()),
            _ => {
                let mut updated = current;
                updated.status = new_status;
                if new_status != CertificateStatus::Issued {
                    updated.issue_date = None;
                } else if updated.issue_date.is_none() {
                    updated.issue_date = Some(Local::now().date_naive());
                }
                let state = self.state_mut(kind);
                if let Some(slot) = state.records.iter_mut().find(|r| r.id == id) {
                    *slot = updated.clone();
                }
                Ok(updated)
            }
        }
    }

    /// A record from the loaded list, or fetched from the store.
    pub async fn record(&self, kind: CertificateKind, id: &str) -> Result<CertificateRecord> {
        if let Some(record) = self.state(kind).records.iter().find(|r| r.id == id) {
            return Ok(record.clone());
        }
        Ok(self.store.fetch(kind, id).await?)
    }

    /// Server-rendered PDF with its download file name.
    pub async fn download_pdf(
        &self,
        kind: CertificateKind,
        id: &str,
    ) -> Result<(String, Vec<u8>)> {
        let record = self.record(kind, id).await?;
        let bytes = self.store.download_pdf(kind, id).await?;
        Ok((download_filename(&record), bytes))
    }

    /// Dashboard totals; zero when the store cannot answer.
    pub async fn dashboard(&self) -> DashboardCounts {
        self.store.dashboard().await.unwrap_or_else(|e| {
            log::warn!("Dashboard totals unavailable: {}", e);
            DashboardCounts::default()
        })
    }

    pub fn selected_student_id(&self, kind: CertificateKind) -> Option<String> {
        self.state(kind)
            .selected_student
            .as_ref()
            .and_then(person_id)
    }
}
