//! Local form validation, run before any call to the document store.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::lifecycle::{creation_issue_date, initial_status, CreationStatusError};
use super::model::{CertificateForm, CertificateKind, CertificateStatus};

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} is required"))
            .with_suggestion(format!("Fill in {} before submitting", label.to_lowercase()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {suggestion}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Every field-level problem found on one form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Please fill in all required fields")?;
        if !self.errors.is_empty() {
            let fields = self.fields().join(", ");
            write!(f, " ({fields})")?;
        }
        Ok(())
    }
}

/// Anything that can check its own state before being sent anywhere.
pub trait Validator {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// A field that must be filled before a certificate can be created.
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    pub field: &'static str,
    pub label: &'static str,
}

const fn req(field: &'static str, label: &'static str) -> RequiredField {
    RequiredField { field, label }
}

const STUDENT: RequiredField = req("student_id", "Student");

impl CertificateKind {
    pub fn required_fields(self) -> &'static [RequiredField] {
        match self {
            CertificateKind::Transfer => const { &[
                STUDENT,
                req("date_of_leaving", "Date of leaving"),
                req("reason_for_transfer", "Reason for transfer"),
            ] },
            CertificateKind::Course => const { &[
                STUDENT,
                req("course_name", "Course name"),
                req("completion_date", "Completion date"),
            ] },
            CertificateKind::Progress => const { &[
                STUDENT,
                req("academic_year", "Academic year"),
                req("term", "Term"),
            ] },
            CertificateKind::Bonafide => const { &[
                STUDENT,
                req("purpose", "Purpose"),
                req("academic_year", "Academic year"),
            ] },
            CertificateKind::AdharExtract => const { &[
                STUDENT,
                req("student_name", "Student name"),
                req("admission_no", "Admission number"),
                req("class_name", "Class"),
                req("section", "Section"),
                req("adhar_number", "Adhar number"),
                req("purpose", "Purpose"),
                req("academic_year", "Academic year"),
                req("guardian_name", "Guardian name"),
                req("guardian_relationship", "Guardian relationship"),
                req("contact_number", "Contact number"),
                req("address", "Address"),
                req("father_name", "Father's name"),
                req("mother_name", "Mother's name"),
                req("date_of_birth", "Date of birth"),
                req("verified_by", "Verified by"),
            ] },
            CertificateKind::Appreciation => const { &[STUDENT, req("achievement", "Achievement")] },
            CertificateKind::Character => const { &[STUDENT, req("conduct", "Conduct")] },
        }
    }
}

impl Validator for CertificateForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let values = self.to_value();
        let mut errors = ValidationErrors::new();
        for required in self.kind().required_fields() {
            let value = crate::fields::text(&values, &[required.field]);
            validate_required(&value, required.field, required.label, &mut errors);
        }
        errors.into_result()
    }
}

/// A validated form ready to be posted, with its final status and issue date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateSubmission {
    #[serde(flatten)]
    pub form: CertificateForm,
    pub status: CertificateStatus,
}

impl CertificateSubmission {
    /// Validate `form` and resolve the stored status and issue date.
    pub fn prepare(
        mut form: CertificateForm,
        requested: CertificateStatus,
        today: NaiveDate,
    ) -> Result<Self, ValidationErrors> {
        form.validate()?;
        let kind = form.kind();
        let status = initial_status(kind, requested).map_err(|err| match err {
            CreationStatusError::Cancelled => ValidationErrors::single(ValidationError::new(
                "status",
                err.to_string(),
            )
            .with_suggestion("Save as draft, submit for approval or issue")),
        })?;
        let supplied = if kind.issues_immediately() {
            form.issue_date
        } else {
            None
        };
        form.issue_date = creation_issue_date(status, supplied, today);
        Ok(Self { form, status })
    }

    pub fn kind(&self) -> CertificateKind {
        self.form.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn transfer_form() -> CertificateForm {
        let mut form = CertificateForm::new(CertificateKind::Transfer);
        form.merge_patch(&json!({
            "student_id": "S1",
            "student_name": "Rahim",
            "date_of_leaving": "2025-01-10",
            "reason_for_transfer": "Relocation"
        }))
        .unwrap();
        form
    }

    #[test]
    fn missing_fields_are_listed() {
        let form = CertificateForm::new(CertificateKind::Course);
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["student_id", "course_name", "completion_date"]
        );
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let mut form = transfer_form();
        form.merge_patch(&json!({ "reason_for_transfer": "   " })).unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["reason_for_transfer"]);
    }

    #[test]
    fn adhar_extract_requires_sixteen_fields() {
        let errors = CertificateForm::new(CertificateKind::AdharExtract)
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 16);
    }

    #[test]
    fn character_conduct_has_a_default() {
        let mut form = CertificateForm::new(CertificateKind::Character);
        form.student_id = "S9".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn issued_submission_gets_todays_date() {
        let submission =
            CertificateSubmission::prepare(transfer_form(), CertificateStatus::Issued, today())
                .unwrap();
        assert_eq!(submission.status, CertificateStatus::Issued);
        assert_eq!(submission.form.issue_date, Some(today()));
    }

    #[test]
    fn draft_submission_has_no_issue_date() {
        let mut form = transfer_form();
        form.issue_date = NaiveDate::from_ymd_opt(2024, 5, 5);
        let submission =
            CertificateSubmission::prepare(form, CertificateStatus::Draft, today()).unwrap();
        assert_eq!(submission.form.issue_date, None);

        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["status"], "draft");
        assert!(body["issue_date"].is_null());
    }

    #[test]
    fn appreciation_keeps_a_chosen_issue_date() {
        let mut form = CertificateForm::new(CertificateKind::Appreciation);
        form.merge_patch(&json!({ "student_id": "S2", "achievement": "First place" }))
            .unwrap();
        form.issue_date = NaiveDate::from_ymd_opt(2025, 1, 2);

        let submission =
            CertificateSubmission::prepare(form, CertificateStatus::Draft, today()).unwrap();
        assert_eq!(submission.status, CertificateStatus::Issued);
        assert_eq!(submission.form.issue_date, NaiveDate::from_ymd_opt(2025, 1, 2));
    }

    #[test]
    fn cancelled_is_rejected_at_creation() {
        let errors =
            CertificateSubmission::prepare(transfer_form(), CertificateStatus::Cancelled, today())
                .unwrap_err();
        assert_eq!(errors.fields(), vec!["status"]);
    }
}
