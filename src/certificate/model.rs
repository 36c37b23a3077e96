//! Certificate records, their kind-specific payloads and the form data used to
//! build them.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use crate::fields;

/// The seven certificate kinds handled by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    Transfer,
    Course,
    Progress,
    Bonafide,
    #[serde(rename = "adhar")]
    AdharExtract,
    Appreciation,
    Character,
}

impl CertificateKind {
    pub const ALL: [CertificateKind; 7] = [
        CertificateKind::Transfer,
        CertificateKind::Course,
        CertificateKind::Progress,
        CertificateKind::Bonafide,
        CertificateKind::AdharExtract,
        CertificateKind::Appreciation,
        CertificateKind::Character,
    ];

    /// Path segment used by the service API.
    pub fn slug(self) -> &'static str {
        match self {
            CertificateKind::Transfer => "transfer",
            CertificateKind::Course => "course",
            CertificateKind::Progress => "progress",
            CertificateKind::Bonafide => "bonafide",
            CertificateKind::AdharExtract => "adhar",
            CertificateKind::Appreciation => "appreciation",
            CertificateKind::Character => "character",
        }
    }

    /// Collection path on the document store.
    pub fn collection_path(self) -> &'static str {
        match self {
            CertificateKind::Transfer => "transfer-certificates",
            CertificateKind::Course => "course-certificates",
            CertificateKind::Progress => "progress-reports",
            CertificateKind::Bonafide => "bonafide-certificates",
            CertificateKind::AdharExtract => "adhar-extracts",
            CertificateKind::Appreciation => "appreciation-certificates",
            CertificateKind::Character => "character-certificates",
        }
    }

    /// Key wrapping the record array in list responses.
    pub fn collection_key(self) -> &'static str {
        match self {
            CertificateKind::Transfer => "transfer_certificates",
            CertificateKind::Course => "course_certificates",
            CertificateKind::Progress => "progress_reports",
            CertificateKind::Bonafide => "bonafide_certificates",
            CertificateKind::AdharExtract => "adhar_extracts",
            CertificateKind::Appreciation => "appreciation_certificates",
            CertificateKind::Character => "character_certificates",
        }
    }

    /// Prefix of downloaded PDF file names.
    pub fn download_prefix(self) -> &'static str {
        match self {
            CertificateKind::Transfer => "TC",
            CertificateKind::Course => "Course_Certificate",
            CertificateKind::Progress => "Progress_Report",
            CertificateKind::Bonafide => "Bonafide_Certificate",
            CertificateKind::AdharExtract => "Adhar_Extract",
            CertificateKind::Appreciation => "Appreciation_Certificate",
            CertificateKind::Character => "Character_Certificate",
        }
    }

    /// Appreciation and character certificates skip the approval path.
    pub fn issues_immediately(self) -> bool {
        matches!(
            self,
            CertificateKind::Appreciation | CertificateKind::Character
        )
    }

    /// Only transfer certificates expose explicit status changes.
    pub fn supports_status_change(self) -> bool {
        self == CertificateKind::Transfer
    }
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CertificateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CertificateKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("unknown certificate kind '{s}'"))
    }
}

/// Lifecycle status of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Draft,
    PendingApproval,
    Issued,
    Cancelled,
}

impl CertificateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CertificateStatus::Draft => "draft",
            CertificateStatus::PendingApproval => "pending_approval",
            CertificateStatus::Issued => "issued",
            CertificateStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CertificateStatus::Draft),
            "pending_approval" => Ok(CertificateStatus::PendingApproval),
            "issued" => Ok(CertificateStatus::Issued),
            "cancelled" => Ok(CertificateStatus::Cancelled),
            other => Err(format!("unknown certificate status '{other}'")),
        }
    }
}

/// Accept strings, numbers or null for free-text slots.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    })
}

/// Parse `YYYY-MM-DD`, tolerating a trailing time component.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_of_admission: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_class: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_of_leaving: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason_for_transfer: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub conduct_remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub completion_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade_obtained: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits_earned: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instructor_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_duration: String,
}

/// One subject row of a progress report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectMark {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject_name: String,
    /// Older records name the subject here instead.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub marks_obtained: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_marks: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remarks: String,
}

impl SubjectMark {
    pub fn display_name(&self) -> &str {
        if self.subject_name.is_empty() {
            &self.name
        } else {
            &self.subject_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub academic_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub term: String,
    /// Some backends report the term as a semester.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub semester: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overall_grade: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub attendance_percentage: String,
    #[serde(default)]
    pub subjects: Vec<SubjectMark>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub teacher_remarks: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub principal_remarks: String,
}

impl ProgressDetails {
    pub fn term_label(&self) -> &str {
        if self.semester.is_empty() {
            &self.term
        } else {
            &self.semester
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonafideDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub father_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mother_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub academic_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub purpose: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdharExtractDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adhar_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub purpose: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub academic_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub guardian_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub guardian_relationship: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub father_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mother_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub verified_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppreciationDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub achievement: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remarks: String,
}

/// Character assessment scale. Unrecognized values read as `Average`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductRating {
    #[default]
    Excellent,
    VeryGood,
    Good,
    #[serde(other)]
    Average,
}

impl ConductRating {
    pub fn as_str(self) -> &'static str {
        match self {
            ConductRating::Excellent => "excellent",
            ConductRating::VeryGood => "very_good",
            ConductRating::Good => "good",
            ConductRating::Average => "average",
        }
    }
}

fn lenient_conduct<'de, D>(deserializer: D) -> Result<ConductRating, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    if raw.is_empty() {
        return Ok(ConductRating::default());
    }
    Ok(serde_json::from_value(Value::String(raw)).unwrap_or(ConductRating::Average))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub father_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_conduct")]
    pub conduct: ConductRating,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remarks: String,
}

/// Kind-specific payload. Serialized flat next to the common fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CertificateDetails {
    Transfer(TransferDetails),
    Course(CourseDetails),
    Progress(ProgressDetails),
    Bonafide(BonafideDetails),
    AdharExtract(AdharExtractDetails),
    Appreciation(AppreciationDetails),
    Character(CharacterDetails),
}

impl CertificateDetails {
    pub fn empty(kind: CertificateKind) -> Self {
        match kind {
            CertificateKind::Transfer => CertificateDetails::Transfer(Default::default()),
            CertificateKind::Course => CertificateDetails::Course(Default::default()),
            CertificateKind::Progress => CertificateDetails::Progress(Default::default()),
            CertificateKind::Bonafide => CertificateDetails::Bonafide(Default::default()),
            CertificateKind::AdharExtract => CertificateDetails::AdharExtract(Default::default()),
            CertificateKind::Appreciation => CertificateDetails::Appreciation(Default::default()),
            CertificateKind::Character => CertificateDetails::Character(Default::default()),
        }
    }

    pub fn kind(&self) -> CertificateKind {
        match self {
            CertificateDetails::Transfer(_) => CertificateKind::Transfer,
            CertificateDetails::Course(_) => CertificateKind::Course,
            CertificateDetails::Progress(_) => CertificateKind::Progress,
            CertificateDetails::Bonafide(_) => CertificateKind::Bonafide,
            CertificateDetails::AdharExtract(_) => CertificateKind::AdharExtract,
            CertificateDetails::Appreciation(_) => CertificateKind::Appreciation,
            CertificateDetails::Character(_) => CertificateKind::Character,
        }
    }

    /// Read the payload of `kind` out of a flat JSON object. Unknown keys are ignored.
    pub fn from_value(kind: CertificateKind, value: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            CertificateKind::Transfer => CertificateDetails::Transfer(serde_json::from_value(value)?),
            CertificateKind::Course => CertificateDetails::Course(serde_json::from_value(value)?),
            CertificateKind::Progress => CertificateDetails::Progress(serde_json::from_value(value)?),
            CertificateKind::Bonafide => CertificateDetails::Bonafide(serde_json::from_value(value)?),
            CertificateKind::AdharExtract => {
                CertificateDetails::AdharExtract(serde_json::from_value(value)?)
            }
            CertificateKind::Appreciation => {
                CertificateDetails::Appreciation(serde_json::from_value(value)?)
            }
            CertificateKind::Character => {
                CertificateDetails::Character(serde_json::from_value(value)?)
            }
        })
    }
}

/// Reasons a backend payload cannot become a [`CertificateRecord`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("certificate payload is not a JSON object")]
    NotAnObject,
    #[error("certificate payload has no id")]
    MissingId,
    #[error("{0}")]
    UnknownStatus(String),
    #[error("certificate {0} is issued but carries no issue date")]
    IssuedWithoutDate(String),
    #[error("invalid certificate fields: {0}")]
    Fields(#[from] serde_json::Error),
}

/// A server-owned certificate.
///
/// `issue_date` is `Some` exactly when `status` is [`CertificateStatus::Issued`];
/// [`CertificateRecord::from_value`] enforces this on ingest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateRecord {
    pub id: String,
    pub kind: CertificateKind,
    pub student_id: String,
    pub student_name: String,
    pub admission_no: String,
    pub status: CertificateStatus,
    pub issue_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub details: CertificateDetails,
}

impl CertificateRecord {
    pub fn from_value(kind: CertificateKind, value: Value) -> Result<Self, RecordError> {
        let object = match &value {
            Value::Object(_) => &value,
            _ => return Err(RecordError::NotAnObject),
        };

        let id = fields::first_text(object, &["id", "_id"]).ok_or(RecordError::MissingId)?;
        let status = match object.get("status").and_then(Value::as_str) {
            Some(raw) => raw.parse().map_err(RecordError::UnknownStatus)?,
            None => CertificateStatus::Draft,
        };
        let issue_date = object
            .get("issue_date")
            .and_then(Value::as_str)
            .and_then(parse_date);

        let issue_date = match (status, issue_date) {
            (CertificateStatus::Issued, Some(date)) => Some(date),
            (CertificateStatus::Issued, None) => return Err(RecordError::IssuedWithoutDate(id)),
            _ => None,
        };

        let student_id = fields::text(object, &["student_id"]);
        let student_name = fields::text(object, &["student_name"]);
        let admission_no = fields::text(object, &["admission_no"]);
        let details = CertificateDetails::from_value(kind, value)?;

        Ok(Self {
            id,
            kind,
            student_id,
            student_name,
            admission_no,
            status,
            issue_date,
            details,
        })
    }
}

/// Form data for one certificate kind, as typed or picked by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateForm {
    pub student_id: String,
    pub student_name: String,
    pub admission_no: String,
    pub issue_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub details: CertificateDetails,
}

impl CertificateForm {
    pub fn new(kind: CertificateKind) -> Self {
        Self {
            student_id: String::new(),
            student_name: String::new(),
            admission_no: String::new(),
            issue_date: None,
            details: CertificateDetails::empty(kind),
        }
    }

    pub fn kind(&self) -> CertificateKind {
        self.details.kind()
    }

    /// Build a form of `kind` from a flat JSON object.
    pub fn from_value(kind: CertificateKind, value: Value) -> serde_json::Result<Self> {
        let issue_date = value
            .get("issue_date")
            .and_then(Value::as_str)
            .and_then(parse_date);
        Ok(Self {
            student_id: fields::text(&value, &["student_id"]),
            student_name: fields::text(&value, &["student_name"]),
            admission_no: fields::text(&value, &["admission_no"]),
            issue_date,
            details: CertificateDetails::from_value(kind, value)?,
        })
    }

    /// Flat JSON view of the form; every declared slot is present.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Object(Map::new()))
    }

    /// Overlay the keys of `patch` onto the form, as if typed by the user.
    pub fn merge_patch(&mut self, patch: &Value) -> serde_json::Result<()> {
        let Value::Object(patch) = patch else {
            return Err(serde::de::Error::custom("form patch must be a JSON object"));
        };
        let mut merged = match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }
        *self = Self::from_value(self.kind(), Value::Object(merged))?;
        Ok(())
    }

    /// Text currently held in `field`, empty if the slot is blank or unknown.
    pub fn field_text(&self, field: &str) -> String {
        fields::text(&self.to_value(), &[field])
    }
}
