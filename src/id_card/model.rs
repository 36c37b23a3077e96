use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::institution::SchoolBranding;

pub const GENERATED_BY: &str = "System Admin";
pub const GENERATED_STATUS: &str = "generated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Student,
    Staff,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Student => "student",
            CardType::Staff => "staff",
        }
    }

    pub fn number_prefix(self) -> &'static str {
        match self {
            CardType::Student => "STU",
            CardType::Staff => "STF",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Student details frozen at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentCardData {
    pub name: String,
    pub admission_no: String,
    pub class_name: String,
    pub section: String,
    pub roll_number: String,
    pub photo: Option<String>,
    pub emergency_contact: String,
    pub blood_group: String,
    pub student_id: String,
}

/// Staff details frozen at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffCardData {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
    pub photo: Option<String>,
    pub join_date: String,
    pub staff_id: String,
}

/// A generated ID card. Immutable once created.
///
/// Exactly one of `student_data` and `staff_data` is set, matching `card_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdCard {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_data: Option<StudentCardData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_data: Option<StaffCardData>,
    pub school_branding: SchoolBranding,
    pub generated_date: DateTime<Utc>,
    pub generated_by: String,
    pub status: String,
    pub card_number: String,
}

impl IdCard {
    pub fn holder_name(&self) -> &str {
        match (&self.student_data, &self.staff_data) {
            (Some(student), _) => &student.name,
            (None, Some(staff)) => &staff.name,
            (None, None) => "",
        }
    }

    pub fn photo(&self) -> Option<&str> {
        self.student_data
            .as_ref()
            .and_then(|s| s.photo.as_deref())
            .or_else(|| self.staff_data.as_ref().and_then(|s| s.photo.as_deref()))
    }
}

/// `STU<admission_no><year>` or `STF<employee_id><year>`.
pub fn card_number(card_type: CardType, identifier: &str, year: i32) -> String {
    format!("{}{}{}", card_type.number_prefix(), identifier, year)
}

/// `<type>-<person id>-<unix millis>`.
pub fn card_id(card_type: CardType, person_id: &str, millis: i64) -> String {
    format!("{card_type}-{person_id}-{millis}")
}
