//! Search and status filtering of loaded certificate lists. Filtering never
//! touches the store and keeps the original record order.

use std::str::FromStr;

use super::model::{CertificateDetails, CertificateRecord, CertificateStatus};

/// Status filter of a list view. `All` lets every record through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CertificateStatus),
}

impl StatusFilter {
    pub fn matches(self, status: CertificateStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl CertificateRecord {
    /// Text the list search box looks at.
    pub fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.student_name.as_str(), self.admission_no.as_str()];
        match &self.details {
            CertificateDetails::Transfer(_) => {}
            CertificateDetails::Course(d) => fields.push(&d.course_name),
            CertificateDetails::Progress(d) => fields.push(&d.academic_year),
            CertificateDetails::Bonafide(d) => fields.push(&d.purpose),
            CertificateDetails::AdharExtract(d) => {
                fields.push(&d.adhar_number);
                fields.push(&d.purpose);
            }
            CertificateDetails::Appreciation(d) => fields.push(&d.achievement),
            CertificateDetails::Character(d) => {
                fields.push(d.conduct.as_str());
                fields.push(&d.father_name);
            }
        }
        fields
    }

    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Records matching `search` (case-insensitive substring) and `status`, in
/// their original order.
pub fn filter_records<'a>(
    records: &'a [CertificateRecord],
    search: &str,
    status: StatusFilter,
) -> Vec<&'a CertificateRecord> {
    let needle = search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| status.matches(record.status) && record.matches_search(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::model::CertificateKind;
    use serde_json::json;

    fn records() -> Vec<CertificateRecord> {
        [
            json!({ "id": "1", "student_name": "Rahim Uddin", "admission_no": "A-1",
                    "course_name": "Arabic Grammar", "status": "draft" }),
            json!({ "id": "2", "student_name": "Karim", "admission_no": "A-2",
                    "course_name": "Tajweed", "status": "issued", "issue_date": "2025-01-01" }),
            json!({ "id": "3", "student_name": "Nadia", "admission_no": "B-7",
                    "course_name": "arabic calligraphy", "status": "issued",
                    "issue_date": "2025-01-02" }),
        ]
        .into_iter()
        .map(|v| CertificateRecord::from_value(CertificateKind::Course, v).unwrap())
        .collect()
    }

    fn ids(found: Vec<&CertificateRecord>) -> Vec<&str> {
        found.into_iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_search_and_all_is_identity() {
        let records = records();
        let found = filter_records(&records, "", StatusFilter::All);
        assert_eq!(found.len(), records.len());
        assert!(found.iter().zip(&records).all(|(a, b)| *a == b));
    }

    #[test]
    fn search_is_case_insensitive_over_kind_fields() {
        let records = records();
        assert_eq!(ids(filter_records(&records, "ARABIC", StatusFilter::All)), vec!["1", "3"]);
        assert_eq!(ids(filter_records(&records, "b-7", StatusFilter::All)), vec!["3"]);
    }

    #[test]
    fn status_filter_intersects_search() {
        let records = records();
        let issued = StatusFilter::Only(CertificateStatus::Issued);
        assert_eq!(ids(filter_records(&records, "arabic", issued)), vec!["3"]);
        assert_eq!(ids(filter_records(&records, "", issued)), vec!["2", "3"]);
    }

    #[test]
    fn status_filter_parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "pending_approval".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(CertificateStatus::PendingApproval))
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
