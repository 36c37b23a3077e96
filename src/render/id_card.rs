use super::common::{document, escape_html, format_date};
use super::styles;
use crate::id_card::model::{IdCard, StaffCardData, StudentCardData};
use crate::institution::{InstitutionMode, LabelKey, Labels};

/// Escaped value, or the placeholder when blank.
fn slot(labels: &Labels, value: &str) -> String {
    if value.trim().is_empty() {
        labels.get(LabelKey::NotAvailable).to_string()
    } else {
        escape_html(value)
    }
}

fn detail(labels: &Labels, key: LabelKey, value: &str) -> String {
    format!(
        "<p><strong>{}:</strong> {}</p>\n",
        labels.get(key),
        slot(labels, value)
    )
}

fn student_details(labels: &Labels, data: &StudentCardData) -> String {
    [
        (LabelKey::AdmissionNo, data.admission_no.as_str()),
        (LabelKey::Class, data.class_name.as_str()),
        (LabelKey::RollNo, data.roll_number.as_str()),
        (LabelKey::BloodGroup, data.blood_group.as_str()),
    ]
    .iter()
    .map(|(key, value)| detail(labels, *key, value))
    .collect()
}

fn staff_details(labels: &Labels, data: &StaffCardData) -> String {
    [
        (LabelKey::EmployeeId, data.employee_id.as_str()),
        (LabelKey::Department, data.department.as_str()),
        (LabelKey::Designation, data.designation.as_str()),
        (LabelKey::Phone, data.phone.as_str()),
    ]
    .iter()
    .map(|(key, value)| detail(labels, *key, value))
    .collect()
}

/// One card, rendered with the branding captured when it was generated.
pub fn render_card(card: &IdCard, mode: InstitutionMode) -> String {
    let labels = mode.labels();
    let branding = &card.school_branding;

    let logo = branding
        .logo
        .as_deref()
        .filter(|logo| !logo.is_empty())
        .map(|logo| {
            format!(
                "<img src=\"{}\" alt=\"School Logo\" class=\"card-logo\" />",
                escape_html(logo)
            )
        })
        .unwrap_or_default();
    let school = if branding.name.is_empty() {
        labels.get(LabelKey::InstitutionNameFallback).to_string()
    } else {
        escape_html(&branding.name)
    };
    let (card_label, details) = match (&card.student_data, &card.staff_data) {
        (Some(student), _) => (LabelKey::StudentIdCard, student_details(&labels, student)),
        (None, Some(staff)) => (LabelKey::StaffIdCard, staff_details(&labels, staff)),
        (None, None) => (LabelKey::StudentIdCard, String::new()),
    };
    let photo = match card.photo().filter(|p| !p.is_empty()) {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"Photo\" class=\"card-photo\" />",
            escape_html(url)
        ),
        None => format!(
            "<div class=\"card-photo\"><span>{}</span></div>",
            labels.get(LabelKey::Photo)
        ),
    };

    format!(
        "<div class=\"id-card\">\n\
         <div class=\"card-header\">{logo}<div><div class=\"card-school\">{school}</div>\
         <div class=\"card-type\">{}</div></div></div>\n\
         <div class=\"card-body\">{photo}<div class=\"card-details\">\n\
         <div class=\"card-name\">{}</div>\n{details}</div></div>\n\
         <div class=\"card-footer\"><span class=\"card-number\">{}</span>\
         <span class=\"issued-date\">{}: {}</span></div>\n</div>\n",
        labels.get(card_label),
        slot(&labels, card.holder_name()),
        escape_html(&card.card_number),
        labels.get(LabelKey::CardIssued),
        format_date(card.generated_date.date_naive(), mode.lang()),
    )
}

/// A print-ready document holding every card in `cards`.
pub fn print_document(cards: &[IdCard], mode: InstitutionMode) -> String {
    let body: String = cards.iter().map(|card| render_card(card, mode)).collect();
    let title = match cards {
        [single] => format!("ID Card - {}", single.holder_name()),
        _ => format!("All ID Cards - {} cards", cards.len()),
    };
    document(
        &title,
        styles::ID_CARD,
        &format!("<div class=\"cards\">\n{body}</div>"),
        mode.lang(),
        true,
    )
}
