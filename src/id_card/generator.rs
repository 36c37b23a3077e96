//! Snapshotting people into ID cards.

use chrono::{DateTime, Datelike, Utc};
use serde_json::Value;

use super::model::{
    card_id, card_number, CardType, IdCard, StaffCardData, StudentCardData, GENERATED_BY,
    GENERATED_STATUS,
};
use crate::fields;
use crate::institution::SchoolBranding;
use crate::people::{person_id, ClassDirectory, PeopleDirectory, STAFF_NAME};

const PHOTO: &[&str] = &["photo_url", "photo"];

pub fn student_snapshot(student: &Value, classes: &ClassDirectory) -> StudentCardData {
    let admission_no = fields::text(student, &["admission_no"]);
    let class_name = fields::first_text(student, &["class_name"])
        .or_else(|| {
            fields::first_text(student, &["class_id"])
                .and_then(|id| classes.class_name(&id).map(str::to_string))
        })
        .unwrap_or_else(|| "N/A".to_string());

    StudentCardData {
        name: fields::text(student, &["name"]),
        class_name,
        section: fields::text_or(student, &["section"], "A"),
        roll_number: fields::first_text(student, &["roll_number"])
            .unwrap_or_else(|| admission_no.clone()),
        photo: fields::first_text(student, PHOTO),
        emergency_contact: fields::text_or(student, &["emergency_contact"], "N/A"),
        blood_group: fields::text_or(student, &["blood_group"], "N/A"),
        student_id: person_id(student).unwrap_or_default(),
        admission_no,
    }
}

pub fn staff_snapshot(member: &Value) -> StaffCardData {
    StaffCardData {
        name: fields::text(member, STAFF_NAME),
        employee_id: fields::text(member, &["employee_id"]),
        department: fields::text_or(member, &["department"], "General"),
        designation: fields::text_or(member, &["designation"], "Staff"),
        phone: fields::text_or(member, &["phone"], "N/A"),
        email: fields::text_or(member, &["email"], "N/A"),
        photo: fields::first_text(member, PHOTO),
        join_date: fields::text_or(member, &["date_of_joining", "join_date"], "N/A"),
        staff_id: person_id(member).unwrap_or_default(),
    }
}

/// Build one card per requested person, in directory order.
///
/// Ids that match nobody in the loaded directory are skipped.
pub fn build_cards(
    people: &PeopleDirectory,
    card_type: CardType,
    person_ids: &[String],
    branding: &SchoolBranding,
    now: DateTime<Utc>,
) -> Vec<IdCard> {
    let pool = match card_type {
        CardType::Student => &people.students,
        CardType::Staff => &people.staff,
    };
    let millis = now.timestamp_millis();
    let year = now.year();

    pool.iter()
        .filter_map(|person| {
            let id = person_id(person)?;
            if !person_ids.contains(&id) {
                return None;
            }
            let (student_data, staff_data, identifier) = match card_type {
                CardType::Student => {
                    let data = student_snapshot(person, &people.classes);
                    let identifier = data.admission_no.clone();
                    (Some(data), None, identifier)
                }
                CardType::Staff => {
                    let data = staff_snapshot(person);
                    let identifier = data.employee_id.clone();
                    (None, Some(data), identifier)
                }
            };
            Some(IdCard {
                id: card_id(card_type, &id, millis),
                card_type,
                student_data,
                staff_data,
                school_branding: branding.clone(),
                generated_date: now,
                generated_by: GENERATED_BY.to_string(),
                status: GENERATED_STATUS.to_string(),
                card_number: card_number(card_type, &identifier, year),
            })
        })
        .collect()
}
