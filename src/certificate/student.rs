//! Form auto-fill from a selected student record.
//!
//! Each target field reads an ordered chain of source keys; the first
//! non-empty value wins, otherwise the field is left empty or receives the
//! literal default noted beside it.
//!
//! | target                  | sources                                             |
//! |-------------------------|-----------------------------------------------------|
//! | `student_id`            | `id`                                                |
//! | `student_name`          | `name`, `student_name`                              |
//! | `admission_no`          | `admission_no`, `admission_number`, `roll_no`       |
//! | class (`class_name`, `last_class`) | `class_name`, class name of `class_id`, `class_id` |
//! | section (`section`, `last_section`) | `section_name`, `section`, resolved `section_id` |
//! | `date_of_admission`     | date part of `created_at`                           |
//! | `father_name`, `mother_name`, `guardian_name`, `address`, `date_of_birth` | same key |
//! | `contact_number`        | `guardian_phone`, `phone`                           |
//! | `guardian_relationship` | `guardian_relationship`, else `"Parent"`            |

use serde_json::Value;

use super::model::{parse_date, CertificateDetails, CertificateForm};
use crate::fields::{self, FieldChain};
use crate::people::{person_id, ClassDirectory, ADMISSION_NO, STUDENT_NAME};

const CONTACT_NUMBER: FieldChain = &["guardian_phone", "phone"];

/// Copy identity and kind-specific fields of `student` into `form`.
///
/// Fields the student record cannot supply keep whatever was typed before,
/// except the ones listed above, which are always overwritten.
pub fn fill_from_student(form: &mut CertificateForm, student: &Value, classes: &ClassDirectory) {
    form.student_id = person_id(student).unwrap_or_default();
    form.student_name = fields::text(student, STUDENT_NAME);
    form.admission_no = fields::text(student, ADMISSION_NO);

    let class_name = classes.resolve_class(student).unwrap_or_default();
    let section = classes.resolve_section(student).unwrap_or_default();
    let own = |key: &str| fields::text(student, &[key]);

    match &mut form.details {
        CertificateDetails::Transfer(d) => {
            d.date_of_admission = student
                .get("created_at")
                .and_then(Value::as_str)
                .and_then(parse_date)
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            d.last_class = class_name;
            d.last_section = section;
        }
        CertificateDetails::Course(_) => {}
        CertificateDetails::Progress(d) => {
            d.class_name = class_name;
            d.section = section;
        }
        CertificateDetails::Bonafide(d) => {
            d.father_name = own("father_name");
            d.mother_name = own("mother_name");
            d.class_name = class_name;
            d.section = section;
        }
        CertificateDetails::AdharExtract(d) => {
            d.class_name = class_name;
            d.section = section;
            d.guardian_name = own("guardian_name");
            d.contact_number = fields::text(student, CONTACT_NUMBER);
            d.address = own("address");
            d.guardian_relationship =
                fields::text_or(student, &["guardian_relationship"], "Parent");
            d.father_name = own("father_name");
            d.mother_name = own("mother_name");
            d.date_of_birth = own("date_of_birth");
        }
        CertificateDetails::Appreciation(d) => {
            d.class_name = class_name;
            d.section = section;
        }
        CertificateDetails::Character(d) => {
            d.father_name = own("father_name");
            d.class_name = class_name;
            d.section = section;
        }
    }
}
