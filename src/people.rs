//! Student, staff and class directories loaded from the document store.

use serde_json::Value;
use std::collections::HashMap;

use crate::fields::{self, value_text, FieldChain};
use crate::store::DocumentStore;

pub const STUDENT_NAME: FieldChain = &["name", "student_name"];
pub const ADMISSION_NO: FieldChain = &["admission_no", "admission_number", "roll_no"];
pub const STAFF_NAME: FieldChain = &["name", "full_name"];

/// Class id to display name and section lookup.
#[derive(Debug, Clone, Default)]
pub struct ClassDirectory {
    names: HashMap<String, String>,
    sections: HashMap<String, Vec<String>>,
}

impl ClassDirectory {
    pub fn from_values(classes: &[Value]) -> Self {
        let mut directory = Self::default();
        for class in classes {
            let Some(id) = fields::first_text(class, &["id", "_id"]) else {
                continue;
            };
            if let Some(name) = fields::first_text(class, &["name", "class_name"]) {
                directory.names.insert(id.clone(), name);
            }
            let sections: Vec<String> = class
                .get("sections")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|s| value_text(s).or_else(|| fields::first_text(s, &["name"])))
                        .collect()
                })
                .unwrap_or_default();
            if !sections.is_empty() {
                directory.sections.insert(id, sections);
            }
        }
        directory
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn class_name(&self, class_id: &str) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// Short section ids ("A", "B2") are already display names. Longer ids
    /// fall back to the first section of the class, then to the raw id.
    pub fn section_name(&self, section_id: &str, class_id: &str) -> String {
        if section_id.chars().count() <= 2 {
            return section_id.to_string();
        }
        self.sections
            .get(class_id)
            .and_then(|sections| sections.first())
            .cloned()
            .unwrap_or_else(|| section_id.to_string())
    }

    /// `class_name`, then the directory name of `class_id`, then `class_id` itself.
    pub fn resolve_class(&self, person: &Value) -> Option<String> {
        if let Some(name) = fields::first_text(person, &["class_name"]) {
            return Some(name);
        }
        let class_id = fields::first_text(person, &["class_id"])?;
        Some(
            self.class_name(&class_id)
                .map(str::to_string)
                .unwrap_or(class_id),
        )
    }

    /// `section_name`, then `section`, then the resolved `section_id`.
    pub fn resolve_section(&self, person: &Value) -> Option<String> {
        if let Some(section) = fields::first_text(person, &["section_name", "section"]) {
            return Some(section);
        }
        let section_id = fields::first_text(person, &["section_id"])?;
        let class_id = fields::text(person, &["class_id"]);
        Some(self.section_name(&section_id, &class_id))
    }
}

/// People known to one session, in store order.
#[derive(Debug, Clone, Default)]
pub struct PeopleDirectory {
    pub students: Vec<Value>,
    pub staff: Vec<Value>,
    pub classes: ClassDirectory,
}

impl PeopleDirectory {
    pub fn new(students: Vec<Value>, staff: Vec<Value>, classes: &[Value]) -> Self {
        Self {
            students: students.into_iter().filter(is_listed_student).collect(),
            staff: staff.into_iter().filter(is_listed_staff).collect(),
            classes: ClassDirectory::from_values(classes),
        }
    }

    /// Fetch all three directories. A failed source loads as empty.
    pub async fn load(store: &dyn DocumentStore) -> Self {
        let (students, staff, classes) =
            tokio::join!(store.students(), store.staff(), store.classes());
        let students = students.unwrap_or_else(|e| {
            log::error!("Failed to load students: {}", e);
            Vec::new()
        });
        let staff = staff.unwrap_or_else(|e| {
            log::error!("Failed to load staff: {}", e);
            Vec::new()
        });
        let classes = classes.unwrap_or_else(|e| {
            log::warn!("Failed to load classes: {}", e);
            Vec::new()
        });
        let directory = Self::new(students, staff, &classes);
        log::info!(
            "Loaded {} students, {} staff and {} classes",
            directory.students.len(),
            directory.staff.len(),
            directory.classes.len()
        );
        directory
    }

    pub fn find_student(&self, id: &str) -> Option<&Value> {
        self.students.iter().find(|s| person_id(s).as_deref() == Some(id))
    }

    pub fn find_staff(&self, id: &str) -> Option<&Value> {
        self.staff.iter().find(|s| person_id(s).as_deref() == Some(id))
    }
}

pub fn person_id(person: &Value) -> Option<String> {
    person.get("id").and_then(value_text)
}

/// Students need a string name, a string admission number and an id.
fn is_listed_student(student: &Value) -> bool {
    student.get("name").is_some_and(Value::is_string)
        && student.get("admission_no").is_some_and(Value::is_string)
        && person_id(student).is_some()
}

/// Staff need a name (or full name), a string employee id and an id.
fn is_listed_staff(member: &Value) -> bool {
    let named = ["name", "full_name"]
        .iter()
        .any(|key| member.get(*key).is_some_and(Value::is_string));
    named
        && member.get("employee_id").is_some_and(Value::is_string)
        && person_id(member).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classes() -> ClassDirectory {
        ClassDirectory::from_values(&[
            json!({ "id": "cls-7", "name": "Class 7", "sections": ["A", "B"] }),
            json!({ "id": "cls-8", "name": "Class 8", "sections": [{ "name": "Rose" }] }),
        ])
    }

    #[test]
    fn class_ids_resolve_to_names() {
        let dir = classes();
        assert_eq!(dir.resolve_class(&json!({ "class_id": "cls-7" })).as_deref(), Some("Class 7"));
        assert_eq!(dir.resolve_class(&json!({ "class_id": "cls-x" })).as_deref(), Some("cls-x"));
        assert_eq!(
            dir.resolve_class(&json!({ "class_name": "Seven", "class_id": "cls-7" })).as_deref(),
            Some("Seven")
        );
        assert_eq!(dir.resolve_class(&json!({})), None);
    }

    #[test]
    fn long_section_ids_fall_back_to_first_section() {
        let dir = classes();
        assert_eq!(dir.section_name("B", "cls-7"), "B");
        assert_eq!(dir.section_name("2f1c-uuid", "cls-8"), "Rose");
        assert_eq!(dir.section_name("2f1c-uuid", "cls-9"), "2f1c-uuid");
    }

    #[test]
    fn invalid_people_are_filtered_out() {
        let people = PeopleDirectory::new(
            vec![
                json!({ "id": "s1", "name": "Rahim", "admission_no": "A1" }),
                json!({ "id": "s2", "name": "No Admission" }),
                json!({ "name": "No Id", "admission_no": "A3" }),
                json!({ "id": 4, "name": "Numeric", "admission_no": "A4" }),
            ],
            vec![
                json!({ "id": "t1", "full_name": "Amina", "employee_id": "E1" }),
                json!({ "id": "t2", "name": "Bilal", "employee_id": 22 }),
            ],
            &[],
        );

        assert_eq!(people.students.len(), 2);
        assert!(people.find_student("4").is_some());
        assert!(people.find_student("s2").is_none());
        assert_eq!(people.staff.len(), 1);
        assert!(people.find_staff("t1").is_some());
    }
}
