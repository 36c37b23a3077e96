//! Card generation and persistence through the file-backed card cache.

use chrono::{TimeZone, Utc};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use school_certificates::id_card::cache::{
    CardStorage, FileCardStorage, LocalCardCache, CARD_CACHE_KEY,
};
use school_certificates::id_card::model::{card_number, CardType};
use school_certificates::institution::{InstitutionMode, SchoolBranding};
use school_certificates::people::PeopleDirectory;

fn people() -> PeopleDirectory {
    PeopleDirectory::new(
        vec![json!({ "id": "p1", "name": "Rahim", "admission_no": "A1", "class_id": "c1" })],
        vec![json!({ "id": "t1", "name": "Mr. Hasan", "employee_id": "E7" })],
        &[json!({ "id": "c1", "name": "Class One" })],
    )
}

fn branding() -> SchoolBranding {
    SchoolBranding {
        name: "Green Valley School".into(),
        ..SchoolBranding::default()
    }
}

#[test]
fn unknown_people_are_skipped_when_generating() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalCardCache::load(Arc::new(FileCardStorage::new(dir.path())));
    let now = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();

    let cards = cache
        .generate(
            &people(),
            CardType::Student,
            &["p1".to_string(), "p2".to_string()],
            &branding(),
            now,
        )
        .unwrap();

    assert_eq!(cards.len(), 1);
    assert_eq!(cache.len(), 1);
    let card = &cards[0];
    assert_eq!(card.student_data.as_ref().unwrap().student_id, "p1");
    assert_eq!(card.student_data.as_ref().unwrap().class_name, "Class One");
    assert_eq!(card.card_number, card_number(CardType::Student, "A1", 2025));
    assert_eq!(card.school_branding.name, "Green Valley School");
}

#[test]
fn cards_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();

    let generated = {
        let cache = LocalCardCache::load(Arc::new(FileCardStorage::new(dir.path())));
        let mut cards = cache
            .generate(&people(), CardType::Student, &["p1".to_string()], &branding(), now)
            .unwrap();
        cards.extend(
            cache
                .generate(&people(), CardType::Staff, &["t1".to_string()], &branding(), now)
                .unwrap(),
        );
        cards
    };

    let reloaded = LocalCardCache::load(Arc::new(FileCardStorage::new(dir.path())));
    let before: HashSet<String> = generated.iter().map(|c| c.id.clone()).collect();
    let after: HashSet<String> = reloaded.cards().iter().map(|c| c.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(reloaded.cards(), generated);
}

#[test]
fn corrupt_cache_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileCardStorage::new(dir.path());
    storage.write(CARD_CACHE_KEY, "[{\"id\": ").unwrap();

    let cache = LocalCardCache::load(Arc::new(storage));
    assert!(cache.is_empty());
}

#[test]
fn empty_generation_leaves_storage_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalCardCache::load(Arc::new(FileCardStorage::new(dir.path())));

    let cards = cache
        .generate(&people(), CardType::Staff, &["nobody".to_string()], &branding(), Utc::now())
        .unwrap();
    assert!(cards.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn printing_one_or_all_cards() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalCardCache::load(Arc::new(FileCardStorage::new(dir.path())));
    let now = Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap();
    let student = cache
        .generate(&people(), CardType::Student, &["p1".to_string()], &branding(), now)
        .unwrap();
    cache
        .generate(&people(), CardType::Staff, &["t1".to_string()], &branding(), now)
        .unwrap();

    let single = cache
        .print(Some(&student[0].id), InstitutionMode::school())
        .unwrap();
    assert!(single.contains("ID Card - Rahim"));
    assert!(!single.contains("Mr. Hasan"));

    let all = cache.print(None, InstitutionMode::school()).unwrap();
    assert!(all.contains("All ID Cards - 2 cards"));
    assert!(all.contains("Staff ID Card"));
}
