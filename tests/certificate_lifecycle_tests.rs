//! Lifecycle controller behaviour against an in-memory document store.

mod common;

use chrono::{Local, NaiveDate};
use serde_json::json;
use std::sync::Arc;

use common::MockDocumentStore;
use school_certificates::certificate::controller::{CertificateController, ViewMode};
use school_certificates::certificate::filter::StatusFilter;
use school_certificates::certificate::model::{CertificateForm, CertificateKind, CertificateStatus};
use school_certificates::error::CertificateError;
use school_certificates::institution::{InstitutionMode, QuickPick};

async fn controller(store: Arc<MockDocumentStore>, mode: InstitutionMode) -> CertificateController {
    let mut controller = CertificateController::new(store, mode);
    controller.bootstrap().await;
    controller
}

#[tokio::test]
async fn missing_required_fields_never_reach_the_store() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;

    for kind in CertificateKind::ALL {
        let err = controller
            .create(kind, CertificateStatus::Issued)
            .await
            .expect_err("empty form must be rejected");
        match err {
            CertificateError::Validation(errors) => {
                assert!(errors.fields().contains(&"student_id"), "{kind}: {errors}");
            }
            other => panic!("{kind}: unexpected error {other}"),
        }
    }
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn issuing_a_transfer_certificate_stamps_today() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;
    controller.open_form(CertificateKind::Transfer);
    controller
        .update_form(
            CertificateKind::Transfer,
            &json!({
                "student_id": "S1",
                "date_of_leaving": "2025-01-10",
                "reason_for_transfer": "Family relocation"
            }),
        )
        .unwrap();

    let record = controller
        .create(CertificateKind::Transfer, CertificateStatus::Issued)
        .await
        .unwrap();

    assert_eq!(record.status, CertificateStatus::Issued);
    assert_eq!(record.issue_date, Some(Local::now().date_naive()));
    assert_eq!(store.create_calls(), 1);

    let state = controller.state(CertificateKind::Transfer);
    assert_eq!(state.view, ViewMode::List);
    assert_eq!(state.form, CertificateForm::new(CertificateKind::Transfer));
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].id, record.id);
}

#[tokio::test]
async fn issue_date_is_present_only_when_issued() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    let mut form = CertificateForm::new(CertificateKind::Course);
    form.merge_patch(&json!({
        "student_id": "S1",
        "course_name": "Computer Basics",
        "completion_date": "2025-02-20",
        "issue_date": "2024-12-31"
    }))
    .unwrap();

    for requested in [
        CertificateStatus::Draft,
        CertificateStatus::PendingApproval,
        CertificateStatus::Issued,
    ] {
        let record = controller
            .create_from(form.clone(), requested, today)
            .await
            .unwrap();
        assert_eq!(record.status, requested);
        assert_eq!(record.issue_date.is_some(), requested == CertificateStatus::Issued);
        if requested == CertificateStatus::Issued {
            assert_eq!(record.issue_date, Some(today));
        }
    }
}

#[tokio::test]
async fn instant_kinds_always_issue() {
    let store = Arc::new(MockDocumentStore::madrasah());
    let mut controller = controller(store.clone(), InstitutionMode::madrasah()).await;
    let today = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();

    let mut form = CertificateForm::new(CertificateKind::Appreciation);
    form.merge_patch(&json!({ "student_id": "S1", "achievement": "First in Quran recitation" }))
        .unwrap();

    let record = controller
        .create_from(form, CertificateStatus::Draft, today)
        .await
        .unwrap();
    assert_eq!(record.status, CertificateStatus::Issued);
    assert_eq!(record.issue_date, Some(today));
}

#[tokio::test]
async fn cancelled_cannot_be_requested_at_creation() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;

    let mut form = CertificateForm::new(CertificateKind::Bonafide);
    form.merge_patch(&json!({ "student_id": "S1", "purpose": "Bank account", "academic_year": "2025" }))
        .unwrap();

    let err = controller
        .create_from(form, CertificateStatus::Cancelled, Local::now().date_naive())
        .await
        .unwrap_err();
    assert!(matches!(err, CertificateError::Validation(_)));
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn transfer_status_follows_the_state_machine() {
    let store = Arc::new(MockDocumentStore::new());
    store
        .seed(
            CertificateKind::Transfer,
            json!({ "id": "tc-1", "student_name": "Rahim", "status": "draft" }),
        )
        .await;
    store
        .seed(
            CertificateKind::Transfer,
            json!({ "id": "tc-2", "student_name": "Ayesha", "status": "issued", "issue_date": "2025-01-10" }),
        )
        .await;
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;

    let err = controller
        .change_status(CertificateKind::Transfer, "tc-2", CertificateStatus::Draft)
        .await
        .unwrap_err();
    assert!(matches!(err, CertificateError::Transition(_)));
    let err = controller
        .change_status(CertificateKind::Transfer, "tc-1", CertificateStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, CertificateError::Transition(_)));
    assert_eq!(store.status_calls(), 0);

    let pending = controller
        .change_status(CertificateKind::Transfer, "tc-1", CertificateStatus::PendingApproval)
        .await
        .unwrap();
    assert_eq!(pending.status, CertificateStatus::PendingApproval);
    assert_eq!(pending.issue_date, None);

    let issued = controller
        .change_status(CertificateKind::Transfer, "tc-1", CertificateStatus::Issued)
        .await
        .unwrap();
    assert_eq!(issued.status, CertificateStatus::Issued);
    assert!(issued.issue_date.is_some());

    let cancelled = controller
        .change_status(CertificateKind::Transfer, "tc-1", CertificateStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, CertificateStatus::Cancelled);
    assert_eq!(cancelled.issue_date, None);

    let err = controller
        .change_status(CertificateKind::Transfer, "tc-1", CertificateStatus::Issued)
        .await
        .unwrap_err();
    assert!(matches!(err, CertificateError::Transition(_)));
    assert_eq!(store.status_calls(), 3);
}

#[tokio::test]
async fn status_changes_are_transfer_only() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;

    let err = controller
        .change_status(CertificateKind::Course, "c-1", CertificateStatus::Issued)
        .await
        .unwrap_err();
    assert!(matches!(err, CertificateError::StatusChangeUnsupported(CertificateKind::Course)));
    assert_eq!(store.status_calls(), 0);
}

#[tokio::test]
async fn failed_refresh_after_create_keeps_the_new_record() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;
    store.fail_lists(true);

    let mut form = CertificateForm::new(CertificateKind::Progress);
    form.merge_patch(&json!({ "student_id": "S1", "academic_year": "2025", "term": "First Term" }))
        .unwrap();
    let record = controller
        .create_from(form, CertificateStatus::Draft, Local::now().date_naive())
        .await
        .unwrap();

    let records = &controller.state(CertificateKind::Progress).records;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, record.id);
    assert!(controller.refresh(CertificateKind::Progress).await.is_err());
    assert_eq!(controller.state(CertificateKind::Progress).records.len(), 1);
}

#[tokio::test]
async fn selecting_a_student_fills_the_form() {
    let store = Arc::new(MockDocumentStore::new());
    let mut controller = controller(store.clone(), InstitutionMode::school()).await;

    let form = controller
        .select_student_by_id(CertificateKind::Transfer, "S1")
        .unwrap();
    assert_eq!(form.student_name, "Rahim Uddin");
    assert_eq!(form.admission_no, "A-101");
    assert_eq!(form.field_text("last_class"), "Class Five");
    assert_eq!(form.field_text("last_section"), "B");
    assert_eq!(form.field_text("date_of_admission"), "2020-01-05");
    assert_eq!(
        controller.selected_student_id(CertificateKind::Transfer).as_deref(),
        Some("S1")
    );

    assert!(matches!(
        controller.select_student_by_id(CertificateKind::Transfer, "S2"),
        Err(CertificateError::NotFound(_))
    ));
}

#[tokio::test]
async fn quick_picks_write_their_target_field() {
    let store = Arc::new(MockDocumentStore::madrasah());
    let mut controller = controller(store.clone(), InstitutionMode::madrasah()).await;

    let form = controller
        .apply_quick_pick(CertificateKind::Transfer, QuickPick::TransferReason, 0)
        .unwrap();
    assert!(!form.field_text("reason_for_transfer").is_empty());

    assert!(matches!(
        controller.apply_quick_pick(CertificateKind::Transfer, QuickPick::Achievement, 0),
        Err(CertificateError::SuggestionUnavailable { .. })
    ));

    let mut school = CertificateController::new(store, InstitutionMode::school());
    assert!(school
        .apply_quick_pick(CertificateKind::Transfer, QuickPick::TransferReason, 0)
        .is_err());
}

#[tokio::test]
async fn unfiltered_view_returns_every_record_in_order() {
    let store = Arc::new(MockDocumentStore::new());
    for (id, status) in [("b-1", "draft"), ("b-2", "issued"), ("b-3", "pending_approval")] {
        let mut record = json!({ "id": id, "student_name": id, "status": status, "purpose": "Visa" });
        if status == "issued" {
            record["issue_date"] = json!("2025-01-01");
        }
        store.seed(CertificateKind::Bonafide, record).await;
    }
    let controller = controller(store.clone(), InstitutionMode::school()).await;

    let all = controller.state(CertificateKind::Bonafide).records.clone();
    let filtered: Vec<_> = controller
        .filter(CertificateKind::Bonafide, "", StatusFilter::All)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(filtered, all);

    let issued = controller.filter(
        CertificateKind::Bonafide,
        "visa",
        StatusFilter::Only(CertificateStatus::Issued),
    );
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].id, "b-2");
}

#[tokio::test]
async fn dashboard_falls_back_to_zero() {
    let store = Arc::new(MockDocumentStore::new());
    let controller = controller(store, InstitutionMode::school()).await;
    let counts = controller.dashboard().await;
    assert_eq!((counts.total_issued, counts.pending), (0, 0));
}

#[tokio::test]
async fn pdf_downloads_are_named_after_the_student() {
    let store = Arc::new(MockDocumentStore::new());
    store
        .seed(
            CertificateKind::Transfer,
            json!({ "id": "tc-9", "student_name": "Rahim Uddin", "admission_no": "A-101", "status": "draft" }),
        )
        .await;
    let controller = controller(store, InstitutionMode::school()).await;

    let (name, bytes) = controller
        .download_pdf(CertificateKind::Transfer, "tc-9")
        .await
        .unwrap();
    assert!(name.starts_with("TC_A-101_"));
    assert!(name.ends_with(".pdf"));
    assert!(bytes.starts_with(b"%PDF"));
}
