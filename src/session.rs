//! Per-session workspace: everything one signed-in user is looking at.

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use utoipa::ToSchema;

use crate::certificate::controller::CertificateController;
use crate::error::{CertificateError, Result};

/// Which half of the ID-card screen is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardsView {
    #[default]
    Main,
    Generated,
}

pub struct Workspace {
    pub certificates: CertificateController,
    pub cards_view: CardsView,
}

impl Workspace {
    /// A workspace starts on the generated-cards view when cards already exist.
    pub fn new(certificates: CertificateController, has_cached_cards: bool) -> Self {
        Self {
            certificates,
            cards_view: if has_cached_cards {
                CardsView::Generated
            } else {
                CardsView::Main
            },
        }
    }
}

/// A workspace plus the slot a submission holds while it runs.
///
/// Reads only wait on the workspace. Creates, status changes and card
/// generation also take the submission slot, so a second one arriving while
/// the first is still running is refused instead of queued.
pub struct Session {
    workspace: Mutex<Workspace>,
    submission: Mutex<()>,
}

impl Session {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace: Mutex::new(workspace),
            submission: Mutex::new(()),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Workspace> {
        self.workspace.lock().await
    }

    /// Claim the submission slot, failing fast if it is taken.
    pub fn try_begin_submission(&self) -> Result<MutexGuard<'_, ()>> {
        self.submission.try_lock().map_err(|_| {
            log::warn!("Rejected concurrent submission on a busy session");
            CertificateError::SubmissionInFlight
        })
    }
}

pub type SharedWorkspace = Arc<Session>;

/// Workspace access held for the length of one submission.
pub struct SubmissionGuard<'a> {
    workspace: MutexGuard<'a, Workspace>,
    _slot: MutexGuard<'a, ()>,
}

impl Deref for SubmissionGuard<'_> {
    type Target = Workspace;

    fn deref(&self) -> &Workspace {
        &self.workspace
    }
}

impl DerefMut for SubmissionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }
}

/// Exclusive access for a submission. Waits behind reads, but a second
/// submission for the same session gets `SubmissionInFlight`.
pub async fn lock_for_mutation(session: &Session) -> Result<SubmissionGuard<'_>> {
    let slot = session.try_begin_submission()?;
    let workspace = session.lock().await;
    Ok(SubmissionGuard {
        workspace,
        _slot: slot,
    })
}

/// Bearer token from the `Authorization` header.
pub fn bearer_token(req: &HttpRequest) -> Result<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(CertificateError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_token_requires_scheme() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc123");

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc123"))
            .to_http_request();
        assert!(matches!(bearer_token(&req), Err(CertificateError::Unauthorized)));

        let req = TestRequest::default().to_http_request();
        assert!(bearer_token(&req).is_err());
    }

    fn session() -> Session {
        let store = Arc::new(crate::store::http::HttpDocumentStore::new(
            reqwest::Client::new(),
            "http://localhost:9",
            "t1",
        ));
        let controller = CertificateController::new(store, crate::institution::InstitutionMode::school());
        Session::new(Workspace::new(controller, false))
    }

    #[tokio::test]
    async fn second_submission_is_refused_while_first_runs() {
        let session = session();
        let first = lock_for_mutation(&session).await.unwrap();
        assert!(matches!(
            lock_for_mutation(&session).await,
            Err(CertificateError::SubmissionInFlight)
        ));
        drop(first);
        assert!(lock_for_mutation(&session).await.is_ok());
    }

    #[tokio::test]
    async fn reads_in_progress_do_not_refuse_submissions() {
        let session = Arc::new(session());
        let read = session.lock().await;

        let pending = tokio::spawn({
            let session = session.clone();
            async move { lock_for_mutation(&session).await.map(|_| ()) }
        });
        tokio::task::yield_now().await;
        drop(read);

        assert!(pending.await.unwrap().is_ok());
    }
}
