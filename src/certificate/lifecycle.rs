//! Certificate status state machine.
//!
//! ```text
//! draft ──▶ pending_approval ──▶ issued ──▶ cancelled
//!   │                               ▲
//!   └───────────────────────────────┘
//! ```
//!
//! Only issued certificates can be cancelled. `cancelled` is terminal and
//! cannot be chosen at creation time.

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{CertificateKind, CertificateStatus};

/// An edge of the status graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SubmitForApproval,
    Issue,
    Cancel,
}

impl Transition {
    pub fn target(self) -> CertificateStatus {
        match self {
            Transition::SubmitForApproval => CertificateStatus::PendingApproval,
            Transition::Issue => CertificateStatus::Issued,
            Transition::Cancel => CertificateStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot move a {from} certificate to {to}")]
pub struct TransitionError {
    pub from: CertificateStatus,
    pub to: CertificateStatus,
}

impl CertificateStatus {
    pub fn allowed_transitions(self) -> &'static [Transition] {
        match self {
            CertificateStatus::Draft => &[Transition::SubmitForApproval, Transition::Issue],
            CertificateStatus::PendingApproval => &[Transition::Issue],
            CertificateStatus::Issued => &[Transition::Cancel],
            CertificateStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn can_transition_to(self, to: CertificateStatus) -> bool {
        self.allowed_transitions()
            .iter()
            .any(|transition| transition.target() == to)
    }

    /// Validate a move to `to` and return the resulting status.
    pub fn transition_to(self, to: CertificateStatus) -> Result<CertificateStatus, TransitionError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(TransitionError { from: self, to })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationStatusError {
    #[error("a certificate cannot be created as cancelled")]
    Cancelled,
}

/// Status a new certificate of `kind` is stored with.
///
/// Appreciation and character certificates are always issued on creation.
pub fn initial_status(
    kind: CertificateKind,
    requested: CertificateStatus,
) -> Result<CertificateStatus, CreationStatusError> {
    if kind.issues_immediately() {
        return Ok(CertificateStatus::Issued);
    }
    match requested {
        CertificateStatus::Cancelled => Err(CreationStatusError::Cancelled),
        other => Ok(other),
    }
}

/// Issue date stamped on a new certificate with `status`.
///
/// An explicit date supplied on the form is honoured only for issued records.
pub fn creation_issue_date(
    status: CertificateStatus,
    supplied: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match status {
        CertificateStatus::Issued => Some(supplied.unwrap_or(today)),
        _ => None,
    }
}
