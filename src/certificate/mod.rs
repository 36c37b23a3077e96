//! Certificate records, their lifecycle and the per-session workflow around them.

pub mod controller;
pub mod filter;
pub mod handlers;
pub mod lifecycle;
pub mod model;
pub mod student;
pub mod validation;

pub use controller::{CertificateController, KindState, ViewMode};
pub use filter::StatusFilter;
pub use model::{CertificateForm, CertificateKind, CertificateRecord, CertificateStatus};
pub use validation::{CertificateSubmission, ValidationError, ValidationErrors, Validator};
