//! Institution-type dependent behaviour: language, tabs, quick picks and branding.

pub mod branding;
pub mod handlers;
pub mod labels;
pub mod mode;
pub mod suggestions;

pub use branding::SchoolBranding;
pub use labels::{LabelKey, Labels};
pub use mode::{InstitutionMode, InstitutionType, Lang, ModeView, Tab, UiMode};
pub use suggestions::{QuickPick, Suggestions};
