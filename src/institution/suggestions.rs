use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::certificate::model::CertificateKind;

/// Canned phrases offered next to free-text fields.
#[derive(Debug, Serialize)]
pub struct Suggestions {
    pub achievements: &'static [&'static str],
    pub conduct: &'static [&'static str],
    pub transfer_reasons: &'static [&'static str],
}

pub static MADRASAH_SUGGESTIONS: Suggestions = Suggestions {
    achievements: &[
        "কুরআন হিফজ সম্পন্ন",
        "নাজেরা কুরআন শেষ",
        "উত্তম আখলাক",
        "প্রথম স্থান অর্জন",
        "মেধাবৃত্তি প্রাপ্ত",
        "বার্ষিক পরীক্ষায় সেরা",
        "হাদিস প্রতিযোগিতায় বিজয়ী",
        "কিরাআত প্রতিযোগিতায় বিজয়ী",
    ],
    conduct: &[
        "আচরণ অতি উত্তম",
        "আচরণ উত্তম",
        "আচরণ ভালো",
        "আচরণ সন্তোষজনক",
    ],
    transfer_reasons: &[
        "অন্য প্রতিষ্ঠানে ভর্তি",
        "পারিবারিক স্থানান্তর",
        "অভিভাবকের ইচ্ছা",
        "আর্থিক সমস্যা",
        "স্বাস্থ্যগত কারণ",
    ],
};

/// Which suggestion list a quick pick draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuickPick {
    Achievement,
    Conduct,
    TransferReason,
}

impl QuickPick {
    /// Form field the phrase is written into for `kind`, if the pick applies.
    pub fn target_field(self, kind: CertificateKind) -> Option<&'static str> {
        match (self, kind) {
            (QuickPick::Achievement, CertificateKind::Appreciation) => Some("achievement"),
            (QuickPick::Conduct, CertificateKind::Transfer) => Some("conduct_remarks"),
            (QuickPick::Conduct, CertificateKind::Character) => Some("remarks"),
            (QuickPick::TransferReason, CertificateKind::Transfer) => Some("reason_for_transfer"),
            _ => None,
        }
    }
}

impl Suggestions {
    pub fn list(&self, pick: QuickPick) -> &'static [&'static str] {
        match pick {
            QuickPick::Achievement => self.achievements,
            QuickPick::Conduct => self.conduct,
            QuickPick::TransferReason => self.transfer_reasons,
        }
    }

    pub fn phrase(&self, pick: QuickPick, index: usize) -> Option<&'static str> {
        self.list(pick).get(index).copied()
    }
}
