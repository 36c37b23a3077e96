use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::labels::{LabelKey, Labels};
use super::suggestions::{Suggestions, MADRASAH_SUGGESTIONS};
use crate::certificate::model::CertificateKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionType {
    Madrasah,
    #[default]
    School,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    Standard,
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Bn,
    En,
}

/// Tabs of the certificates screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Appreciation,
    Character,
    Transfer,
    Course,
    Progress,
    Adhar,
    Bonafide,
    IdCards,
}

impl Tab {
    pub fn kind(self) -> Option<CertificateKind> {
        match self {
            Tab::Appreciation => Some(CertificateKind::Appreciation),
            Tab::Character => Some(CertificateKind::Character),
            Tab::Transfer => Some(CertificateKind::Transfer),
            Tab::Course => Some(CertificateKind::Course),
            Tab::Progress => Some(CertificateKind::Progress),
            Tab::Adhar => Some(CertificateKind::AdharExtract),
            Tab::Bonafide => Some(CertificateKind::Bonafide),
            Tab::IdCards => None,
        }
    }

    pub fn label_key(self) -> LabelKey {
        match self {
            Tab::Appreciation => LabelKey::TabAppreciation,
            Tab::Character => LabelKey::TabCharacter,
            Tab::Transfer => LabelKey::TabTransfer,
            Tab::Course => LabelKey::TabCourse,
            Tab::Progress => LabelKey::TabProgress,
            Tab::Adhar => LabelKey::TabAdhar,
            Tab::Bonafide => LabelKey::TabBonafide,
            Tab::IdCards => LabelKey::TabIdCards,
        }
    }
}

const MADRASAH_TABS: &[Tab] = &[Tab::Appreciation, Tab::Character, Tab::Transfer];
const SCHOOL_TABS: &[Tab] = &[
    Tab::Course,
    Tab::Transfer,
    Tab::Progress,
    Tab::Adhar,
    Tab::Bonafide,
    Tab::IdCards,
];

/// Institution type and UI mode of the signed-in tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InstitutionMode {
    pub institution_type: InstitutionType,
    pub ui_mode: UiMode,
}

impl InstitutionMode {
    pub fn school() -> Self {
        Self::default()
    }

    pub fn madrasah() -> Self {
        Self {
            institution_type: InstitutionType::Madrasah,
            ui_mode: UiMode::Standard,
        }
    }

    /// Read `/institution/settings`. Unknown or missing values keep the defaults.
    pub fn from_settings(settings: &Value) -> Self {
        let institution_type = match settings.get("institution_type").and_then(Value::as_str) {
            Some("madrasah") => InstitutionType::Madrasah,
            _ => InstitutionType::School,
        };
        let ui_mode = match settings.get("ui_mode").and_then(Value::as_str) {
            Some("simple") => UiMode::Simple,
            _ => UiMode::Standard,
        };
        Self {
            institution_type,
            ui_mode,
        }
    }

    pub fn is_madrasah(&self) -> bool {
        self.institution_type == InstitutionType::Madrasah
    }

    pub fn lang(&self) -> Lang {
        if self.is_madrasah() {
            Lang::Bn
        } else {
            Lang::En
        }
    }

    pub fn labels(&self) -> Labels {
        Labels::new(self.lang())
    }

    pub fn label(&self, key: LabelKey) -> &'static str {
        self.labels().get(key)
    }

    pub fn default_tab(&self) -> Tab {
        if self.is_madrasah() {
            Tab::Appreciation
        } else {
            Tab::Course
        }
    }

    pub fn visible_tabs(&self) -> &'static [Tab] {
        if self.is_madrasah() {
            MADRASAH_TABS
        } else {
            SCHOOL_TABS
        }
    }

    /// Kinds reachable from the visible tabs.
    pub fn visible_kinds(&self) -> Vec<CertificateKind> {
        self.visible_tabs().iter().filter_map(|t| t.kind()).collect()
    }

    pub fn shows_id_cards(&self) -> bool {
        self.visible_tabs().contains(&Tab::IdCards)
    }

    /// Quick-pick phrase lists; madrasah only.
    pub fn suggestions(&self) -> Option<&'static Suggestions> {
        if self.is_madrasah() {
            Some(&MADRASAH_SUGGESTIONS)
        } else {
            None
        }
    }

    /// Placeholder for a missing template field.
    pub fn placeholder(&self) -> &'static str {
        self.label(LabelKey::NotAvailable)
    }
}

/// Everything the front-end needs to lay out the certificates screen.
#[derive(Debug, Clone, Serialize)]
pub struct ModeView {
    pub institution_type: InstitutionType,
    pub ui_mode: UiMode,
    pub lang: Lang,
    pub default_tab: Tab,
    pub tabs: Vec<TabView>,
    pub labels: BTreeMap<&'static str, &'static str>,
    pub suggestions: Option<&'static Suggestions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabView {
    pub tab: Tab,
    pub label: &'static str,
}

impl From<InstitutionMode> for ModeView {
    fn from(mode: InstitutionMode) -> Self {
        let labels = mode.labels();
        Self {
            institution_type: mode.institution_type,
            ui_mode: mode.ui_mode,
            lang: mode.lang(),
            default_tab: mode.default_tab(),
            tabs: mode
                .visible_tabs()
                .iter()
                .map(|&tab| TabView {
                    tab,
                    label: labels.get(tab.label_key()),
                })
                .collect(),
            labels: labels.to_map(),
            suggestions: mode.suggestions(),
        }
    }
}
