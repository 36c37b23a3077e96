use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::fields;
use crate::store::{DocumentStore, StoreError};

/// Institution identity printed on certificates and cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SchoolBranding {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl SchoolBranding {
    /// Combine the institution record with the branding settings.
    ///
    /// A source that failed to load is passed as `Value::Null` and simply
    /// contributes nothing.
    pub fn merge(institution: &Value, branding: &Value) -> Self {
        let name = fields::first_text(branding, &["school_name"])
            .or_else(|| fields::first_text(institution, &["name", "institution_name"]))
            .unwrap_or_default();
        let logo = fields::first_text(branding, &["logo_url"])
            .or_else(|| fields::first_text(institution, &["logo_url", "logo"]));
        let address = fields::first_text(institution, &["address"])
            .or_else(|| fields::first_text(branding, &["address"]))
            .unwrap_or_default();

        Self {
            name,
            logo,
            address,
            phone: fields::text(institution, &["phone", "contact_phone"]),
            email: fields::text(institution, &["email", "contact_email"]),
        }
    }

    /// Fetch both sources and merge them.
    ///
    /// One failed source is logged and contributes nothing. Fails only when
    /// neither source answers.
    pub async fn try_load(store: &dyn DocumentStore) -> Result<Self, StoreError> {
        let (institution, branding) = tokio::join!(store.institution(), store.school_branding());
        match (institution, branding) {
            (Err(institution_err), Err(branding_err)) => {
                log::warn!("School branding unavailable: {}", branding_err);
                Err(institution_err)
            }
            (institution, branding) => {
                let institution = institution.unwrap_or_else(|e| {
                    log::warn!("Institution details unavailable: {}", e);
                    Value::Null
                });
                let branding = branding.unwrap_or_else(|e| {
                    log::warn!("School branding unavailable: {}", e);
                    Value::Null
                });
                Ok(Self::merge(&institution, &branding))
            }
        }
    }
}
