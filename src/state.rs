use anyhow::Context;
use moka::future::Cache;
use std::sync::Arc;

use crate::certificate::controller::CertificateController;
use crate::config::AppConfig;
use crate::id_card::cache::{FileCardStorage, LocalCardCache};
use crate::institution::{InstitutionMode, SchoolBranding};
use crate::session::{Session, SharedWorkspace, Workspace};
use crate::store::{DocumentStore, HttpStoreFactory, StoreFactory};

/// Shared application state. Everything keyed by bearer token is one session.
pub struct AppState {
    store_factory: Arc<dyn StoreFactory>,
    pub cards: Arc<LocalCardCache>,
    sessions: Cache<String, SharedWorkspace>,
    modes: Cache<String, InstitutionMode>,
    brandings: Cache<String, SchoolBranding>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let factory = HttpStoreFactory::new(http_client, config.school_api_url.clone());
        let cards = LocalCardCache::load(Arc::new(FileCardStorage::new(&config.card_cache_dir)));

        Ok(Self::with_parts(
            Arc::new(factory),
            Arc::new(cards),
            config.session_ttl,
        ))
    }

    pub fn with_parts(
        store_factory: Arc<dyn StoreFactory>,
        cards: Arc<LocalCardCache>,
        session_ttl: std::time::Duration,
    ) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(session_ttl)
            .max_capacity(1_000)
            .build();
        let modes = Cache::builder()
            .time_to_live(session_ttl)
            .max_capacity(1_000)
            .build();
        let brandings = Cache::builder()
            .time_to_live(session_ttl)
            .max_capacity(1_000)
            .build();

        Self {
            store_factory,
            cards,
            sessions,
            modes,
            brandings,
        }
    }

    pub fn store(&self, token: &str) -> Arc<dyn DocumentStore> {
        self.store_factory.for_token(token)
    }

    /// Institution mode of the session, fetched once. Falls back to school
    /// mode without caching the fallback.
    pub async fn institution_mode(&self, token: &str) -> InstitutionMode {
        let store = self.store(token);
        let loaded = self
            .modes
            .try_get_with(token.to_string(), async move {
                store
                    .institution_settings()
                    .await
                    .map(|settings| InstitutionMode::from_settings(&settings))
            })
            .await;
        loaded.unwrap_or_else(|e| {
            log::warn!("Institution settings unavailable, using school mode: {}", e);
            InstitutionMode::school()
        })
    }

    /// Merged branding of the session, fetched once. When neither source
    /// answers an empty branding is returned and nothing is cached.
    pub async fn branding(&self, token: &str) -> SchoolBranding {
        let store = self.store(token);
        let loaded = self
            .brandings
            .try_get_with(token.to_string(), async move {
                SchoolBranding::try_load(store.as_ref()).await
            })
            .await;
        loaded.unwrap_or_else(|e| {
            log::warn!("Branding unavailable, rendering without it: {}", e);
            SchoolBranding::default()
        })
    }

    /// The session's workspace, created and bootstrapped on first use.
    pub async fn workspace(&self, token: &str) -> SharedWorkspace {
        let mode = self.institution_mode(token).await;
        let store = self.store(token);
        let has_cards = !self.cards.is_empty();
        self.sessions
            .get_with(token.to_string(), async move {
                let mut certificates = CertificateController::new(store, mode);
                certificates.bootstrap().await;
                log::info!(
                    "Opened {:?} workspace with {} students and {} staff",
                    mode.institution_type,
                    certificates.people().students.len(),
                    certificates.people().staff.len()
                );
                Arc::new(Session::new(Workspace::new(certificates, has_cards)))
            })
            .await
    }
}
