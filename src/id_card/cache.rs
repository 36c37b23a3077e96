//! Process-local store of generated ID cards.
//!
//! All cards live in one JSON array under [`CARD_CACHE_KEY`]. Every mutation
//! rewrites the whole array; nothing is batched.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::generator::build_cards;
use super::model::{CardType, IdCard};
use crate::institution::{InstitutionMode, SchoolBranding};
use crate::people::PeopleDirectory;

pub const CARD_CACHE_KEY: &str = "generatedIdCards";

#[derive(Debug, Error)]
pub enum CardCacheError {
    #[error("card storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode cards: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("No ID cards to print")]
    NothingToPrint,
    #[error("ID card {0} not found")]
    UnknownCard(String),
}

/// Key/value persistence behind the card cache.
pub trait CardStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CardCacheError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CardCacheError>;
}

/// One `<key>.json` file per key inside `dir`.
pub struct FileCardStorage {
    dir: PathBuf,
}

impl FileCardStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_filename::sanitize(key)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CardStorage for FileCardStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CardCacheError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CardCacheError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCardStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCardStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardStorage for MemoryCardStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CardCacheError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CardCacheError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct LocalCardCache {
    storage: Arc<dyn CardStorage>,
    cards: Mutex<Vec<IdCard>>,
}

impl LocalCardCache {
    /// Load persisted cards. Missing or unreadable data yields an empty cache.
    pub fn load(storage: Arc<dyn CardStorage>) -> Self {
        let cards = match storage.read(CARD_CACHE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<IdCard>>(&raw) {
                Ok(cards) => {
                    log::info!("Loaded {} cached ID cards", cards.len());
                    cards
                }
                Err(e) => {
                    log::warn!("Discarding unreadable ID card cache: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("ID card cache unavailable, starting empty: {}", e);
                Vec::new()
            }
        };
        Self {
            storage,
            cards: Mutex::new(cards),
        }
    }

    pub fn cards(&self) -> Vec<IdCard> {
        self.cards.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.cards.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.lock().is_empty()
    }

    pub fn find(&self, id: &str) -> Option<IdCard> {
        self.cards.lock().iter().find(|card| card.id == id).cloned()
    }

    /// Append `new_cards` and persist the full set.
    ///
    /// On a persistence failure the in-memory set is left as it was.
    pub fn append(&self, new_cards: &[IdCard]) -> Result<usize, CardCacheError> {
        if new_cards.is_empty() {
            return Ok(self.len());
        }

        let mut cards = self.cards.lock();
        let mut merged = cards.clone();
        merged.extend_from_slice(new_cards);

        let encoded = serde_json::to_string(&merged)?;
        if let Err(e) = self.storage.write(CARD_CACHE_KEY, &encoded) {
            log::error!("Failed to persist ID card cache: {}", e);
            return Err(e);
        }

        *cards = merged;
        log::info!(
            "ID card cache persisted ({} cards, {} new)",
            cards.len(),
            new_cards.len()
        );
        Ok(cards.len())
    }

    /// Generate cards for the requested people and append them.
    pub fn generate(
        &self,
        people: &PeopleDirectory,
        card_type: CardType,
        person_ids: &[String],
        branding: &SchoolBranding,
        now: DateTime<Utc>,
    ) -> Result<Vec<IdCard>, CardCacheError> {
        let cards = build_cards(people, card_type, person_ids, branding, now);
        self.append(&cards)?;
        log::info!(
            "Generated {} {} ID cards ({} requested)",
            cards.len(),
            card_type,
            person_ids.len()
        );
        Ok(cards)
    }

    /// Print document for one card, or for every cached card when `card_id` is `None`.
    pub fn print(
        &self,
        card_id: Option<&str>,
        mode: InstitutionMode,
    ) -> Result<String, CardCacheError> {
        let selection = match card_id {
            Some(id) => vec![self
                .find(id)
                .ok_or_else(|| CardCacheError::UnknownCard(id.to_string()))?],
            None => self.cards(),
        };
        if selection.is_empty() {
            return Err(CardCacheError::NothingToPrint);
        }
        Ok(crate::render::id_card::print_document(&selection, mode))
    }
}
