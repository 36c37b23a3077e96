//! Student and staff ID cards: snapshots, generation and the local card cache.

pub mod cache;
pub mod generator;
pub mod handlers;
pub mod model;

pub use cache::{CardCacheError, CardStorage, FileCardStorage, LocalCardCache, MemoryCardStorage};
pub use model::{CardType, IdCard};
