pub mod cache;
pub mod history;
pub mod identify;

pub use cache::ResultCache;
pub use history::{HistoryEntry, SessionHistoryStore};
pub use identify::{provider_from_config, DemoProvider, IdentificationProvider, PlantIdProvider};
