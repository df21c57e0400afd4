pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod giveaways;
pub mod models;
pub mod saved;
pub mod state;
pub mod storage;
pub mod theme;
pub mod view;

pub use client::{GamerPowerClient, RemoteDataClient};
pub use config::{AppConfig, ClientConfig};
pub use error::{ConfigError, FetchError, StoreError, ValidationError};
pub use fetch::{FetchState, RequestId};
pub use filters::{FilterCriteria, FilterStore, ListQuery, SortBy, WorthQuery};
pub use giveaways::{Completion, GiveawayStore, Resource, Settled};
pub use models::{GiveawayDetail, GiveawayId, GiveawaySummary, Worth, WorthSummary};
pub use saved::{SavedCollectionStore, SavedEntry};
pub use state::AppState;
pub use storage::{PersistedState, SnapshotFile};
pub use theme::ThemeStore;
pub use view::{derive_view, ViewRow};
