pub mod agent;
pub mod collection;
pub mod filters;
pub mod latency;
pub mod property;
pub mod saved;
pub mod types;

pub use agent::AgentStore;
pub use filters::{FilterKey, FilterPill, PropertyFilters};
pub use latency::Latency;
pub use property::PropertyStore;
pub use saved::SavedPropertyStore;
pub use types::{
    AgentUpdate, NewAgent, NewProperty, NewSavedProperty, PropertyUpdate, SavedPropertyUpdate,
    SortOrder,
};
