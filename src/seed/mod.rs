pub mod bundled;
pub mod directory;
pub mod traits;

pub use bundled::BundledSeed;
pub use directory::DirectorySeed;
pub use traits::SeedSource;

use crate::models::{Agent, Property, SavedProperty};
use anyhow::{Context, Result};

/// Initial contents of every store, loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub properties: Vec<Property>,
    pub agents: Vec<Agent>,
    pub saved_properties: Vec<SavedProperty>,
}

impl SeedData {
    pub fn from_json(properties: &str, agents: &str, saved_properties: &str) -> Result<Self> {
        Ok(Self {
            properties: serde_json::from_str(properties)
                .context("Failed to parse properties seed")?,
            agents: serde_json::from_str(agents).context("Failed to parse agents seed")?,
            saved_properties: serde_json::from_str(saved_properties)
                .context("Failed to parse saved properties seed")?,
        })
    }
}
