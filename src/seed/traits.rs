use crate::seed::SeedData;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all seed data sources
/// Lets the binary swap the bundled records for a directory of JSON files
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Load every seed collection from the source
    async fn load(&self) -> Result<SeedData>;

    /// Get the name of the seed source
    fn source_name(&self) -> &'static str;
}
