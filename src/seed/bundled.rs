use crate::seed::traits::SeedSource;
use crate::seed::SeedData;
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

const PROPERTIES: &str = include_str!("../../data/properties.json");
const AGENTS: &str = include_str!("../../data/agents.json");
const SAVED_PROPERTIES: &str = include_str!("../../data/saved_properties.json");

/// Seed records compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSeed;

impl BundledSeed {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SeedSource for BundledSeed {
    async fn load(&self) -> Result<SeedData> {
        let seed = SeedData::from_json(PROPERTIES, AGENTS, SAVED_PROPERTIES)?;
        debug!(
            "Parsed bundled seed: {} properties, {} agents, {} saved",
            seed.properties.len(),
            seed.agents.len(),
            seed.saved_properties.len()
        );
        Ok(seed)
    }

    fn source_name(&self) -> &'static str {
        "bundled"
    }
}
