use crate::seed::traits::SeedSource;
use crate::seed::SeedData;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Seed records read from `properties.json`, `agents.json` and
/// `saved_properties.json` in one directory.
///
/// The saved-properties file is optional; the other two are required.
#[derive(Debug, Clone)]
pub struct DirectorySeed {
    dir: PathBuf,
}

impl DirectorySeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read seed file {}", path.display()))
    }

    async fn read_optional(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("No {} in {}, starting empty", name, self.dir.display());
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read seed file {}", path.display())),
        }
    }
}

#[async_trait]
impl SeedSource for DirectorySeed {
    async fn load(&self) -> Result<SeedData> {
        info!("Loading seed data from {}", self.dir.display());

        let properties = self.read("properties.json").await?;
        let agents = self.read("agents.json").await?;
        let saved = self
            .read_optional("saved_properties.json")
            .await?
            .unwrap_or_else(|| "[]".to_string());

        SeedData::from_json(&properties, &agents, &saved)
            .with_context(|| format!("Invalid seed data in {}", self.dir.display()))
    }

    fn source_name(&self) -> &'static str {
        "directory"
    }
}
