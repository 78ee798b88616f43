//! Application layer: joins listings, bookmarks and agents the way the
//! browser pages consume them.

use crate::error::{IntoRecordId, StoreResult};
use crate::models::{Agent, Coordinates, Property, SavedProperty};
use crate::seed::SeedData;
use crate::services::{
    AgentStore, Latency, NewSavedProperty, PropertyFilters, PropertyStore, SavedPropertyStore,
    SortOrder,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Map centre used when a search finds nothing (downtown Los Angeles)
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates {
    lat: 34.0522,
    lng: -118.2437,
};

/// A listing with the state its detail view needs
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    pub property: Property,
    pub is_saved: bool,
    pub agent: Option<Agent>,
}

/// A bookmark joined with the listing it points at
#[derive(Debug, Clone, Serialize)]
pub struct SavedListing {
    pub entry: SavedProperty,
    pub property: Property,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentProfile {
    pub agent: Agent,
    pub listings: Vec<Property>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapResults {
    pub listings: Vec<Property>,
    pub center: Coordinates,
}

/// Owns the stores and answers page-level questions by calling each in turn
pub struct ListingBrowser {
    properties: PropertyStore,
    saved: SavedPropertyStore,
    agents: AgentStore,
}

impl ListingBrowser {
    pub fn new(properties: PropertyStore, saved: SavedPropertyStore, agents: AgentStore) -> Self {
        Self {
            properties,
            saved,
            agents,
        }
    }

    /// Build all stores from seed data, optionally with simulated latency
    pub fn from_seed(seed: SeedData, simulate_latency: bool) -> Self {
        let (property_latency, saved_latency, agent_latency) = if simulate_latency {
            (
                Latency::properties(),
                Latency::saved_properties(),
                Latency::agents(),
            )
        } else {
            (Latency::none(), Latency::none(), Latency::none())
        };

        info!(
            "Seeding stores with {} properties, {} agents, {} saved",
            seed.properties.len(),
            seed.agents.len(),
            seed.saved_properties.len()
        );

        Self::new(
            PropertyStore::new(seed.properties).with_latency(property_latency),
            SavedPropertyStore::new(seed.saved_properties).with_latency(saved_latency),
            AgentStore::new(seed.agents).with_latency(agent_latency),
        )
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    pub fn saved(&self) -> &SavedPropertyStore {
        &self.saved
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// Filtered listings in the requested order
    pub async fn browse(&self, filters: &PropertyFilters, sort: SortOrder) -> Vec<Property> {
        let mut listings = self.properties.get_all(filters).await;
        sort.sort(&mut listings);
        listings
    }

    pub async fn listing(&self, id: impl IntoRecordId) -> StoreResult<ListingDetail> {
        let property = self.properties.get_by_id(id).await?;
        let is_saved = self.saved.is_saved(&property.id.to_string()).await;
        let agent = self.agents.get_for_property(&property).await;
        Ok(ListingDetail {
            property,
            is_saved,
            agent,
        })
    }

    /// Save the listing if it is not saved, unsave it otherwise. Returns the new state.
    pub async fn toggle_saved(&self, property_id: u32) -> StoreResult<bool> {
        let key = property_id.to_string();
        if self.saved.is_saved(&key).await {
            self.saved.delete_by_property_id(&key).await?;
            Ok(false)
        } else {
            self.saved.create(NewSavedProperty::new(key)).await?;
            Ok(true)
        }
    }

    /// Bookmarks with their listings. Entries whose listing is gone are skipped.
    pub async fn saved_listings(&self) -> Vec<SavedListing> {
        let entries = self.saved.get_all().await;
        let mut joined = Vec::with_capacity(entries.len());

        for entry in entries {
            match self.properties.get_by_id(&entry.property_id).await {
                Ok(property) => joined.push(SavedListing { entry, property }),
                Err(e) => warn!("Skipping saved entry {}: {}", entry.id, e),
            }
        }

        joined
    }

    /// Remove every bookmark, one delete per entry
    pub async fn clear_saved(&self) -> StoreResult<usize> {
        let entries = self.saved.get_all().await;
        for entry in &entries {
            self.saved.delete(entry.id).await?;
        }
        debug!("Cleared {} saved entries", entries.len());
        Ok(entries.len())
    }

    /// An agent and the listings that name them
    pub async fn agent_listings(&self, agent_id: impl IntoRecordId) -> StoreResult<AgentProfile> {
        let agent = self.agents.get_by_id(agent_id).await?;
        let listings = self
            .properties
            .get_all(&PropertyFilters::new())
            .await
            .into_iter()
            .filter(|p| p.agent.name == agent.name)
            .collect();
        Ok(AgentProfile { agent, listings })
    }

    /// Free-text location search for the map view, centred on the first hit
    pub async fn search_locations(&self, term: &str) -> MapResults {
        let listings = self
            .properties
            .get_all(&PropertyFilters::new().search(term))
            .await;
        let center = listings
            .first()
            .map(|p| p.coordinates)
            .unwrap_or(DEFAULT_MAP_CENTER);
        MapResults { listings, center }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{BundledSeed, SeedSource};
    use crate::services::{AgentUpdate, PropertyUpdate};

    async fn browser() -> ListingBrowser {
        let seed = BundledSeed::new().load().await.unwrap();
        ListingBrowser::from_seed(seed, false)
    }

    #[tokio::test]
    async fn browse_sorts_after_filtering() {
        let browser = browser().await;
        let filters = PropertyFilters::new().price_between(None, Some(1_100_000.0));
        let listings = browser.browse(&filters, SortOrder::PriceHighToLow).await;

        assert!(!listings.is_empty());
        assert!(listings.iter().all(|p| p.price <= 1_100_000));
        assert!(listings.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[tokio::test]
    async fn toggle_saved_flips_state() {
        let browser = browser().await;
        let before = browser.listing(1).await.unwrap().is_saved;

        assert_eq!(browser.toggle_saved(1).await.unwrap(), !before);
        assert_eq!(browser.listing(1).await.unwrap().is_saved, !before);
        assert_eq!(browser.toggle_saved(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn saved_listings_skip_deleted_properties() {
        let browser = browser().await;
        browser.toggle_saved(3).await.unwrap();
        let saved_before = browser.saved_listings().await.len();

        browser.properties().delete(3).await.unwrap();
        let saved_after = browser.saved_listings().await;

        assert_eq!(saved_after.len(), saved_before - 1);
        assert!(saved_after.iter().all(|s| s.property.id != 3));
        // the bookmark itself is left in place
        assert!(browser.saved().is_saved("3").await);
    }

    #[tokio::test]
    async fn clear_saved_empties_the_index() {
        let browser = browser().await;
        browser.toggle_saved(8).await.unwrap();
        let count = browser.saved().len().await;

        assert_eq!(browser.clear_saved().await.unwrap(), count);
        assert!(browser.saved().is_empty().await);
        assert!(browser.saved_listings().await.is_empty());
    }

    #[tokio::test]
    async fn agent_listings_join_on_name() {
        let browser = browser().await;
        let agent = browser.agents().get_by_id(1).await.unwrap();
        let profile = browser.agent_listings(1).await.unwrap();

        assert!(!profile.listings.is_empty());
        assert!(profile.listings.iter().all(|p| p.agent.name == agent.name));
    }

    #[tokio::test]
    async fn renaming_an_agent_orphans_their_listings() {
        let browser = browser().await;
        browser
            .agents()
            .update(
                1,
                AgentUpdate {
                    name: Some("Sarah Johnson-Park".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(browser.agent_listings(1).await.unwrap().listings.is_empty());
        let detail = browser.listing(1).await.unwrap();
        assert!(detail.agent.is_none());
    }

    #[tokio::test]
    async fn detail_resolves_agent_until_listing_is_reassigned() {
        let browser = browser().await;
        assert!(browser.listing(2).await.unwrap().agent.is_some());

        let mut contact = browser.listing(2).await.unwrap().property.agent;
        contact.name = "Nobody Known".to_string();
        browser
            .properties()
            .update(
                2,
                PropertyUpdate {
                    agent: Some(contact),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(browser.listing(2).await.unwrap().agent.is_none());
    }

    #[tokio::test]
    async fn location_search_centres_on_first_hit() {
        let browser = browser().await;
        let results = browser.search_locations("santa monica").await;
        assert_eq!(results.center, results.listings[0].coordinates);

        let nothing = browser.search_locations("zzz-no-such-place").await;
        assert!(nothing.listings.is_empty());
        assert_eq!(nothing.center, DEFAULT_MAP_CENTER);
    }

    #[tokio::test]
    async fn missing_listing_is_not_found() {
        let browser = browser().await;
        assert!(browser.listing(999).await.unwrap_err().is_not_found());
        assert!(browser.agent_listings("x").await.unwrap_err().is_not_found());
    }
}
