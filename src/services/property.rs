use crate::error::{IntoRecordId, StoreResult};
use crate::models::Property;
use crate::services::collection::{Collection, Record};
use crate::services::filters::PropertyFilters;
use crate::services::latency::Latency;
use crate::services::types::{NewProperty, PropertyUpdate};
use chrono::Utc;
use tracing::debug;

/// Property query engine over the in-memory listing collection
pub struct PropertyStore {
    records: Collection<Property>,
    latency: Latency,
}

impl PropertyStore {
    /// Create a store seeded with `properties`, without simulated latency
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            records: Collection::new(properties),
            latency: Latency::none(),
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub async fn len(&self) -> usize {
        self.records.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.records.is_empty().await
    }

    /// Listings accepted by every active filter, in collection order.
    ///
    /// Sorting is up to the caller; see [`SortOrder`](crate::services::SortOrder).
    pub async fn get_all(&self, filters: &PropertyFilters) -> Vec<Property> {
        Latency::pause(self.latency.get_all).await;
        let matches = self.records.select(filters.predicate()).await;
        debug!("Property query matched {} listings", matches.len());
        matches
    }

    pub async fn get_by_id(&self, id: impl IntoRecordId) -> StoreResult<Property> {
        Latency::pause(self.latency.get_by_id).await;
        let id = id.into_record_id(Property::ENTITY)?;
        self.records.get(id).await
    }

    /// Insert a listing under the next id, stamped with the current time
    pub async fn create(&self, data: NewProperty) -> StoreResult<Property> {
        Latency::pause(self.latency.create).await;
        let created = self
            .records
            .insert_with(|id| data.into_property(id, Utc::now()))
            .await?;
        debug!("Created property {}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: impl IntoRecordId,
        changes: PropertyUpdate,
    ) -> StoreResult<Property> {
        Latency::pause(self.latency.update).await;
        let id = id.into_record_id(Property::ENTITY)?;
        let updated = self.records.update_with(id, |p| changes.apply(p)).await?;
        debug!("Updated property {}", id);
        Ok(updated)
    }

    /// Remove a listing and hand it back
    pub async fn delete(&self, id: impl IntoRecordId) -> StoreResult<Property> {
        Latency::pause(self.latency.delete).await;
        let id = id.into_record_id(Property::ENTITY)?;
        let removed = self.records.remove(id).await?;
        debug!("Deleted property {}", id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, AgentContact, Coordinates, PropertyType};
    use crate::services::SortOrder;
    use chrono::{TimeZone, Utc};

    fn listing(id: u32, price: u64, bedrooms: u32) -> Property {
        Property {
            id,
            title: format!("Listing {}", id),
            description: String::new(),
            price,
            property_type: PropertyType::House,
            bedrooms,
            bathrooms: 1.0,
            square_feet: 1000,
            address: Address::default(),
            coordinates: Coordinates::default(),
            features: vec![],
            images: vec![],
            listing_date: Utc.with_ymd_and_hms(2024, 2, id, 0, 0, 0).unwrap(),
            agent: AgentContact::default(),
        }
    }

    fn new_listing(price: u64) -> NewProperty {
        NewProperty {
            title: "Fresh listing".to_string(),
            description: "Just built".to_string(),
            price,
            property_type: PropertyType::Townhouse,
            bedrooms: 3,
            bathrooms: 2.5,
            square_feet: 1800,
            address: Address {
                street: "9 Elm St".to_string(),
                city: "Denver".to_string(),
                neighborhood: "Highlands".to_string(),
                state: "CO".to_string(),
                zip_code: "80211".to_string(),
            },
            coordinates: Coordinates { lat: 39.76, lng: -105.01 },
            features: vec!["Patio".to_string()],
            images: vec!["https://img.example/1.jpg".to_string()],
            agent: AgentContact {
                name: "Sarah Johnson".to_string(),
                ..Default::default()
            },
        }
    }

    fn store() -> PropertyStore {
        PropertyStore::new(vec![listing(1, 100, 1), listing(2, 300, 2), listing(3, 200, 3)])
    }

    fn ids(properties: &[Property]) -> Vec<u32> {
        properties.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn every_listing_is_reachable_by_id() {
        let store = store();
        for p in store.get_all(&PropertyFilters::new()).await {
            assert_eq!(store.get_by_id(p.id).await.unwrap(), p);
        }
    }

    #[tokio::test]
    async fn string_ids_resolve_like_numbers() {
        let store = store();
        assert_eq!(store.get_by_id("2").await.unwrap().price, 300);
        assert!(store.get_by_id("two").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn price_range_is_inclusive() {
        let filters = PropertyFilters::new().price_between(Some(200.0), Some(300.0));
        let found = store().get_all(&filters).await;
        assert_eq!(ids(&found), vec![2, 3]);
    }

    #[tokio::test]
    async fn zero_bedroom_minimum_returns_everything() {
        let store = store();
        let found = store
            .get_all(&PropertyFilters::new().bedrooms_at_least(0.0))
            .await;
        assert_eq!(found.len(), store.len().await);
    }

    #[tokio::test]
    async fn sorted_by_price_ascending() {
        let mut found = store().get_all(&PropertyFilters::new()).await;
        SortOrder::PriceLowToHigh.sort(&mut found);
        assert_eq!(ids(&found), vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn results_are_copies() {
        let store = store();
        let mut found = store.get_all(&PropertyFilters::new()).await;
        found[0].price = 1;
        assert_eq!(store.get_by_id(1).await.unwrap().price, 100);
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_keeps_fields() {
        let store = store();
        let before = Utc::now();
        let created = store.create(new_listing(450_000)).await.unwrap();

        assert_eq!(created.id, 4);
        assert!(created.listing_date >= before);

        let fetched = store.get_by_id(4).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Fresh listing");
        assert_eq!(fetched.address.city, "Denver");
        assert_eq!(fetched.features, vec!["Patio".to_string()]);
    }

    #[tokio::test]
    async fn create_in_empty_store_starts_at_one() {
        let store = PropertyStore::new(vec![]);
        assert_eq!(store.create(new_listing(1)).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn update_merges_and_preserves_id() {
        let store = store();
        let updated = store
            .update(
                2,
                PropertyUpdate {
                    price: Some(350),
                    title: Some("Renovated".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, 2);
        assert_eq!(updated.price, 350);
        assert_eq!(updated.bedrooms, 2);
        assert_eq!(store.get_by_id(2).await.unwrap().title, "Renovated");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let err = store()
            .update(42, PropertyUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = store();
        let removed = store.delete(2).await.unwrap();
        assert_eq!(removed.price, 300);
        assert!(store.get_by_id(2).await.unwrap_err().is_not_found());
        assert!(store.delete(2).await.unwrap_err().is_not_found());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_handed_out_again() {
        let store = store();
        store.delete(3).await.unwrap();
        assert_eq!(store.create(new_listing(10)).await.unwrap().id, 4);
    }

    #[tokio::test]
    async fn simulated_latency_still_completes() {
        let store = store().with_latency(Latency::uniform(1));
        assert_eq!(store.get_all(&PropertyFilters::new()).await.len(), 3);
    }
}
