use crate::error::{IntoRecordId, StoreResult};
use crate::models::{Agent, Property};
use crate::services::collection::{Collection, Record};
use crate::services::latency::Latency;
use crate::services::types::{AgentUpdate, NewAgent};
use tracing::debug;

/// Directory of listing agents
pub struct AgentStore {
    records: Collection<Agent>,
    latency: Latency,
}

impl AgentStore {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self {
            records: Collection::new(agents),
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

    pub async fn get_all(&self) -> Vec<Agent> {
        Latency::pause(self.latency.get_all).await;
        self.records.snapshot().await
    }

    pub async fn get_by_id(&self, id: impl IntoRecordId) -> StoreResult<Agent> {
        Latency::pause(self.latency.get_by_id).await;
        let id = id.into_record_id(Agent::ENTITY)?;
        self.records.get(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Option<Agent> {
        Latency::pause(self.latency.get_by_id).await;
        self.records.find(|a| a.name == name).await
    }

    /// The directory entry a listing's agent contact refers to.
    ///
    /// Listings carry the agent's name only, so a renamed agent no longer
    /// resolves and `None` comes back.
    pub async fn get_for_property(&self, property: &Property) -> Option<Agent> {
        self.find_by_name(&property.agent.name).await
    }

    pub async fn create(&self, data: NewAgent) -> StoreResult<Agent> {
        Latency::pause(self.latency.create).await;
        let created = self.records.insert_with(|id| data.into_agent(id)).await?;
        debug!("Created agent {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: impl IntoRecordId, changes: AgentUpdate) -> StoreResult<Agent> {
        Latency::pause(self.latency.update).await;
        let id = id.into_record_id(Agent::ENTITY)?;
        self.records.update_with(id, |a| changes.apply(a)).await
    }

    pub async fn delete(&self, id: impl IntoRecordId) -> StoreResult<Agent> {
        Latency::pause(self.latency.delete).await;
        let id = id.into_record_id(Agent::ENTITY)?;
        let removed = self.records.remove(id).await?;
        debug!("Deleted agent {}", id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, AgentContact, Coordinates, PropertyType};
    use chrono::Utc;

    fn agent(id: u32, name: &str) -> Agent {
        Agent {
            id,
            name: name.to_string(),
            company: "Keystone Realty".to_string(),
            phone: "(555) 010-0000".to_string(),
            email: format!("agent{}@keystone.example", id),
            license: format!("RE-{:05}", id),
            photo: String::new(),
        }
    }

    fn listed_by(name: &str) -> Property {
        Property {
            id: 1,
            title: "Cottage".to_string(),
            description: String::new(),
            price: 1,
            property_type: PropertyType::House,
            bedrooms: 1,
            bathrooms: 1.0,
            square_feet: 1,
            address: Address::default(),
            coordinates: Coordinates::default(),
            features: vec![],
            images: vec![],
            listing_date: Utc::now(),
            agent: AgentContact {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    fn store() -> AgentStore {
        AgentStore::new(vec![agent(1, "Sarah Johnson"), agent(2, "Michael Chen")])
    }

    #[tokio::test]
    async fn resolves_listing_agent_by_name() {
        let found = store().get_for_property(&listed_by("Michael Chen")).await;
        assert_eq!(found.map(|a| a.id), Some(2));
    }

    #[tokio::test]
    async fn renamed_agent_leaves_listing_dangling() {
        let store = store();
        store
            .update(
                2,
                AgentUpdate {
                    name: Some("Mike Chen".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(store.get_for_property(&listed_by("Michael Chen")).await.is_none());
    }

    #[tokio::test]
    async fn crud_round() {
        let store = store();
        let created = store
            .create(NewAgent {
                name: "Ana Ruiz".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(store.get_by_id("3").await.unwrap().name, "Ana Ruiz");

        let removed = store.delete(3).await.unwrap();
        assert_eq!(removed.name, "Ana Ruiz");
        assert!(store.get_by_id(3).await.unwrap_err().is_not_found());
        assert!(store
            .update(3, AgentUpdate::default())
            .await
            .unwrap_err()
            .is_not_found());
    }
}
