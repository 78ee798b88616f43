use crate::error::{IntoRecordId, StoreError, StoreResult};
use crate::models::SavedProperty;
use crate::services::collection::{Collection, Record};
use crate::services::latency::Latency;
use crate::services::types::{NewSavedProperty, SavedPropertyUpdate};
use chrono::Utc;
use tracing::debug;

/// Bookmarked listings, at most one entry per property id.
///
/// There is a single implicit user, so uniqueness is keyed on the property id
/// alone.
pub struct SavedPropertyStore {
    records: Collection<SavedProperty>,
    latency: Latency,
}

impl SavedPropertyStore {
    pub fn new(saved: Vec<SavedProperty>) -> Self {
        Self {
            records: Collection::new(saved),
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

    /// All bookmarks in the order they were saved
    pub async fn get_all(&self) -> Vec<SavedProperty> {
        Latency::pause(self.latency.get_all).await;
        self.records.snapshot().await
    }

    pub async fn get_by_id(&self, id: impl IntoRecordId) -> StoreResult<SavedProperty> {
        Latency::pause(self.latency.get_by_id).await;
        let id = id.into_record_id(SavedProperty::ENTITY)?;
        self.records.get(id).await
    }

    /// Bookmark a listing. Fails with `Conflict` if it is already saved.
    pub async fn create(&self, entry: NewSavedProperty) -> StoreResult<SavedProperty> {
        Latency::pause(self.latency.create).await;
        let created = self
            .records
            .try_insert_with(|existing, id| {
                if existing.iter().any(|s| s.property_id == entry.property_id) {
                    return Err(StoreError::conflict(
                        SavedProperty::ENTITY,
                        &entry.property_id,
                    ));
                }
                Ok(entry.into_saved(id, Utc::now()))
            })
            .await?;
        debug!(
            "Saved property {} as entry {}",
            created.property_id, created.id
        );
        Ok(created)
    }

    /// Change the notes of a bookmark; the property it points at is fixed
    pub async fn update(
        &self,
        id: impl IntoRecordId,
        changes: SavedPropertyUpdate,
    ) -> StoreResult<SavedProperty> {
        Latency::pause(self.latency.update).await;
        let id = id.into_record_id(SavedProperty::ENTITY)?;
        self.records
            .update_with(id, |s| {
                if let Some(notes) = changes.notes {
                    s.notes = notes;
                }
            })
            .await
    }

    pub async fn delete(&self, id: impl IntoRecordId) -> StoreResult<SavedProperty> {
        Latency::pause(self.latency.delete).await;
        let id = id.into_record_id(SavedProperty::ENTITY)?;
        let removed = self.records.remove(id).await?;
        debug!("Deleted saved entry {}", id);
        Ok(removed)
    }

    pub async fn delete_by_property_id(&self, property_id: &str) -> StoreResult<SavedProperty> {
        Latency::pause(self.latency.delete_by_property_id).await;
        let removed = self
            .records
            .remove_where(
                |s| s.property_id == property_id,
                || StoreError::not_found(SavedProperty::ENTITY, property_id),
            )
            .await?;
        debug!("Unsaved property {}", property_id);
        Ok(removed)
    }

    /// Exact string comparison; callers must stringify ids consistently
    pub async fn is_saved(&self, property_id: &str) -> bool {
        Latency::pause(self.latency.is_saved).await;
        self.records.any(|s| s.property_id == property_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: u32, property_id: &str) -> SavedProperty {
        SavedProperty {
            id,
            property_id: property_id.to_string(),
            notes: String::new(),
            saved_date: Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        }
    }

    fn store() -> SavedPropertyStore {
        SavedPropertyStore::new(vec![entry(1, "3"), entry(2, "7")])
    }

    #[tokio::test]
    async fn get_all_keeps_insertion_order() {
        let store = store();
        store.create(NewSavedProperty::new(1)).await.unwrap();
        let ids: Vec<String> = store
            .get_all()
            .await
            .into_iter()
            .map(|s| s.property_id)
            .collect();
        assert_eq!(ids, vec!["3", "7", "1"]);
    }

    #[tokio::test]
    async fn duplicate_bookmark_is_a_conflict() {
        let store = store();
        store.create(NewSavedProperty::new("5")).await.unwrap();
        let err = store.create(NewSavedProperty::new("5")).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn create_stamps_id_and_date() {
        let store = store();
        let before = Utc::now();
        let created = store
            .create(NewSavedProperty::new(9).with_notes("near the park"))
            .await
            .unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(created.property_id, "9");
        assert_eq!(created.notes, "near the park");
        assert!(created.saved_date >= before);
    }

    #[tokio::test]
    async fn first_entry_gets_id_one() {
        let store = SavedPropertyStore::new(vec![]);
        let created = store.create(NewSavedProperty::new(1)).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn is_saved_follows_create_and_delete() {
        let store = store();
        assert!(!store.is_saved("12").await);

        store.create(NewSavedProperty::new("12")).await.unwrap();
        assert!(store.is_saved("12").await);

        store.delete_by_property_id("12").await.unwrap();
        assert!(!store.is_saved("12").await);
    }

    #[tokio::test]
    async fn delete_by_property_id_miss_is_not_found() {
        let err = store().delete_by_property_id("99").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn by_id_operations() {
        let store = store();
        assert_eq!(store.get_by_id(2).await.unwrap().property_id, "7");
        assert_eq!(store.delete("1").await.unwrap().property_id, "3");
        assert!(store.get_by_id(1).await.unwrap_err().is_not_found());
        assert!(store.delete(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_changes_notes_only() {
        let store = store();
        let updated = store
            .update(
                2,
                SavedPropertyUpdate {
                    notes: Some("call agent".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.notes, "call agent");
        assert_eq!(updated.property_id, "7");
        assert!(store
            .update(40, SavedPropertyUpdate::default())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn bookmarks_are_not_checked_against_listings() {
        let store = store();
        let created = store.create(NewSavedProperty::new("not-a-listing")).await.unwrap();
        assert!(store.is_saved(&created.property_id).await);
    }
}
