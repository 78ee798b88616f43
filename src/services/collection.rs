use crate::error::{StoreError, StoreResult};
use crate::models::{Agent, Property, SavedProperty};
use tokio::sync::RwLock;

/// A record kept in a [`Collection`], identified by a numeric id
pub trait Record: Clone + Send + Sync {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> u32;

    fn set_id(&mut self, id: u32);
}

impl Record for Property {
    const ENTITY: &'static str = "Property";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Record for SavedProperty {
    const ENTITY: &'static str = "Saved property";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Record for Agent {
    const ENTITY: &'static str = "Agent";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

struct Inner<T> {
    records: Vec<T>,
    /// Highest id ever handed out, so deleted ids are never reused
    last_id: u32,
}

/// Insertion-ordered in-memory records behind a lock.
///
/// Every read hands out clones; callers never hold references into the
/// collection. Id allocation and the append happen under one write guard.
pub struct Collection<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        let last_id = records.iter().map(T::id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { records, last_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.inner.read().await.records.clone()
    }

    /// Clones of the records accepted by `keep`, in insertion order
    pub async fn select<F>(&self, keep: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .records
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: u32) -> StoreResult<T> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    pub async fn find<F>(&self, matches: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| matches(r))
            .cloned()
    }

    pub async fn any<F>(&self, matches: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.inner.read().await.records.iter().any(|r| matches(r))
    }

    /// Append a record built from the next free id.
    ///
    /// `build` sees the current records, so uniqueness checks run under the
    /// same guard as the append. An error from `build` leaves the collection
    /// and the id counter untouched.
    pub async fn try_insert_with<F>(&self, build: F) -> StoreResult<T>
    where
        F: FnOnce(&[T], u32) -> StoreResult<T>,
    {
        let mut inner = self.inner.write().await;
        let id = next_id::<T>(inner.last_id)?;
        let mut record = build(&inner.records, id)?;
        record.set_id(id);
        inner.last_id = id;
        inner.records.push(record.clone());
        Ok(record)
    }

    pub async fn insert_with<F>(&self, build: F) -> StoreResult<T>
    where
        F: FnOnce(u32) -> T,
    {
        self.try_insert_with(|_, id| Ok(build(id))).await
    }

    /// Modify a record in place. The id is restored afterwards whatever `apply` did.
    pub async fn update_with<F>(&self, id: u32, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        apply(record);
        record.set_id(id);
        Ok(record.clone())
    }

    pub async fn remove(&self, id: u32) -> StoreResult<T> {
        self.remove_where(|r| r.id() == id, || StoreError::not_found(T::ENTITY, id))
            .await
    }

    /// Remove the first record accepted by `matches`
    pub async fn remove_where<F, E>(&self, matches: F, missing: E) -> StoreResult<T>
    where
        F: Fn(&T) -> bool,
        E: FnOnce() -> StoreError,
    {
        let mut inner = self.inner.write().await;
        match inner.records.iter().position(|r| matches(r)) {
            Some(index) => Ok(inner.records.remove(index)),
            None => Err(missing()),
        }
    }
}

fn next_id<T: Record>(last_id: u32) -> StoreResult<u32> {
    last_id
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted { entity: T::ENTITY })
}
