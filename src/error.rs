use thiserror::Error;

/// Failures reported by the in-memory stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the requested identifier exists.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A record with the same unique key already exists.
    #[error("{entity} already exists: {key}")]
    Conflict { entity: &'static str, key: String },

    /// Every `u32` id has been handed out; the collection accepts no more records.
    #[error("{entity} ids exhausted")]
    IdsExhausted { entity: &'static str },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, key: impl ToString) -> Self {
        StoreError::Conflict {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    pub fn is_ids_exhausted(&self) -> bool {
        matches!(self, StoreError::IdsExhausted { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Parse a record identifier given in string form (route params, saved entries).
///
/// A string that is not a number can never match a record, so it is reported
/// as a miss for `entity`.
pub fn parse_id(entity: &'static str, raw: &str) -> StoreResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StoreError::not_found(entity, raw))
}

/// Identifier accepted by by-id store operations: a number or its string form
pub trait IntoRecordId {
    fn into_record_id(self, entity: &'static str) -> StoreResult<u32>;
}

impl IntoRecordId for u32 {
    fn into_record_id(self, _entity: &'static str) -> StoreResult<u32> {
        Ok(self)
    }
}

impl IntoRecordId for &str {
    fn into_record_id(self, entity: &'static str) -> StoreResult<u32> {
        parse_id(entity, self)
    }
}

impl IntoRecordId for &String {
    fn into_record_id(self, entity: &'static str) -> StoreResult<u32> {
        parse_id(entity, self)
    }
}
