use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lostfound_contract::LostItemRecord;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend unavailable")]
    Unavailable,
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("lost item {0} already exists")]
    Duplicate(String),
    #[error("store write failure: {0}")]
    WriteFailed(String),
}

#[async_trait]
pub trait LostItemStore: Send + Sync {
    async fn create_lost_item(
        &self,
        record: &LostItemRecord,
        encoded_image: &str,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLostItem {
    pub record: LostItemRecord,
    pub image_bytes: Vec<u8>,
}

/// Keeps posted items in memory. `fail_with` makes every following call
/// return that error without storing anything.
#[derive(Debug, Default)]
pub struct InMemoryLostItemStore {
    items: RwLock<Vec<StoredLostItem>>,
    calls: RwLock<usize>,
    failure: RwLock<Option<StoreError>>,
}

impl InMemoryLostItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_with(&self, error: Option<StoreError>) {
        *self.failure.write().await = error;
    }

    pub async fn items(&self) -> Vec<StoredLostItem> {
        self.items.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl LostItemStore for InMemoryLostItemStore {
    async fn create_lost_item(
        &self,
        record: &LostItemRecord,
        encoded_image: &str,
    ) -> Result<(), StoreError> {
        *self.calls.write().await += 1;

        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }

        let image_bytes = STANDARD
            .decode(encoded_image)
            .map_err(|err| StoreError::InvalidPayload(format!("image is not base64: {err}")))?;

        let mut items = self.items.write().await;
        if items.iter().any(|item| item.record.id == record.id) {
            return Err(StoreError::Duplicate(record.id.clone()));
        }

        info!(
            id = %record.id,
            title = %record.title,
            image_bytes = image_bytes.len(),
            "lost item stored in memory"
        );
        items.push(StoredLostItem {
            record: record.clone(),
            image_bytes,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryLostItemStore, LostItemStore, StoreError};
    use chrono::Utc;
    use lostfound_contract::{FinderIdentity, LostItemRecord};

    fn record() -> LostItemRecord {
        LostItemRecord::new_report(
            "Glasses",
            "Cafeteria",
            "file:///g.jpg",
            &FinderIdentity::anonymous(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn stores_decoded_image() {
        let store = InMemoryLostItemStore::new();
        store.create_lost_item(&record(), "aGVsbG8=").await.expect("create");

        let items = store.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image_bytes, b"hello");
    }

    #[tokio::test]
    async fn rejects_non_base64_payload() {
        let store = InMemoryLostItemStore::new();
        let err = store.create_lost_item(&record(), "***").await.unwrap_err();

        assert!(matches!(err, StoreError::InvalidPayload(_)));
        assert!(store.items().await.is_empty());
        assert_eq!(store.call_count().await, 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let store = InMemoryLostItemStore::new();
        let record = record();
        store.create_lost_item(&record, "").await.expect("first");

        let err = store.create_lost_item(&record, "").await.unwrap_err();
        assert_eq!(err, StoreError::Duplicate(record.id));
    }

    #[tokio::test]
    async fn scripted_failure_stores_nothing() {
        let store = InMemoryLostItemStore::new();
        store.fail_with(Some(StoreError::Unavailable)).await;

        let err = store.create_lost_item(&record(), "aGVsbG8=").await.unwrap_err();
        assert_eq!(err, StoreError::Unavailable);
        assert!(store.items().await.is_empty());
    }
}
