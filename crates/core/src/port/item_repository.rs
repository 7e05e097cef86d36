// Item Repository Port (Interface)

use crate::domain::{Item, ItemUpdate};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Item persistence.
///
/// Listing fields and the claim queue are written through separate paths:
/// `update_listing` never touches the queue columns, and the queue is
/// mutated only through the `ClaimQueueStore` port (ADR-009).
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item (queue starts empty, version 0)
    async fn insert(&self, item: &Item) -> Result<()>;

    /// Find item by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>>;

    /// All items, newest first
    async fn list(&self) -> Result<Vec<Item>>;

    /// One seller's items, newest first
    async fn list_by_seller(&self, seller: &str) -> Result<Vec<Item>>;

    /// Apply a partial listing update; absent fields stay untouched
    /// (NotFound if the item is gone)
    async fn update_listing(&self, id: &str, update: &ItemUpdate, now_millis: i64) -> Result<()>;

    /// Delete the item row and its embedded queue (NotFound if gone)
    async fn delete(&self, id: &str) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory item repository for service tests
    pub struct MemItemRepository {
        rows: Mutex<HashMap<String, Item>>,
    }

    impl MemItemRepository {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }

        pub fn with_item(self, item: Item) -> Self {
            self.rows.lock().unwrap().insert(item.id.clone(), item);
            self
        }
    }

    impl Default for MemItemRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ItemRepository for MemItemRepository {
        async fn insert(&self, item: &Item) -> Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(item.id.clone(), item.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Item>> {
            Ok(self.rows.lock().unwrap().get(id).cloned())
        }

        async fn list(&self) -> Result<Vec<Item>> {
            let mut items: Vec<Item> = self.rows.lock().unwrap().values().cloned().collect();
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(items)
        }

        async fn list_by_seller(&self, seller: &str) -> Result<Vec<Item>> {
            let mut items: Vec<Item> = self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|i| i.seller == seller)
                .cloned()
                .collect();
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(items)
        }

        async fn update_listing(
            &self,
            id: &str,
            update: &ItemUpdate,
            now_millis: i64,
        ) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            let item = rows
                .get_mut(id)
                .ok_or_else(|| AppError::item_not_found(id))?;
            if let Some(name) = &update.name {
                item.name = name.clone();
            }
            if let Some(cost) = update.cost {
                item.cost = cost;
            }
            if let Some(description) = &update.description {
                item.description = description.clone();
            }
            if let Some(pictures) = &update.pictures {
                item.pictures = pictures.clone();
            }
            if let Some(contact) = &update.contact {
                item.contact = contact.clone();
            }
            item.updated_at = now_millis;
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            match self.rows.lock().unwrap().remove(id) {
                Some(_) => Ok(()),
                None => Err(AppError::item_not_found(id)),
            }
        }
    }
}
