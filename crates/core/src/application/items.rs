// Item Service - listing CRUD and ownership checks (Phase 1)

use crate::domain::item::{validate_cost, validate_name};
use crate::domain::{Item, ItemUpdate};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, ItemRepository, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Listing use cases. The claim queue rides along on the entity but is
/// never written here; ClaimService owns all queue mutations (ADR-009).
pub struct ItemService {
    item_repo: Arc<dyn ItemRepository>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl ItemService {
    pub fn new(
        item_repo: Arc<dyn ItemRepository>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            item_repo,
            id_provider,
            time_provider,
        }
    }

    /// List an item for sale; its claim queue starts empty.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        seller: &str,
        name: &str,
        cost: i64,
        description: &str,
        pictures: Vec<String>,
        contact: &str,
    ) -> Result<Item> {
        validate_name(name)?;
        validate_cost(cost)?;

        let item = Item::new(
            self.id_provider.generate_id(),
            seller,
            name,
            cost,
            description,
            pictures,
            contact,
            self.time_provider.now_millis(),
        );
        self.item_repo.insert(&item).await?;

        info!(item_id = %item.id, seller, "item listed");
        Ok(item)
    }

    pub async fn get(&self, id: &str) -> Result<Item> {
        self.item_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::item_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        self.item_repo.list().await
    }

    pub async fn list_by_seller(&self, seller: &str) -> Result<Vec<Item>> {
        self.item_repo.list_by_seller(seller).await
    }

    /// Apply a partial listing update and return the fresh entity.
    pub async fn update(&self, id: &str, update: ItemUpdate) -> Result<Item> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(cost) = update.cost {
            validate_cost(cost)?;
        }
        if update.is_empty() {
            return self.get(id).await;
        }

        self.item_repo
            .update_listing(id, &update, self.time_provider.now_millis())
            .await?;
        self.get(id).await
    }

    /// Delete the listing; the embedded queue goes with it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.item_repo.delete(id).await?;
        info!(item_id = id, "item deleted");
        Ok(())
    }

    /// Load the item and require `user` to be its seller.
    pub async fn assert_seller(&self, id: &str, user: &str) -> Result<Item> {
        let item = self.get(id).await?;
        if item.seller != user {
            return Err(AppError::Forbidden(format!(
                "user {} is not the seller of item {}",
                user, id
            )));
        }
        Ok(item)
    }
}
