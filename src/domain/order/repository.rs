//! Order repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{Order, OrderId};
use crate::domain::DomainError;

/// Store contract for orders
#[async_trait]
pub trait OrderRepository: Send + Sync + Debug {
    /// Saves an order, assigning an id on first save
    async fn save(&self, order: Order) -> Result<Order, DomainError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Deletes by id, true when a row was removed
    async fn delete(&self, id: OrderId) -> Result<bool, DomainError>;
}
