//! In-memory store backend
//!
//! Thread-safe repositories backed by lock-protected maps, with a per-kind
//! atomic sequence standing in for the store's id assignment. Useful for
//! embedding, development and tests; data is lost when the process
//! terminates.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::freelancer::{Freelancer, FreelancerId, FreelancerRepository};
use crate::domain::order::{Order, OrderId, OrderRepository};
use crate::domain::skill::{Skill, SkillId, SkillRepository};

fn read_lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire write lock: {}", e))
}

/// Thread-safe in-memory freelancer store
#[derive(Debug, Default)]
pub struct InMemoryFreelancerRepository {
    rows: RwLock<HashMap<i64, Freelancer>>,
    sequence: AtomicI64,
}

impl InMemoryFreelancerRepository {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> FreelancerId {
        FreelancerId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait]
impl FreelancerRepository for InMemoryFreelancerRepository {
    async fn save(&self, mut freelancer: Freelancer) -> Result<Freelancer, DomainError> {
        if !freelancer.id().is_assigned() {
            freelancer.assign_id(self.next_id());
        }

        let mut rows = self.rows.write().map_err(write_lock_error)?;
        rows.insert(freelancer.id().as_i64(), freelancer.clone());
        Ok(freelancer)
    }

    async fn find_by_id(&self, id: FreelancerId) -> Result<Option<Freelancer>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows.get(&id.as_i64()).cloned())
    }

    async fn delete(&self, id: FreelancerId) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().map_err(write_lock_error)?;
        Ok(rows.remove(&id.as_i64()).is_some())
    }

    async fn find_all(&self) -> Result<Vec<Freelancer>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows.values().cloned().collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Freelancer>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows
            .values()
            .filter(|f| f.category() == category)
            .cloned()
            .collect())
    }

    // One row per freelancer, so matches are deduplicated by construction.
    async fn find_by_category_and_skill(
        &self,
        category: Option<&str>,
        skill_name: Option<&str>,
    ) -> Result<Vec<Freelancer>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows
            .values()
            .filter(|f| category.is_none_or(|c| f.category() == c))
            .filter(|f| {
                skill_name.is_none_or(|s| f.skills().iter().any(|skill| skill.name() == s))
            })
            .cloned()
            .collect())
    }
}

/// Thread-safe in-memory order store
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    rows: RwLock<HashMap<i64, Order>>,
    sequence: AtomicI64,
}

impl InMemoryOrderRepository {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> OrderId {
        OrderId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, mut order: Order) -> Result<Order, DomainError> {
        if !order.id().is_assigned() {
            order.assign_id(self.next_id());
        }

        let mut rows = self.rows.write().map_err(write_lock_error)?;
        rows.insert(order.id().as_i64(), order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows.get(&id.as_i64()).cloned())
    }

    async fn delete(&self, id: OrderId) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().map_err(write_lock_error)?;
        Ok(rows.remove(&id.as_i64()).is_some())
    }
}

/// Thread-safe in-memory skill store
///
/// Enforces name uniqueness on first save, mirroring the unique constraint
/// a durable store carries on the name column.
#[derive(Debug, Default)]
pub struct InMemorySkillRepository {
    rows: RwLock<HashMap<i64, Skill>>,
    sequence: AtomicI64,
}

impl InMemorySkillRepository {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> SkillId {
        SkillId::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn save(&self, mut skill: Skill) -> Result<Skill, DomainError> {
        let mut rows = self.rows.write().map_err(write_lock_error)?;

        if !skill.id().is_assigned() {
            if rows.values().any(|row| row.name() == skill.name()) {
                return Err(DomainError::validation(format!(
                    "Skill with name '{}' already exists",
                    skill.name()
                )));
            }

            skill.assign_id(self.next_id());
        }

        rows.insert(skill.id().as_i64(), skill.clone());
        Ok(skill)
    }

    async fn find_by_id(&self, id: SkillId) -> Result<Option<Skill>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, DomainError> {
        let rows = self.rows.read().map_err(read_lock_error)?;
        Ok(rows.values().find(|skill| skill.name() == name).cloned())
    }
}
