//! Freelancer repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{Freelancer, FreelancerId};
use crate::domain::DomainError;

/// Store contract for freelancers
///
/// `find_by_category_and_skill` is the relationship query behind the cached
/// read path: a `None` dimension is unfiltered, a freelancer matches on the
/// skill dimension when any of its skills carries the given name, and each
/// match appears exactly once. Ordering is unspecified; callers sort.
#[async_trait]
pub trait FreelancerRepository: Send + Sync + Debug {
    /// Saves a freelancer, assigning an id on first save
    async fn save(&self, freelancer: Freelancer) -> Result<Freelancer, DomainError>;

    async fn find_by_id(&self, id: FreelancerId) -> Result<Option<Freelancer>, DomainError>;

    /// Deletes by id, true when a row was removed
    async fn delete(&self, id: FreelancerId) -> Result<bool, DomainError>;

    async fn find_all(&self) -> Result<Vec<Freelancer>, DomainError>;

    async fn find_by_category(&self, category: &str) -> Result<Vec<Freelancer>, DomainError>;

    async fn find_by_category_and_skill(
        &self,
        category: Option<&str>,
        skill_name: Option<&str>,
    ) -> Result<Vec<Freelancer>, DomainError>;
}
