//! Skill repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{Skill, SkillId};
use crate::domain::DomainError;

/// Store contract for skills
///
/// Skill names are unique; `find_by_name` is the lookup callers use to
/// reuse an existing row instead of creating a duplicate.
#[async_trait]
pub trait SkillRepository: Send + Sync + Debug {
    /// Saves a skill, assigning an id on first save
    async fn save(&self, skill: Skill) -> Result<Skill, DomainError>;

    async fn find_by_id(&self, id: SkillId) -> Result<Option<Skill>, DomainError>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>, DomainError>;
}
