//! Skill entity and identifier

use serde::{Deserialize, Serialize};

/// Skill identifier, assigned by the store on first save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(i64);

impl SkillId {
    /// Sentinel for an entity the store has not numbered yet
    pub const UNASSIGNED: SkillId = SkillId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// True once the store has assigned a real id
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A uniquely named capability tag
///
/// Names are unique across the system, matched case-sensitively. Skill rows
/// are never deleted by the directory; removing a freelancer's skill only
/// drops the membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    name: String,
}

impl Skill {
    /// Creates a skill the store has not numbered yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SkillId::UNASSIGNED,
            name: name.into(),
        }
    }

    pub fn id(&self) -> SkillId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn assign_id(&mut self, id: SkillId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_skill_is_unassigned() {
        let skill = Skill::new("illustration");
        assert_eq!(skill.id(), SkillId::UNASSIGNED);
        assert!(!skill.id().is_assigned());
        assert_eq!(skill.name(), "illustration");
    }

    #[test]
    fn test_assign_id() {
        let mut skill = Skill::new("rust");
        skill.assign_id(SkillId::new(3));
        assert!(skill.id().is_assigned());
        assert_eq!(skill.id().as_i64(), 3);
    }
}
