//! Freelancer entity and identifier

use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderId};
use crate::domain::skill::{Skill, SkillId};

/// Freelancer identifier, assigned by the store on first save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreelancerId(i64);

impl FreelancerId {
    /// Sentinel for an entity the store has not numbered yet
    pub const UNASSIGNED: FreelancerId = FreelancerId(0);

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

impl std::fmt::Display for FreelancerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A freelancer listed in the directory
///
/// The order history is an ordered sequence of orders this freelancer
/// exclusively owns. The skill collection has set semantics: no skill
/// appears twice, enforced by [`Freelancer::add_skill`]. Both collections
/// are mutated only through the entity methods below so the invariants hold
/// everywhere a freelancer travels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freelancer {
    id: FreelancerId,
    name: String,
    category: String,
    rating: f64,
    hourly_rate: f64,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    skills: Vec<Skill>,
}

impl Freelancer {
    /// Creates a freelancer with empty order and skill collections
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        rating: f64,
        hourly_rate: f64,
    ) -> Self {
        Self {
            id: FreelancerId::UNASSIGNED,
            name: name.into(),
            category: category.into(),
            rating,
            hourly_rate,
            orders: Vec::new(),
            skills: Vec::new(),
        }
    }

    pub fn id(&self) -> FreelancerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    /// Order history, oldest first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Associated skills, duplicate-free by id
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    pub fn set_hourly_rate(&mut self, hourly_rate: f64) {
        self.hourly_rate = hourly_rate;
    }

    /// True when the skill is already associated
    pub fn has_skill(&self, id: SkillId) -> bool {
        self.skills.iter().any(|skill| skill.id() == id)
    }

    /// Adds a skill association, false when it is already a member
    pub fn add_skill(&mut self, skill: Skill) -> bool {
        if self.has_skill(skill.id()) {
            return false;
        }

        self.skills.push(skill);
        true
    }

    /// Drops a skill association, false when it was not a member
    pub fn remove_skill(&mut self, id: SkillId) -> bool {
        let before = self.skills.len();
        self.skills.retain(|skill| skill.id() != id);
        self.skills.len() != before
    }

    /// Appends an order to the history
    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Removes an order from the history, false when it was not present
    pub fn remove_order(&mut self, id: OrderId) -> bool {
        let before = self.orders.len();
        self.orders.retain(|order| order.id() != id);
        self.orders.len() != before
    }

    pub(crate) fn assign_id(&mut self, id: FreelancerId) {
        self.id = id;
    }
}
