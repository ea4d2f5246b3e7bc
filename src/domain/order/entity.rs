//! Order entity and identifier

use serde::{Deserialize, Serialize};

use crate::domain::freelancer::FreelancerId;

/// Order identifier, assigned by the store on first save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Sentinel for an entity the store has not numbered yet
    pub const UNASSIGNED: OrderId = OrderId(0);

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

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A work item owned by exactly one freelancer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    description: String,
    price: f64,
    freelancer_id: FreelancerId,
}

impl Order {
    /// Creates an order owned by the given freelancer
    pub fn new(description: impl Into<String>, price: f64, freelancer_id: FreelancerId) -> Self {
        Self {
            id: OrderId::UNASSIGNED,
            description: description.into(),
            price,
            freelancer_id,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// The owning freelancer
    pub fn freelancer_id(&self) -> FreelancerId {
        self.freelancer_id
    }

    pub(crate) fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }
}
