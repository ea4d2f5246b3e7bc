//! Order domain module
//!
//! Orders are work items exclusively owned by a single freelancer. The
//! back-reference to the owner exists to validate operations, not to share
//! lifecycle.

mod entity;
mod repository;

pub use entity::{Order, OrderId};
pub use repository::OrderRepository;
