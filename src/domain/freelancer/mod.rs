//! Freelancer domain module
//!
//! Freelancers are the primary directory entity. Each one exclusively owns
//! an ordered history of orders and shares a duplicate-free set of skills
//! with other freelancers.

mod entity;
mod repository;

pub use entity::{Freelancer, FreelancerId};
pub use repository::FreelancerRepository;
