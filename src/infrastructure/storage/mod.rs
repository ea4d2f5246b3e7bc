//! Storage infrastructure - store backends

mod in_memory;

pub use in_memory::{
    InMemoryFreelancerRepository, InMemoryOrderRepository, InMemorySkillRepository,
};
