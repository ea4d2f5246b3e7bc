//! Freelancer Directory
//!
//! A directory of freelancers with cached, filtered listings:
//! - Filtered queries (by category and/or skill) through a read-through
//!   query cache in front of the store
//! - Relationship-consistency rules for order and skill mutations
//! - Pluggable store behind repository traits, with an in-memory backend
//!   for embedding, development and tests

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use infrastructure::{
    DirectoryService, InMemoryFreelancerRepository, InMemoryOrderRepository,
    InMemorySkillRepository, QueryCache,
};

/// Directory service wired over the in-memory store backend
pub type InMemoryDirectoryService = DirectoryService<
    InMemoryFreelancerRepository,
    InMemoryOrderRepository,
    InMemorySkillRepository,
>;

/// Builds a directory service backed by the in-memory store
pub fn in_memory_directory(config: &AppConfig) -> InMemoryDirectoryService {
    DirectoryService::new(
        Arc::new(InMemoryFreelancerRepository::new()),
        Arc::new(InMemoryOrderRepository::new()),
        Arc::new(InMemorySkillRepository::new()),
        Arc::new(QueryCache::with_capacity(config.cache.max_capacity)),
    )
}
