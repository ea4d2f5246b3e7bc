//! Infrastructure layer - store backends, cache and service orchestration

pub mod cache;
pub mod directory;
pub mod logging;
pub mod storage;

pub use cache::QueryCache;
pub use directory::{CreateFreelancerRequest, DirectoryService, UpdateFreelancerRequest};
pub use logging::init_logging;
pub use storage::{
    InMemoryFreelancerRepository, InMemoryOrderRepository, InMemorySkillRepository,
};
