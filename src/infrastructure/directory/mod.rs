//! Directory orchestration

mod service;

pub use service::{CreateFreelancerRequest, DirectoryService, UpdateFreelancerRequest};
