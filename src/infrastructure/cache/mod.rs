//! Cache infrastructure

mod query_cache;

pub use query_cache::{FilterKey, QueryCache};
