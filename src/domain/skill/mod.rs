//! Skill domain module
//!
//! Skills are shared capability tags. A skill row exists once per distinct
//! name and is reused by every freelancer that carries it.

mod entity;
mod repository;

pub use entity::{Skill, SkillId};
pub use repository::SkillRepository;
