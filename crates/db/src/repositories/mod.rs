//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and the owning user id as a
//! mandatory parameter.

pub mod draft_repo;
pub mod idea_repo;
pub mod project_repo;

pub use draft_repo::DraftRepo;
pub use idea_repo::IdeaRepo;
pub use project_repo::ProjectRepo;
