//! Domain types, validation rules, and prompt construction for Posty.
//!
//! This crate has no I/O. The database, AI, storage, and HTTP crates all
//! build on the types and rules defined here.

pub mod draft;
pub mod error;
pub mod idea;
pub mod project;
pub mod prompts;
pub mod rewrite;
pub mod types;
