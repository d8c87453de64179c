pub mod content;
pub mod draft;
pub mod idea;
pub mod image;
pub mod ownership;
pub mod project;
