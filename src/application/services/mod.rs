//! Application services
//!
//! Concrete services that turn an external source into a [`Tree`](crate::Tree).

mod directory;
mod document;

pub use directory::DirectoryService;
pub use document::DocumentService;
