//! Application layer: services that build trees from external sources
//!
//! This layer reads documents and directories and hands them to the domain layer.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
