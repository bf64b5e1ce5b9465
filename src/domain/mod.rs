//! Domain layer: tree model, renderer and record adapter
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod record;
pub mod render;
pub mod tag;

pub use arena::{Cursor, NodeData, NodeId, Tree, TreeIterator, TreeNode};
pub use error::{DomainError, DomainResult};
pub use record::{
    from_record, from_record_with, is_empty_value, repr, value_text, Field, Inspect, Shape, TreeMode,
    DEFAULT_MAX_DEPTH,
};
pub use render::{Glyphs, Renderer};
pub use tag::FieldTag;
