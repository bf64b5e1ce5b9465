//! Compose and print ASCII/Unicode trees.
//!
//! A [`Tree`] is built top-down through `add_*` operations. Leaf operations
//! keep the current position; branch operations return a [`Cursor`] one level
//! deeper. Rendering walks the tree depth-first and draws continuation bars
//! only below ancestors that still have siblings to come.
//!
//! ```
//! use treeprint::Tree;
//!
//! let mut tree = Tree::new();
//! let mut a = tree.add_branch("a");
//! a.add_node("a1").add_node("a2");
//! tree.add_meta_node(42, "Age");
//!
//! print!("{tree}");
//! // .
//! // ├── a
//! // │   ├── a1
//! // │   └── a2
//! // └── [42]  Age
//! ```
//!
//! Record-shaped values implement [`Inspect`] and are converted with
//! [`from_record`], either as a name-only or a value-annotated tree.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    from_record, from_record_with, repr, Cursor, DomainError, Field, Glyphs, Inspect, NodeData, NodeId,
    Renderer, Shape, Tree, TreeMode,
};
