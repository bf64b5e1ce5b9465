//! Directory hierarchy service
//!
//! Walks a directory and mirrors it as a tree: directories become branches,
//! everything else becomes a leaf.

use std::path::Path;

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Tree, DEFAULT_MAX_DEPTH};

/// Service for rendering directory hierarchies.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    max_depth: usize,
    show_hidden: bool,
}

impl Default for DirectoryService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, false)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

impl DirectoryService {
    pub fn new(max_depth: usize, show_hidden: bool) -> Self {
        Self {
            max_depth,
            show_hidden,
        }
    }

    /// Build the tree of everything below `directory_path`, sorted by name.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, directory_path: &Path) -> ApplicationResult<Tree> {
        if !directory_path.exists() {
            return Err(ApplicationError::NotFound(directory_path.to_path_buf()));
        }
        if !directory_path.is_dir() {
            return Err(ApplicationError::NotADirectory(directory_path.to_path_buf()));
        }

        let mut tree = Tree::new();
        // stack[d] is the insertion point for entries at depth d + 1
        let mut stack = vec![tree.root()];

        let walker = WalkDir::new(directory_path)
            .min_depth(1)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.show_hidden || !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::OperationFailed {
                context: format!("walk directory: {}", directory_path.display()),
                source: Box::new(e),
            })?;

            stack.truncate(entry.depth());
            let Some(&parent) = stack.last() else {
                continue;
            };
            let Some(mut cursor) = tree.cursor_at(parent) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                let id = cursor.add_branch(&name).id();
                stack.push(id);
            } else {
                cursor.add_node(&name);
            }
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "directory tree built");
        Ok(tree)
    }
}
