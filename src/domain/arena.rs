//! Arena-based tree model.
//!
//! Nodes live in a generational arena and refer to their parent and children by
//! index. The parent link is navigational only: a node exclusively owns its
//! children through the arena, so the structure stays strictly tree-shaped.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::render::Renderer;

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// Data payload of a tree node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    /// Secondary annotation, rendered in brackets before the value
    pub meta: Option<String>,
    /// Display text, `None` only for the synthetic root
    pub value: Option<String>,
}

impl NodeData {
    fn new(meta: Option<String>, value: impl fmt::Display) -> Self {
        Self {
            meta,
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.as_deref().unwrap_or_default();
        match &self.meta {
            Some(meta) => write!(f, "[{}]  {}", meta, value),
            None => write!(f, "{}", value),
        }
    }
}

/// Tree node in the arena.
#[derive(Debug)]
pub struct TreeNode {
    /// Value and meta of this node
    pub data: NodeData,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Children in insertion (= display) order
    pub children: Vec<NodeId>,
}

/// Append-only tree with a synthetic, empty root.
///
/// Nodes are added through the `add_*` operations, either on the tree itself
/// (acting at the root) or on a [`Cursor`] returned by a branch operation.
///
/// ```
/// use treeprint::Tree;
///
/// let mut tree = Tree::new();
/// tree.add_branch("a").add_node("a1").add_node("a2");
/// tree.add_node("b");
///
/// assert_eq!(
///     tree.render(),
///     ".\n├── a\n│   ├── a1\n│   └── a2\n└── b\n"
/// );
/// ```
#[derive(Debug)]
pub struct Tree {
    arena: Arena<TreeNode>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(TreeNode {
            data: NodeData::default(),
            parent: None,
            children: Vec::new(),
        }));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    #[instrument(level = "trace", skip(self))]
    fn insert_node(&mut self, data: NodeData, parent: NodeId) -> NodeId {
        let node_idx = NodeId(self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        }));
        if let Some(parent) = self.arena.get_mut(parent.0) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    /// Cursor positioned at the root.
    pub fn cursor(&mut self) -> Cursor<'_> {
        let at = self.root;
        Cursor { tree: self, at }
    }

    /// Reopen a cursor on a node handed out earlier, `None` if no such node
    /// exists in this tree.
    ///
    /// Ids are arena slots and carry no tree identity. Every root occupies the
    /// first slot, so the root id of another tree is accepted and resolves to
    /// this tree's root. Only pass ids obtained from this tree.
    pub fn cursor_at(&mut self, id: NodeId) -> Option<Cursor<'_>> {
        if self.arena.contains(id.0) {
            Some(Cursor { tree: self, at: id })
        } else {
            None
        }
    }

    pub fn add_node(&mut self, value: impl fmt::Display) -> &mut Self {
        self.cursor().add_node(value);
        self
    }

    pub fn add_meta_node(&mut self, meta: impl fmt::Display, value: impl fmt::Display) -> &mut Self {
        self.cursor().add_meta_node(meta, value);
        self
    }

    pub fn add_branch(&mut self, value: impl fmt::Display) -> Cursor<'_> {
        let at = self.insert_node(NodeData::new(None, value), self.root);
        Cursor { tree: self, at }
    }

    pub fn add_meta_branch(&mut self, meta: impl fmt::Display, value: impl fmt::Display) -> Cursor<'_> {
        let at = self.insert_node(NodeData::new(Some(meta.to_string()), value), self.root);
        Cursor { tree: self, at }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    /// Number of nodes below the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    /// True while nothing has been added to the root.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Number of levels below the root, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root) - 1
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        1 + self
            .children(node_idx)
            .iter()
            .map(|&child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    /// Pre-order iteration over all nodes below the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Render with the default Unicode glyphs.
    pub fn render(&self) -> String {
        Renderer::default().render(self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Insertion point inside a [`Tree`].
///
/// Leaf operations return the same cursor, branch operations return a new
/// cursor positioned on the freshly added node.
#[derive(Debug)]
pub struct Cursor<'a> {
    tree: &'a mut Tree,
    at: NodeId,
}

impl<'a> Cursor<'a> {
    pub fn id(&self) -> NodeId {
        self.at
    }

    pub fn add_node(&mut self, value: impl fmt::Display) -> &mut Self {
        self.tree.insert_node(NodeData::new(None, value), self.at);
        self
    }

    pub fn add_meta_node(&mut self, meta: impl fmt::Display, value: impl fmt::Display) -> &mut Self {
        self.tree
            .insert_node(NodeData::new(Some(meta.to_string()), value), self.at);
        self
    }

    pub fn add_branch(&mut self, value: impl fmt::Display) -> Cursor<'_> {
        let at = self.tree.insert_node(NodeData::new(None, value), self.at);
        Cursor {
            tree: &mut *self.tree,
            at,
        }
    }

    pub fn add_meta_branch(&mut self, meta: impl fmt::Display, value: impl fmt::Display) -> Cursor<'_> {
        let at = self
            .tree
            .insert_node(NodeData::new(Some(meta.to_string()), value), self.at);
        Cursor {
            tree: &mut *self.tree,
            at,
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a Tree) -> Self {
        // Reverse so the first child is popped first
        let stack = tree.children(tree.root()).iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tree: &Tree) -> Vec<String> {
        tree.iter().map(|(_, node)| node.data.to_string()).collect()
    }

    #[test]
    fn given_new_tree_then_root_is_empty() {
        let tree = Tree::new();
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.data, NodeData::default());
        assert!(root.parent.is_none());
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn given_leaf_add_then_cursor_stays_put() {
        let mut tree = Tree::new();
        let mut branch = tree.add_branch("a");
        let at = branch.id();
        assert_eq!(branch.add_node("a1").add_node("a2").id(), at);

        let root = tree.root();
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.children(at).len(), 2);
    }

    #[test]
    fn given_branch_add_then_new_cursor_nests_below() {
        let mut tree = Tree::new();
        let mut a = tree.add_branch("a");
        let a_id = a.id();
        let mut a1 = a.add_branch("a1");
        let a1_id = a1.id();
        a1.add_node("x");

        assert_ne!(a_id, a1_id);
        assert_eq!(tree.parent(a1_id), Some(a_id));
        assert_eq!(tree.parent(a_id), Some(tree.root()));
        assert_eq!(tree.depth(), 3);
        assert_eq!(values(&tree), vec!["a", "a1", "x"]);
    }

    #[test]
    fn given_meta_nodes_then_data_carries_meta() {
        let mut tree = Tree::new();
        tree.add_meta_node(42, "Age");
        tree.add_meta_branch("dir", "src").add_node("lib.rs");
        assert_eq!(values(&tree), vec!["[42]  Age", "[dir]  src", "lib.rs"]);
    }

    #[test]
    fn given_reopened_cursor_then_appends_to_same_node() {
        let mut tree = Tree::new();
        let a = tree.add_branch("a").id();
        tree.add_node("b");
        tree.cursor_at(a).unwrap().add_node("a1");
        assert_eq!(values(&tree), vec!["a", "a1", "b"]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn given_foreign_id_then_no_cursor() {
        let mut other = Tree::new();
        other.add_node("x");
        let foreign = other.iter().next().unwrap().0;

        let mut tree = Tree::new();
        assert!(tree.cursor_at(foreign).is_none());
    }

    #[test]
    fn given_root_id_of_other_tree_then_resolves_to_own_root() {
        let other = Tree::new();
        let mut tree = Tree::new();

        tree.cursor_at(other.root()).unwrap().add_node("x");

        assert_eq!(tree.render(), ".\n└── x\n");
    }
}
