//! Text rendering of a [`Tree`].

use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, NodeId, Tree};

/// Glyphs used to draw a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// First line of every rendering
    pub start: &'static str,
    /// Continuation bar for an ancestor that still has siblings to come
    pub link: &'static str,
    /// Edge of a node followed by a sibling
    pub mid: &'static str,
    /// Edge of the last node in its sibling group
    pub end: &'static str,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        start: ".",
        link: "│",
        mid: "├──",
        end: "└──",
    };

    pub const ASCII: Glyphs = Glyphs {
        start: ".",
        link: "|",
        mid: "|--",
        end: "`--",
    };
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::UNICODE
    }
}

/// Renders a tree into its line-oriented diagram.
///
/// Each line is indented by one column per ancestor: the link glyph while the
/// ancestor's sibling group is still open, blanks once its last sibling has
/// been printed. Rendering never fails and never mutates the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    glyphs: Glyphs,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyphs(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, tree: &Tree) -> String {
        let mut out = String::new();
        out.push_str(self.glyphs.start);
        out.push('\n');

        let mut level_ended = Vec::new();
        self.render_children(tree, tree.root(), &mut level_ended, &mut out);

        debug!(nodes = tree.len(), bytes = out.len(), "rendered tree");
        out
    }

    /// `level_ended[d]` tells whether the sibling group open at depth `d` has
    /// already printed its last member.
    fn render_children(&self, tree: &Tree, parent: NodeId, level_ended: &mut Vec<bool>, out: &mut String) {
        let children = tree.children(parent);
        for (i, &child) in children.iter().enumerate() {
            let Some(node) = tree.get(child) else {
                continue;
            };
            let is_last = i + 1 == children.len();
            self.write_line(out, level_ended, is_last, &node.data);

            if !node.children.is_empty() {
                level_ended.push(is_last);
                self.render_children(tree, child, level_ended, out);
                level_ended.pop();
            }
        }
    }

    fn write_line(&self, out: &mut String, level_ended: &[bool], is_last: bool, data: &NodeData) {
        for &ended in level_ended {
            if ended {
                out.push_str("    ");
            } else {
                out.push_str(self.glyphs.link);
                out.push_str("   ");
            }
        }
        out.push_str(if is_last { self.glyphs.end } else { self.glyphs.mid });
        out.push(' ');
        out.push_str(&data.to_string());
        out.push('\n');
    }
}
