//! Human-readable listing of a tag tree

use std::fmt::Write;

use super::{NodeId, NodeKind, PropValue, Tree};

impl Tree<'_> {
    /// Render the whole forest, one node per line, two spaces per level.
    ///
    /// ```text
    /// tag set
    ///   tag var name="x"
    ///   tag const
    ///     text "1"
    /// ```
    ///
    /// Tags whose close marker was never seen are suffixed with `(open)`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        if let Some(root) = self.root() {
            stack.push((root, 0));
        }

        // Siblings are pushed before children so the child is visited first.
        while let Some((id, depth)) = stack.pop() {
            self.dump_line(&mut out, id, depth);
            let node = self.node(id);
            if let Some(sibling) = node.next_sibling {
                stack.push((sibling, depth));
            }
            if let Some(child) = node.first_child {
                stack.push((child, depth + 1));
            }
        }

        out
    }

    fn dump_line(&self, out: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match &self.node(id).kind {
            NodeKind::Text(span) => {
                let text = String::from_utf8_lossy(self.resolve(*span));
                let _ = writeln!(out, "{indent}text {:?}", text);
            }
            NodeKind::Tag(tag) => {
                let _ = write!(out, "{indent}tag {}", self.display_name(id));
                for prop in &tag.props {
                    let key = String::from_utf8_lossy(self.resolve(prop.key));
                    match prop.value {
                        PropValue::Bare => {
                            let _ = write!(out, " {key}");
                        }
                        PropValue::Quoted(span) => {
                            let value = String::from_utf8_lossy(self.resolve(span));
                            let _ = write!(out, " {key}=\"{value}\"");
                        }
                    }
                }
                if !tag.ended {
                    out.push_str(" (open)");
                }
                out.push('\n');
            }
        }
    }
}
