//! Code generation from a parsed tag tree
//!
//! The [`Emitter`] owns the walk: it visits a node and its sibling chain,
//! hands every node to the primary [`Generator`], then appends the `eol`
//! terminator and the caller's separator. Generators call back into the
//! emitter for children, so the recursion depth follows the tree depth while
//! sibling chains are walked in a loop.
//!
//! ## Generators
//!
//! - primary: handles every node, [`CxxGenerator`] by default
//! - extension: optional fallback the primary delegates unknown tags to

mod buffer;
mod cxx;
mod escape;

pub use buffer::{OutputBuffer, INITIAL_CAPACITY};
pub use cxx::CxxGenerator;
pub use escape::escape;

use log::trace;

use crate::error::{HcmlError, SyntaxError, SyntaxErrorKind};
use crate::tree::{NodeId, Tree};

/// Separator appended after each argument of a call-like construct
const ARG_SEPARATOR: &str = ", ";

/// Emits target code for a single node.
///
/// Implementations write through the [`Emitter`] and recurse into children
/// with [`Emitter::generate`]; they never walk a node's siblings themselves.
pub trait Generator: Send + Sync {
    fn emit(&self, em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError>;
}

/// Generation context for one tree
pub struct Emitter<'a, 'src> {
    tree: &'a Tree<'src>,
    out: &'a mut OutputBuffer,
    print_method: &'a str,
    primary: &'a dyn Generator,
    extension: Option<&'a dyn Generator>,
}

impl<'a, 'src> Emitter<'a, 'src> {
    pub fn new(
        tree: &'a Tree<'src>,
        out: &'a mut OutputBuffer,
        print_method: &'a str,
        primary: &'a dyn Generator,
        extension: Option<&'a dyn Generator>,
    ) -> Self {
        Self {
            tree,
            out,
            print_method,
            primary,
            extension,
        }
    }

    pub fn tree(&self) -> &'a Tree<'src> {
        self.tree
    }

    pub fn print_method(&self) -> &'a str {
        self.print_method
    }

    /// Generate `node` and every sibling after it.
    ///
    /// `suffix` is appended after each node (after its `eol` terminator).
    pub fn generate(&mut self, node: NodeId, suffix: Option<&str>) -> Result<(), HcmlError> {
        let mut next = Some(node);
        while let Some(id) = next {
            self.generate_one(id, suffix)?;
            next = self.tree.next_sibling(id);
        }
        Ok(())
    }

    /// Generate `node` alone, ignoring its siblings
    pub fn generate_one(&mut self, node: NodeId, suffix: Option<&str>) -> Result<(), HcmlError> {
        let primary = self.primary;
        primary.emit(self, node)?;
        if self.tree.has_prop(node, "eol") {
            self.push_str(";")?;
        }
        if let Some(suffix) = suffix {
            self.push_str(suffix)?;
        }
        Ok(())
    }

    /// Generate a comma separated argument list starting at `first`
    pub fn generate_args(&mut self, first: Option<NodeId>) -> Result<(), HcmlError> {
        let Some(first) = first else {
            return Ok(());
        };
        self.generate(first, Some(ARG_SEPARATOR))?;
        let len = self.out.len().saturating_sub(ARG_SEPARATOR.len());
        self.out.truncate(len);
        Ok(())
    }

    /// Hand a tag the primary generator does not know to the extension
    pub fn extend(&mut self, node: NodeId) -> Result<(), HcmlError> {
        match self.extension {
            Some(extension) => {
                trace!("delegating {} to extension", self.tree.display_name(node));
                extension.emit(self, node)
            }
            None => Err(SyntaxError::new(
                self.tree.display_name(node),
                SyntaxErrorKind::UnknownTag,
            )
            .into()),
        }
    }

    /// `PRINTMETHOD("<escaped text>", <len>);` for a text node
    pub fn emit_text(&mut self, node: NodeId) -> Result<(), HcmlError> {
        let Some(text) = self.tree.text(node) else {
            return Err(SyntaxError::new(
                self.tree.display_name(node),
                SyntaxErrorKind::RawTextExpected,
            )
            .into());
        };
        self.push_str(self.print_method)?;
        self.push_str("(\"")?;
        self.push_escaped(text)?;
        self.push_str(&format!("\", {});", text.len()))
    }

    pub fn push_str(&mut self, s: &str) -> Result<(), HcmlError> {
        self.out.push_str(s)
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), HcmlError> {
        self.out.push(bytes)
    }

    /// Append `bytes` escaped for a string literal
    pub fn push_escaped(&mut self, bytes: &[u8]) -> Result<(), HcmlError> {
        escape::escape_with(bytes, |piece| self.out.push(piece))
    }
}

/// Generate the whole forest rooted at `tree.root()` into `out`
pub fn generate(
    tree: &Tree<'_>,
    out: &mut OutputBuffer,
    print_method: &str,
    primary: &dyn Generator,
    extension: Option<&dyn Generator>,
) -> Result<(), HcmlError> {
    let Some(root) = tree.root() else {
        return Ok(());
    };
    Emitter::new(tree, out, print_method, primary, extension).generate(root, None)
}

#[cfg(test)]
mod tests;
