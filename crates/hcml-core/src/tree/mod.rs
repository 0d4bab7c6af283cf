//! Tag tree produced by the parser and consumed by code generation
//!
//! Nodes live in an arena owned by [`Tree`] and are addressed by [`NodeId`].
//! Every span points into the source buffer the tree borrows, so the tree
//! never copies text.
//!
//! ## Links
//!
//! - `first_child` / `next_sibling`: the ordered child list of a tag
//! - `owner`: the tag whose child list a node belongs to (`None` at top level)

mod dump;
mod span;

pub use span::Span;
pub(crate) use span::is_space;

use crate::error::ParseErrorKind;

/// Opaque arena index of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id for the node stored at `index`, `None` past the `u32` id space
    pub(crate) fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index).ok().map(NodeId)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropValue {
    /// Attribute written without `=`, reads as `true`.
    Bare,
    /// Raw bytes between the quotes. Escape sequences are kept verbatim.
    Quoted(Span),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub key: Span,
    pub value: PropValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagData {
    /// Name after `prefix:`
    pub name: Span,
    /// Declaration order, duplicates allowed
    pub props: Vec<Property>,
    pub ended: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Text(Span),
    Tag(TagData),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub owner: Option<NodeId>,
}

/// Where [`Tree::attach`] placed a node relative to the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Root,
    Child,
    Sibling,
}

const TRUE_VALUE: &[u8] = b"true";

/// Arena of tag and text nodes borrowing its source buffer.
#[derive(Debug)]
pub struct Tree<'src> {
    source: &'src [u8],
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl<'src> Tree<'src> {
    pub(crate) fn new(source: &'src [u8]) -> Self {
        Self {
            source,
            nodes: Vec::new(),
            root: None,
        }
    }

    /// First top-level node, `None` for empty input
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn resolve(&self, span: Span) -> &'src [u8] {
        &self.source[span.start..span.end]
    }

    pub fn is_tag(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Tag(_))
    }

    pub fn tag(&self, id: NodeId) -> Option<&TagData> {
        match &self.node(id).kind {
            NodeKind::Tag(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&'src [u8]> {
        self.tag(id).map(|tag| self.resolve(tag.name))
    }

    /// Tag name for messages; lossy for non-UTF-8 names.
    pub fn display_name(&self, id: NodeId) -> String {
        self.tag_name(id)
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .unwrap_or_default()
    }

    pub fn text(&self, id: NodeId) -> Option<&'src [u8]> {
        match self.node(id).kind {
            NodeKind::Text(span) => Some(self.resolve(span)),
            NodeKind::Tag(_) => None,
        }
    }

    pub fn is_ended(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(|tag| tag.ended)
    }

    /// Open means a tag whose close marker has not been seen yet.
    pub fn is_open_tag(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(|tag| !tag.ended)
    }

    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).owner
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Value of the first property named `key`, in declaration order
    pub fn prop(&self, id: NodeId, key: &str) -> Option<&'src [u8]> {
        let tag = self.tag(id)?;
        tag.props
            .iter()
            .find(|prop| self.resolve(prop.key) == key.as_bytes())
            .map(|prop| match prop.value {
                PropValue::Bare => TRUE_VALUE,
                PropValue::Quoted(span) => self.resolve(span),
            })
    }

    pub fn has_prop(&self, id: NodeId, key: &str) -> bool {
        self.prop(id, key).is_some()
    }

    pub fn children(&self, id: NodeId) -> Siblings<'_, 'src> {
        Siblings {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// `id` followed by every later sibling
    pub fn siblings(&self, id: NodeId) -> Siblings<'_, 'src> {
        Siblings {
            tree: self,
            next: Some(id),
        }
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).nth(index)
    }

    pub(crate) fn push_text(&mut self, span: Span) -> Result<NodeId, ParseErrorKind> {
        self.push(NodeKind::Text(span))
    }

    pub(crate) fn push_tag(&mut self, name: Span) -> Result<NodeId, ParseErrorKind> {
        self.push(NodeKind::Tag(TagData {
            name,
            props: Vec::new(),
            ended: false,
        }))
    }

    fn push(&mut self, kind: NodeKind) -> Result<NodeId, ParseErrorKind> {
        let id = NodeId::from_index(self.nodes.len()).ok_or(ParseErrorKind::TooManyNodes)?;
        self.nodes.push(Node {
            kind,
            first_child: None,
            next_sibling: None,
            owner: None,
        });
        Ok(id)
    }

    /// Link `new` after `current`.
    ///
    /// An open childless tag adopts `new` as its first child; anything else
    /// gets `new` as its next sibling. With no `current`, `new` becomes the root.
    pub(crate) fn attach(
        &mut self,
        current: Option<NodeId>,
        new: NodeId,
    ) -> Result<Placement, ParseErrorKind> {
        let Some(current) = current else {
            self.root = Some(new);
            return Ok(Placement::Root);
        };

        if self.is_open_tag(current) {
            if self.first_child(current).is_some() {
                return Err(ParseErrorKind::MalformedTree {
                    tag: self.display_name(current),
                });
            }
            self.nodes[current.index()].first_child = Some(new);
            self.nodes[new.index()].owner = Some(current);
            return Ok(Placement::Child);
        }

        let owner = self.owner(current);
        self.nodes[current.index()].next_sibling = Some(new);
        self.nodes[new.index()].owner = owner;
        Ok(Placement::Sibling)
    }

    pub(crate) fn push_prop(&mut self, id: NodeId, prop: Property) {
        if let NodeKind::Tag(tag) = &mut self.nodes[id.index()].kind {
            tag.props.push(prop);
        }
    }

    pub(crate) fn mark_ended(&mut self, id: NodeId) {
        if let NodeKind::Tag(tag) = &mut self.nodes[id.index()].kind {
            debug_assert!(!tag.ended, "tag ended twice");
            tag.ended = true;
        }
    }
}

/// Iterator over a sibling chain
pub struct Siblings<'t, 'src> {
    tree: &'t Tree<'src>,
    next: Option<NodeId>,
}

impl Iterator for Siblings<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.next_sibling(id);
        Some(id)
    }
}
