//! Scanner/parser turning HCML source bytes into a [`Tree`]
//!
//! Single forward pass over the buffer. Literal bytes accumulate into text
//! runs; `<prefix:name ...>` opens a tag and `</prefix:name>` closes one.
//! Anything else starting with `<` (unrelated markup) is kept as text.
//!
//! ## Close markers
//!
//! A close marker is matched against the current open tag, or, when the
//! current tag is already ended, against its immediate owner. While the current
//! tag is open, any other marker is literal text. Deeper ancestors are never
//! recovered: once the current tag has ended, a marker naming one of them
//! reports the owner as missing its end tag.

mod attrs;

use log::{debug, trace};

use crate::error::{ParseError, ParseErrorKind};
use crate::tree::{is_space, NodeId, Placement, Span, Tree};

/// Hard ceiling on tag nesting.
///
/// Generation recurses once per nesting level; at this depth the walk fits a
/// 2 MiB thread stack in unoptimized builds.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Default limit on tag nesting
pub const DEFAULT_MAX_DEPTH: usize = MAX_DEPTH_LIMIT;

/// Parse `source` with tags namespaced by `prefix`
pub fn parse<'src>(source: &'src [u8], prefix: &str) -> Result<Tree<'src>, ParseError> {
    Parser::new(source, prefix, DEFAULT_MAX_DEPTH).parse()
}

pub struct Parser<'src, 'p> {
    src: &'src [u8],
    prefix: &'p [u8],
    /// Current byte position
    pos: usize,
    /// Start of the pending text run
    text_start: usize,
    /// Current line number (for error messages)
    line: usize,
    tree: Tree<'src>,
    /// Last node attached through an opening tag or a pop
    current: Option<NodeId>,
    /// Nesting level of `current`
    depth: usize,
    max_depth: usize,
}

/// Outcome of inspecting `</`
enum CloseMarker {
    /// A tag was closed and scanning resumed after the marker
    Closed,
    /// Not a close marker for any candidate, treat `<` as text
    Literal,
}

impl<'src, 'p> Parser<'src, 'p> {
    /// `max_depth` is capped at [`MAX_DEPTH_LIMIT`]
    pub fn new(src: &'src [u8], prefix: &'p str, max_depth: usize) -> Self {
        Self {
            src,
            prefix: prefix.as_bytes(),
            pos: 0,
            text_start: 0,
            line: 1,
            tree: Tree::new(src),
            current: None,
            depth: 0,
            max_depth: max_depth.min(MAX_DEPTH_LIMIT),
        }
    }

    pub fn parse(mut self) -> Result<Tree<'src>, ParseError> {
        loop {
            self.scan_text_run();

            if self.at_eof() {
                self.finish()?;
                break;
            }

            if self.peek(1) == Some(b'/') {
                match self.close_marker()? {
                    CloseMarker::Closed => continue,
                    CloseMarker::Literal => {
                        self.pos += 1;
                        continue;
                    }
                }
            }

            if self.at_open_tag() {
                self.open_tag()?;
            } else {
                self.pos += 1;
            }
        }

        debug!(
            "parsed {} nodes over {} lines",
            self.tree.len(),
            self.line
        );
        Ok(self.tree)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn remaining(&self) -> usize {
        self.src.len().saturating_sub(self.pos)
    }

    fn name_of(&self, id: NodeId) -> String {
        self.tree.display_name(id)
    }

    /// Advance to the next `<` or end of input
    fn scan_text_run(&mut self) {
        while let Some(&byte) = self.src.get(self.pos) {
            if byte == b'<' {
                break;
            }
            if byte == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.src.get(self.pos) {
            if !is_space(byte) {
                break;
            }
            if byte == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    /// Flush pending text and make it the current node
    fn flush_text_as_current(&mut self) -> Result<(), ParseError> {
        if self.text_start < self.pos {
            let text = self
                .tree
                .push_text(Span::new(self.text_start, self.pos))
                .map_err(|kind| self.error(kind))?;
            self.attach_as_current(text)?;
        }
        Ok(())
    }

    /// Flush pending text after `current` without moving the cursor.
    ///
    /// Used right before a close marker: the text becomes the last child of
    /// the tag being closed, or the last sibling before the pop.
    fn flush_text_before_close(&mut self) -> Result<(), ParseError> {
        if self.text_start < self.pos {
            let text = self
                .tree
                .push_text(Span::new(self.text_start, self.pos))
                .map_err(|kind| self.error(kind))?;
            self.tree
                .attach(self.current, text)
                .map_err(|kind| self.error(kind))?;
        }
        Ok(())
    }

    fn attach_as_current(&mut self, id: NodeId) -> Result<(), ParseError> {
        let placement = self
            .tree
            .attach(self.current, id)
            .map_err(|kind| self.error(kind))?;
        if placement == Placement::Child {
            self.depth += 1;
            if self.depth > self.max_depth {
                let tag = self.current.map(|c| self.name_of(c)).unwrap_or_default();
                return Err(self.error(ParseErrorKind::TooDeep {
                    tag,
                    limit: self.max_depth,
                }));
            }
        }
        self.current = Some(id);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        if let Some(current) = self.current {
            if self.text_start == self.pos
                && self.tree.is_open_tag(current)
                && self.tree.first_child(current).is_none()
            {
                return Err(self.error(ParseErrorKind::MissingEndTag {
                    tag: self.name_of(current),
                }));
            }
        }
        self.flush_text_as_current()
    }

    /// `<prefix:` with room for at least one name byte
    fn at_open_tag(&self) -> bool {
        let plen = self.prefix.len();
        self.remaining() >= plen + 3
            && &self.src[self.pos + 1..self.pos + 1 + plen] == self.prefix
            && self.src[self.pos + 1 + plen] == b':'
    }

    /// Inspect `</` at the cursor
    fn close_marker(&mut self) -> Result<CloseMarker, ParseError> {
        let plen = self.prefix.len();
        let after_slash = self.pos + 2;
        let has_prefix = self.src.len() > after_slash + plen
            && &self.src[after_slash..after_slash + plen] == self.prefix
            && self.src[after_slash + plen] == b':';
        if !has_prefix {
            return Ok(CloseMarker::Literal);
        }
        let name_start = after_slash + plen + 1;

        let Some(current) = self.current else {
            return Ok(CloseMarker::Literal);
        };

        if self.tree.is_open_tag(current) {
            if self.close_matches(current, name_start)? {
                self.flush_text_before_close()?;
                self.tree.mark_ended(current);
                trace!("closed {} at line {}", self.name_of(current), self.line);
                self.skip_close_marker(current, name_start);
                return Ok(CloseMarker::Closed);
            }
            return Ok(CloseMarker::Literal);
        }

        let Some(owner) = self.tree.owner(current) else {
            return Ok(CloseMarker::Literal);
        };
        if !self.tree.is_open_tag(owner) {
            return Ok(CloseMarker::Literal);
        }
        if self.close_matches(owner, name_start)? {
            self.flush_text_before_close()?;
            self.current = Some(owner);
            self.depth = self.depth.saturating_sub(1);
            self.tree.mark_ended(owner);
            trace!("closed {} at line {}", self.name_of(owner), self.line);
            self.skip_close_marker(owner, name_start);
            return Ok(CloseMarker::Closed);
        }
        self.reject_deep_close(owner, self.tree.owner(owner), name_start)?;
        Ok(CloseMarker::Literal)
    }

    /// Whether `name>` at `name_start` closes `tag`.
    ///
    /// Running out of input before a full marker could fit means `tag` can no
    /// longer be closed.
    fn close_matches(&self, tag: NodeId, name_start: usize) -> Result<bool, ParseError> {
        let name = self.tree.tag_name(tag).unwrap_or_default();
        let end = name_start + name.len();
        if end >= self.src.len() {
            return Err(self.error(ParseErrorKind::MissingEndTag {
                tag: self.name_of(tag),
            }));
        }
        Ok(&self.src[name_start..end] == name && self.src[end] == b'>')
    }

    /// A close marker naming an open ancestor above `candidate` is an error
    /// for `candidate`, since only one level of recovery is supported.
    fn reject_deep_close(
        &self,
        candidate: NodeId,
        mut ancestor: Option<NodeId>,
        name_start: usize,
    ) -> Result<(), ParseError> {
        while let Some(id) = ancestor {
            if self.tree.is_open_tag(id) {
                let name = self.tree.tag_name(id).unwrap_or_default();
                let end = name_start + name.len();
                if end < self.src.len()
                    && &self.src[name_start..end] == name
                    && self.src[end] == b'>'
                {
                    return Err(self.error(ParseErrorKind::MissingEndTag {
                        tag: self.name_of(candidate),
                    }));
                }
            }
            ancestor = self.tree.owner(id);
        }
        Ok(())
    }

    fn skip_close_marker(&mut self, tag: NodeId, name_start: usize) {
        let name_len = self.tree.tag_name(tag).map_or(0, <[u8]>::len);
        self.pos = name_start + name_len + 1;
        self.skip_whitespace();
        self.text_start = self.pos;
    }

    /// Parse `<prefix:name attrs...>` at the cursor
    fn open_tag(&mut self) -> Result<(), ParseError> {
        self.flush_text_as_current()?;

        self.pos += 1 + self.prefix.len() + 1;
        let name_start = self.pos;
        while let Some(&byte) = self.src.get(self.pos) {
            if is_space(byte) || byte == b'>' || byte == b'/' {
                break;
            }
            self.pos += 1;
        }
        if self.at_eof() {
            return Err(self.error(ParseErrorKind::UnexpectedEof));
        }

        let tag = self
            .tree
            .push_tag(Span::new(name_start, self.pos))
            .map_err(|kind| self.error(kind))?;
        self.attach_as_current(tag)?;
        trace!("opened {} at line {}", self.name_of(tag), self.line);

        self.parse_attributes(tag)?;

        // Cursor is on '>'
        self.pos += 1;
        self.skip_whitespace();
        self.text_start = self.pos;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
