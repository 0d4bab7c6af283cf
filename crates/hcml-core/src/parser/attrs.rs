//! Attribute list of an opening tag

use crate::error::{ParseError, ParseErrorKind};
use crate::tree::{is_space, NodeId, PropValue, Property, Span};

use super::Parser;

impl Parser<'_, '_> {
    /// Parse `key` / `key="value"` pairs up to the closing `>`.
    ///
    /// Leaves the cursor on `>`.
    pub(super) fn parse_attributes(&mut self, tag: NodeId) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            let Some(byte) = self.peek(0) else {
                return Err(self.error(ParseErrorKind::UnexpectedEof));
            };
            match byte {
                b'>' => return Ok(()),
                b'/' => {
                    return Err(self.error(ParseErrorKind::InlineTag {
                        tag: self.name_of(tag),
                    }))
                }
                _ => {}
            }

            let key_start = self.pos;
            while self.peek(0).is_some_and(|b| b.is_ascii_alphabetic()) {
                self.pos += 1;
            }
            let key = Span::new(key_start, self.pos);

            let value = match self.peek(0) {
                None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
                Some(b'=') => {
                    self.pos += 1;
                    PropValue::Quoted(self.quoted_value(tag, key)?)
                }
                Some(b) if is_space(b) || b == b'>' => PropValue::Bare,
                Some(_) => {
                    return Err(self.error(ParseErrorKind::InvalidProperty {
                        tag: self.name_of(tag),
                    }))
                }
            };

            self.tree.push_prop(tag, Property { key, value });
        }
    }

    /// Value after `=`, with the cursor left past the closing quote.
    ///
    /// The span excludes both quotes; `\"` and other escapes stay verbatim.
    fn quoted_value(&mut self, tag: NodeId, key: Span) -> Result<Span, ParseError> {
        if self.peek(0) != Some(b'"') {
            return Err(self.error(ParseErrorKind::MissingQuote {
                tag: self.name_of(tag),
                key: self.key_name(key),
            }));
        }
        self.pos += 1;
        let start = self.pos;

        loop {
            match self.peek(0) {
                None => {
                    return Err(self.error(ParseErrorKind::UnterminatedValue {
                        tag: self.name_of(tag),
                        key: self.key_name(key),
                    }))
                }
                Some(b'"') => break,
                Some(b'\\') => {
                    if self.peek(1) == Some(b'\n') {
                        self.line += 1;
                    }
                    self.pos += 2;
                }
                Some(b) => {
                    if b == b'\n' {
                        self.line += 1;
                    }
                    self.pos += 1;
                }
            }
        }

        let span = Span::new(start, self.pos);
        self.pos += 1;
        Ok(span)
    }

    fn key_name(&self, key: Span) -> String {
        String::from_utf8_lossy(self.tree.resolve(key)).into_owned()
    }
}
