//! Compilation session: configuration, generators, output and error state
//!
//! A session is reused across compilations. Each [`Session::parse`] call
//! starts from an empty output buffer and a cleared error; on failure the
//! output is discarded so no partial code is ever observable.

use std::borrow::Cow;
use std::path::Path;

use log::debug;

use crate::codegen::{self, CxxGenerator, Generator, OutputBuffer};
use crate::config::{SessionConfig, DEFAULT_TAG_PREFIX};
use crate::error::{ErrorCode, HcmlError};
use crate::parser::{Parser, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use crate::tree::Tree;

pub struct Session {
    print_method: String,
    tag_prefix: String,
    max_depth: usize,
    primary: Box<dyn Generator>,
    extension: Option<Box<dyn Generator>>,
    output: OutputBuffer,
    output_limit: Option<usize>,
    last_error: Option<HcmlError>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("print_method", &self.print_method)
            .field("tag_prefix", &self.tag_prefix)
            .field("max_depth", &self.max_depth)
            .field("has_extension", &self.extension.is_some())
            .field("output_size", &self.output.len())
            .field("output_limit", &self.output_limit)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl Session {
    /// Session with the `cxx` prefix, the built-in catalog and no print method
    pub fn new() -> Self {
        Self {
            print_method: String::new(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            primary: Box::new(CxxGenerator),
            extension: None,
            output: OutputBuffer::new(),
            output_limit: None,
            last_error: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        let mut session = Self::new();
        session.set_print_method(config.print_method.clone());
        session.set_tag_prefix(config.tag_prefix.clone());
        session.set_max_depth(config.max_depth);
        session.set_output_limit(config.max_output);
        session
    }

    pub fn set_print_method(&mut self, method: impl Into<String>) {
        self.print_method = method.into();
    }

    pub fn print_method(&self) -> &str {
        &self.print_method
    }

    pub fn set_tag_prefix(&mut self, prefix: impl Into<String>) {
        self.tag_prefix = prefix.into();
    }

    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    /// Set the nesting limit, capped at [`MAX_DEPTH_LIMIT`]
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Cap the generated output at `limit` bytes; `None` removes the cap.
    ///
    /// Output that would outgrow the cap fails with
    /// [`HcmlError::BufferAllocation`].
    pub fn set_output_limit(&mut self, limit: Option<usize>) {
        self.output = match limit {
            Some(limit) => OutputBuffer::with_max_capacity(limit),
            None => OutputBuffer::new(),
        };
        self.output_limit = limit;
    }

    pub fn output_limit(&self) -> Option<usize> {
        self.output_limit
    }

    /// Replace the generator every node is dispatched to, returning the old one
    pub fn set_primary_generator(&mut self, generator: Box<dyn Generator>) -> Box<dyn Generator> {
        std::mem::replace(&mut self.primary, generator)
    }

    /// Register (or with `None` remove) the fallback for unknown tags,
    /// returning the previous one
    pub fn set_extension_generator(
        &mut self,
        generator: Option<Box<dyn Generator>>,
    ) -> Option<Box<dyn Generator>> {
        std::mem::replace(&mut self.extension, generator)
    }

    /// Transpile `source`, replacing any previous output
    pub fn parse(&mut self, source: &[u8]) -> Result<(), HcmlError> {
        self.output.clear();
        self.last_error = None;

        let result = self.compile(source);
        if let Err(err) = &result {
            debug!("compilation failed: {}", err);
            self.output.clear();
            self.last_error = Some(err.clone());
        }
        result
    }

    /// Read `path` and transpile its contents
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<(), HcmlError> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(source) => self.parse(&source),
            Err(e) => {
                let err = HcmlError::SourceRead {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                };
                self.output.clear();
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Parse without generating, for inspecting the tag tree
    pub fn parse_tree<'s>(&self, source: &'s [u8]) -> Result<Tree<'s>, HcmlError> {
        self.check_prefix()?;
        Ok(Parser::new(source, &self.tag_prefix, self.max_depth).parse()?)
    }

    fn check_prefix(&self) -> Result<(), HcmlError> {
        if self.tag_prefix.is_empty() {
            return Err(HcmlError::InvalidSession(
                "tag prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn compile(&mut self, source: &[u8]) -> Result<(), HcmlError> {
        if self.print_method.is_empty() {
            return Err(HcmlError::MissingPrintMethod);
        }
        self.check_prefix()?;

        let tree = Parser::new(source, &self.tag_prefix, self.max_depth).parse()?;
        codegen::generate(
            &tree,
            &mut self.output,
            &self.print_method,
            self.primary.as_ref(),
            self.extension.as_deref(),
        )?;

        debug!(
            "compiled {} source bytes into {} output bytes",
            source.len(),
            self.output.len()
        );
        Ok(())
    }

    /// Generated code of the last successful [`Session::parse`]
    pub fn output(&self) -> &[u8] {
        self.output.as_bytes()
    }

    pub fn output_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.output.as_bytes())
    }

    pub fn output_size(&self) -> usize {
        self.output.len()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.last_error
            .as_ref()
            .map_or(ErrorCode::Ok, HcmlError::code)
    }

    /// Message of the last error, empty after a success
    pub fn error_message(&self) -> String {
        self.last_error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn last_error(&self) -> Option<&HcmlError> {
        self.last_error.as_ref()
    }
}
