use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HcmlError {
    // Session errors
    #[error("INVALID_SESSION: {0}")]
    InvalidSession(String),

    #[error("MISSING_PRINT_METHOD: print method must be set before parsing")]
    MissingPrintMethod,

    // Source errors
    #[error("SOURCE_READ_ERROR: cannot read '{path}': {reason}")]
    SourceRead { path: PathBuf, reason: String },

    // Output errors
    #[error("BUFFER_ALLOC_FAILED: cannot grow output buffer to {requested} bytes")]
    BufferAllocation { requested: usize },

    // Scan and generation errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    // Config errors
    #[error("CONFIG_INVALID: {0}")]
    ConfigInvalid(String),
}

impl HcmlError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HcmlError::InvalidSession(_) => ErrorCode::InvalidSession,
            HcmlError::MissingPrintMethod => ErrorCode::MissingPrintMethod,
            HcmlError::SourceRead { .. } => ErrorCode::SourceRead,
            HcmlError::BufferAllocation { .. } => ErrorCode::BufferAllocation,
            HcmlError::Parse(_) => ErrorCode::Parse,
            HcmlError::Syntax(_) => ErrorCode::Syntax,
            HcmlError::ConfigInvalid(_) => ErrorCode::ConfigInvalid,
        }
    }
}

/// Numeric status reported by a session.
///
/// Values are stable and match the codes used by existing HCML tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidSession = -1,
    Ok = 0,
    SourceRead = 1,
    BufferAllocation = 6,
    MissingPrintMethod = 7,
    Parse = 8,
    Syntax = 9,
    ConfigInvalid = 10,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Scan failure with the source line it was detected on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("PARSE_ERROR: {kind}, line: {line}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based line number
    pub line: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self { kind, line }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input inside tag")]
    UnexpectedEof,

    #[error("missing end tag of {tag}")]
    MissingEndTag { tag: String },

    #[error("inline tag not supported: {tag}")]
    InlineTag { tag: String },

    #[error("invalid property on {tag}")]
    InvalidProperty { tag: String },

    #[error("missing \" after {key}= on {tag}")]
    MissingQuote { tag: String, key: String },

    #[error("unterminated value of property {key} on {tag}")]
    UnterminatedValue { tag: String, key: String },

    #[error("malformed tree around {tag}")]
    MalformedTree { tag: String },

    #[error("nesting under {tag} exceeds {limit} levels")]
    TooDeep { tag: String, limit: usize },

    #[error("too many nodes for one tree")]
    TooManyNodes,
}

/// Generation failure for a single construct
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("SYNTAX_ERROR: {construct}: {kind}")]
pub struct SyntaxError {
    /// Tag name the error was raised for
    pub construct: String,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub fn new(construct: impl Into<String>, kind: SyntaxErrorKind) -> Self {
        Self {
            construct: construct.into(),
            kind,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("requires at least {expected} child node(s), found {found}")]
    MissingChildren { expected: usize, found: usize },

    #[error("requires exactly {expected} child nodes, found {found}")]
    ChildCount { expected: usize, found: usize },

    #[error("missing required property '{0}'")]
    MissingProperty(&'static str),

    #[error("expects a raw text child")]
    RawTextExpected,

    #[error("unknown tag and no extension generator registered")]
    UnknownTag,

    #[error("cannot be used outside a parent tag")]
    NoOwner,

    #[error("empty wrapper {open}{close}")]
    EmptyWrapper {
        open: &'static str,
        close: &'static str,
    },

    #[error("first child must be {expected}")]
    FirstChildMustBe { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, HcmlError>;
