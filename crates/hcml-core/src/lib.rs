//! HCML to C++ transpiler
//!
//! ```
//! use hcml_core::Session;
//!
//! let mut session = Session::new();
//! session.set_print_method("resp.write");
//! session.parse(b"Hello <cxx:var name=\"user\"></cxx:var>").unwrap();
//! assert_eq!(session.output_str(), "resp.write(\"Hello \", 6);user");
//! ```

// Core modules
pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod session;
pub mod tree;

// Re-export commonly used types
pub use codegen::{CxxGenerator, Emitter, Generator, OutputBuffer};
pub use config::{Config, SessionConfig};
pub use error::{
    ErrorCode, HcmlError, ParseError, ParseErrorKind, Result, SyntaxError, SyntaxErrorKind,
};
pub use parser::parse;
pub use session::Session;
pub use tree::{NodeId, Tree};
