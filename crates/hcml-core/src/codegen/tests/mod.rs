//! Tests for code generation
//!
//! Sources go through the real parser so each test reads as HCML input and
//! the C++ it produces.

use super::*;

mod helpers;

mod expressions;
mod generators;
