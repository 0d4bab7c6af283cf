//! Tests for the HCML scanner/parser

use super::*;

mod helpers;

mod attributes;
mod close_markers;
