//! Shared helpers for parser tests

use super::*;

/// Parse with the default prefix and render the tree listing
pub(super) fn dump(source: &str) -> String {
    match parse(source.as_bytes(), "cxx") {
        Ok(tree) => tree.dump(),
        Err(err) => panic!("unexpected parse error: {err}"),
    }
}

/// Parse with the default prefix, expecting a failure
pub(super) fn parse_err(source: &str) -> ParseError {
    match parse(source.as_bytes(), "cxx") {
        Ok(tree) => panic!("expected parse error, got tree:\n{}", tree.dump()),
        Err(err) => err,
    }
}
