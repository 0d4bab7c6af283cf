//! Close-marker matching and one-level owner recovery

use super::helpers::{dump, parse_err};
use super::*;

#[test]
fn test_owner_close_pops_one_level() {
    let source = "<cxx:block><cxx:line>1</cxx:line>2</cxx:block>";
    assert_eq!(
        dump(source),
        "tag block\n  tag line\n    text \"1\"\n  text \"2\"\n"
    );
}

#[test]
fn test_unmatched_close_marker_is_literal_text() {
    let source = "<cxx:line>a</cxx:other>b</cxx:line>";
    assert_eq!(dump(source), "tag line\n  text \"a</cxx:other>b\"\n");
}

#[test]
fn test_close_marker_without_open_tag_is_text() {
    assert_eq!(dump("</cxx:x>"), "text \"</cxx:x>\"\n");
}

#[test]
fn test_close_marker_needs_exact_name() {
    let source = "<cxx:line>a</cxx:lines></cxx:line>";
    assert_eq!(dump(source), "tag line\n  text \"a</cxx:lines>\"\n");
}

#[test]
fn test_grandparent_close_is_not_recovered() {
    let source = "<cxx:a><cxx:b><cxx:c>1</cxx:c>\n</cxx:a>";
    let err = parse_err(source);

    assert_eq!(
        err.kind,
        ParseErrorKind::MissingEndTag {
            tag: "b".to_string()
        }
    );
    assert_eq!(err.line, 2);
}

#[test]
fn test_truncated_close_marker_reports_open_tag() {
    let err = parse_err("<cxx:line>1</cxx:li");
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingEndTag {
            tag: "line".to_string()
        }
    );
}

#[test]
fn test_owner_marker_inside_open_tag_is_literal_text() {
    let source = "<cxx:a><cxx:b>x</cxx:a></cxx:b></cxx:a>";
    assert_eq!(
        dump(source),
        "tag a\n  tag b\n    text \"x</cxx:a>\"\n"
    );
}
