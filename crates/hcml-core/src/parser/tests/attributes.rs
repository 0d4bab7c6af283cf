//! Attribute parsing

use super::helpers::{dump, parse_err};
use super::*;

#[test]
fn test_quoted_bare_and_escaped_values() {
    let source = r#"<cxx:var type="int" name="a\"b" addr>x</cxx:var>"#;
    let tree = parse(source.as_bytes(), "cxx").unwrap();
    let var = tree.root().unwrap();

    assert_eq!(tree.prop(var, "type"), Some(&b"int"[..]));
    assert_eq!(tree.prop(var, "name"), Some(&br#"a\"b"#[..]));
    assert_eq!(tree.prop(var, "addr"), Some(&b"true"[..]));
    assert_eq!(
        tree.dump(),
        "tag var type=\"int\" name=\"a\\\"b\" addr\n  text \"x\"\n"
    );
}

#[test]
fn test_bare_property_before_close_bracket() {
    let source = "<cxx:invoke ptr>x</cxx:invoke>";
    assert_eq!(dump(source), "tag invoke ptr\n  text \"x\"\n");
}

#[test]
fn test_properties_keep_declaration_order_and_duplicates() {
    let source = r#"<cxx:call name="f" name="g">x</cxx:call>"#;
    let tree = parse(source.as_bytes(), "cxx").unwrap();
    let call = tree.root().unwrap();

    assert_eq!(tree.tag(call).unwrap().props.len(), 2);
    assert_eq!(tree.prop(call, "name"), Some(&b"f"[..]));
}

#[test]
fn test_value_spanning_lines_advances_line_count() {
    let source = "<cxx:code note=\"a\nb\">x";
    let err = parse_err(&format!("{source}</cxx:cod"));
    assert_eq!(err.line, 2);
}

#[test]
fn test_attributes_over_several_lines_count_lines() {
    let err = parse_err("<cxx:call\n name=\"f\"\n>");
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingEndTag {
            tag: "call".to_string()
        }
    );
    assert_eq!(err.line, 3);
}
