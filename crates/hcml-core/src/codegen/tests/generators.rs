//! Primary and extension generator seams

use super::helpers::compile_with;
use super::*;

/// Handles `<cxx:comment>` and `<cxx:ret>`, leaving everything else unknown
struct CommentExtension;

impl Generator for CommentExtension {
    fn emit(&self, em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
        let tree = em.tree();
        match tree.tag_name(node) {
            Some(b"comment") => {
                em.push_str("/* ")?;
                if let Some(text) = tree.first_child(node).and_then(|c| tree.text(c)) {
                    em.push_bytes(text)?;
                }
                em.push_str(" */")
            }
            Some(b"ret") => {
                em.push_str("return ")?;
                if let Some(first) = tree.first_child(node) {
                    em.generate(first, None)?;
                }
                em.push_str(";")
            }
            _ => Err(SyntaxError::new(tree.display_name(node), SyntaxErrorKind::UnknownTag).into()),
        }
    }
}

/// Emits text verbatim and defers tags to the built-in catalog
struct VerbatimText;

impl Generator for VerbatimText {
    fn emit(&self, em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
        match em.tree().text(node) {
            Some(text) => em.push_bytes(text),
            None => CxxGenerator.emit(em, node),
        }
    }
}

#[test]
fn test_extension_handles_unknown_tag() {
    let code = compile_with(
        "<cxx:comment>note</cxx:comment>",
        &CxxGenerator,
        Some(&CommentExtension),
    )
    .unwrap();
    assert_eq!(code, "/* note */");
}

#[test]
fn test_extension_can_recurse_into_builtins() {
    let source = concat!(
        "<cxx:ret><cxx:plus>",
        r#"<cxx:var name="a"></cxx:var><cxx:const>1</cxx:const>"#,
        "</cxx:plus></cxx:ret>"
    );
    let code = compile_with(source, &CxxGenerator, Some(&CommentExtension)).unwrap();
    assert_eq!(code, "return a + 1;");
}

#[test]
fn test_extension_is_not_consulted_for_builtins() {
    let code = compile_with(
        r#"<cxx:call name="f"></cxx:call>"#,
        &CxxGenerator,
        Some(&CommentExtension),
    )
    .unwrap();
    assert_eq!(code, "f()");
}

#[test]
fn test_extension_errors_propagate() {
    let err = compile_with(
        "<cxx:mystery></cxx:mystery>",
        &CxxGenerator,
        Some(&CommentExtension),
    )
    .unwrap_err();
    assert_eq!(
        err,
        HcmlError::Syntax(SyntaxError::new("mystery", SyntaxErrorKind::UnknownTag))
    );
}

#[test]
fn test_custom_primary_replaces_text_emission() {
    let code = compile_with(
        r#"a <cxx:var name="x"></cxx:var>"#,
        &VerbatimText,
        None,
    )
    .unwrap();
    assert_eq!(code, "a x");
}

#[test]
fn test_custom_primary_is_used_for_nested_nodes() {
    let code = compile_with("<cxx:block>raw</cxx:block>", &VerbatimText, None).unwrap();
    assert_eq!(code, "{\nraw\n}");
}
