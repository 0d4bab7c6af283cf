//! Shared helpers for code generation tests

use super::*;

pub(super) const PRINT_METHOD: &str = "resp.write";

/// Parse with the `cxx` prefix and generate with the given generators
pub(super) fn compile_with(
    source: &str,
    primary: &dyn Generator,
    extension: Option<&dyn Generator>,
) -> Result<String, HcmlError> {
    let tree = crate::parser::parse(source.as_bytes(), "cxx")?;
    let mut out = OutputBuffer::new();
    generate(&tree, &mut out, PRINT_METHOD, primary, extension)?;
    Ok(String::from_utf8_lossy(out.as_bytes()).into_owned())
}

pub(super) fn compile(source: &str) -> Result<String, HcmlError> {
    compile_with(source, &CxxGenerator, None)
}

/// Generated code for input expected to succeed
pub(super) fn output(source: &str) -> String {
    match compile(source) {
        Ok(code) => code,
        Err(err) => panic!("unexpected error for {source:?}: {err}"),
    }
}

/// Syntax error for input expected to fail during generation
pub(super) fn syntax_err(source: &str) -> SyntaxError {
    match compile(source) {
        Err(HcmlError::Syntax(err)) => err,
        other => panic!("expected syntax error for {source:?}, got {other:?}"),
    }
}
