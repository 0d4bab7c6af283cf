//! String-literal escaping for text nodes

/// Replacement for bytes that cannot appear raw inside a string literal
fn replacement(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'"' => Some(b"\\\""),
        b'\\' => Some(b"\\\\"),
        b'\r' => Some(b"\\r"),
        b'\n' => Some(b"\\n"),
        b'\t' => Some(b"\\t"),
        0x0b => Some(b"\\v"),
        0x0c => Some(b"\\f"),
        _ => None,
    }
}

/// Feed `bytes` to `sink` as escaped pieces.
///
/// Runs of ordinary bytes (spaces included) are passed through in one call.
pub(crate) fn escape_with<E>(
    bytes: &[u8],
    mut sink: impl FnMut(&[u8]) -> Result<(), E>,
) -> Result<(), E> {
    let mut run_start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if let Some(escaped) = replacement(byte) {
            if run_start < i {
                sink(&bytes[run_start..i])?;
            }
            sink(escaped)?;
            run_start = i + 1;
        }
    }
    if run_start < bytes.len() {
        sink(&bytes[run_start..])?;
    }
    Ok(())
}

/// Escape `bytes` for use between double quotes
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let result: Result<(), std::convert::Infallible> = escape_with(bytes, |piece| {
        out.extend_from_slice(piece);
        Ok(())
    });
    match result {
        Ok(()) => out,
        Err(never) => match never {},
    }
}
