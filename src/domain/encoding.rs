//! Byte-to-text decoding for order documents.
//!
//! Encoding is taken from a byte order mark, then from the `encoding` pseudo
//! attribute of the XML declaration, and defaults to UTF-8. Bytes that do not
//! decode cleanly are a malformed document.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};

/// Decode raw document bytes to text.
pub fn decode(bytes: &[u8]) -> DomainResult<String> {
    let (encoding, bom_len) = match Encoding::for_bom(bytes) {
        Some(found) => found,
        None => (declared_encoding(bytes)?, 0),
    };
    debug!("decode: {} ({} bytes)", encoding.name(), bytes.len());

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            DomainError::MalformedDocument(format!("input is not valid {}", encoding.name()))
        })
}

fn declared_encoding(bytes: &[u8]) -> DomainResult<&'static Encoding> {
    let Some(label) = declaration_label(bytes) else {
        return Ok(UTF_8);
    };
    match Encoding::for_label(label) {
        // A declaration readable as ASCII cannot be UTF-16 without a BOM
        Some(enc) if enc == UTF_16LE || enc == UTF_16BE => Ok(UTF_8),
        Some(enc) => Ok(enc),
        None => Err(DomainError::MalformedDocument(format!(
            "unsupported encoding {:?}",
            String::from_utf8_lossy(label)
        ))),
    }
}

/// Value of `encoding="..."` in a leading `<?xml ...?>` declaration.
fn declaration_label(bytes: &[u8]) -> Option<&[u8]> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let decl = &rest[..end];

    let at = decl.windows(8).position(|w| w == b"encoding")?;
    let value = decl[at + 8..].trim_ascii_start().strip_prefix(b"=")?.trim_ascii_start();
    let quote = *value.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &value[1..];
    let close = value.iter().position(|&b| b == quote)?;
    Some(&value[..close])
}
