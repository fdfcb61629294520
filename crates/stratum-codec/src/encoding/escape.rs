//! Byte escaping for delimited row keys.
//!
//! Edge row keys concatenate variable-length segments separated by a
//! reserved delimiter byte. Vertex serialization may produce any byte
//! value, so segment bytes are escaped before concatenation:
//!
//! - `0x00` (the delimiter) becomes `0x01 0x01`
//! - `0x01` (the escape byte) becomes `0x01 0x02`
//!
//! The escaped form therefore never contains `0x00`, and the substitution
//! preserves lexicographic order, so the store's key order still mirrors
//! vertex order. Any `0x00` seen in a row is a real delimiter and rows can
//! be split with a plain byte scan.

use crate::error::CodecError;

/// The reserved byte separating row-key segments.
pub const DELIMITER: u8 = 0x00;
/// The byte that introduces an escape pair inside a segment.
pub const ESCAPE: u8 = 0x01;

/// Second byte of the pair that encodes an escaped delimiter.
const ESCAPED_DELIMITER: u8 = 0x01;
/// Second byte of the pair that encodes an escaped escape byte.
const ESCAPED_ESCAPE: u8 = 0x02;

/// Escape `bytes` so the result contains no delimiter.
#[must_use]
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 2);
    for &byte in bytes {
        match byte {
            DELIMITER => {
                out.push(ESCAPE);
                out.push(ESCAPED_DELIMITER);
            }
            ESCAPE => {
                out.push(ESCAPE);
                out.push(ESCAPED_ESCAPE);
            }
            other => out.push(other),
        }
    }
    out
}

/// Invert [`escape`].
///
/// # Errors
///
/// Returns [`CodecError::CorruptRecord`] if the input ends in the middle of
/// an escape pair, contains an invalid pair, or contains a raw delimiter.
pub fn unescape(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().enumerate();
    while let Some((pos, &byte)) = iter.next() {
        match byte {
            ESCAPE => match iter.next() {
                Some((_, &ESCAPED_DELIMITER)) => out.push(DELIMITER),
                Some((_, &ESCAPED_ESCAPE)) => out.push(ESCAPE),
                Some((pos, &other)) => {
                    return Err(CodecError::corrupt(format!(
                        "invalid escape pair 0x01 {other:#04x} at offset {pos}"
                    )));
                }
                None => {
                    return Err(CodecError::corrupt(format!(
                        "dangling escape byte at offset {pos}"
                    )));
                }
            },
            DELIMITER => {
                return Err(CodecError::corrupt(format!(
                    "unescaped delimiter at offset {pos}"
                )));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Split a row on delimiter bytes, returning the still-escaped segments.
///
/// Escaped content never contains the delimiter, so every occurrence is a
/// segment boundary. An input with no delimiter yields one segment.
#[must_use]
pub fn split(row: &[u8]) -> Vec<&[u8]> {
    row.split(|&byte| byte == DELIMITER).collect()
}

/// Split a row on delimiter bytes and unescape every segment.
///
/// # Errors
///
/// Returns [`CodecError::CorruptRecord`] if any segment fails to unescape.
pub fn split_unescaped(row: &[u8]) -> Result<Vec<Vec<u8>>, CodecError> {
    split(row).into_iter().map(unescape).collect()
}
