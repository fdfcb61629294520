//! Row-key layout strategies.
//!
//! An entity's row key is its escaped vertex bytes and contains no
//! delimiter. An edge produces up to two records so range scans by either
//! endpoint work: a *primary* row keyed by the source and a *reverse* row
//! keyed by the destination. The final row byte is a flag packing which of
//! the two a record is, together with whether the edge is directed.
//!
//! Two layouts are provided:
//!
//! - [`ByteOrderedLayout`] — `esc(a) ∥ 0x00 ∥ esc(b) ∥ 0x00 ∥ flag`. Edge
//!   rows sort directly by their leading endpoint's bytes, interleaved with
//!   entity rows for the same vertex.
//! - [`HashPrefixedLayout`] — the same, prefixed with an escaped 64-bit
//!   hash of the leading endpoint and a delimiter. Edge rows spread evenly
//!   across the keyspace regardless of vertex skew, at the cost of losing
//!   global vertex order for edges.
//!
//! All encoders and decoders of one deployment must agree on the layout;
//! the codec is handed one at construction.

use crate::error::CodecError;

use super::escape;

/// Flag byte values. Chosen to avoid the delimiter and escape bytes so a
/// flag segment is its own escaped form.
const UNDIRECTED_PRIMARY: u8 = 2;
const UNDIRECTED_REVERSE: u8 = 3;
const DIRECTED_PRIMARY: u8 = 4;
const DIRECTED_REVERSE: u8 = 5;

/// Orientation and directedness of one edge record, stored as the final
/// row-key byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFlag {
    /// Undirected edge, row keyed by the source.
    UndirectedPrimary,
    /// Undirected edge, row keyed by the destination.
    UndirectedReverse,
    /// Directed edge, row keyed by the source.
    DirectedPrimary,
    /// Directed edge, row keyed by the destination.
    DirectedReverse,
}

impl EdgeFlag {
    /// The flag for the record keyed by the source.
    #[must_use]
    pub const fn primary(directed: bool) -> Self {
        if directed {
            Self::DirectedPrimary
        } else {
            Self::UndirectedPrimary
        }
    }

    /// The flag for the record keyed by the destination.
    #[must_use]
    pub const fn reverse(directed: bool) -> Self {
        if directed {
            Self::DirectedReverse
        } else {
            Self::UndirectedReverse
        }
    }

    /// The row-key byte for this flag.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::UndirectedPrimary => UNDIRECTED_PRIMARY,
            Self::UndirectedReverse => UNDIRECTED_REVERSE,
            Self::DirectedPrimary => DIRECTED_PRIMARY,
            Self::DirectedReverse => DIRECTED_REVERSE,
        }
    }

    /// Decode a row-key byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CorruptRecord`] for any other byte value.
    pub fn from_byte(byte: u8) -> Result<Self, CodecError> {
        match byte {
            UNDIRECTED_PRIMARY => Ok(Self::UndirectedPrimary),
            UNDIRECTED_REVERSE => Ok(Self::UndirectedReverse),
            DIRECTED_PRIMARY => Ok(Self::DirectedPrimary),
            DIRECTED_REVERSE => Ok(Self::DirectedReverse),
            other => Err(CodecError::corrupt(format!("invalid edge flag byte {other:#04x}"))),
        }
    }

    /// Whether the edge is directed.
    #[inline]
    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::DirectedPrimary | Self::DirectedReverse)
    }

    /// Whether this record is keyed by the destination.
    #[inline]
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::UndirectedReverse | Self::DirectedReverse)
    }
}

/// A row key split back into its logical parts.
///
/// Byte slices borrow from the input row and are still escaped; the caller
/// unescapes and deserializes the ones it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedRow<'a> {
    /// A one-segment row: an entity keyed by its vertex.
    Entity {
        /// Escaped vertex bytes.
        vertex: &'a [u8],
    },
    /// An edge row.
    Edge {
        /// Escaped bytes of the endpoint the row is keyed by.
        keyed: &'a [u8],
        /// Escaped bytes of the other endpoint.
        other: &'a [u8],
        /// The record's orientation flag.
        flag: EdgeFlag,
    },
}

/// Strategy for composing and parsing edge row keys.
///
/// Implementations receive endpoint bytes already escaped.
pub trait RowKeyLayout: std::fmt::Debug + Send + Sync {
    /// The primary and optional reverse rows for an edge.
    ///
    /// The reverse row is `None` when both escaped endpoints are equal (a
    /// self-loop): the two rows would be identical and one record suffices.
    fn edge_rows(&self, source: &[u8], destination: &[u8], directed: bool)
        -> (Vec<u8>, Option<Vec<u8>>);

    /// The row prefix under which every edge record keyed by `endpoint`
    /// sorts; used by the store to build range scans.
    fn edge_scan_prefix(&self, endpoint: &[u8]) -> Vec<u8>;

    /// Split a row into entity or edge parts.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CorruptRecord`] if the segment count matches
    /// neither an entity nor this layout's edge shape, or the flag segment
    /// is invalid.
    fn parse_row<'a>(&self, row: &'a [u8]) -> Result<ParsedRow<'a>, CodecError>;
}

fn compose_row(prefix: Option<&[u8]>, keyed: &[u8], other: &[u8], flag: EdgeFlag) -> Vec<u8> {
    let prefix_len = prefix.map_or(0, |p| p.len() + 1);
    let mut row = Vec::with_capacity(prefix_len + keyed.len() + other.len() + 3);
    if let Some(prefix) = prefix {
        row.extend_from_slice(prefix);
        row.push(escape::DELIMITER);
    }
    row.extend_from_slice(keyed);
    row.push(escape::DELIMITER);
    row.extend_from_slice(other);
    row.push(escape::DELIMITER);
    row.push(flag.as_byte());
    row
}

fn parse_flag_segment(segment: &[u8]) -> Result<EdgeFlag, CodecError> {
    match segment {
        [byte] => EdgeFlag::from_byte(*byte),
        _ => Err(CodecError::corrupt(format!(
            "edge flag segment has {} bytes, expected 1",
            segment.len()
        ))),
    }
}

/// Edge rows keyed directly by escaped endpoint bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteOrderedLayout;

impl RowKeyLayout for ByteOrderedLayout {
    fn edge_rows(
        &self,
        source: &[u8],
        destination: &[u8],
        directed: bool,
    ) -> (Vec<u8>, Option<Vec<u8>>) {
        let primary = compose_row(None, source, destination, EdgeFlag::primary(directed));
        if source == destination {
            return (primary, None);
        }
        let reverse = compose_row(None, destination, source, EdgeFlag::reverse(directed));
        (primary, Some(reverse))
    }

    fn edge_scan_prefix(&self, endpoint: &[u8]) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(endpoint.len() + 1);
        prefix.extend_from_slice(endpoint);
        prefix.push(escape::DELIMITER);
        prefix
    }

    fn parse_row<'a>(&self, row: &'a [u8]) -> Result<ParsedRow<'a>, CodecError> {
        let segments = escape::split(row);
        match segments.as_slice() {
            &[vertex] => Ok(ParsedRow::Entity { vertex }),
            &[keyed, other, flag] => {
                Ok(ParsedRow::Edge { keyed, other, flag: parse_flag_segment(flag)? })
            }
            _ => Err(CodecError::corrupt(format!(
                "expected 1 or 3 row segments, found {}",
                segments.len()
            ))),
        }
    }
}

/// Edge rows prefixed with a stable hash of the leading endpoint.
///
/// The hash is FNV-1a over the escaped endpoint bytes, written big-endian
/// and escaped so the row still splits cleanly on the delimiter.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashPrefixedLayout;

impl HashPrefixedLayout {
    fn hash_segment(endpoint: &[u8]) -> Vec<u8> {
        escape::escape(&fnv1a64(endpoint).to_be_bytes())
    }
}

impl RowKeyLayout for HashPrefixedLayout {
    fn edge_rows(
        &self,
        source: &[u8],
        destination: &[u8],
        directed: bool,
    ) -> (Vec<u8>, Option<Vec<u8>>) {
        let source_hash = Self::hash_segment(source);
        let primary = compose_row(
            Some(source_hash.as_slice()),
            source,
            destination,
            EdgeFlag::primary(directed),
        );
        if source == destination {
            return (primary, None);
        }
        let destination_hash = Self::hash_segment(destination);
        let reverse = compose_row(
            Some(destination_hash.as_slice()),
            destination,
            source,
            EdgeFlag::reverse(directed),
        );
        (primary, Some(reverse))
    }

    fn edge_scan_prefix(&self, endpoint: &[u8]) -> Vec<u8> {
        let hash = Self::hash_segment(endpoint);
        let mut prefix = Vec::with_capacity(hash.len() + endpoint.len() + 2);
        prefix.extend_from_slice(&hash);
        prefix.push(escape::DELIMITER);
        prefix.extend_from_slice(endpoint);
        prefix.push(escape::DELIMITER);
        prefix
    }

    fn parse_row<'a>(&self, row: &'a [u8]) -> Result<ParsedRow<'a>, CodecError> {
        let segments = escape::split(row);
        match segments.as_slice() {
            &[vertex] => Ok(ParsedRow::Entity { vertex }),
            // The leading hash segment is derived data; drop it.
            &[_hash, keyed, other, flag] => {
                Ok(ParsedRow::Edge { keyed, other, flag: parse_flag_segment(flag)? })
            }
            _ => Err(CodecError::corrupt(format!(
                "expected 1 or 4 row segments, found {}",
                segments.len()
            ))),
        }
    }
}

/// FNV-1a 64-bit hash.
#[inline]
#[must_use]
fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
