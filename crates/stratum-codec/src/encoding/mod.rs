//! Encoding between elements and sorted key/value records.
//!
//! The components compose leaves-first:
//!
//! - [`varint`] — self-delimiting 1-9 byte length prefixes for framed
//!   values inside composite slots.
//! - [`escape`] — delimiter escaping so arbitrary vertex bytes can live in
//!   delimited row keys without losing lexicographic order.
//! - [`properties`] — ordered property lists as concatenated
//!   `length ∥ bytes` frames, with prefix projection and legal tail
//!   truncation.
//! - [`layout`] — the two row-key strategies and the edge flag byte.
//! - [`ElementCodec`] — the top-level encoder/decoder tying the above to a
//!   frozen [`Schema`](crate::schema::Schema).
//!
//! Everything here is a pure transformation: no I/O, no shared mutable
//! state, records in and elements out (or the reverse).

pub mod escape;
pub mod layout;
pub mod properties;
pub mod varint;

mod element;


pub use element::ElementCodec;
pub use layout::{ByteOrderedLayout, EdgeFlag, HashPrefixedLayout, ParsedRow, RowKeyLayout};
