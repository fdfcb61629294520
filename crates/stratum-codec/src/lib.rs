//! Stratum codec
//!
//! This crate is the element ↔ key/value codec at the heart of the Stratum
//! graph store: it turns schema-conforming entities and edges into sorted,
//! byte-comparable records for an ordered table store, and turns records
//! back into elements. The backing store itself (tables, iterators,
//! compactions) lives elsewhere and only sees opaque byte slots.
//!
//! # Overview
//!
//! - **Entities** encode to a single record keyed by their escaped vertex
//!   bytes, so entity rows sort in vertex order.
//! - **Edges** encode to a record keyed by the source and a second record
//!   keyed by the destination, so range scans from either endpoint find
//!   them. Self-loops produce only the first record. A flag byte at the end
//!   of the row preserves direction and orientation.
//! - **Properties** are placed into one of four slots — column qualifier,
//!   visibility, timestamp, or value — as dictated by the [`Schema`], and
//!   framed with compact length prefixes so slots decode without a
//!   record-level length.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stratum_codec::encoding::{ByteOrderedLayout, ElementCodec};
//! use stratum_codec::schema::{
//!     ElementDefinition, OrderedLongSerializer, Schema, StringSerializer, TypeDefinition,
//! };
//! use stratum_codec::{Edge, Element};
//!
//! let schema = Schema::builder()
//!     .vertex_serializer(StringSerializer)
//!     .group(
//!         "friend",
//!         ElementDefinition::new()
//!             .with_property("since", TypeDefinition::new(OrderedLongSerializer))
//!             .with_group_by(["since"]),
//!     )
//!     .build()?;
//! let codec = ElementCodec::new(Arc::new(schema), ByteOrderedLayout);
//!
//! let edge = Edge::new("friend", "alice", "bob", true).with_property("since", 2016i64);
//! let (primary, reverse) = codec.encode_edge(&edge)?;
//! assert!(reverse.is_some());
//!
//! let decoded = codec.decode(&primary.key, Some(primary.value.as_slice()))?;
//! assert_eq!(decoded, Element::Edge(edge));
//! # Ok::<(), stratum_codec::CodecError>(())
//! ```
//!
//! # Modules
//!
//! - [`types`] - Elements, values, and the record shape
//! - [`schema`] - The frozen schema, serializer trait, and serializer suite
//! - [`encoding`] - Framing, escaping, row layouts, and [`ElementCodec`]
//! - [`clock`] - The injected time source for record timestamps
//! - [`error`] - Error types ([`CodecError`])

pub mod clock;
pub mod encoding;
pub mod error;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use encoding::{ByteOrderedLayout, EdgeFlag, ElementCodec, HashPrefixedLayout, RowKeyLayout};
pub use error::{CodecError, SerializationError};
pub use schema::{ByteSerializer, ElementDefinition, Schema, SchemaBuilder, TypeDefinition};
pub use types::{Edge, Element, Entity, Properties, Record, RecordKey, Value};
