//! The element ↔ record codec.
//!
//! [`ElementCodec`] composes the framing, escaping, and property codecs
//! with a frozen [`Schema`] to turn entities and edges into backing-store
//! records and back. Every write and every read of the surrounding store
//! crosses this type.
//!
//! # Slot assignment
//!
//! For a group with definition `def`:
//!
//! | slot             | content                                             |
//! |------------------|-----------------------------------------------------|
//! | column family    | UTF-8 group name                                    |
//! | column qualifier | `def.group_by()` properties, framed in order        |
//! | visibility       | the schema's visibility property, or empty          |
//! | timestamp        | the schema's timestamp property, or the clock       |
//! | value            | every remaining declared property, framed in order  |
//!
//! Each property lands in exactly one slot. The timestamp fallback to the
//! injected [`Clock`] is the only non-determinism in encoding.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stratum_codec::encoding::{ByteOrderedLayout, ElementCodec};
//! use stratum_codec::schema::{ElementDefinition, Schema, StringSerializer};
//! use stratum_codec::{Element, Entity};
//!
//! let schema = Schema::builder()
//!     .vertex_serializer(StringSerializer)
//!     .group("person", ElementDefinition::new())
//!     .build()
//!     .unwrap();
//! let codec = ElementCodec::new(Arc::new(schema), ByteOrderedLayout);
//!
//! let entity = Entity::new("person", "ab");
//! let record = codec.encode_entity(&entity).unwrap();
//! assert_eq!(record.key.row, b"ab");
//!
//! let decoded = codec.decode(&record.key, Some(record.value.as_slice())).unwrap();
//! assert_eq!(decoded, Element::Entity(entity));
//! ```

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::CodecError;
use crate::schema::{ElementDefinition, Schema};
use crate::types::{Edge, Element, Entity, Properties, Record, RecordKey, Value};

use super::layout::{ParsedRow, RowKeyLayout};
use super::{escape, properties};

/// Encoder/decoder between elements and backing-store records.
///
/// Stateless after construction and safe to share across threads.
#[derive(Debug)]
pub struct ElementCodec {
    schema: Arc<Schema>,
    layout: Box<dyn RowKeyLayout>,
    clock: Arc<dyn Clock>,
}

impl ElementCodec {
    /// Create a codec over a frozen schema with the given row-key layout,
    /// stamping records with the system clock.
    #[must_use]
    pub fn new(schema: Arc<Schema>, layout: impl RowKeyLayout + 'static) -> Self {
        Self { schema, layout: Box::new(layout), clock: Arc::new(SystemClock) }
    }

    /// Replace the clock used for records without a timestamp property.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The schema this codec reads its layout decisions from.
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    /// Encode an entity into its single record.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group or a serializer failure.
    pub fn encode_entity(&self, entity: &Entity) -> Result<Record, CodecError> {
        let def = self.definition(&entity.group)?;
        let row = self.entity_row(&entity.vertex)?;
        let key = self.build_key(row, &entity.group, def, &entity.properties)?;
        let value = self.build_value(&entity.group, def, &entity.properties)?;
        Ok(Record { key, value })
    }

    /// Encode an edge into its primary record and, unless the edge is a
    /// self-loop, its reverse record.
    ///
    /// Both records share every slot except the row key.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group or a serializer failure.
    pub fn encode_edge(&self, edge: &Edge) -> Result<(Record, Option<Record>), CodecError> {
        let def = self.definition(&edge.group)?;
        let source = self.escaped_vertex(&edge.source, "source")?;
        let destination = self.escaped_vertex(&edge.destination, "destination")?;
        let (primary_row, reverse_row) =
            self.layout.edge_rows(&source, &destination, edge.directed);

        let key = self.build_key(primary_row, &edge.group, def, &edge.properties)?;
        let value = self.build_value(&edge.group, def, &edge.properties)?;
        let reverse = reverse_row
            .map(|row| Record { key: key.with_row(row), value: value.clone() });
        Ok((Record { key, value }, reverse))
    }

    /// Encode any element.
    ///
    /// Entities produce one record; edges may produce two.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group or a serializer failure.
    pub fn encode(&self, element: &Element) -> Result<(Record, Option<Record>), CodecError> {
        match element {
            Element::Entity(entity) => Ok((self.encode_entity(entity)?, None)),
            Element::Edge(edge) => self.encode_edge(edge),
        }
    }

    // ------------------------------------------------------------------
    // Decoding
    // ------------------------------------------------------------------

    /// Decode a record key alone, without its value slot.
    ///
    /// The element carries the properties recoverable from the key: the
    /// group-by properties, the visibility property, and the timestamp
    /// property where the group declares one.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group, a corrupt row or qualifier, or a
    /// serializer failure.
    pub fn decode_key(&self, key: &RecordKey) -> Result<Element, CodecError> {
        let group = std::str::from_utf8(&key.column_family).map_err(|_| {
            CodecError::corrupt("column family is not valid UTF-8".to_owned())
        })?;
        let def = self.definition(group)?;

        let mut element = match self.layout.parse_row(&key.row)? {
            ParsedRow::Entity { vertex } => {
                Element::Entity(Entity::new(group, self.decode_vertex(vertex)?))
            }
            ParsedRow::Edge { keyed, other, flag } => {
                let keyed = self.decode_vertex(keyed)?;
                let other = self.decode_vertex(other)?;
                let (source, destination) =
                    if flag.is_reverse() { (other, keyed) } else { (keyed, other) };
                Element::Edge(Edge::new(group, source, destination, flag.is_directed()))
            }
        };

        let props = element.properties_mut();
        properties::deserialize_properties(
            group,
            def,
            def.group_by().iter().map(String::as_str),
            &key.column_qualifier,
            props,
        )?;
        self.decode_visibility(def, &key.visibility, props)?;
        self.decode_timestamp(def, key.timestamp, props);
        Ok(element)
    }

    /// Decode a record key and, if supplied, its value slot.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group, corrupt bytes, or a serializer failure.
    pub fn decode(&self, key: &RecordKey, value: Option<&[u8]>) -> Result<Element, CodecError> {
        let mut element = self.decode_key(key)?;
        if let Some(bytes) = value {
            if !bytes.is_empty() {
                let group = element.group().to_owned();
                let def = self.definition(&group)?;
                let names: Vec<&str> = self.value_property_names(def).collect();
                properties::deserialize_properties(
                    &group,
                    def,
                    names,
                    bytes,
                    element.properties_mut(),
                )?;
            }
        }
        Ok(element)
    }

    /// Decode only the group-by properties from a column qualifier.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group, corrupt framing, or a serializer failure.
    pub fn decode_group_by_properties(
        &self,
        group: &str,
        qualifier: &[u8],
    ) -> Result<Properties, CodecError> {
        let def = self.definition(group)?;
        let mut props = Properties::new();
        properties::deserialize_properties(
            group,
            def,
            def.group_by().iter().map(String::as_str),
            qualifier,
            &mut props,
        )?;
        Ok(props)
    }

    /// Decode only the properties stored in a value slot.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group, corrupt framing, or a serializer failure.
    pub fn decode_value_properties(
        &self,
        group: &str,
        value: &[u8],
    ) -> Result<Properties, CodecError> {
        let def = self.definition(group)?;
        let mut props = Properties::new();
        let names: Vec<&str> = self.value_property_names(def).collect();
        properties::deserialize_properties(group, def, names, value, &mut props)?;
        Ok(props)
    }

    /// The qualifier prefix covering the first `count` group-by properties.
    ///
    /// Returns the input slice itself when `count` covers the whole
    /// group-by list, so full projections are free. Used by the store to
    /// trim qualifiers without decoding them.
    ///
    /// # Errors
    ///
    /// Fails on an unknown group, a `count` larger than the group-by list,
    /// or corrupt framing.
    pub fn group_by_prefix<'q>(
        &self,
        group: &str,
        qualifier: &'q [u8],
        count: usize,
    ) -> Result<&'q [u8], CodecError> {
        let def = self.definition(group)?;
        let total = def.group_by().len();
        if count > total {
            return Err(CodecError::Unsupported(format!(
                "cannot project {count} group-by properties, group `{group}` has {total}"
            )));
        }
        if count == total {
            return Ok(qualifier);
        }
        properties::prefix_for_first_k(qualifier, count)
    }

    // ------------------------------------------------------------------
    // Scan support
    // ------------------------------------------------------------------

    /// The row key under which an entity with this vertex is stored.
    ///
    /// Also the scan prefix for that vertex's entity records.
    ///
    /// # Errors
    ///
    /// Fails if the vertex serializer rejects the value.
    pub fn entity_row(&self, vertex: &Value) -> Result<Vec<u8>, CodecError> {
        self.escaped_vertex(vertex, "vertex")
    }

    /// The row prefix under which every edge record keyed by this vertex
    /// sorts.
    ///
    /// # Errors
    ///
    /// Fails if the vertex serializer rejects the value.
    pub fn edge_scan_prefix(&self, vertex: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(self.layout.edge_scan_prefix(&self.escaped_vertex(vertex, "vertex")?))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn definition(&self, group: &str) -> Result<&ElementDefinition, CodecError> {
        self.schema.element(group).ok_or_else(|| CodecError::UnknownGroup(group.to_owned()))
    }

    fn escaped_vertex(&self, vertex: &Value, slot: &str) -> Result<Vec<u8>, CodecError> {
        let raw = self
            .schema
            .vertex_serializer()
            .serialize(vertex)
            .map_err(|source| CodecError::serialization(slot, source))?;
        Ok(escape::escape(&raw))
    }

    fn decode_vertex(&self, escaped: &[u8]) -> Result<Value, CodecError> {
        let raw = escape::unescape(escaped)?;
        self.schema
            .vertex_serializer()
            .deserialize(&raw)
            .map_err(|source| CodecError::serialization("vertex", source))
    }

    fn build_key(
        &self,
        row: Vec<u8>,
        group: &str,
        def: &ElementDefinition,
        props: &Properties,
    ) -> Result<RecordKey, CodecError> {
        let mut column_qualifier = Vec::new();
        properties::serialize_properties(
            group,
            def,
            def.group_by().iter().map(String::as_str),
            props,
            &mut column_qualifier,
        )?;
        Ok(RecordKey {
            row,
            column_family: group.as_bytes().to_vec(),
            column_qualifier,
            visibility: self.build_visibility(def, props)?,
            timestamp: self.build_timestamp(props)?,
        })
    }

    fn build_value(
        &self,
        group: &str,
        def: &ElementDefinition,
        props: &Properties,
    ) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        let names: Vec<&str> = self.value_property_names(def).collect();
        properties::serialize_properties(group, def, names, props, &mut buf)?;
        Ok(buf)
    }

    fn build_visibility(
        &self,
        def: &ElementDefinition,
        props: &Properties,
    ) -> Result<Vec<u8>, CodecError> {
        let Some(name) = self.schema.visibility_property() else {
            return Ok(Vec::new());
        };
        let Some(serializer) = def.serializer(name) else {
            return Ok(Vec::new());
        };
        match props.get(name) {
            Some(value) => {
                serializer.serialize(value).map_err(|source| CodecError::serialization(name, source))
            }
            None => Ok(serializer.serialize_null()),
        }
    }

    fn decode_visibility(
        &self,
        def: &ElementDefinition,
        visibility: &[u8],
        props: &mut Properties,
    ) -> Result<(), CodecError> {
        let Some(name) = self.schema.visibility_property() else {
            return Ok(());
        };
        let Some(serializer) = def.serializer(name) else {
            return Ok(());
        };
        if visibility.is_empty() {
            if let Some(value) = serializer.deserialize_empty() {
                props.insert(name.to_owned(), value);
            }
        } else {
            let value = serializer
                .deserialize(visibility)
                .map_err(|source| CodecError::serialization(name, source))?;
            props.insert(name.to_owned(), value);
        }
        Ok(())
    }

    fn build_timestamp(&self, props: &Properties) -> Result<i64, CodecError> {
        if let Some(name) = self.schema.timestamp_property() {
            match props.get(name) {
                Some(Value::Int(ts)) => return Ok(*ts),
                Some(other) => {
                    return Err(CodecError::Unsupported(format!(
                        "timestamp property `{name}` must be an int, got {}",
                        other.type_name()
                    )));
                }
                None => {}
            }
        }
        Ok(self.clock.now_millis())
    }

    fn decode_timestamp(&self, def: &ElementDefinition, timestamp: i64, props: &mut Properties) {
        if let Some(name) = self.schema.timestamp_property() {
            if def.contains_property(name) {
                props.insert(name.to_owned(), Value::Int(timestamp));
            }
        }
    }

    fn is_stored_in_value(&self, def: &ElementDefinition, name: &str) -> bool {
        !def.is_group_by(name)
            && self.schema.visibility_property() != Some(name)
            && self.schema.timestamp_property() != Some(name)
    }

    fn value_property_names<'a>(
        &'a self,
        def: &'a ElementDefinition,
    ) -> impl Iterator<Item = &'a str> {
        def.properties()
            .iter()
            .map(String::as_str)
            .filter(move |name| self.is_stored_in_value(def, name))
    }
}
