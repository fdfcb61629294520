//! The frozen schema the codec reads its layout decisions from.
//!
//! A [`Schema`] maps group names to [`ElementDefinition`]s and carries the
//! vertex serializer plus the optional visibility and timestamp property
//! names. It is built once with [`SchemaBuilder`], validated, and then
//! shared immutably (typically as an `Arc<Schema>`); nothing in the codec
//! mutates it afterwards.
//!
//! Loading schemas from external documents and validating cross-group
//! consistency is the schema loader's job and lives outside this crate.
//!
//! # Example
//!
//! ```
//! use stratum_codec::schema::{
//!     ElementDefinition, OrderedLongSerializer, Schema, StringSerializer, TypeDefinition,
//! };
//!
//! let schema = Schema::builder()
//!     .vertex_serializer(StringSerializer)
//!     .group(
//!         "person",
//!         ElementDefinition::new()
//!             .with_property("age", TypeDefinition::new(OrderedLongSerializer)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert!(schema.element("person").is_some());
//! assert!(schema.element("robot").is_none());
//! ```

mod definition;
mod serializer;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CodecError;

pub use definition::{ElementDefinition, TypeDefinition};
pub use serializer::{
    BooleanSerializer, ByteSerializer, BytesSerializer, OrderedIntegerSerializer,
    OrderedLongSerializer, RawDoubleSerializer, RawIntegerSerializer, StringSerializer,
};

/// The immutable schema configuration shared by every codec component.
#[derive(Debug, Clone)]
pub struct Schema {
    elements: HashMap<String, ElementDefinition>,
    vertex_serializer: Arc<dyn ByteSerializer>,
    visibility_property: Option<String>,
    timestamp_property: Option<String>,
}

impl Schema {
    /// Start building a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The definition for a group, if declared.
    #[inline]
    #[must_use]
    pub fn element(&self, group: &str) -> Option<&ElementDefinition> {
        self.elements.get(group)
    }

    /// All declared group names.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// The serializer for vertex identities.
    #[inline]
    #[must_use]
    pub fn vertex_serializer(&self) -> &dyn ByteSerializer {
        self.vertex_serializer.as_ref()
    }

    /// The property stored in the visibility slot, if configured.
    #[inline]
    #[must_use]
    pub fn visibility_property(&self) -> Option<&str> {
        self.visibility_property.as_deref()
    }

    /// The property stored in the timestamp slot, if configured.
    #[inline]
    #[must_use]
    pub fn timestamp_property(&self) -> Option<&str> {
        self.timestamp_property.as_deref()
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    elements: HashMap<String, ElementDefinition>,
    vertex_serializer: Option<Arc<dyn ByteSerializer>>,
    visibility_property: Option<String>,
    timestamp_property: Option<String>,
}

impl SchemaBuilder {
    /// Set the vertex serializer. It must preserve natural order, because
    /// the store's key order mirrors vertex order.
    #[must_use]
    pub fn vertex_serializer(mut self, serializer: impl ByteSerializer + 'static) -> Self {
        self.vertex_serializer = Some(Arc::new(serializer));
        self
    }

    /// Name the property whose value goes into the visibility slot.
    #[must_use]
    pub fn visibility_property(mut self, name: impl Into<String>) -> Self {
        self.visibility_property = Some(name.into());
        self
    }

    /// Name the property whose value goes into the timestamp slot.
    #[must_use]
    pub fn timestamp_property(mut self, name: impl Into<String>) -> Self {
        self.timestamp_property = Some(name.into());
        self
    }

    /// Declare a group.
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, definition: ElementDefinition) -> Self {
        self.elements.insert(name.into(), definition);
        self
    }

    /// Validate and freeze the schema.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSchema`] if no vertex serializer is set,
    /// the vertex serializer is not order-preserving, a group name is empty
    /// or contains a NUL byte, or a group lists an undeclared property in
    /// its group-by subset.
    pub fn build(self) -> Result<Schema, CodecError> {
        let vertex_serializer = self
            .vertex_serializer
            .ok_or_else(|| CodecError::InvalidSchema("no vertex serializer set".to_owned()))?;
        if !vertex_serializer.preserves_order() {
            return Err(CodecError::InvalidSchema(
                "vertex serializer must preserve byte order".to_owned(),
            ));
        }

        for (group, definition) in &self.elements {
            if group.is_empty() {
                return Err(CodecError::InvalidSchema("empty group name".to_owned()));
            }
            if group.bytes().any(|b| b == 0) {
                return Err(CodecError::InvalidSchema(format!(
                    "group name {group:?} contains a NUL byte"
                )));
            }
            for name in definition.group_by() {
                if !definition.contains_property(name) {
                    return Err(CodecError::InvalidSchema(format!(
                        "group `{group}` lists undeclared property `{name}` in group-by"
                    )));
                }
            }
        }

        Ok(Schema {
            elements: self.elements,
            vertex_serializer,
            visibility_property: self.visibility_property,
            timestamp_property: self.timestamp_property,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_a_vertex_serializer() {
        let err = Schema::builder().build().unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema(_)));
    }

    #[test]
    fn build_rejects_unordered_vertex_serializer() {
        let err = Schema::builder().vertex_serializer(RawDoubleSerializer).build().unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema(_)));
    }

    #[test]
    fn build_rejects_undeclared_group_by() {
        let err = Schema::builder()
            .vertex_serializer(StringSerializer)
            .group("friend", ElementDefinition::new().with_group_by(["since"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema(_)));
    }

    #[test]
    fn build_rejects_bad_group_names() {
        for name in ["", "bad\0name"] {
            let err = Schema::builder()
                .vertex_serializer(StringSerializer)
                .group(name, ElementDefinition::new())
                .build()
                .unwrap_err();
            assert!(matches!(err, CodecError::InvalidSchema(_)), "accepted {name:?}");
        }
    }

    #[test]
    fn built_schema_exposes_configuration() {
        let schema = Schema::builder()
            .vertex_serializer(StringSerializer)
            .visibility_property("vis")
            .timestamp_property("ts")
            .group(
                "person",
                ElementDefinition::new()
                    .with_property("age", TypeDefinition::new(OrderedLongSerializer)),
            )
            .build()
            .unwrap();

        assert_eq!(schema.visibility_property(), Some("vis"));
        assert_eq!(schema.timestamp_property(), Some("ts"));
        assert!(schema.vertex_serializer().preserves_order());
        assert_eq!(schema.groups().collect::<Vec<_>>(), ["person"]);
    }
}
