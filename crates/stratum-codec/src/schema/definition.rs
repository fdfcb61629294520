//! Per-group element definitions.

use std::collections::HashMap;
use std::sync::Arc;

use super::serializer::ByteSerializer;

/// The type of a single property: at present, how it is serialized.
///
/// A type definition with no bound serializer is legal; the codec writes an
/// empty frame for such a property and reports it on the warning channel.
#[derive(Debug, Clone, Default)]
pub struct TypeDefinition {
    serializer: Option<Arc<dyn ByteSerializer>>,
}

impl TypeDefinition {
    /// A type definition bound to the given serializer.
    #[must_use]
    pub fn new(serializer: impl ByteSerializer + 'static) -> Self {
        Self { serializer: Some(Arc::new(serializer)) }
    }

    /// A type definition sharing an already-constructed serializer.
    #[must_use]
    pub fn from_shared(serializer: Arc<dyn ByteSerializer>) -> Self {
        Self { serializer: Some(serializer) }
    }

    /// A type definition with no serializer bound.
    #[must_use]
    pub fn unserialized() -> Self {
        Self { serializer: None }
    }

    /// The bound serializer, if any.
    #[inline]
    #[must_use]
    pub fn serializer(&self) -> Option<&Arc<dyn ByteSerializer>> {
        self.serializer.as_ref()
    }
}

/// The property layout of one group.
///
/// `properties` is the declared order and drives every serialization walk;
/// `group_by` is the ordered subset placed in the column qualifier. Both are
/// fixed once the schema is built.
#[derive(Debug, Clone, Default)]
pub struct ElementDefinition {
    properties: Vec<String>,
    group_by: Vec<String>,
    types: HashMap<String, TypeDefinition>,
}

impl ElementDefinition {
    /// Create an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property with its type. Declaration order is serialization
    /// order.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, type_def: TypeDefinition) -> Self {
        let name = name.into();
        if !self.properties.contains(&name) {
            self.properties.push(name.clone());
        }
        self.types.insert(name, type_def);
        self
    }

    /// Set the ordered group-by subset.
    #[must_use]
    pub fn with_group_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = names.into_iter().map(Into::into).collect();
        self
    }

    /// All declared property names, in declaration order.
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// The ordered group-by property names.
    #[inline]
    #[must_use]
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// Whether `name` is a declared property of this group.
    #[inline]
    #[must_use]
    pub fn contains_property(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Whether `name` is one of the group-by properties.
    #[inline]
    #[must_use]
    pub fn is_group_by(&self, name: &str) -> bool {
        self.group_by.iter().any(|g| g == name)
    }

    /// The type definition for a property, if declared.
    #[inline]
    #[must_use]
    pub fn type_def(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// The serializer bound to a property, if the property is declared and
    /// has one.
    #[inline]
    #[must_use]
    pub fn serializer(&self, name: &str) -> Option<&Arc<dyn ByteSerializer>> {
        self.types.get(name).and_then(TypeDefinition::serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::serializer::{OrderedLongSerializer, StringSerializer};

    #[test]
    fn declaration_order_is_preserved() {
        let def = ElementDefinition::new()
            .with_property("b", TypeDefinition::new(StringSerializer))
            .with_property("a", TypeDefinition::new(OrderedLongSerializer))
            .with_property("c", TypeDefinition::unserialized());

        assert_eq!(def.properties(), ["b", "a", "c"]);
        assert!(def.contains_property("a"));
        assert!(!def.contains_property("z"));
        assert!(def.serializer("b").is_some());
        assert!(def.serializer("c").is_none());
        assert!(def.serializer("z").is_none());
    }

    #[test]
    fn redeclaring_a_property_keeps_its_position() {
        let def = ElementDefinition::new()
            .with_property("a", TypeDefinition::unserialized())
            .with_property("b", TypeDefinition::unserialized())
            .with_property("a", TypeDefinition::new(StringSerializer));

        assert_eq!(def.properties(), ["a", "b"]);
        assert!(def.serializer("a").is_some());
    }

    #[test]
    fn group_by_membership() {
        let def = ElementDefinition::new()
            .with_property("a", TypeDefinition::unserialized())
            .with_property("b", TypeDefinition::unserialized())
            .with_group_by(["a"]);

        assert!(def.is_group_by("a"));
        assert!(!def.is_group_by("b"));
        assert_eq!(def.group_by(), ["a"]);
    }
}
