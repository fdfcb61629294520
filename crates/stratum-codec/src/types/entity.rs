//! Vertex elements.
//!
//! An [`Entity`] is a vertex in the graph: a group, an opaque vertex
//! identity, and a property map. The vertex identity is any [`Value`] the
//! schema's vertex serializer can handle.
//!
//! # Example
//!
//! ```
//! use stratum_codec::{Entity, Value};
//!
//! let person = Entity::new("person", "alice")
//!     .with_property("age", 30i64);
//!
//! assert_eq!(person.group, "person");
//! assert_eq!(person.get_property("age"), Some(&Value::Int(30)));
//! ```

use serde::{Deserialize, Serialize};

use super::{Properties, Value};

/// A vertex in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The schema group this entity belongs to.
    pub group: String,
    /// The vertex identity.
    pub vertex: Value,
    /// Properties stored on this entity.
    pub properties: Properties,
}

impl Entity {
    /// Create a new entity with no properties.
    #[must_use]
    pub fn new(group: impl Into<String>, vertex: impl Into<Value>) -> Self {
        Self { group: group.into(), vertex: vertex.into(), properties: Properties::new() }
    }

    /// Add a property to this entity.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Get a property value by name.
    #[inline]
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Set a property value.
    #[inline]
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_creation() {
        let entity = Entity::new("person", "alice").with_property("age", 30i64);

        assert_eq!(entity.group, "person");
        assert_eq!(entity.vertex, Value::String("alice".to_owned()));
        assert_eq!(entity.get_property("age"), Some(&Value::Int(30)));
        assert_eq!(entity.get_property("missing"), None);
    }
}
