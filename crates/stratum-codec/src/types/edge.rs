//! Edge elements.
//!
//! An [`Edge`] connects a source vertex to a destination vertex. Edges may
//! be directed or undirected; either way the codec emits records keyed by
//! both endpoints so range scans from either side find the edge.
//!
//! # Example
//!
//! ```
//! use stratum_codec::{Edge, Value};
//!
//! let friendship = Edge::new("friend", "alice", "bob", false)
//!     .with_property("since", 2016i64);
//!
//! assert!(!friendship.directed);
//! assert_eq!(friendship.get_property("since"), Some(&Value::Int(2016)));
//! ```

use serde::{Deserialize, Serialize};

use super::{Properties, Value};

/// A relationship between two vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The schema group this edge belongs to.
    pub group: String,
    /// The source vertex identity.
    pub source: Value,
    /// The destination vertex identity.
    pub destination: Value,
    /// Whether the relationship is directed from source to destination.
    pub directed: bool,
    /// Properties stored on this edge.
    pub properties: Properties,
}

impl Edge {
    /// Create a new edge with no properties.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        source: impl Into<Value>,
        destination: impl Into<Value>,
        directed: bool,
    ) -> Self {
        Self {
            group: group.into(),
            source: source.into(),
            destination: destination.into(),
            directed,
            properties: Properties::new(),
        }
    }

    /// Add a property to this edge.
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
    fn edge_creation() {
        let edge = Edge::new("friend", "alice", "bob", true).with_property("weight", 0.5f64);

        assert_eq!(edge.group, "friend");
        assert_eq!(edge.source, Value::String("alice".to_owned()));
        assert_eq!(edge.destination, Value::String("bob".to_owned()));
        assert!(edge.directed);
        assert_eq!(edge.get_property("weight"), Some(&Value::Float(0.5)));
    }
}
