//! The element sum type.

use serde::{Deserialize, Serialize};

use super::{Edge, Entity, Properties};

/// An entity or an edge.
///
/// Decoding a record yields an `Element`; which variant comes back is
/// determined by the row key's shape, not by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    /// A vertex.
    Entity(Entity),
    /// A relationship.
    Edge(Edge),
}

impl Element {
    /// The schema group this element belongs to.
    #[inline]
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Self::Entity(entity) => &entity.group,
            Self::Edge(edge) => &edge.group,
        }
    }

    /// The element's properties.
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &Properties {
        match self {
            Self::Entity(entity) => &entity.properties,
            Self::Edge(edge) => &edge.properties,
        }
    }

    /// Mutable access to the element's properties.
    #[inline]
    pub fn properties_mut(&mut self) -> &mut Properties {
        match self {
            Self::Entity(entity) => &mut entity.properties,
            Self::Edge(edge) => &mut edge.properties,
        }
    }

    /// The entity, if this element is one.
    #[inline]
    #[must_use]
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Edge(_) => None,
        }
    }

    /// The edge, if this element is one.
    #[inline]
    #[must_use]
    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Self::Edge(edge) => Some(edge),
            Self::Entity(_) => None,
        }
    }
}

impl From<Entity> for Element {
    #[inline]
    fn from(entity: Entity) -> Self {
        Self::Entity(entity)
    }
}

impl From<Edge> for Element {
    #[inline]
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_accessors_dispatch_to_the_variant() {
        let mut element = Element::from(Entity::new("person", "alice"));
        assert_eq!(element.group(), "person");
        assert!(element.as_entity().is_some());
        assert!(element.as_edge().is_none());

        element.properties_mut().insert("age".to_owned(), 30i64.into());
        assert_eq!(element.properties().len(), 1);
    }
}
