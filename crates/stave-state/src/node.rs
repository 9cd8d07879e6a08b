//! The tagged tree value every serialized payload is made of.
//!
//! A `StateNode` carries a type tag, an insertion-ordered list of named
//! properties, and an ordered list of child nodes. Property values are
//! `serde_json::Value`, so strings, integers, floats, and booleans round-trip
//! losslessly; richer value types (colours) are encoded as strings by their
//! owners.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StateError, StateResult};

/// A transport-neutral tree value: tag + ordered properties + ordered children.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateNode {
    tag: String,
    properties: Vec<(String, Value)>,
    children: Vec<StateNode>,
}

impl StateNode {
    /// Create an empty node with the given type tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The node's type tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns `true` if the node's tag equals `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Fail with [`StateError::WrongTag`] unless the node carries `tag`.
    pub fn expect_tag(&self, tag: &str) -> StateResult<()> {
        if self.tag == tag {
            Ok(())
        } else {
            Err(StateError::WrongTag {
                expected: tag.to_string(),
                actual: self.tag.clone(),
            })
        }
    }

    /// Set a named property, replacing in place if the name already exists.
    ///
    /// Insertion order of first appearance is preserved.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.properties.push((name, value)),
        }
    }

    /// Builder-style [`Self::set_property`].
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Decode a string-valued property.
    pub fn string_property(&self, name: &str) -> StateResult<&str> {
        self.property(name)
            .ok_or_else(|| StateError::MissingProperty {
                name: name.to_string(),
            })?
            .as_str()
            .ok_or_else(|| StateError::WrongType {
                name: name.to_string(),
                expected: "string",
            })
    }

    /// Decode an integer-valued property.
    pub fn int_property(&self, name: &str) -> StateResult<i64> {
        self.property(name)
            .ok_or_else(|| StateError::MissingProperty {
                name: name.to_string(),
            })?
            .as_i64()
            .ok_or_else(|| StateError::WrongType {
                name: name.to_string(),
                expected: "integer",
            })
    }

    /// Decode a float-valued property. Integers widen to floats.
    pub fn float_property(&self, name: &str) -> StateResult<f64> {
        self.property(name)
            .ok_or_else(|| StateError::MissingProperty {
                name: name.to_string(),
            })?
            .as_f64()
            .ok_or_else(|| StateError::WrongType {
                name: name.to_string(),
                expected: "number",
            })
    }

    /// Append a child node, keeping document order.
    pub fn append_child(&mut self, child: StateNode) {
        self.children.push(child);
    }

    /// Builder-style [`Self::append_child`].
    pub fn with_child(mut self, child: StateNode) -> Self {
        self.append_child(child);
        self
    }

    /// All children in document order.
    pub fn children(&self) -> &[StateNode] {
        &self.children
    }

    /// Children whose tag equals `tag`, in document order.
    pub fn children_with_tag<'a: 'b, 'b>(
        &'a self,
        tag: &'b str,
    ) -> impl Iterator<Item = &'a StateNode> + 'b {
        self.children.iter().filter(move |c| c.has_tag(tag))
    }

    /// The first child carrying `tag`, if any.
    pub fn first_child_with_tag(&self, tag: &str) -> Option<&StateNode> {
        self.children_with_tag(tag).next()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
