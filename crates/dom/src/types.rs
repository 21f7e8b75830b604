//! Core type definitions for the document tree
//!
//! Key design principles:
//! 1. Use u32 indices instead of pointers (4 bytes, arena-friendly)
//! 2. Use SmallVec for children (most nodes have few)
//! 3. Keep the node flat and cheap to clone; everything else is derived

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

pub use uuid::Uuid;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any document
pub type NodeId = u32;

/// Node type matching the DOM specification's numeric node types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// A single node in the document tree
///
/// Navigation is by arena index; `node_id` is assigned by the arena at
/// insertion and is only meaningful within one document. The `uuid` is the
/// node's stable identity: it survives re-scans of the same document and
/// distinguishes nodes across documents, which is what mount caches key on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    // Content
    pub node_name: String,
    pub node_value: String,
    pub attributes: HashMap<String, String>,

    // Stable identity (reference equality across scans)
    pub uuid: Uuid,
}

impl DomNode {
    /// Create a new detached node. The arena assigns `node_id` on insertion.
    pub fn new(node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_id: 0,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name: node_name.into(),
            node_value: String::new(),
            attributes: HashMap::new(),
            uuid: Uuid::new_v4(),
        }
    }

    /// Convenience constructor for an element node
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeType::Element, tag)
    }

    /// Convenience constructor for a text node
    pub fn text(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Text, "#text");
        node.node_value = value.into();
        node
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Check attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Read a `data-*` attribute by its suffix: `data("role")` reads
    /// `data-role`. Keys and values pass through uninterpreted.
    pub fn data(&self, suffix: &str) -> Option<&str> {
        self.attributes
            .get(&format!("data-{suffix}"))
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_from_u8() {
        assert_eq!(NodeType::from_u8(1), Some(NodeType::Element));
        assert_eq!(NodeType::from_u8(3), Some(NodeType::Text));
        assert_eq!(NodeType::from_u8(9), Some(NodeType::Document));
        assert_eq!(NodeType::from_u8(0), None);
        assert_eq!(NodeType::from_u8(13), None);
    }

    #[test]
    fn test_element_helpers() {
        let mut node = DomNode::element("div");
        node.set_attr("data-component", "Navigation");
        node.set_attr("data-theme", "dark");

        assert!(node.is_element());
        assert_eq!(node.tag_name(), Some("div"));
        assert_eq!(node.attr("data-component"), Some("Navigation"));
        assert_eq!(node.data("component"), Some("Navigation"));
        assert_eq!(node.data("theme"), Some("dark"));
        assert_eq!(node.data("missing"), None);
        assert!(node.has_attr("data-theme"));
        assert!(!node.has_attr("class"));
    }

    #[test]
    fn test_text_node() {
        let node = DomNode::text("hello");
        assert!(node.is_text());
        assert_eq!(node.tag_name(), None);
        assert_eq!(node.node_value, "hello");
    }

    #[test]
    fn test_uuid_is_per_node() {
        let a = DomNode::element("div");
        let b = DomNode::element("div");
        assert_ne!(a.uuid, b.uuid);
    }
}
