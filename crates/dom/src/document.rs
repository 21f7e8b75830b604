//! Document - an owned document tree plus its construction paths
//!
//! This is the main entry point for document operations:
//! - building the tree from CDP-style JSON (the `DOM.getDocument` shape
//!   a real browser hands over)
//! - root/body resolution
//! - attribute-scoped descendant queries, which attribute-driven mounting
//!   is built on

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use crate::utils;
use serde_json::Value;

/// An owned document tree
///
/// Wraps the arena and knows how to populate it. Node ids from the source
/// JSON are not preserved; arena indices are the only id space, and each
/// node's `uuid` is its stable identity across scans.
#[derive(Debug, Default)]
pub struct Document {
    arena: DomArena,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            arena: DomArena::new(),
        }
    }

    /// Build a document from CDP-style JSON
    ///
    /// Accepts either the full `DOM.getDocument` response (`{"root": ...}`)
    /// or a bare node object:
    ///
    /// ```json
    /// {
    ///   "root": {
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "attributes": [],
    ///     "children": [...]
    ///   }
    /// }
    /// ```
    ///
    /// Attributes arrive as the flat `[name, value, name, value, ...]`
    /// array the protocol uses.
    pub fn from_json(source: &Value) -> Result<Self> {
        let root = source.get("root").unwrap_or(source);

        let mut doc = Self::new();
        let root_id = doc.parse_node(root, None)?;
        doc.arena.set_root(root_id)?;

        Ok(doc)
    }

    /// Build a document from CDP-style JSON text
    pub fn from_json_str(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_json(&value)
    }

    /// Recursively parse one source node into the arena
    fn parse_node(&mut self, source: &Value, parent_id: Option<NodeId>) -> Result<NodeId> {
        let node_type_val = source
            .get("nodeType")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| DomError::Document("missing nodeType".to_string()))?
            as u8;

        let node_type =
            NodeType::from_u8(node_type_val).ok_or(DomError::InvalidNodeType(node_type_val))?;

        let node_name = source
            .get("nodeName")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let mut node = DomNode::new(node_type, node_name);
        node.node_value = source
            .get("nodeValue")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        node.parent_id = parent_id;

        // Attributes come as a flat [name, value, ...] array
        if let Some(attrs) = source.get("attributes").and_then(|v| v.as_array()) {
            let mut i = 0;
            while i + 1 < attrs.len() {
                if let (Some(key), Some(value)) = (attrs[i].as_str(), attrs[i + 1].as_str()) {
                    node.set_attr(key, value);
                }
                i += 2;
            }
        }

        let current_id = self.arena.add_node(node);

        if let Some(children) = source.get("children").and_then(|v| v.as_array()) {
            let mut child_ids = smallvec::SmallVec::new();

            for child in children {
                let child_id = self.parse_node(child, Some(current_id))?;
                child_ids.push(child_id);
            }

            self.arena.get_mut(current_id)?.children_ids = child_ids;
        }

        Ok(current_id)
    }

    /// Reference to the underlying arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Mutable reference to the underlying arena
    ///
    /// This is the mutation surface: attribute edits and node insertion
    /// between scans go through here.
    pub fn arena_mut(&mut self) -> &mut DomArena {
        &mut self.arena
    }

    /// Root node ID, if the document is non-empty
    pub fn root_id(&self) -> Option<NodeId> {
        self.arena.root_id()
    }

    /// Root node
    pub fn root(&self) -> Result<&DomNode> {
        self.arena.root()
    }

    /// The `<body>` element, if present
    pub fn body(&self) -> Option<NodeId> {
        self.arena.find_by_tag("body").into_iter().next()
    }

    /// Get node by ID
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.arena.get(node_id)
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.arena.get_mut(node_id)
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Check if the document has no nodes
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Descendant elements of `context` carrying `attribute`, document order
    ///
    /// The context node itself never matches, mirroring descendant-selector
    /// behavior. Re-query after mutating the tree: results are a snapshot.
    pub fn elements_with_attribute(&self, context: NodeId, attribute: &str) -> Result<Vec<NodeId>> {
        let ids = self.arena.descendants(context)?;
        let mut out = Vec::new();

        for id in ids {
            let node = self.arena.get(id)?;
            if node.is_element() && node.has_attr(attribute) {
                out.push(id);
            }
        }

        Ok(out)
    }

    /// Concatenated text content of a subtree
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        utils::text_content(&self.arena, node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Document {
        let source = serde_json::json!({
            "root": {
                "nodeType": 9,
                "nodeName": "#document",
                "children": [{
                    "nodeType": 1,
                    "nodeName": "HTML",
                    "attributes": [],
                    "children": [
                        {
                            "nodeType": 1,
                            "nodeName": "HEAD",
                            "attributes": []
                        },
                        {
                            "nodeType": 1,
                            "nodeName": "BODY",
                            "attributes": [],
                            "children": [
                                {
                                    "nodeType": 1,
                                    "nodeName": "DIV",
                                    "attributes": ["data-component", "Navigation", "id", "nav"],
                                    "children": [{
                                        "nodeType": 3,
                                        "nodeName": "#text",
                                        "nodeValue": "Home"
                                    }]
                                },
                                {
                                    "nodeType": 1,
                                    "nodeName": "DIV",
                                    "attributes": ["data-component", "Teaser"]
                                }
                            ]
                        }
                    ]
                }]
            }
        });

        Document::from_json(&source).unwrap()
    }

    #[test]
    fn test_from_json_builds_tree() {
        let doc = page();

        assert_eq!(doc.len(), 7);
        assert_eq!(doc.root().unwrap().node_type, NodeType::Document);

        let body = doc.body().unwrap();
        assert_eq!(doc.get(body).unwrap().node_name, "BODY");
        assert_eq!(doc.arena().children(body).unwrap().len(), 2);
    }

    #[test]
    fn test_from_json_parses_flat_attribute_array() {
        let doc = page();
        let nav = doc.arena().find_by_id("nav").unwrap();
        let node = doc.get(nav).unwrap();

        assert_eq!(node.attr("data-component"), Some("Navigation"));
        assert_eq!(node.data("component"), Some("Navigation"));
    }

    #[test]
    fn test_from_json_accepts_bare_node() {
        let source = serde_json::json!({
            "nodeType": 1,
            "nodeName": "DIV",
            "attributes": ["data-component", "Standalone"]
        });

        let doc = Document::from_json(&source).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.root().unwrap().attr("data-component"), Some("Standalone"));
    }

    #[test]
    fn test_from_json_rejects_missing_node_type() {
        let source = serde_json::json!({ "nodeName": "DIV" });
        assert!(matches!(
            Document::from_json(&source),
            Err(DomError::Document(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_node_type() {
        let source = serde_json::json!({ "nodeType": 42, "nodeName": "DIV" });
        assert!(matches!(
            Document::from_json(&source),
            Err(DomError::InvalidNodeType(42))
        ));
    }

    #[test]
    fn test_from_json_str_parses_document_text() {
        // The wire shape as text: node names like "#document" ride along
        let source = r##"{
            "root": {
                "nodeType": 9,
                "nodeName": "#document",
                "children": [{
                    "nodeType": 1,
                    "nodeName": "BODY",
                    "children": [{
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Navigation"]
                    }]
                }]
            }
        }"##;

        let doc = Document::from_json_str(source).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.root().unwrap().node_name, "#document");

        let body = doc.body().unwrap();
        let hits = doc.elements_with_attribute(body, "data-component").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            doc.get(hits[0]).unwrap().attr("data-component"),
            Some("Navigation")
        );
    }

    #[test]
    fn test_from_json_str_propagates_parse_errors() {
        assert!(matches!(
            Document::from_json_str("not json"),
            Err(DomError::Parse(_))
        ));
    }

    #[test]
    fn test_elements_with_attribute_scopes_to_context() {
        let doc = page();
        let body = doc.body().unwrap();

        let hits = doc.elements_with_attribute(body, "data-component").unwrap();
        assert_eq!(hits.len(), 2);

        // Document order: Navigation before Teaser
        let keys: Vec<_> = hits
            .iter()
            .map(|&id| doc.get(id).unwrap().attr("data-component").unwrap())
            .collect();
        assert_eq!(keys, vec!["Navigation", "Teaser"]);

        // Scoped under the first matching div there are no further matches
        let nav = doc.arena().find_by_id("nav").unwrap();
        assert!(doc
            .elements_with_attribute(nav, "data-component")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_text_content() {
        let doc = page();
        let nav = doc.arena().find_by_id("nav").unwrap();
        assert_eq!(doc.text_content(nav).unwrap(), "Home");
    }
}
