//! Document serializer - render a tree back to HTML-ish text
//!
//! This is a diagnostic surface, not a spec-grade HTML writer: indented
//! markup with escaped attribute values and capped text nodes, good for
//! logs, snapshots and tests.

use crate::document::Document;
use crate::error::Result;
use crate::types::{NodeId, NodeType};
use crate::utils;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializeConfig {
    /// Restrict attribute output to these names (in this order).
    /// `None` prints every attribute, sorted for deterministic output.
    pub include_attributes: Option<Vec<String>>,
    pub max_text_length: usize,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            include_attributes: None,
            max_text_length: 200,
        }
    }
}

/// Document tree serializer
pub struct HtmlSerializer {
    config: SerializeConfig,
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializeConfig::default())
    }

    pub fn with_config(config: SerializeConfig) -> Self {
        Self { config }
    }

    /// Serialize the whole document
    pub fn serialize(&self, doc: &Document) -> Result<String> {
        let mut output = String::with_capacity(4096);

        if let Some(root_id) = doc.root_id() {
            self.serialize_node(doc, root_id, 0, &mut output)?;
        }

        Ok(output)
    }

    /// Serialize a single subtree
    pub fn serialize_subtree(&self, doc: &Document, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(1024);
        self.serialize_node(doc, node_id, 0, &mut output)?;
        Ok(output)
    }

    fn serialize_node(
        &self,
        doc: &Document,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = doc.get(node_id)?;
        let indent = "  ".repeat(depth);

        match node.node_type {
            NodeType::Element => {
                let tag = node.node_name.to_lowercase();

                output.push_str(&indent);
                output.push('<');
                output.push_str(&tag);

                for name in self.attribute_names(node_id, doc)? {
                    if let Some(value) = doc.get(node_id)?.attr(&name) {
                        output.push(' ');
                        output.push_str(&name);
                        output.push_str("=\"");
                        output.push_str(&escape_attr(value));
                        output.push('"');
                    }
                }

                output.push_str(">\n");

                for &child_id in &node.children_ids {
                    self.serialize_node(doc, child_id, depth + 1, output)?;
                }

                output.push_str(&indent);
                output.push_str("</");
                output.push_str(&tag);
                output.push_str(">\n");
            }
            NodeType::Text => {
                let text = node.node_value.trim();
                if !text.is_empty() {
                    output.push_str(&indent);
                    output.push_str(&escape_text(&utils::cap_text_length(
                        text,
                        self.config.max_text_length,
                    )));
                    output.push('\n');
                }
            }
            NodeType::Document | NodeType::DocumentFragment => {
                for &child_id in &node.children_ids {
                    self.serialize_node(doc, child_id, depth, output)?;
                }
            }
            _ => {
                // Comments, doctypes etc. carry no mounting-relevant state
            }
        }

        Ok(())
    }

    /// Attribute names to print for a node, in deterministic order
    fn attribute_names(&self, node_id: NodeId, doc: &Document) -> Result<Vec<String>> {
        if let Some(include) = &self.config.include_attributes {
            return Ok(include.clone());
        }

        let mut names: Vec<String> = doc.get(node_id)?.attributes.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
