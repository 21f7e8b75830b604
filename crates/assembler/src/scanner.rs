//! Element scanner
//!
//! Finds the elements a run should consider: every descendant of the scan
//! context carrying the marker attribute, in document order. The context
//! element itself is never a candidate. Scans are stateless and re-query
//! the document each time, so elements added since the last run are picked
//! up naturally.

use crate::error::{AssemblerError, Result};
use dom::{utils, Document, NodeId};

/// Default marker: elements are tagged with `data-component`.
pub const DEFAULT_MARKER: &str = "component";

#[derive(Debug, Clone)]
pub struct Scanner {
    attribute: String,
}

impl Scanner {
    /// Build a scanner for `data-<marker>` elements.
    ///
    /// The marker is validated once, here: it must be non-empty and form a
    /// well-formed attribute name when prefixed with `data-`.
    pub fn new(marker: &str) -> Result<Self> {
        let attribute = format!("data-{marker}");
        if marker.is_empty() || !utils::is_valid_attribute_name(&attribute) {
            return Err(AssemblerError::InvalidMarker {
                marker: marker.to_string(),
            });
        }
        Ok(Self { attribute })
    }

    /// The full attribute name scanned for (`data-component` by default).
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Candidate elements under `context`, in document order.
    ///
    /// Without an explicit context the scan covers the document `<body>`,
    /// falling back to the root when there is none. A document with neither
    /// scans to an empty list.
    pub fn scan(&self, doc: &Document, context: Option<NodeId>) -> Result<Vec<NodeId>> {
        let Some(start) = context.or_else(|| doc.body()).or_else(|| doc.root_id()) else {
            return Ok(Vec::new());
        };
        let candidates = doc.elements_with_attribute(start, &self.attribute)?;
        tracing::trace!(
            attribute = %self.attribute,
            context = start,
            candidates = candidates.len(),
            "scanned document"
        );
        Ok(candidates)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            attribute: format!("data-{DEFAULT_MARKER}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> Document {
        Document::from_json(&json!({
            "root": {
                "nodeType": 9,
                "nodeName": "#document",
                "children": [{
                    "nodeType": 1,
                    "nodeName": "HTML",
                    "children": [{
                        "nodeType": 1,
                        "nodeName": "BODY",
                        "attributes": ["data-component", "Shell"],
                        "children": [
                            {
                                "nodeType": 1,
                                "nodeName": "DIV",
                                "attributes": ["data-component", "Navigation", "id", "nav"]
                            },
                            {
                                "nodeType": 1,
                                "nodeName": "DIV",
                                "attributes": ["data-widget", "Chart", "id", "chart"]
                            },
                            {
                                "nodeType": 1,
                                "nodeName": "DIV",
                                "attributes": ["id", "plain"],
                                "children": [{
                                    "nodeType": 1,
                                    "nodeName": "SPAN",
                                    "attributes": ["data-component", "Badge", "id", "badge"]
                                }]
                            }
                        ]
                    }]
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_default_attribute() {
        assert_eq!(Scanner::default().attribute(), "data-component");
    }

    #[test]
    fn test_scan_finds_marked_descendants_in_document_order() {
        let doc = page();
        let scanner = Scanner::default();

        let found = scanner.scan(&doc, None).unwrap();
        let ids: Vec<&str> = found
            .iter()
            .map(|&id| doc.get(id).unwrap().attr("id").unwrap())
            .collect();

        assert_eq!(ids, vec!["nav", "badge"]);
    }

    #[test]
    fn test_scan_excludes_the_context_element() {
        // <body> carries the marker itself but is the scan context
        let doc = page();
        let found = Scanner::default().scan(&doc, None).unwrap();

        for &id in &found {
            assert_ne!(doc.get(id).unwrap().attr("data-component"), Some("Shell"));
        }
    }

    #[test]
    fn test_scan_with_custom_marker() {
        let doc = page();
        let scanner = Scanner::new("widget").unwrap();

        let found = scanner.scan(&doc, None).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(doc.get(found[0]).unwrap().attr("id"), Some("chart"));
    }

    #[test]
    fn test_scan_empty_document() {
        let doc = Document::new();
        let found = Scanner::default().scan(&doc, None).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_markers_are_rejected() {
        for marker in ["", "not valid", "a=b", "\"quoted\""] {
            assert!(matches!(
                Scanner::new(marker),
                Err(AssemblerError::InvalidMarker { .. })
            ));
        }
    }
}
