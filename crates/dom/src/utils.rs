//! Utility functions for document processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{NodeId, NodeType};

/// Cap text length, appending an ellipsis when truncated
///
/// Truncation is by character count; cutting on a byte index would split
/// multi-byte sequences.
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
    }
}

/// Check that a name is usable as an HTML attribute name
///
/// Conservative subset: ASCII letter first, then letters, digits,
/// hyphens and underscores. Markers are validated with this after being
/// prefixed with `data-`.
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Get all text content from a node and its children
pub fn text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DomNode;

    #[test]
    fn test_cap_text_length() {
        assert_eq!(cap_text_length("hello", 10), "hello");
        assert_eq!(cap_text_length("hello world", 5), "hello...");
        // Multi-byte characters must not be split
        assert_eq!(cap_text_length("héllo wörld", 6), "héllo ...");
        assert_eq!(cap_text_length("日本語テキスト", 3), "日本語...");
    }

    #[test]
    fn test_is_valid_attribute_name() {
        assert!(is_valid_attribute_name("component"));
        assert!(is_valid_attribute_name("data-component"));
        assert!(is_valid_attribute_name("x1_y2"));

        assert!(!is_valid_attribute_name(""));
        assert!(!is_valid_attribute_name("1component"));
        assert!(!is_valid_attribute_name("-component"));
        assert!(!is_valid_attribute_name("com ponent"));
        assert!(!is_valid_attribute_name("com\"ponent"));
    }

    #[test]
    fn test_text_content_concatenates_subtree() {
        let mut arena = DomArena::new();
        let root = arena.add_node(DomNode::element("div"));
        arena.add_child(root, DomNode::text("Hello ")).unwrap();
        let span = arena.add_child(root, DomNode::element("span")).unwrap();
        arena.add_child(span, DomNode::text("world")).unwrap();

        assert_eq!(text_content(&arena, root).unwrap(), "Hello world");
    }
}
