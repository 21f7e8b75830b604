//! Attribute-driven component mounting over a document tree
//!
//! The assembler connects document elements to component instances: elements
//! are tagged with a marker attribute (`data-component` by default) whose
//! value names the component to mount on them. Running an assembler scans
//! the document, resolves each key and instantiates components, at most one
//! per element no matter how often it is re-run.
//!
//! ## Core Design
//!
//! ```text
//! Document ──scan──▶ marked elements ──key──▶ Registry ──hit──▶ mount
//!                                               │ miss            ▲
//!                                               ▼                 │
//!                                        FallbackPolicies ──first match
//! ```
//!
//! 1. Resolution is two-stage: exact registry lookup, then ordered fallback
//!    rules. A key neither stage resolves is logged and skipped, never an
//!    error.
//! 2. Mounting is idempotent: a cache keyed on node identity survives
//!    re-scans and attribute edits.
//! 3. State is explicit: every assembler owns its registry, rules, cache
//!    and instances; nothing is process-global.
//! 4. Logging is emit-only `tracing`; installing a subscriber is the
//!    caller's business.
//!
//! ## Example
//!
//! ```ignore
//! use assembler::{constructor, Assembler};
//! use dom::Document;
//!
//! struct Navigation {
//!     item_count: usize,
//! }
//!
//! let doc = Document::from_json_str(page_json)?;
//!
//! let mut app = Assembler::new();
//! app.register(
//!     "Navigation",
//!     constructor(|el| Navigation {
//!         item_count: el.data("items").and_then(|v| v.parse().ok()).unwrap_or(0),
//!     }),
//! )?;
//!
//! let report = app.run(&doc)?;
//! assert_eq!(report.mounted, 1);
//! ```

pub mod assembler;
pub mod component;
pub mod error;
pub mod policy;
pub mod registry;
pub mod scanner;

pub use assembler::{Assembler, AssemblerConfig, MountReport};
pub use component::{constructor, Component, ComponentInstance, Constructor, MountCallback};
pub use error::{AssemblerError, Result};
pub use policy::{FallbackPolicies, PolicyHandler};
pub use registry::ComponentRegistry;
pub use scanner::{Scanner, DEFAULT_MARKER};

pub use dom;

#[cfg(test)]
mod tests {
    use super::*;
    use dom::Document;
    use serde_json::json;

    #[test]
    fn test_mount_over_parsed_document() {
        struct Teaser;

        let doc = Document::from_json(&json!({
            "root": {
                "nodeType": 9,
                "nodeName": "#document",
                "children": [{
                    "nodeType": 1,
                    "nodeName": "HTML",
                    "children": [{
                        "nodeType": 1,
                        "nodeName": "BODY",
                        "children": [{
                            "nodeType": 1,
                            "nodeName": "DIV",
                            "attributes": ["data-component", "Teaser"]
                        }]
                    }]
                }]
            }
        }))
        .unwrap();

        let mut app = Assembler::new();
        app.register("Teaser", constructor(|_el| Teaser)).unwrap();

        let report = app.run(&doc).unwrap();
        assert_eq!(report.mounted, 1);
        assert!(app.components("Teaser")[0].downcast_ref::<Teaser>().is_some());
    }
}
