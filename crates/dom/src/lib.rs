//! Document Tree Library
//!
//! Arena-backed document trees with attribute queries, built as the
//! substrate for attribute-driven component mounting.
//!
//! ## Core Design
//!
//! - **Data structures first**: a flat arena of nodes, algorithms follow
//! - **Indices, not pointers**: `NodeId` (u32) everywhere
//! - **No special cases**: document order is arena traversal order
//!
//! ```text
//! CDP-style JSON → Document (arena) → attribute query → NodeId list
//!                       ↓
//!                 HtmlSerializer (diagnostics)
//! ```

pub mod arena;
pub mod document;
pub mod error;
pub mod serialize;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use document::Document;
pub use error::{DomError, Result};
pub use serialize::{HtmlSerializer, SerializeConfig};
pub use types::*;
