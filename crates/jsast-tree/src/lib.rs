//! Arena-backed JavaScript syntax tree.
//!
//! A parser builds trees bottom-up through the `NodeArena` setters, an
//! annotator later writes change metadata into them, and consumers read them
//! through:
//! - `NodeArena::visit` (pre-order walk, see `visitor`)
//! - `NodeArena::clone_subtree` (deep copy that keeps node ids)
//! - `SourcePrinter` / `NodeArena::to_source` (source text)
//! - `EstreeWriter` / `NodeArena::to_interchange` (ESTree JSON records)

// Handles: NodeIndex, NodeList
pub mod base;
pub use base::{NO_POSITION, NodeIndex, NodeList};

pub mod kind;
pub use kind::{Keyword, NodeKind};

pub mod error;
pub use error::{AstError, AstResult};

// Node headers, typed pools and the arena
pub mod node;
pub use node::*;

// Arena methods, split by concern
mod clone;
pub mod node_access;
mod node_arena;
pub use node_access::{ChildList, NodeView};

pub mod visitor;
pub use visitor::NodeVisitor;

pub mod debug_print;
pub use debug_print::DebugPrinter;

pub mod printer;
pub use printer::{PrinterOptions, SourcePrinter};

pub mod estree;
pub use estree::EstreeWriter;

pub mod tracing_config;

pub use jsast_common::{AnnotationSet, ChangeKind, NewLineKind, NodeId};
