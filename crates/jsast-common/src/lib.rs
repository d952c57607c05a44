//! Common types and utilities for the jsast syntax-tree model.
//!
//! This crate provides the vocabulary shared between the tree itself and the
//! collaborators that write into it after construction:
//! - Change annotations (`ChangeKind`, `AnnotationSet`)
//! - Process-unique node identifiers (`NodeId`)
//! - Common enums (`NewLineKind`)
//! - Centralized limits and thresholds

// Change metadata written by the external annotator
pub mod change;
pub use change::{AnnotationSet, ChangeKind};

// Node identity, preserved across clones
pub mod id;
pub use id::NodeId;

// Common types shared by printer configuration and callers
pub mod common;
pub use common::NewLineKind;

// Centralized limits and thresholds
pub mod limits;
