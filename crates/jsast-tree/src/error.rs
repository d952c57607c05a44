//! Errors raised by tree construction and tree queries.
//!
//! Every variant marks a bug in the caller that built the tree (a parser or an
//! annotator). None of them are recovered inside this crate.

use crate::base::NodeIndex;
use crate::kind::NodeKind;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AstError {
    /// The index does not name a node in this arena.
    #[error("{0:?} does not name a node in this arena")]
    UnknownNode(NodeIndex),

    /// A required slot was given (or still holds) no node.
    #[error("required slot `{slot}` of {kind} is absent")]
    MissingRequiredChild { kind: NodeKind, slot: &'static str },

    /// The operation does not apply to a node of this kind.
    #[error("expected {expected}, found {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: NodeKind,
    },

    /// Indexed access past the end of an ordered child list.
    #[error("index {index} out of range for `{slot}` of {kind} (length {len})")]
    IndexOutOfBounds {
        kind: NodeKind,
        slot: &'static str,
        index: usize,
        len: usize,
    },

    /// The same node appears twice in one child list.
    #[error("{child:?} appears more than once in `{slot}`")]
    DuplicateChild {
        child: NodeIndex,
        slot: &'static str,
    },

    /// Attaching the child would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle { parent: NodeIndex, child: NodeIndex },

    /// A write-once value was written a second time.
    #[error("`{slot}` of {kind} is already set")]
    ValueAlreadySet { kind: NodeKind, slot: &'static str },

    /// Criteria or dependencies were already attached to this node.
    #[error("`{1}` annotations of {0:?} are already attached")]
    AnnotationsFrozen(NodeIndex, &'static str),

    /// A whole-tree operation was given a subtree taller than `limits::MAX_TREE_DEPTH`.
    #[error("tree is nested deeper than {0} levels")]
    DepthLimitExceeded(u32),
}

pub type AstResult<T> = Result<T, AstError>;
