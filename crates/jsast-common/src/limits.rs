//! Centralized limits and thresholds for the syntax-tree model.
//!
//! Whole-tree operations (cloning, printing, interchange emission) check the
//! subtree height against these values and fail with an error instead of
//! producing output too deep for callers to handle. Traversal via the visitor
//! is not bounded.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum subtree height accepted by whole-tree operations.
///
/// Applies to `clone_subtree`, source printing and interchange emission.
/// Those walk the tree with explicit stacks, so the limit does not protect
/// them; it bounds what they hand back. An interchange record nests as deep
/// as its tree, and dropping or serializing a `serde_json::Value` recurses
/// once per level, which has to fit the 2 MiB stack of a spawned thread.
///
/// # JavaScript example
///
/// ```javascript
/// // Deeply nested array literals:
/// [[[[[[[[[[[[[[[[[[[[ /* ... 1,000 levels ... */ ]]]]]]]]]]]]]]]]]]]];
///
/// // Long else-if chains nest one IfStatement per branch:
/// if (a) {} else if (b) {} else if (c) {} /* ... */
/// ```
pub const MAX_TREE_DEPTH: u32 = 1_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum number of nodes pre-allocated by `NodeArena::with_capacity`.
///
/// Callers may pass a size estimate derived from the source length; this caps
/// the up-front allocation for very large inputs.
pub const MAX_NODE_PREALLOC: usize = 5_000_000;

// =============================================================================
// Rendering Defaults
// =============================================================================

/// Indent unit used by the source printer unless configured otherwise.
pub const DEFAULT_INDENT_UNIT: &str = "    ";
