//! Node headers, typed data pools and the arena that owns them.
//!
//! # Layout
//!
//! 1. `Node` - a small header holding kind, source range and a data index
//! 2. `ExtendedNodeInfo` - parent link, identity and change annotations,
//!    stored in a parallel vector indexed like `nodes`
//! 3. Typed pools - one `Vec<T>` per node category; `Node::data_index`
//!    points into the pool selected by `Node::kind`
//!
//! Children are referenced by `NodeIndex`, so the tree owns its nodes through
//! the arena and the parent link is a plain index that never keeps anything
//! alive.

use crate::base::{NO_POSITION, NodeIndex, NodeList};
use crate::kind::{Keyword, NodeKind};
use jsast_common::{AnnotationSet, ChangeKind, NodeId};
use serde::{Deserialize, Serialize};

/// Node header.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Start offset in the source text, or `NO_POSITION`.
    pub pos: i32,
    /// Length in the source text, or `NO_POSITION` when not yet computed.
    pub len: i32,
    /// Index into the kind's pool (`NO_DATA` for kinds without slots).
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    #[must_use]
    pub fn new(kind: NodeKind, pos: i32, len: i32) -> Node {
        Node {
            kind,
            pos,
            len,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_data(kind: NodeKind, pos: i32, len: i32, data_index: u32) -> Node {
        Node {
            kind,
            pos,
            len,
            data_index,
        }
    }

    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    /// End offset (`pos + len`), or `None` while either is unset or the sum
    /// does not fit an `i32`.
    #[must_use]
    pub fn end(&self) -> Option<i32> {
        if self.pos < 0 || self.len < 0 {
            None
        } else {
            self.pos.checked_add(self.len)
        }
    }
}

/// Per-node information that is not part of the syntax: parent link,
/// identity, and the annotator's change metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
    pub id: NodeId,
    /// 1-based source line, or `NO_POSITION`.
    pub line: i32,
    pub change: ChangeKind,
    pub change_no_propagate: ChangeKind,
    /// `None` until the annotator attaches a set.
    pub criteria: Option<AnnotationSet>,
    pub dependencies: Option<AnnotationSet>,
    pub moved: bool,
    pub fixed_position: bool,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
            id: NodeId::NONE,
            line: NO_POSITION,
            change: ChangeKind::default(),
            change_no_propagate: ChangeKind::default(),
            criteria: None,
            dependencies: None,
            moved: false,
            fixed_position: false,
        }
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier nodes
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NameData {
    pub identifier: String,
}

/// Data for numeric literals.
///
/// `value` is the source token and is written once. `number` is the decoded
/// magnitude the parser computed for it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NumberLiteralData {
    pub value: Option<String>,
    pub number: f64,
}

/// Data for string literals (value is unescaped, without quotes)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StringLiteralData {
    pub value: String,
    pub quote_char: char,
}

impl Default for StringLiteralData {
    fn default() -> Self {
        StringLiteralData {
            value: String::new(),
            quote_char: '"',
        }
    }
}

/// Data for `true`, `false`, `null` and `this`
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct KeywordLiteralData {
    pub keyword: Keyword,
}

/// Data for array literals. Elisions are `EmptyExpression` elements.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArrayLiteralData {
    pub elements: NodeList,
    /// Parser-computed, consumed by code generators only.
    pub destructuring_length: i32,
    /// Number of elisions, consumed by code generators only.
    pub skip_count: i32,
    pub is_destructuring: bool,
}

/// Data for object literals. Elements are always `ObjectProperty` nodes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectLiteralData {
    pub elements: NodeList,
    pub is_destructuring: bool,
}

/// Data for `key: value` pairs inside object literals
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectPropertyData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

/// Data for block statements
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Data for expression statements
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// Data for if statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatementData {
    pub condition: NodeIndex,
    pub then_part: NodeIndex,
    pub else_part: NodeIndex,
    pub else_position: i32,
    pub lp: i32,
    pub rp: i32,
}

impl Default for IfStatementData {
    fn default() -> Self {
        IfStatementData {
            condition: NodeIndex::NONE,
            then_part: NodeIndex::NONE,
            else_part: NodeIndex::NONE,
            else_position: NO_POSITION,
            lp: NO_POSITION,
            rp: NO_POSITION,
        }
    }
}

/// Data for try statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clauses: NodeList,
    pub finally_block: NodeIndex,
    pub finally_position: i32,
}

impl Default for TryData {
    fn default() -> Self {
        TryData {
            try_block: NodeIndex::NONE,
            catch_clauses: NodeList::new(),
            finally_block: NodeIndex::NONE,
            finally_position: NO_POSITION,
        }
    }
}

/// Data for `catch (name [if condition]) body`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClauseData {
    pub var_name: NodeIndex,
    pub catch_condition: NodeIndex,
    pub body: NodeIndex,
    pub if_position: i32,
    pub lp: i32,
    pub rp: i32,
}

impl Default for CatchClauseData {
    fn default() -> Self {
        CatchClauseData {
            var_name: NodeIndex::NONE,
            catch_condition: NodeIndex::NONE,
            body: NodeIndex::NONE,
            if_position: NO_POSITION,
            lp: NO_POSITION,
            rp: NO_POSITION,
        }
    }
}

/// Slots shared by every iteration construct. Embedded by value in each
/// loop's data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoopBase {
    pub body: NodeIndex,
    pub lp: i32,
    pub rp: i32,
    /// Labels of enclosing labeled statements that target this loop.
    pub labels: Vec<String>,
}

impl Default for LoopBase {
    fn default() -> Self {
        LoopBase {
            body: NodeIndex::NONE,
            lp: NO_POSITION,
            rp: NO_POSITION,
            labels: Vec::new(),
        }
    }
}

/// Data for `for [each] (iterator in object) body`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForInLoopData {
    pub base: LoopBase,
    pub iterator: NodeIndex,
    pub iterated_object: NodeIndex,
    pub in_position: i32,
    pub each_position: i32,
    pub is_for_each: bool,
}

impl Default for ForInLoopData {
    fn default() -> Self {
        ForInLoopData {
            base: LoopBase::default(),
            iterator: NodeIndex::NONE,
            iterated_object: NodeIndex::NONE,
            in_position: NO_POSITION,
            each_position: NO_POSITION,
            is_for_each: false,
        }
    }
}

/// Data for `do body while (condition);`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoLoopData {
    pub base: LoopBase,
    pub condition: NodeIndex,
    pub while_position: i32,
}

impl Default for DoLoopData {
    fn default() -> Self {
        DoLoopData {
            base: LoopBase::default(),
            condition: NodeIndex::NONE,
            while_position: NO_POSITION,
        }
    }
}

/// Data for `while (condition) body`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WhileLoopData {
    pub base: LoopBase,
    pub condition: NodeIndex,
}

// =============================================================================
// Node Arena
// =============================================================================

/// Arena for node headers with typed data pools.
///
/// Every tree built in an arena is freed with it. Clones are allocated in the
/// same arena as their source.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    /// Node headers
    pub nodes: Vec<Node>,
    /// Parent links and annotations, parallel to `nodes`
    pub extended_info: Vec<ExtendedNodeInfo>,

    // Leaves
    pub names: Vec<NameData>,
    pub number_literals: Vec<NumberLiteralData>,
    pub string_literals: Vec<StringLiteralData>,
    pub keyword_literals: Vec<KeywordLiteralData>,

    // Container literals
    pub array_literals: Vec<ArrayLiteralData>,
    pub object_literals: Vec<ObjectLiteralData>,
    pub object_properties: Vec<ObjectPropertyData>,

    // Statements
    pub blocks: Vec<BlockData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,

    // Loops
    pub for_in_loops: Vec<ForInLoopData>,
    pub do_loops: Vec<DoLoopData>,
    pub while_loops: Vec<WhileLoopData>,
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
