//! Node kinds and their classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of constructs the tree can hold.
///
/// A node's kind is fixed when it is allocated and decides which typed data
/// pool its slots live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // Expressions
    Name,
    NumberLiteral,
    StringLiteral,
    KeywordLiteral,
    EmptyExpression,
    ArrayLiteral,
    ObjectLiteral,
    ObjectProperty,

    // Statements
    Block,
    ExpressionStatement,
    EmptyStatement,
    IfStatement,
    TryStatement,
    CatchClause,

    // Loops
    ForInLoop,
    DoLoop,
    WhileLoop,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Name,
        NodeKind::NumberLiteral,
        NodeKind::StringLiteral,
        NodeKind::KeywordLiteral,
        NodeKind::EmptyExpression,
        NodeKind::ArrayLiteral,
        NodeKind::ObjectLiteral,
        NodeKind::ObjectProperty,
        NodeKind::Block,
        NodeKind::ExpressionStatement,
        NodeKind::EmptyStatement,
        NodeKind::IfStatement,
        NodeKind::TryStatement,
        NodeKind::CatchClause,
        NodeKind::ForInLoop,
        NodeKind::DoLoop,
        NodeKind::WhileLoop,
    ];

    /// The ESTree `type` name emitted for this kind.
    ///
    /// `KeywordLiteral` is the one kind whose name depends on its value
    /// (`this` becomes `ThisExpression`); this returns the literal case.
    #[must_use]
    pub const fn estree_type(self) -> &'static str {
        match self {
            NodeKind::Name => "Identifier",
            NodeKind::NumberLiteral | NodeKind::StringLiteral | NodeKind::KeywordLiteral => {
                "Literal"
            }
            NodeKind::EmptyExpression => "EmptyExpression",
            NodeKind::ArrayLiteral => "ArrayExpression",
            NodeKind::ObjectLiteral => "ObjectExpression",
            NodeKind::ObjectProperty => "Property",
            NodeKind::Block => "BlockStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::CatchClause => "CatchClause",
            NodeKind::ForInLoop => "ForInStatement",
            NodeKind::DoLoop => "DoWhileStatement",
            NodeKind::WhileLoop => "WhileStatement",
        }
    }

    /// Whether nodes of this kind occupy a statement position.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::ExpressionStatement
                | NodeKind::EmptyStatement
                | NodeKind::IfStatement
                | NodeKind::TryStatement
                | NodeKind::ForInLoop
                | NodeKind::DoLoop
                | NodeKind::WhileLoop
        )
    }

    /// Iteration constructs that carry a body slot and loop labels.
    #[must_use]
    pub const fn is_loop(self) -> bool {
        matches!(self, NodeKind::ForInLoop | NodeKind::DoLoop | NodeKind::WhileLoop)
    }

    /// Array and object literals, which can appear as destructuring targets.
    #[must_use]
    pub const fn is_destructuring_form(self) -> bool {
        matches!(self, NodeKind::ArrayLiteral | NodeKind::ObjectLiteral)
    }

    /// Short display name, e.g. `IfStatement`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Name => "Name",
            NodeKind::NumberLiteral => "NumberLiteral",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::KeywordLiteral => "KeywordLiteral",
            NodeKind::EmptyExpression => "EmptyExpression",
            NodeKind::ArrayLiteral => "ArrayLiteral",
            NodeKind::ObjectLiteral => "ObjectLiteral",
            NodeKind::ObjectProperty => "ObjectProperty",
            NodeKind::Block => "Block",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::CatchClause => "CatchClause",
            NodeKind::ForInLoop => "ForInLoop",
            NodeKind::DoLoop => "DoLoop",
            NodeKind::WhileLoop => "WhileLoop",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a `KeywordLiteral` node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    True,
    False,
    #[default]
    Null,
    This,
}

impl Keyword {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
        }
    }
}
