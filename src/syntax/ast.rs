//! AST node shapes (spec.md §3, "AST Nodes").
//!
//! Every node shape spec.md lists is a variant of one `Node` enum — this
//! follows the Ruby-family source this spec was distilled from
//! (`borisromanov/natalie`'s `Parser::Node` hierarchy is one tagged tree
//! too), rather than splitting `Expression`/`Statement` the way the
//! teacher crate's own language does. The four identifier "kinds" spec.md
//! §4.2 calls out (local, constant, global, instance-var, class-var) all
//! produce the same `Identifier` shape (I6) and are told apart only by
//! `is_local` plus the symbol's interned spelling.

use crate::diagnostics::position::Span;
use crate::syntax::interner::Symbol;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block {
        statements: Vec<Node>,
        span: Span,
    },
    True {
        span: Span,
    },
    False {
        span: Span,
    },
    Nil {
        span: Span,
    },
    IntegerLiteral {
        value: i64,
        span: Span,
    },
    FloatLiteral {
        value: f64,
        span: Span,
    },
    StringLiteral {
        value: String,
        span: Span,
    },
    Identifier {
        name: Symbol,
        is_local: bool,
        span: Span,
    },
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
        span: Span,
    },
    Call {
        /// `None` is a receiver-less call (`puts 1, 2`); spec.md §4.2
        /// "call with parens"/"call without parens" both synthesize this
        /// with a `nil` receiver.
        receiver: Option<Box<Node>>,
        method_name: Symbol,
        args: Vec<Node>,
        span: Span,
    },
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
        span: Span,
    },
    Ternary {
        condition: Box<Node>,
        if_true: Box<Node>,
        if_false: Box<Node>,
        span: Span,
    },
    Def {
        name: Symbol,
        params: Vec<Symbol>,
        body: Box<Node>,
        span: Span,
    },
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Block { span, .. }
            | Node::True { span }
            | Node::False { span }
            | Node::Nil { span }
            | Node::IntegerLiteral { span, .. }
            | Node::FloatLiteral { span, .. }
            | Node::StringLiteral { span, .. }
            | Node::Identifier { span, .. }
            | Node::Assignment { span, .. }
            | Node::Call { span, .. }
            | Node::If { span, .. }
            | Node::Ternary { span, .. }
            | Node::Def { span, .. } => *span,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Node::Identifier { .. })
    }

    pub fn as_identifier_symbol(&self) -> Option<Symbol> {
        match self {
            Node::Identifier { name, .. } => Some(*name),
            _ => None,
        }
    }
}
