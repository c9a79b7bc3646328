//! Null-denotation / left-denotation dispatch (spec.md §4.2, "Dispatch
//! tables").
//!
//! Design Notes (spec.md §9): "Replace the pair of 'null/left denotation
//! returns a function pointer' with a tagged match over token kinds; this
//! preserves the O(1) dispatch while remaining exhaustively type-checked."
//! `Null`/`Left` are that tag; [`super::expression`] matches on them to
//! call the concrete production.

use crate::syntax::token_type::TokenType;

/// Null denotation: the parser chosen by the first token of an expression
/// (primaries, prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Null {
    True,
    False,
    Nil,
    Integer,
    Float,
    String,
    Identifier,
    Group,
    Def,
    If,
    NegativeNumber,
}

pub(super) fn null_denotation(token_type: TokenType) -> Option<Null> {
    use TokenType::*;
    Some(match token_type {
        True => Null::True,
        False => Null::False,
        Nil => Null::Nil,
        Int => Null::Integer,
        Float => Null::Float,
        String => Null::String,
        Ident | ConstantIdent | GlobalIdent | InstanceVarIdent | ClassVarIdent => Null::Identifier,
        LParen => Null::Group,
        Def => Null::Def,
        If => Null::If,
        // A `-` reaching null-denotation position (the first token of an
        // expression, or of an argument/operand) is never a standalone
        // operator — there is nothing to its left to subtract from. This is
        // the signed-literal case (spec.md §8 scenario 6's counterpart):
        // `-1`, `x = -1`, `foo(-1)`, `1 + -1`.
        Minus => Null::NegativeNumber,
        _ => return None,
    })
}

/// Left denotation: the parser chosen by a token that appears after a
/// subexpression (infix, postfix, call, member-access, ternary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Left {
    Infix,
    Assign,
    CallWithParens,
    Send,
    Ternary,
}

pub(super) fn left_denotation(token_type: TokenType) -> Option<Left> {
    use TokenType::*;
    Some(match token_type {
        Plus | Minus | Asterisk | Slash | Eq | NotEq | Lt | Lte | Gt | Gte => Left::Infix,
        Assign => Left::Assign,
        LParen => Left::CallWithParens,
        Dot => Left::Send,
        Question => Left::Ternary,
        _ => return None,
    })
}
