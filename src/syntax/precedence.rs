//! The total order over operator tokens from spec.md §4.2, "Precedence
//! table": `LOWEST < ASSIGNMENT < TERNARY < equality/relational < additive
//! (+, -) < multiplicative (*, /) < call (() < member (.)`.

use crate::syntax::token_type::TokenType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Assignment,
    Ternary,
    Equality,
    Additive,
    Multiplicative,
    Call,
    Member,
}

/// Single source of truth mapping an infix/postfix token to its precedence
/// level, mirroring the teacher crate's `OPERATOR_TABLE` (one flat table,
/// not a scattered `match` in several places).
const OPERATOR_TABLE: &[(TokenType, Precedence)] = &[
    (TokenType::Assign, Precedence::Assignment),
    (TokenType::Question, Precedence::Ternary),
    (TokenType::Eq, Precedence::Equality),
    (TokenType::NotEq, Precedence::Equality),
    (TokenType::Lt, Precedence::Equality),
    (TokenType::Gt, Precedence::Equality),
    (TokenType::Lte, Precedence::Equality),
    (TokenType::Gte, Precedence::Equality),
    (TokenType::Plus, Precedence::Additive),
    (TokenType::Minus, Precedence::Additive),
    (TokenType::Asterisk, Precedence::Multiplicative),
    (TokenType::Slash, Precedence::Multiplicative),
    (TokenType::LParen, Precedence::Call),
    (TokenType::Dot, Precedence::Member),
];

/// The precedence of `token_type` as an infix/postfix operator, or
/// [`Precedence::Lowest`] if it isn't one — this is what lets the
/// `parse_expression` loop (spec.md §4.2) terminate cleanly on any
/// non-operator token.
pub fn precedence_of(token_type: &TokenType) -> Precedence {
    OPERATOR_TABLE
        .iter()
        .find(|(t, _)| t == token_type)
        .map(|(_, p)| *p)
        .unwrap_or(Precedence::Lowest)
}

/// `+`, `-`, `*`, `/`, and the comparison operators all parse their RHS
/// with the same precedence they were matched at (left-associative infix);
/// there is no right-associative operator in this grammar, so this is a
/// direct lookup rather than the below/above split a `**`-style operator
/// would need.
pub fn rhs_precedence_for_infix(token_type: &TokenType) -> Precedence {
    precedence_of(token_type)
}
