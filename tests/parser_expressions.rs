//! End-to-end expression-level parses not already covered by the colocated
//! `syntax::parser::parser_test` unit tests: string escaping, numeric
//! literal kinds, and parenthesized grouping overriding precedence.

use emberscript::syntax::ast::Node;
use emberscript::syntax::interner::Interner;
use emberscript::syntax::parser::Parser;

fn parse_one(source: &str) -> Node {
    let (node, _interner) = parse_one_with_interner(source);
    node
}

fn parse_one_with_interner(source: &str) -> (Node, Interner) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    assert!(parser.errors.is_empty(), "unexpected parse errors: {:?}", parser.errors);
    let node = match program {
        Node::Block { mut statements, .. } => {
            assert_eq!(statements.len(), 1);
            statements.remove(0)
        }
        other => panic!("expected a single-statement block, got {other:?}"),
    };
    (node, parser.interner)
}

#[test]
fn string_literal_preserves_an_escaped_quote_and_backslash() {
    let node = parse_one(r#""a\"b\\c""#);
    match node {
        Node::StringLiteral { value, .. } => assert_eq!(value, r#"a\"b\\c"#),
        other => panic!("expected a string literal, got {other:?}"),
    }
}

#[test]
fn integer_and_float_literals_parse_to_distinct_node_kinds() {
    assert!(matches!(parse_one("42"), Node::IntegerLiteral { value: 42, .. }));
    assert!(matches!(parse_one("3.5"), Node::FloatLiteral { value, .. } if value == 3.5));
}

#[test]
fn parenthesized_grouping_overrides_additive_over_multiplicative_precedence() {
    let (node, interner) = parse_one_with_interner("(1 + 2) * 3");
    match node {
        Node::Call { receiver: Some(receiver), method_name, .. } => {
            assert_eq!(interner.resolve(method_name), "*");
            match *receiver {
                Node::Call { method_name: inner_name, .. } => {
                    assert_eq!(interner.resolve(inner_name), "+");
                }
                other => panic!("expected the grouped addition as receiver, got {other:?}"),
            }
        }
        other => panic!("expected a `*` send with a grouped receiver, got {other:?}"),
    }
}

#[test]
fn a_lone_nil_true_false_parse_to_their_own_node_kinds() {
    assert!(matches!(parse_one("nil"), Node::Nil { .. }));
    assert!(matches!(parse_one("true"), Node::True { .. }));
    assert!(matches!(parse_one("false"), Node::False { .. }));
}
