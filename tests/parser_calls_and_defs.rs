//! End-to-end parses of small, realistic programs mixing defs, paren-less
//! and parenthesized calls, sends, and control flow (spec.md §8).

use emberscript::syntax::parser::{printer, Parser};

fn parse_ok(source: &str) -> (emberscript::syntax::ast::Node, Parser) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    assert!(parser.errors.is_empty(), "unexpected parse errors: {:?}", parser.errors);
    (program, parser)
}

#[test]
fn a_small_program_mixing_defs_calls_and_control_flow_parses_cleanly() {
    let source = "def max(a, b)\n  if a > b\n    a\n  else\n    b\n  end\nend\n\nresult = max(3, 7)\nresult\n";
    let (program, parser) = parse_ok(source);
    let statements = match &program {
        emberscript::syntax::ast::Node::Block { statements, .. } => statements,
        other => panic!("expected a block, got {other:?}"),
    };
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], emberscript::syntax::ast::Node::Def { .. }));
    assert!(matches!(statements[1], emberscript::syntax::ast::Node::Assignment { .. }));

    // Pretty-printing and re-parsing should reach a fixed point (P7).
    let printed_once = printer::print(&program, &parser.interner);
    let (reparsed, parser2) = parse_ok(&printed_once);
    let printed_twice = printer::print(&reparsed, &parser2.interner);
    assert_eq!(printed_once, printed_twice);
}

#[test]
fn chained_sends_and_paren_less_calls_compose() {
    let source = "collection.each(item)\nitem.process\n";
    let (program, _parser) = parse_ok(source);
    let statements = match &program {
        emberscript::syntax::ast::Node::Block { statements, .. } => statements,
        other => panic!("expected a block, got {other:?}"),
    };
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        emberscript::syntax::ast::Node::Call { receiver, args, .. } => {
            assert!(receiver.is_some());
            assert_eq!(args.len(), 1);
        }
        other => panic!("expected a send with one arg, got {other:?}"),
    }
    match &statements[1] {
        emberscript::syntax::ast::Node::Call { receiver, args, .. } => {
            assert!(receiver.is_some());
            assert!(args.is_empty());
        }
        other => panic!("expected a zero-arg send, got {other:?}"),
    }
}

#[test]
fn nested_ternary_inside_an_argument_list_parses_left_to_right() {
    let source = "pick(flag ? 1 : 2, 3)\n";
    let (program, _parser) = parse_ok(source);
    let statements = match &program {
        emberscript::syntax::ast::Node::Block { statements, .. } => statements,
        other => panic!("expected a block, got {other:?}"),
    };
    match &statements[0] {
        emberscript::syntax::ast::Node::Call { args, .. } => {
            assert_eq!(args.len(), 2);
            assert!(matches!(args[0], emberscript::syntax::ast::Node::Ternary { .. }));
        }
        other => panic!("expected a call with two args, got {other:?}"),
    }
}
