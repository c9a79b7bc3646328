//! AST → source pretty-printer.
//!
//! Exists to exercise P7 (spec.md §8, "Testable Properties"): pretty-printing
//! an AST and re-parsing the result must yield a structurally identical
//! tree. To keep that property honest, every `Call` is always printed with
//! explicit parentheses — paren-less calls and parenthesized calls already
//! produce the same `Call` shape (spec.md §4.2), so round-tripping through
//! the parenthesized spelling is lossless.

use crate::syntax::ast::Node;
use crate::syntax::interner::Interner;

pub fn print(node: &Node, interner: &Interner) -> String {
    let mut out = String::new();
    write_node(node, interner, &mut out);
    out
}

fn write_node(node: &Node, interner: &Interner, out: &mut String) {
    match node {
        Node::Block { statements, .. } => {
            for (i, stmt) in statements.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                write_node(stmt, interner, out);
            }
        }
        Node::True { .. } => out.push_str("true"),
        Node::False { .. } => out.push_str("false"),
        Node::Nil { .. } => out.push_str("nil"),
        Node::IntegerLiteral { value, .. } => out.push_str(&value.to_string()),
        Node::FloatLiteral { value, .. } => out.push_str(&value.to_string()),
        Node::StringLiteral { value, .. } => {
            out.push('"');
            for c in value.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        }
        Node::Identifier { name, .. } => out.push_str(interner.resolve(*name)),
        Node::Assignment { target, value, .. } => {
            write_node(target, interner, out);
            out.push_str(" = ");
            write_node(value, interner, out);
        }
        Node::Call {
            receiver,
            method_name,
            args,
            ..
        } => {
            if let Some(receiver) = receiver {
                write_node(receiver, interner, out);
                out.push('.');
            }
            out.push_str(interner.resolve(*method_name));
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_node(arg, interner, out);
            }
            out.push(')');
        }
        Node::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            out.push_str("if ");
            write_node(condition, interner, out);
            out.push('\n');
            write_node(then_branch, interner, out);
            if let Some(else_branch) = else_branch {
                out.push_str("\nelse\n");
                write_node(else_branch, interner, out);
            }
            out.push_str("\nend");
        }
        Node::Ternary {
            condition,
            if_true,
            if_false,
            ..
        } => {
            write_node(condition, interner, out);
            out.push_str(" ? ");
            write_node(if_true, interner, out);
            out.push_str(" : ");
            write_node(if_false, interner, out);
        }
        Node::Def { name, params, body, .. } => {
            out.push_str("def ");
            out.push_str(interner.resolve(*name));
            out.push('(');
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(interner.resolve(*param));
            }
            out.push_str(")\n");
            write_node(body, interner, out);
            out.push_str("\nend");
        }
    }
}
