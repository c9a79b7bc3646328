//! A tiny demo binary: parse a fixed snippet, pretty-print it, then wire a
//! handful of object-model operations together so the two subsystems can be
//! exercised end to end without an evaluator.

use emberscript::objects::{
    self, lookup, module, value::Value, visibility::Visibility, ModuleRef, Module,
};
use emberscript::syntax::parser::{printer, Parser};

fn main() {
    let source = "def area(width, height)\n  width * height\nend\narea(3, 4)\n";
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    if !parser.errors.is_empty() {
        for error in &parser.errors {
            eprintln!("{}", error.render());
        }
        std::process::exit(1);
    }
    println!("parsed and re-printed:\n{}", printer::print(&program, &parser.interner));

    let mut interner = emberscript::syntax::interner::Interner::new();
    let root = ModuleRef::new(Module::new_class(None));
    let shape = ModuleRef::new(Module::new_class(Some(root.clone())));
    let pi = interner.intern("PI");
    module::const_set(&root, pi, "PI", Value::Float(std::f64::consts::PI));

    let mut warnings = Vec::new();
    let found = lookup::const_find(
        &shape,
        pi,
        &interner,
        lookup::ConstLookupSearchMode::NotStrict,
        lookup::ConstLookupFailureMode::Raise,
        Some(&root),
        &mut warnings,
    )
    .expect("PI is reachable from Shape through the root namespace");
    println!("Shape sees root::PI = {found:?}");

    objects::define::set_default_visibility(&shape, Visibility::Private);
    println!("Shape's default method visibility is now {:?}", shape.borrow().method_visibility);
}
