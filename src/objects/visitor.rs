//! `visit_children` (spec.md §4.1): the hook a tracing garbage collector
//! would call to find every `ModuleRef`/`Value` a `Module` keeps alive,
//! grounded on `module_object.cpp`'s `visit_children` (owner, superclass,
//! every constant key+value, every method key+body-if-defined, every
//! class-var pair, every included module, the singleton class, and the
//! captured lexical `env`).

use super::handle::ModuleRef;
use super::method::MethodBody;
use super::module::Module;
use super::value::Value;

/// Receives each reachable `ModuleRef` and `Value` a module holds. This
/// crate has no evaluator/heap of its own, so `visit_children` just drives
/// a caller-supplied visitor rather than marking anything itself.
pub trait Visitor {
    fn visit_module(&mut self, module: &ModuleRef);
    fn visit_value(&mut self, value: &Value);
}

pub fn visit_children(module: &Module, visitor: &mut impl Visitor) {
    if let Some(owner) = &module.owner {
        visitor.visit_module(owner);
    }
    if let Some(superclass) = &module.superclass {
        visitor.visit_module(superclass);
    }
    for included in &module.included_modules {
        visitor.visit_module(included);
    }
    if let Some(singleton) = &module.singleton_class {
        visitor.visit_module(singleton);
    }
    for constant in module.constants.values() {
        visitor.visit_value(&constant.value);
    }
    for value in module.class_vars.values() {
        visitor.visit_value(value);
    }
    for info in module.methods.values() {
        if let Some(method) = info.method() {
            if let MethodBody::Closure { env, .. } = &method.body {
                visitor.visit_module(env);
            }
        }
    }
    if let Some(env) = &module.env {
        for scope in &env.lexical_scope {
            visitor.visit_module(scope);
        }
    }
}
