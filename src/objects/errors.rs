//! Raise-site helpers building [`Diagnostic`]s with the exact message shapes
//! from `module_object.cpp` (spec.md §7, "Error Handling Design").

use crate::diagnostics::Diagnostic;
use crate::syntax::interner::{Interner, Symbol};

use super::handle::ModuleRef;
use super::module::inspect_str;
use super::visibility::Visibility;

pub fn undefined_method(name: Symbol, module: &ModuleRef, interner: &Interner, root: Option<&ModuleRef>) -> Diagnostic {
    let noun = if module.borrow().is_class { "class" } else { "module" };
    Diagnostic::name_error(format!(
        "undefined method `{}' for {} `{}'",
        interner.resolve(name),
        noun,
        inspect_str(module, interner, root)
    ))
}

/// The message `public_instance_method` raises when the found method isn't
/// `Public` (spec.md §7 "NameError" + original's
/// `ModuleObject::public_instance_method`).
pub fn method_visibility_violation(
    name: Symbol,
    module: &ModuleRef,
    visibility: Visibility,
    interner: &Interner,
    root: Option<&ModuleRef>,
) -> Diagnostic {
    let noun = if module.borrow().is_class { "class" } else { "module" };
    let adjective = match visibility {
        Visibility::Protected => "protected",
        Visibility::Private => "private",
        Visibility::Public => unreachable!("public methods never violate visibility"),
    };
    Diagnostic::name_error(format!(
        "method `{}' for {} `{}' is {}",
        interner.resolve(name),
        noun,
        inspect_str(module, interner, root),
        adjective
    ))
}

pub fn undefined_constant(message: impl Into<String>) -> Diagnostic {
    Diagnostic::name_error(message.into())
}

pub fn invalid_class_variable_name(name: Symbol, interner: &Interner) -> Diagnostic {
    Diagnostic::name_error(format!(
        "`{}' is not allowed as a class variable name",
        interner.resolve(name)
    ))
}

pub fn constant_not_defined(name: Symbol, module: &ModuleRef, interner: &Interner, root: Option<&ModuleRef>) -> Diagnostic {
    Diagnostic::name_error(format!(
        "constant {}::{} not defined",
        inspect_str(module, interner, root),
        interner.resolve(name)
    ))
}

pub fn module_function_on_class() -> Diagnostic {
    Diagnostic::type_error("module_function must be called for modules")
}

pub fn not_a_module_for_does_include() -> Diagnostic {
    Diagnostic::type_error("wrong argument type (expected Module)")
}

pub fn define_method_without_body() -> Diagnostic {
    Diagnostic::argument_error("tried to create Proc object without a block")
}

pub fn module_eval_without_block() -> Diagnostic {
    Diagnostic::argument_error("module_eval requires a block")
}

pub fn module_exec_without_block() -> Diagnostic {
    Diagnostic::local_jump_error("no block given (yield)")
}

pub fn bind_to_non_subclass(owner_inspect: &str) -> Diagnostic {
    Diagnostic::type_error(format!("bind argument must be a subclass of {owner_inspect}"))
}

pub fn bind_singleton_to_different_class() -> Diagnostic {
    Diagnostic::type_error("can't bind singleton method to a different class")
}

pub fn define_method_wrong_argument_type(got: &str) -> Diagnostic {
    Diagnostic::type_error(format!("wrong argument type {got} (expected Proc/Method/UnboundMethod)"))
}
