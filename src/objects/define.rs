//! Defining, aliasing, undefining, removing, and the visibility/naming
//! operations spec.md §4.1 groups under "Aliasing, undefining, removing" and
//! "Visibility", plus the Section-B features this crate supplements from
//! `module_object.cpp` (`instance_method`, `const_get`, `constants`,
//! `private_constant`/`public_constant`/`deprecate_constant`,
//! `does_include_module?`).

use std::rc::Rc;

use crate::diagnostics::Diagnostic;
use crate::syntax::ast::Node;
use crate::syntax::interner::{Interner, Symbol};

use super::errors;
use super::handle::ModuleRef;
use super::lookup::find_method;
use super::method::{Arity, Method, MethodBody, MethodInfo, MethodRef, NativeFn};
use super::module::{self, Env};
use super::value::Value;
use super::visibility::Visibility;

/// What `define_method` was actually handed: a closure body, a native
/// function, or an existing bound method being rebound under a new name
/// (Ruby's `define_method(:name, existing_method)`).
pub enum DefineMethodSource {
    Closure { params: Vec<Symbol>, body: Rc<Node> },
    Native(NativeFn, Arity),
    Bound(MethodRef),
}

fn ensure_singleton_class(module: &ModuleRef) -> ModuleRef {
    if let Some(singleton) = module.borrow().singleton_class.clone() {
        return singleton;
    }
    let singleton = ModuleRef::new(super::module::Module::new_class(None));
    module.borrow_mut().singleton_class = Some(singleton.clone());
    singleton
}

/// Inserts `method` under `name` in `module`'s own table with `visibility`,
/// without consulting `module_function_mode` — the primitive `alias` and
/// the name-only visibility setters use this directly (spec.md §4.1:
/// `alias` "define `new` with the same `method` and the same visibility",
/// not mirrored to the singleton class).
fn store_method(module: &ModuleRef, name: Symbol, method: MethodRef, visibility: Visibility) {
    module
        .borrow_mut()
        .methods
        .insert(name, MethodInfo::Defined { visibility, method });
}

/// `define_method(name, fn|closure)` through the simple arity+body overload
/// (spec.md §4.1 "define_method"). Mirrors onto the singleton class when
/// `module_function_mode` is set.
pub fn define_method_body(module: &ModuleRef, name: Symbol, body: MethodBody, arity: Arity) -> MethodRef {
    let method = Rc::new(Method {
        name,
        owner: module.clone(),
        body,
        arity,
    });
    let visibility = module.borrow().method_visibility;
    store_method(module, name, method.clone(), visibility);
    if module.borrow().module_function_mode {
        let singleton = ensure_singleton_class(module);
        store_method(&singleton, name, method.clone(), Visibility::Public);
    }
    method
}

/// The dynamic `define_method(name, value)` overload (spec.md §4.1,
/// original's `ModuleObject::define_method(Env*, Value, Value, Block*)`):
/// validates a rebound `Method`/`UnboundMethod`'s owner before accepting it.
pub fn define_method_from(
    module: &ModuleRef,
    name: Symbol,
    source: DefineMethodSource,
    interner: &Interner,
    root: Option<&ModuleRef>,
) -> Result<MethodRef, Diagnostic> {
    match source {
        DefineMethodSource::Closure { params, body } => Ok(define_method_body(
            module,
            name,
            MethodBody::Closure {
                env: module.clone(),
                params,
                body,
            },
            Arity(0),
        )),
        DefineMethodSource::Native(f, arity) => Ok(define_method_body(module, name, MethodBody::Native(f), arity)),
        DefineMethodSource::Bound(existing) => {
            let owner = existing.owner.clone();
            if !owner.borrow().is_class {
                // Singleton-method owners may not be rebound to a different
                // class (spec.md §4.1 "define_method"): a singleton class
                // belongs to exactly one object, so "ancestor of module"
                // doesn't apply — only rebinding onto that same owner is ok.
                if !ModuleRef::ptr_eq(&owner, module) {
                    return Err(errors::bind_singleton_to_different_class());
                }
            } else if !(ModuleRef::ptr_eq(&owner, module) || module::is_subclass_of(module, &owner)) {
                return Err(errors::bind_to_non_subclass(&module::inspect_str(&owner, interner, root)));
            }
            Ok(define_method_body(module, name, existing.body.clone(), existing.arity))
        }
    }
}

/// `alias(new, old)` (spec.md §4.1 "Aliasing, undefining, removing").
pub fn alias(
    module: &ModuleRef,
    new_name: Symbol,
    old_name: Symbol,
    interner: &Interner,
    root: Option<&ModuleRef>,
) -> Result<(), Diagnostic> {
    let (info, _found_in) =
        find_method(module, old_name, None).ok_or_else(|| errors::undefined_method(old_name, module, interner, root))?;
    if !info.is_defined() {
        return Err(errors::undefined_method(old_name, module, interner, root));
    }
    let method = info.method().expect("checked is_defined above").clone();
    store_method(module, new_name, method, info.visibility());
    Ok(())
}

/// `remove_method(name)`: must exist in `module`'s own table; does not mask
/// inherited definitions.
pub fn remove_method(module: &ModuleRef, name: Symbol, interner: &Interner, root: Option<&ModuleRef>) -> Result<(), Diagnostic> {
    let existed = module.borrow_mut().methods.remove(&name).is_some();
    if existed {
        Ok(())
    } else {
        Err(Diagnostic::name_error(format!(
            "method `{}' not defined in {}",
            interner.resolve(name),
            module::inspect_str(module, interner, root)
        )))
    }
}

/// `undef_method(name)`: the method must be defined anywhere reachable;
/// writes a sentinel `Undefined` into `module`'s own table, masking every
/// inherited definition (I3).
pub fn undef_method(module: &ModuleRef, name: Symbol, interner: &Interner, root: Option<&ModuleRef>) -> Result<(), Diagnostic> {
    let (info, _) =
        find_method(module, name, None).ok_or_else(|| errors::undefined_method(name, module, interner, root))?;
    if !info.is_defined() {
        return Err(errors::undefined_method(name, module, interner, root));
    }
    module
        .borrow_mut()
        .methods
        .insert(name, MethodInfo::Undefined { visibility: Visibility::Public });
    Ok(())
}

/// `private`/`protected`/`public` with no arguments: steer subsequent
/// definitions.
pub fn set_default_visibility(module: &ModuleRef, visibility: Visibility) {
    let mut m = module.borrow_mut();
    m.method_visibility = visibility;
    m.module_function_mode = false;
}

/// `private`/`protected`/`public` with explicit names: re-store each
/// existing method under the requested visibility without moving it.
pub fn set_method_visibility(
    module: &ModuleRef,
    names: &[Symbol],
    visibility: Visibility,
    interner: &Interner,
    root: Option<&ModuleRef>,
) -> Result<(), Diagnostic> {
    for &name in names {
        let (info, _) =
            find_method(module, name, None).ok_or_else(|| errors::undefined_method(name, module, interner, root))?;
        if !info.is_defined() {
            return Err(errors::undefined_method(name, module, interner, root));
        }
        let method = info.method().expect("checked is_defined above").clone();
        store_method(module, name, method, visibility);
    }
    Ok(())
}

/// `module_function` (spec.md §4.1): `TypeError` on a class; no-arg form
/// sets the two orthogonal flags; the named form mirrors each method onto
/// the singleton class and marks the instance-side copy `Private`.
pub fn module_function(module: &ModuleRef, names: &[Symbol], interner: &Interner, root: Option<&ModuleRef>) -> Result<(), Diagnostic> {
    if module.borrow().is_class {
        return Err(errors::module_function_on_class());
    }
    if names.is_empty() {
        let mut m = module.borrow_mut();
        m.method_visibility = Visibility::Private;
        m.module_function_mode = true;
        return Ok(());
    }
    for &name in names {
        let (info, _) =
            find_method(module, name, None).ok_or_else(|| errors::undefined_method(name, module, interner, root))?;
        if !info.is_defined() {
            return Err(errors::undefined_method(name, module, interner, root));
        }
        let method = info.method().expect("checked is_defined above").clone();
        let singleton = ensure_singleton_class(module);
        store_method(&singleton, name, method.clone(), Visibility::Public);
        store_method(module, name, method, Visibility::Private);
    }
    Ok(())
}

/// `instance_method(name)`: full lookup, raising if undefined.
pub fn instance_method(module: &ModuleRef, name: Symbol, interner: &Interner, root: Option<&ModuleRef>) -> Result<MethodRef, Diagnostic> {
    let (info, _) =
        find_method(module, name, None).ok_or_else(|| errors::undefined_method(name, module, interner, root))?;
    info.method()
        .cloned()
        .ok_or_else(|| errors::undefined_method(name, module, interner, root))
}

/// `public_instance_method(name)`: like `instance_method`, but raises
/// `NameError` when the found method isn't `Public`.
pub fn public_instance_method(module: &ModuleRef, name: Symbol, interner: &Interner, root: Option<&ModuleRef>) -> Result<MethodRef, Diagnostic> {
    let (info, _) =
        find_method(module, name, None).ok_or_else(|| errors::undefined_method(name, module, interner, root))?;
    match info.visibility() {
        Visibility::Public => info
            .method()
            .cloned()
            .ok_or_else(|| errors::undefined_method(name, module, interner, root)),
        other => Err(errors::method_visibility_violation(name, module, other, interner, root)),
    }
}

/// `const_get(name)`: a direct, non-searching probe of `module`'s own
/// constant table only — never raises, never walks a chain.
pub fn const_get(module: &ModuleRef, name: Symbol) -> Option<Value> {
    module.borrow().constants.get(&name).map(|c| c.value.clone())
}

/// `constants(inherit)`: own constant names, plus (when `inherit`, the
/// default) names reachable through the inclusion chain — *not* the
/// superclass chain, matching the original's `ModuleObject::constants`.
pub fn constants(module: &ModuleRef, inherit: bool) -> Vec<Symbol> {
    let mut names: Vec<Symbol> = module.borrow().constants.keys().copied().collect();
    if inherit {
        for m in module.borrow().included_modules.iter() {
            if !ModuleRef::ptr_eq(m, module) {
                names.extend(constants(m, inherit));
            }
        }
    }
    names
}

fn require_constant_mut(
    module: &ModuleRef,
    name: Symbol,
    interner: &Interner,
    root: Option<&ModuleRef>,
    apply: impl FnOnce(&mut super::constant::Constant),
) -> Result<(), Diagnostic> {
    let mut m = module.borrow_mut();
    match m.constants.get_mut(&name) {
        Some(constant) => {
            apply(constant);
            Ok(())
        }
        None => Err(errors::constant_not_defined(name, module, interner, root)),
    }
}

pub fn private_constant(module: &ModuleRef, names: &[Symbol], interner: &Interner, root: Option<&ModuleRef>) -> Result<(), Diagnostic> {
    for &name in names {
        require_constant_mut(module, name, interner, root, |c| c.private = true)?;
    }
    Ok(())
}

pub fn public_constant(module: &ModuleRef, names: &[Symbol], interner: &Interner, root: Option<&ModuleRef>) -> Result<(), Diagnostic> {
    for &name in names {
        require_constant_mut(module, name, interner, root, |c| c.private = false)?;
    }
    Ok(())
}

pub fn deprecate_constant(module: &ModuleRef, names: &[Symbol], interner: &Interner, root: Option<&ModuleRef>) -> Result<(), Diagnostic> {
    for &name in names {
        require_constant_mut(module, name, interner, root, |c| c.deprecated = true)?;
    }
    Ok(())
}

/// `does_include_module?(other)`: `TypeError` on a non-module argument
/// (spec.md §7); otherwise walks the inclusion closure and the superclass
/// chain recursively (unlike `is_subclass_of`, which checks only one level
/// of each module's own chain).
pub fn does_include_module(module: &ModuleRef, candidate: &Value) -> Result<bool, Diagnostic> {
    let target = candidate.as_module().ok_or_else(errors::not_a_module_for_does_include)?;
    Ok(does_include_module_ref(module, target))
}

fn does_include_module_ref(module: &ModuleRef, target: &ModuleRef) -> bool {
    for m in module.borrow().included_modules.iter() {
        if ModuleRef::ptr_eq(module, m) {
            continue;
        }
        if ModuleRef::ptr_eq(m, target) {
            return true;
        }
        if does_include_module_ref(m, target) {
            return true;
        }
    }
    if let Some(superclass) = module.borrow().superclass.clone() {
        if does_include_module_ref(&superclass, target) {
            return true;
        }
    }
    false
}

/// `module_eval`/`module_exec` (spec.md §6): swap in the body env, run the
/// block with visibility state saved/restored, and return its result.
/// `ArgumentError` without a block for `module_eval`, `LocalJumpError` for
/// `module_exec` (spec.md §7).
pub fn module_eval<T>(module: &ModuleRef, block: Option<impl FnOnce(&ModuleRef) -> T>) -> Result<T, Diagnostic> {
    let Some(block) = block else {
        return Err(errors::module_eval_without_block());
    };
    Ok(run_with_saved_visibility(module, block))
}

pub fn module_exec<T>(module: &ModuleRef, block: Option<impl FnOnce(&ModuleRef) -> T>) -> Result<T, Diagnostic> {
    let Some(block) = block else {
        return Err(errors::module_exec_without_block());
    };
    Ok(run_with_saved_visibility(module, block))
}

fn run_with_saved_visibility<T>(module: &ModuleRef, block: impl FnOnce(&ModuleRef) -> T) -> T {
    let (old_visibility, old_module_function) = {
        let m = module.borrow();
        (m.method_visibility, m.module_function_mode)
    };
    let result = block(module);
    let mut m = module.borrow_mut();
    m.method_visibility = old_visibility;
    m.module_function_mode = old_module_function;
    result
}

/// Captures the lexical environment a module body runs under, for later
/// replay by `module_eval`/`module_exec` (spec.md §3 `env`).
pub fn capture_env(module: &ModuleRef, lexical_scope: Vec<ModuleRef>) {
    module.borrow_mut().env = Some(Env { lexical_scope });
}
