//! `Module` — the shared data structure backing both modules and classes
//! (spec.md §3 "Module (also the base of Class)").
//!
//! A `Class` is just a `Module` with `is_class = true` and (usually) a
//! `superclass`; this mirrors the original implementation's `ClassObject`
//! inheriting from `ModuleObject` without introducing a parallel Rust type.

use std::collections::HashMap;

use crate::diagnostics::Diagnostic;
use crate::syntax::interner::{Interner, Symbol};

use super::constant::Constant;
use super::errors;
use super::handle::ModuleRef;
use super::method::MethodInfo;
use super::value::Value;
use super::visibility::Visibility;

/// The lexical environment captured when a module body is first entered,
/// replayed on re-entry by `module_eval`/`module_exec` (spec.md §3 `env`,
/// §6 "module_eval/module_exec").
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub lexical_scope: Vec<ModuleRef>,
}

pub struct Module {
    pub name: Option<String>,
    pub owner: Option<ModuleRef>,
    pub superclass: Option<ModuleRef>,
    pub included_modules: Vec<ModuleRef>,
    pub constants: HashMap<Symbol, Constant>,
    pub methods: HashMap<Symbol, MethodInfo>,
    pub class_vars: HashMap<Symbol, Value>,
    pub method_visibility: Visibility,
    pub module_function_mode: bool,
    pub singleton_class: Option<ModuleRef>,
    pub env: Option<Env>,
    /// Not in spec.md's field list verbatim, but required to pick the right
    /// noun ("class"/"module") in every message `module_object.cpp` raises,
    /// and to gate `module_function`'s class-only `TypeError` (spec.md §7).
    pub is_class: bool,
}

impl Module {
    pub fn new_module() -> Self {
        Self {
            name: None,
            owner: None,
            superclass: None,
            included_modules: Vec::new(),
            constants: HashMap::new(),
            methods: HashMap::new(),
            class_vars: HashMap::new(),
            method_visibility: Visibility::Public,
            module_function_mode: false,
            singleton_class: None,
            env: None,
            is_class: false,
        }
    }

    pub fn new_class(superclass: Option<ModuleRef>) -> Self {
        Self {
            superclass,
            is_class: true,
            ..Self::new_module()
        }
    }
}

/// `include(M)` on self `S` (spec.md §4.1 "Inclusion and prepending"). The
/// self-insertion convention (I2) means an empty chain becomes `[S, M]`.
pub fn include_once(this: &ModuleRef, module: ModuleRef) {
    let mut this_mut = this.borrow_mut();
    if this_mut.included_modules.is_empty() {
        this_mut.included_modules.push(this.clone());
        this_mut.included_modules.push(module);
        return;
    }
    let this_index = this_mut
        .included_modules
        .iter()
        .position(|m| ModuleRef::ptr_eq(m, this))
        .expect("I2: self always appears in its own non-empty chain");
    if this_mut.included_modules.iter().any(|m| ModuleRef::ptr_eq(m, &module)) {
        return;
    }
    this_mut.included_modules.insert(this_index + 1, module);
}

/// `include` accepts one or more modules applied in reverse argument order
/// (spec.md §4.1, §5 "textual order `include A, B, C` yields lookup order
/// A → B → C").
pub fn include<I>(this: &ModuleRef, modules: I)
where
    I: IntoIterator<Item = ModuleRef>,
    I::IntoIter: DoubleEndedIterator,
{
    for module in modules.into_iter().rev() {
        include_once(this, module);
    }
}

pub fn prepend_once(this: &ModuleRef, module: ModuleRef) {
    let mut this_mut = this.borrow_mut();
    if this_mut.included_modules.is_empty() {
        this_mut.included_modules.push(module);
        this_mut.included_modules.push(this.clone());
        return;
    }
    if this_mut.included_modules.iter().any(|m| ModuleRef::ptr_eq(m, &module)) {
        return;
    }
    this_mut.included_modules.insert(0, module);
}

pub fn prepend<I>(this: &ModuleRef, modules: I)
where
    I: IntoIterator<Item = ModuleRef>,
    I::IntoIter: DoubleEndedIterator,
{
    for module in modules.into_iter().rev() {
        prepend_once(this, module);
    }
}

/// `const_set(name, value)` (spec.md §4.1 "Constant assignment", I5). Takes
/// the constant's resolved spelling (not just its `Symbol`) because I5 also
/// names the target module using that same spelling; `interner.resolve`
/// happens once at the call site rather than threading an `Interner`
/// through every helper here.
pub fn const_set(this: &ModuleRef, name: Symbol, spelling: &str, value: Value) {
    this.borrow_mut().constants.insert(name, Constant::new(name, value.clone()));

    if let Value::Module(target) = &value {
        let already_owned = target.borrow().owner.is_some();
        if !already_owned {
            target.borrow_mut().owner = Some(this.clone());
            if let Some(singleton) = target.borrow().singleton_class.clone() {
                singleton.borrow_mut().owner = Some(this.clone());
            }
        }
        name_module_from_constant_assignment(target, spelling);
    }
}

/// I5's naming half of `const_set`: when the assigned value is an unnamed
/// module, it and every nested singleton class acquire a derived name.
fn name_module_from_constant_assignment(target: &ModuleRef, spelling: &str) {
    if target.borrow().name.is_some() {
        return;
    }
    target.borrow_mut().name = Some(spelling.to_string());

    let mut class_name = spelling.to_string();
    let mut singleton = target.borrow().singleton_class.clone();
    while let Some(s) = singleton {
        class_name = format!("#<Class:{class_name}>");
        s.borrow_mut().name = Some(class_name.clone());
        singleton = s.borrow().singleton_class.clone();
    }
}

/// `cvar_get`/`cvar_set` (spec.md §4.1 "Class-variable propagation").
pub fn cvar_get(this: &ModuleRef, name: Symbol, interner: &Interner) -> Result<Option<Value>, Diagnostic> {
    require_cvar_name(name, interner)?;
    let mut current = Some(this.clone());
    while let Some(module) = current {
        if let Some(value) = module.borrow().class_vars.get(&name).cloned() {
            return Ok(Some(value));
        }
        current = module.borrow().superclass.clone();
    }
    Ok(None)
}

pub fn cvar_set(this: &ModuleRef, name: Symbol, value: Value, interner: &Interner) -> Result<(), Diagnostic> {
    require_cvar_name(name, interner)?;
    let mut current = Some(this.clone());
    while let Some(module) = current {
        if module.borrow().class_vars.contains_key(&name) {
            module.borrow_mut().class_vars.insert(name, value);
            return Ok(());
        }
        current = module.borrow().superclass.clone();
    }
    this.borrow_mut().class_vars.insert(name, value);
    Ok(())
}

fn require_cvar_name(name: Symbol, interner: &Interner) -> Result<(), Diagnostic> {
    let text = interner.resolve(name);
    if text.starts_with("@@") {
        Ok(())
    } else {
        Err(errors::invalid_class_variable_name(name, interner))
    }
}

/// `ancestors` (spec.md §4.1 "Ancestors and subclass testing").
pub fn ancestors(this: &ModuleRef) -> Vec<ModuleRef> {
    let mut out = Vec::new();
    let mut klass = Some(this.clone());
    while let Some(module) = klass {
        let included = module.borrow().included_modules.clone();
        if included.is_empty() {
            out.push(module.clone());
        } else {
            out.extend(included);
        }
        klass = module.borrow().superclass.clone();
    }
    out
}

/// `is_subclass_of(T)`: `T` is an ancestor only if it is strictly above
/// `self` (never `self` itself).
pub fn is_subclass_of(this: &ModuleRef, other: &ModuleRef) -> bool {
    if ModuleRef::ptr_eq(this, other) {
        return false;
    }
    let mut klass = Some(this.clone());
    while let Some(module) = klass {
        if let Some(superclass) = module.borrow().superclass.clone() {
            if ModuleRef::ptr_eq(&superclass, other) {
                return true;
            }
        }
        if module
            .borrow()
            .included_modules
            .iter()
            .any(|m| ModuleRef::ptr_eq(m, other))
        {
            return true;
        }
        klass = module.borrow().superclass.clone();
    }
    false
}

/// `inspect_str` (spec.md §4.1 "Naming and inspection"). `root` is the
/// "root namespace" (`Object` in the original) — owners equal to it are
/// never printed as a qualifying prefix.
pub fn inspect_str(this: &ModuleRef, interner: &Interner, root: Option<&ModuleRef>) -> String {
    let name = this.borrow().name.clone();
    if let Some(name) = name {
        let owner = this.borrow().owner.clone();
        match owner {
            Some(owner) if !root.is_some_and(|r| ModuleRef::ptr_eq(r, &owner)) => {
                format!("{}::{}", inspect_str(&owner, interner, root), name)
            }
            _ => name,
        }
    } else if this.borrow().is_class {
        format!("#<Class:0x{:016x}>", this.pointer_id())
    } else {
        format!("#<Module:0x{:016x}>", this.pointer_id())
    }
}
