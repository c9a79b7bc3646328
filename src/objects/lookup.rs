//! `find_method` and `const_find`, the two lookup engines spec.md §2 calls
//! out as the largest single piece of the object model (≈25% of the whole).

use crate::diagnostics::Diagnostic;
use crate::syntax::interner::{Interner, Symbol};

use super::constant::Constant;
use super::errors;
use super::handle::ModuleRef;
use super::method::{MethodInfo, MethodRef};
use super::module;
use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstLookupSearchMode {
    Strict,
    NotStrict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstLookupFailureMode {
    Raise,
    Null,
}

/// `find_method(method_name, after_method?)` (spec.md §4.1 "Method lookup").
/// Returns the `MethodInfo` and the module it was found in.
pub fn find_method(module: &ModuleRef, name: Symbol, after_method: Option<MethodRef>) -> Option<(MethodInfo, ModuleRef)> {
    let mut marker = after_method;
    find_method_inner(module, name, &mut marker)
}

fn probe_own_table(module: &ModuleRef, name: Symbol, marker: &mut Option<MethodRef>) -> Option<(MethodInfo, ModuleRef)> {
    let info = module.borrow().methods.get(&name).cloned()?;
    resolve_candidate(info, module.clone(), marker)
}

/// Applies the `after_method` skip/clear/return rule to one candidate match
/// (spec.md §4.1 "`after_method` semantics"). An `Undefined` entry always
/// returns immediately (I3) regardless of the marker.
fn resolve_candidate(info: MethodInfo, found_in: ModuleRef, marker: &mut Option<MethodRef>) -> Option<(MethodInfo, ModuleRef)> {
    if !info.is_defined() {
        return Some((info, found_in));
    }
    let method = info.method().expect("checked is_defined above").clone();
    if marker.as_ref().is_some_and(|m| std::rc::Rc::ptr_eq(m, &method)) {
        *marker = None;
        None
    } else if marker.is_none() {
        Some((info, found_in))
    } else {
        None
    }
}

fn find_method_inner(module: &ModuleRef, name: Symbol, marker: &mut Option<MethodRef>) -> Option<(MethodInfo, ModuleRef)> {
    let included_empty = module.borrow().included_modules.is_empty();
    if included_empty {
        if let Some(found) = probe_own_table(module, name, marker) {
            return Some(found);
        }
    }

    let included = module.borrow().included_modules.clone();
    for m in &included {
        let found = if ModuleRef::ptr_eq(m, module) {
            probe_own_table(m, name, marker)
        } else {
            find_method_inner(m, name, marker)
        };
        if let Some(found) = found {
            return Some(found);
        }
    }

    let superclass = module.borrow().superclass.clone();
    superclass.and_then(|sup| find_method_inner(&sup, name, marker))
}

fn check_valid(
    constant: &Constant,
    found_in: &ModuleRef,
    name: Symbol,
    interner: &Interner,
    mode: ConstLookupSearchMode,
    root: Option<&ModuleRef>,
    warnings: &mut Vec<Diagnostic>,
) -> Result<(), Diagnostic> {
    let parent = found_in.borrow().owner.clone();
    let parent_is_root = parent.as_ref().is_some_and(|p| root.is_some_and(|r| ModuleRef::ptr_eq(r, p)));
    let has_namespaced_parent = parent.is_some() && !parent_is_root;

    if constant.private && mode == ConstLookupSearchMode::Strict {
        let message = if let Some(parent) = &parent {
            if has_namespaced_parent {
                format!(
                    "private constant {}::{} referenced",
                    module::inspect_str(parent, interner, root),
                    interner.resolve(name)
                )
            } else {
                format!("private constant ::{} referenced", interner.resolve(name))
            }
        } else {
            format!("private constant ::{} referenced", interner.resolve(name))
        };
        return Err(Diagnostic::name_error(message));
    }

    if constant.deprecated {
        let message = if has_namespaced_parent {
            format!(
                "constant {}::{} is deprecated",
                module::inspect_str(parent.as_ref().unwrap(), interner, root),
                interner.resolve(name)
            )
        } else {
            format!("constant ::{} is deprecated", interner.resolve(name))
        };
        warnings.push(Diagnostic::warning(message));
    }

    Ok(())
}

/// `const_find(name, mode, failure)` (spec.md §4.1 "Constant lookup").
/// `root` stands in for "the root/Object namespace" that the original
/// implementation reads off a process-wide `GlobalEnv`; here it is passed
/// explicitly by the caller, keeping the object model free of global state.
pub fn const_find(
    module: &ModuleRef,
    name: Symbol,
    interner: &Interner,
    mode: ConstLookupSearchMode,
    failure: ConstLookupFailureMode,
    root: Option<&ModuleRef>,
    warnings: &mut Vec<Diagnostic>,
) -> Result<Option<Value>, Diagnostic> {
    let is_root = |m: &ModuleRef| root.is_some_and(|r| ModuleRef::ptr_eq(r, m));

    // Phase 1 (NotStrict only): walk the owner chain (lexical nesting),
    // stopping before the root namespace.
    if mode == ConstLookupSearchMode::NotStrict {
        let mut search_parent = Some(module.clone());
        loop {
            let Some(p) = search_parent.clone() else { break };
            if is_root(&p) {
                break;
            }
            if let Some(constant) = p.borrow().constants.get(&name).cloned() {
                check_valid(&constant, &p, name, interner, mode, root, warnings)?;
                return Ok(Some(constant.value));
            }
            search_parent = p.borrow().owner.clone();
        }
    }

    // Phase 2: the included-modules closure, breadth-first, excluding self.
    let mut to_search: Vec<ModuleRef> = module
        .borrow()
        .included_modules
        .iter()
        .filter(|m| !ModuleRef::ptr_eq(m, module))
        .cloned()
        .collect();
    let mut i = 0;
    while i < to_search.len() {
        let m = to_search[i].clone();
        if let Some(constant) = m.borrow().constants.get(&name).cloned() {
            check_valid(&constant, &m, name, interner, mode, root, warnings)?;
            return Ok(Some(constant.value));
        }
        for sub in m.borrow().included_modules.iter() {
            if !ModuleRef::ptr_eq(sub, &m) && !ModuleRef::ptr_eq(sub, module) {
                to_search.push(sub.clone());
            }
        }
        i += 1;
    }

    // Phase 3: the superclass chain, stopping before the root namespace.
    let mut search_parent = Some(module.clone());
    while let Some(p) = search_parent.clone() {
        if let Some(constant) = p.borrow().constants.get(&name).cloned() {
            check_valid(&constant, &p, name, interner, mode, root, warnings)?;
            return Ok(Some(constant.value));
        }
        let next = p.borrow().superclass.clone();
        search_parent = match next {
            Some(n) if !is_root(&n) => Some(n),
            _ => None,
        };
    }

    // Phase 4 (NotStrict only): the root namespace itself.
    if mode == ConstLookupSearchMode::NotStrict {
        if let Some(r) = root {
            if !ModuleRef::ptr_eq(r, module) {
                if let Some(constant) = r.borrow().constants.get(&name).cloned() {
                    check_valid(&constant, r, name, interner, mode, root, warnings)?;
                    return Ok(Some(constant.value));
                }
            }
        }
    }

    match failure {
        ConstLookupFailureMode::Null => Ok(None),
        ConstLookupFailureMode::Raise => {
            let message = match mode {
                ConstLookupSearchMode::Strict => format!(
                    "uninitialized constant {}::{}",
                    module::inspect_str(module, interner, root),
                    interner.resolve(name)
                ),
                ConstLookupSearchMode::NotStrict => {
                    format!("uninitialized constant {}", interner.resolve(name))
                }
            };
            Err(errors::undefined_constant(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::method::{Arity, Method, MethodBody};
    use crate::objects::module::{self, Module};
    use crate::objects::visibility::Visibility;
    use std::rc::Rc;

    fn native_method(owner: &ModuleRef, name: Symbol) -> MethodRef {
        Rc::new(Method {
            name,
            owner: owner.clone(),
            body: MethodBody::Native(Rc::new(|_| Ok(Value::Nil))),
            arity: Arity(0),
        })
    }

    fn define(module: &ModuleRef, name: Symbol, visibility: Visibility) -> MethodRef {
        let method = native_method(module, name);
        module
            .borrow_mut()
            .methods
            .insert(name, MethodInfo::Defined { visibility, method: method.clone() });
        method
    }

    #[test]
    fn find_method_walks_superclass_chain_when_absent_locally() {
        let mut interner = Interner::new();
        let name = interner.intern("greet");
        let object = ModuleRef::new(Module::new_class(None));
        let base = ModuleRef::new(Module::new_class(Some(object.clone())));
        let method = define(&object, name, Visibility::Public);
        let (info, found_in) = find_method(&base, name, None).unwrap();
        assert!(ModuleRef::ptr_eq(&found_in, &object));
        assert!(std::rc::Rc::ptr_eq(info.method().unwrap(), &method));
    }

    #[test]
    fn find_method_prefers_an_included_module_over_the_superclass() {
        let mut interner = Interner::new();
        let name = interner.intern("greet");
        let object = ModuleRef::new(Module::new_class(None));
        define(&object, name, Visibility::Public);
        let base = ModuleRef::new(Module::new_class(Some(object.clone())));
        let mixin = ModuleRef::new(Module::new_module());
        let mixin_method = define(&mixin, name, Visibility::Public);
        module::include_once(&base, mixin.clone());
        let (info, found_in) = find_method(&base, name, None).unwrap();
        assert!(ModuleRef::ptr_eq(&found_in, &mixin));
        assert!(std::rc::Rc::ptr_eq(info.method().unwrap(), &mixin_method));
    }

    #[test]
    fn after_method_marker_skips_every_match_up_to_and_including_the_marked_method() {
        let mut interner = Interner::new();
        let name = interner.intern("greet");
        let object = ModuleRef::new(Module::new_class(None));
        let object_method = define(&object, name, Visibility::Public);
        let base = ModuleRef::new(Module::new_class(Some(object.clone())));
        let base_method = define(&base, name, Visibility::Public);
        let (info, _) = find_method(&base, name, Some(base_method.clone())).unwrap();
        assert!(std::rc::Rc::ptr_eq(info.method().unwrap(), &object_method));
    }

    #[test]
    fn undefined_sentinel_masks_inherited_definitions() {
        let mut interner = Interner::new();
        let name = interner.intern("greet");
        let object = ModuleRef::new(Module::new_class(None));
        define(&object, name, Visibility::Public);
        let base = ModuleRef::new(Module::new_class(Some(object.clone())));
        base.borrow_mut()
            .methods
            .insert(name, MethodInfo::Undefined { visibility: Visibility::Public });
        let (info, found_in) = find_method(&base, name, None).unwrap();
        assert!(!info.is_defined());
        assert!(ModuleRef::ptr_eq(&found_in, &base));
    }

    #[test]
    fn const_find_not_strict_walks_lexical_owner_chain_before_superclass() {
        let mut interner = Interner::new();
        let name = interner.intern("LIMIT");
        let root = ModuleRef::new(Module::new_class(None));
        let outer = ModuleRef::new(Module::new_class(Some(root.clone())));
        outer.borrow_mut().owner = Some(root.clone());
        module::const_set(&outer, name, "LIMIT", Value::Integer(10));
        let inner = ModuleRef::new(Module::new_class(Some(root.clone())));
        inner.borrow_mut().owner = Some(outer.clone());

        let mut warnings = Vec::new();
        let found = const_find(
            &inner,
            name,
            &interner,
            ConstLookupSearchMode::NotStrict,
            ConstLookupFailureMode::Raise,
            Some(&root),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(found, Some(Value::Integer(10)));
    }

    #[test]
    fn const_find_raises_name_error_when_strict_and_missing() {
        let mut interner = Interner::new();
        let name = interner.intern("MISSING");
        let root = ModuleRef::new(Module::new_class(None));
        let klass = ModuleRef::new(Module::new_class(Some(root.clone())));
        let mut warnings = Vec::new();
        let result = const_find(
            &klass,
            name,
            &interner,
            ConstLookupSearchMode::Strict,
            ConstLookupFailureMode::Raise,
            Some(&root),
            &mut warnings,
        );
        assert!(result.is_err());
    }

    #[test]
    fn const_find_null_failure_mode_returns_none_instead_of_raising() {
        let mut interner = Interner::new();
        let name = interner.intern("MISSING");
        let root = ModuleRef::new(Module::new_class(None));
        let klass = ModuleRef::new(Module::new_class(Some(root.clone())));
        let mut warnings = Vec::new();
        let result = const_find(
            &klass,
            name,
            &interner,
            ConstLookupSearchMode::NotStrict,
            ConstLookupFailureMode::Null,
            Some(&root),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn const_find_strict_raises_on_a_private_constant() {
        let mut interner = Interner::new();
        let name = interner.intern("SECRET");
        let root = ModuleRef::new(Module::new_class(None));
        let klass = ModuleRef::new(Module::new_class(Some(root.clone())));
        klass.borrow_mut().owner = Some(root.clone());
        module::const_set(&klass, name, "SECRET", Value::Integer(1));
        klass.borrow_mut().constants.get_mut(&name).unwrap().private = true;

        let mut warnings = Vec::new();
        let result = const_find(
            &klass,
            name,
            &interner,
            ConstLookupSearchMode::Strict,
            ConstLookupFailureMode::Raise,
            Some(&root),
            &mut warnings,
        );
        assert!(result.is_err());
    }
}
