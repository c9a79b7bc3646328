//! End-to-end method-visibility scenarios: default visibility steering,
//! named re-visibility, `module_function`, and the accessor helpers that
//! enforce visibility at the boundary (spec.md §8).

use std::rc::Rc;

use emberscript::objects::{
    define,
    method::{Arity, Method, MethodBody, MethodInfo},
    module::Module,
    value::Value,
    visibility::Visibility,
    ModuleRef,
};
use emberscript::syntax::interner::Interner;

fn define_public(module: &ModuleRef, name: emberscript::syntax::interner::Symbol) {
    let method = Rc::new(Method {
        name,
        owner: module.clone(),
        body: MethodBody::Native(Rc::new(|_| Ok(Value::Nil))),
        arity: Arity(0),
    });
    module.borrow_mut().methods.insert(
        name,
        MethodInfo::Defined {
            visibility: Visibility::Public,
            method,
        },
    );
}

#[test]
fn default_visibility_steers_methods_defined_after_it_is_set() {
    let mut interner = Interner::new();
    let helper = interner.intern("helper");
    let klass = ModuleRef::new(Module::new_class(None));

    define::set_default_visibility(&klass, Visibility::Private);
    let method = define::define_method_body(&klass, helper, MethodBody::Native(Rc::new(|_| Ok(Value::Nil))), Arity(0));
    let stored = klass.borrow().methods.get(&helper).unwrap().clone();
    assert!(Rc::ptr_eq(stored.method().unwrap(), &method));
    assert_eq!(stored.visibility(), Visibility::Private);
}

#[test]
fn private_named_by_set_method_visibility_does_not_move_the_method() {
    let mut interner = Interner::new();
    let helper = interner.intern("helper");
    let klass = ModuleRef::new(Module::new_class(None));
    define_public(&klass, helper);

    define::set_method_visibility(&klass, &[helper], Visibility::Private, &interner, None).unwrap();

    let info = klass.borrow().methods.get(&helper).unwrap().clone();
    assert_eq!(info.visibility(), Visibility::Private);
    assert!(define::public_instance_method(&klass, helper, &interner, None).is_err());
    assert!(define::instance_method(&klass, helper, &interner, None).is_ok());
}

#[test]
fn module_function_with_no_names_sets_both_flags_for_subsequent_definitions() {
    let interner = Interner::new();
    let math = ModuleRef::new(Module::new_module());
    define::module_function(&math, &[], &interner, None).unwrap();

    assert_eq!(math.borrow().method_visibility, Visibility::Private);
    assert!(math.borrow().module_function_mode);

    let mut interner = Interner::new();
    let sqrt = interner.intern("sqrt");
    define::define_method_body(&math, sqrt, MethodBody::Native(Rc::new(|_| Ok(Value::Nil))), Arity(0));

    let instance_side = math.borrow().methods.get(&sqrt).unwrap().visibility();
    assert_eq!(instance_side, Visibility::Private);
    let singleton = math.borrow().singleton_class.clone().unwrap();
    let singleton_side = singleton.borrow().methods.get(&sqrt).unwrap().visibility();
    assert_eq!(singleton_side, Visibility::Public);
}

#[test]
fn setting_default_visibility_clears_a_prior_module_function_mode() {
    let interner = Interner::new();
    let math = ModuleRef::new(Module::new_module());
    define::module_function(&math, &[], &interner, None).unwrap();
    assert!(math.borrow().module_function_mode);

    define::set_default_visibility(&math, Visibility::Public);
    assert!(!math.borrow().module_function_mode);
    assert_eq!(math.borrow().method_visibility, Visibility::Public);
}

#[test]
fn undef_method_on_a_never_defined_name_raises() {
    let mut interner = Interner::new();
    let ghost = interner.intern("ghost");
    let klass = ModuleRef::new(Module::new_class(None));
    assert!(define::undef_method(&klass, ghost, &interner, None).is_err());
}
