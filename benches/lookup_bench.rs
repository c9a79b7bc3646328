use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emberscript::objects::{
    lookup::{find_method, ConstLookupFailureMode, ConstLookupSearchMode},
    method::{Arity, Method, MethodBody, MethodInfo},
    module::Module,
    value::Value,
    visibility::Visibility,
    ModuleRef,
};
use emberscript::syntax::interner::Interner;
use std::rc::Rc;

fn main_bench(c: &mut Criterion) {
    let mut interner = Interner::new();
    let greet = interner.intern("greet");

    let object = ModuleRef::new(Module::new_class(None));
    let method = Rc::new(Method {
        name: greet,
        owner: object.clone(),
        body: MethodBody::Native(Rc::new(|_| Ok(Value::Nil))),
        arity: Arity(0),
    });
    object.borrow_mut().methods.insert(
        greet,
        MethodInfo::Defined {
            visibility: Visibility::Public,
            method,
        },
    );

    let mut leaf = object.clone();
    for _ in 0..20 {
        leaf = ModuleRef::new(Module::new_class(Some(leaf)));
    }

    c.bench_function("find_method through 20 superclasses", |b| {
        b.iter(|| black_box(find_method(black_box(&leaf), black_box(greet), None)))
    });

    let root = ModuleRef::new(Module::new_class(None));
    let limit = interner.intern("LIMIT");
    emberscript::objects::module::const_set(&root, limit, "LIMIT", Value::Integer(10));
    let mut deep = root.clone();
    for _ in 0..20 {
        deep = ModuleRef::new(Module::new_class(Some(deep)));
    }

    c.bench_function("const_find through 20 superclasses", |b| {
        b.iter(|| {
            let mut warnings = Vec::new();
            black_box(emberscript::objects::lookup::const_find(
                black_box(&deep),
                black_box(limit),
                &interner,
                ConstLookupSearchMode::NotStrict,
                ConstLookupFailureMode::Raise,
                Some(&root),
                &mut warnings,
            ))
        })
    });
}

criterion_group!(benches, main_bench);
criterion_main!(benches);
