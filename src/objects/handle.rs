//! `ModuleRef`: a reference-counted handle to a [`super::module::Module`]
//! (spec.md §9, "Cyclic graphs" — "reproduce it as an ordered sequence of
//! module handles ... reference-counted handle, never as a pointer graph
//! with back-edges").
//!
//! Modules need shared, interior-mutable ownership (a class and every
//! subclass hold the same superclass handle; `included_modules` entries are
//! shared by every includer), which is why this wraps `Rc<RefCell<..>>`
//! rather than following the teacher crate's immutable `Rc`-only `Value`
//! design.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::module::Module;

#[derive(Clone)]
pub struct ModuleRef(Rc<RefCell<Module>>);

impl ModuleRef {
    pub fn new(module: Module) -> Self {
        ModuleRef(Rc::new(RefCell::new(module)))
    }

    pub fn borrow(&self) -> Ref<'_, Module> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Module> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(a: &ModuleRef, b: &ModuleRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// A stable identity for `inspect_str`'s `#<Class:0x...>` fallback
    /// (spec.md §4.1 "Naming and inspection").
    pub fn pointer_id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for ModuleRef {
    fn eq(&self, other: &Self) -> bool {
        ModuleRef::ptr_eq(self, other)
    }
}

impl Eq for ModuleRef {}

impl fmt::Debug for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleRef(0x{:x})", self.pointer_id())
    }
}
