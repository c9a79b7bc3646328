//! `Method` and the `MethodInfo` tri-state (spec.md §3, §9 "Method-info
//! tri-state").

use std::rc::Rc;

use crate::diagnostics::Diagnostic;
use crate::syntax::ast::Node;
use crate::syntax::interner::Symbol;

use super::handle::ModuleRef;
use super::value::Value;
use super::visibility::Visibility;

/// Ruby-style arity: a non-negative count is exact; a negative count `-(n+1)`
/// means "at least `n` required arguments, plus an optional/rest tail" — the
/// same convention the original implementation's `Method::arity` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity(pub i32);

pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, Diagnostic>>;

#[derive(Clone)]
pub enum MethodBody {
    Native(NativeFn),
    Closure {
        env: ModuleRef,
        params: Vec<Symbol>,
        body: Rc<Node>,
    },
}

/// A defined method. Wrapped in [`MethodRef`] (an `Rc`) everywhere it is
/// stored, so that two `MethodInfo`s can be compared by identity — this is
/// what makes the `after_method` "skip until past this pointer" trick in
/// [`super::lookup::find_method`] and the `alias`/`super` properties (P5)
/// work: aliasing copies the `MethodRef`, it never clones the body.
pub struct Method {
    pub name: Symbol,
    pub owner: ModuleRef,
    pub body: MethodBody,
    pub arity: Arity,
}

pub type MethodRef = Rc<Method>;

#[derive(Clone)]
pub enum MethodInfo {
    Defined { visibility: Visibility, method: MethodRef },
    Undefined { visibility: Visibility },
}

impl MethodInfo {
    pub fn is_defined(&self) -> bool {
        matches!(self, MethodInfo::Defined { .. })
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            MethodInfo::Defined { visibility, .. } => *visibility,
            MethodInfo::Undefined { visibility } => *visibility,
        }
    }

    pub fn method(&self) -> Option<&MethodRef> {
        match self {
            MethodInfo::Defined { method, .. } => Some(method),
            MethodInfo::Undefined { .. } => None,
        }
    }

    pub fn with_visibility(&self, visibility: Visibility) -> Self {
        match self {
            MethodInfo::Defined { method, .. } => MethodInfo::Defined {
                visibility,
                method: method.clone(),
            },
            MethodInfo::Undefined { .. } => MethodInfo::Undefined { visibility },
        }
    }
}
