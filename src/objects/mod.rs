//! The module/class object model (spec.md §3-§4): constant and method
//! tables, inclusion/prepend chains, method and constant lookup, and
//! visibility. An evaluator outside this crate is the intended caller —
//! this module never executes a [`crate::syntax::ast::Node`] itself, except
//! to hold one unevaluated inside a closure [`method::MethodBody`].

pub mod constant;
pub mod define;
pub mod errors;
pub mod handle;
pub mod lookup;
pub mod method;
pub mod module;
pub mod value;
pub mod visibility;
pub mod visitor;

pub use constant::Constant;
pub use handle::ModuleRef;
pub use lookup::{const_find, find_method, ConstLookupFailureMode, ConstLookupSearchMode};
pub use method::{Arity, Method, MethodBody, MethodInfo, MethodRef, NativeFn};
pub use module::{Env, Module};
pub use value::Value;
pub use visibility::Visibility;
pub use visitor::{visit_children, Visitor};
