//! A dynamic, class-based scripting language's core object model and
//! expression parser.
//!
//! [`syntax`] lexes and parses source text into an [`syntax::ast::Node`]
//! tree using a Pratt (top-down operator precedence) parser. [`objects`]
//! holds the module/class object model that tree is ultimately evaluated
//! against: constant tables, method tables, inclusion/prepend chains,
//! method and constant lookup, and visibility.

pub mod diagnostics;
pub mod objects;
pub mod syntax;
