//! Type system module for qualtype.
//!
//! This module provides the core type representation, the class registry,
//! the substitution structure, and pretty-printing.

mod class;
mod pretty;
mod subst;
mod ty;

pub use class::{ClassRegistry, TypeClass};
pub use subst::Subst;
pub use ty::{Type, TypeVar, VarId};
