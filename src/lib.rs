//! Qualtype: class-qualified Hindley-Milner type inference for
//! Haskell-style expression graphs.
//!
//! This library is the typed core behind a block-based visual editor. It
//! features:
//!
//! - **Identity-based type variables** minted per instantiation, so
//!   unrelated uses of a polymorphic signature never alias
//! - **Type classes with superclass subsumption**: requiring `Eq` and
//!   `Ord` of one variable collapses to `Ord`
//! - **Unification over an explicit substitution**, private to each
//!   inference call
//! - **Expression inference** for literals, binders, catalog functions,
//!   application, and lambdas
//! - **Deterministic pretty-printing** of inferred types, inline
//!   (`Num a -> Num a`) and as evaluator-ready source syntax
//!
//! The engine performs no parsing, no code generation, and no evaluation;
//! expressions arrive as trees and types leave as values.

pub mod catalog;
pub mod error;
pub mod expr;
pub mod infer;
pub mod types;

pub use catalog::{haskell_prelude, Environment};
pub use error::{Result, TypeError};
pub use expr::{Binder, Expression};
pub use infer::{InferState, TypeScope};
pub use types::{ClassRegistry, Subst, Type, TypeClass, TypeVar};

/// Infer the type of an expression against an environment.
///
/// Creates a fresh inference state, infers bottom-up, and returns the
/// fully resolved type. Each call owns its own state, so concurrent
/// inferences are independent.
pub fn infer(env: &Environment, expr: &Expression) -> Result<Type> {
    let mut state = InferState::new(env);
    let ty = state.infer_expr(expr)?;
    Ok(state.resolve(&ty))
}
