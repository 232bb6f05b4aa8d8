//! Core type definitions for qualtype inference.
//!
//! This module defines the type representation for a Haskell-flavoured
//! type language:
//! - Type variables with identity tokens and class constraint sets
//! - Type constructors with fixed arity
//! - Curried function types as ordered component sequences
//! - Tuples and lists
//!
//! Types are immutable values. Unification never rewrites a `Type` in
//! place; it extends a [`Subst`](super::Subst) that callers apply when they
//! need the resolved form.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Unique identity token for type variables.
///
/// Minted by [`TypeScope`](crate::infer::TypeScope); never reused within a
/// process, so variables from unrelated instantiations can never collide.
pub type VarId = u64;

/// A type variable: an identity token, a display name, and the classes the
/// variable's eventual type is required to belong to.
///
/// Equality and hashing use the identity token only. Two variables with the
/// same surface name produced by different scopes are distinct; repeated
/// occurrences of one name within a single signature instantiation share
/// one token and therefore compare equal.
#[derive(Debug, Clone)]
pub struct TypeVar {
    pub id: VarId,
    pub name: String,
    /// Required classes in the order they were added.
    pub classes: Vec<String>,
}

impl PartialEq for TypeVar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeVar {}

impl Hash for TypeVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Core type representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Type variable.
    Var(TypeVar),

    /// Type constructor application: a name plus zero or more arguments,
    /// arity fixed at construction ("Int", "Maybe a", ...).
    Con { name: String, args: Vec<Type> },

    /// Curried function type: at least two components, applied left to
    /// right, the last component is the ultimate result.
    Func(Vec<Type>),

    /// Fixed-length tuple.
    Tuple(Vec<Type>),

    /// Homogeneous list.
    List(Box<Type>),
}

impl Type {
    /// Create a nullary type constructor.
    pub fn con(name: impl Into<String>) -> Self {
        Type::Con {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create an applied type constructor.
    pub fn con_app(name: impl Into<String>, args: impl Into<Vec<Type>>) -> Self {
        Type::Con {
            name: name.into(),
            args: args.into(),
        }
    }

    /// Create a function type from its components (parameters then result).
    ///
    /// A function type has at least two components.
    pub fn fun(components: impl Into<Vec<Type>>) -> Self {
        let components = components.into();
        debug_assert!(components.len() >= 2);
        Type::Func(components)
    }

    /// Create a tuple type.
    pub fn tuple(items: impl Into<Vec<Type>>) -> Self {
        Type::Tuple(items.into())
    }

    /// Create a list type.
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    /// Check if this is a type variable.
    pub fn is_var(&self) -> bool {
        matches!(self, Type::Var(_))
    }

    /// Get the type variable if this is a `Var`.
    pub fn as_var(&self) -> Option<&TypeVar> {
        match self {
            Type::Var(v) => Some(v),
            _ => None,
        }
    }

    /// Check if this is a function type.
    pub fn is_func(&self) -> bool {
        matches!(self, Type::Func(_))
    }

    /// The constructor-name spelling of this type's outermost shape, used
    /// for instance lookups. Lists are `"[]"`, tuples `"(,)"`/`"(,,)"`/...,
    /// functions `"(->)"`.
    pub fn shape_name(&self) -> Option<String> {
        match self {
            Type::Var(_) => None,
            Type::Con { name, .. } => Some(name.clone()),
            Type::Func(_) => Some("(->)".to_string()),
            Type::Tuple(items) => Some(format!("({})", ",".repeat(items.len().saturating_sub(1)))),
            Type::List(_) => Some("[]".to_string()),
        }
    }

    /// Collect all type variables occurring in this type.
    pub fn free_vars(&self) -> HashSet<TypeVar> {
        let mut vars = HashSet::new();
        self.collect_free_vars(&mut vars);
        vars
    }

    fn collect_free_vars(&self, vars: &mut HashSet<TypeVar>) {
        match self {
            Type::Var(v) => {
                vars.insert(v.clone());
            }
            Type::Con { args, .. } => {
                for a in args {
                    a.collect_free_vars(vars);
                }
            }
            Type::Func(components) => {
                for c in components {
                    c.collect_free_vars(vars);
                }
            }
            Type::Tuple(items) => {
                for i in items {
                    i.collect_free_vars(vars);
                }
            }
            Type::List(elem) => elem.collect_free_vars(vars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::TypeScope;

    #[test]
    fn test_type_construction() {
        let int = Type::con("Int");
        assert!(!int.is_var());
        assert_eq!(int.shape_name().as_deref(), Some("Int"));

        let func = Type::fun([Type::con("Int"), Type::con("Bool")]);
        assert!(func.is_func());
        assert_eq!(func.shape_name().as_deref(), Some("(->)"));

        let pair = Type::tuple([Type::con("Int"), Type::con("Char")]);
        assert_eq!(pair.shape_name().as_deref(), Some("(,)"));

        let triple = Type::tuple([Type::con("Int"), Type::con("Int"), Type::con("Int")]);
        assert_eq!(triple.shape_name().as_deref(), Some("(,,)"));

        let list = Type::list(Type::con("Char"));
        assert_eq!(list.shape_name().as_deref(), Some("[]"));
    }

    #[test]
    fn test_var_identity_not_name() {
        let mut scope = TypeScope::new();
        let a1 = scope.fresh_var("a");
        let a2 = scope.fresh_var("a");
        assert_eq!(a1, a2);

        let mut other = TypeScope::new();
        let a3 = other.fresh_var("a");
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_free_vars() {
        let mut scope = TypeScope::new();
        let a = scope.fresh_var("a");
        let b = scope.fresh_var("b");

        let func = Type::fun([Type::Var(a.clone()), Type::list(Type::Var(b.clone()))]);
        let free = func.free_vars();

        assert!(free.contains(&a));
        assert!(free.contains(&b));
        assert_eq!(free.len(), 2);
    }
}
