//! Type variable scopes.
//!
//! A [`TypeScope`] is the factory for fresh type variables during one
//! instantiation request. Within a scope, the same surface name always
//! yields the same variable identity, which is what makes the repeated
//! `a` in `a -> a` alias correctly. Identities are minted from a
//! process-wide counter, so variables from different scopes can never
//! collide, even for identical names: two separate uses of a polymorphic
//! signature stay independent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Type, TypeVar, VarId};

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> VarId {
    NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed)
}

/// A per-instantiation factory of fresh type variables.
#[derive(Debug, Default)]
pub struct TypeScope {
    vars: HashMap<String, TypeVar>,
}

impl TypeScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a one-off unconstrained variable outside any scope, for binder
    /// types and synthesized function shapes.
    pub fn unique(name: impl Into<String>) -> TypeVar {
        TypeVar {
            id: next_id(),
            name: name.into(),
            classes: Vec::new(),
        }
    }

    /// The scope's variable for `name`: the same identity for repeated
    /// calls, a newly allocated one for a name not seen before.
    pub fn fresh_var(&mut self, name: impl Into<String>) -> TypeVar {
        self.fresh_var_with_classes(name, [] as [&str; 0])
    }

    /// Like [`fresh_var`](Self::fresh_var), additionally unioning the given
    /// classes into the variable's constraint set. Classes accumulate over
    /// repeated calls with the same name, keeping insertion order.
    pub fn fresh_var_with_classes<I>(&mut self, name: impl Into<String>, classes: I) -> TypeVar
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let name = name.into();
        let var = self.vars.entry(name.clone()).or_insert_with(|| TypeVar {
            id: next_id(),
            name,
            classes: Vec::new(),
        });
        for class in classes {
            let class = class.into();
            if !var.classes.contains(&class) {
                var.classes.push(class);
            }
        }
        var.clone()
    }

    /// Instantiate a polymorphic type: deep-copy it, replacing every
    /// variable with this scope's fresh variable for its surface name.
    /// Occurrences of one name stay aliased within the call; nothing
    /// aliases with variables from any other scope.
    pub fn instantiate(&mut self, ty: &Type) -> Type {
        match ty {
            Type::Var(v) => {
                Type::Var(self.fresh_var_with_classes(v.name.clone(), v.classes.clone()))
            }
            Type::Con { name, args } => Type::Con {
                name: name.clone(),
                args: args.iter().map(|a| self.instantiate(a)).collect(),
            },
            Type::Func(components) => {
                Type::Func(components.iter().map(|c| self.instantiate(c)).collect())
            }
            Type::Tuple(items) => Type::Tuple(items.iter().map(|i| self.instantiate(i)).collect()),
            Type::List(elem) => Type::List(Box::new(self.instantiate(elem))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_aliases_within_scope() {
        let mut scope = TypeScope::new();
        let a1 = scope.fresh_var("a");
        let a2 = scope.fresh_var("a");
        let b = scope.fresh_var("b");

        assert_eq!(a1.id, a2.id);
        assert_ne!(a1.id, b.id);
    }

    #[test]
    fn test_scopes_never_alias() {
        let mut s1 = TypeScope::new();
        let mut s2 = TypeScope::new();
        assert_ne!(s1.fresh_var("a"), s2.fresh_var("a"));
        assert_ne!(TypeScope::unique("a"), TypeScope::unique("a"));
    }

    #[test]
    fn test_classes_accumulate_per_name() {
        let mut scope = TypeScope::new();
        let first = scope.fresh_var_with_classes("a", ["Num"]);
        assert_eq!(first.classes, vec!["Num".to_string()]);

        let second = scope.fresh_var_with_classes("a", ["Ord", "Num"]);
        assert_eq!(second.id, first.id);
        assert_eq!(second.classes, vec!["Num".to_string(), "Ord".to_string()]);
    }

    #[test]
    fn test_instantiate_preserves_internal_aliasing() {
        let mut template_scope = TypeScope::new();
        let a = template_scope.fresh_var_with_classes("a", ["Num"]);
        let sig = Type::fun([
            Type::Var(a.clone()),
            Type::Var(a.clone()),
            Type::Var(a.clone()),
        ]);

        let mut use1 = TypeScope::new();
        let t1 = use1.instantiate(&sig);
        let mut use2 = TypeScope::new();
        let t2 = use2.instantiate(&sig);

        let (v1, v2) = match (&t1, &t2) {
            (Type::Func(c1), Type::Func(c2)) => {
                // within one instantiation the occurrences alias
                assert_eq!(c1[0], c1[1]);
                assert_eq!(c1[1], c1[2]);
                (c1[0].clone(), c2[0].clone())
            }
            _ => panic!("expected function types"),
        };

        // across instantiations they never do
        assert_ne!(v1, v2);
        assert_ne!(v1.as_var().unwrap().id, a.id);
        assert_eq!(v1.as_var().unwrap().classes, vec!["Num".to_string()]);
    }
}
