//! Inference state.
//!
//! An [`InferState`] owns everything one inference call accumulates: the
//! substitution built by unification and the types assigned to lambda
//! binders. Each call to [`crate::infer`] constructs its own state and
//! drops it on return, so concurrent inferences are isolated by
//! construction rather than by locking.

use std::collections::HashMap;

use crate::catalog::Environment;
use crate::expr::{Binder, BinderId};
use crate::types::{Subst, Type, TypeVar};

use super::scope::TypeScope;

/// State for a single inference run.
pub struct InferState<'e> {
    pub(crate) env: &'e Environment,
    pub(crate) subst: Subst,
    /// Fresh variables assigned to unannotated binders, keyed by binder
    /// identity so every reference to one binder shares a single variable.
    pub(crate) binders: HashMap<BinderId, Type>,
}

impl<'e> InferState<'e> {
    /// Create a fresh state over the given catalog environment.
    pub fn new(env: &'e Environment) -> Self {
        InferState {
            env,
            subst: Subst::empty(),
            binders: HashMap::new(),
        }
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    /// Apply the current substitution: the fully resolved form of `ty`,
    /// with merged constraint sets baked into the remaining variables.
    pub fn resolve(&self, ty: &Type) -> Type {
        self.subst.apply(ty)
    }

    /// The current constraint set of a variable's chain tip.
    pub fn classes_at_tip(&self, var: &TypeVar) -> (TypeVar, Vec<String>) {
        let tip = self.subst.tip(var);
        let classes = self.subst.classes_of(&tip);
        (tip, classes)
    }

    /// The type standing for a binder: its annotation if present, else the
    /// fresh variable allocated at its first appearance.
    pub fn binder_type(&mut self, binder: &Binder) -> Type {
        if let Some(annotation) = binder.annotation() {
            return annotation.clone();
        }
        self.binders
            .entry(binder.id())
            .or_insert_with(|| Type::Var(TypeScope::unique(binder.name())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::haskell_prelude;

    #[test]
    fn test_binder_types_reuse_by_identity() {
        let env = haskell_prelude();
        let mut state = InferState::new(&env);

        let x = Binder::new("x");
        let first = state.binder_type(&x);
        let again = state.binder_type(&x.clone());
        assert_eq!(first, again);

        let other = Binder::new("x");
        assert_ne!(first, state.binder_type(&other));
    }

    #[test]
    fn test_annotated_binder_uses_annotation() {
        let env = haskell_prelude();
        let mut state = InferState::new(&env);

        let x = Binder::annotated("x", Type::con("Int"));
        assert_eq!(state.binder_type(&x), Type::con("Int"));
    }
}
