//! Substitution built during unification.
//!
//! A [`Subst`] maps variable identities to the types they resolved to, plus
//! the current merged constraint set per still-unresolved variable.
//! Variables may resolve to other variables (aliasing), forming chains that
//! always end at an unbound variable or a structural type. The substitution
//! is private to one inference call and discarded with it.

use std::collections::HashMap;

use super::ty::{Type, TypeVar, VarId};

/// A substitution from type variables to types, with per-variable merged
/// class sets for the variables that are still unresolved.
#[derive(Debug, Clone, Default)]
pub struct Subst {
    map: HashMap<VarId, Type>,
    classes: HashMap<VarId, Vec<String>>,
}

impl Subst {
    /// Create an empty substitution.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The direct binding for a variable, if any.
    pub fn binding(&self, id: VarId) -> Option<&Type> {
        self.map.get(&id)
    }

    pub fn is_bound(&self, id: VarId) -> bool {
        self.map.contains_key(&id)
    }

    /// Record a binding. Callers guarantee the variable is unbound and that
    /// the occurs check has passed.
    pub fn bind(&mut self, id: VarId, ty: Type) {
        self.map.insert(id, ty);
    }

    /// The current constraint set of a variable: the merged set recorded
    /// during unification, or the set the variable was created with.
    pub fn classes_of(&self, var: &TypeVar) -> Vec<String> {
        self.classes
            .get(&var.id)
            .cloned()
            .unwrap_or_else(|| var.classes.clone())
    }

    /// Overwrite the merged constraint set of a variable.
    pub fn set_classes(&mut self, id: VarId, classes: Vec<String>) {
        self.classes.insert(id, classes);
    }

    /// Follow variable-to-variable links to the last variable in the
    /// chain. The tip is either unbound or bound to a structural type.
    pub fn tip(&self, var: &TypeVar) -> TypeVar {
        let mut cur = var;
        while let Some(Type::Var(next)) = self.map.get(&cur.id) {
            cur = next;
        }
        cur.clone()
    }

    /// The structural type a variable resolves to, if its chain ends in
    /// one. `None` means the chain ends at an unresolved variable.
    pub fn structural(&self, var: &TypeVar) -> Option<Type> {
        let tip = self.tip(var);
        match self.map.get(&tip.id) {
            Some(ty) if !ty.is_var() => Some(ty.clone()),
            _ => None,
        }
    }

    /// Occurs check: does `id` occur in `ty` after resolution?
    pub fn occurs(&self, id: VarId, ty: &Type) -> bool {
        match ty {
            Type::Var(v) => {
                let tip = self.tip(v);
                if tip.id == id {
                    return true;
                }
                match self.map.get(&tip.id) {
                    Some(resolved) => self.occurs(id, resolved),
                    None => false,
                }
            }
            Type::Con { args, .. } => args.iter().any(|a| self.occurs(id, a)),
            Type::Func(components) => components.iter().any(|c| self.occurs(id, c)),
            Type::Tuple(items) => items.iter().any(|i| self.occurs(id, i)),
            Type::List(elem) => self.occurs(id, elem),
        }
    }

    /// Apply the substitution: resolve every variable to its final form and
    /// bake the merged constraint sets into the remaining variables.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(v) => {
                let tip = self.tip(v);
                match self.map.get(&tip.id) {
                    Some(resolved) => self.apply(resolved),
                    None => Type::Var(TypeVar {
                        classes: self.classes_of(&tip),
                        ..tip
                    }),
                }
            }
            Type::Con { name, args } => Type::Con {
                name: name.clone(),
                args: args.iter().map(|a| self.apply(a)).collect(),
            },
            Type::Func(components) => {
                Type::Func(components.iter().map(|c| self.apply(c)).collect())
            }
            Type::Tuple(items) => Type::Tuple(items.iter().map(|i| self.apply(i)).collect()),
            Type::List(elem) => Type::List(Box::new(self.apply(elem))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::TypeScope;

    #[test]
    fn test_empty_subst() {
        let subst = Subst::empty();
        let mut scope = TypeScope::new();
        let a = Type::Var(scope.fresh_var("a"));
        assert_eq!(subst.apply(&a), a);
    }

    #[test]
    fn test_bind_and_apply() {
        let mut subst = Subst::empty();
        let mut scope = TypeScope::new();
        let a = scope.fresh_var("a");

        subst.bind(a.id, Type::con("Int"));
        assert_eq!(subst.apply(&Type::Var(a)), Type::con("Int"));
    }

    #[test]
    fn test_chain_resolution() {
        let mut subst = Subst::empty();
        let mut scope = TypeScope::new();
        let a = scope.fresh_var("a");
        let b = scope.fresh_var("b");

        subst.bind(a.id, Type::Var(b.clone()));
        subst.bind(b.id, Type::con("Char"));

        assert_eq!(subst.tip(&a).id, b.id);
        assert_eq!(subst.apply(&Type::Var(a)), Type::con("Char"));
    }

    #[test]
    fn test_apply_bakes_merged_classes() {
        let mut subst = Subst::empty();
        let mut scope = TypeScope::new();
        let a = scope.fresh_var("a");

        subst.set_classes(a.id, vec!["Ord".to_string()]);
        let applied = subst.apply(&Type::Var(a));
        assert_eq!(applied.as_var().unwrap().classes, vec!["Ord".to_string()]);
    }

    #[test]
    fn test_apply_in_structure() {
        let mut subst = Subst::empty();
        let mut scope = TypeScope::new();
        let a = scope.fresh_var("a");

        subst.bind(a.id, Type::con("Int"));
        let func = Type::fun([Type::Var(a.clone()), Type::list(Type::Var(a))]);
        assert_eq!(
            subst.apply(&func),
            Type::fun([Type::con("Int"), Type::list(Type::con("Int"))])
        );
    }

    #[test]
    fn test_occurs() {
        let mut subst = Subst::empty();
        let mut scope = TypeScope::new();
        let a = scope.fresh_var("a");
        let b = scope.fresh_var("b");

        let func = Type::fun([Type::Var(a.clone()), Type::con("Int")]);
        assert!(subst.occurs(a.id, &func));
        assert!(!subst.occurs(b.id, &func));

        // occurrence through an alias link
        subst.bind(b.id, Type::Var(a.clone()));
        assert!(subst.occurs(a.id, &Type::list(Type::Var(b))));
    }
}
