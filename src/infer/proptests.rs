//! Property-based tests for unification.

use proptest::prelude::*;

use crate::catalog::haskell_prelude;
use crate::types::Type;

use super::scope::TypeScope;
use super::state::InferState;

// Strategy for leaf types: ground constructors and fresh variables, some
// carrying a class constraint from the stock registry.
fn leaf_strategy() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::con("Int")),
        Just(Type::con("Char")),
        Just(Type::con("Bool")),
        Just(Type::con("Float")),
        "[a-d]".prop_map(|name| Type::Var(TypeScope::unique(name))),
        ("[a-d]", prop::sample::select(vec!["Eq", "Ord", "Num", "Show"])).prop_map(
            |(name, class)| Type::Var(TypeScope::new().fresh_var_with_classes(name, [class]))
        ),
    ]
}

// Strategy for compound types built over the leaves.
fn type_strategy() -> impl Strategy<Value = Type> {
    leaf_strategy().prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(Type::Func),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Type::Tuple),
            inner.clone().prop_map(Type::list),
            inner.prop_map(|t| Type::con_app("Maybe", [t])),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_unify_is_reflexive(ty in type_strategy()) {
        let env = haskell_prelude();
        let mut state = InferState::new(&env);

        prop_assert!(state.unify("reflexivity", &ty, &ty).is_ok());
        prop_assert_eq!(state.resolve(&ty).pretty_print(), ty.pretty_print());
    }

    #[test]
    fn prop_unify_success_is_symmetric(a in type_strategy(), b in type_strategy()) {
        let env = haskell_prelude();

        let mut forward = InferState::new(&env);
        let mut backward = InferState::new(&env);
        prop_assert_eq!(
            forward.unify("forward", &a, &b).is_ok(),
            backward.unify("backward", &b, &a).is_ok()
        );
    }

    #[test]
    fn prop_fresh_scopes_never_alias(name in "[a-z]{1,4}") {
        let mut s1 = TypeScope::new();
        let mut s2 = TypeScope::new();
        let v1 = Type::Var(s1.fresh_var(name.as_str()));
        let v2 = Type::Var(s2.fresh_var(name.as_str()));
        prop_assert_ne!(&v1, &v2);

        // distinct identities, but still value-compatible
        let env = haskell_prelude();
        let mut state = InferState::new(&env);
        prop_assert!(state.unify("fresh variables", &v1, &v2).is_ok());
        prop_assert_eq!(state.resolve(&v1), state.resolve(&v2));
    }
}
