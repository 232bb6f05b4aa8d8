//! The function catalog and its class registry.
//!
//! An [`Environment`] is what the inference engine consumes from the host:
//! a table of named, polymorphic, class-qualified signatures plus the
//! class registry backing subsumption and instance queries.
//! [`haskell_prelude`] builds the stock environment covering the classes
//! and functions the block editor exposes out of the box.

use std::collections::HashMap;

use crate::error::{Result, TypeError};
use crate::infer::TypeScope;
use crate::types::{ClassRegistry, Type, TypeClass};

/// Signature table plus class registry.
#[derive(Debug, Clone)]
pub struct Environment {
    registry: ClassRegistry,
    signatures: HashMap<String, Type>,
}

impl Environment {
    /// Create an empty environment over the given registry.
    pub fn new(registry: ClassRegistry) -> Self {
        Environment {
            registry,
            signatures: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Register a function signature. The signature is a template: its
    /// variables are freshened on every use.
    pub fn define(&mut self, name: impl Into<String>, signature: Type) {
        self.signatures.insert(name.into(), signature);
    }

    /// Look up the stored signature template for a name.
    pub fn lookup_signature(&self, name: &str) -> Result<&Type> {
        self.signatures
            .get(name)
            .ok_or_else(|| TypeError::UnboundName {
                name: name.to_string(),
                context: "the function catalog".to_string(),
            })
    }

    /// Look up a name and instantiate its signature through a fresh scope,
    /// so separate uses never alias.
    pub fn use_fun(&self, name: &str) -> Result<Type> {
        let signature = self.lookup_signature(name)?;
        Ok(TypeScope::new().instantiate(signature))
    }

    pub fn lookup_class(&self, name: &str) -> Result<&TypeClass> {
        self.registry.class(name)
    }

    pub fn instance_satisfies(&self, class: &str, ty_name: &str) -> Result<bool> {
        self.registry.instance_satisfies(class, ty_name)
    }
}

const GROUND: [&str; 7] = ["Int", "Integer", "Float", "Double", "Char", "Bool", "Ordering"];
const NUMERIC: [&str; 4] = ["Int", "Integer", "Float", "Double"];
const FRACTIONAL: [&str; 2] = ["Float", "Double"];

fn stock_registry() -> ClassRegistry {
    let with_compounds = |extra: &[&str]| -> Vec<String> {
        GROUND
            .iter()
            .copied()
            .chain(extra.iter().copied())
            .map(String::from)
            .collect::<Vec<_>>()
    };

    let mut reg = ClassRegistry::new();
    reg.register(TypeClass::new(
        "Eq",
        [] as [&str; 0],
        with_compounds(&["[]", "(,)", "(,,)", "Maybe"]),
    ));
    reg.register(TypeClass::new(
        "Ord",
        ["Eq"],
        with_compounds(&["[]", "(,)", "(,,)", "Maybe"]),
    ));
    reg.register(TypeClass::new(
        "Show",
        [] as [&str; 0],
        with_compounds(&["[]", "(,)", "(,,)", "Maybe"]),
    ));
    reg.register(TypeClass::new("Enum", [] as [&str; 0], GROUND));
    reg.register(TypeClass::new("Num", [] as [&str; 0], NUMERIC));
    reg.register(TypeClass::new("Real", ["Num", "Ord"], NUMERIC));
    reg.register(TypeClass::new("Integral", ["Real", "Enum"], ["Int", "Integer"]));
    reg.register(TypeClass::new("Fractional", ["Num"], FRACTIONAL));
    reg.register(TypeClass::new("Floating", ["Fractional"], FRACTIONAL));
    reg.register(TypeClass::new("RealFrac", ["Real", "Fractional"], FRACTIONAL));
    reg.register(TypeClass::new(
        "RealFloat",
        ["Floating", "RealFrac"],
        FRACTIONAL,
    ));
    reg
}

/// The stock environment: the standard class hierarchy and the builtin
/// functions the editor's catalog exposes.
pub fn haskell_prelude() -> Environment {
    let mut env = Environment::new(stock_registry());

    let string = || Type::list(Type::con("Char"));
    let bool_ = || Type::con("Bool");

    // a class-constrained binary operator: C a => a -> a -> a
    let binop = |class: &str| {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var_with_classes("a", [class]));
        Type::fun([a.clone(), a.clone(), a])
    };

    for op in ["(+)", "(-)", "(*)"] {
        env.define(op, binop("Num"));
    }
    env.define("(/)", binop("Fractional"));
    env.define("div", binop("Integral"));
    env.define("mod", binop("Integral"));
    env.define("(**)", binop("RealFloat"));

    // exponent first: Integral b -> Num a -> Num a
    {
        let mut s = TypeScope::new();
        let b = Type::Var(s.fresh_var_with_classes("b", ["Integral"]));
        let a = Type::Var(s.fresh_var_with_classes("a", ["Num"]));
        env.define("(^)", Type::fun([b, a.clone(), a]));
    }

    for f in ["negate", "abs", "signum"] {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var_with_classes("a", ["Num"]));
        env.define(f, Type::fun([a.clone(), a]));
    }

    for op in ["(==)", "(/=)"] {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var_with_classes("a", ["Eq"]));
        env.define(op, Type::fun([a.clone(), a, bool_()]));
    }
    for op in ["(<)", "(<=)", "(>)", "(>=)"] {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var_with_classes("a", ["Ord"]));
        env.define(op, Type::fun([a.clone(), a, bool_()]));
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var_with_classes("a", ["Ord"]));
        env.define("compare", Type::fun([a.clone(), a, Type::con("Ordering")]));
    }

    env.define("(&&)", Type::fun([bool_(), bool_(), bool_()]));
    env.define("(||)", Type::fun([bool_(), bool_(), bool_()]));
    env.define("not", Type::fun([bool_(), bool_()]));

    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        env.define("id", Type::fun([a.clone(), a]));
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        let b = Type::Var(s.fresh_var("b"));
        env.define("const", Type::fun([a.clone(), b, a]));
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        let b = Type::Var(s.fresh_var("b"));
        let c = Type::Var(s.fresh_var("c"));
        env.define(
            "flip",
            Type::fun([Type::fun([a.clone(), b.clone(), c.clone()]), b, a, c]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        let b = Type::Var(s.fresh_var("b"));
        let c = Type::Var(s.fresh_var("c"));
        env.define(
            "(.)",
            Type::fun([
                Type::fun([b.clone(), c.clone()]),
                Type::fun([a.clone(), b]),
                a,
                c,
            ]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        let b = Type::Var(s.fresh_var("b"));
        env.define(
            "map",
            Type::fun([
                Type::fun([a.clone(), b.clone()]),
                Type::list(a),
                Type::list(b),
            ]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        env.define(
            "filter",
            Type::fun([
                Type::fun([a.clone(), bool_()]),
                Type::list(a.clone()),
                Type::list(a),
            ]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        env.define("head", Type::fun([Type::list(a.clone()), a.clone()]));
        env.define("tail", Type::fun([Type::list(a.clone()), Type::list(a)]));
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        env.define(
            "(:)",
            Type::fun([a.clone(), Type::list(a.clone()), Type::list(a)]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        env.define(
            "(++)",
            Type::fun([
                Type::list(a.clone()),
                Type::list(a.clone()),
                Type::list(a),
            ]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        env.define("length", Type::fun([Type::list(a), Type::con("Int")]));
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        let b = Type::Var(s.fresh_var("b"));
        env.define("fst", Type::fun([Type::tuple([a.clone(), b.clone()]), a.clone()]));
        env.define("snd", Type::fun([Type::tuple([a.clone(), b.clone()]), b]));
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var("a"));
        let b = Type::Var(s.fresh_var("b"));
        env.define(
            "zip",
            Type::fun([
                Type::list(a.clone()),
                Type::list(b.clone()),
                Type::list(Type::tuple([a, b])),
            ]),
        );
    }
    {
        let mut s = TypeScope::new();
        let a = Type::Var(s.fresh_var_with_classes("a", ["Show"]));
        env.define("show", Type::fun([a, string()]));
    }

    env
}
