//! Unification.
//!
//! [`InferState::unify`] merges two types into the substitution, or fails
//! with a [`TypeError`] naming the incompatibility and the context in
//! which it was found. Variables are always resolved through the
//! substitution chain to a structural type before matching; two still
//! unresolved variables are merged by aliasing one to the other and
//! collapsing the union of their constraint sets through the class
//! registry.

use crate::error::{Result, TypeError};
use crate::types::{Type, TypeVar};

use super::state::InferState;

impl InferState<'_> {
    /// Unify two types, extending the substitution.
    ///
    /// Success and failure are symmetric in the argument order. The choice
    /// of surviving variable is not: when two unresolved variables meet,
    /// the right-hand one survives and takes the collapsed constraint
    /// union, which is what keeps signature variable names stable in the
    /// rendered result.
    pub fn unify(&mut self, context: &str, a: &Type, b: &Type) -> Result<()> {
        match (a, b) {
            (Type::Var(va), Type::Var(vb)) => self.unify_vars(context, va, vb),
            (Type::Var(v), t) | (t, Type::Var(v)) => self.unify_var_type(context, v, t),

            (
                Type::Con {
                    name: n1,
                    args: args1,
                },
                Type::Con {
                    name: n2,
                    args: args2,
                },
            ) => {
                if n1 != n2 {
                    return Err(self.mismatch(context, a, b));
                }
                if args1.len() != args2.len() {
                    return Err(TypeError::ArityMismatch {
                        what: "constructor",
                        expected: args1.len(),
                        found: args2.len(),
                        context: context.to_string(),
                    });
                }
                for (x, y) in args1.iter().zip(args2) {
                    self.unify(context, x, y)?;
                }
                Ok(())
            }

            (Type::Func(xs), Type::Func(ys)) => self.unify_funcs(context, xs, ys),

            (Type::Tuple(xs), Type::Tuple(ys)) => {
                if xs.len() != ys.len() {
                    return Err(TypeError::ArityMismatch {
                        what: "tuple",
                        expected: xs.len(),
                        found: ys.len(),
                        context: context.to_string(),
                    });
                }
                for (x, y) in xs.iter().zip(ys) {
                    self.unify(context, x, y)?;
                }
                Ok(())
            }

            (Type::List(x), Type::List(y)) => self.unify(context, x, y),

            _ => Err(self.mismatch(context, a, b)),
        }
    }

    fn unify_vars(&mut self, context: &str, va: &TypeVar, vb: &TypeVar) -> Result<()> {
        if va.id == vb.id {
            return Ok(());
        }
        // a structural resolution on either side takes over
        if let Some(resolved) = self.subst.structural(va) {
            return self.unify(context, &resolved, &Type::Var(vb.clone()));
        }
        if let Some(resolved) = self.subst.structural(vb) {
            return self.unify(context, &Type::Var(va.clone()), &resolved);
        }

        let b_tip = self.subst.tip(vb);
        if self.subst.tip(va).id == b_tip.id {
            // already the same cluster
            return Ok(());
        }

        // the right-hand side survives: its tip takes the collapsed union
        // of the left variable's directly-attached constraints and its own
        let mut merged = self.subst.classes_of(va);
        for class in self.subst.classes_of(&b_tip) {
            if !merged.contains(&class) {
                merged.push(class);
            }
        }
        let merged = self.env.registry().most_specific(&merged)?;
        self.subst.set_classes(b_tip.id, merged);

        // an already-aliased variable keeps its first alias
        if !self.subst.is_bound(va.id) {
            self.subst.bind(va.id, Type::Var(vb.clone()));
        }
        Ok(())
    }

    fn unify_var_type(&mut self, context: &str, v: &TypeVar, t: &Type) -> Result<()> {
        if let Some(resolved) = self.subst.structural(v) {
            return self.unify(context, &resolved, t);
        }
        let (tip, classes) = self.classes_at_tip(v);
        for class in &classes {
            self.require_class(context, class, t)?;
        }
        if self.subst.occurs(tip.id, t) {
            return Err(TypeError::InfiniteType {
                var: tip.name.clone(),
                ty: self.resolve(t).pretty_print(),
                context: context.to_string(),
            });
        }
        self.subst.bind(tip.id, t.clone());
        Ok(())
    }

    /// Require class membership of a type: the shape's constructor must be
    /// an instance, and the requirement distributes over every component
    /// (the derived-instance rule). Component variables accumulate the
    /// class into their constraint sets.
    fn require_class(&mut self, context: &str, class: &str, t: &Type) -> Result<()> {
        if let Type::Var(v) = t {
            if let Some(resolved) = self.subst.structural(v) {
                return self.require_class(context, class, &resolved);
            }
            let (tip, mut classes) = self.classes_at_tip(v);
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
                classes = self.env.registry().most_specific(&classes)?;
            }
            self.subst.set_classes(tip.id, classes);
            return Ok(());
        }

        let (shape, children): (String, Vec<&Type>) = match t {
            Type::Con { name, args } => (name.clone(), args.iter().collect()),
            Type::Func(components) => ("(->)".to_string(), components.iter().collect()),
            Type::Tuple(items) => (
                format!("({})", ",".repeat(items.len().saturating_sub(1))),
                items.iter().collect(),
            ),
            Type::List(elem) => ("[]".to_string(), vec![elem.as_ref()]),
            Type::Var(_) => unreachable!(),
        };

        if !self.env.registry().instance_satisfies(class, &shape)? {
            return Err(TypeError::MissingInstance {
                class: class.to_string(),
                ty: self.resolve(t).pretty_print(),
                context: context.to_string(),
            });
        }
        for child in children {
            self.require_class(context, class, child)?;
        }
        Ok(())
    }

    fn unify_funcs(&mut self, context: &str, xs: &[Type], ys: &[Type]) -> Result<()> {
        if xs.len() == ys.len() {
            for (x, y) in xs.iter().zip(ys) {
                self.unify(context, x, y)?;
            }
            return Ok(());
        }
        // unequal arity: a shorter function supplied where a longer one is
        // expected is awaiting further currying. Unify the shared prefix,
        // then the shorter side's result against the remaining suffix.
        if xs.len() < ys.len() {
            let k = xs.len() - 1;
            for i in 0..k {
                self.unify(context, &xs[i], &ys[i])?;
            }
            self.unify(context, &xs[k], &Type::Func(ys[k..].to_vec()))
        } else {
            let k = ys.len() - 1;
            for i in 0..k {
                self.unify(context, &xs[i], &ys[i])?;
            }
            self.unify(context, &Type::Func(xs[k..].to_vec()), &ys[k])
        }
    }

    fn mismatch(&self, context: &str, a: &Type, b: &Type) -> TypeError {
        TypeError::StructuralMismatch {
            left: self.resolve(a).pretty_print(),
            right: self.resolve(b).pretty_print(),
            context: context.to_string(),
        }
    }
}
