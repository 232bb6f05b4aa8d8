//! Expression type inference.
//!
//! Walks an expression tree bottom-up, instantiating catalog signatures at
//! function references and driving the unifier at application nodes. A
//! single failed unification anywhere aborts the whole inference with the
//! originating error; no partial type is ever produced.

use crate::error::{Result, TypeError};
use crate::expr::Expression;
use crate::types::Type;

use super::scope::TypeScope;
use super::state::InferState;

impl InferState<'_> {
    /// Infer the type of an expression. The returned type may still
    /// contain unresolved variables; use [`InferState::resolve`] for the
    /// final form.
    pub fn infer_expr(&mut self, expr: &Expression) -> Result<Type> {
        match expr {
            // literals carry their (ground) type
            Expression::Value { ty, .. } => Ok(ty.clone()),

            Expression::Local(binder) => Ok(self.binder_type(binder)),

            // every use of a named function gets its own instantiation, so
            // unrelated call sites never alias
            Expression::Fun(name) => {
                let signature = self.env.lookup_signature(name)?;
                let mut scope = TypeScope::new();
                Ok(scope.instantiate(signature))
            }

            Expression::Apply(func, arg) => {
                let fun_ty = self.infer_expr(func)?;
                let arg_ty = self.infer_expr(arg)?;
                let context = format!("the application {}", expr.to_haskell());

                let components = self.as_function(&context, &fun_ty)?;
                self.unify(&context, &arg_ty, &components[0])?;
                if components.len() == 2 {
                    Ok(components[1].clone())
                } else {
                    Ok(Type::Func(components[1..].to_vec()))
                }
            }

            Expression::Lambda(binders, body) => {
                // assign binder types up front so unused parameters still
                // appear in the resulting function type
                let params: Vec<Type> = binders.iter().map(|b| self.binder_type(b)).collect();
                let result = self.infer_expr(body)?;
                if params.is_empty() {
                    return Ok(result);
                }
                let mut components = params;
                components.push(result);
                Ok(Type::Func(components))
            }
        }
    }

    /// View a type as a function: resolve it, constrain an unresolved
    /// variable to a fresh unary function shape, reject anything else.
    fn as_function(&mut self, context: &str, ty: &Type) -> Result<Vec<Type>> {
        let ty = match ty {
            Type::Var(v) => self.subst.structural(v).unwrap_or_else(|| ty.clone()),
            _ => ty.clone(),
        };
        match ty {
            Type::Func(components) => Ok(components),
            Type::Var(_) => {
                let param = Type::Var(TypeScope::unique("a"));
                let result = Type::Var(TypeScope::unique("b"));
                self.unify(context, &ty, &Type::fun([param.clone(), result.clone()]))?;
                Ok(vec![param, result])
            }
            other => Err(TypeError::StructuralMismatch {
                left: self.resolve(&other).pretty_print(),
                right: "a function".to_string(),
                context: context.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::haskell_prelude;
    use crate::expr::Binder;
    use crate::infer;

    fn apply2(f: &str, a: Expression, b: Expression) -> Expression {
        Expression::apply(Expression::apply(Expression::fun(f), a), b)
    }

    #[test]
    fn test_lambda_over_binary_operator() {
        let env = haskell_prelude();

        let x = Binder::new("x");
        let y = Binder::new("y");
        let body = apply2("(+)", Expression::local(&x), Expression::local(&y));
        let add = Expression::lambda([x, y], body);

        let ty = infer(&env, &add).unwrap();
        assert_eq!(ty.pretty_print(), "Num a -> Num a -> Num a");
    }

    #[test]
    fn test_repeated_binder_accumulates_constraints() {
        let env = haskell_prelude();

        let z = Binder::new("z");
        let body = apply2("(^)", Expression::local(&z), Expression::local(&z));
        let lambda = Expression::lambda([z], body);

        let ty = infer(&env, &lambda).unwrap();
        assert_eq!(ty.pretty_print(), "Integral b -> Num a");
    }

    #[test]
    fn test_unused_binder_stays_free() {
        let env = haskell_prelude();

        let u = Binder::new("u");
        let body = Expression::value(Type::con("Float"), "5.0");
        let lambda = Expression::lambda([u], body);

        let ty = infer(&env, &lambda).unwrap();
        assert_eq!(ty.pretty_print(), "u -> Float");
    }

    #[test]
    fn test_annotated_binder_forces_concrete_type() {
        let env = haskell_prelude();

        let x = Binder::annotated("x", Type::con("Int"));
        let y = Binder::new("y");
        let body = apply2("(+)", Expression::local(&x), Expression::local(&y));
        let add = Expression::lambda([x, y], body);

        let ty = infer(&env, &add).unwrap();
        assert_eq!(ty.pretty_print(), "Int -> Int -> Int");
    }

    #[test]
    fn test_class_constrained_annotation() {
        let env = haskell_prelude();

        let mut scope = TypeScope::new();
        let r = Type::Var(scope.fresh_var_with_classes("r", ["RealFloat"]));
        let z = Binder::annotated("z", r);
        let body = apply2("(**)", Expression::local(&z), Expression::local(&z));
        let lambda = Expression::lambda([z], body);

        let ty = infer(&env, &lambda).unwrap();
        assert_eq!(ty.pretty_print(), "RealFloat a -> RealFloat a");
    }

    #[test]
    fn test_concrete_list_annotation() {
        let env = haskell_prelude();

        let u = Binder::annotated("u", Type::list(Type::con("Int")));
        let body = Expression::value(Type::con("Float"), "5.0");
        let lambda = Expression::lambda([u], body);

        let ty = infer(&env, &lambda).unwrap();
        assert_eq!(ty.pretty_print(), "[Int] -> Float");
    }

    #[test]
    fn test_value_type_is_returned_directly() {
        let env = haskell_prelude();
        let five = Expression::value(Type::con("Int"), "5");
        assert_eq!(infer(&env, &five).unwrap().pretty_print(), "Int");
    }

    #[test]
    fn test_two_uses_of_a_function_never_alias() {
        let env = haskell_prelude();

        // id 'x' :: Char and id 5 :: Int in one pair
        let left = Expression::apply(
            Expression::fun("id"),
            Expression::value(Type::con("Char"), "'x'"),
        );
        let right = Expression::apply(
            Expression::fun("id"),
            Expression::value(Type::con("Int"), "5"),
        );

        let mut state = InferState::new(&env);
        let lt = state.infer_expr(&left).unwrap();
        let rt = state.infer_expr(&right).unwrap();
        assert_eq!(state.resolve(&lt).pretty_print(), "Char");
        assert_eq!(state.resolve(&rt).pretty_print(), "Int");
    }

    #[test]
    fn test_binder_used_as_function() {
        let env = haskell_prelude();

        let f = Binder::new("f");
        let x = Binder::new("x");
        let body = Expression::apply(Expression::local(&f), Expression::local(&x));
        let lambda = Expression::lambda([f, x], body);

        let ty = infer(&env, &lambda).unwrap();
        assert_eq!(ty.pretty_print(), "(a -> b) -> a -> b");
    }

    #[test]
    fn test_partial_application() {
        let env = haskell_prelude();

        let plus_one = Expression::apply(
            Expression::fun("(+)"),
            Expression::value(Type::con("Int"), "1"),
        );
        let ty = infer(&env, &plus_one).unwrap();
        assert_eq!(ty.pretty_print(), "Int -> Int");
    }

    #[test]
    fn test_unknown_function_name() {
        let env = haskell_prelude();
        let expr = Expression::apply(
            Expression::fun("frobnicate"),
            Expression::value(Type::con("Int"), "5"),
        );
        let err = infer(&env, &expr).unwrap_err();
        assert!(matches!(err, TypeError::UnboundName { ref name, .. } if name == "frobnicate"));
    }

    #[test]
    fn test_applying_a_non_function() {
        let env = haskell_prelude();
        let expr = Expression::apply(
            Expression::value(Type::con("Int"), "5"),
            Expression::value(Type::con("Int"), "6"),
        );
        let err = infer(&env, &expr).unwrap_err();
        assert!(matches!(err, TypeError::StructuralMismatch { .. }));
    }

    #[test]
    fn test_argument_type_mismatch_aborts() {
        let env = haskell_prelude();

        // not :: Bool -> Bool applied to an Int
        let expr = Expression::apply(
            Expression::fun("not"),
            Expression::value(Type::con("Int"), "5"),
        );
        let err = infer(&env, &expr).unwrap_err();
        assert!(matches!(err, TypeError::StructuralMismatch { .. }));

        // deterministic on re-inference
        assert_eq!(infer(&env, &expr).unwrap_err(), err);
    }

    #[test]
    fn test_self_application_reports_infinite_type() {
        let env = haskell_prelude();

        let x = Binder::new("x");
        let body = Expression::apply(Expression::local(&x), Expression::local(&x));
        let lambda = Expression::lambda([x], body);

        let err = infer(&env, &lambda).unwrap_err();
        assert!(matches!(err, TypeError::InfiniteType { .. }));
    }
}
