//! Expression trees for type inference.
//!
//! Expressions arrive from the host editor as plain trees: annotated
//! literals, references to lambda binders, named catalog functions,
//! binary application nodes, and lambdas. Trees own their children; there
//! is no sharing and no cycles. Binder occurrences are tied together by an
//! identity token, not by name, so shadowing in the host never confuses
//! the inferencer.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::catalog::Environment;
use crate::error::Result;
use crate::types::Type;

static NEXT_BINDER_ID: AtomicU64 = AtomicU64::new(0);

/// Identity token for binders.
pub type BinderId = u64;

/// A lambda parameter: a display name, an identity token, and an optional
/// type annotation. Clones share the identity, so a binder stored in a
/// `Lambda` and referenced from `Local` leaves is recognized as the same
/// parameter.
#[derive(Debug, Clone)]
pub struct Binder {
    id: BinderId,
    name: String,
    annotation: Option<Type>,
}

impl Binder {
    /// Create an unannotated binder with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        Binder {
            id: NEXT_BINDER_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            annotation: None,
        }
    }

    /// Create a binder carrying a type annotation.
    pub fn annotated(name: impl Into<String>, ty: Type) -> Self {
        Binder {
            annotation: Some(ty),
            ..Binder::new(name)
        }
    }

    pub fn id(&self) -> BinderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self) -> Option<&Type> {
        self.annotation.as_ref()
    }
}

impl PartialEq for Binder {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Binder {}

/// An expression tree.
#[derive(Debug, Clone)]
pub enum Expression {
    /// A literal with a known (ground) type and its source spelling.
    Value { ty: Type, text: String },

    /// A reference to a lambda binder.
    Local(Binder),

    /// A reference to a named catalog function.
    Fun(String),

    /// Function application, one argument at a time.
    Apply(Box<Expression>, Box<Expression>),

    /// A lambda with its parameters in declaration order.
    Lambda(Vec<Binder>, Box<Expression>),
}

impl Expression {
    pub fn value(ty: Type, text: impl Into<String>) -> Self {
        Expression::Value {
            ty,
            text: text.into(),
        }
    }

    pub fn local(binder: &Binder) -> Self {
        Expression::Local(binder.clone())
    }

    pub fn fun(name: impl Into<String>) -> Self {
        Expression::Fun(name.into())
    }

    pub fn apply(func: Expression, arg: Expression) -> Self {
        Expression::Apply(Box::new(func), Box::new(arg))
    }

    pub fn lambda(binders: impl Into<Vec<Binder>>, body: Expression) -> Self {
        Expression::Lambda(binders.into(), Box::new(body))
    }

    /// Infer this expression's type against the given environment.
    pub fn find_type(&self, env: &Environment) -> Result<Type> {
        crate::infer(env, self)
    }

    /// Render as Haskell source syntax, fully parenthesized.
    pub fn to_haskell(&self) -> String {
        match self {
            Expression::Value { text, .. } => text.clone(),
            Expression::Local(binder) => binder.name.clone(),
            Expression::Fun(name) => name.clone(),
            Expression::Apply(func, arg) => {
                format!("({} {})", func.to_haskell(), arg.to_haskell())
            }
            Expression::Lambda(binders, body) => {
                let params: Vec<&str> = binders.iter().map(|b| b.name.as_str()).collect();
                format!("(\\{} -> {})", params.join(" "), body.to_haskell())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binder_identity() {
        let x = Binder::new("x");
        let also_x = x.clone();
        let other_x = Binder::new("x");

        assert_eq!(x, also_x);
        assert_ne!(x, other_x);
    }

    #[test]
    fn test_to_haskell() {
        let x = Binder::new("x");
        let y = Binder::new("y");
        let body = Expression::apply(
            Expression::apply(Expression::fun("(+)"), Expression::local(&x)),
            Expression::local(&y),
        );
        let lambda = Expression::lambda([x, y], body);

        assert_eq!(lambda.to_haskell(), "(\\x y -> (((+) x) y))");

        let lit = Expression::value(Type::con("Float"), "5.0");
        assert_eq!(lit.to_haskell(), "5.0");
    }
}
