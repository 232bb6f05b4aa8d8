//! Pretty-printing for types.
//!
//! Two renderings are provided:
//! - [`Type::pretty_print`] — the editor-facing form with class
//!   constraints annotated inline at each variable occurrence
//!   (`Num a -> Num a`, `(Num+Ord c)`).
//! - [`Type::to_haskell_type`] — surface source syntax with a leading
//!   constraint context (`(Num a, Ord b) => a -> b -> Bool`), suitable for
//!   handing to a downstream evaluator.
//!
//! Both are deterministic: the same type always renders the same string.

use std::fmt::{self, Display, Write};

use super::ty::{Type, TypeVar, VarId};

/// Syntactic position of a type being written, deciding parenthesization.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Pos {
    /// Top level, or any self-delimiting position (tuple item, list
    /// element, function result).
    Top,
    /// Parameter of a function type.
    Param,
    /// Argument of an applied type constructor.
    ConArg,
}

fn write_type<W: Write>(w: &mut W, ty: &Type, pos: Pos, bare_vars: bool) -> fmt::Result {
    match ty {
        Type::Var(v) => write_var(w, v, pos, bare_vars),

        Type::Con { name, args } => {
            if args.is_empty() {
                return write!(w, "{}", name);
            }
            let parens = pos == Pos::ConArg;
            if parens {
                write!(w, "(")?;
            }
            write!(w, "{}", name)?;
            for arg in args {
                write!(w, " ")?;
                write_type(w, arg, Pos::ConArg, bare_vars)?;
            }
            if parens {
                write!(w, ")")?;
            }
            Ok(())
        }

        Type::Func(components) => {
            let parens = pos != Pos::Top;
            if parens {
                write!(w, "(")?;
            }
            let last = components.len() - 1;
            for (i, c) in components.iter().enumerate() {
                if i > 0 {
                    write!(w, " -> ")?;
                }
                // the result position keeps arrows right-associative
                let inner = if i == last { Pos::Top } else { Pos::Param };
                write_type(w, c, inner, bare_vars)?;
            }
            if parens {
                write!(w, ")")?;
            }
            Ok(())
        }

        Type::Tuple(items) => {
            write!(w, "(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, ", ")?;
                }
                write_type(w, item, Pos::Top, bare_vars)?;
            }
            write!(w, ")")
        }

        Type::List(elem) => {
            write!(w, "[")?;
            write_type(w, elem, Pos::Top, bare_vars)?;
            write!(w, "]")
        }
    }
}

fn write_var<W: Write>(w: &mut W, v: &TypeVar, pos: Pos, bare: bool) -> fmt::Result {
    if bare || v.classes.is_empty() {
        return write!(w, "{}", v.name);
    }
    match v.classes.len() {
        1 => {
            let parens = pos == Pos::ConArg;
            if parens {
                write!(w, "(")?;
            }
            write!(w, "{} {}", v.classes[0], v.name)?;
            if parens {
                write!(w, ")")?;
            }
            Ok(())
        }
        // two or more unrelated constraints render self-parenthesized
        _ => write!(w, "({} {})", v.classes.join("+"), v.name),
    }
}

/// Collect the constraint context of a type: one `Class name` item per
/// (class, variable) pair, in traversal order.
fn collect_context(ty: &Type, seen: &mut Vec<VarId>, items: &mut Vec<String>) {
    match ty {
        Type::Var(v) => {
            if !v.classes.is_empty() && !seen.contains(&v.id) {
                seen.push(v.id);
                for class in &v.classes {
                    items.push(format!("{} {}", class, v.name));
                }
            }
        }
        Type::Con { args, .. } => {
            for a in args {
                collect_context(a, seen, items);
            }
        }
        Type::Func(components) => {
            for c in components {
                collect_context(c, seen, items);
            }
        }
        Type::Tuple(tuple_items) => {
            for i in tuple_items {
                collect_context(i, seen, items);
            }
        }
        Type::List(elem) => collect_context(elem, seen, items),
    }
}

impl Type {
    /// Render with class constraints annotated inline at each variable.
    pub fn pretty_print(&self) -> String {
        let mut s = String::new();
        write_type(&mut s, self, Pos::Top, false).unwrap();
        s
    }

    /// Render as Haskell source syntax: an optional constraint context
    /// followed by the bare structural type.
    pub fn to_haskell_type(&self) -> String {
        let mut seen = Vec::new();
        let mut items = Vec::new();
        collect_context(self, &mut seen, &mut items);

        let mut s = String::new();
        match items.len() {
            0 => {}
            1 => {
                s.push_str(&items[0]);
                s.push_str(" => ");
            }
            _ => {
                s.push('(');
                s.push_str(&items.join(", "));
                s.push_str(") => ");
            }
        }
        write_type(&mut s, self, Pos::Top, true).unwrap();
        s
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty_print())
    }
}
