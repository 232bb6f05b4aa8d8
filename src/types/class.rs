//! Type classes and the class registry.
//!
//! A [`TypeClass`] couples a class name with its direct superclasses and
//! the set of type-constructor names known to be instances. The
//! [`ClassRegistry`] answers the two questions unification needs:
//! subsumption ("does Integral imply Ord?") and instance membership
//! ("is Char an instance of Show?").

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TypeError};

/// A type class: name, direct superclasses, instance table.
#[derive(Debug, Clone)]
pub struct TypeClass {
    pub name: String,
    /// Direct superclasses only; the registry computes the closure.
    pub supers: Vec<String>,
    /// Names of type constructors with an instance of this class.
    pub instances: HashSet<String>,
}

impl TypeClass {
    pub fn new<S, I>(name: impl Into<String>, supers: S, instances: I) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        TypeClass {
            name: name.into(),
            supers: supers.into_iter().map(Into::into).collect(),
            instances: instances.into_iter().map(Into::into).collect(),
        }
    }
}

/// Registry of all known type classes.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, TypeClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any previous definition of the name.
    pub fn register(&mut self, class: TypeClass) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Look up a class. An unknown name is a configuration error.
    pub fn class(&self, name: &str) -> Result<&TypeClass> {
        self.classes.get(name).ok_or_else(|| TypeError::UnknownClass {
            name: name.to_string(),
            context: "the class registry".to_string(),
        })
    }

    /// Check whether `child` transitively lists `ancestor` among its
    /// superclasses. Strict: a class is not its own subclass.
    pub fn is_subclass_of(&self, child: &str, ancestor: &str) -> Result<bool> {
        for sup in &self.class(child)?.supers {
            if sup == ancestor || self.is_subclass_of(sup, ancestor)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check whether requiring `class` is already covered by requiring
    /// `other`: either the same class or a subclass of it.
    pub fn implies(&self, other: &str, class: &str) -> Result<bool> {
        Ok(other == class || self.is_subclass_of(other, class)?)
    }

    /// Collapse a constraint set to its minimal representative: any class
    /// implied by another class already present is dropped. Survivors keep
    /// the order in which they were added.
    pub fn most_specific(&self, classes: &[String]) -> Result<Vec<String>> {
        let mut seen: Vec<String> = Vec::new();
        for c in classes {
            if !seen.contains(c) {
                seen.push(c.clone());
            }
        }

        let mut kept = Vec::new();
        for c in &seen {
            let mut implied = false;
            for d in &seen {
                if d != c && self.is_subclass_of(d, c)? {
                    implied = true;
                    break;
                }
            }
            if !implied {
                kept.push(c.clone());
            }
        }
        Ok(kept)
    }

    /// Instance membership: is the type constructor `ty_name` an instance
    /// of `class`?
    pub fn instance_satisfies(&self, class: &str, ty_name: &str) -> Result<bool> {
        Ok(self.class(class)?.instances.contains(ty_name))
    }
}
