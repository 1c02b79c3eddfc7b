// src/subst.rs
//! Substitutions: partial maps from variables to terms, with
//! transitive-dereferencing `apply`.

use std::collections::HashMap;

use crate::term::Term;

/// A partial function from variable names to terms, built up
/// incrementally during unification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    bindings: HashMap<String, Term>,
}

impl Substitution {
    pub fn new() -> Substitution {
        Substitution { bindings: HashMap::new() }
    }

    /// Walks `t` through the map, rebuilding compound terms with every
    /// argument applied. Chained variable bindings are followed to
    /// their end.
    pub fn apply(&self, t: &Term) -> Term {
        match t {
            Term::Var { name } => match self.bindings.get(name) {
                Some(bound) => self.apply(bound),
                None => t.clone(),
            },
            Term::Predicate { name, args } => Term::Predicate {
                name: name.clone(),
                args: args.iter().map(|a| self.apply(a)).collect(),
            },
            Term::Const { .. } => t.clone(),
        }
    }

    /// Binds `var` to `term`. Callers (the unifier) must have already
    /// walked both sides so that `var` is not already bound to a
    /// different ground term.
    pub fn extend(&mut self, var: &str, term: Term) {
        self.bindings.insert(var.to_string(), term);
    }

    pub fn is_bound(&self, var: &str) -> bool {
        self.bindings.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
