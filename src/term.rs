// src/term.rs
//! The term language: the values that make up facts, rules, goals and
//! substitutions throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The comparison operators the engine recognizes as arithmetic goals.
pub const ARITHMETIC_OPS: [&str; 6] = ["=", "!=", "<", "<=", ">", ">="];

/// A Prolog term: an atom/number constant, a logical variable, or a
/// compound term (also used directly as a goal).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Term {
    /// An atom or numeric literal. Two constants are equal iff their
    /// names are equal.
    Const { name: String },
    /// A logical variable, named `_` for the anonymous wildcard.
    Var { name: String },
    /// A compound term: a functor applied to an ordered argument list.
    /// Also doubles as a goal when it appears in a clause body or query.
    Predicate { name: String, args: Vec<Term> },
}

impl Term {
    pub fn constant(name: impl Into<String>) -> Term {
        Term::Const { name: name.into() }
    }

    pub fn var(name: impl Into<String>) -> Term {
        Term::Var { name: name.into() }
    }

    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Predicate { name: name.into(), args }
    }

    /// True iff this is a `Const` whose name parses as a number.
    pub fn is_numeric(&self) -> bool {
        match self {
            Term::Const { name } => name.parse::<f64>().is_ok(),
            _ => false,
        }
    }

    /// The parsed numeric value of a numeric `Const`. Panics on a
    /// non-numeric or non-`Const` term; callers must check
    /// `is_numeric` first.
    pub fn numeric_value(&self) -> f64 {
        match self {
            Term::Const { name } => name
                .parse::<f64>()
                .unwrap_or_else(|_| panic!("constant '{name}' is not numeric")),
            other => panic!("{other} is not a constant"),
        }
    }

    /// True iff this is a `Predicate` whose name is a recognized
    /// arithmetic comparison operator with exactly two arguments.
    pub fn is_arithmetic_constraint(&self) -> bool {
        match self {
            Term::Predicate { name, args } => {
                args.len() == 2 && ARITHMETIC_OPS.contains(&name.as_str())
            }
            _ => false,
        }
    }

    /// The functor name and arity identifying this term's predicate
    /// family, if it is a `Predicate`.
    pub fn functor(&self) -> Option<(&str, usize)> {
        match self {
            Term::Predicate { name, args } => Some((name.as_str(), args.len())),
            _ => None,
        }
    }

    /// Collects the names of every distinct variable occurring in this
    /// term, in first-occurrence order.
    pub fn collect_var_names(&self, out: &mut Vec<String>) {
        match self {
            Term::Var { name } => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            Term::Predicate { args, .. } => {
                for arg in args {
                    arg.collect_var_names(out);
                }
            }
            Term::Const { .. } => {}
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Const { name } => write!(f, "{name}"),
            Term::Var { name } => write!(f, "{name}"),
            Term::Predicate { name, args } => {
                if args.is_empty() {
                    write!(f, "{name}")
                } else {
                    write!(f, "{name}(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ")")
                }
            }
        }
    }
}

/// A clause: a head predicate and an ordered body of goals. An empty
/// body makes this a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub head: Term,
    pub body: Vec<Term>,
}

impl Rule {
    pub fn fact(head: Term) -> Rule {
        Rule { head, body: Vec::new() }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}.", self.head)
        } else {
            write!(f, "{} :- ", self.head)?;
            for (i, goal) in self.body.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{goal}")?;
            }
            write!(f, ".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_detection() {
        assert!(Term::constant("42").is_numeric());
        assert!(Term::constant("3.5").is_numeric());
        assert!(!Term::constant("alice").is_numeric());
    }

    #[test]
    fn display_matches_spec_forms() {
        let fact = Rule::fact(Term::predicate(
            "parent",
            vec![Term::constant("alice"), Term::constant("bob")],
        ));
        assert_eq!(fact.to_string(), "parent(alice, bob).");

        let rule = Rule {
            head: Term::predicate("grandparent", vec![Term::var("X"), Term::var("Y")]),
            body: vec![
                Term::predicate("parent", vec![Term::var("X"), Term::var("Z")]),
                Term::predicate("parent", vec![Term::var("Z"), Term::var("Y")]),
            ],
        };
        assert_eq!(
            rule.to_string(),
            "grandparent(X, Y) :- parent(X, Z), parent(Z, Y)."
        );

        let atom = Term::predicate("halt", vec![]);
        assert_eq!(atom.to_string(), "halt");
    }

    #[test]
    fn is_arithmetic_constraint_checks_name_and_arity() {
        let cmp = Term::predicate(">=", vec![Term::var("A"), Term::constant("18")]);
        assert!(cmp.is_arithmetic_constraint());
        let not_cmp = Term::predicate("parent", vec![Term::var("A"), Term::constant("18")]);
        assert!(!not_cmp.is_arithmetic_constraint());
    }
}
