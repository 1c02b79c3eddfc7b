// src/constraint.rs
//! The arithmetic constraint store: a post-hoc check evaluated only
//! once a branch's goal list has been exhausted.

use crate::subst::Substitution;
use crate::term::Term;

const EQ_TOLERANCE: f64 = 1e-6;

/// A pending arithmetic relation between two terms that must ground to
/// numeric constants by the time the store is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub op: String,
    pub left: Term,
    pub right: Term,
}

impl Constraint {
    /// Builds a `Constraint` from a goal, if it is an arithmetic
    /// comparison (see `Term::is_arithmetic_constraint`).
    pub fn from_goal(goal: &Term) -> Option<Constraint> {
        match goal {
            Term::Predicate { name, args } if goal.is_arithmetic_constraint() => Some(Constraint {
                op: name.clone(),
                left: args[0].clone(),
                right: args[1].clone(),
            }),
            _ => None,
        }
    }

    /// Walks both sides through `subst`; fails (returns `false`) unless
    /// both ground to numeric constants, then compares with `op`.
    pub fn eval(&self, subst: &Substitution) -> bool {
        let left = subst.apply(&self.left);
        let right = subst.apply(&self.right);
        if !left.is_numeric() || !right.is_numeric() {
            return false;
        }
        let l = left.numeric_value();
        let r = right.numeric_value();
        match self.op.as_str() {
            "=" => (l - r).abs() < EQ_TOLERANCE,
            "!=" => (l - r).abs() >= EQ_TOLERANCE,
            "<" => l < r,
            "<=" => l <= r,
            ">" => l > r,
            ">=" => l >= r,
            _ => false,
        }
    }
}

/// An ordered sequence of pending constraints. `satisfied` is the
/// conjunction of `eval` over all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintStore {
    constraints: Vec<Constraint>,
}

impl ConstraintStore {
    pub fn new() -> ConstraintStore {
        ConstraintStore { constraints: Vec::new() }
    }

    /// Returns a copy of this store with `constraint` appended
    /// (functional update, so sibling branches are unaffected).
    pub fn with_pushed(&self, constraint: Constraint) -> ConstraintStore {
        let mut constraints = self.constraints.clone();
        constraints.push(constraint);
        ConstraintStore { constraints }
    }

    pub fn satisfied(&self, subst: &Substitution) -> bool {
        self.constraints.iter().all(|c| c.eval(subst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s() -> Substitution {
        Substitution::new()
    }

    #[test]
    fn equality_uses_tolerance() {
        let c = Constraint { op: "=".into(), left: Term::constant("1.0000001"), right: Term::constant("1.0") };
        assert!(c.eval(&s()));
    }

    #[test]
    fn non_numeric_sides_fail() {
        let c = Constraint { op: ">=".into(), left: Term::constant("alice"), right: Term::constant("18") };
        assert!(!c.eval(&s()));
    }

    #[test]
    fn store_conjunction() {
        let store = ConstraintStore::new()
            .with_pushed(Constraint { op: ">=".into(), left: Term::constant("10"), right: Term::constant("6") })
            .with_pushed(Constraint { op: "<".into(), left: Term::constant("10"), right: Term::constant("100") });
        assert!(store.satisfied(&s()));

        let failing = store.with_pushed(Constraint {
            op: ">".into(),
            left: Term::constant("10"),
            right: Term::constant("100"),
        });
        assert!(!failing.satisfied(&s()));
    }

    #[test]
    fn with_pushed_does_not_mutate_original() {
        let store = ConstraintStore::new();
        let extended = store.with_pushed(Constraint {
            op: "=".into(),
            left: Term::constant("1"),
            right: Term::constant("2"),
        });
        assert!(store.satisfied(&s()));
        assert!(!extended.satisfied(&s()));
    }
}
