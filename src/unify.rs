// src/unify.rs
//! Structural unification over `Term`, producing extended substitutions.

use crate::subst::Substitution;
use crate::term::Term;

/// Attempts to unify `x` and `y` under `s`, returning the extended
/// substitution on success. No occurs-check is performed; the engine
/// relies on the var-identity check below to avoid creating `X -> X`
/// binding cycles, per spec.
pub fn unify(x: &Term, y: &Term, s: &Substitution) -> Option<Substitution> {
    let x = s.apply(x);
    let y = s.apply(y);

    match (&x, &y) {
        (Term::Var { name: vx }, Term::Var { name: vy }) if vx == vy => Some(s.clone()),
        (Term::Var { name }, _) => {
            let mut extended = s.clone();
            extended.extend(name, y);
            Some(extended)
        }
        (_, Term::Var { name }) => {
            let mut extended = s.clone();
            extended.extend(name, x);
            Some(extended)
        }
        (Term::Const { name: a }, Term::Const { name: b }) => {
            if a == b {
                Some(s.clone())
            } else {
                None
            }
        }
        (
            Term::Predicate { name: n1, args: a1 },
            Term::Predicate { name: n2, args: a2 },
        ) => {
            if n1 != n2 || a1.len() != a2.len() {
                return None;
            }
            let mut current = s.clone();
            for (arg1, arg2) in a1.iter().zip(a2.iter()) {
                current = unify(arg1, arg2, &current)?;
            }
            Some(current)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_matching_constants() {
        let s = Substitution::new();
        let result = unify(&Term::constant("alice"), &Term::constant("alice"), &s);
        assert!(result.is_some());
    }

    #[test]
    fn fails_on_mismatched_constants() {
        let s = Substitution::new();
        let result = unify(&Term::constant("alice"), &Term::constant("bob"), &s);
        assert!(result.is_none());
    }

    #[test]
    fn binds_variable_to_term() {
        let s = Substitution::new();
        let result = unify(&Term::var("X"), &Term::constant("alice"), &s).unwrap();
        assert_eq!(result.apply(&Term::var("X")), Term::constant("alice"));
    }

    #[test]
    fn unifies_compound_terms_recursively() {
        let s = Substitution::new();
        let left = Term::predicate("parent", vec![Term::constant("alice"), Term::var("X")]);
        let right = Term::predicate("parent", vec![Term::var("Y"), Term::constant("bob")]);
        let result = unify(&left, &right, &s).unwrap();
        assert_eq!(result.apply(&Term::var("X")), Term::constant("bob"));
        assert_eq!(result.apply(&Term::var("Y")), Term::constant("alice"));
    }

    #[test]
    fn fails_on_arity_mismatch() {
        let s = Substitution::new();
        let left = Term::predicate("f", vec![Term::constant("a")]);
        let right = Term::predicate("f", vec![Term::constant("a"), Term::constant("b")]);
        assert!(unify(&left, &right, &s).is_none());
    }

    #[test]
    fn same_variable_unifies_with_itself_without_binding() {
        let s = Substitution::new();
        let result = unify(&Term::var("X"), &Term::var("X"), &s).unwrap();
        assert!(!result.is_bound("X"));
    }

    #[test]
    fn soundness_after_successful_unification() {
        let s = Substitution::new();
        let left = Term::predicate("f", vec![Term::var("X"), Term::constant("b")]);
        let right = Term::predicate("f", vec![Term::constant("a"), Term::var("Y")]);
        let result = unify(&left, &right, &s).unwrap();
        assert_eq!(result.apply(&left), result.apply(&right));
    }
}
