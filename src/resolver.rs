// src/resolver.rs
//! SLD resolution: the depth-first proof procedure that drives goal
//! lists against a knowledge base, dispatching to built-ins,
//! negation-as-failure and the constraint store along the way.

use log::{debug, trace};

use crate::builtins;
use crate::constraint::{Constraint, ConstraintStore};
use crate::kb::KnowledgeBase;
use crate::rename::rename_rule;
use crate::subst::Substitution;
use crate::term::Term;
use crate::unify::unify;

/// One successful derivation: the substitution it produced, paired
/// with the constraint store accumulated along that branch.
pub type Solution = (Substitution, ConstraintStore);

/// Proves `goals` against `kb` starting from `subst`, threading a
/// fresh-variable counter and constraint store through the search.
/// Returns every successful derivation, in the order fixed by KB order
/// and depth-first left-to-right goal traversal (§4.H's ordering
/// contract).
pub fn resolve(
    kb: &KnowledgeBase,
    goals: &[Term],
    subst: &Substitution,
    counter: u64,
    constraints: &ConstraintStore,
) -> Vec<Solution> {
    let (first, rest) = match goals.split_first() {
        None => {
            return if constraints.satisfied(subst) {
                vec![(subst.clone(), constraints.clone())]
            } else {
                Vec::new()
            };
        }
        Some(split) => split,
    };

    if let Term::Predicate { name, args } = first {
        if name == "\\+" && args.len() == 1 {
            return resolve_negation(kb, &args[0], rest, subst, counter, constraints);
        }
        if builtins::is_builtin(name) {
            let grounded = subst.apply(first);
            let extended = builtins::evaluate(&grounded, subst);
            return extended
                .into_iter()
                .flat_map(|s| resolve(kb, rest, &s, counter, constraints))
                .collect();
        }
    }

    if let Some(constraint) = Constraint::from_goal(first) {
        trace!("posting constraint: {}", first);
        let extended_store = constraints.with_pushed(constraint);
        return resolve(kb, rest, subst, counter, &extended_store);
    }

    resolve_ordinary_goal(kb, first, rest, subst, counter, constraints)
}

fn resolve_negation(
    kb: &KnowledgeBase,
    inner: &Term,
    rest: &[Term],
    subst: &Substitution,
    counter: u64,
    constraints: &ConstraintStore,
) -> Vec<Solution> {
    let grounded_inner = subst.apply(inner);
    trace!("entering negated probe: \\+ {}", grounded_inner);
    let probe = resolve(kb, &[grounded_inner], &Substitution::new(), counter, constraints);
    if probe.is_empty() {
        trace!("negated probe failed; continuing under outer substitution");
        resolve(kb, rest, subst, counter, constraints)
    } else {
        trace!("negated probe succeeded; outer goal fails");
        Vec::new()
    }
}

fn resolve_ordinary_goal(
    kb: &KnowledgeBase,
    goal: &Term,
    rest: &[Term],
    subst: &Substitution,
    counter: u64,
    constraints: &ConstraintStore,
) -> Vec<Solution> {
    let mut solutions = Vec::new();
    let (name, arity) = match goal.functor() {
        Some(pair) => pair,
        None => return solutions,
    };
    for rule in kb.rules_for(name, arity) {
        let (renamed_rule, next_counter) = rename_rule(rule, counter);
        debug!("trying clause {} for goal {}", renamed_rule, goal);
        if let Some(extended) = unify(goal, &renamed_rule.head, subst) {
            let mut new_goals = renamed_rule.body;
            new_goals.extend(rest.iter().cloned());
            solutions.extend(resolve(kb, &new_goals, &extended, next_counter, constraints));
        }
    }
    solutions
}
