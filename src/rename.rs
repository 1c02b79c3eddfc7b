// src/rename.rs
//! Fresh-variable renaming of clauses, one consistent mapping per
//! use-site, sourced from a monotone counter threaded through
//! resolution.

use std::collections::HashMap;

use crate::term::{Rule, Term};

/// Rewrites every variable in `term` according to `mapping`, minting a
/// fresh name (and counter bump) for any variable seen for the first
/// time. The anonymous wildcard `_` always mints a fresh name, since
/// each occurrence is independent.
fn rename_term(term: &Term, mapping: &mut HashMap<String, String>, counter: &mut u64) -> Term {
    match term {
        Term::Var { name } => {
            if name == "_" {
                let fresh = format!("_G{counter}");
                *counter += 1;
                Term::var(fresh)
            } else {
                let fresh = mapping.entry(name.clone()).or_insert_with(|| {
                    let fresh = format!("{name}_{counter}");
                    *counter += 1;
                    fresh
                });
                Term::var(fresh.clone())
            }
        }
        Term::Predicate { name, args } => Term::predicate(
            name.clone(),
            args.iter().map(|a| rename_term(a, mapping, counter)).collect(),
        ),
        Term::Const { .. } => term.clone(),
    }
}

/// Renames every variable in `rule` (head and body together, under one
/// shared mapping) so that the instantiated clause cannot capture
/// bindings from any other choice point. Returns the renamed rule and
/// the counter advanced past every fresh name minted.
pub fn rename_rule(rule: &Rule, counter: u64) -> (Rule, u64) {
    let mut mapping = HashMap::new();
    let mut next = counter;
    let head = rename_term(&rule.head, &mut mapping, &mut next);
    let body = rule
        .body
        .iter()
        .map(|goal| rename_term(goal, &mut mapping, &mut next))
        .collect();
    (Rule { head, body }, next)
}
