// src/kb.rs
//! The knowledge-base facade: the host-facing surface over the
//! resolver. Owns a dual store (static program rules vs. dynamic
//! asserted facts), parsing, assertion, retraction, querying and
//! persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constraint::ConstraintStore;
use crate::error::{AssertError, KbError, NotFoundError, QueryError};
use crate::parser::{parse_kb, parse_query, parse_rule};
use crate::resolver::resolve;
use crate::subst::Substitution;
use crate::term::{Rule, Term};
use crate::unify::unify;

/// The document persisted by `save`/restored by `load`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedKb {
    #[serde(skip_serializing_if = "Option::is_none")]
    program_rules: Option<Vec<Rule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asserted_facts: Option<Vec<Rule>>,
}

/// A running knowledge base: rules loaded via `consult`, plus facts
/// mutated at runtime via `assertz`/`retract`/`retractall`.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    program_rules: Vec<Rule>,
    asserted_facts: Vec<Rule>,
}

fn looks_like_path(source: &str) -> bool {
    source.contains('/') || source.ends_with(".pl") || source.ends_with(".pro")
}

fn strip_trailing_period(text: &str) -> &str {
    text.trim().trim_end_matches('.')
}

impl KnowledgeBase {
    pub fn new() -> KnowledgeBase {
        KnowledgeBase { program_rules: Vec::new(), asserted_facts: Vec::new() }
    }

    /// Rules matching `name`/`arity`, concatenating `program_rules`
    /// then `asserted_facts`, each in source order.
    pub fn rules_for(&self, name: &str, arity: usize) -> impl Iterator<Item = &Rule> {
        self.program_rules
            .iter()
            .chain(self.asserted_facts.iter())
            .filter(move |r| matches!(&r.head, Term::Predicate { name: n, args } if n == name && args.len() == arity))
    }

    pub fn program_rules(&self) -> &[Rule] {
        &self.program_rules
    }

    pub fn asserted_facts(&self) -> &[Rule] {
        &self.asserted_facts
    }

    /// Loads a program: if `source` looks like a path (contains `/` or
    /// ends in `.pl`/`.pro`) it is read from disk; otherwise it is
    /// parsed directly as program text. Parsed rules are appended to
    /// `program_rules` only on success (consult is atomic per call).
    pub fn consult(&mut self, source: &str) -> Result<(), KbError> {
        let text = if looks_like_path(source) {
            let path = Path::new(source);
            if !path.exists() {
                return Err(NotFoundError(source.to_string()).into());
            }
            fs::read_to_string(path)?
        } else {
            source.to_string()
        };
        let rules = parse_kb(&text)?;
        info!("consulted {} rule(s)", rules.len());
        self.program_rules.extend(rules);
        Ok(())
    }

    /// Appends a single parsed clause to `asserted_facts`. The
    /// terminating `.` is optional.
    pub fn assertz(&mut self, clause: &str) -> Result<(), AssertError> {
        let rule = parse_rule(clause).map_err(AssertError)?;
        debug!("assert {rule}");
        self.asserted_facts.push(rule);
        Ok(())
    }

    /// Removes the first rule in `asserted_facts` whose head unifies
    /// with `pattern`'s head. A no-op if nothing matches.
    pub fn retract(&mut self, pattern: &str) -> Result<(), AssertError> {
        let target = parse_rule(pattern).map_err(AssertError)?;
        if let Some(pos) = self
            .asserted_facts
            .iter()
            .position(|r| unify(&r.head, &target.head, &Substitution::new()).is_some())
        {
            debug!("retract {}", self.asserted_facts[pos]);
            self.asserted_facts.remove(pos);
        }
        Ok(())
    }

    /// Removes every rule in `asserted_facts` whose head unifies with
    /// `pattern`'s head.
    pub fn retractall(&mut self, pattern: &str) -> Result<(), AssertError> {
        let target = parse_rule(pattern).map_err(AssertError)?;
        let before = self.asserted_facts.len();
        self.asserted_facts
            .retain(|r| unify(&r.head, &target.head, &Substitution::new()).is_none());
        debug!("retractall removed {} clause(s)", before - self.asserted_facts.len());
        Ok(())
    }

    /// Parses `text` as a (possibly comma-separated) goal list, resolves
    /// it against the combined KB, and projects each solution's
    /// substitution onto exactly the variables occurring anywhere in
    /// the query.
    pub fn query(&self, text: &str) -> Result<Vec<BTreeMap<String, String>>, QueryError> {
        let goals = parse_query(text)?;
        let mut query_vars = Vec::new();
        for goal in &goals {
            goal.collect_var_names(&mut query_vars);
        }

        let solutions = resolve(self, &goals, &Substitution::new(), 0, &ConstraintStore::new());
        Ok(solutions
            .into_iter()
            .map(|(subst, _store)| {
                query_vars
                    .iter()
                    .map(|name| (name.clone(), subst.apply(&Term::var(name)).to_string()))
                    .collect::<BTreeMap<_, _>>()
            })
            .collect())
    }

    /// Persists the selected stores as a structured JSON document with
    /// up to two top-level keys, `program_rules` and `asserted_facts`.
    pub fn save(&self, path: &str, program: bool, facts: bool) -> Result<(), KbError> {
        let document = PersistedKb {
            program_rules: program.then(|| self.program_rules.clone()),
            asserted_facts: facts.then(|| self.asserted_facts.clone()),
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Restores the selected stores from a document written by `save`.
    pub fn load(&mut self, path: &str, program: bool, facts: bool) -> Result<(), KbError> {
        if !Path::new(path).exists() {
            return Err(NotFoundError(path.to_string()).into());
        }
        let text = fs::read_to_string(path)?;
        let document: PersistedKb = serde_json::from_str(&text)?;
        if program {
            if let Some(rules) = document.program_rules {
                self.program_rules = rules;
            }
        }
        if facts {
            if let Some(rules) = document.asserted_facts {
                self.asserted_facts = rules;
            }
        }
        Ok(())
    }
}

/// Strips an optional trailing `.` from clause/query text, mirroring
/// the parser's own leniency; exposed for callers assembling clause
/// text themselves (e.g. the CLI).
pub fn normalize_clause_text(text: &str) -> &str {
    strip_trailing_period(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_assert_retract_sequence() {
        let mut kb = KnowledgeBase::new();
        kb.assertz("likes(john, pizza).").unwrap();
        kb.assertz("likes(mary, pasta).").unwrap();
        kb.assertz("likes(john, burgers).").unwrap();

        let results = kb.query("likes(john, X).").unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["X"], "pizza");
        assert_eq!(results[1]["X"], "burgers");

        kb.retract("likes(john, pizza).").unwrap();
        let results = kb.query("likes(john, X).").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["X"], "burgers");

        kb.retractall("likes(john, _).").unwrap();
        assert!(kb.query("likes(john, X).").unwrap().is_empty());

        let results = kb.query("likes(mary, X).").unwrap();
        assert_eq!(results[0]["X"], "pasta");
    }

    #[test]
    fn projection_covers_exactly_the_query_variables() {
        let mut kb = KnowledgeBase::new();
        kb.consult("grandparent(X,Y) :- parent(X,Z), parent(Z,Y). parent(alice,bob). parent(bob,carol).").unwrap();
        let results = kb.query("grandparent(alice, Y).").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[0]["Y"], "carol");
    }

    #[test]
    fn query_against_undefined_predicate_yields_no_solutions() {
        let mut kb = KnowledgeBase::new();
        kb.assertz("p(a).").unwrap();
        assert!(kb.query("p(a), q(X).").unwrap().is_empty());
    }

    #[test]
    fn shared_rule_variable_projects_the_same_value_to_both_query_variables() {
        let mut kb = KnowledgeBase::new();
        kb.assertz("r(X, X).").unwrap();
        let results = kb.query("r(Y, Z).").unwrap();
        assert_eq!(results[0]["Y"], results[0]["Z"]);
    }

    #[test]
    fn program_and_asserted_facts_never_overlap() {
        let mut kb = KnowledgeBase::new();
        kb.consult("parent(alice,bob).").unwrap();
        kb.assertz("parent(bob,carol).").unwrap();
        assert_eq!(kb.program_rules().len(), 1);
        assert_eq!(kb.asserted_facts().len(), 1);
    }

    #[test]
    fn retract_removes_at_most_one_clause() {
        let mut kb = KnowledgeBase::new();
        kb.assertz("p(a).").unwrap();
        kb.assertz("p(a).").unwrap();
        kb.retract("p(a).").unwrap();
        assert_eq!(kb.asserted_facts().len(), 1);
    }

    #[test]
    fn retractall_leaves_no_matching_clause() {
        let mut kb = KnowledgeBase::new();
        kb.assertz("p(a).").unwrap();
        kb.assertz("p(b).").unwrap();
        kb.assertz("q(a).").unwrap();
        kb.retractall("p(_).").unwrap();
        assert_eq!(kb.asserted_facts().len(), 1);
        assert_eq!(kb.asserted_facts()[0].head, Term::predicate("q", vec![Term::constant("a")]));
    }

    #[test]
    fn retract_of_nonexistent_pattern_is_a_noop() {
        let mut kb = KnowledgeBase::new();
        kb.assertz("p(a).").unwrap();
        kb.retract("p(z).").unwrap();
        assert_eq!(kb.asserted_facts().len(), 1);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");

        let mut kb = KnowledgeBase::new();
        kb.consult("grandparent(X,Y) :- parent(X,Z), parent(Z,Y).").unwrap();
        kb.assertz("parent(alice,bob).").unwrap();
        kb.save(path.to_str().unwrap(), true, true).unwrap();

        let mut reloaded = KnowledgeBase::new();
        reloaded.load(path.to_str().unwrap(), true, true).unwrap();
        assert_eq!(reloaded.program_rules(), kb.program_rules());
        assert_eq!(reloaded.asserted_facts(), kb.asserted_facts());
    }

    #[test]
    fn load_respects_program_and_facts_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");

        let mut kb = KnowledgeBase::new();
        kb.consult("a.").unwrap();
        kb.assertz("b.").unwrap();
        kb.save(path.to_str().unwrap(), true, true).unwrap();

        let mut reloaded = KnowledgeBase::new();
        reloaded.assertz("preexisting.").unwrap();
        reloaded.load(path.to_str().unwrap(), true, false).unwrap();
        assert_eq!(reloaded.program_rules().len(), 1);
        // facts=false means asserted_facts is left untouched.
        assert_eq!(reloaded.asserted_facts().len(), 1);
        assert_eq!(reloaded.asserted_facts()[0].head, Term::predicate("preexisting", vec![]));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let mut kb = KnowledgeBase::new();
        let err = kb.load("/nonexistent/path/kb.json", true, true).unwrap_err();
        assert!(matches!(err, KbError::NotFound(_)));
    }

    #[test]
    fn consult_treats_slash_or_extension_as_a_path() {
        let mut kb = KnowledgeBase::new();
        let err = kb.consult("/nonexistent/family.pl").unwrap_err();
        assert!(matches!(err, KbError::NotFound(_)));
    }

    #[test]
    fn consult_is_atomic_on_parse_failure() {
        let mut kb = KnowledgeBase::new();
        kb.consult("parent(alice, bob).").unwrap();
        assert!(kb.consult("parent(alice, bob") .is_err());
        assert_eq!(kb.program_rules().len(), 1);
    }
}
