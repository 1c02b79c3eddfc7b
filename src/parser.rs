// src/parser.rs
//! Clause-source parsing: program text (or a single clause, or a
//! comma-separated query goal list) into the term language, via a pest
//! grammar.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

use crate::error::{ParseError, Position};
use crate::term::{Rule as Clause, Term};

#[derive(PestParser)]
#[grammar = "prolog.pest"]
struct PrologGrammar;

fn to_parse_error(err: pest::error::Error<Rule>) -> ParseError {
    let (line, column) = match err.line_col {
        pest::error::LineColLocation::Pos((l, c)) => (l, c),
        pest::error::LineColLocation::Span((l, c), _) => (l, c),
    };
    ParseError { message: err.variant.message().to_string(), position: Position { line, column } }
}

fn build_term(pair: Pair<Rule>) -> Term {
    match pair.as_rule() {
        Rule::term => build_term(pair.into_inner().next().unwrap()),
        Rule::number => Term::constant(pair.as_str()),
        Rule::variable => Term::var(pair.as_str()),
        Rule::name_term => {
            let mut inner = pair.into_inner();
            let name = inner.next().unwrap().as_str().to_string();
            let args: Vec<Term> = inner.map(build_term).collect();
            if args.is_empty() {
                Term::constant(name)
            } else {
                Term::predicate(name, args)
            }
        }
        other => unreachable!("unexpected term rule: {other:?}"),
    }
}

fn build_goal(pair: Pair<Rule>) -> Term {
    match pair.as_rule() {
        Rule::goal => build_goal(pair.into_inner().next().unwrap()),
        Rule::neg_goal => {
            let inner_goal = build_goal(pair.into_inner().next().unwrap());
            Term::predicate("\\+", vec![inner_goal])
        }
        Rule::comparison_goal => {
            let mut inner = pair.into_inner();
            let left = build_term(inner.next().unwrap());
            let op = inner.next().unwrap().as_str().to_string();
            let right = build_term(inner.next().unwrap());
            Term::predicate(op, vec![left, right])
        }
        Rule::op_call_goal => {
            let mut inner = pair.into_inner();
            let op = inner.next().unwrap().as_str().to_string();
            let args: Vec<Term> = inner.map(build_term).collect();
            Term::predicate(op, args)
        }
        Rule::plain_goal => {
            let mut inner = pair.into_inner();
            let name = inner.next().unwrap().as_str().to_string();
            let args: Vec<Term> = inner.map(build_term).collect();
            Term::predicate(name, args)
        }
        other => unreachable!("unexpected goal rule: {other:?}"),
    }
}

fn build_head(pair: Pair<Rule>) -> Term {
    // `head` wraps a single `plain_goal`.
    build_goal(pair.into_inner().next().unwrap())
}

fn build_body(pair: Pair<Rule>) -> Vec<Term> {
    pair.into_inner().map(build_goal).collect()
}

fn build_clause(pair: Pair<Rule>) -> Clause {
    let mut inner = pair.into_inner();
    let head = build_head(inner.next().unwrap());
    let body = match inner.next() {
        Some(body_pair) => build_body(body_pair),
        None => Vec::new(),
    };
    Clause { head, body }
}

/// Parses a full program: a sequence of whitespace-separated clauses,
/// each terminated by `.`, with `%` line comments.
pub fn parse_kb(text: &str) -> Result<Vec<Clause>, ParseError> {
    let mut pairs = PrologGrammar::parse(Rule::program, text).map_err(to_parse_error)?;
    let program = pairs.next().expect("program rule always matches on success");
    Ok(program
        .into_inner()
        .filter(|p| p.as_rule() == Rule::clause)
        .map(build_clause)
        .collect())
}

/// Parses a single clause. The terminating `.` is optional and is
/// stripped if present.
pub fn parse_rule(text: &str) -> Result<Clause, ParseError> {
    let mut pairs = PrologGrammar::parse(Rule::rule_only, text).map_err(to_parse_error)?;
    let top = pairs.next().expect("rule_only rule always matches on success");
    let mut inner = top.into_inner();
    let head = build_head(inner.next().unwrap());
    let body = match inner.next() {
        Some(p) if p.as_rule() == Rule::body => build_body(p),
        _ => Vec::new(),
    };
    Ok(Clause { head, body })
}

/// Parses a query: one or more comma-separated goals. The terminating
/// `.` is optional.
pub fn parse_query(text: &str) -> Result<Vec<Term>, ParseError> {
    let mut pairs = PrologGrammar::parse(Rule::query_only, text).map_err(to_parse_error)?;
    let top = pairs.next().expect("query_only rule always matches on success");
    let body_pair = top.into_inner().next().unwrap();
    Ok(build_body(body_pair))
}
