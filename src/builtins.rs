// src/builtins.rs
//! Date/time built-in predicates. Recognized by functor name; each
//! returns the (possibly empty) set of substitutions extending `subst`
//! with the built-in's output bindings. Failure contributes zero
//! solutions — built-ins never raise.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::trace;

use crate::subst::Substitution;
use crate::term::Term;
use crate::unify::unify;

/// The functor names this module handles.
pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "date_time_stamp" | "stamp_date_time" | "get_time" | "current_time" | "weekday"
    )
}

/// Dispatches a recognized built-in goal, already walked through
/// `subst`, returning every extended substitution it yields.
pub fn evaluate(goal: &Term, subst: &Substitution) -> Vec<Substitution> {
    let (name, args) = match goal.functor() {
        Some(pair) => pair,
        None => return Vec::new(),
    };
    trace!("built-in call: {name}/{}", args_len(goal));
    match name {
        "date_time_stamp" => date_time_stamp(goal, subst),
        "stamp_date_time" => stamp_date_time(goal, subst),
        "get_time" | "current_time" => get_time(goal, subst),
        "weekday" => weekday(goal, subst),
        _ => Vec::new(),
    }
}

fn args_len(goal: &Term) -> usize {
    match goal {
        Term::Predicate { args, .. } => args.len(),
        _ => 0,
    }
}

fn numeric_field(subst: &Substitution, term: &Term) -> Option<i64> {
    let ground = subst.apply(term);
    if ground.is_numeric() {
        Some(ground.numeric_value() as i64)
    } else {
        None
    }
}

/// `date_time_stamp(+DateCompound, -TimeStamp)`: converts
/// `date(Y,M,D,H,Mi,S,_,_,_)` to integer seconds since the UTC epoch.
fn date_time_stamp(goal: &Term, subst: &Substitution) -> Vec<Substitution> {
    let args = match goal {
        Term::Predicate { args, .. } if args.len() == 2 => args,
        _ => return Vec::new(),
    };
    let date_term = subst.apply(&args[0]);
    let (name, date_args) = match &date_term {
        Term::Predicate { name, args } => (name.as_str(), args),
        _ => return Vec::new(),
    };
    if name != "date" || date_args.len() < 6 {
        return Vec::new();
    }
    let fields: Option<Vec<i64>> =
        date_args[..6].iter().map(|t| numeric_field(subst, t)).collect();
    let fields = match fields {
        Some(f) => f,
        None => return Vec::new(),
    };
    let (year, month, day, hour, min, sec) =
        (fields[0], fields[1], fields[2], fields[3], fields[4], fields[5]);
    let date = match NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let time = match date.and_hms_opt(hour as u32, min as u32, sec as u32) {
        Some(t) => t,
        None => return Vec::new(),
    };
    let timestamp = Utc.from_utc_datetime(&time).timestamp();
    unify(&args[1], &Term::constant(timestamp.to_string()), subst)
        .into_iter()
        .collect()
}

/// `stamp_date_time(+TimeStamp, -DateCompound, +TimeZone)`: inverse of
/// `date_time_stamp/2`. The timezone argument is accepted but ignored;
/// the engine only ever produces UTC date/time structures.
fn stamp_date_time(goal: &Term, subst: &Substitution) -> Vec<Substitution> {
    let args = match goal {
        Term::Predicate { args, .. } if args.len() == 3 => args,
        _ => return Vec::new(),
    };
    let timestamp = match numeric_field(subst, &args[0]) {
        Some(t) => t,
        None => return Vec::new(),
    };
    let dt: NaiveDateTime = match chrono::DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.naive_utc(),
        None => return Vec::new(),
    };
    let date_structure = Term::predicate(
        "date",
        vec![
            Term::constant(dt.year().to_string()),
            Term::constant(dt.month().to_string()),
            Term::constant(dt.day().to_string()),
            Term::constant(dt.hour().to_string()),
            Term::constant(dt.minute().to_string()),
            Term::constant(dt.second().to_string()),
            Term::constant(dt.weekday().number_from_monday().to_string()),
            Term::constant(dt.ordinal().to_string()),
            Term::constant("0".to_string()),
        ],
    );
    unify(&args[1], &date_structure, subst).into_iter().collect()
}

/// `get_time(-TimeStamp)` / `current_time(-TimeStamp)`: the current
/// UTC epoch second. Non-deterministic across calls; never consults
/// the KB.
fn get_time(goal: &Term, subst: &Substitution) -> Vec<Substitution> {
    let args = match goal {
        Term::Predicate { args, .. } if args.len() == 1 => args,
        _ => return Vec::new(),
    };
    let now = Utc::now().timestamp();
    unify(&args[0], &Term::constant(now.to_string()), subst)
        .into_iter()
        .collect()
}

/// `weekday(+Year, +Month, +Day, -WeekDay)`: ISO weekday (1=Monday..
/// 7=Sunday) of the Gregorian date. Fails on an invalid date.
fn weekday(goal: &Term, subst: &Substitution) -> Vec<Substitution> {
    let args = match goal {
        Term::Predicate { args, .. } if args.len() == 4 => args,
        _ => return Vec::new(),
    };
    let year = numeric_field(subst, &args[0]);
    let month = numeric_field(subst, &args[1]);
    let day = numeric_field(subst, &args[2]);
    let (year, month, day) = match (year, month, day) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return Vec::new(),
    };
    let date = match NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let iso_weekday = date.weekday().number_from_monday();
    unify(&args[3], &Term::constant(iso_weekday.to_string()), subst)
        .into_iter()
        .collect()
}
