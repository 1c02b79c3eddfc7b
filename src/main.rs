// src/main.rs
use std::collections::BTreeMap;
use std::env;
use std::error::Error;

use log::info;

use prolog_core::kb::normalize_clause_text;
use prolog_core::KnowledgeBase;

fn print_usage() {
    eprintln!("Usage: prologc <file.pl> [--query <goal>]");
}

fn print_predicate_table(kb: &KnowledgeBase) {
    let mut table: BTreeMap<(String, usize), usize> = BTreeMap::new();
    for rule in kb.program_rules().iter().chain(kb.asserted_facts().iter()) {
        if let prolog_core::Term::Predicate { name, args } = &rule.head {
            *table.entry((name.clone(), args.len())).or_insert(0) += 1;
        }
    }
    println!("Predicate table:");
    for ((name, arity), count) in table {
        println!("  {name}/{arity} -> {count} clause(s)");
    }
}

fn print_solutions(solutions: &[BTreeMap<String, String>]) {
    if solutions.is_empty() {
        println!("false.");
        return;
    }
    for solution in solutions {
        if solution.is_empty() {
            println!("true.");
            continue;
        }
        let rendered: Vec<String> =
            solution.iter().map(|(var, value)| format!("{var} = {value}")).collect();
        println!("{}", rendered.join(", "));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }
    let filename = &args[1];
    let query_text = args
        .iter()
        .position(|a| a == "--query" || a == "-q")
        .and_then(|i| args.get(i + 1));

    let mut kb = KnowledgeBase::new();
    kb.consult(filename)?;
    info!(
        "consulted '{}': {} program rule(s)",
        filename,
        kb.program_rules().len()
    );
    print_predicate_table(&kb);

    if let Some(goal) = query_text {
        let goal = normalize_clause_text(goal);
        let solutions = kb.query(goal)?;
        println!("\n?- {goal}.");
        print_solutions(&solutions);
    }

    Ok(())
}
