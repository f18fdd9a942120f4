#[macro_use]
extern crate prettytable;

use std::io;
use std::io::Write;
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgGroup};
use log::LevelFilter;
use prettytable::Table;
use separator::Separatable;

use sokoban_astar::catalog::{self, Tier};
use sokoban_astar::{solve, GridState, HeuristicKind, SearchOutcome};

fn main() {
    let matches = App::new("sokoban-astar")
        .about("Optimal Sokoban solver - A* over grid states")
        .arg(
            Arg::with_name("heuristic")
                .short("H")
                .long("heuristic")
                .takes_value(true)
                .default_value("goal-distance")
                .help("h0 | h1 | goal-distance"),
        )
        .arg(
            Arg::with_name("catalog")
                .short("c")
                .long("catalog")
                .takes_value(true)
                .help("solve a built-in benchmark position (s1..s19)"),
        )
        .arg(
            Arg::with_name("all")
                .short("a")
                .long("all")
                .help("solve the benchmark catalog and print a summary table"),
        )
        .arg(
            Arg::with_name("extreme")
                .short("x")
                .long("extreme")
                .help("include the extreme tier in --all"),
        )
        .arg(
            Arg::with_name("yes")
                .short("y")
                .long("yes")
                .help("agree to any confirmation prompts"),
        )
        .arg(
            Arg::with_name("status")
                .short("s")
                .long("status")
                .help("log search progress at each new depth"),
        )
        .arg(Arg::with_name("file").help("level file in XSB notation"))
        .group(
            ArgGroup::with_name("input")
                .args(&["catalog", "all", "file"])
                .required(true),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_default_env();
    if matches.is_present("status") {
        logger.filter(Some("sokoban_astar"), LevelFilter::Info);
    }
    logger.init();

    let kind: HeuristicKind = matches
        .value_of("heuristic")
        .unwrap()
        .parse()
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        });

    if matches.is_present("all") {
        run_catalog(
            kind,
            matches.is_present("extreme"),
            matches.is_present("yes"),
        );
    } else if let Some(name) = matches.value_of("catalog") {
        let puzzle = catalog::by_name(name).unwrap_or_else(|| {
            eprintln!("No such catalog puzzle: {} (try s1..s19)", name);
            process::exit(1);
        });
        if puzzle.tier == Tier::Extreme && !matches.is_present("yes") {
            confirm_extreme();
        }
        println!("Solving catalog puzzle {} with {}...", puzzle.name, kind);
        let outcome = solve(&puzzle.start(), kind);
        report(&outcome, Some(puzzle.optimal_depth));
    } else {
        let path = matches.value_of("file").unwrap();
        let level = std::fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Can't read file {}: {}", path, err);
            process::exit(1);
        });
        let state: GridState = level.parse().unwrap_or_else(|err| {
            eprintln!("Failed to parse {}: {}", path, err);
            process::exit(1);
        });
        println!("Solving {} with {}...", path, kind);
        let outcome = solve(&state, kind);
        report(&outcome, None);
    }
}

fn report(outcome: &SearchOutcome, known_optimal: Option<u16>) {
    match outcome.path_states() {
        Some(states) => {
            for state in &states {
                println!("{}", state);
            }
            match known_optimal {
                Some(optimal) => println!(
                    "Solved in {} moves (known optimal: {}).",
                    states.len() - 1,
                    optimal
                ),
                None => println!("Solved in {} moves.", states.len() - 1),
            }
        }
        None => println!("No solution."),
    }
    print!("{}", outcome.stats);
}

fn run_catalog(kind: HeuristicKind, extreme: bool, yes: bool) {
    if extreme && !yes {
        confirm_extreme();
    }

    let mut table = Table::new();
    table.set_titles(row![
        "Puzzle", "Tier", "Depth", "Optimal", "Created", "Visited", "Time"
    ]);
    for puzzle in catalog::ALL.iter() {
        if puzzle.tier == Tier::Extreme && !extreme {
            continue;
        }
        let started = Instant::now();
        let outcome = solve(&puzzle.start(), kind);
        // separator doesn't support u128
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let depth = match outcome.depth() {
            Some(depth) => depth.to_string(),
            None => "-".to_string(),
        };
        table.add_row(row![
            puzzle.name,
            format!("{:?}", puzzle.tier),
            depth,
            puzzle.optimal_depth,
            outcome.stats.total_created().separated_string(),
            outcome.stats.total_visited().separated_string(),
            format!("{} ms", elapsed_ms.separated_string()),
        ]);
    }
    table.printstd();
}

fn confirm_extreme() {
    print!(
        "WARNING: extreme benchmark positions can take a very long time \
         with a weak heuristic. Continue anyway? [y/N] "
    );
    io::stdout().flush().expect("flush stdout");
    let mut response = String::new();
    io::stdin().read_line(&mut response).expect("read stdin");
    let response = response.trim().to_lowercase();
    if response != "y" && response != "yes" {
        eprintln!("Decided against running.");
        process::exit(1);
    }
}
