use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn solves_a_level_file() {
    let output = r"Solving levels/one-push.txt with goal-distance...
#####
#@$.#
#####

#####
# @*#
#####

Solved in 1 moves.
Nodes created total: 2
Unique states visited total: 2
Duplicate successors pruned total: 0
Stale heap entries skipped: 0
";

    Command::main_binary()
        .unwrap()
        .arg("levels/one-push.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn reports_no_solution_without_failing() {
    let output = r"Solving levels/no-solution.txt with goal-distance...
No solution.
Nodes created total: 1
Unique states visited total: 1
Duplicate successors pruned total: 0
Stale heap entries skipped: 0
";

    Command::main_binary()
        .unwrap()
        .arg("levels/no-solution.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn rejects_unknown_catalog_name() {
    Command::main_binary()
        .unwrap()
        .arg("--catalog")
        .arg("s99")
        .assert()
        .failure()
        .stdout("")
        .stderr("No such catalog puzzle: s99 (try s1..s19)\n");
}

#[test]
fn rejects_unknown_heuristic() {
    Command::main_binary()
        .unwrap()
        .arg("--heuristic")
        .arg("h9")
        .arg("levels/one-push.txt")
        .assert()
        .failure()
        .stdout("")
        .stderr("Unknown heuristic: h9 (try h0, h1, goal-distance)\n");
}

#[test]
fn rejects_conflicting_inputs() {
    // doesn't check stderr - clap's wording isn't ours to pin down
    // enough to test that it fails and doesn't print to stdout

    Command::main_binary()
        .unwrap()
        .arg("--catalog")
        .arg("s1")
        .arg("levels/one-push.txt")
        .assert()
        .failure()
        .stdout("");
}
