//! Shared helpers for `verifier_tests`' end-to-end certificate scenarios
//! and rule-level tests, mirroring the small fixture builders `otter_tests`
//! keeps alongside its per-file integration tests.

use planproof::config::Config;
use planproof::driver::{self, Verdict};
use planproof::task::{Action, Task};
use planproof::types::err::ErrorKind;

/// A task with one fact, no actions, initial `¬p`, goal `{p}` — the
/// trivially unreachable task used by several scenarios.
pub fn unreachable_single_fact_task() -> Task {
    Task::new(1, vec![], vec![false], vec![1]).unwrap()
}

/// One fact `p`, one action with precondition `{p}` and effect `add p`.
pub fn self_looping_task() -> Task {
    let action = Action {
        pre: vec![0],
        add: vec![0],
        del: vec![],
    };
    Task::new(1, vec![action], vec![false], vec![1]).unwrap()
}

pub fn run(task: &Task, certificate: &str) -> Result<Verdict, ErrorKind> {
    driver::run(task, certificate, &Config::default())
}

pub fn run_with(task: &Task, certificate: &str, config: &Config) -> Result<Verdict, ErrorKind> {
    driver::run(task, certificate, config)
}
