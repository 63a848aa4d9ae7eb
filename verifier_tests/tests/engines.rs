//! Property tests for the four formalism engines against small random
//! formulas, using a hand-rolled deterministic generator rather than a
//! `rand`/`proptest` dependency — the same choice `otter_lib`'s own
//! `generic::minimal_pcg` module makes for reproducible pseudorandomness
//! without pulling in the `rand` crate's full API surface.

use planproof::config::Config;
use planproof::driver;
use planproof::engine::horn::HornContent;
use planproof::engine::twocnf::{Literal as TwoCnfLiteral, TwoCnfContent};
use planproof::task::{Action, Task};

/// Minimal PCG32, translated the same way `otter_lib::generic::minimal_pcg`
/// translates the reference C implementation, without the `rand` crate's
/// `RngCore`/`SeedableRng` traits (this crate has no other use for `rand`).
struct MinimalPcg32 {
    state: u64,
    inc: u64,
}

impl MinimalPcg32 {
    fn new(seed: u64) -> Self {
        const INCREMENT: u64 = 3215534235932367344;
        MinimalPcg32 {
            state: seed.wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }

    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(6364136223846793005_u64).wrapping_add(self.inc);
        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }

    fn bool(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

fn all_models(fact_count: usize) -> Vec<Vec<bool>> {
    (0u32..(1 << fact_count))
        .map(|bits| (0..fact_count).map(|i| (bits >> i) & 1 == 1).collect())
        .collect()
}

/// Generates a random Horn formula over `fact_count` facts and its
/// brute-force model set, for comparison against the engine's
/// `contains_model`.
fn random_horn(rng: &mut MinimalPcg32, fact_count: usize, clause_count: usize) -> HornContent {
    let mut content = HornContent::default();
    for _ in 0..clause_count {
        let neg_count = rng.below(3) as usize;
        let negs = (0..neg_count).map(|_| rng.below(fact_count as u32)).collect();
        let pos = if rng.bool() { Some(rng.below(fact_count as u32)) } else { None };
        content.clauses.push(planproof::engine::horn::HornClause { negs, pos });
    }
    content
}

fn horn_contains_model_by_clauses(content: &HornContent, model: &[bool]) -> bool {
    content.clauses.iter().all(|clause| {
        clause.negs.iter().any(|&f| !model[f as usize]) || clause.pos.is_some_and(|f| model[f as usize])
    })
}

#[test]
fn horn_contains_model_matches_brute_force_evaluation() {
    let fact_count = 5;
    let mut rng = MinimalPcg32::new(0xC0FFEE);
    for _ in 0..30 {
        let content = random_horn(&mut rng, fact_count, 4);
        for model in all_models(fact_count) {
            assert_eq!(
                content.contains_model(&model),
                horn_contains_model_by_clauses(&content, &model),
                "model {model:?} disagreed for {content:?}"
            );
        }
    }
}

#[test]
fn horn_simplify_is_idempotent() {
    let fact_count = 4;
    let mut rng = MinimalPcg32::new(0xDEAD_BEEF);
    for _ in 0..30 {
        let mut once = random_horn(&mut rng, fact_count, 5);
        once.simplify();
        let mut twice = once.clone();
        twice.simplify();
        assert_eq!(twice.forced_true, once.forced_true);
        assert_eq!(twice.forced_false, once.forced_false);
    }
}

fn random_twocnf(rng: &mut MinimalPcg32, fact_count: usize, clause_count: usize) -> TwoCnfContent {
    let mut content = TwoCnfContent {
        var_count: fact_count,
        units: Vec::new(),
        clauses: Vec::new(),
    };
    let lit = |rng: &mut MinimalPcg32| TwoCnfLiteral {
        fact: rng.below(fact_count as u32),
        positive: rng.bool(),
    };
    for _ in 0..clause_count {
        content.clauses.push((lit(rng), lit(rng)));
    }
    content
}

fn twocnf_contains_model_by_clauses(content: &TwoCnfContent, model: &[bool]) -> bool {
    let holds = |l: TwoCnfLiteral| model[l.fact as usize] == l.positive;
    content.units.iter().all(|&u| holds(u)) && content.clauses.iter().all(|&(a, b)| holds(a) || holds(b))
}

#[test]
fn twocnf_contains_model_matches_brute_force_evaluation() {
    let fact_count = 5;
    let mut rng = MinimalPcg32::new(0x1234_5678);
    for _ in 0..30 {
        let content = random_twocnf(&mut rng, fact_count, 4);
        for model in all_models(fact_count) {
            assert_eq!(
                content.contains_model(&model),
                twocnf_contains_model_by_clauses(&content, &model),
                "model {model:?} disagreed for {content:?}"
            );
        }
    }
}

#[test]
fn twocnf_satisfiability_matches_brute_force_search() {
    let fact_count = 5;
    let mut rng = MinimalPcg32::new(0x5EED_5EED);
    for _ in 0..30 {
        let content = random_twocnf(&mut rng, fact_count, 6);
        let brute_force_sat = all_models(fact_count).iter().any(|m| twocnf_contains_model_by_clauses(&content, m));
        assert_eq!(content.is_satisfiable(), brute_force_sat);
    }
}

fn unreachable_single_fact_task() -> Task {
    Task::new(1, vec![], vec![false], vec![1]).unwrap()
}

fn self_looping_task() -> Task {
    let action = Action { pre: vec![0], add: vec![0], del: vec![] };
    Task::new(1, vec![action], vec![false], vec![1]).unwrap()
}

/// `discard_formulas` is purely a memory-management knob (§5.2): it may
/// free a Basic payload once its last use in the certificate has passed,
/// but it must never change which certificates verify.
#[test]
fn verdict_is_independent_of_discard_formulas() {
    let scenarios: Vec<(Task, &str)> = vec![
        (
            unreachable_single_fact_task(),
            "e 0 c i\n\
             a 0 a\n\
             e 1 p 0 0\n\
             e 2 c e\n\
             e 3 u 0 2\n\
             e 4 c g\n\
             e 5 i 0 4\n\
             k 0 s 1 3 b2\n\
             k 1 d 2 ed\n\
             k 2 s 5 2 b1\n\
             k 3 d 5 sd 2 1\n\
             k 4 d 0 pg 0 1 3\n\
             k 5 u ci 4\n",
        ),
        (self_looping_task(), "e 0 c g\ne 1 c e\nk 0 s 0 1 b1\n"),
        // A single Basic expression (a tautological Horn formula)
        // consulted by two separate subset claims at two separate
        // knowledge indices — the payload must survive until the
        // second, later consultation, not just the first.
        (
            unreachable_single_fact_task(),
            "e 0 h 0 0 0 ;\nk 0 s 0 0 b1\nk 1 s 0 0 b1\n",
        ),
    ];
    for (task, cert) in scenarios {
        let without_discard = driver::run(&task, cert, &Config { discard_formulas: false, ..Config::default() });
        let with_discard = driver::run(&task, cert, &Config { discard_formulas: true, ..Config::default() });
        assert_eq!(without_discard, with_discard);
    }
}
