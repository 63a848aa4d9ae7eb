//! Individual derivation-rule tests built directly on [RuleContext],
//! mirroring the `#[cfg(test)]` modules the library crate keeps
//! alongside each rule module — exercised here from outside the crate
//! instead, against the public API.
//!
//! Covers the deadness induction rules (PI/RI, the real engines behind
//! spec.md's S3/S4) plus a representative slice of the lattice rules.

use planproof::engine::bdd::Manager;
use planproof::engine::horn::{HornContent, HornSet};
use planproof::engine::Basic;
use planproof::expr::{Constant, ExprVariant};
use planproof::knowledge::{KnowledgeBase, KnowledgeItem};
use planproof::rules::{basic, dead, lattice, RuleContext};
use planproof::store::action_store::{ActionSetStore, ActionSetVariant};
use planproof::store::expr_store::ExprStore;
use planproof::task::Task;

fn unreachable_task() -> Task {
    Task::new(1, vec![], vec![false], vec![1]).unwrap()
}

/// S3 — grounding deadness of a non-BDD formula: `S` is a Horn formula
/// forcing fact 0 both true and false, so it has no models at all, even
/// though it is not *syntactically* the constant EMPTY. B4 bridges
/// `S ⊆ EMPTY` across the Horn/BDD boundary (B1 alone cannot, since it
/// requires both sides of a subset claim to already share one
/// formalism), and SD closes `Dead(S)` from there — the mechanism
/// ED/SD/PG/RI need to ever certify deadness for a Horn/2-CNF/Explicit
/// expression instead of only a literal BDD EMPTY.
#[test]
fn s3_horn_deadness_grounds_through_b4_bridge_to_empty() {
    let task = unreachable_task();
    let mut exprs = ExprStore::new();
    let actions = ActionSetStore::new();
    let mut knowledge = KnowledgeBase::new();
    let mut mgr = Manager::new(task.fact_count());

    // e0: S, an unsatisfiable Horn formula (fact 0 forced both ways).
    let mut forced_true = std::collections::HashSet::new();
    forced_true.insert(0u32);
    let mut forced_false = std::collections::HashSet::new();
    forced_false.insert(0u32);
    let s_content = HornContent {
        forced_true,
        forced_false,
        clauses: Vec::new(),
    };
    exprs.add(0, ExprVariant::Basic(Basic::Horn(HornSet::new(1, s_content)))).unwrap();
    exprs.add(1, ExprVariant::Constant(Constant::Empty)).unwrap(); // EMPTY

    macro_rules! ctx {
        () => {
            RuleContext {
                exprs: &exprs,
                actions: &actions,
                knowledge: &knowledge,
                task: &task,
                bdd: &mut mgr,
            }
        };
    }

    assert_eq!(dead::ed(&ctx!(), 1), Ok(true)); // Dead(EMPTY)
    knowledge.add(0, KnowledgeItem::Dead(1)).unwrap();

    // S has no models at all, so it is vacuously a subset of EMPTY —
    // bridged directly across the Horn/BDD boundary.
    assert_eq!(basic::b4(&mut ctx!(), 0, 1), Ok(true)); // S ⊆ EMPTY (Horn vs. BDD bridge)
    knowledge.add(1, KnowledgeItem::Subset(0, 1)).unwrap();

    assert_eq!(dead::sd(&ctx!(), 0, 1, 0), Ok(true)); // Dead(S)
}

/// S4 — regression mirror of S3, using the BDD engine and RI: `s`
/// stands for "fact 0 is true" (the goal); regressing it over the empty
/// action set is vacuous, and `Subset(GOAL, s)` holds by reflexivity,
/// so RI concludes `Dead(Negation(s))`.
#[test]
fn s4_dead_negation_via_bdd_regression() {
    let task = unreachable_task();
    let mut exprs = ExprStore::new();
    let mut actions = ActionSetStore::new();
    let mut knowledge = KnowledgeBase::new();
    let mut mgr = Manager::new(task.fact_count());

    exprs.add(0, ExprVariant::Constant(Constant::Goal)).unwrap(); // s = GOAL
    exprs.add(1, ExprVariant::Negation(0)).unwrap(); // i = ¬s
    actions.add(0, ActionSetVariant::All).unwrap();
    exprs.add(2, ExprVariant::Regression(0, 0)).unwrap(); // [A_all]s
    exprs.add(3, ExprVariant::Constant(Constant::Empty)).unwrap(); // EMPTY
    exprs.add(4, ExprVariant::Union(0, 3)).unwrap(); // s ∪ EMPTY

    macro_rules! ctx {
        () => {
            RuleContext {
                exprs: &exprs,
                actions: &actions,
                knowledge: &knowledge,
                task: &task,
                bdd: &mut mgr,
            }
        };
    }

    assert_eq!(basic::b3(&mut ctx!(), 2, 4), Ok(true)); // [A_all]s ⊆ s ∪ EMPTY (vacuous)
    knowledge.add(0, KnowledgeItem::Subset(2, 4)).unwrap();

    assert_eq!(dead::ed(&ctx!(), 3), Ok(true)); // Dead(EMPTY)
    knowledge.add(1, KnowledgeItem::Dead(3)).unwrap();

    assert_eq!(basic::b1(&mut ctx!(), 0, 0), Ok(true)); // GOAL ⊆ s (reflexive, s == GOAL)
    knowledge.add(2, KnowledgeItem::Subset(0, 0)).unwrap();

    assert_eq!(dead::ri(&ctx!(), 1, 0, 1, 2), Ok(true)); // Dead(¬s)
}

#[test]
fn ud_combines_two_dead_halves() {
    let task = unreachable_task();
    let mut exprs = ExprStore::new();
    let actions = ActionSetStore::new();
    let mut knowledge = KnowledgeBase::new();
    let mut mgr = Manager::new(task.fact_count());
    exprs.add(0, ExprVariant::Constant(Constant::Empty)).unwrap();
    exprs.add(1, ExprVariant::Constant(Constant::Empty)).unwrap();
    exprs.add(2, ExprVariant::Union(0, 1)).unwrap();
    knowledge.add(0, KnowledgeItem::Dead(0)).unwrap();
    knowledge.add(1, KnowledgeItem::Dead(1)).unwrap();
    let ctx = RuleContext {
        exprs: &exprs,
        actions: &actions,
        knowledge: &knowledge,
        task: &task,
        bdd: &mut mgr,
    };
    assert_eq!(dead::ud(&ctx, 2, 0, 1), Ok(true));
}

#[test]
fn lattice_introduction_and_transitivity_chain() {
    let task = unreachable_task();
    let mut exprs = ExprStore::new();
    let actions = ActionSetStore::new();
    let mut knowledge = KnowledgeBase::new();
    let mut mgr = Manager::new(task.fact_count());

    exprs.add(0, ExprVariant::Constant(Constant::Empty)).unwrap(); // a
    exprs.add(1, ExprVariant::Constant(Constant::Goal)).unwrap(); // b
    exprs.add(2, ExprVariant::Union(0, 1)).unwrap(); // a ∪ b
    exprs.add(3, ExprVariant::Constant(Constant::Init)).unwrap(); // c, unrelated third set

    knowledge.add(0, KnowledgeItem::Subset(0, 0)).unwrap(); // Subset(a, a) -- premise for UL

    let ctx = RuleContext {
        exprs: &exprs,
        actions: &actions,
        knowledge: &knowledge,
        task: &task,
        bdd: &mut mgr,
    };
    // UL: a ⊆ a, a ∪ b = Union(a, _) => a ⊆ a ∪ b.
    assert_eq!(lattice::ul(&ctx, 0, 2, 0), Ok(true));
    // UR would need the premise keyed to b instead; reusing the a-premise must fail.
    assert_eq!(lattice::ur(&ctx, 0, 2, 0), Ok(false));
}

#[test]
fn st_chains_two_subset_premises() {
    let task = unreachable_task();
    let mut exprs = ExprStore::new();
    let actions = ActionSetStore::new();
    let mut knowledge = KnowledgeBase::new();
    let mut mgr = Manager::new(task.fact_count());
    exprs.add(0, ExprVariant::Constant(Constant::Empty)).unwrap();
    exprs.add(1, ExprVariant::Constant(Constant::Goal)).unwrap();
    exprs.add(2, ExprVariant::Constant(Constant::Init)).unwrap();
    knowledge.add(0, KnowledgeItem::Subset(0, 1)).unwrap();
    knowledge.add(1, KnowledgeItem::Subset(1, 2)).unwrap();
    let ctx = RuleContext {
        exprs: &exprs,
        actions: &actions,
        knowledge: &knowledge,
        task: &task,
        bdd: &mut mgr,
    };
    assert_eq!(lattice::st(&ctx, 0, 2, 0, 1), Ok(true));
    // the middle terms must agree; swapping the premises breaks the chain.
    assert_eq!(lattice::st(&ctx, 0, 2, 1, 0), Ok(false));
}

#[test]
fn di_is_a_zero_premise_tautology_shape_check() {
    let task = unreachable_task();
    let mut exprs = ExprStore::new();
    let actions = ActionSetStore::new();
    let knowledge = KnowledgeBase::new();
    let mut mgr = Manager::new(task.fact_count());
    exprs.add(0, ExprVariant::Constant(Constant::Empty)).unwrap(); // x
    exprs.add(1, ExprVariant::Constant(Constant::Goal)).unwrap(); // a
    exprs.add(2, ExprVariant::Constant(Constant::Init)).unwrap(); // b
    exprs.add(3, ExprVariant::Union(1, 2)).unwrap(); // a ∪ b
    exprs.add(4, ExprVariant::Intersection(0, 3)).unwrap(); // x ∩ (a ∪ b)
    exprs.add(5, ExprVariant::Intersection(0, 1)).unwrap(); // x ∩ a
    exprs.add(6, ExprVariant::Intersection(0, 2)).unwrap(); // x ∩ b
    exprs.add(7, ExprVariant::Union(5, 6)).unwrap(); // (x ∩ a) ∪ (x ∩ b)
    let ctx = RuleContext {
        exprs: &exprs,
        actions: &actions,
        knowledge: &knowledge,
        task: &task,
        bdd: &mut mgr,
    };
    assert_eq!(lattice::di(&ctx, 4, 7), Ok(true));
}
