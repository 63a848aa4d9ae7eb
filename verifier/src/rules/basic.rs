/*!
The five basic subset statements (§4.4, §4.5): B1 (plain literal
subset), B2/B3 (progression/regression), B4 (cross-formalism bridge),
B5 (action-set subset, delegated straight to the action-set store).

B1-B3 require every basic operand on a side to share one formalism;
Horn and 2-CNF additionally require the *left*-hand operands to be
un-negated (negating a Horn/2-CNF formula does not generally produce a
formula of the same class, so only the right-hand side — which is
refuted disjunct-by-disjunct rather than materialised — can carry a
negation). BDD and Explicit complement cheaply on either side.
*/

use crate::engine::bdd::NodeId;
use crate::engine::explicit::ExplicitContent;
use crate::engine::horn::HornContent;
use crate::engine::twocnf::TwoCnfContent;
use crate::engine::{Basic, FormalismKind};
use crate::expr::{Constant, ExprVariant};
use crate::store::expr_store::ExprStore;
use crate::types::err::RuleError;
use crate::types::ExprIndex;

use super::RuleContext;

/// What a [Literal] names: a formalism-owned basic expression, or one
/// of the three constant markers (§3.2), which only ever materialise
/// as a BDD cube (built from the task's initial/goal assignment).
#[derive(Clone, Copy, Debug)]
enum Operand {
    Expr(ExprIndex),
    Constant(Constant),
}

/// A reference to a basic set expression or constant marker, optionally negated.
#[derive(Clone, Copy, Debug)]
struct Literal {
    operand: Operand,
    negated: bool,
}

fn as_literal(store: &ExprStore, idx: ExprIndex) -> Option<Literal> {
    match store.get(idx).ok()? {
        ExprVariant::Basic(_) => Some(Literal {
            operand: Operand::Expr(idx),
            negated: false,
        }),
        ExprVariant::Constant(c) => Some(Literal {
            operand: Operand::Constant(*c),
            negated: false,
        }),
        ExprVariant::Negation(inner) => match store.get(*inner).ok()? {
            ExprVariant::Basic(_) => Some(Literal {
                operand: Operand::Expr(*inner),
                negated: true,
            }),
            ExprVariant::Constant(c) => Some(Literal {
                operand: Operand::Constant(*c),
                negated: true,
            }),
            _ => None,
        },
        _ => None,
    }
}

fn flatten_intersection(store: &ExprStore, idx: ExprIndex, out: &mut Vec<Literal>) -> bool {
    match store.get(idx) {
        Ok(ExprVariant::Intersection(a, b)) => flatten_intersection(store, *a, out) && flatten_intersection(store, *b, out),
        _ => match as_literal(store, idx) {
            Some(l) => {
                out.push(l);
                true
            }
            None => false,
        },
    }
}

fn flatten_union(store: &ExprStore, idx: ExprIndex, out: &mut Vec<Literal>) -> bool {
    match store.get(idx) {
        Ok(ExprVariant::Union(a, b)) => flatten_union(store, *a, out) && flatten_union(store, *b, out),
        _ => match as_literal(store, idx) {
            Some(l) => {
                out.push(l);
                true
            }
            None => false,
        },
    }
}

fn basic_of(store: &ExprStore, lit: Literal) -> Option<&Basic> {
    match lit.operand {
        Operand::Expr(idx) => store.get(idx).ok()?.as_basic(),
        Operand::Constant(_) => None,
    }
}

fn literal_kind(store: &ExprStore, lit: Literal) -> Option<FormalismKind> {
    match lit.operand {
        Operand::Expr(idx) => store.get(idx).ok()?.as_basic().map(|b| b.kind()),
        // a constant marker only ever materialises as a BDD cube.
        Operand::Constant(_) => Some(FormalismKind::Bdd),
    }
}

fn uniform_kind(store: &ExprStore, lits: &[Literal]) -> Option<FormalismKind> {
    let mut kind = None;
    for &lit in lits {
        let k = literal_kind(store, lit)?;
        match kind {
            None => kind = Some(k),
            Some(existing) if existing == k => {}
            _ => return None,
        }
    }
    kind
}

/// The BDD node for one literal: the formalism-owned node for a basic
/// expression (negated if the literal is), or the concrete cube for a
/// constant marker (§3.2) — EMPTY is false, INIT is the task's total
/// initial assignment, GOAL is the task's partial goal assignment.
fn bdd_node(ctx: &mut RuleContext, lit: Literal) -> Result<NodeId, RuleError> {
    match lit.operand {
        Operand::Expr(idx) => {
            let Basic::Bdd(set) = ctx.exprs.get(idx).map_err(|_| RuleError::WrongShape)?.as_basic().ok_or(RuleError::WrongShape)? else {
                return Err(RuleError::WrongShape);
            };
            let node = set.node().ok_or(RuleError::WrongShape)?;
            Ok(if lit.negated { ctx.bdd.not(node) } else { node })
        }
        Operand::Constant(c) => {
            let node = match c {
                Constant::Empty => ctx.bdd.constant(false),
                Constant::Init => ctx.bdd.cube(ctx.task.initial()),
                Constant::Goal => ctx.bdd.partial_cube(ctx.task.goal()),
            };
            Ok(if lit.negated { ctx.bdd.not(node) } else { node })
        }
    }
}

/// `⋂ L ⊆ ⋃ L′` over one formalism (§4.4 "B1").
pub fn b1(ctx: &mut RuleContext, left: ExprIndex, right: ExprIndex) -> Result<bool, RuleError> {
    let mut left_lits = Vec::new();
    let mut right_lits = Vec::new();
    if !flatten_intersection(ctx.exprs, left, &mut left_lits) || !flatten_union(ctx.exprs, right, &mut right_lits) {
        return Err(RuleError::WrongShape);
    }
    let left_kind = uniform_kind(ctx.exprs, &left_lits).ok_or(RuleError::WrongShape)?;
    let right_kind = uniform_kind(ctx.exprs, &right_lits).ok_or(RuleError::WrongShape)?;
    if left_lits.is_empty() || right_lits.is_empty() {
        // an empty intersection is the universal set, an empty union is
        // the empty set; only "universal ⊆ empty" remains, and it's
        // false unless the right side is also (trivially) universal.
        return Ok(left_lits.is_empty() && right_lits.is_empty());
    }
    if left_kind != right_kind {
        return Err(RuleError::WrongShape);
    }

    match left_kind {
        FormalismKind::Bdd => {
            let mut left_node = None;
            for &lit in &left_lits {
                let node = bdd_node(ctx, lit)?;
                left_node = Some(match left_node {
                    None => node,
                    Some(acc) => ctx.bdd.and(acc, node),
                });
            }
            let mut right_node = None;
            for &lit in &right_lits {
                let node = bdd_node(ctx, lit)?;
                right_node = Some(match right_node {
                    None => node,
                    Some(acc) => ctx.bdd.or(acc, node),
                });
            }
            Ok(ctx.bdd.subset(left_node.unwrap(), right_node.unwrap()))
        }
        FormalismKind::Horn => {
            if left_lits.iter().any(|l| l.negated) {
                return Err(RuleError::WrongShape);
            }
            let mut base: Option<HornContent> = None;
            for &lit in &left_lits {
                let Basic::Horn(set) = basic_of(ctx.exprs, lit).unwrap() else {
                    unreachable!()
                };
                base = Some(match base {
                    None => set.content_ref().clone(),
                    Some(acc) => HornContent::intersect(&acc, set.content_ref()),
                });
            }
            let right_contents: Vec<_> = right_lits
                .iter()
                .map(|lit| {
                    let Basic::Horn(set) = basic_of(ctx.exprs, *lit).unwrap() else {
                        unreachable!()
                    };
                    (lit.negated, set.content_ref())
                })
                .collect();
            Ok(HornContent::entails_union(&base.unwrap(), &right_contents))
        }
        FormalismKind::TwoCnf => {
            if left_lits.iter().any(|l| l.negated) {
                return Err(RuleError::WrongShape);
            }
            let mut base: Option<TwoCnfContent> = None;
            for &lit in &left_lits {
                let Basic::TwoCnf(set) = basic_of(ctx.exprs, lit).unwrap() else {
                    unreachable!()
                };
                base = Some(match base {
                    None => set.content_ref().clone(),
                    Some(mut acc) => {
                        acc.units.extend(set.content_ref().units.iter().copied());
                        acc.clauses.extend(set.content_ref().clauses.iter().copied());
                        acc
                    }
                });
            }
            let right_contents: Vec<_> = right_lits
                .iter()
                .map(|lit| {
                    let Basic::TwoCnf(set) = basic_of(ctx.exprs, *lit).unwrap() else {
                        unreachable!()
                    };
                    (lit.negated, set.content_ref())
                })
                .collect();
            Ok(TwoCnfContent::entails_union(&base.unwrap(), &right_contents))
        }
        FormalismKind::Explicit => {
            let resolve = |lit: Literal| -> Result<ExplicitContent, RuleError> {
                let Basic::Explicit(set) = basic_of(ctx.exprs, lit).unwrap() else {
                    unreachable!()
                };
                let content = set.content_ref().clone();
                Ok(if lit.negated { content.complement() } else { content })
            };
            let mut left_acc: Option<ExplicitContent> = None;
            for &lit in &left_lits {
                let content = resolve(lit)?;
                left_acc = Some(match left_acc {
                    None => content,
                    Some(acc) => ExplicitContent::intersect(&acc, &content),
                });
            }
            let mut right_acc: Option<ExplicitContent> = None;
            for &lit in &right_lits {
                let content = resolve(lit)?;
                right_acc = Some(match right_acc {
                    None => content,
                    Some(acc) => ExplicitContent::union(&acc, &content).ok_or(RuleError::WrongShape)?,
                });
            }
            Ok(left_acc.unwrap().is_subset(&right_acc.unwrap()))
        }
    }
}

/// Resolves a progression/regression's `X` operand into a single
/// formalism's conjunction (un-negated basic sets only, per §4.4's B2/B3).
fn resolve_x(store: &ExprStore, idx: ExprIndex) -> Option<(FormalismKind, Vec<Literal>)> {
    let mut lits = Vec::new();
    if !flatten_intersection(store, idx, &mut lits) || lits.iter().any(|l| l.negated) {
        return None;
    }
    let kind = uniform_kind(store, &lits)?;
    Some((kind, lits))
}

/// `(⋂ X)[A] ⊆ ⋃ L′` (§4.4 "B2", progression).
pub fn b2(ctx: &mut RuleContext, left: ExprIndex, right: ExprIndex) -> Result<bool, RuleError> {
    let ExprVariant::Progression(x_idx, a_idx) = *ctx.exprs.get(left).map_err(|_| RuleError::WrongShape)? else {
        return Err(RuleError::WrongShape);
    };
    let (x_kind, x_lits) = resolve_x(ctx.exprs, x_idx).ok_or(RuleError::WrongShape)?;
    let mut right_lits = Vec::new();
    if !flatten_union(ctx.exprs, right, &mut right_lits) {
        return Err(RuleError::WrongShape);
    }
    if uniform_kind(ctx.exprs, &right_lits) != Some(x_kind) {
        return Err(RuleError::WrongShape);
    }
    let actions = ctx.actions.members(a_idx, ctx.task).map_err(|_| RuleError::WrongShape)?;

    match x_kind {
        FormalismKind::Bdd => {
            let mut x_node = None;
            for &lit in &x_lits {
                let node = bdd_node(ctx, lit)?;
                x_node = Some(match x_node {
                    None => node,
                    Some(acc) => ctx.bdd.and(acc, node),
                });
            }
            let x_node = x_node.ok_or(RuleError::WrongShape)?;

            let mut right_node = None;
            for &lit in &right_lits {
                let node = bdd_node(ctx, lit)?;
                right_node = Some(match right_node {
                    None => node,
                    Some(acc) => ctx.bdd.or(acc, node),
                });
            }
            let right_node = right_node.ok_or(RuleError::WrongShape)?;
            let successor_primed = ctx.bdd.swap_primedness(right_node);

            for action_id in actions {
                let relation = ctx.bdd.action_relation(ctx.task.fact_count(), ctx.task.action(action_id));
                let progressed = ctx.bdd.and(x_node, relation);
                if !ctx.bdd.subset(progressed, successor_primed) {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        FormalismKind::Horn => {
            let mut base = None;
            for &lit in &x_lits {
                let Basic::Horn(set) = basic_of(ctx.exprs, lit).unwrap() else {
                    unreachable!()
                };
                base = Some(match base {
                    None => set.content_ref().clone(),
                    Some(acc) => HornContent::intersect(&acc, set.content_ref()),
                });
            }
            let base = base.ok_or(RuleError::WrongShape)?;
            let shifted_right: Vec<(bool, HornContent)> = right_lits
                .iter()
                .map(|lit| {
                    let Basic::Horn(set) = basic_of(ctx.exprs, *lit).unwrap() else {
                        unreachable!()
                    };
                    (lit.negated, set.content_ref().shifted(ctx.task.fact_count() as u32))
                })
                .collect();
            let shifted_refs: Vec<(bool, &HornContent)> = shifted_right.iter().map(|(n, c)| (*n, c)).collect();

            for action_id in &actions {
                let joint = base.joined_with_action(ctx.task.fact_count(), ctx.task.action(*action_id));
                if !HornContent::entails_union(&joint, &shifted_refs) {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        FormalismKind::TwoCnf | FormalismKind::Explicit => Err(RuleError::WrongShape),
    }
}

/// `[A](⋂ X) ⊆ ⋃ L′` (§4.4 "B3", regression).
pub fn b3(ctx: &mut RuleContext, left: ExprIndex, right: ExprIndex) -> Result<bool, RuleError> {
    let ExprVariant::Regression(x_idx, a_idx) = *ctx.exprs.get(left).map_err(|_| RuleError::WrongShape)? else {
        return Err(RuleError::WrongShape);
    };
    let (x_kind, x_lits) = resolve_x(ctx.exprs, x_idx).ok_or(RuleError::WrongShape)?;
    let mut right_lits = Vec::new();
    if !flatten_union(ctx.exprs, right, &mut right_lits) {
        return Err(RuleError::WrongShape);
    }
    if uniform_kind(ctx.exprs, &right_lits) != Some(x_kind) {
        return Err(RuleError::WrongShape);
    }
    let actions = ctx.actions.members(a_idx, ctx.task).map_err(|_| RuleError::WrongShape)?;

    match x_kind {
        FormalismKind::Bdd => {
            let mut x_node = None;
            for &lit in &x_lits {
                let node = bdd_node(ctx, lit)?;
                x_node = Some(match x_node {
                    None => node,
                    Some(acc) => ctx.bdd.and(acc, node),
                });
            }
            let x_node = x_node.ok_or(RuleError::WrongShape)?;
            let x_primed = ctx.bdd.swap_primedness(x_node);

            let mut right_node = None;
            for &lit in &right_lits {
                let node = bdd_node(ctx, lit)?;
                right_node = Some(match right_node {
                    None => node,
                    Some(acc) => ctx.bdd.or(acc, node),
                });
            }
            let right_node = right_node.ok_or(RuleError::WrongShape)?;

            for action_id in actions {
                let relation = ctx.bdd.action_relation(ctx.task.fact_count(), ctx.task.action(action_id));
                let reln_and_x = ctx.bdd.and(relation, x_primed);
                if !ctx.bdd.subset(reln_and_x, right_node) {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        FormalismKind::Horn => {
            let mut x_base = None;
            for &lit in &x_lits {
                let Basic::Horn(set) = basic_of(ctx.exprs, lit).unwrap() else {
                    unreachable!()
                };
                x_base = Some(match x_base {
                    None => set.content_ref().clone(),
                    Some(acc) => HornContent::intersect(&acc, set.content_ref()),
                });
            }
            let x_shifted = x_base.ok_or(RuleError::WrongShape)?.shifted(ctx.task.fact_count() as u32);

            let right_contents: Vec<_> = right_lits
                .iter()
                .map(|lit| {
                    let Basic::Horn(set) = basic_of(ctx.exprs, *lit).unwrap() else {
                        unreachable!()
                    };
                    (lit.negated, set.content_ref())
                })
                .collect();

            for action_id in &actions {
                let relation = HornContent::default().joined_with_action(ctx.task.fact_count(), ctx.task.action(*action_id));
                let joint = HornContent::intersect(&relation, &x_shifted);
                if !HornContent::entails_union(&joint, &right_contents) {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        FormalismKind::TwoCnf | FormalismKind::Explicit => Err(RuleError::WrongShape),
    }
}

/// `L ⊆ L′` across two different formalisms (§4.4 "B4"), bridged by
/// enumerating whichever side supports it — natively for BDD/Explicit,
/// or by brute-force over the full fact space for Horn/2-CNF and for
/// any constant marker (§3.2), which is how a deadness claim about a
/// Horn/2-CNF/Explicit expression ultimately grounds against EMPTY.
pub fn b4(ctx: &mut RuleContext, left: ExprIndex, right: ExprIndex) -> Result<bool, RuleError> {
    let left_lit = as_literal(ctx.exprs, left).ok_or(RuleError::WrongShape)?;
    let right_lit = as_literal(ctx.exprs, right).ok_or(RuleError::WrongShape)?;
    let left_kind = literal_kind(ctx.exprs, left_lit).ok_or(RuleError::WrongShape)?;
    let right_kind = literal_kind(ctx.exprs, right_lit).ok_or(RuleError::WrongShape)?;
    if left_kind == right_kind {
        return Err(RuleError::WrongShape); // same formalism (or two constants): use B1
    }

    let fact_count = ctx.task.fact_count();
    let left_models = enumerate_literal(ctx, left_lit, fact_count).ok_or(RuleError::NoBridge)?;

    for model in left_models {
        if !contains_literal(ctx, right_lit, &model) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Enumerates every model a literal admits over `fact_count` facts —
/// natively for an un-negated BDD/Explicit operand, brute-force over
/// the whole domain otherwise (any negation, Horn/2-CNF, or a constant
/// marker materialising outside its native BDD cube).
fn enumerate_literal(ctx: &RuleContext, lit: Literal, fact_count: usize) -> Option<Vec<Vec<bool>>> {
    if !lit.negated {
        if let Operand::Expr(idx) = lit.operand {
            match ctx.exprs.get(idx).ok()?.as_basic()? {
                Basic::Bdd(set) => return Some(ctx.bdd.enumerate_cubes(set.node()?, fact_count)),
                Basic::Explicit(set) => return Some(set.full_models(fact_count)),
                Basic::Horn(_) | Basic::TwoCnf(_) => {}
            }
        }
    }
    if fact_count > 20 {
        return None;
    }
    let mut out = Vec::new();
    for bits in 0u64..(1u64 << fact_count) {
        let model: Vec<bool> = (0..fact_count).map(|i| (bits >> i) & 1 == 1).collect();
        if contains_literal(ctx, lit, &model) {
            out.push(model);
        }
    }
    Some(out)
}

fn contains_literal(ctx: &RuleContext, lit: Literal, model: &[bool]) -> bool {
    let base = match lit.operand {
        Operand::Expr(idx) => match ctx.exprs.get(idx).ok().and_then(|v| v.as_basic()) {
            Some(Basic::Bdd(set)) => set.node().is_some_and(|n| ctx.bdd.contains_model(n, model)),
            Some(Basic::Horn(set)) => set.contains_model(model),
            Some(Basic::TwoCnf(set)) => set.contains_model(model),
            Some(Basic::Explicit(set)) => set.contains_full_model(model),
            None => return false,
        },
        Operand::Constant(Constant::Empty) => false,
        Operand::Constant(Constant::Init) => model == ctx.task.initial(),
        Operand::Constant(Constant::Goal) => ctx.task.satisfies_goal(model),
    };
    base != lit.negated
}

/// Action-set subset test (§4.4 "B5"), entirely in the action-set
/// store — `left`/`right` here address the action-set store, not the
/// expression store.
pub fn b5(ctx: &RuleContext, left: crate::types::ActionSetIndex, right: crate::types::ActionSetIndex) -> Result<bool, RuleError> {
    let left_members = ctx.actions.members(left, ctx.task).map_err(|_| RuleError::WrongShape)?;
    let right_members = ctx.actions.members(right, ctx.task).map_err(|_| RuleError::WrongShape)?;
    Ok(left_members.iter().all(|a| right_members.contains(a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bdd::Manager;
    use crate::engine::explicit::ExplicitSet;
    use crate::engine::Basic;
    use crate::expr::Constant;
    use crate::knowledge::KnowledgeBase;
    use crate::store::action_store::ActionSetStore;
    use crate::store::expr_store::ExprStore;
    use crate::task::{Action, Task};

    fn trivial_task() -> Task {
        Task::new(1, vec![Action { pre: vec![], add: vec![], del: vec![] }], vec![false], vec![-1]).unwrap()
    }

    #[test]
    fn b1_explicit_subset_holds_for_equal_sets() {
        let task = trivial_task();
        let mut exprs = ExprStore::new();
        let content = ExplicitContent::singleton(vec![0], vec![true]);
        exprs
            .add(0, ExprVariant::Basic(Basic::Explicit(ExplicitSet::new(content.clone()))))
            .unwrap();
        exprs
            .add(1, ExprVariant::Basic(Basic::Explicit(ExplicitSet::new(content))))
            .unwrap();
        let actions = ActionSetStore::new();
        let knowledge = KnowledgeBase::new();
        let mut mgr = Manager::new(task.fact_count());
        let mut ctx = RuleContext {
            exprs: &exprs,
            actions: &actions,
            knowledge: &knowledge,
            task: &task,
            bdd: &mut mgr,
        };
        assert_eq!(b1(&mut ctx, 0, 1), Ok(true));
    }

    #[test]
    fn b1_rejects_mismatched_formalisms() {
        let task = trivial_task();
        let mut exprs = ExprStore::new();
        exprs
            .add(0, ExprVariant::Basic(Basic::Explicit(ExplicitSet::new(ExplicitContent::singleton(vec![0], vec![true])))))
            .unwrap();
        exprs.add(1, ExprVariant::Constant(Constant::Empty)).unwrap();
        let actions = ActionSetStore::new();
        let knowledge = KnowledgeBase::new();
        let mut mgr = Manager::new(task.fact_count());
        let mut ctx = RuleContext {
            exprs: &exprs,
            actions: &actions,
            knowledge: &knowledge,
            task: &task,
            bdd: &mut mgr,
        };
        assert!(b1(&mut ctx, 0, 1).is_err());
    }

    #[test]
    fn b1_goal_not_subset_of_empty_via_constants() {
        // GOAL and EMPTY both materialise as BDD cubes, so B1 can evaluate
        // the claim directly, and any non-empty goal cube fails it.
        let task = Task::new(1, vec![], vec![false], vec![1]).unwrap();
        let mut exprs = ExprStore::new();
        exprs.add(0, ExprVariant::Constant(Constant::Goal)).unwrap();
        exprs.add(1, ExprVariant::Constant(Constant::Empty)).unwrap();
        let actions = ActionSetStore::new();
        let knowledge = KnowledgeBase::new();
        let mut mgr = Manager::new(task.fact_count());
        let mut ctx = RuleContext {
            exprs: &exprs,
            actions: &actions,
            knowledge: &knowledge,
            task: &task,
            bdd: &mut mgr,
        };
        assert_eq!(b1(&mut ctx, 0, 1), Ok(false));
    }

    #[test]
    fn b1_goal_subset_of_itself_via_constants() {
        let task = trivial_task();
        let mut exprs = ExprStore::new();
        exprs.add(0, ExprVariant::Constant(Constant::Goal)).unwrap();
        let actions = ActionSetStore::new();
        let knowledge = KnowledgeBase::new();
        let mut mgr = Manager::new(task.fact_count());
        let mut ctx = RuleContext {
            exprs: &exprs,
            actions: &actions,
            knowledge: &knowledge,
            task: &task,
            bdd: &mut mgr,
        };
        assert_eq!(b1(&mut ctx, 0, 0), Ok(true));
    }

    #[test]
    fn b4_bridges_unsatisfiable_horn_formula_to_empty_constant() {
        use crate::engine::horn::{HornContent, HornSet};
        let task = Task::new(1, vec![], vec![false], vec![1]).unwrap();
        let mut exprs = ExprStore::new();
        let mut forced_true = std::collections::HashSet::new();
        forced_true.insert(0u32);
        let mut forced_false = std::collections::HashSet::new();
        forced_false.insert(0u32);
        let content = HornContent {
            forced_true,
            forced_false,
            clauses: Vec::new(),
        };
        exprs.add(0, ExprVariant::Basic(Basic::Horn(HornSet::new(1, content)))).unwrap();
        exprs.add(1, ExprVariant::Constant(Constant::Empty)).unwrap();
        let actions = ActionSetStore::new();
        let knowledge = KnowledgeBase::new();
        let mut mgr = Manager::new(task.fact_count());
        let mut ctx = RuleContext {
            exprs: &exprs,
            actions: &actions,
            knowledge: &knowledge,
            task: &task,
            bdd: &mut mgr,
        };
        assert_eq!(b4(&mut ctx, 0, 1), Ok(true));
    }

    #[test]
    fn b4_rejects_two_constants_since_they_share_a_formalism() {
        let task = trivial_task();
        let mut exprs = ExprStore::new();
        exprs.add(0, ExprVariant::Constant(Constant::Init)).unwrap();
        exprs.add(1, ExprVariant::Constant(Constant::Empty)).unwrap();
        let actions = ActionSetStore::new();
        let knowledge = KnowledgeBase::new();
        let mut mgr = Manager::new(task.fact_count());
        let mut ctx = RuleContext {
            exprs: &exprs,
            actions: &actions,
            knowledge: &knowledge,
            task: &task,
            bdd: &mut mgr,
        };
        assert!(b4(&mut ctx, 0, 1).is_err());
    }
}
