/*!
Reduced ordered binary decision diagrams over interleaved primed and
unprimed variables (§4.4.1).

Fact `f` occupies two adjacent variable slots: `2*f` (unprimed, the
"current state" reading) and `2*f + 1` (primed, the "successor state"
reading used by transition relations). Interleaving keeps an action's
frame axioms (`x_f <-> x_f'`) local in the variable order, which is the
same locality argument used for an action's own precondition/effect
variables in most symbolic planning encoders.

A single [Manager] is shared by every BDD expression belonging to one
[crate::store::expr_store::ExprStore], so structurally identical
sub-diagrams across different expressions are hash-consed into the
same node.
*/

use std::collections::HashMap;

use crate::task::{Action, Task};
use crate::types::{ActionId, Fact};

pub type NodeId = u32;

const FALSE: NodeId = 0;
const TRUE: NodeId = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Node {
    var: u32,
    low: NodeId,
    high: NodeId,
}

const TERMINAL_VAR: u32 = u32::MAX;

/// Owns every node ever built for one expression store; all BDD-backed
/// expressions share one manager so identical sub-diagrams are reused.
#[derive(Clone, Debug)]
pub struct Manager {
    nodes: Vec<Node>,
    unique: HashMap<(u32, NodeId, NodeId), NodeId>,
    ite_cache: HashMap<(NodeId, NodeId, NodeId), NodeId>,
    var_count: u32,
}

impl Manager {
    pub fn new(fact_count: usize) -> Self {
        let mut nodes = Vec::with_capacity(2);
        nodes.push(Node {
            var: TERMINAL_VAR,
            low: FALSE,
            high: FALSE,
        });
        nodes.push(Node {
            var: TERMINAL_VAR,
            low: TRUE,
            high: TRUE,
        });
        Manager {
            nodes,
            unique: HashMap::new(),
            ite_cache: HashMap::new(),
            var_count: fact_count as u32 * 2,
        }
    }

    pub fn constant(&self, value: bool) -> NodeId {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    fn var(&self, n: NodeId) -> u32 {
        self.nodes[n as usize].var
    }

    fn low(&self, n: NodeId) -> NodeId {
        self.nodes[n as usize].low
    }

    fn high(&self, n: NodeId) -> NodeId {
        self.nodes[n as usize].high
    }

    fn mk(&mut self, var: u32, low: NodeId, high: NodeId) -> NodeId {
        if low == high {
            return low;
        }
        if let Some(&existing) = self.unique.get(&(var, low, high)) {
            return existing;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node { var, low, high });
        self.unique.insert((var, low, high), id);
        id
    }

    /// The BDD testing a single variable positively or negatively.
    pub fn literal(&mut self, var: u32, positive: bool) -> NodeId {
        if positive {
            self.mk(var, FALSE, TRUE)
        } else {
            self.mk(var, TRUE, FALSE)
        }
    }

    /// Unprimed variable slot for a fact.
    pub fn unprimed(&self, fact: Fact) -> u32 {
        fact * 2
    }

    /// Primed variable slot for a fact.
    pub fn primed(&self, fact: Fact) -> u32 {
        fact * 2 + 1
    }

    fn cofactor(&self, n: NodeId, var: u32) -> (NodeId, NodeId) {
        if self.var(n) == var {
            (self.low(n), self.high(n))
        } else {
            (n, n)
        }
    }

    /// The generic if-then-else operator: every other boolean
    /// connective is expressed through this one recursive definition,
    /// including the variable-swap used by [Self::permute].
    pub fn ite(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        if f == TRUE {
            return g;
        }
        if f == FALSE {
            return h;
        }
        if g == h {
            return g;
        }
        if g == TRUE && h == FALSE {
            return f;
        }
        if let Some(&cached) = self.ite_cache.get(&(f, g, h)) {
            return cached;
        }

        let top = [self.var(f), self.var(g), self.var(h)]
            .into_iter()
            .min()
            .unwrap();

        let (f0, f1) = self.cofactor(f, top);
        let (g0, g1) = self.cofactor(g, top);
        let (h0, h1) = self.cofactor(h, top);

        let lo = self.ite(f0, g0, h0);
        let hi = self.ite(f1, g1, h1);
        let result = self.mk(top, lo, hi);
        self.ite_cache.insert((f, g, h), result);
        result
    }

    pub fn and(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.ite(a, b, FALSE)
    }

    pub fn or(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.ite(a, TRUE, b)
    }

    pub fn not(&mut self, a: NodeId) -> NodeId {
        self.ite(a, FALSE, TRUE)
    }

    pub fn iff(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let nb = self.not(b);
        self.ite(a, b, nb)
    }

    pub fn and_many(&mut self, nodes: &[NodeId]) -> NodeId {
        nodes.iter().fold(TRUE, |acc, &n| self.and(acc, n))
    }

    pub fn or_many(&mut self, nodes: &[NodeId]) -> NodeId {
        nodes.iter().fold(FALSE, |acc, &n| self.or(acc, n))
    }

    /// `a ⊆ b` iff `a ∧ ¬b` is unsatisfiable.
    pub fn subset(&mut self, a: NodeId, b: NodeId) -> bool {
        let nb = self.not(b);
        self.and(a, nb) == FALSE
    }

    pub fn is_false(&self, n: NodeId) -> bool {
        n == FALSE
    }

    /// Remaps every variable under `pi`, rebuilding the diagram through
    /// [Self::ite] so the result respects the manager's fixed variable
    /// order regardless of how `pi` permutes levels. Used to move a set
    /// between unprimed and primed variables.
    pub fn permute(&mut self, n: NodeId, pi: &dyn Fn(u32) -> u32, memo: &mut HashMap<NodeId, NodeId>) -> NodeId {
        if n == TRUE || n == FALSE {
            return n;
        }
        if let Some(&cached) = memo.get(&n) {
            return cached;
        }
        let v = self.var(n);
        let lo = self.low(n);
        let hi = self.high(n);
        let plo = self.permute(lo, pi, memo);
        let phi = self.permute(hi, pi, memo);
        let test = self.literal(pi(v), true);
        let result = self.ite(test, phi, plo);
        memo.insert(n, result);
        result
    }

    /// Swaps every fact's unprimed/primed pair: `2f <-> 2f+1`.
    pub fn swap_primedness(&mut self, n: NodeId) -> NodeId {
        let mut memo = HashMap::new();
        self.permute(n, &|v| v ^ 1, &mut memo)
    }

    pub fn cube(&mut self, state: &[bool]) -> NodeId {
        let mut acc = TRUE;
        for (fact, &value) in state.iter().enumerate() {
            let lit = self.literal(self.unprimed(fact as Fact), value);
            acc = self.and(acc, lit);
        }
        acc
    }

    pub fn partial_cube(&mut self, partial: &[i8]) -> NodeId {
        let mut acc = TRUE;
        for (fact, &value) in partial.iter().enumerate() {
            if value == -1 {
                continue;
            }
            let lit = self.literal(self.unprimed(fact as Fact), value == 1);
            acc = self.and(acc, lit);
        }
        acc
    }

    /// The transition relation of a single action, over unprimed
    /// precondition variables and primed effect variables: preconditions
    /// as unprimed literals, added/deleted facts pinned in the primed
    /// copy, every other fact held fixed by a frame axiom `x_f <-> x_f'`.
    pub fn action_relation(&mut self, fact_count: usize, action: &Action) -> NodeId {
        let mut acc = TRUE;
        for &f in &action.pre {
            let lit = self.literal(self.unprimed(f), true);
            acc = self.and(acc, lit);
        }
        for fact in 0..fact_count as Fact {
            let added = action.add.contains(&fact);
            let deleted = action.del.contains(&fact);
            let term = if added {
                self.literal(self.primed(fact), true)
            } else if deleted {
                self.literal(self.primed(fact), false)
            } else {
                let unprimed = self.literal(self.unprimed(fact), true);
                let primed = self.literal(self.primed(fact), true);
                self.iff(unprimed, primed)
            };
            acc = self.and(acc, term);
        }
        acc
    }

    /// Relations for every action named by an action set, keyed by id.
    pub fn relations_for(&mut self, task: &Task, ids: &[ActionId]) -> Vec<NodeId> {
        ids.iter()
            .map(|&id| self.action_relation(task.fact_count(), task.action(id)))
            .collect()
    }

    /// Enumerates every satisfying cube over exactly `var_count` of this
    /// manager's unprimed variables (used to bridge into the explicit
    /// formalism for B4, §9).
    pub fn enumerate_cubes(&self, n: NodeId, fact_count: usize) -> Vec<Vec<bool>> {
        let mut out = Vec::new();
        let mut assignment = vec![false; fact_count];
        self.enumerate_rec(n, 0, fact_count, &mut assignment, &mut out);
        out
    }

    fn enumerate_rec(
        &self,
        n: NodeId,
        fact: usize,
        fact_count: usize,
        assignment: &mut Vec<bool>,
        out: &mut Vec<Vec<bool>>,
    ) {
        if fact == fact_count {
            if n == TRUE {
                out.push(assignment.clone());
            }
            return;
        }
        let var = self.unprimed(fact as Fact);
        for &value in &[false, true] {
            let cofactor = if self.var(n) == var {
                if value {
                    self.high(n)
                } else {
                    self.low(n)
                }
            } else {
                n
            };
            assignment[fact] = value;
            self.enumerate_rec(cofactor, fact + 1, fact_count, assignment, out);
        }
    }

    pub fn var_count(&self) -> u32 {
        self.var_count
    }

    /// Whether a full cube over the unprimed variables is a model of `n`.
    /// Assumes `n` is a set expression (unprimed variables only), never a
    /// transition relation.
    pub fn contains_model(&self, n: NodeId, model: &[bool]) -> bool {
        let mut cur = n;
        loop {
            if cur == TRUE {
                return true;
            }
            if cur == FALSE {
                return false;
            }
            let var = self.var(cur);
            let fact = (var / 2) as usize;
            cur = if model[fact] { self.high(cur) } else { self.low(cur) };
        }
    }
}

/// One BDD-backed set expression: a node in a shared [Manager] plus the
/// fact count needed to interpret unconstrained variables during
/// enumeration.
#[derive(Clone, Debug)]
pub struct BddSet {
    pub node: Option<NodeId>,
    pub fact_count: usize,
}

impl BddSet {
    pub fn new(node: NodeId, fact_count: usize) -> Self {
        BddSet {
            node: Some(node),
            fact_count,
        }
    }

    pub fn discard_payload(&mut self) {
        self.node = None;
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ite_reduces_to_terminal_when_branches_match() {
        let mut mgr = Manager::new(2);
        let a = mgr.literal(0, true);
        assert_eq!(mgr.ite(a, TRUE, TRUE), TRUE);
    }

    #[test]
    fn and_or_not_behave_on_two_variables() {
        let mut mgr = Manager::new(2);
        let x = mgr.literal(0, true);
        let y = mgr.literal(2, true);
        let and = mgr.and(x, y);
        let cube_true = mgr.cube(&[true, true]);
        assert_eq!(and, cube_true);

        let not_x = mgr.not(x);
        let or = mgr.or(not_x, y);
        let both_false = mgr.cube(&[false, false]);
        assert!(mgr.subset(both_false, or));
        let true_false = mgr.cube(&[true, false]);
        assert!(!mgr.subset(true_false, or));
    }

    #[test]
    fn swap_primedness_moves_unprimed_set_to_primed_variables() {
        let mut mgr = Manager::new(1);
        let x = mgr.literal(0, true);
        let swapped = mgr.swap_primedness(x);
        let px = mgr.literal(1, true);
        assert_eq!(swapped, px);
    }

    #[test]
    fn action_relation_pins_added_fact_and_holds_frame() {
        let action = Action {
            pre: vec![],
            add: vec![0],
            del: vec![],
        };
        let mut mgr = Manager::new(2);
        let rel = mgr.action_relation(2, &action);
        // successor must have fact 0 true regardless of predecessor
        let succ0_true = mgr.literal(mgr.primed(0), true);
        assert!(mgr.subset(rel, succ0_true));
    }

    #[test]
    fn subset_check_catches_violations() {
        let mut mgr = Manager::new(1);
        let x = mgr.literal(0, true);
        let not_x = mgr.not(x);
        assert!(!mgr.subset(x, not_x));
        assert!(mgr.subset(x, x));
    }
}
