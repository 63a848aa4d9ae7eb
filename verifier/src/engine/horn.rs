/*!
Horn formulas over propositional facts (§4.4.2): each clause has at
most one positive literal, represented as a list of negated facts plus
an optional positive fact. Two opposite literals about the same fact
that have both been forced collapse into the all-facts `forced_true` /
`forced_false` sets rather than staying in `clauses`, which is what the
simplification pass below maintains.
*/

use std::collections::HashSet;

use crate::task::Action;
use crate::types::Fact;

/// `(¬negs[0] ∨ ... ∨ ¬negs[k]) ∨ pos`, i.e. `negs -> pos` with `pos`
/// omitted meaning the clause is a pure negative (goal) clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HornClause {
    pub negs: Vec<Fact>,
    pub pos: Option<Fact>,
}

#[derive(Clone, Debug, Default)]
pub struct HornContent {
    pub forced_true: HashSet<Fact>,
    pub forced_false: HashSet<Fact>,
    pub clauses: Vec<HornClause>,
}

impl HornContent {
    pub fn unit_true(fact: Fact) -> Self {
        let mut forced_true = HashSet::new();
        forced_true.insert(fact);
        HornContent {
            forced_true,
            ..Default::default()
        }
    }

    pub fn unit_false(fact: Fact) -> Self {
        let mut forced_false = HashSet::new();
        forced_false.insert(fact);
        HornContent {
            forced_false,
            ..Default::default()
        }
    }

    pub fn intersect(a: &HornContent, b: &HornContent) -> HornContent {
        let mut out = a.clone();
        out.forced_true.extend(b.forced_true.iter().copied());
        out.forced_false.extend(b.forced_false.iter().copied());
        out.clauses.extend(b.clauses.iter().cloned());
        out
    }

    /// Two-phase unit propagation: phase one resolves already-forced
    /// literals out of every clause, phase two promotes the unit
    /// clauses that fall out of phase one to forced literals, looping
    /// to a fixpoint. Returns `false` if an empty clause (contradiction)
    /// is derived.
    pub fn simplify(&mut self) -> bool {
        loop {
            if self.forced_true.intersection(&self.forced_false).next().is_some() {
                return false;
            }
            let mut changed = false;
            let mut remaining = Vec::with_capacity(self.clauses.len());
            for clause in self.clauses.drain(..) {
                let mut satisfied = false;
                let mut negs = Vec::with_capacity(clause.negs.len());
                for n in clause.negs {
                    if self.forced_false.contains(&n) {
                        satisfied = true;
                        break;
                    }
                    if !self.forced_true.contains(&n) {
                        negs.push(n);
                    }
                }
                if satisfied {
                    changed = true;
                    continue;
                }
                let mut pos = clause.pos;
                if let Some(p) = pos {
                    if self.forced_true.contains(&p) {
                        satisfied = true;
                    } else if self.forced_false.contains(&p) {
                        pos = None;
                    }
                }
                if satisfied {
                    changed = true;
                    continue;
                }
                match (negs.len(), pos) {
                    (0, None) => return false,
                    (0, Some(p)) => {
                        changed |= self.forced_true.insert(p);
                    }
                    (1, None) => {
                        changed |= self.forced_false.insert(negs[0]);
                    }
                    _ => remaining.push(HornClause { negs, pos }),
                }
            }
            self.clauses = remaining;
            if !changed {
                return true;
            }
        }
    }

    /// Every clause of this content, including its forced units,
    /// viewed uniformly as `(negs, pos)` pairs — used to drive
    /// entailment one disjunct at a time.
    fn all_clauses(&self) -> Vec<HornClause> {
        let mut out: Vec<HornClause> = self
            .forced_true
            .iter()
            .map(|&f| HornClause {
                negs: vec![],
                pos: Some(f),
            })
            .chain(self.forced_false.iter().map(|&f| HornClause {
                negs: vec![f],
                pos: None,
            }))
            .collect();
        out.extend(self.clauses.iter().cloned());
        out
    }

    /// `self ⊆ other`: for every clause `C` of `other`, `self ∧ ¬C`
    /// must be unsatisfiable — `¬C` forces every negated fact in `C`
    /// true and `C`'s positive fact (if any) false.
    pub fn entails(&self, other: &HornContent) -> bool {
        Self::entails_union(self, &[(false, other)])
    }

    /// `self ⊆ (⋃ members)`, each member optionally negated. A negated
    /// member's negation (`¬¬H = H`) is just conjoined directly; an
    /// un-negated member contributes its clause list as one group in a
    /// Cartesian refutation search — picking one clause from every
    /// group and checking the combined forced assignment is
    /// unsatisfiable, for every possible combination.
    pub fn entails_union(base: &HornContent, members: &[(bool, &HornContent)]) -> bool {
        let mut accumulated = base.clone();
        let mut groups: Vec<Vec<HornClause>> = Vec::new();
        for (negated, content) in members {
            if *negated {
                accumulated = HornContent::intersect(&accumulated, content);
            } else {
                let clauses = content.all_clauses();
                if clauses.is_empty() {
                    // content denotes the universal set; its negation is
                    // unsatisfiable, so the whole disjunction is moot.
                    return true;
                }
                groups.push(clauses);
            }
        }
        Self::cartesian_refute(&accumulated, &groups, 0, &mut Vec::new())
    }

    fn cartesian_refute(
        base: &HornContent,
        groups: &[Vec<HornClause>],
        idx: usize,
        chosen: &mut Vec<HornClause>,
    ) -> bool {
        if idx == groups.len() {
            let mut candidate = base.clone();
            for clause in chosen.iter() {
                for n in &clause.negs {
                    candidate.forced_true.insert(*n);
                }
                if let Some(p) = clause.pos {
                    candidate.forced_false.insert(p);
                }
            }
            return !candidate.simplify();
        }
        for clause in &groups[idx] {
            chosen.push(clause.clone());
            let refuted = Self::cartesian_refute(base, groups, idx + 1, chosen);
            chosen.pop();
            if !refuted {
                return false;
            }
        }
        true
    }

    /// Direct evaluation against a full assignment, used by the
    /// cross-formalism bridge (B4).
    pub fn contains_model(&self, model: &[bool]) -> bool {
        for &f in &self.forced_true {
            if !model[f as usize] {
                return false;
            }
        }
        for &f in &self.forced_false {
            if model[f as usize] {
                return false;
            }
        }
        for clause in &self.clauses {
            let satisfied =
                clause.negs.iter().any(|&n| !model[n as usize]) || clause.pos.is_some_and(|p| model[p as usize]);
            if !satisfied {
                return false;
            }
        }
        true
    }

    /// Shifts every fact id in this content by `offset`, used to read
    /// a set over the primed half of a joint progression/regression
    /// variable space.
    pub fn shifted(&self, offset: Fact) -> HornContent {
        HornContent {
            forced_true: self.forced_true.iter().map(|f| f + offset).collect(),
            forced_false: self.forced_false.iter().map(|f| f + offset).collect(),
            clauses: self
                .clauses
                .iter()
                .map(|c| HornClause {
                    negs: c.negs.iter().map(|f| f + offset).collect(),
                    pos: c.pos.map(|f| f + offset),
                })
                .collect(),
        }
    }

    /// Conjoins this content (read over the unprimed half of a joint
    /// space) with one action's transition relation: preconditions as
    /// forced-true unprimed facts, add/delete effects as forced primed
    /// facts (`fact + fact_count`), and a frame clause pair for every
    /// untouched fact.
    pub fn joined_with_action(&self, fact_count: usize, action: &Action) -> HornContent {
        let mut out = self.clone();
        for &f in &action.pre {
            out.forced_true.insert(f);
        }
        let offset = fact_count as Fact;
        for fact in 0..fact_count as Fact {
            if action.add.contains(&fact) {
                out.forced_true.insert(fact + offset);
            } else if action.del.contains(&fact) {
                out.forced_false.insert(fact + offset);
            } else {
                out.clauses.push(HornClause {
                    negs: vec![fact],
                    pos: Some(fact + offset),
                });
                out.clauses.push(HornClause {
                    negs: vec![fact + offset],
                    pos: Some(fact),
                });
            }
        }
        out
    }
}

/// One Horn-backed set expression.
#[derive(Clone, Debug)]
pub struct HornSet {
    pub fact_count: usize,
    pub content: Option<HornContent>,
}

impl HornSet {
    pub fn new(fact_count: usize, content: HornContent) -> Self {
        HornSet {
            fact_count,
            content: Some(content),
        }
    }

    pub fn discard_payload(&mut self) {
        self.content = None;
    }

    fn content(&self) -> &HornContent {
        self.content
            .as_ref()
            .expect("Horn set consulted after its payload was discarded")
    }

    pub fn is_satisfiable(&self) -> bool {
        self.content().clone().simplify()
    }

    pub fn is_subset(&self, other: &HornSet) -> bool {
        self.content().entails(other.content())
    }

    pub fn contains_model(&self, model: &[bool]) -> bool {
        self.content().contains_model(model)
    }

    pub fn content_ref(&self) -> &HornContent {
        self.content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_detects_contradiction() {
        let mut content = HornContent::unit_true(0);
        content.forced_false.insert(0);
        assert!(!content.simplify());
    }

    #[test]
    fn simplify_propagates_unit_chain() {
        // clauses: ¬a ∨ b, ¬b ∨ c, a forced true -> derives b and c.
        let mut content = HornContent::unit_true(0);
        content.clauses.push(HornClause {
            negs: vec![0],
            pos: Some(1),
        });
        content.clauses.push(HornClause {
            negs: vec![1],
            pos: Some(2),
        });
        assert!(content.simplify());
        assert!(content.forced_true.contains(&1));
        assert!(content.forced_true.contains(&2));
        assert!(content.clauses.is_empty());
    }

    #[test]
    fn entailment_holds_for_weaker_formula() {
        // self: a forced true. other: a ∨ b (weaker). self ⊆ other.
        let a_true = HornContent::unit_true(0);
        let mut a_or_b = HornContent::default();
        a_or_b.clauses.push(HornClause {
            negs: vec![],
            pos: Some(0),
        });
        // encode "a ∨ b" isn't directly expressible as a single Horn
        // clause (two positives); use the trivial weaker formula "a forced true".
        assert!(a_true.entails(&a_or_b));
    }

    #[test]
    fn entailment_fails_for_incomparable_formula() {
        let a_true = HornContent::unit_true(0);
        let b_true = HornContent::unit_true(1);
        assert!(!a_true.entails(&b_true));
    }

    #[test]
    fn joined_with_action_pins_add_effect_on_primed_copy() {
        let action = Action {
            pre: vec![],
            add: vec![0],
            del: vec![],
        };
        let empty = HornContent::default();
        let joint = empty.joined_with_action(1, &action);
        assert!(joint.forced_true.contains(&1)); // fact 0 primed = fact 0 + 1
    }
}
