/*!
2-CNF formulas over propositional facts (§4.4.3): every clause has at
most two literals, so satisfiability reduces to an implication-graph
strongly-connected-components check (Aspvall, Plass & Tarjan), computed
with [petgraph]'s Tarjan implementation rather than a hand-rolled one —
the same division of labour `otter_sat` draws between its own clause
and watch-list bookkeeping and a borrowed crate for the parts that are
genuinely generic graph theory.
*/

use petgraph::graph::{DiGraph, NodeIndex};

use crate::types::Fact;

/// A literal over a fact: `positive` selects whether the fact or its
/// negation is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub fact: Fact,
    pub positive: bool,
}

impl Literal {
    pub fn negate(self) -> Literal {
        Literal {
            fact: self.fact,
            positive: !self.positive,
        }
    }

    fn node_index(self) -> usize {
        self.fact as usize * 2 + usize::from(!self.positive)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TwoCnfContent {
    pub var_count: usize,
    pub units: Vec<Literal>,
    pub clauses: Vec<(Literal, Literal)>,
}

impl TwoCnfContent {
    fn build_graph(&self) -> DiGraph<(), ()> {
        let mut graph = DiGraph::with_capacity(self.var_count * 2, self.units.len() + self.clauses.len() * 2);
        for _ in 0..self.var_count * 2 {
            graph.add_node(());
        }
        let node = |lit: Literal| NodeIndex::new(lit.node_index());
        for &unit in &self.units {
            graph.add_edge(node(unit.negate()), node(unit), ());
        }
        for &(a, b) in &self.clauses {
            graph.add_edge(node(a.negate()), node(b), ());
            graph.add_edge(node(b.negate()), node(a), ());
        }
        graph
    }

    pub fn is_satisfiable(&self) -> bool {
        let graph = self.build_graph();
        let sccs = petgraph::algo::tarjan_scc(&graph);
        let mut component = vec![0usize; self.var_count * 2];
        for (idx, scc) in sccs.iter().enumerate() {
            for &node in scc {
                component[node.index()] = idx;
            }
        }
        (0..self.var_count).all(|fact| {
            let pos = Literal {
                fact: fact as Fact,
                positive: true,
            };
            let neg = pos.negate();
            component[pos.node_index()] != component[neg.node_index()]
        })
    }

    fn all_clauses(&self) -> Vec<(Literal, Literal)> {
        let mut out: Vec<(Literal, Literal)> = self.units.iter().map(|&u| (u, u)).collect();
        out.extend(self.clauses.iter().copied());
        out
    }

    /// `self ⊆ other`: for every clause of `other` (units included as
    /// one-literal clauses), `self ∧ ¬clause` must be unsatisfiable.
    pub fn is_subset(&self, other: &TwoCnfContent) -> bool {
        Self::entails_union(self, &[(false, other)])
    }

    /// `self ⊆ (⋃ members)`, mirroring [crate::engine::horn::HornContent::entails_union]:
    /// a negated member is conjoined directly (`¬¬H = H`), an un-negated
    /// member contributes a disjunct group to a Cartesian refutation search.
    pub fn entails_union(base: &TwoCnfContent, members: &[(bool, &TwoCnfContent)]) -> bool {
        let mut accumulated = base.clone();
        let mut groups: Vec<Vec<(Literal, Literal)>> = Vec::new();
        for (negated, content) in members {
            if *negated {
                accumulated.units.extend(content.units.iter().copied());
                accumulated.clauses.extend(content.clauses.iter().copied());
            } else {
                let clauses = content.all_clauses();
                if clauses.is_empty() {
                    return true;
                }
                groups.push(clauses);
            }
        }
        Self::cartesian_refute(&accumulated, &groups, 0, &mut Vec::new())
    }

    fn cartesian_refute(
        base: &TwoCnfContent,
        groups: &[Vec<(Literal, Literal)>],
        idx: usize,
        chosen: &mut Vec<(Literal, Literal)>,
    ) -> bool {
        if idx == groups.len() {
            let mut candidate = base.clone();
            for &(a, b) in chosen.iter() {
                candidate.units.push(a.negate());
                candidate.units.push(b.negate());
            }
            return !candidate.is_satisfiable();
        }
        for &clause in &groups[idx] {
            chosen.push(clause);
            let refuted = Self::cartesian_refute(base, groups, idx + 1, chosen);
            chosen.pop();
            if !refuted {
                return false;
            }
        }
        true
    }

    pub fn contains_model(&self, model: &[bool]) -> bool {
        let value = |lit: Literal| model[lit.fact as usize] == lit.positive;
        self.units.iter().all(|&u| value(u)) && self.clauses.iter().all(|&(a, b)| value(a) || value(b))
    }
}

/// One 2-CNF-backed set expression.
#[derive(Clone, Debug)]
pub struct TwoCnfSet {
    pub content: Option<TwoCnfContent>,
}

impl TwoCnfSet {
    pub fn new(content: TwoCnfContent) -> Self {
        TwoCnfSet {
            content: Some(content),
        }
    }

    pub fn discard_payload(&mut self) {
        self.content = None;
    }

    fn content(&self) -> &TwoCnfContent {
        self.content
            .as_ref()
            .expect("2-CNF set consulted after its payload was discarded")
    }

    pub fn is_satisfiable(&self) -> bool {
        self.content().is_satisfiable()
    }

    pub fn is_subset(&self, other: &TwoCnfSet) -> bool {
        self.content().is_subset(other.content())
    }

    pub fn contains_model(&self, model: &[bool]) -> bool {
        self.content().contains_model(model)
    }

    pub fn content_ref(&self) -> &TwoCnfContent {
        self.content()
    }
}
