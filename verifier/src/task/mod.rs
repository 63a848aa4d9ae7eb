/*!
The planning task: facts, actions, initial state, goal (§3.1, §4.1).

A [Task] is immutable once built and is the external collaborator the
rest of the crate treats as a thin interface contract: parsing it is
out of scope per spec.md §1, but the concrete text format it's loaded
from is still specified in [parse] since the verifier has to read
*something*.
*/

pub mod parse;

use crate::types::{ActionId, Fact};

/// A single action: its precondition, and its add/delete effects.
///
/// Facts which appear in neither `add` nor `del` are unaffected
/// (no-change), matching the three-way effect of spec.md §3.1 without
/// materialising a dense `Vec` of effects per action.
#[derive(Clone, Debug)]
pub struct Action {
    pub pre: Vec<Fact>,
    pub add: Vec<Fact>,
    pub del: Vec<Fact>,
}

impl Action {
    /// The effect on a single fact, if any.
    pub fn effect(&self, fact: Fact) -> Effect {
        if self.add.contains(&fact) {
            Effect::Add
        } else if self.del.contains(&fact) {
            Effect::Delete
        } else {
            Effect::NoChange
        }
    }

    /// Applies the action to a cube, returning `None` if the precondition fails.
    pub fn apply(&self, state: &[bool]) -> Option<Vec<bool>> {
        if self.pre.iter().any(|&f| !state[f as usize]) {
            return None;
        }
        let mut next = state.to_vec();
        for &f in &self.add {
            next[f as usize] = true;
        }
        for &f in &self.del {
            next[f as usize] = false;
        }
        Some(next)
    }
}

/// The per-fact effect of an action, as named in spec.md §3.1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Add,
    Delete,
    NoChange,
}

/// The immutable propositional planning task (§3.1).
#[derive(Clone, Debug)]
pub struct Task {
    fact_count: usize,
    actions: Vec<Action>,
    /// `I`: a total assignment over the task's facts.
    initial: Vec<bool>,
    /// `G`: a partial assignment, `-1` meaning unconstrained.
    goal: Vec<i8>,
}

impl Task {
    /// Builds a task, checking the structural invariants of §3.1: every
    /// action's fact references are within bounds, `initial` and `goal`
    /// both have exactly `fact_count` entries.
    pub fn new(
        fact_count: usize,
        actions: Vec<Action>,
        initial: Vec<bool>,
        goal: Vec<i8>,
    ) -> Option<Task> {
        if initial.len() != fact_count || goal.len() != fact_count {
            return None;
        }
        for action in &actions {
            let in_bounds = |f: &Fact| (*f as usize) < fact_count;
            if !action.pre.iter().all(in_bounds)
                || !action.add.iter().all(in_bounds)
                || !action.del.iter().all(in_bounds)
            {
                return None;
            }
        }
        Some(Task {
            fact_count,
            actions,
            initial,
            goal,
        })
    }

    pub fn fact_count(&self) -> usize {
        self.fact_count
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn action(&self, id: ActionId) -> &Action {
        &self.actions[id as usize]
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, a)| (i as ActionId, a))
    }

    pub fn initial(&self) -> &[bool] {
        &self.initial
    }

    pub fn goal(&self) -> &[i8] {
        &self.goal
    }

    /// Whether a (total) state extends the goal's partial assignment.
    pub fn satisfies_goal(&self, state: &[bool]) -> bool {
        self.goal
            .iter()
            .enumerate()
            .all(|(fact, &v)| v == -1 || (v == 1) == state[fact])
    }

    /// Bounds check used by the expression/action-set stores (§3.1 invariant).
    pub fn fact_in_bounds(&self, fact: Fact) -> bool {
        (fact as usize) < self.fact_count
    }

    pub fn action_in_bounds(&self, action: ActionId) -> bool {
        (action as usize) < self.actions.len()
    }
}
