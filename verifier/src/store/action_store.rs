/*!
The action-set store (§4.3): action sets referenced by progression and
regression expressions, built from the same append-only, forward-
reference-checked discipline as [crate::store::expr_store].
*/

use crate::task::Task;
use crate::types::err::StoreError;
use crate::types::{ActionId, ActionSetIndex};

/// One action-set expression.
#[derive(Clone, Debug)]
pub enum ActionSetVariant {
    /// The distinguished set of every action in the task.
    All,
    /// An explicitly enumerated, sorted, deduplicated list of actions.
    Explicit(Vec<ActionId>),
    Union(ActionSetIndex, ActionSetIndex),
}

impl ActionSetVariant {
    fn operands(&self) -> Vec<ActionSetIndex> {
        match self {
            ActionSetVariant::All | ActionSetVariant::Explicit(_) => vec![],
            ActionSetVariant::Union(a, b) => vec![*a, *b],
        }
    }
}

#[derive(Default)]
pub struct ActionSetStore {
    entries: Vec<ActionSetVariant>,
}

impl ActionSetStore {
    pub fn new() -> Self {
        ActionSetStore::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn add(&mut self, index: ActionSetIndex, variant: ActionSetVariant) -> Result<(), StoreError> {
        let expected = self.entries.len() as u32;
        if index != expected {
            return Err(StoreError::NonMonotonicIndex {
                expected,
                got: index,
            });
        }
        for operand in variant.operands() {
            if operand >= index {
                return Err(StoreError::ForwardReference);
            }
        }
        self.entries.push(variant);
        Ok(())
    }

    pub fn get(&self, index: ActionSetIndex) -> Result<&ActionSetVariant, StoreError> {
        self.entries
            .get(index as usize)
            .ok_or(StoreError::NotFound(index))
    }

    /// Whether this action-set expression is *syntactically* the
    /// distinguished all-actions constant — the shape
    /// [PG/PI/RG/RI](crate::rules) require. An `Explicit` enumeration
    /// that happens to list every action does not qualify: §4.5 is
    /// explicit that this is by design (matching
    /// `ActionSetConstantAll::is_constantall()` in the original, which
    /// `ActionSetBasic`/`ActionSetUnion` never return `true` for, no
    /// matter what they enumerate).
    pub fn is_all_actions(&self, index: ActionSetIndex, _task: &Task) -> Result<bool, StoreError> {
        Ok(matches!(self.get(index)?, ActionSetVariant::All))
    }

    /// The concrete, deduplicated action ids this expression denotes.
    pub fn members(&self, index: ActionSetIndex, task: &Task) -> Result<Vec<ActionId>, StoreError> {
        let mut out = Vec::new();
        self.collect_members(index, task, &mut out)?;
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }

    fn collect_members(
        &self,
        index: ActionSetIndex,
        task: &Task,
        out: &mut Vec<ActionId>,
    ) -> Result<(), StoreError> {
        match self.get(index)? {
            ActionSetVariant::All => out.extend(0..task.action_count() as ActionId),
            ActionSetVariant::Explicit(ids) => out.extend(ids.iter().copied()),
            ActionSetVariant::Union(a, b) => {
                self.collect_members(*a, task, out)?;
                self.collect_members(*b, task, out)?;
            }
        }
        Ok(())
    }

    pub fn contains(&self, index: ActionSetIndex, task: &Task, action: ActionId) -> Result<bool, StoreError> {
        Ok(self.members(index, task)?.contains(&action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Action;

    fn sample_task(action_count: usize) -> Task {
        let actions = (0..action_count)
            .map(|_| Action {
                pre: vec![],
                add: vec![],
                del: vec![],
            })
            .collect();
        Task::new(0, actions, vec![], vec![]).unwrap()
    }

    #[test]
    fn all_actions_is_recognised() {
        let task = sample_task(3);
        let mut store = ActionSetStore::new();
        store.add(0, ActionSetVariant::All).unwrap();
        assert!(store.is_all_actions(0, &task).unwrap());
    }

    #[test]
    fn union_collects_members_from_both_sides() {
        let task = sample_task(3);
        let mut store = ActionSetStore::new();
        store.add(0, ActionSetVariant::Explicit(vec![0])).unwrap();
        store.add(1, ActionSetVariant::Explicit(vec![1, 2])).unwrap();
        store.add(2, ActionSetVariant::Union(0, 1)).unwrap();
        let members = store.members(2, &task).unwrap();
        assert_eq!(members, vec![0, 1, 2]);
    }

    /// §4.5: an explicit enumeration of every action is not the same
    /// expression as the all-actions constant, even though it denotes
    /// the same members.
    #[test]
    fn explicit_enumeration_of_every_action_is_not_all_actions() {
        let task = sample_task(3);
        let mut store = ActionSetStore::new();
        store.add(0, ActionSetVariant::Explicit(vec![0])).unwrap();
        store.add(1, ActionSetVariant::Explicit(vec![1, 2])).unwrap();
        store.add(2, ActionSetVariant::Union(0, 1)).unwrap();
        assert_eq!(store.members(2, &task).unwrap(), vec![0, 1, 2]);
        assert!(!store.is_all_actions(2, &task).unwrap());
    }

    #[test]
    fn rejects_forward_reference() {
        let mut store = ActionSetStore::new();
        let err = store.add(0, ActionSetVariant::Union(0, 1));
        assert_eq!(err, Err(StoreError::ForwardReference));
    }
}
