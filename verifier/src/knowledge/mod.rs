/*!
The knowledge base (§3.3, §4.1): an append-only log of what the
certificate has established so far. Every rule either derives a new
item here or fails; the run is only complete once [KnowledgeItem::Unsolvable]
has been derived.
*/

use crate::types::err::StoreError;
use crate::types::{ExprIndex, KnowledgeIndex};

/// One derived fact about the task's set expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnowledgeItem {
    /// `fi1 ⊆ fi2`.
    Subset(ExprIndex, ExprIndex),
    /// The expression denotes a set of only dead-end states (no action
    /// sequence from any of them reaches the goal).
    Dead(ExprIndex),
    /// The task has been proven unsolvable.
    Unsolvable,
}

#[derive(Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeItem>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, index: KnowledgeIndex, item: KnowledgeItem) -> Result<(), StoreError> {
        let expected = self.entries.len() as u32;
        if index != expected {
            return Err(StoreError::NonMonotonicIndex {
                expected,
                got: index,
            });
        }
        self.entries.push(item);
        Ok(())
    }

    pub fn get(&self, index: KnowledgeIndex) -> Result<KnowledgeItem, StoreError> {
        self.entries
            .get(index as usize)
            .copied()
            .ok_or(StoreError::NotFound(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (KnowledgeIndex, KnowledgeItem)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, item)| (i as KnowledgeIndex, *item))
    }

    /// Every expression an existing knowledge item consults, paired
    /// with the knowledge index it was consulted at — the input the
    /// discard pre-scan needs (§3.5).
    pub fn consultations(&self) -> impl Iterator<Item = (KnowledgeIndex, ExprIndex)> + '_ {
        self.iter().flat_map(|(ki, item)| match item {
            KnowledgeItem::Subset(a, b) => vec![(ki, a), (ki, b)],
            KnowledgeItem::Dead(a) => vec![(ki, a)],
            KnowledgeItem::Unsolvable => vec![],
        })
    }

    pub fn proves_unsolvable(&self) -> bool {
        self.entries.iter().any(|item| *item == KnowledgeItem::Unsolvable)
    }
}
