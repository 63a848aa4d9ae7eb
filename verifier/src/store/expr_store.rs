/*!
The expression store (§4.2): an append-only `Vec` of [ExprVariant],
indexed by [ExprIndex], plus the discard pre-scan that underlies
`--discard_formulas` (§3.5).
*/

use crate::expr::ExprVariant;
use crate::types::err::StoreError;
use crate::types::{ExprIndex, KnowledgeIndex};

#[derive(Default)]
pub struct ExprStore {
    entries: Vec<ExprVariant>,
}

impl ExprStore {
    pub fn new() -> Self {
        ExprStore::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an expression at `index`, rejecting non-monotonic
    /// indices and any operand that is not strictly earlier.
    pub fn add(&mut self, index: ExprIndex, variant: ExprVariant) -> Result<(), StoreError> {
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

    pub fn get(&self, index: ExprIndex) -> Result<&ExprVariant, StoreError> {
        self.entries
            .get(index as usize)
            .ok_or(StoreError::NotFound(index))
    }

    pub fn get_mut(&mut self, index: ExprIndex) -> Result<&mut ExprVariant, StoreError> {
        self.entries
            .get_mut(index as usize)
            .ok_or(StoreError::NotFound(index))
    }

    /// Transitively collects every basic (formalism-owned) expression
    /// reachable from `root` through compound operands.
    fn basic_leaves(&self, root: ExprIndex, out: &mut Vec<ExprIndex>) {
        let Ok(variant) = self.get(root) else {
            return;
        };
        if variant.is_basic() {
            out.push(root);
            return;
        }
        for operand in variant.operands() {
            self.basic_leaves(operand, out);
        }
    }

    /// Computes, for every basic expression, the latest knowledge
    /// index at which it (or a compound expression built over it) is
    /// consulted by a `Subset`/`Dead` statement. `None` means never
    /// consulted — safe to discard immediately once recorded.
    pub fn last_use(
        &self,
        consultations: impl IntoIterator<Item = (KnowledgeIndex, ExprIndex)>,
    ) -> Vec<Option<KnowledgeIndex>> {
        let mut last_use = vec![None; self.entries.len()];
        let mut leaves = Vec::new();
        for (knowledge_index, root) in consultations {
            leaves.clear();
            self.basic_leaves(root, &mut leaves);
            for &leaf in &leaves {
                let slot = &mut last_use[leaf as usize];
                *slot = Some(slot.map_or(knowledge_index, |prev: KnowledgeIndex| prev.max(knowledge_index)));
            }
        }
        last_use
    }

    /// Drops the concrete payload of every basic expression whose
    /// `last_use` is at or before `processed_through`.
    pub fn discard_up_to(&mut self, last_use: &[Option<KnowledgeIndex>], processed_through: KnowledgeIndex) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if let Some(basic) = entry.as_basic_mut() {
                if let Some(Some(last)) = last_use.get(index) {
                    if *last <= processed_through {
                        basic.discard_payload();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::explicit::{ExplicitContent, ExplicitSet};
    use crate::engine::Basic;
    use crate::expr::Constant;

    fn basic_expr() -> ExprVariant {
        ExprVariant::Basic(Basic::Explicit(ExplicitSet::new(ExplicitContent::singleton(
            vec![0],
            vec![true],
        ))))
    }

    #[test]
    fn rejects_forward_reference() {
        let mut store = ExprStore::new();
        store.add(0, basic_expr()).unwrap();
        let err = store.add(1, ExprVariant::Negation(5));
        assert_eq!(err, Err(StoreError::ForwardReference));
    }

    #[test]
    fn rejects_non_monotonic_index() {
        let mut store = ExprStore::new();
        let err = store.add(1, basic_expr());
        assert_eq!(
            err,
            Err(StoreError::NonMonotonicIndex { expected: 0, got: 1 })
        );
    }

    #[test]
    fn last_use_propagates_through_compounds() {
        let mut store = ExprStore::new();
        store.add(0, basic_expr()).unwrap(); // basic leaf
        store.add(1, ExprVariant::Constant(Constant::Init)).unwrap();
        store.add(2, ExprVariant::Negation(0)).unwrap(); // compound over leaf 0

        let last_use = store.last_use(vec![(7, 2)]);
        assert_eq!(last_use[0], Some(7));
        assert_eq!(last_use[1], None);
    }

    #[test]
    fn discard_up_to_clears_basic_payload_after_last_use() {
        let mut store = ExprStore::new();
        store.add(0, basic_expr()).unwrap();
        let last_use = store.last_use(vec![(3, 0)]);
        store.discard_up_to(&last_use, 3);
        match store.get(0).unwrap() {
            ExprVariant::Basic(Basic::Explicit(set)) => assert!(set.content.is_none()),
            _ => panic!("expected basic explicit expression"),
        }
    }
}
