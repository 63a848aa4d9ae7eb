/*!
Set expressions (§3.2): the certificate builds up state-set expressions
incrementally, each assigned an index at declaration time and exactly
one of a constant, a basic (formalism-owned), or a compound variant.

Expressions are immutable once declared — a certificate never revises
an earlier entry — so [ExprVariant] borrows nothing and the expression
store can hand out `&ExprVariant` freely.
*/

use crate::engine::Basic;
use crate::types::{ActionSetIndex, ExprIndex};

/// The three distinguished sets every task defines without a formalism:
/// the empty set, the initial state (a singleton), and the goal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Empty,
    Init,
    Goal,
}

/// One set expression, as declared in the certificate (§3.2).
#[derive(Clone, Debug)]
pub enum ExprVariant {
    Constant(Constant),
    Basic(Basic),
    Negation(ExprIndex),
    Intersection(ExprIndex, ExprIndex),
    Union(ExprIndex, ExprIndex),
    Progression(ExprIndex, ActionSetIndex),
    Regression(ExprIndex, ActionSetIndex),
}

impl ExprVariant {
    /// The operand expressions a compound variant references, used by
    /// the discard pre-scan to propagate `last_use` backwards (§3.5).
    pub fn operands(&self) -> Vec<ExprIndex> {
        match self {
            ExprVariant::Constant(_) | ExprVariant::Basic(_) => vec![],
            ExprVariant::Negation(a) => vec![*a],
            ExprVariant::Intersection(a, b) | ExprVariant::Union(a, b) => vec![*a, *b],
            ExprVariant::Progression(a, _) | ExprVariant::Regression(a, _) => vec![*a],
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, ExprVariant::Basic(_))
    }

    pub fn as_basic(&self) -> Option<&Basic> {
        match self {
            ExprVariant::Basic(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_basic_mut(&mut self) -> Option<&mut Basic> {
        match self {
            ExprVariant::Basic(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_of_compound_variants() {
        assert_eq!(ExprVariant::Negation(3).operands(), vec![3]);
        assert_eq!(ExprVariant::Intersection(1, 2).operands(), vec![1, 2]);
        assert_eq!(ExprVariant::Progression(5, 0).operands(), vec![5]);
        assert!(ExprVariant::Constant(Constant::Init).operands().is_empty());
    }
}
