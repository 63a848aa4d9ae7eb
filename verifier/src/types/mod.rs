/*!
Shared types: indices, and the error hierarchy.
*/

pub mod err;

/// The index of an expression in the [expression store](crate::store::expr_store).
pub type ExprIndex = u32;

/// The index of an action-set expression in the [action-set store](crate::store::action_store).
pub type ActionSetIndex = u32;

/// The index of a knowledge item in the [knowledge base](crate::knowledge).
pub type KnowledgeIndex = u32;

/// A fact (propositional atom) index into the [task](crate::task).
pub type Fact = u32;

/// An action index into the [task](crate::task).
pub type ActionId = u32;
