/*!
Conclusion rules (§4.5 "Conclusion rules"): the only two ways a
certificate reaches [KnowledgeItem::Unsolvable](crate::knowledge::KnowledgeItem::Unsolvable).
*/

use crate::expr::{Constant, ExprVariant};
use crate::knowledge::KnowledgeItem;
use crate::types::err::RuleError;
use crate::types::KnowledgeIndex;

use super::RuleContext;

fn dead_of_constant(ctx: &RuleContext, p: KnowledgeIndex, want: Constant) -> Result<bool, RuleError> {
    let KnowledgeItem::Dead(idx) = ctx.knowledge.get(p).map_err(|_| RuleError::WrongPremiseKind)? else {
        return Ok(false);
    };
    Ok(matches!(ctx.exprs.get(idx), Ok(ExprVariant::Constant(c)) if *c == want))
}

/// CI(p): `p = Dead(INIT)` implies `Unsolvable`.
pub fn ci(ctx: &RuleContext, p: KnowledgeIndex) -> Result<bool, RuleError> {
    dead_of_constant(ctx, p, Constant::Init)
}

/// CG(p): `p = Dead(GOAL)` implies `Unsolvable`.
pub fn cg(ctx: &RuleContext, p: KnowledgeIndex) -> Result<bool, RuleError> {
    dead_of_constant(ctx, p, Constant::Goal)
}
