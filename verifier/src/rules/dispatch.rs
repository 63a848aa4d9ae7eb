/*!
Tag dispatch (§9 "Rule dispatch table"): the only place that turns a
[RuleTag] plus a certificate line's operand/premise indices into a call
into [basic], [dead], [conclude], or [lattice]. This module only
inspects expression *shapes* by delegating to those four; the only
engine calls anywhere in the rule engine are the `b1..b5` arms of
[subset_statement].

Every rule's premise arity here matches the original `KnowledgeOrigin`
table: `su`/`si`/`st`/`at`/`au`/`pt`/`pu` each take two knowledge-index
premises alongside their two formula operands; `pr`/`rp` take one.
*/

use super::{basic, conclude, dead, lattice, RuleContext, RuleTag};
use crate::types::err::RuleError;
use crate::types::{ExprIndex, KnowledgeIndex};

fn premise(premises: &[KnowledgeIndex], idx: usize) -> Result<KnowledgeIndex, RuleError> {
    premises.get(idx).copied().ok_or(RuleError::WrongShape)
}

/// Dispatches a `k <i> s <left> <right> <tag> [premises…]` line.
pub fn subset_statement(
    ctx: &mut RuleContext,
    tag: RuleTag,
    left: ExprIndex,
    right: ExprIndex,
    premises: &[KnowledgeIndex],
) -> Result<bool, RuleError> {
    match tag {
        RuleTag::B1 => basic::b1(ctx, left, right),
        RuleTag::B2 => basic::b2(ctx, left, right),
        RuleTag::B3 => basic::b3(ctx, left, right),
        RuleTag::B4 => basic::b4(ctx, left, right),
        RuleTag::B5 => basic::b5(&*ctx, left, right),
        RuleTag::Pr => dead::pr(ctx, left, right, premise(premises, 0)?),
        RuleTag::Rp => dead::rp(ctx, left, right, premise(premises, 0)?),
        RuleTag::Ur => lattice::ur(ctx, left, right, premise(premises, 0)?),
        RuleTag::Ul => lattice::ul(ctx, left, right, premise(premises, 0)?),
        RuleTag::Ir => lattice::ir(ctx, left, right, premise(premises, 0)?),
        RuleTag::Il => lattice::il(ctx, left, right, premise(premises, 0)?),
        RuleTag::Di => lattice::di(ctx, left, right),
        RuleTag::St => lattice::st(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Su => lattice::su(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Si => lattice::si(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::At => lattice::at(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Au => lattice::au(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Pt => lattice::pt(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Pu => lattice::pu(ctx, left, right, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Ed | RuleTag::Ud | RuleTag::Sd | RuleTag::Pg | RuleTag::Pi | RuleTag::Rg | RuleTag::Ri | RuleTag::Ci | RuleTag::Cg => {
            Err(RuleError::WrongShape)
        }
    }
}

/// Dispatches a `k <i> d <set> <tag> [premises…]` line.
pub fn dead_statement(
    ctx: &RuleContext,
    tag: RuleTag,
    target: ExprIndex,
    premises: &[KnowledgeIndex],
) -> Result<bool, RuleError> {
    match tag {
        RuleTag::Ed => dead::ed(ctx, target),
        RuleTag::Ud => dead::ud(ctx, target, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Sd => dead::sd(ctx, target, premise(premises, 0)?, premise(premises, 1)?),
        RuleTag::Pg => dead::pg(ctx, target, premise(premises, 0)?, premise(premises, 1)?, premise(premises, 2)?),
        RuleTag::Pi => dead::pi(ctx, target, premise(premises, 0)?, premise(premises, 1)?, premise(premises, 2)?),
        RuleTag::Rg => dead::rg(ctx, target, premise(premises, 0)?, premise(premises, 1)?, premise(premises, 2)?),
        RuleTag::Ri => dead::ri(ctx, target, premise(premises, 0)?, premise(premises, 1)?, premise(premises, 2)?),
        _ => Err(RuleError::WrongShape),
    }
}

/// Dispatches a `k <i> u <tag> <premise>` line.
pub fn unsolvable_statement(ctx: &RuleContext, tag: RuleTag, premise_idx: KnowledgeIndex) -> Result<bool, RuleError> {
    match tag {
        RuleTag::Ci => conclude::ci(ctx, premise_idx),
        RuleTag::Cg => conclude::cg(ctx, premise_idx),
        _ => Err(RuleError::WrongShape),
    }
}

/// Whether a [RuleError] terminates the whole run (§7 "format
/// mismatch") rather than merely failing this one knowledge item
/// (§7 "rule premise mismatch").
pub fn is_fatal(err: &RuleError) -> bool {
    matches!(err, RuleError::IncompatibleVariableOrder | RuleError::NoBridge)
}
