/*!
Deadness rules (§4.5 "Deadness rules"): each either recognises a
structural shape directly (ED), combines earlier `Dead`/`Subset` items
(UD, SD), or certifies deadness through a progression/regression
induction step (PG, PI, RG, RI) plus the two progression-to-regression
mirror rules (PR, RP).
*/

use crate::expr::{Constant, ExprVariant};
use crate::knowledge::KnowledgeItem;
use crate::types::err::RuleError;
use crate::types::{ExprIndex, KnowledgeIndex};

use super::RuleContext;

fn is_constant(ctx: &RuleContext, idx: ExprIndex, want: Constant) -> bool {
    matches!(ctx.exprs.get(idx), Ok(ExprVariant::Constant(c)) if *c == want)
}

fn dead_target(ctx: &RuleContext, premise: KnowledgeIndex) -> Option<ExprIndex> {
    match ctx.knowledge.get(premise).ok()? {
        KnowledgeItem::Dead(x) => Some(x),
        _ => None,
    }
}

fn subset_pair(ctx: &RuleContext, premise: KnowledgeIndex) -> Option<(ExprIndex, ExprIndex)> {
    match ctx.knowledge.get(premise).ok()? {
        KnowledgeItem::Subset(a, b) => Some((a, b)),
        _ => None,
    }
}

/// ED(i): `set[i]` is the constant EMPTY.
pub fn ed(ctx: &RuleContext, i: ExprIndex) -> Result<bool, RuleError> {
    Ok(is_constant(ctx, i, Constant::Empty))
}

/// UD(i, p1, p2): `set[i] = Union(l, r)`, `p1 = Dead(l)`, `p2 = Dead(r)`.
pub fn ud(ctx: &RuleContext, i: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let ExprVariant::Union(l, r) = *ctx.exprs.get(i).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(dead_target(ctx, p1) == Some(l) && dead_target(ctx, p2) == Some(r))
}

/// SD(i, p1, p2): `p1 = Subset(i, x)`, `p2 = Dead(x)`.
pub fn sd(ctx: &RuleContext, i: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((si, x)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    Ok(si == i && dead_target(ctx, p2) == Some(x))
}

fn is_intersection_with_goal(ctx: &RuleContext, idx: ExprIndex, i: ExprIndex) -> bool {
    match ctx.exprs.get(idx) {
        Ok(ExprVariant::Intersection(a, b)) => {
            (*a == i && is_constant(ctx, *b, Constant::Goal)) || (*b == i && is_constant(ctx, *a, Constant::Goal))
        }
        _ => false,
    }
}

/// PG(i, p1, p2, p3): `p1 = Subset(Progression(i, A_all), Union(i, s'))`,
/// `p2 = Dead(s')`, `p3 = Dead(Intersection(i, GOAL))`.
pub fn pg(
    ctx: &RuleContext,
    i: ExprIndex,
    p1: KnowledgeIndex,
    p2: KnowledgeIndex,
    p3: KnowledgeIndex,
) -> Result<bool, RuleError> {
    let Some((prog_idx, union_idx)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let ExprVariant::Progression(s, a_all) = *ctx.exprs.get(prog_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if s != i || !ctx.actions.is_all_actions(a_all, ctx.task).map_err(|_| RuleError::WrongShape)? {
        return Ok(false);
    }
    let ExprVariant::Union(u_i, sp) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if u_i != i || dead_target(ctx, p2) != Some(sp) {
        return Ok(false);
    }
    let Some(dead_idx) = dead_target(ctx, p3) else {
        return Ok(false);
    };
    Ok(is_intersection_with_goal(ctx, dead_idx, i))
}

/// PI(i, p1, p2, p3): `set[i] = Negation(s)`,
/// `p1 = Subset(Progression(s, A_all), Union(s, s'))`, `p2 = Dead(s')`,
/// `p3 = Subset(INIT, s)`.
pub fn pi(
    ctx: &RuleContext,
    i: ExprIndex,
    p1: KnowledgeIndex,
    p2: KnowledgeIndex,
    p3: KnowledgeIndex,
) -> Result<bool, RuleError> {
    let ExprVariant::Negation(s) = *ctx.exprs.get(i).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let Some((prog_idx, union_idx)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let ExprVariant::Progression(ps, a_all) = *ctx.exprs.get(prog_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if ps != s || !ctx.actions.is_all_actions(a_all, ctx.task).map_err(|_| RuleError::WrongShape)? {
        return Ok(false);
    }
    let ExprVariant::Union(u_s, sp) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if u_s != s || dead_target(ctx, p2) != Some(sp) {
        return Ok(false);
    }
    let Some((init, s2)) = subset_pair(ctx, p3) else {
        return Ok(false);
    };
    Ok(s2 == s && is_constant(ctx, init, Constant::Init))
}

/// RG(i, p1, p2, p3): `set[i] = Negation(s)`, the regression mirror of
/// PG — `p1 = Subset(Regression(s, A_all), Union(s, s'))`, `p2 = Dead(s')`,
/// `p3 = Dead(Intersection(i, GOAL))`.
pub fn rg(
    ctx: &RuleContext,
    i: ExprIndex,
    p1: KnowledgeIndex,
    p2: KnowledgeIndex,
    p3: KnowledgeIndex,
) -> Result<bool, RuleError> {
    let ExprVariant::Negation(s) = *ctx.exprs.get(i).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let Some((reg_idx, union_idx)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let ExprVariant::Regression(rs, a_all) = *ctx.exprs.get(reg_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if rs != s || !ctx.actions.is_all_actions(a_all, ctx.task).map_err(|_| RuleError::WrongShape)? {
        return Ok(false);
    }
    let ExprVariant::Union(u_s, sp) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if u_s != s || dead_target(ctx, p2) != Some(sp) {
        return Ok(false);
    }
    let Some(dead_idx) = dead_target(ctx, p3) else {
        return Ok(false);
    };
    Ok(is_intersection_with_goal(ctx, dead_idx, i))
}

/// RI(i, p1, p2, p3): the regression dual of PI —
/// `set[i] = Negation(s)`, `p1 = Subset(Regression(s, A_all), Union(s, s'))`,
/// `p2 = Dead(s')`, `p3 = Subset(GOAL, s)`.
pub fn ri(
    ctx: &RuleContext,
    i: ExprIndex,
    p1: KnowledgeIndex,
    p2: KnowledgeIndex,
    p3: KnowledgeIndex,
) -> Result<bool, RuleError> {
    let ExprVariant::Negation(s) = *ctx.exprs.get(i).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let Some((reg_idx, union_idx)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let ExprVariant::Regression(rs, a_all) = *ctx.exprs.get(reg_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if rs != s || !ctx.actions.is_all_actions(a_all, ctx.task).map_err(|_| RuleError::WrongShape)? {
        return Ok(false);
    }
    let ExprVariant::Union(u_s, sp) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if u_s != s || dead_target(ctx, p2) != Some(sp) {
        return Ok(false);
    }
    let Some((goal, s2)) = subset_pair(ctx, p3) else {
        return Ok(false);
    };
    Ok(s2 == s && is_constant(ctx, goal, Constant::Goal))
}

/// PR(l, r, p): if `p = Subset(Progression(s, A), s')` then
/// `Subset(Regression(¬s', A), ¬s)` holds; a syntactic check that `l`
/// is `Regression(Negation(s'), A)` and `r` is `Negation(s)`.
pub fn pr(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((prog_idx, sprime)) = subset_pair(ctx, p) else {
        return Ok(false);
    };
    let ExprVariant::Progression(s, a) = *ctx.exprs.get(prog_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Regression(neg_sprime, a2) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if a2 != a {
        return Ok(false);
    }
    let ExprVariant::Negation(inner) = *ctx.exprs.get(neg_sprime).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if inner != sprime {
        return Ok(false);
    }
    let ExprVariant::Negation(inner_r) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(inner_r == s)
}

/// RP(l, r, p): symmetric — if `p = Subset(Regression(s, A), s')` then
/// `Subset(Progression(¬s', A), ¬s)` holds.
pub fn rp(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((reg_idx, sprime)) = subset_pair(ctx, p) else {
        return Ok(false);
    };
    let ExprVariant::Regression(s, a) = *ctx.exprs.get(reg_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Progression(neg_sprime, a2) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if a2 != a {
        return Ok(false);
    }
    let ExprVariant::Negation(inner) = *ctx.exprs.get(neg_sprime).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if inner != sprime {
        return Ok(false);
    }
    let ExprVariant::Negation(inner_r) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(inner_r == s)
}
