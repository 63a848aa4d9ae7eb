/*!
Set-theoretic rules (§4.5 "Set-theoretic rules", §9): standard lattice
identities over the expression store and its progression/regression
compounds. None of these consult a formalism engine — each is a
syntactic shape check on the conclusion's operand expressions plus the
appropriate premise lookups (§9 gives permission to fix these to full
semantic precision since the original only stubs them).

Union/intersection introduction (UR/UL/IR/IL) and the distributivity
tautology (DI) are named for which *side* of the compound the matched
operand sits on; see each rule's doc comment for the exact shape.
*/

use crate::expr::ExprVariant;
use crate::knowledge::KnowledgeItem;
use crate::types::err::RuleError;
use crate::types::{ExprIndex, KnowledgeIndex};

use super::RuleContext;

fn subset_pair(ctx: &RuleContext, premise: KnowledgeIndex) -> Option<(ExprIndex, ExprIndex)> {
    match ctx.knowledge.get(premise).ok()? {
        KnowledgeItem::Subset(a, b) => Some((a, b)),
        _ => None,
    }
}

/// UL(l, r, p): `p = Subset(l, a)`; `r = Union(a, _)` — `a ⊆ a ∪ b` for any `b`.
pub fn ul(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((pl, a)) = subset_pair(ctx, p) else {
        return Ok(false);
    };
    let ExprVariant::Union(ra, _) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(pl == l && ra == a)
}

/// UR(l, r, p): `p = Subset(l, b)`; `r = Union(_, b)` — `b ⊆ a ∪ b` for any `a`.
pub fn ur(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((pl, b)) = subset_pair(ctx, p) else {
        return Ok(false);
    };
    let ExprVariant::Union(_, rb) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(pl == l && rb == b)
}

/// IL(l, r, p): `p = Subset(a, r)`; `l = Intersection(a, _)` —
/// `a ∩ b ⊆ a ⊆ r` for any `b`.
pub fn il(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((a, pr)) = subset_pair(ctx, p) else {
        return Ok(false);
    };
    let ExprVariant::Intersection(la, _) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(pr == r && la == a)
}

/// IR(l, r, p): `p = Subset(b, r)`; `l = Intersection(_, b)` —
/// `a ∩ b ⊆ b ⊆ r` for any `a`.
pub fn ir(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((b, pr)) = subset_pair(ctx, p) else {
        return Ok(false);
    };
    let ExprVariant::Intersection(_, lb) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(pr == r && lb == b)
}

/// DI(l, r): zero-premise distributivity tautology —
/// `l = Intersection(x, Union(a, b))`, `r = Union(Intersection(x, a), Intersection(x, b))`.
pub fn di(ctx: &RuleContext, l: ExprIndex, r: ExprIndex) -> Result<bool, RuleError> {
    let ExprVariant::Intersection(x, union_idx) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Union(a, b) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Union(left_idx, right_idx) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Intersection(x1, a1) = *ctx.exprs.get(left_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Intersection(x2, b1) = *ctx.exprs.get(right_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(x1 == x && x2 == x && a1 == a && b1 == b)
}

/// ST(l, r, p1, p2): `p1 = Subset(l, m)`, `p2 = Subset(m, r)`.
pub fn st(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((a, m1)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let Some((m2, b)) = subset_pair(ctx, p2) else {
        return Ok(false);
    };
    Ok(a == l && b == r && m1 == m2)
}

/// SU(l, r, p1, p2): `l = Union(a, b)`, `r = Union(c, d)`,
/// `p1 = Subset(a, c)`, `p2 = Subset(b, d)`.
pub fn su(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let ExprVariant::Union(a, b) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Union(c, d) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(subset_pair(ctx, p1) == Some((a, c)) && subset_pair(ctx, p2) == Some((b, d)))
}

/// SI(l, r, p1, p2): `l = Intersection(a, b)`, `r = Intersection(c, d)`,
/// `p1 = Subset(a, c)`, `p2 = Subset(b, d)`.
pub fn si(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let ExprVariant::Intersection(a, b) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Intersection(c, d) = *ctx.exprs.get(r).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(subset_pair(ctx, p1) == Some((a, c)) && subset_pair(ctx, p2) == Some((b, d)))
}

/// AT(l, r, p1, p2): progression-transitivity — `p1 = Subset(x, y)`,
/// `p2 = Subset(Progression(y, a), r)`, `l = Progression(x, a)`.
/// Sound because progression is monotonic in its state argument.
pub fn at(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((x, y)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let Some((prog_y, pr)) = subset_pair(ctx, p2) else {
        return Ok(false);
    };
    if pr != r {
        return Ok(false);
    }
    let ExprVariant::Progression(py, a) = *ctx.exprs.get(prog_y).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if py != y {
        return Ok(false);
    }
    let ExprVariant::Progression(lx, la) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(lx == x && la == a)
}

/// AU(l, r, p1, p2): progression-union-preservation —
/// `p1 = Subset(Progression(x, a), r)`, `p2 = Subset(Progression(y, a), r)`,
/// `l = Progression(Union(x, y), a)`.
pub fn au(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((prog_x, r1)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let Some((prog_y, r2)) = subset_pair(ctx, p2) else {
        return Ok(false);
    };
    if r1 != r || r2 != r {
        return Ok(false);
    }
    let ExprVariant::Progression(x, a1) = *ctx.exprs.get(prog_x).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Progression(y, a2) = *ctx.exprs.get(prog_y).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if a1 != a2 {
        return Ok(false);
    }
    let ExprVariant::Progression(union_idx, la) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if la != a1 {
        return Ok(false);
    }
    let ExprVariant::Union(ux, uy) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(ux == x && uy == y)
}

/// PT(l, r, p1, p2): regression-transitivity, the mirror of AT using
/// `Regression` in place of `Progression`.
pub fn pt(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((x, y)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let Some((reg_y, pr)) = subset_pair(ctx, p2) else {
        return Ok(false);
    };
    if pr != r {
        return Ok(false);
    }
    let ExprVariant::Regression(py, a) = *ctx.exprs.get(reg_y).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if py != y {
        return Ok(false);
    }
    let ExprVariant::Regression(lx, la) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(lx == x && la == a)
}

/// PU(l, r, p1, p2): regression-union-preservation, the mirror of AU
/// using `Regression` in place of `Progression`.
pub fn pu(ctx: &RuleContext, l: ExprIndex, r: ExprIndex, p1: KnowledgeIndex, p2: KnowledgeIndex) -> Result<bool, RuleError> {
    let Some((reg_x, r1)) = subset_pair(ctx, p1) else {
        return Ok(false);
    };
    let Some((reg_y, r2)) = subset_pair(ctx, p2) else {
        return Ok(false);
    };
    if r1 != r || r2 != r {
        return Ok(false);
    }
    let ExprVariant::Regression(x, a1) = *ctx.exprs.get(reg_x).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    let ExprVariant::Regression(y, a2) = *ctx.exprs.get(reg_y).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if a1 != a2 {
        return Ok(false);
    }
    let ExprVariant::Regression(union_idx, la) = *ctx.exprs.get(l).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    if la != a1 {
        return Ok(false);
    }
    let ExprVariant::Union(ux, uy) = *ctx.exprs.get(union_idx).map_err(|_| RuleError::WrongShape)? else {
        return Ok(false);
    };
    Ok(ux == x && uy == y)
}
