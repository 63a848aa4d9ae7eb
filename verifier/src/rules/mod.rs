/*!
The rule engine (§4.5): ~25 derivation rules plus the five basic
subset statements, grouped by the kind of knowledge item they justify
rather than by name — which mirrors the certificate format itself
(`k <i> s ...` / `k <i> d ...` / `k <i> u ...`), where the grammar
already tells you which group a tag belongs to before you even look at
the tag.

Rules never panic and never consult an engine before checking that
their operands have the right syntactic shape (§4.5 "edge cases").
A rule that doesn't recognise its operands' shape returns
`Ok(false)`, exactly like one that recognises the shape but finds the
claim false — the certificate is rejected either way, and the
distinction is not observable to the driver. [RuleError] is reserved
for shape/bridge failures a caller may want to log distinctly from a
merely false rule instance.
*/

pub mod basic;
pub mod conclude;
pub mod dead;
pub mod dispatch;
pub mod lattice;

use crate::engine::bdd;
use crate::knowledge::KnowledgeBase;
use crate::store::action_store::ActionSetStore;
use crate::store::expr_store::ExprStore;
use crate::task::Task;

/// Everything a rule needs to consult: the two stores, the knowledge
/// base accumulated so far, the task, and the one shared mutable
/// resource (the BDD manager).
pub struct RuleContext<'a> {
    pub exprs: &'a ExprStore,
    pub actions: &'a ActionSetStore,
    pub knowledge: &'a KnowledgeBase,
    pub task: &'a Task,
    pub bdd: &'a mut bdd::Manager,
}

/// The two-letter tag naming a derivation rule or basic statement (§6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleTag {
    B1,
    B2,
    B3,
    B4,
    B5,
    Ed,
    Ud,
    Sd,
    Pg,
    Pi,
    Rg,
    Ri,
    Pr,
    Rp,
    Ci,
    Cg,
    Ur,
    Ul,
    Ir,
    Il,
    Di,
    Su,
    Si,
    St,
    At,
    Au,
    Pt,
    Pu,
}

impl RuleTag {
    pub fn parse(tag: &str) -> Option<RuleTag> {
        Some(match tag {
            "b1" => RuleTag::B1,
            "b2" => RuleTag::B2,
            "b3" => RuleTag::B3,
            "b4" => RuleTag::B4,
            "b5" => RuleTag::B5,
            "ed" => RuleTag::Ed,
            "ud" => RuleTag::Ud,
            "sd" => RuleTag::Sd,
            "pg" => RuleTag::Pg,
            "pi" => RuleTag::Pi,
            "rg" => RuleTag::Rg,
            "ri" => RuleTag::Ri,
            "pr" => RuleTag::Pr,
            "rp" => RuleTag::Rp,
            "ci" => RuleTag::Ci,
            "cg" => RuleTag::Cg,
            "ur" => RuleTag::Ur,
            "ul" => RuleTag::Ul,
            "ir" => RuleTag::Ir,
            "il" => RuleTag::Il,
            "di" => RuleTag::Di,
            "su" => RuleTag::Su,
            "si" => RuleTag::Si,
            "st" => RuleTag::St,
            "at" => RuleTag::At,
            "au" => RuleTag::Au,
            "pt" => RuleTag::Pt,
            "pu" => RuleTag::Pu,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_documented_tag() {
        for tag in [
            "b1", "b2", "b3", "b4", "b5", "ed", "ud", "sd", "pg", "pi", "rg", "ri", "pr", "rp", "ci", "cg", "ur",
            "ul", "ir", "il", "di", "su", "si", "st", "at", "au", "pt", "pu",
        ] {
            assert!(RuleTag::parse(tag).is_some(), "failed to parse {tag}");
        }
        assert!(RuleTag::parse("zz").is_none());
    }
}
