/*!
Parses and checks one `k <i> <kind> ...` certificate line (§6),
dispatching into [crate::rules::dispatch] and turning its verdict into
either a new [KnowledgeItem] to append or a recorded failure.

A rule returning `Ok(false)` or a non-fatal [RuleError] (§7 "rule
premise mismatch") is reported as [LineOutcome::Failed] — no knowledge
is appended, and the driver carries on. A fatal [RuleError] (§7 "format
mismatch") propagates as an [ErrorKind] and ends the run.
*/

use crate::knowledge::KnowledgeItem;
use crate::rules::{dispatch, RuleContext, RuleTag};
use crate::types::err::{ErrorKind, ParseError};

use super::token::Tokens;

pub enum LineOutcome {
    Appended(KnowledgeItem),
    Failed,
}

fn parse_tag(tokens: &mut Tokens) -> Result<RuleTag, ParseError> {
    let raw = tokens.next_token()?;
    RuleTag::parse(raw).ok_or_else(|| ParseError::UnknownTag(raw.to_string()))
}

pub fn parse_knowledge_line(tokens: &mut Tokens, ctx: &mut RuleContext) -> Result<LineOutcome, ErrorKind> {
    match tokens.next_token()? {
        "s" => {
            let left = tokens.next_u32()?;
            let right = tokens.next_u32()?;
            let tag = parse_tag(tokens)?;
            let mut premises = Vec::new();
            while !tokens.rest_is_empty() {
                premises.push(tokens.next_u32()?);
            }
            match dispatch::subset_statement(ctx, tag, left, right, &premises) {
                Ok(true) => Ok(LineOutcome::Appended(KnowledgeItem::Subset(left, right))),
                Ok(false) => Ok(LineOutcome::Failed),
                Err(e) if dispatch::is_fatal(&e) => Err(ErrorKind::Rule(e)),
                Err(_) => Ok(LineOutcome::Failed),
            }
        }
        "d" => {
            let target = tokens.next_u32()?;
            let tag = parse_tag(tokens)?;
            let mut premises = Vec::new();
            while !tokens.rest_is_empty() {
                premises.push(tokens.next_u32()?);
            }
            match dispatch::dead_statement(&*ctx, tag, target, &premises) {
                Ok(true) => Ok(LineOutcome::Appended(KnowledgeItem::Dead(target))),
                Ok(false) => Ok(LineOutcome::Failed),
                Err(e) if dispatch::is_fatal(&e) => Err(ErrorKind::Rule(e)),
                Err(_) => Ok(LineOutcome::Failed),
            }
        }
        "u" => {
            let tag = parse_tag(tokens)?;
            let premise_idx = tokens.next_u32()?;
            match dispatch::unsolvable_statement(&*ctx, tag, premise_idx) {
                Ok(true) => Ok(LineOutcome::Appended(KnowledgeItem::Unsolvable)),
                Ok(false) => Ok(LineOutcome::Failed),
                Err(e) if dispatch::is_fatal(&e) => Err(ErrorKind::Rule(e)),
                Err(_) => Ok(LineOutcome::Failed),
            }
        }
        other => Err(ParseError::UnknownTag(other.to_string()).into()),
    }
}
