/*!
Parses one `a <i> <variant> ...` certificate line (§6) into an
[ActionSetVariant].
*/

use crate::store::action_store::ActionSetVariant;
use crate::types::err::ParseError;

use super::token::Tokens;

pub fn parse_action_set_variant(tokens: &mut Tokens) -> Result<ActionSetVariant, ParseError> {
    match tokens.next_token()? {
        "a" => Ok(ActionSetVariant::All),
        "b" => {
            let n = tokens.next_usize()?;
            let mut ids = Vec::with_capacity(n);
            for _ in 0..n {
                ids.push(tokens.next_u32()?);
            }
            Ok(ActionSetVariant::Explicit(ids))
        }
        "u" => Ok(ActionSetVariant::Union(tokens.next_u32()?, tokens.next_u32()?)),
        other => Err(ParseError::UnknownTag(other.to_string())),
    }
}
