/*!
Loader for the BDD dump format referenced by `e <i> b <bdd-file> <bdd-index> ;`
(§6 "BDD dump format").

The file's first line gives the fact-to-native-variable order: for each
task fact, the native variable id used for its unprimed copy and the
native id used for its primed copy. The remainder is a sequence of
named BDDs, each a flat list of nodes referencing earlier nodes in the
same BDD by a small integer id (`0`/`1` are the constant leaves); a
BDD's root is its last-listed node. Loading permutes every native
variable id through [crate::engine::bdd::Manager::literal] so that,
independent of the file's own variable order, the node built in this
manager's canonical interleaved slots (`2*fact`, `2*fact+1`).
*/

use std::collections::HashMap;
use std::io::BufRead;

use crate::engine::bdd::{Manager, NodeId};
use crate::types::err::{EngineError, ErrorKind, ParseError};
use crate::types::Fact;

use super::token::Tokens;

/// One loaded file: every named BDD's root node, by position (the
/// `<bdd-index>` a certificate references).
pub struct BddFile {
    roots: Vec<NodeId>,
}

impl BddFile {
    pub fn root(&self, index: usize) -> Result<NodeId, ParseError> {
        self.roots.get(index).copied().ok_or(ParseError::IndexOutOfBounds)
    }
}

/// `native variable id -> canonical (interleaved) variable id`.
struct NativeOrder {
    to_canonical: HashMap<u32, u32>,
}

impl NativeOrder {
    fn canonical(&self, native: u32) -> Result<u32, ParseError> {
        self.to_canonical
            .get(&native)
            .copied()
            .ok_or_else(|| ParseError::UnknownTag(format!("native variable {native}")))
    }
}

pub fn load_bdd_file(reader: impl BufRead, fact_count: usize, mgr: &mut Manager) -> Result<BddFile, ErrorKind> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(ParseError::UnexpectedEof)?.map_err(|_| ParseError::UnexpectedEof)?;
    let mut tokens = Tokens::new(1, &header);
    let declared_facts = tokens.next_usize()?;
    if declared_facts != fact_count {
        return Err(EngineError::IncompleteVariableOrder.into());
    }
    let mut to_canonical = HashMap::new();
    for fact in 0..fact_count as Fact {
        let native_unprimed = tokens.next_u32()?;
        let native_primed = tokens.next_u32()?;
        to_canonical.insert(native_unprimed, mgr.unprimed(fact));
        to_canonical.insert(native_primed, mgr.primed(fact));
    }
    let order = NativeOrder { to_canonical };

    let count_line = lines.next().ok_or(ParseError::UnexpectedEof)?.map_err(|_| ParseError::UnexpectedEof)?;
    let mut count_tokens = Tokens::new(2, &count_line);
    let num_bdds = count_tokens.next_usize()?;

    let mut roots = Vec::with_capacity(num_bdds);
    let mut line_no = 2;
    for _ in 0..num_bdds {
        line_no += 1;
        let header = lines.next().ok_or(ParseError::UnexpectedEof)?.map_err(|_| ParseError::UnexpectedEof)?;
        let mut header_tokens = Tokens::new(line_no, &header);
        let _name = header_tokens.next_token()?;
        let num_nodes = header_tokens.next_usize()?;

        let mut local: HashMap<u32, NodeId> = HashMap::new();
        local.insert(0, mgr.constant(false));
        local.insert(1, mgr.constant(true));
        let mut last_id = None;
        for _ in 0..num_nodes {
            line_no += 1;
            let line = lines.next().ok_or(ParseError::UnexpectedEof)?.map_err(|_| ParseError::UnexpectedEof)?;
            let mut t = Tokens::new(line_no, &line);
            let node_id = t.next_u32()?;
            let native_var = t.next_u32()?;
            let low_ref = t.next_u32()?;
            let high_ref = t.next_u32()?;
            let canonical_var = order.canonical(native_var)?;
            let low = *local.get(&low_ref).ok_or(ParseError::UnboundIndex(low_ref))?;
            let high = *local.get(&high_ref).ok_or(ParseError::UnboundIndex(high_ref))?;
            let test = mgr.literal(canonical_var, true);
            let node = mgr.ite(test, high, low);
            local.insert(node_id, node);
            last_id = Some(node_id);
        }
        let root_id = last_id.ok_or(ParseError::UnexpectedEof)?;
        roots.push(local[&root_id]);
    }

    Ok(BddFile { roots })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_single_literal_bdd() {
        // one fact (native ids 0 unprimed, 1 primed); one BDD "x", one
        // node testing the fact positively.
        let text = "1 0 1\n1\nx 1\n2 0 0 1\n";
        let mut mgr = Manager::new(1);
        let file = load_bdd_file(text.as_bytes(), 1, &mut mgr).unwrap();
        let root = file.root(0).unwrap();
        let expected = mgr.literal(mgr.unprimed(0), true);
        assert_eq!(root, expected);
    }
}
