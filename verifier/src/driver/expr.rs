/*!
Parses one `e <i> <variant> ...` certificate line (§6) into an
[ExprVariant], including the four basic-formalism bodies and the
BDD-dump-file reference.
*/

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::bdd::Manager;
use crate::engine::explicit::{ExplicitContent, ExplicitSet};
use crate::engine::horn::{HornClause, HornContent, HornSet};
use crate::engine::twocnf::{Literal as TwoCnfLiteral, TwoCnfContent, TwoCnfSet};
use crate::engine::Basic;
use crate::expr::{Constant, ExprVariant};
use crate::types::err::{EngineError, ErrorKind, ParseError};

use super::bdd_file::{load_bdd_file, BddFile};
use super::token::Tokens;

/// Caches a BDD dump file's parsed roots by path, so repeated `e ... b
/// <file> <index> ;` lines referencing the same file only parse it once.
#[derive(Default)]
pub struct BddFileCache {
    files: HashMap<String, BddFile>,
}

impl BddFileCache {
    pub fn new() -> Self {
        BddFileCache::default()
    }

    fn get_or_load(&mut self, path: &str, fact_count: usize, mgr: &mut Manager) -> Result<&BddFile, ErrorKind> {
        if !self.files.contains_key(path) {
            let file = File::open(Path::new(path)).map_err(|_| ErrorKind::Parse(ParseError::NoCertificateFile))?;
            let loaded = load_bdd_file(BufReader::new(file), fact_count, mgr)?;
            self.files.insert(path.to_string(), loaded);
        }
        Ok(self.files.get(path).expect("just inserted"))
    }
}

pub fn parse_expr_variant(
    tokens: &mut Tokens,
    fact_count: usize,
    mgr: &mut Manager,
    bdd_files: &mut BddFileCache,
) -> Result<ExprVariant, ErrorKind> {
    let kind = tokens.next_token()?;
    match kind {
        "c" => {
            let c = match tokens.next_token()? {
                "e" => Constant::Empty,
                "i" => Constant::Init,
                "g" => Constant::Goal,
                other => return Err(ParseError::UnknownTag(other.to_string()).into()),
            };
            Ok(ExprVariant::Constant(c))
        }
        "n" => Ok(ExprVariant::Negation(tokens.next_u32()?)),
        "i" => Ok(ExprVariant::Intersection(tokens.next_u32()?, tokens.next_u32()?)),
        "u" => Ok(ExprVariant::Union(tokens.next_u32()?, tokens.next_u32()?)),
        "p" => Ok(ExprVariant::Progression(tokens.next_u32()?, tokens.next_u32()?)),
        "r" => Ok(ExprVariant::Regression(tokens.next_u32()?, tokens.next_u32()?)),
        "b" => {
            let path = tokens.next_token()?.to_string();
            let index = tokens.next_usize()?;
            tokens.expect(";")?;
            let file = bdd_files.get_or_load(&path, fact_count, mgr)?;
            let root = file.root(index)?;
            Ok(ExprVariant::Basic(Basic::Bdd(crate::engine::bdd::BddSet::new(root, fact_count))))
        }
        "h" => {
            let content = parse_horn_body(tokens)?;
            tokens.expect(";")?;
            Ok(ExprVariant::Basic(Basic::Horn(HornSet::new(fact_count, content))))
        }
        "2" => {
            let content = parse_twocnf_body(tokens)?;
            tokens.expect(";")?;
            Ok(ExprVariant::Basic(Basic::TwoCnf(TwoCnfSet::new(content))))
        }
        "x" => {
            let content = parse_explicit_body(tokens)?;
            Ok(ExprVariant::Basic(Basic::Explicit(ExplicitSet::new(content))))
        }
        other => Err(ParseError::UnknownTag(other.to_string()).into()),
    }
}

fn parse_horn_body(tokens: &mut Tokens) -> Result<HornContent, ParseError> {
    let mut content = HornContent::default();
    let n_true = tokens.next_usize()?;
    for _ in 0..n_true {
        content.forced_true.insert(tokens.next_u32()?);
    }
    let n_false = tokens.next_usize()?;
    for _ in 0..n_false {
        content.forced_false.insert(tokens.next_u32()?);
    }
    let n_clauses = tokens.next_usize()?;
    for _ in 0..n_clauses {
        let n_negs = tokens.next_usize()?;
        let mut negs = Vec::with_capacity(n_negs);
        for _ in 0..n_negs {
            negs.push(tokens.next_u32()?);
        }
        let has_pos = tokens.next_u32()?;
        let pos = if has_pos != 0 { Some(tokens.next_u32()?) } else { None };
        content.clauses.push(HornClause { negs, pos });
    }
    Ok(content)
}

fn parse_twocnf_body(tokens: &mut Tokens) -> Result<TwoCnfContent, ParseError> {
    let var_count = tokens.next_usize()?;
    let n_units = tokens.next_usize()?;
    let mut units = Vec::with_capacity(n_units);
    for _ in 0..n_units {
        let fact = tokens.next_u32()?;
        let positive = tokens.next_u32()? != 0;
        units.push(TwoCnfLiteral { fact, positive });
    }
    let n_clauses = tokens.next_usize()?;
    let mut clauses = Vec::with_capacity(n_clauses);
    for _ in 0..n_clauses {
        let a_fact = tokens.next_u32()?;
        let a_pos = tokens.next_u32()? != 0;
        let b_fact = tokens.next_u32()?;
        let b_pos = tokens.next_u32()? != 0;
        clauses.push((
            TwoCnfLiteral { fact: a_fact, positive: a_pos },
            TwoCnfLiteral { fact: b_fact, positive: b_pos },
        ));
    }
    Ok(TwoCnfContent { var_count, units, clauses })
}

fn parse_explicit_body(tokens: &mut Tokens) -> Result<ExplicitContent, ErrorKind> {
    let nvars = tokens.next_usize()?;
    let mut vars = Vec::with_capacity(nvars);
    for _ in 0..nvars {
        vars.push(tokens.next_u32()?);
    }
    tokens.expect(":")?;
    let mut models = std::collections::HashSet::new();
    loop {
        let tok = tokens.next_token()?;
        if tok == ";" {
            break;
        }
        models.insert(decode_hex_model(tok, nvars)?);
    }
    // `;` already consumed above as the loop terminator.
    Ok(ExplicitContent { vars, models })
}

fn decode_hex_model(hex: &str, nvars: usize) -> Result<Vec<bool>, ErrorKind> {
    let mut bits = Vec::with_capacity(hex.len() * 4);
    for ch in hex.chars() {
        let nibble = ch.to_digit(16).ok_or(ParseError::BadInteger)?;
        for bit in 0..4 {
            bits.push((nibble >> bit) & 1 == 1);
        }
    }
    if bits.len() < nvars {
        return Err(EngineError::ModelLengthMismatch.into());
    }
    bits.truncate(nvars);
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_constant_expression() {
        let mut t = Tokens::new(1, "c g");
        let mut mgr = Manager::new(1);
        let mut cache = BddFileCache::new();
        let variant = parse_expr_variant(&mut t, 1, &mut mgr, &mut cache).unwrap();
        assert!(matches!(variant, ExprVariant::Constant(Constant::Goal)));
    }

    #[test]
    fn parses_horn_body() {
        let mut t = Tokens::new(1, "h 1 0 0 1 1 0 1 5 ;");
        let mut mgr = Manager::new(6);
        let mut cache = BddFileCache::new();
        let variant = parse_expr_variant(&mut t, 6, &mut mgr, &mut cache).unwrap();
        match variant {
            ExprVariant::Basic(Basic::Horn(set)) => {
                let content = set.content_ref();
                assert!(content.forced_true.contains(&0));
                assert_eq!(content.clauses.len(), 1);
            }
            _ => panic!("expected Horn expression"),
        }
    }

    #[test]
    fn parses_explicit_body_with_hex_models() {
        // nvars=1, var id 0; single model bit = true -> nibble 0x1.
        let mut t = Tokens::new(1, "x 1 0 : 1 ;");
        let mut mgr = Manager::new(1);
        let mut cache = BddFileCache::new();
        let variant = parse_expr_variant(&mut t, 1, &mut mgr, &mut cache).unwrap();
        match variant {
            ExprVariant::Basic(Basic::Explicit(set)) => {
                assert!(set.content_ref().models.contains(&vec![true]));
            }
            _ => panic!("expected explicit expression"),
        }
    }
}
