/*!
Explicit state sets (§4.4.4): a hash set of concrete models. The
formalism of last resort — no structure is exploited beyond hashing —
used for sets too irregular for the other three encodings to pay off,
and as the target of cross-formalism bridging in [B4](crate::rules::basic::b4).

A model does not have to range over every task fact: a set built by
projecting onto a pattern of facts is stored over just that pattern,
and [ExplicitSet::is_subset] lazily enumerates whichever facts one
operand is silent about and the other constrains, rather than
materialising the full cross product up front.
*/

use std::collections::HashMap;
use std::collections::HashSet;

use crate::types::Fact;

#[derive(Clone, Debug, Default)]
pub struct ExplicitContent {
    /// Facts this set's models are defined over, in the order each
    /// model's entries correspond to.
    pub vars: Vec<Fact>,
    pub models: HashSet<Vec<bool>>,
}

impl ExplicitContent {
    pub fn singleton(vars: Vec<Fact>, model: Vec<bool>) -> Self {
        let mut models = HashSet::new();
        models.insert(model);
        ExplicitContent { vars, models }
    }

    fn position(&self, fact: Fact) -> Option<usize> {
        self.vars.iter().position(|&f| f == fact)
    }

    fn contains_key(&self, key: &[bool]) -> bool {
        self.models.contains(key)
    }

    /// `self ⊆ other`. Every stored model of `self` is silent about
    /// facts `other` constrains but `self` doesn't: every possible
    /// extension over those facts must also land in `other` for the
    /// subset to hold, so they're enumerated lazily (short-circuiting
    /// as soon as one extension fails) rather than pre-expanded.
    pub fn is_subset(&self, other: &ExplicitContent) -> bool {
        let other_only: Vec<Fact> = other
            .vars
            .iter()
            .copied()
            .filter(|f| self.position(*f).is_none())
            .collect();

        self.models
            .iter()
            .all(|model| self.extends_into(model, other, &other_only, 0, &mut HashMap::new()))
    }

    fn extends_into(
        &self,
        model: &[bool],
        other: &ExplicitContent,
        other_only: &[Fact],
        idx: usize,
        trial: &mut HashMap<Fact, bool>,
    ) -> bool {
        if idx == other_only.len() {
            let key: Vec<bool> = other
                .vars
                .iter()
                .map(|v| match self.position(*v) {
                    Some(pos) => model[pos],
                    None => trial[v],
                })
                .collect();
            return other.contains_key(&key);
        }
        let v = other_only[idx];
        trial.insert(v, false);
        let ok_false = self.extends_into(model, other, other_only, idx + 1, trial);
        if !ok_false {
            return false;
        }
        trial.insert(v, true);
        self.extends_into(model, other, other_only, idx + 1, trial)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn intersect(a: &ExplicitContent, b: &ExplicitContent) -> ExplicitContent {
        if a.vars == b.vars {
            let models = a.models.intersection(&b.models).cloned().collect();
            return ExplicitContent {
                vars: a.vars.clone(),
                models,
            };
        }
        // Different scopes: build the union of both variable lists and
        // keep a model of the join only if it's consistent with both sides.
        let mut vars = a.vars.clone();
        for &f in &b.vars {
            if !vars.contains(&f) {
                vars.push(f);
            }
        }
        let mut models = HashSet::new();
        for model in &a.models {
            let restricted_b: Vec<bool> = b.vars.iter().map(|f| model_value(a, model, *f)).collect();
            if !b.contains_key(&restricted_b) {
                continue;
            }
            let joined: Vec<bool> = vars.iter().map(|f| model_value(a, model, *f)).collect();
            models.insert(joined);
        }
        ExplicitContent { vars, models }
    }

    pub fn union(a: &ExplicitContent, b: &ExplicitContent) -> Option<ExplicitContent> {
        if a.vars != b.vars {
            return None;
        }
        let mut models = a.models.clone();
        models.extend(b.models.iter().cloned());
        Some(ExplicitContent {
            vars: a.vars.clone(),
            models,
        })
    }

    /// The complement within this set's own variable scope: every
    /// assignment over `vars` not already stored. Only meaningful for
    /// small scopes, as the rest of the explicit engine assumes.
    pub fn complement(&self) -> ExplicitContent {
        let n = self.vars.len();
        let mut models = HashSet::new();
        for bits in 0u64..(1u64 << n) {
            let assignment: Vec<bool> = (0..n).map(|i| (bits >> i) & 1 == 1).collect();
            if !self.models.contains(&assignment) {
                models.insert(assignment);
            }
        }
        ExplicitContent {
            vars: self.vars.clone(),
            models,
        }
    }

    /// Direct evaluation against a full task-wide assignment, used by
    /// the cross-formalism bridge (B4).
    pub fn contains_full_model(&self, model: &[bool]) -> bool {
        let key: Vec<bool> = self.vars.iter().map(|&f| model[f as usize]).collect();
        self.models.contains(&key)
    }

    /// Every model of this set extended to a full task-wide assignment,
    /// used as the enumerable side of B4.
    pub fn full_models(&self, fact_count: usize) -> Vec<Vec<bool>> {
        self.models
            .iter()
            .map(|m| {
                let mut full = vec![false; fact_count];
                for (pos, &fact) in self.vars.iter().enumerate() {
                    full[fact as usize] = m[pos];
                }
                full
            })
            .collect()
    }
}

fn model_value(content: &ExplicitContent, model: &[bool], fact: Fact) -> bool {
    match content.position(fact) {
        Some(pos) => model[pos],
        None => false,
    }
}

/// One explicitly-enumerated set expression.
#[derive(Clone, Debug)]
pub struct ExplicitSet {
    pub content: Option<ExplicitContent>,
}

impl ExplicitSet {
    pub fn new(content: ExplicitContent) -> Self {
        ExplicitSet {
            content: Some(content),
        }
    }

    pub fn discard_payload(&mut self) {
        self.content = None;
    }

    fn content(&self) -> &ExplicitContent {
        self.content
            .as_ref()
            .expect("explicit set consulted after its payload was discarded")
    }

    pub fn is_subset(&self, other: &ExplicitSet) -> bool {
        self.content().is_subset(other.content())
    }

    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    pub fn content_ref(&self) -> &ExplicitContent {
        self.content()
    }

    pub fn contains_full_model(&self, model: &[bool]) -> bool {
        self.content().contains_full_model(model)
    }

    pub fn full_models(&self, fact_count: usize) -> Vec<Vec<bool>> {
        self.content().full_models(fact_count)
    }
}
