/*!
Formalism engines (§4.4): BDD, Horn, 2-CNF, and explicit enumeration,
each representing state sets in one encoding and each capable of the
*basic subset tests* B1-B5 specialised to its own encoding.

A [Basic] set owns its concrete representation; the [expression
store](crate::store::expr_store) holds one per basic expression,
addressed only by [ExprIndex](crate::types::ExprIndex). The rule
engine never touches engine internals directly — it goes through the
[dispatch](crate::rules::basic) layer, which picks a formalism based
on the syntactic shape of the operand expressions.
*/

pub mod bdd;
pub mod explicit;
pub mod horn;
pub mod twocnf;

use crate::task::Task;
use crate::types::Fact;

/// Which formalism a [Basic] set is encoded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormalismKind {
    Bdd,
    Horn,
    TwoCnf,
    Explicit,
}

/// Capability flags a formalism advertises, consulted by [B4](crate::rules::basic::b4)
/// to pick a feasible bridging direction between two different formalisms (§4.4, §9).
#[derive(Clone, Copy, Debug, Default)]
pub struct Capabilities {
    pub model_enumeration: bool,
    pub clausal_entailment: bool,
    pub model_count: bool,
}

/// A owned, formalism-tagged basic set, as stored by the expression store.
///
/// Wrapping the four concrete representations in one enum (rather than
/// a trait object) keeps ownership flat: the store holds `Basic`
/// directly, no `Box<dyn _>` indirection, matching how `otter_sat`
/// keeps its clause variants (unit/binary/long) as a plain enum behind
/// typed keys rather than trait objects.
#[derive(Clone, Debug)]
pub enum Basic {
    Bdd(bdd::BddSet),
    Horn(horn::HornSet),
    TwoCnf(twocnf::TwoCnfSet),
    Explicit(explicit::ExplicitSet),
}

impl Basic {
    pub fn kind(&self) -> FormalismKind {
        match self {
            Basic::Bdd(_) => FormalismKind::Bdd,
            Basic::Horn(_) => FormalismKind::Horn,
            Basic::TwoCnf(_) => FormalismKind::TwoCnf,
            Basic::Explicit(_) => FormalismKind::Explicit,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Basic::Bdd(_) => Capabilities {
                model_enumeration: true,
                clausal_entailment: false,
                model_count: true,
            },
            Basic::Horn(_) => Capabilities {
                model_enumeration: false,
                clausal_entailment: true,
                model_count: false,
            },
            Basic::TwoCnf(_) => Capabilities {
                model_enumeration: true,
                clausal_entailment: true,
                model_count: false,
            },
            Basic::Explicit(_) => Capabilities {
                model_enumeration: true,
                clausal_entailment: false,
                model_count: true,
            },
        }
    }

    /// Drops the concrete payload, for the discard pass (§3.5, §4.2).
    /// The formalism tag is preserved so the expression's *kind* is
    /// still inspectable (e.g. by set-theoretic shape checks) even
    /// after its content has been freed.
    pub fn discard_payload(&mut self) {
        match self {
            Basic::Bdd(b) => b.discard_payload(),
            Basic::Horn(h) => h.discard_payload(),
            Basic::TwoCnf(t) => t.discard_payload(),
            Basic::Explicit(e) => e.discard_payload(),
        }
    }
}

/// A reference to a full state, as a cube over every task fact.
pub type Cube = Vec<bool>;

/// A partial assignment over some subset of facts (`-1` unconstrained),
/// as parsed from the task file's goal line or built from a literal.
pub type PartialCube = Vec<i8>;

/// Looks up a fact's value in a (possibly partial) variable-indexed assignment.
pub fn partial_get(partial: &[i8], vars: &[Fact], fact: Fact) -> Option<bool> {
    vars.iter()
        .position(|&v| v == fact)
        .map(|pos| partial[pos] == 1)
}

/// Shared helper: build the initial-state cube and goal partial cube from a task,
/// used by the [Constant](crate::expr::Constant) variants.
pub fn initial_cube(task: &Task) -> Cube {
    task.initial().to_vec()
}

pub fn goal_partial(task: &Task) -> PartialCube {
    task.goal().to_vec()
}
