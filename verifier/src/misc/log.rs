/*!
Targets to be used within a [log]! macro, to help narrow output to the relevant part of a
certificate replay.

No log implementation is provided; pair with something like
[env_logger](https://docs.rs/env_logger/latest/env_logger/), e.g.
`RUST_LOG=rules=trace planproof_cli ...`.
*/

pub mod targets {
    /// Logs related to the [expression store](crate::store::expr_store).
    pub const EXPR_STORE: &str = "expr_store";

    /// Logs related to the [action-set store](crate::store::action_store).
    pub const ACTION_STORE: &str = "action_store";

    /// Logs related to the [knowledge base](crate::knowledge).
    pub const KNOWLEDGE: &str = "knowledge";

    /// Logs related to [rule dispatch](crate::rules).
    pub const RULES: &str = "rules";

    /// Logs related to the [Horn engine](crate::engine::horn).
    pub const HORN: &str = "horn";

    /// Logs related to the [BDD engine](crate::engine::bdd).
    pub const BDD: &str = "bdd";

    /// Logs related to the [2-CNF engine](crate::engine::twocnf).
    pub const TWOCNF: &str = "twocnf";

    /// Logs related to the [explicit engine](crate::engine::explicit).
    pub const EXPLICIT: &str = "explicit";

    /// Logs related to the [certificate driver](crate::driver).
    pub const DRIVER: &str = "driver";
}
