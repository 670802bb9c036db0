use crate::address::Address;

/// Endpoint configuration for the core's three external surfaces.
///
/// Passed explicitly at construction — the core holds no ambient/global
/// provider state. The reward contract lives on the same chain as the name
/// registry, so ledger calls go through `registry_endpoint` addressed to
/// `ledger_address`.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    /// Chain RPC endpoint serving name-registry lookups and ledger calls.
    pub registry_endpoint: String,
    /// Social-graph API endpoint.
    pub social_graph_endpoint: String,
    /// On-chain address of the referral reward contract.
    pub ledger_address: Address,
}
