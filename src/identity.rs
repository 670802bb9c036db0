//! Identity aggregation: fan out to both resolvers, merge into one record.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::name::{NameRegistry, NameResolver, OnchainName};
use crate::social::{SocialGraph, SocialProfile, SocialProfileResolver};

/// Outcome of resolving one identity facet.
///
/// `Absent` means the source answered and had nothing; `Unavailable` means
/// the source could not be consulted. Callers that only care about data can
/// use [`Facet::value`]; callers (and tests) that care about *why* a facet
/// is empty can tell the two apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Facet<T> {
    Resolved(T),
    Absent,
    Unavailable,
}

impl<T> Facet<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Facet::Resolved(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Facet::Unavailable)
    }
}

/// One address's merged identity. Always fully formed: each facet degrades
/// independently and the record is never partially constructed or thrown.
/// Built fresh per request, immutable once returned, never cached here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub address: Address,
    pub name: Facet<OnchainName>,
    pub social: Facet<SocialProfile>,
}

/// Fans a resolution request out to both sources concurrently and merges
/// the results facet-wise. Never fails; worst case both facets degrade.
#[derive(Clone, Debug)]
pub struct IdentityAggregator<R, G> {
    name: NameResolver<R>,
    social: SocialProfileResolver<G>,
}

impl<R: NameRegistry, G: SocialGraph> IdentityAggregator<R, G> {
    pub fn new(registry: R, graph: G) -> Self {
        Self {
            name: NameResolver::new(registry),
            social: SocialProfileResolver::new(graph),
        }
    }

    /// Resolve both identity facets for an address.
    ///
    /// The two resolver futures are issued before either is awaited, so the
    /// network waits overlap: wall time is ≈ max of the two sources, not
    /// their sum. No timeout is applied here; each resolver owns its own
    /// degrade behavior. No cross-source reconciliation is attempted.
    pub async fn combined_identity(&self, address: &Address) -> Identity {
        let (name, social) =
            tokio::join!(self.name.resolve(address), self.social.resolve(address));
        tracing::debug!(
            %address,
            name_resolved = name.value().is_some(),
            social_resolved = social.value().is_some(),
            "identity merged"
        );
        Identity {
            address: *address,
            name,
            social,
        }
    }

    /// The social side of the aggregator, for the secondary list reads.
    pub fn social(&self) -> &SocialProfileResolver<G> {
        &self.social
    }
}
