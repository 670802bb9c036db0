//! Social-graph profile resolution.
//!
//! Same degrade-not-fail contract as name resolution: read faults log and
//! yield `Unavailable` (or the empty sequence for list reads). Mutations are
//! deliberately unsupported — see [`SocialProfileResolver::create_profile`].

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::CoreConfig;
use crate::error::{ProviderError, UnsupportedOperation};
use crate::identity::Facet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub followers: u64,
    pub following: u64,
    pub publications: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub handle: String,
    pub bio: Option<String>,
    pub avatar_uri: Option<String>,
    pub cover_uri: Option<String>,
    #[serde(default)]
    pub stats: ProfileStats,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub content_uri: String,
}

/// Read surface of the external social-graph service, injected into
/// [`SocialProfileResolver`] at construction.
pub trait SocialGraph {
    /// Profiles owned by an address, in the service's own order.
    fn profiles_of(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<Vec<SocialProfile>, ProviderError>> + Send;

    fn publications_of(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<Vec<Publication>, ProviderError>> + Send;

    fn followers_of(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<Vec<Address>, ProviderError>> + Send;

    fn following_of(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<Vec<Address>, ProviderError>> + Send;
}

/// Best-effort social-profile reads over an injected graph client.
#[derive(Clone, Debug)]
pub struct SocialProfileResolver<G> {
    graph: G,
}

impl<G: SocialGraph> SocialProfileResolver<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// Resolve an address to its primary social profile.
    ///
    /// The service's ordering is authoritative: the first profile returned
    /// is the one used, no re-ranking. Empty result → `Absent`; provider
    /// fault → `Unavailable`.
    pub async fn resolve(&self, address: &Address) -> Facet<SocialProfile> {
        match self.graph.profiles_of(address).await {
            Ok(mut profiles) => {
                if profiles.is_empty() {
                    Facet::Absent
                } else {
                    Facet::Resolved(profiles.swap_remove(0))
                }
            }
            Err(e) => {
                tracing::warn!(%address, error = %e, "social graph unavailable");
                Facet::Unavailable
            }
        }
    }

    /// Publications authored by an address. Degrades to the empty sequence,
    /// never errors, never null.
    pub async fn publications(&self, address: &Address) -> Vec<Publication> {
        match self.graph.publications_of(address).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(%address, error = %e, "publication query degraded to empty");
                Vec::new()
            }
        }
    }

    /// Addresses following the given address. Degrades to empty.
    pub async fn followers(&self, address: &Address) -> Vec<Address> {
        match self.graph.followers_of(address).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(%address, error = %e, "follower query degraded to empty");
                Vec::new()
            }
        }
    }

    /// Addresses the given address follows. Degrades to empty.
    pub async fn following(&self, address: &Address) -> Vec<Address> {
        match self.graph.following_of(address).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(%address, error = %e, "following query degraded to empty");
                Vec::new()
            }
        }
    }

    /// Profile creation is not implemented by this core. Fails fast so it
    /// can never be mistaken for a write that happened.
    pub fn create_profile(&self, _handle: &str) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation("social profile create"))
    }

    /// Profile updates are not implemented by this core.
    pub fn update_profile(&self, _handle: &str) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation("social profile update"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP social-graph client
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

/// Social-graph service reached over its HTTP API. Built without a request
/// timeout for the same reason as the registry client.
#[derive(Clone, Debug)]
pub struct HttpSocialGraph {
    base: String,
    client: Client,
}

impl HttpSocialGraph {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.social_graph_endpoint.clone())
    }

    async fn get_items<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<Vec<T>, ProviderError> {
        let body: Items<T> = self.client.get(&url).send().await?.json().await?;
        Ok(body.items)
    }
}

impl SocialGraph for HttpSocialGraph {
    async fn profiles_of(&self, address: &Address) -> Result<Vec<SocialProfile>, ProviderError> {
        self.get_items(format!("{}/profiles?owned_by={}", self.base, address))
            .await
    }

    async fn publications_of(
        &self,
        address: &Address,
    ) -> Result<Vec<Publication>, ProviderError> {
        self.get_items(format!("{}/publications?from={}", self.base, address))
            .await
    }

    async fn followers_of(&self, address: &Address) -> Result<Vec<Address>, ProviderError> {
        self.get_items(format!("{}/followers?of={}", self.base, address))
            .await
    }

    async fn following_of(&self, address: &Address) -> Result<Vec<Address>, ProviderError> {
        self.get_items(format!("{}/following?for={}", self.base, address))
            .await
    }
}
