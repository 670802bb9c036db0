//! On-chain name resolution (registry reverse lookup + text records).
//!
//! The resolver is **best-effort by contract**: every provider fault is
//! recovered here and reported as [`Facet::Unavailable`], never as an `Err`.
//! Identity aggregation stays usable when the registry is down.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::CoreConfig;
use crate::error::ProviderError;
use crate::identity::Facet;

/// Text-record keys read for every resolved name: avatar plus the two
/// social-handle records the profile page renders.
pub const TEXT_RECORD_KEYS: [&str; 3] = ["avatar", "com.twitter", "com.github"];

/// A resolved on-chain name with whichever text records the registry held.
/// Keys absent from `records` simply had no value — that is not a fault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnchainName {
    pub name: String,
    pub records: BTreeMap<String, String>,
}

/// Read surface of the external name registry.
///
/// Injected into [`NameResolver`] at construction so tests can substitute
/// fakes; the HTTP implementation below is the production wiring.
pub trait NameRegistry {
    /// Reverse-resolve an address to the name its reverse record claims.
    fn lookup_address(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<Option<String>, ProviderError>> + Send;

    /// Forward-resolve a name to the address it points at.
    fn resolve_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Address>, ProviderError>> + Send;

    /// Read one text record attached to a name.
    fn text_record(
        &self,
        name: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, ProviderError>> + Send;
}

/// Best-effort name resolution over an injected registry.
#[derive(Clone, Debug)]
pub struct NameResolver<R> {
    registry: R,
}

impl<R: NameRegistry> NameResolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Resolve an address to its on-chain name and text records.
    ///
    /// * No reverse record → `Absent`.
    /// * Reverse record whose forward resolution does not point back at the
    ///   queried address → `Absent` (reverse records are unverified claims).
    /// * Any provider fault along the way → `Unavailable`.
    pub async fn resolve(&self, address: &Address) -> Facet<OnchainName> {
        match self.resolve_inner(address).await {
            Ok(Some(n)) => Facet::Resolved(n),
            Ok(None) => Facet::Absent,
            Err(e) => {
                tracing::warn!(%address, error = %e, "name registry unavailable");
                Facet::Unavailable
            }
        }
    }

    async fn resolve_inner(
        &self,
        address: &Address,
    ) -> Result<Option<OnchainName>, ProviderError> {
        let Some(name) = self.registry.lookup_address(address).await? else {
            return Ok(None);
        };
        // Reverse records are set by anyone; only a matching forward
        // resolution makes the name canonical for this address.
        if self.registry.resolve_name(&name).await? != Some(*address) {
            return Ok(None);
        }
        let mut records = BTreeMap::new();
        for key in TEXT_RECORD_KEYS {
            if let Some(value) = self.registry.text_record(&name, key).await? {
                records.insert(key.to_string(), value);
            }
        }
        Ok(Some(OnchainName { name, records }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP registry client
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NameBody {
    name: Option<String>,
}

#[derive(Deserialize)]
struct AddressBody {
    address: Option<Address>,
}

#[derive(Deserialize)]
struct ValueBody {
    value: Option<String>,
}

/// Name registry reached over the chain RPC endpoint.
///
/// No request timeout is set: this core leaves timeout policy to the caller
/// (an unresponsive registry stalls that await; the aggregate still degrades
/// per-facet once the call returns or fails).
#[derive(Clone, Debug)]
pub struct HttpNameRegistry {
    base: String,
    client: Client,
}

impl HttpNameRegistry {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.registry_endpoint.clone())
    }
}

impl NameRegistry for HttpNameRegistry {
    async fn lookup_address(&self, address: &Address) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/name/reverse/{}", self.base, address);
        let body: NameBody = self.client.get(&url).send().await?.json().await?;
        Ok(body.name)
    }

    async fn resolve_name(&self, name: &str) -> Result<Option<Address>, ProviderError> {
        let url = format!("{}/name/forward/{}", self.base, name);
        let body: AddressBody = self.client.get(&url).send().await?.json().await?;
        Ok(body.address)
    }

    async fn text_record(&self, name: &str, key: &str) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/name/text/{}/{}", self.base, name, key);
        let body: ValueBody = self.client.get(&url).send().await?.json().await?;
        Ok(body.value)
    }
}
