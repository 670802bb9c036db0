//! Aggregation behavior against injected fake providers: facet independence,
//! degrade paths, and the concurrent fan-out bound.

use std::time::{Duration, Instant};

use driftshare_core::address::Address;
use driftshare_core::error::ProviderError;
use driftshare_core::identity::{Facet, IdentityAggregator};
use driftshare_core::name::NameRegistry;
use driftshare_core::social::{
    ProfileStats, Publication, SocialGraph, SocialProfile, SocialProfileResolver,
};

fn addr(last: u8) -> Address {
    let mut b = [0u8; 20];
    b[19] = last;
    Address::from_bytes(b)
}

#[derive(Clone, Default)]
struct FakeRegistry {
    reverse: Option<String>,
    forward: Option<Address>,
    records: Vec<(&'static str, &'static str)>,
    delay: Duration,
    fail: bool,
}

impl NameRegistry for FakeRegistry {
    async fn lookup_address(&self, _address: &Address) -> Result<Option<String>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(ProviderError::Network("registry down".into()));
        }
        Ok(self.reverse.clone())
    }

    async fn resolve_name(&self, _name: &str) -> Result<Option<Address>, ProviderError> {
        if self.fail {
            return Err(ProviderError::Network("registry down".into()));
        }
        Ok(self.forward)
    }

    async fn text_record(&self, _name: &str, key: &str) -> Result<Option<String>, ProviderError> {
        Ok(self
            .records
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string()))
    }
}

#[derive(Clone, Default)]
struct FakeGraph {
    profiles: Vec<SocialProfile>,
    publications: Vec<Publication>,
    delay: Duration,
    fail: bool,
}

impl FakeGraph {
    fn check(&self) -> Result<(), ProviderError> {
        if self.fail {
            Err(ProviderError::Network("graph down".into()))
        } else {
            Ok(())
        }
    }
}

impl SocialGraph for FakeGraph {
    async fn profiles_of(&self, _address: &Address) -> Result<Vec<SocialProfile>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.check()?;
        Ok(self.profiles.clone())
    }

    async fn publications_of(
        &self,
        _address: &Address,
    ) -> Result<Vec<Publication>, ProviderError> {
        self.check()?;
        Ok(self.publications.clone())
    }

    async fn followers_of(&self, _address: &Address) -> Result<Vec<Address>, ProviderError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn following_of(&self, _address: &Address) -> Result<Vec<Address>, ProviderError> {
        self.check()?;
        Ok(Vec::new())
    }
}

fn profile(handle: &str) -> SocialProfile {
    SocialProfile {
        handle: handle.to_string(),
        bio: None,
        avatar_uri: None,
        cover_uri: None,
        stats: ProfileStats::default(),
    }
}

#[tokio::test]
async fn both_sources_empty_yields_absent_facets() {
    let agg = IdentityAggregator::new(FakeRegistry::default(), FakeGraph::default());
    let id = agg.combined_identity(&addr(1)).await;
    assert_eq!(id.address, addr(1));
    assert_eq!(id.name, Facet::Absent);
    assert_eq!(id.social, Facet::Absent);
}

#[tokio::test]
async fn social_fault_leaves_name_facet_intact() {
    let registry = FakeRegistry {
        reverse: Some("frodo.share".into()),
        forward: Some(addr(2)),
        records: vec![("avatar", "ipfs://avatar"), ("com.twitter", "frodo")],
        ..Default::default()
    };
    let graph = FakeGraph {
        fail: true,
        ..Default::default()
    };
    let id = IdentityAggregator::new(registry, graph)
        .combined_identity(&addr(2))
        .await;

    assert!(id.social.is_unavailable());
    let name = id.name.value().expect("name facet should survive");
    assert_eq!(name.name, "frodo.share");
    assert_eq!(name.records["avatar"], "ipfs://avatar");
    assert_eq!(name.records["com.twitter"], "frodo");
    assert!(!name.records.contains_key("com.github"));
}

#[tokio::test]
async fn name_fault_leaves_social_facet_intact() {
    let registry = FakeRegistry {
        fail: true,
        ..Default::default()
    };
    let graph = FakeGraph {
        profiles: vec![profile("sam"), profile("rosie")],
        ..Default::default()
    };
    let id = IdentityAggregator::new(registry, graph)
        .combined_identity(&addr(3))
        .await;

    assert!(id.name.is_unavailable());
    // First profile in service order wins, no re-ranking.
    assert_eq!(id.social.value().unwrap().handle, "sam");
}

#[tokio::test]
async fn forward_mismatch_is_no_name_not_a_fault() {
    let registry = FakeRegistry {
        reverse: Some("squatter.share".into()),
        forward: Some(addr(99)), // points elsewhere
        ..Default::default()
    };
    let id = IdentityAggregator::new(registry, FakeGraph::default())
        .combined_identity(&addr(4))
        .await;
    assert_eq!(id.name, Facet::Absent);
}

#[tokio::test(flavor = "multi_thread")]
async fn resolvers_overlap_rather_than_serialize() {
    let t1 = Duration::from_millis(100);
    let t2 = Duration::from_millis(150);
    let registry = FakeRegistry {
        delay: t1,
        ..Default::default()
    };
    let graph = FakeGraph {
        delay: t2,
        ..Default::default()
    };
    let agg = IdentityAggregator::new(registry, graph);

    let start = Instant::now();
    let _ = agg.combined_identity(&addr(5)).await;
    let elapsed = start.elapsed();

    assert!(elapsed >= t2, "cannot finish before the slower source");
    assert!(
        elapsed < t1 + t2,
        "fan-out serialized: took {elapsed:?}, expected ≈ {t2:?}"
    );
}

#[tokio::test]
async fn secondary_reads_degrade_to_empty() {
    let resolver = SocialProfileResolver::new(FakeGraph {
        fail: true,
        ..Default::default()
    });
    assert!(resolver.publications(&addr(6)).await.is_empty());
    assert!(resolver.followers(&addr(6)).await.is_empty());
    assert!(resolver.following(&addr(6)).await.is_empty());
}

#[tokio::test]
async fn publications_pass_through_when_healthy() {
    let resolver = SocialProfileResolver::new(FakeGraph {
        publications: vec![Publication {
            id: "pub-1".into(),
            content_uri: "ipfs://pub-1".into(),
        }],
        ..Default::default()
    });
    let pubs = resolver.publications(&addr(7)).await;
    assert_eq!(pubs.len(), 1);
    assert_eq!(pubs[0].id, "pub-1");
}

#[tokio::test]
async fn profile_mutations_are_unsupported() {
    let resolver = SocialProfileResolver::new(FakeGraph::default());
    assert!(resolver.create_profile("newbie").is_err());
    assert!(resolver.update_profile("newbie").is_err());
}
