//! Identity aggregation and referral reward core for the Driftshare app.
//!
//! Two independent subsystems share this crate:
//!
//! * **Identity aggregation** — [`identity::IdentityAggregator`] fans one
//!   address out to the on-chain name registry and the social-graph service
//!   concurrently and merges the answers into one [`identity::Identity`].
//!   Each facet degrades independently; aggregation itself never fails.
//! * **Referral rewards** — [`referral`] derives deterministic 8-hex claim
//!   codes, and [`coordinator::ReferralRewardCoordinator`] validates codes,
//!   reads stats and submits claims against the external reward ledger.
//!
//! All external surfaces are traits ([`name::NameRegistry`],
//! [`social::SocialGraph`], [`ledger::ReferralLedger`]) injected at
//! construction; the `Http*` types wire them from a [`config::CoreConfig`].

pub mod address;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod hash;
pub mod identity;
pub mod ledger;
pub mod name;
pub mod referral;
pub mod social;

pub use address::Address;
pub use config::CoreConfig;
pub use coordinator::{LeaderboardEntry, ReferralRewardCoordinator, ReferralStats};
pub use error::{LedgerError, ProviderError, RewardError, UnsupportedOperation};
pub use identity::{Facet, Identity, IdentityAggregator};
pub use ledger::{HttpLedger, ReferralLedger, TxId};
pub use name::{HttpNameRegistry, NameRegistry, OnchainName};
pub use social::{HttpSocialGraph, SocialGraph, SocialProfile};
