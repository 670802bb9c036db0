//! Referral reward coordination.
//!
//! Owns code generation, link construction, validation, stats retrieval and
//! claiming. Ledger truth stays with the injected [`ReferralLedger`]; this
//! module owns only error translation and unit conversion.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::RewardError;
use crate::ledger::{format_token_units, ReferralLedger, TxId};
use crate::referral;

/// Display projection of an address's referral standing, rebuilt from ledger
/// state on every query. No local cache, no staleness window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    pub total_referrals: u64,
    /// Decimal token units, e.g. `"25.0"`.
    pub total_rewards: String,
    pub active_referrals: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub address: Address,
    pub referrals: u64,
    /// Decimal token units.
    pub rewards: String,
}

/// Orchestrates the referral surface over an injected ledger handle.
#[derive(Clone, Debug)]
pub struct ReferralRewardCoordinator<L> {
    ledger: L,
}

impl<L: ReferralLedger> ReferralRewardCoordinator<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Referral stats for an address, reward totals converted to decimal
    /// token units.
    ///
    /// Ledger faults surface as [`RewardError::Read`]: stats are user-facing
    /// financial data, and a visible error beats a silently wrong answer.
    pub async fn stats(&self, address: &Address) -> Result<ReferralStats, RewardError> {
        let raw = self
            .ledger
            .referral_stats(address)
            .await
            .map_err(RewardError::Read)?;
        Ok(ReferralStats {
            total_referrals: raw.total_referrals,
            total_rewards: format_token_units(raw.total_rewards),
            active_referrals: raw.active_referrals,
        })
    }

    /// Pending reward balance for an address as a decimal token string.
    pub async fn rewards_of(&self, address: &Address) -> Result<String, RewardError> {
        let base = self
            .ledger
            .referral_rewards(address)
            .await
            .map_err(RewardError::Read)?;
        Ok(format_token_units(base))
    }

    /// Submit a reward claim and wait for ledger confirmation.
    ///
    /// Exactly one ledger write per invocation. Never retried here: a claim
    /// mutates ledger state and a blind resubmit risks double-claiming, so
    /// retry is the caller's decision.
    pub async fn claim(&self) -> Result<TxId, RewardError> {
        self.ledger.claim_rewards().await.map_err(RewardError::Claim)
    }

    /// Whether `code` is registered and unredeemed on the ledger.
    ///
    /// Fail-closed: any ledger fault answers `false`. Validation gates a
    /// non-destructive UI affordance, so denying on backend trouble is safe
    /// and keeps the caller's flow error-free.
    pub async fn validate(&self, code: &str) -> bool {
        match self.ledger.is_valid_code(code).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(code, error = %e, "code validation degraded to invalid");
                false
            }
        }
    }

    /// Current leaderboard, ledger order preserved, rewards converted to
    /// decimal token units.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, RewardError> {
        let raw = self.ledger.leaderboard().await.map_err(RewardError::Read)?;
        Ok(raw
            .into_iter()
            .map(|e| LeaderboardEntry {
                address: e.address,
                referrals: e.referrals,
                rewards: format_token_units(e.rewards),
            })
            .collect())
    }

    /// Derive a referral code for `address` at the current time.
    pub fn generate_code(&self, address: &Address) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        referral::referral_code(address, now)
    }

    /// Shareable referral link for `address`.
    pub fn share_link(&self, address: &Address) -> String {
        referral::share_link(address)
    }
}
