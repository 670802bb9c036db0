//! Reward ledger call interface and wire types.
//!
//! The ledger is the authority for everything referral: which codes exist,
//! reward balances, claim history. This module defines the call surface the
//! coordinator consumes, the raw (base-unit) wire types, and the HTTP
//! implementation against the chain RPC endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::CoreConfig;
use crate::error::LedgerError;

/// Decimal places of the reward token's base unit.
pub const TOKEN_DECIMALS: u32 = 18;

/// Identifier of a confirmed ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Referral stats exactly as the ledger reports them: counts plus a reward
/// total in base units. Unit conversion to display form happens in the
/// coordinator, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawReferralStats {
    pub total_referrals: u64,
    pub total_rewards: u128,
    pub active_referrals: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLeaderboardEntry {
    pub address: Address,
    pub referrals: u64,
    pub rewards: u128,
}

/// Call surface of the on-chain referral reward contract.
///
/// Every method is a suspension point and may fault with a transport or
/// revert error; retry and error-translation policy live in the
/// coordinator, not here.
pub trait ReferralLedger {
    fn referral_stats(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<RawReferralStats, LedgerError>> + Send;

    fn is_valid_code(
        &self,
        code: &str,
    ) -> impl std::future::Future<Output = Result<bool, LedgerError>> + Send;

    /// Submit a claim and block until the ledger confirms inclusion.
    /// Implementations must issue exactly one write per call.
    fn claim_rewards(
        &self,
    ) -> impl std::future::Future<Output = Result<TxId, LedgerError>> + Send;

    /// Pending reward balance for an address, in base units.
    fn referral_rewards(
        &self,
        address: &Address,
    ) -> impl std::future::Future<Output = Result<u128, LedgerError>> + Send;

    /// Current leaderboard in the ledger's own order.
    fn leaderboard(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<RawLeaderboardEntry>, LedgerError>> + Send;
}

/// Render a base-unit amount as a decimal token string with at least one
/// fractional digit and no trailing zeros beyond it.
pub fn format_token_units(base: u128) -> String {
    let scale = 10u128.pow(TOKEN_DECIMALS);
    let whole = base / scale;
    let frac = base % scale;
    if frac == 0 {
        return format!("{whole}.0");
    }
    let frac = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Convert whole tokens to base units. Test and display convenience.
pub fn tokens_to_base(tokens: u64) -> u128 {
    u128::from(tokens) * 10u128.pow(TOKEN_DECIMALS)
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP ledger client
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StatsBody {
    total_referrals: u64,
    total_rewards: String,
    active_referrals: u64,
}

#[derive(Deserialize)]
struct ValidBody {
    valid: bool,
}

#[derive(Deserialize)]
struct RewardsBody {
    rewards: String,
}

#[derive(Deserialize)]
struct LeaderboardItem {
    address: Address,
    referrals: u64,
    rewards: String,
}

#[derive(Deserialize)]
struct LeaderboardBody {
    items: Vec<LeaderboardItem>,
}

#[derive(Deserialize)]
struct SubmitBody {
    tx: String,
}

#[derive(Deserialize)]
struct ReceiptBody {
    status: String,
    error: Option<String>,
}

fn parse_base_units(s: &str) -> Result<u128, LedgerError> {
    s.parse()
        .map_err(|_| LedgerError::Decode(format!("bad base-unit amount {s:?}")))
}

/// Referral reward contract reached over the chain RPC endpoint.
///
/// Base-unit amounts travel as decimal strings on the wire (u128 does not
/// survive JSON numbers). Like the other clients, no request timeout is set.
#[derive(Clone, Debug)]
pub struct HttpLedger {
    base: String,
    contract: Address,
    client: Client,
}

impl HttpLedger {
    /// Receipt poll cadence for claim confirmation.
    const POLL_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new(base: impl Into<String>, contract: Address) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            contract,
            client: Client::new(),
        }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.registry_endpoint.clone(), cfg.ledger_address)
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/ledger/{}/{}", self.base, self.contract, tail)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, LedgerError> {
        Ok(self.client.get(&url).send().await?.json().await?)
    }
}

impl ReferralLedger for HttpLedger {
    async fn referral_stats(&self, address: &Address) -> Result<RawReferralStats, LedgerError> {
        let body: StatsBody = self.get_json(self.url(&format!("stats/{address}"))).await?;
        Ok(RawReferralStats {
            total_referrals: body.total_referrals,
            total_rewards: parse_base_units(&body.total_rewards)?,
            active_referrals: body.active_referrals,
        })
    }

    async fn is_valid_code(&self, code: &str) -> Result<bool, LedgerError> {
        let body: ValidBody = self.get_json(self.url(&format!("code/{code}/valid"))).await?;
        Ok(body.valid)
    }

    async fn claim_rewards(&self) -> Result<TxId, LedgerError> {
        // One write, then read-only receipt polling until inclusion.
        let submitted: SubmitBody = self
            .client
            .post(self.url("claim"))
            .send()
            .await?
            .json()
            .await?;
        loop {
            let url = format!("{}/tx/{}/receipt", self.base, submitted.tx);
            let receipt: ReceiptBody = self.get_json(url).await?;
            match receipt.status.as_str() {
                "confirmed" => return Ok(TxId(submitted.tx)),
                "reverted" => {
                    return Err(LedgerError::Reverted(
                        receipt.error.unwrap_or_else(|| "claim reverted".into()),
                    ))
                }
                "pending" => tokio::time::sleep(Self::POLL_INTERVAL).await,
                other => {
                    return Err(LedgerError::Decode(format!(
                        "unknown receipt status {other:?}"
                    )))
                }
            }
        }
    }

    async fn referral_rewards(&self, address: &Address) -> Result<u128, LedgerError> {
        let body: RewardsBody = self
            .get_json(self.url(&format!("rewards/{address}")))
            .await?;
        parse_base_units(&body.rewards)
    }

    async fn leaderboard(&self) -> Result<Vec<RawLeaderboardEntry>, LedgerError> {
        let body: LeaderboardBody = self.get_json(self.url("leaderboard")).await?;
        body.items
            .into_iter()
            .map(|it| {
                Ok(RawLeaderboardEntry {
                    address: it.address,
                    referrals: it.referrals,
                    rewards: parse_base_units(&it.rewards)?,
                })
            })
            .collect()
    }
}
