//! Error taxonomy for the identity & referral core.
//!
//! Propagation policy, in one place:
//! * Provider faults on best-effort reads (name registry, social graph) are
//!   recovered at the resolver and degrade the facet — they never reach
//!   the caller as an `Err`.
//! * Ledger faults on financial reads and the claim write are surfaced as
//!   [`RewardError`] and never auto-retried.
//! * Faults while validating a referral code degrade to `false` (fail-closed).
//! * Unsupported mutations fail immediately with [`UnsupportedOperation`].

/// Fault from an external data provider (name registry or social graph).
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Fault from the reward ledger.
#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("ledger transport failed: {0}")]
    Transport(String),
    #[error("ledger call reverted: {0}")]
    Reverted(String),
    #[error("ledger response decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LedgerError::Decode(e.to_string())
        } else {
            LedgerError::Transport(e.to_string())
        }
    }
}

/// Errors the reward coordinator surfaces to callers. Read and write faults
/// are kept distinct: a failed read is safe to reissue, a failed claim is not.
#[derive(thiserror::Error, Debug)]
pub enum RewardError {
    #[error("reading referral state: {0}")]
    Read(#[source] LedgerError),
    #[error("submitting reward claim: {0}")]
    Claim(#[source] LedgerError),
}

/// Explicit signal for operations this core deliberately does not implement.
/// Must never be mistaken for success.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("operation not supported: {0}")]
pub struct UnsupportedOperation(pub &'static str);
