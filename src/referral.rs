//! Referral code codec: pure, deterministic, no I/O.
//!
//! A code is the first 4 bytes of a domain-separated BLAKE3 over
//! `address(20) || issued_at_unix_seconds as u64 BE (8)`, hex-encoded to 8
//! lowercase characters. The ledger — not this crate — records which codes
//! exist and whether they were redeemed.
//!
//! 32 bits of code space means birthday collisions become non-negligible at
//! scale (≈77k issued codes for 50% probability). Collision handling is the
//! ledger's first-writer-wins registration; this crate does not work around
//! it locally.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::address::Address;
use crate::hash::blake3_domain;

/// Display-side expectation of tokens granted per successful referral.
/// Actual issuance is decided by the ledger.
pub const REFERRAL_REWARD_TOKENS: u64 = 10;

/// Fixed base for shareable referral links.
pub const SHARE_LINK_BASE: &str = "https://driftshare.app/join";

/// Length of a rendered referral code in hex characters.
pub const CODE_LEN: usize = 8;

/// Derive the referral code for `(address, issued_at)`.
///
/// Deterministic: the same pair always yields the same code, in-process and
/// across processes. Codes carry no embedded expiry and no recoverable
/// address; validity is authoritative only via the ledger.
pub fn referral_code(address: &Address, issued_at: u64) -> String {
    let mut packed = [0u8; 28];
    packed[..20].copy_from_slice(address.as_bytes());
    packed[20..].copy_from_slice(&issued_at.to_be_bytes());
    let digest = blake3_domain(b"referral-code", &packed);
    hex::encode(&digest[..4])
}

/// Build a shareable referral link for `address`, deriving the code at the
/// current time.
///
/// The timestamp is captured here, not passed in: two calls a second apart
/// produce different codes and different links for the same address. Codes
/// are claim tokens, not stable identifiers; a previously shared link cannot
/// be regenerated without the original timestamp.
pub fn share_link(address: &Address) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}?ref={}", SHARE_LINK_BASE, referral_code(address, now))
}
