//! Core types for the token ledger
//!
//! All types are designed for:
//! - Deterministic behavior (no ambient context, no hidden state)
//! - Memory safety (no unsafe code)
//! - Exact arithmetic (fixed-width unsigned amounts, always checked)

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Number of decimals carried by token metadata.
///
/// Fixed for every ledger instance; there is no configuration knob for it.
pub const DECIMALS: u8 = 18;

/// Token amount.
///
/// Unsigned and fixed-width; every arithmetic step on amounts goes through
/// checked operations so a wrap surfaces as [`Error::Overflow`](crate::Error)
/// instead of corrupting balances.
pub type Amount = u128;

/// Account identifier: an opaque fixed-width address.
///
/// The all-zero address is reserved. It can never receive funds and can
/// never be approved as a spender.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The reserved zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes.
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an address with `value` in the trailing 8 bytes (big-endian).
    ///
    /// Convenient for tests and fixtures where addresses only need to be
    /// distinct.
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Whether this is the reserved zero address.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", s, e)))?;
        let bytes: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidAddress(format!("{}: expected {} bytes", s, ADDRESS_LEN)))?;
        Ok(Self(bytes))
    }
}

/// Immutable token metadata, attached at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token name
    pub name: String,

    /// Token symbol
    pub symbol: String,

    /// Decimals (always [`DECIMALS`])
    pub decimals: u8,
}

impl TokenMetadata {
    /// Create metadata with the fixed decimal count.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: DECIMALS,
        }
    }
}

/// Notification record emitted by a successful mutation.
///
/// Exactly one record per committed operation; a rejected operation emits
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    /// Funds moved between accounts. The construction-time mint is recorded
    /// as a transfer from [`Address::ZERO`].
    Transfer {
        /// Debited account
        from: Address,
        /// Credited account
        to: Address,
        /// Amount moved
        value: Amount,
    },

    /// An allowance entry was overwritten.
    Approval {
        /// Account whose funds are spendable
        owner: Address,
        /// Account authorized to spend
        spender: Address,
        /// New remaining allowance
        value: Amount,
    },
}

/// A journal entry: an event plus its position in the ledger's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Zero-based position in the journal (total order of all mutations)
    pub sequence: u64,

    /// Wall-clock capture time; observational only, not part of the state
    pub recorded_at: DateTime<Utc>,

    /// The event record
    pub event: TokenEvent,
}
