//! Error types for the token ledger

use crate::types::{Address, Amount};
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
///
/// Every variant is a synchronous rejection of a single call. A rejected
/// call leaves the ledger unchanged; none of these are fatal to the process.
#[derive(Error, Debug)]
pub enum Error {
    /// Transfer destination is the reserved zero address
    #[error("Transfer to the zero address")]
    ZeroAddressRecipient,

    /// Approval spender is the reserved zero address
    #[error("Approval for the zero address spender")]
    ZeroAddressSpender,

    /// Source account lacks funds
    #[error("Insufficient balance for {account}: have {balance}, need {needed}")]
    InsufficientBalance {
        /// Account being debited
        account: Address,
        /// Current balance
        balance: Amount,
        /// Requested amount
        needed: Amount,
    },

    /// Spender's remaining allowance is smaller than the requested amount
    #[error("Insufficient allowance for {spender} on {owner}: have {allowance}, need {needed}")]
    InsufficientAllowance {
        /// Account whose funds would be moved
        owner: Address,
        /// Account attempting the spend
        spender: Address,
        /// Remaining allowance
        allowance: Amount,
        /// Requested amount
        needed: Amount,
    },

    /// A checked arithmetic step would wrap
    #[error("Amount arithmetic overflow")]
    Overflow,

    /// Malformed textual address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
