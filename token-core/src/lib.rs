//! TokenRail Token Core
//!
//! Deterministic fungible-token ledger: balances, allowances, and a fixed
//! total supply behind the classic transfer/approve/transferFrom surface.
//!
//! # Architecture
//!
//! - **Explicit state**: Two owned tables and a scalar, no inheritance
//! - **Explicit callers**: Identity is a parameter, never ambient context
//! - **Single Writer**: The async embedding serializes all mutations
//! - **Event journal**: One record per committed mutation, exactly once
//!
//! # Invariants
//!
//! - Supply conservation: Σ(balances) == total supply after every operation
//! - Atomicity: a rejected operation leaves the ledger unchanged
//! - Checked arithmetic: a would-be wrap is an error, never silent
//! - The zero address never receives funds and is never an approved spender

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod actor;
pub mod config;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod state;
pub mod types;

// Re-exports
pub use actor::{spawn_ledger_actor, LedgerHandle};
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use metrics::Metrics;
pub use types::{Address, Amount, JournalEntry, TokenEvent, TokenMetadata, DECIMALS};
