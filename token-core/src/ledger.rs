//! Main ledger state machine
//!
//! This module ties the state layer and the event journal into the classic
//! fungible-token surface: mint-on-construction, `transfer`, `approve`,
//! `transfer_from`, and read-only queries.
//!
//! Every operation is synchronous and total: all checks run before the
//! first write, so a returned error means the ledger is unchanged, and a
//! success means exactly one event record was appended to the journal.
//! Caller identity is always an explicit parameter; the ledger never reads
//! it from ambient context.
//!
//! # Example
//!
//! ```
//! use token_core::{Address, Ledger, TokenMetadata};
//!
//! fn main() -> token_core::Result<()> {
//!     let deployer = Address::from_low_u64(1);
//!     let recipient = Address::from_low_u64(2);
//!
//!     let mut ledger =
//!         Ledger::new(TokenMetadata::new("Rail Token", "RAIL"), deployer, 1_000_000)?;
//!     ledger.transfer(deployer, recipient, 250)?;
//!
//!     assert_eq!(ledger.balance_of(recipient), 250);
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::state::TokenState;
use crate::types::{Address, Amount, JournalEntry, TokenEvent, TokenMetadata};
use chrono::Utc;

/// Main ledger interface
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Immutable metadata
    metadata: TokenMetadata,

    /// Balance and allowance tables
    state: TokenState,

    /// Append-only event journal
    journal: Vec<JournalEntry>,
}

impl Ledger {
    /// Create a ledger and credit the entire initial supply to `deployer`.
    ///
    /// Records the mint as a transfer from [`Address::ZERO`]. A zero
    /// initial supply is valid; a zero deployer is not, since the minted
    /// supply could never leave the reserved address.
    pub fn new(
        metadata: TokenMetadata,
        deployer: Address,
        initial_supply: Amount,
    ) -> Result<Self> {
        if deployer.is_zero() {
            return Err(Error::ZeroAddressRecipient);
        }

        let mut ledger = Self {
            metadata,
            state: TokenState::new(),
            journal: Vec::new(),
        };
        ledger.state.mint(deployer, initial_supply)?;
        ledger.record(TokenEvent::Transfer {
            from: Address::ZERO,
            to: deployer,
            value: initial_supply,
        });

        debug_assert!(ledger.state.conserves_supply());
        Ok(ledger)
    }

    /// Create a ledger from the configuration layer.
    pub fn from_config(config: &Config) -> Result<Self> {
        let treasury: Address = config.token.treasury.parse()?;
        let metadata = TokenMetadata::new(&config.token.name, &config.token.symbol);
        Self::new(metadata, treasury, Amount::from(config.token.initial_supply))
    }

    /// Token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Decimals; fixed at construction.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Full metadata record.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Total supply; fixed at construction.
    pub fn total_supply(&self) -> Amount {
        self.state.total_supply()
    }

    /// Balance of `account`; 0 for accounts never credited. Never fails.
    pub fn balance_of(&self, account: Address) -> Amount {
        self.state.balance_of(account)
    }

    /// Remaining allowance of `spender` on `owner`; 0 by default. Never fails.
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.state.allowance(owner, spender)
    }

    /// Move `amount` from `caller` to `to`.
    ///
    /// Zero amounts succeed and still record an event; a self-transfer is a
    /// net no-op but passes the same checks and records the same event.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<bool> {
        if to.is_zero() {
            return Err(Error::ZeroAddressRecipient);
        }

        self.state.transfer(caller, to, amount)?;
        self.record(TokenEvent::Transfer {
            from: caller,
            to,
            value: amount,
        });

        debug_assert!(self.state.conserves_supply());
        Ok(true)
    }

    /// Set the allowance of `spender` on `caller` to exactly `amount`.
    ///
    /// Overwrites the previous value; approvals never accumulate.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<bool> {
        if spender.is_zero() {
            return Err(Error::ZeroAddressSpender);
        }

        self.state.set_allowance(caller, spender, amount);
        self.record(TokenEvent::Approval {
            owner: caller,
            spender,
            value: amount,
        });

        Ok(true)
    }

    /// Move `amount` from `from` to `to` against the allowance previously
    /// granted to `caller`.
    ///
    /// Checks run in order — recipient, allowance, balance — and all of
    /// them precede the first write, so a rejection leaves balances and
    /// allowances untouched. On success the allowance shrinks by exactly
    /// `amount`.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<bool> {
        if to.is_zero() {
            return Err(Error::ZeroAddressRecipient);
        }

        let remaining = self.state.allowance(from, caller);
        if remaining < amount {
            return Err(Error::InsufficientAllowance {
                owner: from,
                spender: caller,
                allowance: remaining,
                needed: amount,
            });
        }

        // Balance and overflow checks happen inside the state transfer,
        // before it writes anything. The allowance write below cannot fail,
        // so the whole operation commits or none of it does.
        self.state.transfer(from, to, amount)?;
        self.state.set_allowance(from, caller, remaining - amount);
        self.record(TokenEvent::Transfer {
            from,
            to,
            value: amount,
        });

        debug_assert!(self.state.conserves_supply());
        Ok(true)
    }

    /// The event journal, oldest first.
    ///
    /// One entry per committed mutation, including the construction mint.
    pub fn events(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Check the supply-conservation invariant.
    pub fn conserves_supply(&self) -> bool {
        self.state.conserves_supply()
    }

    /// Append an event record; exactly one per committed mutation.
    fn record(&mut self, event: TokenEvent) {
        self.journal.push(JournalEntry {
            sequence: self.journal.len() as u64,
            recorded_at: Utc::now(),
            event,
        });
    }
}
