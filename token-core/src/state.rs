//! State layer: owned balance and allowance tables
//!
//! All mutation funnels through this module. Every mutating primitive
//! validates fully before the first write, so a returned error means the
//! tables were not touched.
//!
//! Zero is a stored value here, not an absence: debiting an account down to
//! zero or overwriting an allowance with zero keeps the entry in the table.
//! Reads treat a missing entry and a stored zero identically.

use crate::error::{Error, Result};
use crate::types::{Address, Amount};
use std::collections::HashMap;

/// Balance table, allowance table, and total supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenState {
    /// Account balances
    balances: HashMap<Address, Amount>,

    /// Remaining allowances, keyed by (owner, spender)
    allowances: HashMap<(Address, Address), Amount>,

    /// Fixed total supply
    total_supply: Amount,
}

impl TokenState {
    /// Create empty state with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account`; 0 for accounts never credited.
    pub fn balance_of(&self, account: Address) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Remaining allowance of `spender` on `owner`; 0 by default.
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Total supply.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Credit `amount` to `to` and grow the total supply by the same amount.
    ///
    /// Construction-time only; there is no burn counterpart.
    pub(crate) fn mint(&mut self, to: Address, amount: Amount) -> Result<()> {
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        self.balances.insert(to, credited);
        self.total_supply = supply;
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Checks balance and credit overflow before writing either entry. A
    /// self-transfer passes the same checks and commits a net no-op.
    pub(crate) fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance {
                account: from,
                balance: from_balance,
                needed: amount,
            });
        }

        if from == to {
            // Debit and credit cancel; the balance entry is rewritten so a
            // previously unseen account still ends up stored.
            self.balances.insert(from, from_balance);
            return Ok(());
        }

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        self.balances.insert(from, from_balance - amount);
        self.balances.insert(to, credited);
        Ok(())
    }

    /// Overwrite the allowance entry for `(owner, spender)`.
    ///
    /// Last-writer-wins: the previous value is never consulted.
    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Check the supply-conservation invariant.
    ///
    /// The checked sum of all balances must equal the total supply.
    pub fn conserves_supply(&self) -> bool {
        let mut sum: Amount = 0;
        for balance in self.balances.values() {
            sum = match sum.checked_add(*balance) {
                Some(sum) => sum,
                None => return false,
            };
        }
        sum == self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(account: Address, amount: Amount) -> TokenState {
        let mut state = TokenState::new();
        state.mint(account, amount).unwrap();
        state
    }

    #[test]
    fn test_balances_default_to_zero() {
        let state = TokenState::new();
        assert_eq!(state.balance_of(Address::from_low_u64(9)), 0);
        assert_eq!(
            state.allowance(Address::from_low_u64(1), Address::from_low_u64(2)),
            0
        );
    }

    #[test]
    fn test_mint_grows_supply() {
        let account = Address::from_low_u64(1);
        let state = funded(account, 500);
        assert_eq!(state.balance_of(account), 500);
        assert_eq!(state.total_supply(), 500);
        assert!(state.conserves_supply());
    }

    #[test]
    fn test_transfer_moves_exact_amount() {
        let a = Address::from_low_u64(1);
        let b = Address::from_low_u64(2);
        let mut state = funded(a, 100);

        state.transfer(a, b, 30).unwrap();
        assert_eq!(state.balance_of(a), 70);
        assert_eq!(state.balance_of(b), 30);
        assert!(state.conserves_supply());
    }

    #[test]
    fn test_transfer_rejects_insufficient_balance() {
        let a = Address::from_low_u64(1);
        let b = Address::from_low_u64(2);
        let mut state = funded(a, 100);

        let err = state.transfer(a, b, 101).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientBalance {
                balance: 100,
                needed: 101,
                ..
            }
        ));
        // Nothing moved
        assert_eq!(state.balance_of(a), 100);
        assert_eq!(state.balance_of(b), 0);
    }

    #[test]
    fn test_self_transfer_is_net_noop() {
        let a = Address::from_low_u64(1);
        let mut state = funded(a, 100);

        state.transfer(a, a, 60).unwrap();
        assert_eq!(state.balance_of(a), 100);
        assert!(state.conserves_supply());
    }

    #[test]
    fn test_zero_balance_stays_stored() {
        let a = Address::from_low_u64(1);
        let b = Address::from_low_u64(2);
        let mut state = funded(a, 100);

        state.transfer(a, b, 100).unwrap();
        assert_eq!(state.balance_of(a), 0);
        assert!(state.conserves_supply());
    }

    #[test]
    fn test_set_allowance_overwrites() {
        let owner = Address::from_low_u64(1);
        let spender = Address::from_low_u64(2);
        let mut state = TokenState::new();

        state.set_allowance(owner, spender, 1500);
        assert_eq!(state.allowance(owner, spender), 1500);

        state.set_allowance(owner, spender, 50);
        assert_eq!(state.allowance(owner, spender), 50);

        state.set_allowance(owner, spender, 0);
        assert_eq!(state.allowance(owner, spender), 0);
    }

    #[test]
    fn test_mint_overflow_rejected() {
        let a = Address::from_low_u64(1);
        let b = Address::from_low_u64(2);
        let mut state = funded(a, Amount::MAX);

        // Supply is already at the ceiling; a second mint must wrap the
        // supply counter and fail.
        assert!(matches!(state.mint(b, 1), Err(Error::Overflow)));
        assert_eq!(state.balance_of(b), 0);
        assert!(state.conserves_supply());
    }
}
