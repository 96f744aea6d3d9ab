//! In-process token ledger.
//!
//! The ledger is the single source of truth for who holds how much of each
//! token. Pools hold their reserves through dedicated custody accounts, so
//! every swap, donation, and fee split is an ordinary ledger transfer and
//! reserve bookkeeping can never drift from custody balances.

use std::collections::HashMap;

use crate::domain::{AccountId, TokenId};
use crate::error::EngineError;

/// Balance book keyed by `(token, account)`.
///
/// Credits are owner-gated at the engine boundary; inside the ledger they
/// are unconditional. Transfers check the sender's balance and fail whole,
/// never partially.
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    balances: HashMap<(TokenId, AccountId), u128>,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance of `account` in `token`, zero if never touched.
    #[must_use]
    pub fn balance_of(&self, token: TokenId, account: AccountId) -> u128 {
        self.balances.get(&(token, account)).copied().unwrap_or(0)
    }

    /// Credits `amount` of `token` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] if the balance would exceed
    /// `u128`.
    pub fn credit(
        &mut self,
        token: TokenId,
        account: AccountId,
        amount: u128,
    ) -> Result<(), EngineError> {
        let entry = self.balances.entry((token, account)).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(EngineError::AmountOverflow)?;
        Ok(())
    }

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// A zero-amount transfer is a no-op. Self-transfers leave the balance
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientBalance`] if `from` holds less
    /// than `amount`, and [`EngineError::AmountOverflow`] if the recipient
    /// balance would exceed `u128`.
    pub fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), EngineError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.balance_of(token, from);
        if available < amount {
            return Err(EngineError::InsufficientBalance {
                token,
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        // Check the recipient side before debiting so a failed transfer
        // leaves both balances untouched.
        let to_balance = self.balance_of(token, to);
        let new_to = to_balance
            .checked_add(amount)
            .ok_or(EngineError::AmountOverflow)?;
        self.balances.insert((token, from), available - amount);
        self.balances.insert((token, to), new_to);
        Ok(())
    }
}
