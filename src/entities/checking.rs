// 🏦 Checking Account - Account with an overdraft limit
//
// Transfer rules:
// - debit:  blocked while locked, succeeds only if the balance stays >= -limit
// - credit: always allowed, even while locked
//
// The counterparty of a transfer lives at another bank and is never touched.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::account::{validate_amount, validate_balance, validate_text, Account};
use super::owner::Owner;
use crate::currency::Currency;
use crate::error::AccountError;

/// Account number used by `CheckingAccount::default()`
pub const DEFAULT_ACCOUNT_NUMBER: u64 = 99_887_766;

/// Overdraft limit used by `CheckingAccount::default()`
pub const DEFAULT_OVERDRAFT_LIMIT: f64 = 500.0;

const HEADER: &str = "-- CHECKING ACCOUNT --";

fn validate_overdraft_limit(limit: f64) -> Result<(), AccountError> {
    if !limit.is_finite() || limit < 0.0 {
        return Err(AccountError::invalid(format!(
            "Overdraft limit must not be negative, got {}",
            limit
        )));
    }
    Ok(())
}

// ============================================================================
// CHECKING ACCOUNT
// ============================================================================

/// Checking account: base record + overdraft limit
///
/// Invariant: after every successful debit, `balance >= -overdraft_limit`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckingAccount {
    #[serde(flatten)]
    account: Account,

    /// Denominated in the account currency, never negative
    overdraft_limit: f64,
}

impl CheckingAccount {
    /// Open a checking account
    ///
    /// Fails with `InvalidArgument` if the overdraft limit is negative.
    pub fn new(owner: Arc<Owner>, number: u64, overdraft_limit: f64) -> Result<Self, AccountError> {
        validate_overdraft_limit(overdraft_limit)?;

        Ok(CheckingAccount {
            account: Account::new(owner, number),
            overdraft_limit,
        })
    }

    /// Read-only view of the base record
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn number(&self) -> u64 {
        self.account.number()
    }

    pub fn owner(&self) -> &Arc<Owner> {
        self.account.owner()
    }

    pub fn balance(&self) -> f64 {
        self.account.balance()
    }

    pub fn is_locked(&self) -> bool {
        self.account.is_locked()
    }

    pub fn currency(&self) -> Currency {
        self.account.currency()
    }

    pub fn overdraft_limit(&self) -> f64 {
        self.overdraft_limit
    }

    /// Replace the overdraft limit (left unchanged on failure)
    pub fn set_overdraft_limit(&mut self, limit: f64) -> Result<(), AccountError> {
        validate_overdraft_limit(limit)?;
        self.overdraft_limit = limit;
        Ok(())
    }

    /// Would the balance stay within the overdraft limit after paying `amount`?
    pub fn can_afford(&self, amount: f64) -> bool {
        self.balance() - amount >= -self.overdraft_limit
    }

    pub fn lock(&mut self) {
        self.account.lock();
    }

    pub fn unlock(&mut self) {
        self.account.unlock();
    }

    /// Send money to an account at another bank
    ///
    /// Returns `Ok(false)` without touching the balance when the overdraft
    /// limit would be exceeded.
    ///
    /// # Errors
    /// - `AccountLocked` if the account is locked (checked first)
    /// - `InvalidArgument` for a negative amount, an empty name/reference
    ///   or a resulting balance that is not finite
    pub fn debit(
        &mut self,
        amount: f64,
        counterparty_name: &str,
        counterparty_account_number: u64,
        counterparty_bank_id: u64,
        reference: &str,
    ) -> Result<bool, AccountError> {
        if self.is_locked() {
            return Err(AccountError::AccountLocked {
                account_number: self.number(),
            });
        }
        validate_amount(amount)?;
        validate_text("Counterparty name", counterparty_name)?;
        validate_text("Reference", reference)?;

        if !self.can_afford(amount) {
            warn!(
                account = self.number(),
                amount,
                balance = self.balance(),
                overdraft_limit = self.overdraft_limit,
                "debit rejected: insufficient funds"
            );
            return Ok(false);
        }

        let balance = self.balance() - amount;
        validate_balance(balance)?;
        self.account.set_balance(balance);
        debug!(
            account = self.number(),
            amount,
            to = counterparty_name,
            to_account = counterparty_account_number,
            to_bank = counterparty_bank_id,
            reference,
            balance = self.balance(),
            "debit booked"
        );
        Ok(true)
    }

    /// Receive money from an account at another bank
    ///
    /// Allowed while the account is locked. Fails with `InvalidArgument`
    /// when the resulting balance would not be finite.
    pub fn credit(
        &mut self,
        amount: f64,
        counterparty_name: &str,
        counterparty_account_number: u64,
        counterparty_bank_id: u64,
        reference: &str,
    ) -> Result<(), AccountError> {
        validate_amount(amount)?;
        validate_text("Counterparty name", counterparty_name)?;
        validate_text("Reference", reference)?;

        let balance = self.balance() + amount;
        validate_balance(balance)?;
        self.account.set_balance(balance);
        debug!(
            account = self.number(),
            amount,
            from = counterparty_name,
            from_account = counterparty_account_number,
            from_bank = counterparty_bank_id,
            reference,
            balance = self.balance(),
            "credit booked"
        );
        Ok(())
    }

    /// Switch the account to `target`, rescaling balance and overdraft limit
    ///
    /// Fails with `InvalidArgument`, leaving the account untouched, if either
    /// rescaled value would not be finite.
    pub fn change_currency(&mut self, target: Currency) -> Result<(), AccountError> {
        let limit = self.overdraft_limit * self.currency().factor_to(target);
        validate_overdraft_limit(limit)?;

        let factor = self.account.change_currency(target)?;
        self.overdraft_limit *= factor;
        Ok(())
    }

    /// Human-readable summary (display only)
    pub fn describe(&self) -> String {
        format!(
            "{}\n{}Overdraft limit: {:.2} {}\n",
            HEADER,
            self.account.describe(),
            self.overdraft_limit,
            self.currency(),
        )
    }
}

impl Default for CheckingAccount {
    fn default() -> Self {
        CheckingAccount {
            account: Account::new(Owner::placeholder(), DEFAULT_ACCOUNT_NUMBER),
            overdraft_limit: DEFAULT_OVERDRAFT_LIMIT,
        }
    }
}

impl fmt::Display for CheckingAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ============================================================================
// TESTS
// ============================================================================
