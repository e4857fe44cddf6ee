// 💳 Account - Base record shared by every account variant
//
// Identity (number, owner) never changes. Balance, lock state and
// currency are values that change only through the variant's domain
// operations: the balance setter and the currency rescaling are visible
// inside `entities` and nowhere else.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::owner::Owner;
use crate::currency::Currency;
use crate::error::AccountError;

// ============================================================================
// VALIDATION CORE
// ============================================================================

/// Reject negative and non-finite amounts
pub(crate) fn validate_amount(amount: f64) -> Result<(), AccountError> {
    if !amount.is_finite() {
        return Err(AccountError::invalid(format!(
            "Amount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(AccountError::invalid(format!(
            "Amount must not be negative, got {}",
            amount
        )));
    }
    Ok(())
}

/// Reject a balance that left the range of finite numbers
pub(crate) fn validate_balance(balance: f64) -> Result<(), AccountError> {
    if !balance.is_finite() {
        return Err(AccountError::invalid(format!(
            "Resulting balance must be a finite number, got {}",
            balance
        )));
    }
    Ok(())
}

/// Reject empty or blank text fields (counterparty name, reference)
pub(crate) fn validate_text(field: &str, value: &str) -> Result<(), AccountError> {
    if value.trim().is_empty() {
        return Err(AccountError::invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}

// ============================================================================
// ACCOUNT
// ============================================================================

/// Base account record
///
/// Identity: account number + owner reference (never change)
/// Values: balance (always expressed in `currency`), locked flag
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    number: u64,
    owner: Arc<Owner>,
    balance: f64,
    locked: bool,
    currency: Currency,
}

impl Account {
    /// Open an unlocked account with a zero balance in the base currency
    pub(super) fn new(owner: Arc<Owner>, number: u64) -> Self {
        Account {
            number,
            owner,
            balance: 0.0,
            locked: false,
            currency: Currency::BASE,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn owner(&self) -> &Arc<Owner> {
        &self.owner
    }

    /// Current balance, in `currency()`
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Block outgoing transfers (idempotent)
    pub fn lock(&mut self) {
        if !self.locked {
            info!(account = self.number, "account locked");
        }
        self.locked = true;
    }

    /// Allow outgoing transfers again (idempotent)
    pub fn unlock(&mut self) {
        if self.locked {
            info!(account = self.number, "account unlocked");
        }
        self.locked = false;
    }

    /// The only way the balance changes
    pub(super) fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    /// Rescale the balance into `target` and switch the currency tag
    ///
    /// Returns the factor that was applied, so variants can rescale their
    /// own currency-denominated fields with exactly the same factor.
    /// Nothing changes if the rescaled balance would not be finite.
    pub(super) fn change_currency(&mut self, target: Currency) -> Result<f64, AccountError> {
        if target == self.currency {
            return Ok(1.0);
        }

        let factor = self.currency.factor_to(target);
        let balance = self.balance * factor;
        validate_balance(balance)?;

        info!(
            account = self.number,
            from = %self.currency,
            to = %target,
            to_base = target.is_base(),
            factor,
            "currency changed"
        );
        self.balance = balance;
        self.currency = target;
        Ok(factor)
    }

    /// Multi-line summary of the base fields
    pub fn describe(&self) -> String {
        format!(
            "Account number: {}\nOwner: {}\nBalance: {:.2} {}\nLocked: {}\n",
            self.number,
            self.owner,
            self.balance,
            self.currency,
            if self.locked { "yes" } else { "no" },
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account() -> Account {
        let owner = Arc::new(Owner::new("Ada", "Lovelace").unwrap());
        Account::new(owner, 1234)
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account();

        assert_eq!(account.number(), 1234);
        assert_eq!(account.owner().full_name(), "Ada Lovelace");
        assert_eq!(account.balance(), 0.0);
        assert!(!account.is_locked());
        assert_eq!(account.currency(), Currency::Eur);
    }

    #[test]
    fn test_owner_is_shared_not_copied() {
        let owner = Arc::new(Owner::new("Ada", "Lovelace").unwrap());
        let account = Account::new(Arc::clone(&owner), 1);
        assert!(Arc::ptr_eq(account.owner(), &owner));
    }

    #[test]
    fn test_lock_unlock_idempotent() {
        let mut account = create_test_account();

        account.lock();
        account.lock();
        assert!(account.is_locked());

        account.unlock();
        account.unlock();
        assert!(!account.is_locked());
    }

    #[test]
    fn test_change_currency_rescales_balance() {
        let mut account = create_test_account();
        account.set_balance(100.0);

        let factor = account.change_currency(Currency::Bgn).unwrap();
        assert!((factor - 1.95583).abs() < 1e-12);
        assert!((account.balance() - 195.583).abs() < 1e-9);
        assert_eq!(account.currency(), Currency::Bgn);

        account.change_currency(Currency::Eur).unwrap();
        assert!((account.balance() - 100.0).abs() < 1e-9);
        assert_eq!(account.currency(), Currency::Eur);
    }

    #[test]
    fn test_change_to_same_currency_is_lossless() {
        let mut account = create_test_account();
        account.set_balance(0.1 + 0.2);

        let factor = account.change_currency(Currency::Eur).unwrap();
        assert_eq!(factor, 1.0);
        assert_eq!(account.balance(), 0.1 + 0.2);
    }

    #[test]
    fn test_change_currency_overflow_leaves_account_untouched() {
        let mut account = create_test_account();
        account.set_balance(-1e308);

        let err = account.change_currency(Currency::Ltl).unwrap_err();
        assert!(matches!(err, AccountError::InvalidArgument(_)));
        assert_eq!(account.balance(), -1e308);
        assert_eq!(account.currency(), Currency::Eur);
    }

    #[test]
    fn test_validate_balance() {
        assert!(validate_balance(-1e308).is_ok());
        assert!(validate_balance(f64::INFINITY).is_err());
        assert!(validate_balance(f64::NEG_INFINITY).is_err());
        assert!(validate_balance(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(12.5).is_ok());
        assert!(validate_amount(-0.01).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("reference", "invoice").is_ok());
        assert!(validate_text("reference", "").is_err());
        assert!(validate_text("reference", "   ").is_err());
    }

    #[test]
    fn test_describe() {
        let mut account = create_test_account();
        account.set_balance(-42.5);
        account.lock();

        let text = account.describe();
        assert!(text.contains("Account number: 1234"));
        assert!(text.contains("Owner: Ada Lovelace"));
        assert!(text.contains("Balance: -42.50 EUR"));
        assert!(text.contains("Locked: yes"));
    }
}
