// 🔒 Shared Account - Per-account exclusive lock
//
// A `CheckingAccount` is a plain value mutated through `&mut self`.
// When several callers need the same account, they share a
// `SharedAccount`: every operation holds the account's mutex for its
// whole duration, so a debit's affordability check and balance update
// are one indivisible step.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::currency::Currency;
use crate::entities::CheckingAccount;
use crate::error::AccountError;

#[derive(Debug, Clone)]
pub struct SharedAccount {
    number: u64,
    inner: Arc<Mutex<CheckingAccount>>,
}

impl SharedAccount {
    pub fn new(account: CheckingAccount) -> Self {
        SharedAccount {
            number: account.number(),
            inner: Arc::new(Mutex::new(account)),
        }
    }

    // Validation always happens before mutation, so the account behind a
    // poisoned mutex is still consistent.
    fn guard(&self) -> MutexGuard<'_, CheckingAccount> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Account number (immutable, readable without locking)
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Run `f` as a single atomic unit on the account
    pub fn with<R>(&self, f: impl FnOnce(&mut CheckingAccount) -> R) -> R {
        let mut guard = self.guard();
        f(&mut *guard)
    }

    /// Copy of the current account state
    pub fn snapshot(&self) -> CheckingAccount {
        self.guard().clone()
    }

    pub fn balance(&self) -> f64 {
        self.guard().balance()
    }

    pub fn is_locked(&self) -> bool {
        self.guard().is_locked()
    }

    pub fn currency(&self) -> Currency {
        self.guard().currency()
    }

    pub fn overdraft_limit(&self) -> f64 {
        self.guard().overdraft_limit()
    }

    pub fn can_afford(&self, amount: f64) -> bool {
        self.guard().can_afford(amount)
    }

    pub fn debit(
        &self,
        amount: f64,
        counterparty_name: &str,
        counterparty_account_number: u64,
        counterparty_bank_id: u64,
        reference: &str,
    ) -> Result<bool, AccountError> {
        self.guard().debit(
            amount,
            counterparty_name,
            counterparty_account_number,
            counterparty_bank_id,
            reference,
        )
    }

    pub fn credit(
        &self,
        amount: f64,
        counterparty_name: &str,
        counterparty_account_number: u64,
        counterparty_bank_id: u64,
        reference: &str,
    ) -> Result<(), AccountError> {
        self.guard().credit(
            amount,
            counterparty_name,
            counterparty_account_number,
            counterparty_bank_id,
            reference,
        )
    }

    pub fn lock(&self) {
        self.guard().lock();
    }

    pub fn unlock(&self) {
        self.guard().unlock();
    }

    pub fn set_overdraft_limit(&self, limit: f64) -> Result<(), AccountError> {
        self.guard().set_overdraft_limit(limit)
    }

    pub fn change_currency(&self, target: Currency) -> Result<(), AccountError> {
        self.guard().change_currency(target)
    }

    pub fn describe(&self) -> String {
        self.guard().describe()
    }
}

impl From<CheckingAccount> for SharedAccount {
    fn from(account: CheckingAccount) -> Self {
        SharedAccount::new(account)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_shared_operations() {
        let shared = SharedAccount::new(CheckingAccount::default());

        assert!(shared.debit(500.0, "Acme", 123, 456, "invoice").unwrap());
        assert!(!shared.debit(1.0, "Acme", 123, 456, "invoice").unwrap());
        assert_eq!(shared.balance(), -500.0);

        shared.lock();
        assert!(shared.is_locked());
        assert!(shared.debit(1.0, "Acme", 123, 456, "x").unwrap_err().is_locked());
        shared.credit(50.0, "Acme", 123, 456, "x").unwrap();
        assert_eq!(shared.balance(), -450.0);
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedAccount::new(CheckingAccount::default());
        let other = shared.clone();

        other.credit(10.0, "Acme", 1, 2, "x").unwrap();
        assert_eq!(shared.balance(), 10.0);
        assert_eq!(shared.number(), other.number());
    }

    #[test]
    fn test_concurrent_debits_respect_limit() {
        // 0 balance, 500 limit: exactly ten 50.0 debits can succeed
        let shared = SharedAccount::new(CheckingAccount::default());
        let booked = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let shared = shared.clone();
                let booked = Arc::clone(&booked);
                thread::spawn(move || {
                    if shared.debit(50.0, "Acme", 123, 456, &format!("tx-{}", i)).unwrap() {
                        booked.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(booked.load(Ordering::SeqCst), 10);
        assert_eq!(shared.balance(), -500.0);
    }

    #[test]
    fn test_concurrent_mixed_transfers() {
        let shared = SharedAccount::new(CheckingAccount::default());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    if i % 2 == 0 {
                        shared.credit(10.0, "Acme", 1, 2, "in").unwrap();
                    } else {
                        shared.debit(30.0, "Acme", 1, 2, "out").unwrap();
                    }
                    assert!(shared.balance() >= -shared.overdraft_limit());
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // 10 credits of 10, 10 debits of 30 all fit within the 500 limit
        assert_eq!(shared.balance(), 100.0 - 300.0);
    }

    #[test]
    fn test_with_is_atomic_unit() {
        let shared = SharedAccount::new(CheckingAccount::default());

        let paid = shared.with(|account| {
            if account.can_afford(200.0) {
                account.debit(200.0, "Acme", 1, 2, "x")
            } else {
                Ok(false)
            }
        });

        assert!(paid.unwrap());
        assert_eq!(shared.snapshot().balance(), -200.0);
    }

    #[test]
    fn test_change_currency_shared() {
        let shared = SharedAccount::new(CheckingAccount::default());
        shared.change_currency(Currency::Ltl).unwrap();

        assert_eq!(shared.currency(), Currency::Ltl);
        assert!((shared.overdraft_limit() - 1726.4).abs() < 1e-9);
        assert!(shared.describe().contains("LTL"));
    }
}
