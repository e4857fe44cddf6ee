// 📇 Account Registry - In-memory index of checking accounts
//
// Account numbers are unique: registering a second account with a number
// already in use is rejected. Accounts are handed out as `SharedAccount`
// handles, so every holder sees the same state.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use crate::currency::Currency;
use crate::entities::{CheckingAccount, Owner};
use crate::error::AccountError;
use crate::shared::SharedAccount;

/// Registry of all known accounts, keyed by account number
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Arc<RwLock<HashMap<u64, SharedAccount>>>,
}

impl AccountRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account, failing if its number is already taken
    pub fn register(&self, account: CheckingAccount) -> Result<SharedAccount, AccountError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let number = account.number();
        if accounts.contains_key(&number) {
            return Err(AccountError::invalid(format!(
                "Account number {} is already registered",
                number
            )));
        }

        let shared = SharedAccount::new(account);
        accounts.insert(number, shared.clone());
        info!(account = number, "account registered");

        Ok(shared)
    }

    /// Find account by number
    pub fn find_by_number(&self, number: u64) -> Option<SharedAccount> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.get(&number).cloned()
    }

    /// Get all accounts, sorted by number
    pub fn all_accounts(&self) -> Vec<SharedAccount> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<SharedAccount> = accounts.values().cloned().collect();
        all.sort_by_key(|a| a.number());
        all
    }

    /// Count registered accounts
    pub fn count(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Get accounts held by `owner`
    pub fn by_owner(&self, owner: &Owner) -> Vec<SharedAccount> {
        self.filter(|account| **account.owner() == *owner)
    }

    /// Get accounts currently denominated in `currency`
    pub fn by_currency(&self, currency: Currency) -> Vec<SharedAccount> {
        self.filter(|account| account.currency() == currency)
    }

    /// Get locked accounts
    pub fn locked_accounts(&self) -> Vec<SharedAccount> {
        self.filter(|account| account.is_locked())
    }

    /// Get accounts with a negative balance
    pub fn overdrawn_accounts(&self) -> Vec<SharedAccount> {
        self.filter(|account| account.balance() < 0.0)
    }

    /// Sum of the balances of all accounts denominated in `currency`
    pub fn total_balance_by_currency(&self, currency: Currency) -> f64 {
        self.all_accounts()
            .iter()
            .map(|shared| {
                shared.with(|account| {
                    if account.currency() == currency {
                        account.balance()
                    } else {
                        0.0
                    }
                })
            })
            .sum()
    }

    fn filter(&self, predicate: impl Fn(&CheckingAccount) -> bool) -> Vec<SharedAccount> {
        self.all_accounts()
            .into_iter()
            .filter(|shared| shared.with(|account| predicate(account)))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
