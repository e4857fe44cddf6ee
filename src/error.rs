// ⚠️ Account Errors
//
// Two failure kinds only:
// - InvalidArgument: malformed input, rejected before anything is mutated
// - AccountLocked:   outgoing transfer on a locked account
//
// Insufficient funds is NOT an error, `debit` reports it as `Ok(false)`.

use thiserror::Error;

/// Errors raised by account operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountError {
    /// Negative amount, negative overdraft limit, blank owner, empty
    /// counterparty name or reference, duplicate account number...
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Debit attempted while the account is locked
    #[error("Account {account_number} is locked")]
    AccountLocked { account_number: u64 },
}

impl AccountError {
    /// Shorthand for building an `InvalidArgument`
    pub fn invalid(message: impl Into<String>) -> Self {
        AccountError::InvalidArgument(message.into())
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, AccountError::AccountLocked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AccountError::invalid("amount must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid argument: amount must not be negative"
        );

        let locked = AccountError::AccountLocked {
            account_number: 1234,
        };
        assert_eq!(locked.to_string(), "Account 1234 is locked");
        assert!(locked.is_locked());
        assert!(!err.is_locked());
    }
}
