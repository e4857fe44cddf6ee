// Entity Models
//
// - Owner:           the account holder, shared by reference
// - Account:         base record (identity, balance, lock state, currency)
// - CheckingAccount: base record + overdraft limit + transfer rules
//
// The balance setter of `Account` is only visible inside this module tree,
// so every balance change goes through a validated domain operation.

pub mod owner;
pub mod account;
pub mod checking;

pub use owner::Owner;
pub use account::Account;
pub use checking::{CheckingAccount, DEFAULT_ACCOUNT_NUMBER, DEFAULT_OVERDRAFT_LIMIT};
