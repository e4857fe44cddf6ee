// Bank Accounts - Core Library
// Checking accounts with overdraft limit, lock state and currency conversion.
// Exposes all modules for use in the CLI and in tests.

pub mod error;
pub mod currency;
pub mod entities;
pub mod shared;     // Per-account exclusive lock for shared use
pub mod registry;   // Accounts indexed by unique number
pub mod transfers;  // CSV transfer batches -> bookings
pub mod logging;

// Re-export commonly used types
pub use error::AccountError;
pub use currency::Currency;
pub use entities::{
    Account, CheckingAccount, Owner,
    DEFAULT_ACCOUNT_NUMBER, DEFAULT_OVERDRAFT_LIMIT,
};
pub use shared::SharedAccount;
pub use registry::AccountRegistry;
pub use transfers::{
    Booking, BookingOutcome, BatchSummary, Direction, TransferInstruction,
    apply_batch, apply_instruction, load_instructions, read_instructions,
};
pub use logging::{init_logging, LogConfig, LogFormat};
