// 💸 Transfers - Apply batches of transfer instructions to an account
//
// A batch is a CSV file, one instruction per line:
//
//   direction,amount,counterparty_name,counterparty_account,counterparty_bank,reference
//   debit,120.50,Acme Corp,123456,10020030,Invoice 2024-001
//   credit,900,Employer Ltd,987654,50010060,Salary
//
// Every instruction produces a Booking. Rejections never abort the batch.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::shared::SharedAccount;

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Outgoing transfer
    Debit,

    /// Incoming transfer
    Credit,
}

/// One line of a transfer batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferInstruction {
    pub direction: Direction,
    pub amount: f64,
    pub counterparty_name: String,
    pub counterparty_account: u64,
    pub counterparty_bank: u64,
    pub reference: String,
}

impl TransferInstruction {
    pub fn debit(
        amount: f64,
        counterparty_name: impl Into<String>,
        counterparty_account: u64,
        counterparty_bank: u64,
        reference: impl Into<String>,
    ) -> Self {
        TransferInstruction {
            direction: Direction::Debit,
            amount,
            counterparty_name: counterparty_name.into(),
            counterparty_account,
            counterparty_bank,
            reference: reference.into(),
        }
    }

    pub fn credit(
        amount: f64,
        counterparty_name: impl Into<String>,
        counterparty_account: u64,
        counterparty_bank: u64,
        reference: impl Into<String>,
    ) -> Self {
        TransferInstruction {
            direction: Direction::Credit,
            ..Self::debit(
                amount,
                counterparty_name,
                counterparty_account,
                counterparty_bank,
                reference,
            )
        }
    }
}

/// What happened to an instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    Booked,

    /// Debit refused by the overdraft limit
    InsufficientFunds,

    /// Account locked or malformed instruction
    Rejected { reason: String },
}

impl fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingOutcome::Booked => f.write_str("booked"),
            BookingOutcome::InsufficientFunds => f.write_str("insufficient funds"),
            BookingOutcome::Rejected { reason } => write!(f, "rejected ({})", reason),
        }
    }
}

/// Record of one applied instruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub account_number: u64,
    pub booked_at: DateTime<Utc>,
    pub instruction: TransferInstruction,
    pub outcome: BookingOutcome,

    /// Account balance right after the attempt
    pub balance_after: f64,
}

/// Outcome counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub booked: usize,
    pub insufficient_funds: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        bookings
            .iter()
            .fold(BatchSummary::default(), |mut summary, booking| {
                match booking.outcome {
                    BookingOutcome::Booked => summary.booked += 1,
                    BookingOutcome::InsufficientFunds => summary.insufficient_funds += 1,
                    BookingOutcome::Rejected { .. } => summary.rejected += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.booked + self.insufficient_funds + self.rejected
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Read instructions from any CSV source (header line required)
pub fn read_instructions<R: Read>(reader: R) -> Result<Vec<TransferInstruction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut instructions = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        let instruction: TransferInstruction = result
            .with_context(|| format!("Failed to deserialize instruction {}", index + 1))?;
        instructions.push(instruction);
    }

    Ok(instructions)
}

/// Load instructions from a CSV file
pub fn load_instructions(csv_path: &Path) -> Result<Vec<TransferInstruction>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;
    let instructions = read_instructions(file)?;
    info!(
        path = %csv_path.display(),
        count = instructions.len(),
        "loaded transfer instructions"
    );
    Ok(instructions)
}

// ============================================================================
// APPLYING
// ============================================================================

/// Apply one instruction atomically and record the result
pub fn apply_instruction(account: &SharedAccount, instruction: &TransferInstruction) -> Booking {
    let (result, balance_after) = account.with(|acc| {
        let result = match instruction.direction {
            Direction::Debit => acc.debit(
                instruction.amount,
                &instruction.counterparty_name,
                instruction.counterparty_account,
                instruction.counterparty_bank,
                &instruction.reference,
            ),
            Direction::Credit => acc
                .credit(
                    instruction.amount,
                    &instruction.counterparty_name,
                    instruction.counterparty_account,
                    instruction.counterparty_bank,
                    &instruction.reference,
                )
                .map(|()| true),
        };
        (result, acc.balance())
    });

    let outcome = match result {
        Ok(true) => BookingOutcome::Booked,
        Ok(false) => BookingOutcome::InsufficientFunds,
        Err(err) => BookingOutcome::Rejected {
            reason: err.to_string(),
        },
    };
    debug!(account = account.number(), %outcome, "instruction applied");

    Booking {
        id: Uuid::new_v4(),
        account_number: account.number(),
        booked_at: Utc::now(),
        instruction: instruction.clone(),
        outcome,
        balance_after,
    }
}

/// Apply instructions in order
pub fn apply_batch(account: &SharedAccount, instructions: &[TransferInstruction]) -> Vec<Booking> {
    let bookings: Vec<Booking> = instructions
        .iter()
        .map(|instruction| apply_instruction(account, instruction))
        .collect();

    let summary = BatchSummary::from_bookings(&bookings);
    info!(
        account = account.number(),
        booked = summary.booked,
        insufficient_funds = summary.insufficient_funds,
        rejected = summary.rejected,
        "batch applied"
    );

    bookings
}

// ============================================================================
// TESTS
// ============================================================================
