// 👤 Owner Entity - The account holder
//
// Owners are shared: an account keeps an `Arc<Owner>` and never copies
// the owner's data into itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::AccountError;

/// Account holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub first_name: String,
    pub last_name: String,

    /// Postal address, if known
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
}

impl Owner {
    /// Create a new owner
    ///
    /// Fails when both names are blank: an owner must be identifiable.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, AccountError> {
        let first_name = first_name.into().trim().to_string();
        let last_name = last_name.into().trim().to_string();

        if first_name.is_empty() && last_name.is_empty() {
            return Err(AccountError::invalid("Owner must have a name"));
        }

        Ok(Owner {
            first_name,
            last_name,
            address: None,
            birthday: None,
        })
    }

    /// Placeholder owner used by the default checking account
    pub fn placeholder() -> Arc<Owner> {
        Arc::new(Owner {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: Some("Unknown".to_string()),
            birthday: NaiveDate::from_ymd_opt(1976, 3, 28),
        })
    }

    /// Builder pattern: add address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Builder pattern: add birthday
    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// "First Last", or whichever of the two is present
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
