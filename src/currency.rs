// 💱 Currency - Fixed set of currencies pegged to the base currency (EUR)
//
// Every currency carries a fixed factor: how many units of it one EUR buys.
// Conversions always go through EUR, so EUR -> EUR is exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccountError;

// ============================================================================
// CURRENCY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro (base currency)
    #[default]
    Eur,

    /// Bulgarian lev
    Bgn,

    /// Bosnia and Herzegovina convertible mark
    Bam,

    /// Lithuanian litas
    Ltl,
}

impl Currency {
    /// The base currency every factor is expressed against
    pub const BASE: Currency = Currency::Eur;

    /// All known currencies
    pub const ALL: [Currency; 4] = [Currency::Eur, Currency::Bgn, Currency::Bam, Currency::Ltl];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Bgn => "BGN",
            Currency::Bam => "BAM",
            Currency::Ltl => "LTL",
        }
    }

    /// Units of this currency per one unit of the base currency
    pub fn units_per_base(&self) -> f64 {
        match self {
            Currency::Eur => 1.0,
            Currency::Bgn => 1.95583,
            Currency::Bam => 1.95583,
            Currency::Ltl => 3.4528,
        }
    }

    /// Units of the base currency per one unit of this currency
    pub fn rate(&self) -> f64 {
        1.0 / self.units_per_base()
    }

    pub fn is_base(&self) -> bool {
        *self == Currency::BASE
    }

    /// Convert an amount given in the base currency into this currency
    fn convert_from_base(&self, amount: f64) -> f64 {
        amount * self.units_per_base()
    }

    /// Convert an amount given in this currency into the base currency
    fn convert_to_base(&self, amount: f64) -> f64 {
        amount / self.units_per_base()
    }

    /// Factor that turns an amount in `self` into an amount in `target`
    ///
    /// Equivalent to `rate(self) / rate(target)`, exactly 1.0 when both are equal.
    pub fn factor_to(&self, target: Currency) -> f64 {
        if *self == target {
            return 1.0;
        }
        target.units_per_base() / self.units_per_base()
    }

    /// Convert `amount` from `self` into `target`
    pub fn convert(&self, amount: f64, target: Currency) -> f64 {
        if *self == target {
            return amount;
        }
        target.convert_from_base(self.convert_to_base(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| AccountError::invalid(format!("Unknown currency: {}", s)))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_base_currency() {
        assert!(Currency::Eur.is_base());
        assert!(!Currency::Bgn.is_base());
        assert_eq!(Currency::default(), Currency::Eur);
        assert_eq!(Currency::Eur.rate(), 1.0);
    }

    #[test]
    fn test_convert_from_base() {
        assert!((Currency::Eur.convert(100.0, Currency::Bgn) - 195.583).abs() < EPSILON);
        assert!((Currency::Eur.convert(100.0, Currency::Ltl) - 345.28).abs() < EPSILON);
        assert_eq!(Currency::Eur.convert(100.0, Currency::Eur), 100.0);
    }

    #[test]
    fn test_convert_between_foreign_currencies() {
        // BGN and BAM share the same peg
        assert!((Currency::Bgn.convert(50.0, Currency::Bam) - 50.0).abs() < EPSILON);

        let ltl = Currency::Bgn.convert(195.583, Currency::Ltl);
        assert!((ltl - 345.28).abs() < EPSILON);
    }

    #[test]
    fn test_factor_matches_rates() {
        for from in Currency::ALL {
            for to in Currency::ALL {
                let expected = from.rate() / to.rate();
                assert!((from.factor_to(to) - expected).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let amount = -1234.56;
        for target in Currency::ALL {
            let there = Currency::Ltl.convert(amount, target);
            let back = target.convert(there, Currency::Ltl);
            assert!((back - amount).abs() < EPSILON);
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" BGN ".parse::<Currency>().unwrap(), Currency::Bgn);
        assert_eq!(Currency::Ltl.to_string(), "LTL");

        let err = "USD".parse::<Currency>().unwrap_err();
        assert!(matches!(err, AccountError::InvalidArgument(_)));
    }

    #[test]
    fn test_serde_uses_iso_code() {
        let json = serde_json::to_string(&Currency::Bam).unwrap();
        assert_eq!(json, "\"BAM\"");

        let parsed: Currency = serde_json::from_str("\"LTL\"").unwrap();
        assert_eq!(parsed, Currency::Ltl);
    }
}
