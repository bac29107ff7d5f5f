//! Loan assumptions shared by the estimator and the agent.
//!
//! The bounds here mirror the settings surface: interest rate between 5%
//! and 25%, term between 5 and 30 years, repayment cap between 10% and 40%
//! of gross income. Validation happens once at the configuration boundary;
//! downstream code may assume the invariants hold and does not clamp.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nominal annual interest rate bounds (percent)
pub const RATE_PCT_RANGE: (f64, f64) = (5.0, 25.0);
/// Bond term bounds (years)
pub const TERM_YEARS_RANGE: (u32, u32) = (5, 30);
/// Repayment cap bounds (% of gross income)
pub const REPAYMENT_PCT_RANGE: (u32, u32) = (10, 40);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssumptionsError {
    #[error("interest rate {0}% outside allowed range 5..25%")]
    RateOutOfRange(f64),

    #[error("term {0} years outside allowed range 5..30 years")]
    TermOutOfRange(u32),

    #[error("repayment cap {0}% outside allowed range 10..40%")]
    RepaymentOutOfRange(u32),
}

/// Validated loan assumptions, constant for the duration of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanAssumptions {
    /// Nominal annual interest rate (e.g. 11.75 for 11.75%)
    pub annual_rate_pct: f64,
    /// Bond term in years
    pub term_years: u32,
    /// Share of gross monthly income allocated to repayment
    pub repayment_pct: u32,
}

impl LoanAssumptions {
    /// Build validated assumptions. Each field must be within its stated
    /// bounds; the first violation is reported.
    pub fn new(
        annual_rate_pct: f64,
        term_years: u32,
        repayment_pct: u32,
    ) -> Result<Self, AssumptionsError> {
        if !annual_rate_pct.is_finite()
            || annual_rate_pct < RATE_PCT_RANGE.0
            || annual_rate_pct > RATE_PCT_RANGE.1
        {
            return Err(AssumptionsError::RateOutOfRange(annual_rate_pct));
        }
        if term_years < TERM_YEARS_RANGE.0 || term_years > TERM_YEARS_RANGE.1 {
            return Err(AssumptionsError::TermOutOfRange(term_years));
        }
        if repayment_pct < REPAYMENT_PCT_RANGE.0 || repayment_pct > REPAYMENT_PCT_RANGE.1 {
            return Err(AssumptionsError::RepaymentOutOfRange(repayment_pct));
        }
        Ok(Self {
            annual_rate_pct,
            term_years,
            repayment_pct,
        })
    }
}

impl Default for LoanAssumptions {
    /// Standard assumptions: 11.75% p.a. over 20 years with a 30% repayment cap.
    fn default() -> Self {
        Self {
            annual_rate_pct: 11.75,
            term_years: 20,
            repayment_pct: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_assumptions_are_valid() {
        let d = LoanAssumptions::default();
        assert!(LoanAssumptions::new(d.annual_rate_pct, d.term_years, d.repayment_pct).is_ok());
    }

    #[test]
    fn rejects_out_of_range_rate() {
        assert!(matches!(
            LoanAssumptions::new(4.9, 20, 30),
            Err(AssumptionsError::RateOutOfRange(_))
        ));
        assert!(matches!(
            LoanAssumptions::new(25.1, 20, 30),
            Err(AssumptionsError::RateOutOfRange(_))
        ));
        assert!(matches!(
            LoanAssumptions::new(f64::NAN, 20, 30),
            Err(AssumptionsError::RateOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_term() {
        assert!(matches!(
            LoanAssumptions::new(11.75, 4, 30),
            Err(AssumptionsError::TermOutOfRange(4))
        ));
        assert!(matches!(
            LoanAssumptions::new(11.75, 31, 30),
            Err(AssumptionsError::TermOutOfRange(31))
        ));
    }

    #[test]
    fn rejects_out_of_range_repayment() {
        assert!(matches!(
            LoanAssumptions::new(11.75, 20, 9),
            Err(AssumptionsError::RepaymentOutOfRange(9))
        ));
        assert!(matches!(
            LoanAssumptions::new(11.75, 20, 41),
            Err(AssumptionsError::RepaymentOutOfRange(41))
        ));
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(LoanAssumptions::new(5.0, 5, 10).is_ok());
        assert!(LoanAssumptions::new(25.0, 30, 40).is_ok());
    }
}
