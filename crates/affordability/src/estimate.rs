//! Maximum-loan estimation from income and loan assumptions.
//!
//! Uses the standard fixed-payment annuity present-value formula:
//!
//! PV = Pmt * (1 - (1 + r)^-n) / r
//!
//! where Pmt is the affordable monthly payment, r the monthly periodic
//! rate and n the number of monthly periods.

use loan_advisor_core::LoanAssumptions;

/// Estimate the maximum affordable principal.
///
/// - `monthly_income`: gross monthly income (rand)
/// - `annual_rate_pct`: nominal annual interest rate (11.75 for 11.75%)
/// - `term_years`: loan term
/// - `repayment_pct`: share of gross income allocated to repayment (e.g. 30)
///
/// A zero or negative nominal rate is a degenerate configuration that is
/// still answered: the principal is the undiscounted sum of payments.
/// Non-finite inputs or a non-finite result yield `None`; the caller sees
/// an absent estimate, never a fault. Pure and deterministic.
pub fn estimate_loan_amount(
    monthly_income: f64,
    annual_rate_pct: f64,
    term_years: u32,
    repayment_pct: u32,
) -> Option<f64> {
    if !monthly_income.is_finite() || !annual_rate_pct.is_finite() {
        return None;
    }

    let affordable_payment = monthly_income * (repayment_pct as f64 / 100.0);
    let r = (annual_rate_pct / 100.0) / 12.0;
    let n = (term_years * 12) as f64;

    let principal = if r <= 0.0 {
        affordable_payment * n
    } else {
        affordable_payment * (1.0 - (1.0 + r).powf(-n)) / r
    };

    if !principal.is_finite() {
        return None;
    }

    // Never report a negative principal.
    Some(principal.max(0.0))
}

/// Convenience wrapper taking validated [`LoanAssumptions`].
pub fn estimate_for(monthly_income: f64, assumptions: &LoanAssumptions) -> Option<f64> {
    estimate_loan_amount(
        monthly_income,
        assumptions.annual_rate_pct,
        assumptions.term_years,
        assumptions.repayment_pct,
    )
}
