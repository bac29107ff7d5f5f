//! Offline affordability engine
//!
//! Two pure leaf components with no I/O:
//! - [`extract_income`] pulls a likely gross monthly income out of a
//!   free-text question.
//! - [`estimate_loan_amount`] turns that income plus loan assumptions into
//!   a maximum affordable principal via the annuity present-value formula.
//!
//! Both report misses as `None` rather than errors; a miss is a normal,
//! user-visible outcome, not a fault.

pub mod estimate;
pub mod income;

pub use estimate::{estimate_for, estimate_loan_amount};
pub use income::extract_income;
