//! Core types for the loan advisor
//!
//! This crate provides foundational types used across all other crates:
//! - Loan assumptions with bounds validation
//! - Currency formatting helpers

pub mod assumptions;
pub mod money;

pub use assumptions::{AssumptionsError, LoanAssumptions};
pub use money::format_rand;
