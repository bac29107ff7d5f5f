//! Response policy for the loan advisor
//!
//! Decides, per query, whether to answer with the offline affordability
//! estimator, the remote advisor, or the offline estimator as a fallback
//! after a quota-exhausted remote failure. Each query is an independent,
//! synchronous, single-attempt decision tree; there is no shared mutable
//! state between queries.

pub mod assistant;
pub mod messages;

pub use assistant::{Assistant, Estimate, Reply};
