//! User-facing message rendering.
//!
//! Principal and income render as whole-unit rand with thousands
//! separators, the rate as a two-decimal percentage, term and repayment
//! cap as integers.

use loan_advisor_core::format_rand;

use crate::assistant::{Estimate, Reply};

/// Render a policy reply as the text shown to the user.
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::OfflineEstimate(estimate) => {
            format!("Estimated Affordability (Offline)\n\n{}", estimate_body(estimate))
        }
        Reply::OfflineGuidance => {
            "Offline mode: I can estimate affordability if you include your monthly income \
             in the question, e.g., 'I earn R20,000 per month — how much can I borrow?'"
                .to_string()
        }
        Reply::RemoteAnswer(answer) => answer.clone(),
        Reply::DegradedEstimate(estimate) => format!(
            "OpenAI unavailable. Showing offline estimate instead.\n\n\
             Estimated Affordability (Offline)\n\n{}",
            estimate_body(estimate)
        ),
        Reply::QuotaExhausted { income_found: true } => {
            "OpenAI quota exceeded and I couldn't compute an estimate. \
             Try including your monthly income in the question."
                .to_string()
        }
        Reply::QuotaExhausted {
            income_found: false,
        } => {
            "OpenAI quota exceeded. Add billing in your OpenAI account or enable Offline \
             mode and include your monthly income for a quick estimate."
                .to_string()
        }
        Reply::RemoteError(detail) => {
            format!("There was an error calling OpenAI: {detail}")
        }
    }
}

/// The estimate block shared by the offline and degraded paths.
fn estimate_body(estimate: &Estimate) -> String {
    let a = &estimate.assumptions;
    format!(
        "Approximate maximum bond amount: {}\n\n\
         Assumptions:\n\
         - Gross monthly income: {}\n\
         - Interest rate: {:.2}% p.a.\n\
         - Term: {} years\n\
         - Repayment cap: {}% of income\n\n\
         Tip: Final approval depends on credit score, expenses, and lender criteria.",
        format_rand(estimate.principal),
        format_rand(estimate.income),
        a.annual_rate_pct,
        a.term_years,
        a.repayment_pct,
    )
}

/// Common South African home-loan questions, answerable offline.
pub fn faq() -> &'static [(&'static str, &'static str)] {
    &[
        (
            "Transfer costs",
            "Include transfer duty (if applicable), conveyancer fees, and VAT on services. \
             First-time buyers under certain thresholds may pay reduced duty.",
        ),
        (
            "Bond registration costs",
            "Paid to the bank's appointed conveyancer for registering the bond at the Deeds Office.",
        ),
        (
            "Fixed vs variable rate",
            "Fixed gives payment certainty; variable may be cheaper over time but can rise with \
             the repo rate. Many lenders offer fixed for 12-24 months.",
        ),
        (
            "Typical affordability rule of thumb",
            "Lenders often prefer total debt repayments below ~30% of gross income, but they \
             also consider expenses and credit history.",
        ),
    ]
}
