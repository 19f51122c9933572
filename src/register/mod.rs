pub mod client;
pub mod payload;

pub use client::{RegisterClient, SubmissionContext, SubmissionOutcome, SubmissionSummary};
pub use payload::{record_payload, validate_data, VALID_ATTRIBUTES};
