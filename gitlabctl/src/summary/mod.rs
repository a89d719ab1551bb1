//! Verification outcome reporting.

mod verify_report;

pub use verify_report::{VerifyReport, ALL_PASS_MESSAGE};
