//! Probe execution for the TalorikAgent Security API smoke tester.
//!
//! The crate is split along the two halves of a smoke-test run:
//!
//! - [`executor`] sends one HTTP request and classifies the outcome. One
//!   attempt per call; the tool is an interactive diagnostic, so there are
//!   no retries and no backoff.
//! - [`driver`] owns the fixed endpoint sequence and renders the
//!   human-readable report through any `io::Write`, so the whole run can be
//!   captured by tests.

pub mod driver;
pub mod executor;
pub mod report;

pub use driver::{ProbeStep, StepKind, run, standard_sequence};
pub use executor::{ProbeError, ProbeOutcome, ProbeSpec, execute};
