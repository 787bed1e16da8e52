//! # Workflows Module
//!
//! Top-level entry points that tie the engine and the harness together.
//!
//! - **Suite Workflow** ([`suite`]) - Resolves a selection of test providers, filters their
//!   cases, runs every case through the structure validator (in parallel with the `parallel`
//!   feature) and returns the grouped [`RunReport`](crate::harness::report::RunReport).

pub mod suite;
