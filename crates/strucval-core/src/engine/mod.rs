//! # Engine Module
//!
//! The structural validation engine: given a "test" and a "reference" [`AtomicStructure`],
//! decide whether they describe the same molecule.
//!
//! ## Architecture
//!
//! - **Checks** ([`checks`]) - Element sequence, connectivity and Kabsch superposition, each a
//!   pure function of the two structures
//! - **Tolerance** ([`tolerance`]) - Size- and extent-adaptive RMSD acceptance threshold with
//!   tight/normal/loose presets
//! - **Thresholds** ([`threshold`]) - The `Auto` / preset / numeric threshold surface and its
//!   string parser
//! - **Orchestration** ([`validator`]) - Runs the checks in order, short-circuiting on the
//!   first failure, and collects the debug trace
//! - **Configuration** ([`config`]) - Validator and suite settings with builders
//! - **Error Handling** ([`error`]) - Errors reserved for malformed input and contract
//!   violations; structural differences are plain `false` verdicts
//!
//! [`AtomicStructure`]: crate::core::models::structure::AtomicStructure

pub mod checks;
pub mod config;
pub mod error;
pub mod progress;
pub mod threshold;
pub mod tolerance;
pub(crate) mod trace;
pub mod validator;
