//! # StrucVal Core Library
//!
//! Structural validation for molecular structures: decides whether a "test" structure and a
//! "reference" structure describe the same molecule within numerical tolerance.
//!
//! ## Architectural Philosophy
//!
//! The library follows a layered layout so that the numerically delicate code stays small and
//! testable on its own.
//!
//! - **[`core`]: The Foundation.** In-memory structure models (`AtomicStructure`, atoms, bonds,
//!   coordinate frames) and the narrow linear-algebra boundary (`centroid`, `covariance`,
//!   `svd`, `det`) built on `nalgebra`.
//!
//! - **[`engine`]: The Logic Core.** The three structural checks (element sequence,
//!   connectivity, Kabsch superposition), the size-adaptive RMSD tolerance estimator, and the
//!   `StructureValidator` that runs them in order and short-circuits on the first failure.
//!
//! - **[`harness`]: Test Bookkeeping.** Test providers, the provider registry, outcome
//!   classification, an explicit per-run context, and TOML suite manifests.
//!
//! - **[`workflows`]: The Public API.** Runs selected test providers through the validator and
//!   the harness, reporting progress along the way.

pub mod core;
pub mod engine;
pub mod harness;
pub mod workflows;
