//! # Harness Module
//!
//! Named groups of validation cases and the bookkeeping needed to run them.
//!
//! - **Providers** ([`registry`]) - A [`registry::TestProvider`] contributes a named group of
//!   cases; the [`registry::TestRegistry`] holds them by unique name and resolves selections,
//!   where `all` stands for every registered provider
//! - **Cases** ([`case`]) - A [`case::ValidationCase`] compares two structures and classifies
//!   the verdict into one of six [`outcome::OutcomeKind`]s
//! - **Run bookkeeping** ([`context`], [`report`]) - Explicit per-run state: counts, timings,
//!   per-group log blocks and outcome tallies
//! - **Manifests** ([`manifest`]) - TOML files declaring structures and the cases comparing
//!   them; a loaded manifest is itself a provider

pub mod case;
pub mod context;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod outcome;
pub mod registry;
pub mod report;
