//! The three structural checks, in the order the validator runs them.
//!
//! Each check reads the structures without modifying them and writes its findings to the
//! comparison's debug trace.

pub mod connectivity;
pub mod elements;
pub mod superposition;
