#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image filtering module.
pub mod filter;

/// spatial padding module.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;
