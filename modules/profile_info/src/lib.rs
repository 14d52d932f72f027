// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{error, model};

// === INTERNAL MODULES ===
// Exposed for comprehensive testing; external consumers should only rely on
// the `contract` module.
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
