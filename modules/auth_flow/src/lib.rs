// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{error, model};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod domain;
