//! Munch Bunch Shared Library
//!
//! Wire types, domain errors and validation helpers shared between the
//! backend and its clients.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
