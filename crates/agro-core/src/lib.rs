//! AgroChain Core Library
//!
//! Domain rules, the storage port and input validation shared by every
//! AgroChain backend.

// Re-export pure types from agro-types
pub use agro_types::*;

pub mod error;
pub mod governance;
pub mod ports;
pub mod validation;

pub use error::{AgroError, Result};
pub use ports::Storage;
