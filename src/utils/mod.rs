// Utility functions
pub mod crypto;
pub mod error;
pub mod session_store;

pub use error::*;
pub use session_store::*;
