//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod health;
pub mod performance;
pub mod returns;
pub mod transactions;

// Re-export all handlers for use in router
pub use health::*;
pub use performance::*;
pub use returns::*;
pub use transactions::*;
