//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (repositories, webhook transport).
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod repositories;
pub mod webhook;

// Re-exports
pub use repositories::*;
pub use webhook::*;
