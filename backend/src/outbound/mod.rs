//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: MongoDB-backed user store
//! - **memory**: in-memory user store for tests and local runs
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
