//! Document store integration tests
//!
//! This module tests the store trait contract and snapshot persistence
//! through the document surface.

mod operations;
mod persistence;
