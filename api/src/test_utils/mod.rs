//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Services are generic over their ports, so tests swap the backend adapters
//! for the in-memory versions here.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
