//! Test support shared by unit tests and the hermetic test crate
//!
//! - Temporary project directories with automatic cleanup
//! - Helpers that turn a fixture into a [`Project`](crate::export::Project)

pub mod filesystem;

pub use filesystem::TempDirFixture;
