//! Common test utilities shared by the integration tests.
//!
//! - Fixtures (filled forms, wired controllers, config directories)
//! - Event assertions

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
