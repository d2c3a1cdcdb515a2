//! Test harness for CLI integration tests.
//!
//! Provides isolated settings files, a local stub of the application's
//! Data API, and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod server;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::JoplinkCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use server::{Recorded, StubServer, closed_port};
