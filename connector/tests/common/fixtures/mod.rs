//! Shared test utilities:
//! - Mock ASF IPC server
//! - Canned ASF response bodies

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_ipc;
pub mod test_data;

pub use mock_ipc::{closed_port, MockIpcServer};
pub use test_data::*;
