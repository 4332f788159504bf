// File: connector/src/controllers/mod.rs
//! Resource controllers for the ASF IPC API
//!
//! Each controller covers one resource family and only builds resource paths
//! and request bodies. Every controller holds a handle to the connector's
//! single shared [`IpcTransport`](crate::transport::IpcTransport); none of them
//! ever creates its own.
//!
//! | Controller | Resources |
//! |---|---|
//! | [`AsfController`] | `/ASF`, `/ASF/{Exit,Restart,Update,Encrypt,Hash}` |
//! | [`BotController`] | `/Bot/{names}/...` |
//! | [`CommandController`] | `/Command` (legacy) |
//! | [`NLogController`] | `/NLog/File`, `/NLog` (stub) |
//! | [`TypeController`] | `/Type/{name}` |
//! | [`StructureController`] | `/Structure/{name}` |
//! | [`TwoFactorAuthenticationController`] | `/Bot/{names}/TwoFactorAuthentication/Token` |

pub mod asf;
pub mod bot;
pub mod command;
pub mod nlog;
pub mod structure;
pub mod two_factor;
pub mod type_info;

pub use asf::AsfController;
pub use bot::BotController;
pub use command::CommandController;
pub use nlog::NLogController;
pub use structure::StructureController;
pub use two_factor::TwoFactorAuthenticationController;
pub use type_info::TypeController;
