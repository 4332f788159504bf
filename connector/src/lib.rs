pub mod codes;
pub mod config;
pub mod connector;
pub mod constants;
pub mod controllers;
pub mod errors;
pub mod legacy;
pub mod response;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, ConnectorConfig};
pub use connector::{AsfConnector, ConnectionScope, ConnectorBuilder};
pub use controllers::{
    AsfController, BotController, CommandController, NLogController, StructureController,
    TwoFactorAuthenticationController, TypeController,
};
pub use errors::{ConnectorError, ErrorKind};
pub use transport::IpcTransport;
pub use types::{CryptoMethod, EndpointTarget, HashingMethod, NameList, Scheme};
