//! Connector-wide constants: defaults, header names, and well-known paths

/// Endpoint defaults applied when a setting is omitted
pub mod defaults {
    /// Loopback, where ASF binds IPC out of the box
    pub const HOST: &str = "127.0.0.1";

    /// ASF's stock IPC port
    pub const PORT: u16 = 1242;

    /// Prefix of every API resource
    pub const BASE_PATH: &str = "/Api";
}

/// Request headers sent with every call
pub mod headers {
    /// ASF reads the IPC password from this header verbatim
    pub const AUTHENTICATION: &str = "Authentication";

    pub const USER_AGENT: &str = concat!("asf-connector/", env!("CARGO_PKG_VERSION"));

    pub const ACCEPT_JSON: &str = "application/json";
}

/// Well-known paths
pub mod paths {
    /// Liveness probe. Lives at the server root, not under the API base path.
    pub const HEALTH_CHECK: &str = "/HealthCheck";

    /// Selector that targets every configured bot
    pub const ALL_BOTS: &str = "ASF";

    /// Farming time left when there is nothing to farm
    pub const ZERO_DURATION: &str = "00:00:00";
}

/// Keys probed, in order, for a human-readable message in an error body
pub const ERROR_MESSAGE_KEYS: [&str; 5] = ["Message", "message", "Error", "error", "detail"];
