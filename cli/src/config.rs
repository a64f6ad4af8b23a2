use serde::Serialize;
use tierconf_core::layered;

/// Sample record resolved by the inspector.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
    pub timeout_secs: f64,
    pub verbose: bool,
    pub token: String,
    pub limits: Limits,
}

/// Embedded section. Never resolved by key.
#[derive(Debug, Clone, Serialize)]
pub struct Limits {
    pub max_body_bytes: u64,
    pub max_connections: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024,
            max_connections: 1024,
        }
    }
}

layered! {
    ServiceConfig {
        host: String { default = "0.0.0.0", env = "SERVICE_HOST" },
        port: u16 { default = "9999", env = "SERVICE_PORT" },
        workers: u32 { default = "4" },
        timeout_secs: f64 { default = "30", arg = "timeout" },
        verbose: bool { arg = "v" },
        token: String { env = "SERVICE_TOKEN" },
        limits: embedded,
    }
}
