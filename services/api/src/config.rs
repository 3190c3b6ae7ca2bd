//! HTTP server configuration

use anyhow::Result;
use serde::Deserialize;
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the built single-page app
    pub static_dir: PathBuf,
    /// Apply pending schema migrations at startup
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load the server configuration from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Interface to bind (default: "0.0.0.0")
    /// - `PORT`: Port to listen on (default: 8000)
    /// - `STATIC_DIR`: Frontend build directory (default: "smore-frontend/build")
    /// - `RUN_MIGRATIONS`: Apply migrations at startup (default: true)
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("static_dir", "smore-frontend/build")?
            .set_default("run_migrations", true)?
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address to bind the listener to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid HOST '{}': {}", self.host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
