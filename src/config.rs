use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::dataset::ReloadPolicy;

/// The dataset lives one directory above the service root.
pub const DEFAULT_DATA_FILE: &str = "../All_Diets.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Everything the service needs at start, injected rather than read from globals.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub dataset_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub reload: ReloadPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            reload: ReloadPolicy::default(),
        }
    }
}

impl ServiceConfig {
    pub fn with_dataset_path(path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: path.into(),
            ..Default::default()
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
