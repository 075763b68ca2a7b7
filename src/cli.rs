use clap::Parser;
use std::path::PathBuf;

use crate::config::{ServiceConfig, DEFAULT_DATA_FILE, DEFAULT_HOST, DEFAULT_PORT};
use crate::dataset::ReloadPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about = "Nutritional Insights API", long_about = None)]
pub struct Cli {
    /// Path to the recipe dataset CSV
    #[arg(short, long, env = "NUTRITION_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long, env = "NUTRITION_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "NUTRITION_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Reuse the parsed dataset until the file changes on disk
    #[arg(long, env = "NUTRITION_CACHE")]
    pub cache: bool,
}

impl Cli {
    pub fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            dataset_path: self.data_file,
            host: self.host,
            port: self.port,
            reload: if self.cache {
                ReloadPolicy::WhenModified
            } else {
                ReloadPolicy::EveryRequest
            },
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["nutrition_insights"]).unwrap();
        let config = cli.into_config();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.reload, ReloadPolicy::EveryRequest);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "nutrition_insights",
            "--data-file",
            "fixtures/diets.csv",
            "--port",
            "8080",
            "--cache",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.dataset_path, PathBuf::from("fixtures/diets.csv"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.reload, ReloadPolicy::WhenModified);
    }
}
