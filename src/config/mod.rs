pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_socket_addr, Validate};
use std::net::SocketAddr;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "campus-roster")]
#[command(about = "Track students, instructors and course enrollments through a browser")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on, overrides the configuration file
    #[arg(long)]
    pub bind: Option<String>,

    /// Start with empty collections instead of the sample data
    #[arg(long)]
    pub no_seed: bool,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Command line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub bind: Option<String>,
    pub no_seed: bool,
    pub json_logs: bool,
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl From<&CliConfig> for Overrides {
    fn from(cli: &CliConfig) -> Self {
        Self {
            bind: cli.bind.clone(),
            no_seed: cli.no_seed,
            json_logs: cli.json_logs,
            verbose: cli.verbose,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Reads the configuration file, if any, and applies the command line on top.
    pub fn load(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Settings::resolve(file.as_ref(), &Overrides::from(self))
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind: SocketAddr,
    pub seed_sample_data: bool,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            seed_sample_data: true,
            json_logs: false,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Result<Self> {
        if let Some(file) = file {
            file.validate()?;
        }

        let bind = overrides
            .bind
            .as_deref()
            .or_else(|| file.and_then(|f| f.server.bind.as_deref()))
            .unwrap_or(DEFAULT_BIND);
        let bind = validate_socket_addr("bind", bind)?;

        let seed_from_file = file.and_then(|f| f.seed.enabled).unwrap_or(true);
        let json_from_file = file.and_then(|f| f.logging.json).unwrap_or(false);
        let verbose_from_file = file.and_then(|f| f.logging.verbose).unwrap_or(false);

        Ok(Self {
            bind,
            seed_sample_data: seed_from_file && !overrides.no_seed,
            json_logs: json_from_file || overrides.json_logs,
            verbose: verbose_from_file || overrides.verbose,
        })
    }
}

impl ConfigProvider for Settings {
    fn bind_address(&self) -> SocketAddr {
        self.bind
    }

    fn seed_sample_data(&self) -> bool {
        self.seed_sample_data
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}
