pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::router;
pub use config::Settings;
pub use crate::core::{Directory, DirectoryState};
pub use utils::error::{RegistryError, Result};
