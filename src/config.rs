//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file given
//! with `--config`, then command line flags (and the `LISTEN` environment
//! variable). The result is built once at startup and shared read-only.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::fs::path::normalize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("cannot resolve directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Command line flags.
#[derive(Debug, Parser)]
#[command(name = "harbor")]
#[command(about = "Minimal HTTP/1.1 file and echo server")]
pub struct Cli {
    /// Directory served and written by the /files/ routes
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Optional YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Contents of the optional YAML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub listen_addr: Option<String>,
    pub directory: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &text)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Absolute, normalized base directory for `/files/*`. `None` disables
    /// those routes.
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the process arguments.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, anyhow::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Ok(Self::from_cli(cli)?)
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };

        let listen_addr = cli
            .listen
            .or(file.listen_addr)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let directory = match cli.directory.or(file.directory) {
            Some(dir) => Some(absolute_dir(&dir)?),
            None => None,
        };

        Ok(Self {
            listen_addr,
            directory,
        })
    }

    pub fn with_directory(mut self, dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        self.directory = Some(absolute_dir(dir.as_ref())?);
        Ok(self)
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(dir)
        .map(|abs| normalize(&abs))
        .map_err(|source| ConfigError::Directory {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_directory_becomes_absolute() {
        let cfg = Config::default().with_directory("some/./dir/..").unwrap();
        let dir = cfg.directory.unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("some"));
    }
}
