//! Command-line arguments, layered over an optional TOML settings file.
//!
//! A value given on the command line wins over the file, and the file wins
//! over the built-in default.

use std::{
    fs, io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{ArgAction, Parser};
use serde::Deserialize;
use thiserror::Error;

use fixpoint_plot::DEFAULT_SAMPLES;

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Find roots by fixed-point iteration and watch the iterates.
#[derive(Debug, Parser)]
#[command(name = "fixpoint", version, about, long_about = None)]
pub struct Args {
    /// Address the compute endpoint listens on [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port the compute endpoint listens on [default: 3030]
    #[arg(long)]
    pub port: Option<u16>,

    /// How often the display checks for new results [default: 100]
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Number of points sampled along each plotted curve [default: 200]
    #[arg(long)]
    pub samples: Option<usize>,

    /// Log results instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Settings as they appear in a TOML file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub poll_interval_ms: Option<u64>,
    pub samples: Option<usize>,
    pub headless: Option<bool>,
}

impl FileSettings {
    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// these settings.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

/// Errors from resolving [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("poll interval must be at least 1 ms")]
    PollInterval,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Where the compute endpoint listens.
    pub addr: SocketAddr,
    /// Period of the display's poll loop.
    pub poll_interval: Duration,
    /// Curve samples per plot.
    pub samples: usize,
    /// Whether to skip the window and log results instead.
    pub headless: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            samples: DEFAULT_SAMPLES,
            headless: false,
        }
    }
}

impl Settings {
    /// Resolves settings from arguments and the settings file they name.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or a resolved
    /// value is out of range.
    pub fn resolve(args: &Args) -> Result<Self, SettingsError> {
        let file = match &args.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::layer(args, &file)
    }

    /// Layers arguments over file settings over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PollInterval`] if the poll interval is zero.
    pub fn layer(args: &Args, file: &FileSettings) -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let host = args.host.or(file.host).unwrap_or(defaults.addr.ip());
        let port = args.port.or(file.port).unwrap_or(defaults.addr.port());

        let poll_interval_ms = args
            .poll_interval_ms
            .or(file.poll_interval_ms)
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if poll_interval_ms == 0 {
            return Err(SettingsError::PollInterval);
        }

        let samples = args
            .samples
            .or(file.samples)
            .unwrap_or(defaults.samples)
            .max(2);

        Ok(Self {
            addr: SocketAddr::new(host, port),
            poll_interval: Duration::from_millis(poll_interval_ms),
            samples,
            headless: args.headless || file.headless.unwrap_or(defaults.headless),
        })
    }
}
