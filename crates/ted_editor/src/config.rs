use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use log::LevelFilter;
use ted_buffer::INITIAL_CAPACITY;

const LOG_FILE_NAME: &str = "ted.log";

#[derive(Parser, Debug)]
#[command(version, about = "A small terminal text editor")]
pub struct Cli {
    /// Where to write the log. Defaults to the user data directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Least severe log level to record.
    #[arg(long, default_value = "debug")]
    pub log_level: LevelFilter,

    /// Initial size of the text buffer, in bytes.
    #[arg(long, default_value_t = INITIAL_CAPACITY)]
    pub capacity: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub capacity: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,

    #[error("couldn't create log directory {}", path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Config {
    /// Validate the command line and fill in defaults, creating the log
    /// file's directory if needed.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let log_file = cli.log_file.unwrap_or_else(default_log_file);

        if let Some(dir) = log_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigError::LogDir {
                path: dir.to_owned(),
                source,
            })?;
        }

        Ok(Self {
            log_file,
            log_level: cli.log_level,
            capacity: cli.capacity,
        })
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ted")
}

fn default_log_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(LOG_FILE_NAME),
        None => PathBuf::from(LOG_FILE_NAME),
    }
}
