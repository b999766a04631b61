use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use panel_engine::{CsrfToken, EngineSettings};
use panel_logging::panel_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "./import_panel.ron";

#[derive(Debug, Parser)]
#[command(name = "import_panel", about = "Import zipped assets into a project")]
pub struct Cli {
    /// RON file with server and project settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Base URL of the server, overrides the config file.
    #[arg(long)]
    pub server: Option<String>,
    /// Project receiving the imported task, overrides the config file.
    #[arg(long)]
    pub project_id: Option<u64>,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("no project id given; set project_id in the config file or pass --project-id")]
    MissingProjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfConfig {
    pub header: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub project_id: Option<u64>,
    pub csrf: Option<CsrfConfig>,
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            project_id: None,
            csrf: None,
            connect_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Reads the config file, then applies command line overrides.
    ///
    /// The default path may be absent; an explicitly requested one may not.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::load_optional(Path::new(DEFAULT_CONFIG_PATH))?,
        };
        if let Some(server) = &cli.server {
            config.server_url = server.clone();
        }
        if let Some(project_id) = cli.project_id {
            config.project_id = Some(project_id);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        panel_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn engine_settings(&self) -> Result<EngineSettings, ConfigError> {
        let project_id = self.project_id.ok_or(ConfigError::MissingProjectId)?;
        let mut settings = EngineSettings::new(self.server_url.clone(), project_id);
        settings.csrf = self.csrf.as_ref().map(|csrf| CsrfToken {
            header: csrf.header.clone(),
            token: csrf.token.clone(),
        });
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs.max(1));
        Ok(settings)
    }
}
