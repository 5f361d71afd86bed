use crate::support::lowercase_keys;
use clap::Args;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base name of the config file, looked up without its extension.
pub const CONFIG_NAME: &str = "tfsinfo2html";

/// Extensions tried, in order, for every search directory.
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml"];

pub const DEFAULT_SAVE_TO_FILE: &str = "changesets.html";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no tfsinfo2html config file found (searched: {searched})")]
    NotFound { searched: String },
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML config file {}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to parse JSON config file {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse YAML config file {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("config file {} does not hold a table of settings", .path.display())]
    NotATable { path: PathBuf },
}

/// Command-line flags. Each one falls back to its environment variable, and
/// anything left unset keeps the value from the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Config file to use instead of searching $HOME and the working directory
    #[arg(long, env = "TFSINFO2HTML_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reporting service endpoint the changeset query is POSTed to
    #[arg(long, env = "TFSREQUEST_SERVICEURL")]
    pub service_url: Option<String>,

    /// TFS collection URL
    #[arg(long, env = "TFSREQUEST_TFSURL")]
    pub tfs_url: Option<String>,

    /// Team project URL
    #[arg(long, env = "TFSREQUEST_PROJECTURL")]
    pub project_url: Option<String>,

    /// TFS user name
    #[arg(long, env = "TFSREQUEST_USER")]
    pub user: Option<String>,

    /// TFS password
    #[arg(long, env = "TFSREQUEST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// First day of the changeset range
    #[arg(long, env = "TFSREQUEST_STARTDATE")]
    pub start_date: Option<String>,

    /// Last day of the changeset range
    #[arg(long, env = "TFSREQUEST_ENDDATE")]
    pub end_date: Option<String>,

    /// File the HTML fragment is written to
    #[arg(long, env = "SAVETOFILE")]
    pub save_to_file: Option<PathBuf>,
}

/// Merged, read-only view of defaults, config file, environment and flags.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub tfs_url: String,
    pub project_url: String,
    pub user: String,
    pub password: String,
    pub start_date: String,
    pub end_date: String,
    pub save_to_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            tfs_url: String::new(),
            project_url: String::new(),
            user: String::new(),
            password: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            save_to_file: PathBuf::from(DEFAULT_SAVE_TO_FILE),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("service_url", &self.service_url)
            .field("tfs_url", &self.tfs_url)
            .field("project_url", &self.project_url)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("save_to_file", &self.save_to_file)
            .finish()
    }
}

/// Masks a secret for log output, keeping empty values visibly empty.
pub fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "********" }
}

impl Settings {
    /// Locates the config file (or uses `--config`), then layers it and the
    /// overrides on top of the defaults.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        log::info!("Initializing configuration...");
        let path = match &overrides.config {
            Some(path) => path.clone(),
            None => locate_config(&default_search_dirs())?,
        };
        Self::load_from(&path, overrides)
    }

    pub fn load_from(path: &Path, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        log::info!("Using config file: {}", path.display());
        let tree = read_config_file(path)?;

        let mut settings = Self::default();
        settings.apply_file(&tree);
        settings.apply_overrides(overrides);
        log::debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }

    fn apply_file(&mut self, tree: &Value) {
        overlay(&mut self.service_url, lookup(tree, "tfsrequest.serviceurl"));
        overlay(&mut self.tfs_url, lookup(tree, "tfsrequest.tfsurl"));
        overlay(&mut self.project_url, lookup(tree, "tfsrequest.projecturl"));
        overlay(&mut self.user, lookup(tree, "tfsrequest.user"));
        overlay(&mut self.password, lookup(tree, "tfsrequest.password"));
        overlay(&mut self.start_date, lookup(tree, "tfsrequest.startdate"));
        overlay(&mut self.end_date, lookup(tree, "tfsrequest.enddate"));
        if let Some(path) = lookup(tree, "savetofile") {
            self.save_to_file = PathBuf::from(path);
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        overlay(&mut self.service_url, overrides.service_url.clone());
        overlay(&mut self.tfs_url, overrides.tfs_url.clone());
        overlay(&mut self.project_url, overrides.project_url.clone());
        overlay(&mut self.user, overrides.user.clone());
        overlay(&mut self.password, overrides.password.clone());
        overlay(&mut self.start_date, overrides.start_date.clone());
        overlay(&mut self.end_date, overrides.end_date.clone());
        if let Some(path) = &overrides.save_to_file {
            self.save_to_file = path.clone();
        }
    }
}

fn overlay(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Reads a dotted key such as `tfsrequest.serviceurl` from the lowercased
/// config tree. Scalars are taken as their text; tables, arrays and `null`
/// count as unset.
fn lookup(tree: &Value, key: &str) -> Option<String> {
    let mut node = tree;
    for part in key.split('.') {
        node = node.get(part)?;
    }
    match node {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Home directory first, then the working directory.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::with_capacity(2);
    if let Some(home) = dirs::home_dir() {
        search.push(home);
    }
    search.push(PathBuf::from("."));
    search
}

/// Returns the first `tfsinfo2html.<ext>` found, trying every extension in a
/// directory before moving on to the next one.
pub fn locate_config(search_dirs: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    for dir in search_dirs {
        for ext in CONFIG_EXTENSIONS {
            let candidate = dir.join(format!("{}.{}", CONFIG_NAME, ext));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    let searched = search_dirs
        .iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ConfigError::NotFound { searched })
}

/// Parses the file by its extension (TOML unless it says otherwise) into a
/// tree whose keys are all lowercase.
fn read_config_file(path: &Path) -> Result<Value, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let tree = match ext.as_deref() {
        Some("json") => serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        // An empty YAML document has no table at all; treat it as an empty one.
        Some("yaml" | "yml") if contents.trim().is_empty() => Value::Object(Default::default()),
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => {
            let table: toml::Table =
                toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    if !tree.is_object() {
        return Err(ConfigError::NotATable {
            path: path.to_path_buf(),
        });
    }
    Ok(lowercase_keys(tree))
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::from(number),
        toml::Value::Float(number) => Value::from(number),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        // Unquoted TOML dates are kept as the text that was written.
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
