//! Logging System
//!
//! Structured logging on `tracing`. Every setting is resolved through one
//! precedence chain: command line, then `DOCTREE_LOG*` environment
//! variables, then the config file, then built-in defaults.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_FILTER: &str = "DOCTREE_LOG";
const ENV_FORMAT: &str = "DOCTREE_LOG_FORMAT";
const ENV_OUTPUT: &str = "DOCTREE_LOG_OUTPUT";
const ENV_FILE: &str = "DOCTREE_LOG_FILE";
const ENV_MODULES: &str = "DOCTREE_LOG_MODULES";

/// Logging configuration as read from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use runtime default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Logging flags given on the command line. Each one beats every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOverrides {
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

/// Environment variable lookup; empty values count as unset.
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Output destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

impl OutputDestinations {
    fn parse(value: &str) -> Result<Self, ApiError> {
        let (stdout, stderr, file) = match value {
            "stdout" => (true, false, false),
            "stderr" => (false, true, false),
            "file" => (false, false, true),
            "file+stderr" => (false, true, true),
            "both" => (true, true, false),
            other => {
                return Err(ApiError::ConfigError(format!(
                    "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                    other
                )))
            }
        };
        Ok(Self {
            stdout,
            stderr,
            file,
        })
    }
}

/// Settings after every source has been applied.
#[derive(Debug, Clone, PartialEq)]
struct ResolvedLogging {
    directives: String,
    format: LogFormat,
    output: OutputDestinations,
    file: Option<PathBuf>,
    color: bool,
}

/// First value present in command line, environment, config order.
fn first_of(cli: Option<&str>, env: Option<String>, config: Option<&str>) -> Option<String> {
    cli.map(str::to_string)
        .or(env)
        .or_else(|| config.map(str::to_string))
}

fn resolve(
    config: Option<&LoggingConfig>,
    cli: &LogOverrides,
    env: EnvLookup<'_>,
) -> Result<ResolvedLogging, ApiError> {
    let format = first_of(
        cli.format.as_deref(),
        env(ENV_FORMAT),
        config.map(|c| c.format.as_str()),
    )
    .unwrap_or_else(default_format);
    let output = first_of(
        cli.output.as_deref(),
        env(ENV_OUTPUT),
        config.map(|c| c.output.as_str()),
    )
    .unwrap_or_else(default_output);
    let format = LogFormat::parse(&format)?;
    let output = OutputDestinations::parse(&output)?;

    let file = if output.file {
        Some(resolve_log_file_with(
            cli.file.clone(),
            config.and_then(|c| c.file.clone()),
            env,
        )?)
    } else {
        None
    };

    let color = config.map(|c| c.color).unwrap_or(true)
        && format == LogFormat::Text
        && !output.file
        && env("NO_COLOR").is_none();

    Ok(ResolvedLogging {
        directives: resolve_directives(config, cli, env),
        format,
        output,
        file,
        color,
    })
}

/// Filter directives. A `DOCTREE_LOG` value is used verbatim unless a level
/// was given on the command line; otherwise module levels from the config
/// and `DOCTREE_LOG_MODULES` are appended to the base level.
fn resolve_directives(
    config: Option<&LoggingConfig>,
    cli: &LogOverrides,
    env: EnvLookup<'_>,
) -> String {
    let level = match (cli.level.as_deref(), env(ENV_FILTER)) {
        (Some(level), _) => level.to_string(),
        (None, Some(directives)) => return directives,
        (None, None) => config
            .map(|c| c.level.clone())
            .unwrap_or_else(default_log_level),
    };
    if level == "off" {
        return level;
    }

    let mut directives = vec![level];
    if let Some(config) = config {
        let mut modules: Vec<_> = config.modules.iter().collect();
        modules.sort();
        directives.extend(
            modules
                .into_iter()
                .map(|(module, module_level)| format!("{}={}", module, module_level)),
        );
    }
    if let Some(modules) = env(ENV_MODULES) {
        directives.extend(modules.split(',').filter_map(|spec| {
            spec.split_once('=')
                .map(|(module, module_level)| format!("{}={}", module.trim(), module_level.trim()))
        }));
    }
    directives.join(",")
}

/// Resolve the log file path with precedence: CLI, DOCTREE_LOG_FILE env, config file, default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    resolve_log_file_with(cli_file, config_file, &process_env)
}

fn resolve_log_file_with(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    env: EnvLookup<'_>,
) -> Result<PathBuf, ApiError> {
    let non_empty = |p: &PathBuf| !p.as_os_str().is_empty();
    if let Some(path) = cli_file
        .filter(non_empty)
        .or_else(|| env(ENV_FILE).map(PathBuf::from))
        .or_else(|| config_file.filter(non_empty))
    {
        return Ok(path);
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "doctree", "doctree").ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine platform state directory for log file".to_string(),
        )
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.cache_dir())
        .to_path_buf();
    Ok(dir.join("doctree.log"))
}

/// Install the global subscriber.
///
/// `cli` holds the command-line flags; they take precedence over the
/// `DOCTREE_LOG*` environment variables, which in turn beat `config`.
pub fn init_logging(config: Option<&LoggingConfig>, cli: &LogOverrides) -> Result<(), ApiError> {
    let install_error = |e: tracing_subscriber::util::TryInitError| {
        ApiError::ConfigError(format!("Failed to install logger: {}", e))
    };

    if config.is_some_and(|c| !c.enabled) {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
            .map_err(install_error);
    }

    let settings = resolve(config, cli, &process_env)?;
    let filter = EnvFilter::try_new(&settings.directives).map_err(|e| {
        ApiError::ConfigError(format!(
            "Invalid log directive {:?}: {}",
            settings.directives, e
        ))
    })?;
    let writer = build_writer(&settings)?;

    let base_subscriber = Registry::default().with(filter);
    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    let result = match settings.format {
        LogFormat::Json => base_subscriber.with(layer.json()).try_init(),
        LogFormat::Text => base_subscriber
            .with(layer.with_ansi(settings.color))
            .try_init(),
    };
    result.map_err(install_error)
}

fn build_writer(settings: &ResolvedLogging) -> Result<BoxMakeWriter, ApiError> {
    let output = settings.output;
    if let Some(path) = settings.file.as_ref().filter(|_| output.file) {
        let file = Arc::new(open_log_file(path)?);
        return Ok(if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        });
    }
    Ok(match (output.stdout, output.stderr) {
        (true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (true, false) => BoxMakeWriter::new(std::io::stdout),
        _ => BoxMakeWriter::new(std::io::stderr),
    })
}

fn open_log_file(path: &Path) -> Result<std::fs::File, ApiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}
