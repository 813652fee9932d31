//! Logging for the rentbook client.
//!
//! Every crate in the workspace logs through the macros exported here. Output
//! goes to stderr so that rendered views on stdout stay clean.
//!
//! # Usage
//!
//! ```rust
//! use rentbook_log::{debug, info, warn, error};
//!
//! debug!("Loading listings");
//! info!("Session restored for user {}", 7);
//! warn!("Stored session is not valid JSON, ignoring it");
//! error!(target: "rentbook::api", "Request failed");
//! ```
//!
//! # Environment Variables
//!
//! - `RENTBOOK_DEBUG=1` - Enable debug logging
//! - `RENTBOOK_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level
//! - `RENTBOOK_LOG_FORMAT=pretty|compact|json` - Output format
//! - `RENTBOOK_LOG_COLOR=1|0` - Enable/disable colors
//! - `RENTBOOK_LOG_TIMESTAMPS=1|0` - Prefix lines with a timestamp

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    /// Upper-case level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// Name understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, one field per column
    Pretty,
    /// Short single-line format
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from the environment.
#[derive(Debug)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Pretty,
            color: false,
            timestamps: true,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Build the config from `RENTBOOK_*` variables and publish level/debug
    /// to the global atomics read by the macros.
    pub fn from_env() -> Self {
        let debug = env_flag("RENTBOOK_DEBUG").unwrap_or(false);

        // A CLI prints views on stdout; keep stderr quiet unless asked.
        let level = env::var("RENTBOOK_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Warn });

        let format = env::var("RENTBOOK_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Pretty);

        let color = env_flag("RENTBOOK_LOG_COLOR")
            .unwrap_or_else(|| env::var("NO_COLOR").is_err() && env::var("TERM").is_ok());

        let timestamps = env_flag("RENTBOOK_LOG_TIMESTAMPS").unwrap_or(true);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Force configuration loading. Called by the CLI before anything logs.
pub fn init() {
    Lazy::force(&CONFIG);
}

#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set the minimum level at runtime (`--verbose` / `--quiet`).
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime. Enabling it lowers the level to debug.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Log Output
// ============================================================================

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let config = config();
    let line = match config.format {
        Format::Pretty => format_pretty(level, target, message, config),
        Format::Compact => format_compact(level, target, message, config),
        Format::Json => format_json(level, target, message),
    };

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

fn format_pretty(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
    }

    #[cfg(feature = "color")]
    if config.color {
        line.push_str(&format!("{:5} ", level.colored()));
    } else {
        line.push_str(&format!("{:5} ", level.as_str()));
    }
    #[cfg(not(feature = "color"))]
    line.push_str(&format!("{:5} ", level.as_str()));

    if !target.is_empty() {
        line.push_str(&format!("[{}] ", target));
    }

    line.push_str(message);
    line
}

fn format_compact(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%H:%M:%S ").to_string());
    }
    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');
    if !target.is_empty() {
        line.push_str(target);
        line.push_str(": ");
    }
    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn format_json(level: Level, target: &str, message: &str) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
fn format_json(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":{:?},"message":{:?}}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target,
        message
    )
}

// ============================================================================
// Macros
// ============================================================================

#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a debug message.
///
/// Enabled by `RENTBOOK_DEBUG=1` or `RENTBOOK_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Bridges the HTTP client's `tracing` events into the same level
    //! settings as the macros above.

    use super::*;

    /// Subscriber honouring `RUST_LOG` first, then `RENTBOOK_LOG_LEVEL`.
    pub fn subscriber() -> impl tracing::Subscriber + Send + Sync {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(current_level().as_filter()));

        tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.color),
        )
    }

    /// Install [`subscriber`] as the global default. Returns `false` if one
    /// was already installed.
    pub fn install() -> bool {
        tracing::subscriber::set_global_default(subscriber()).is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("DEBUG".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("none".parse::<Level>(), Ok(Level::Off));
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert_eq!("Compact".parse::<Format>(), Ok(Format::Compact));
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_off_is_never_enabled() {
        let original = current_level();
        set_level(Level::Trace);
        assert!(!is_level_enabled(Level::Off));
        set_level(original);
    }

    #[test]
    fn test_compact_line_shape() {
        let config = LogConfig {
            timestamps: false,
            ..LogConfig::default()
        };
        let line = format_compact(Level::Warn, "rentbook::session", "bad json", &config);
        assert_eq!(line, "W rentbook::session: bad json");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_line_is_valid_json() {
        let line = format_json(Level::Info, "t", "hello \"world\"");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["message"], "hello \"world\"");
    }

    #[test]
    fn test_macros_compile() {
        trace!("trace message");
        debug!("debug message");
        info!(target: "test", "with target {}", 1);
        warn!("warn message");
        error!("error message");
    }
}
