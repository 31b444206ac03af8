//! Logging configuration and notice sinks for adtkit.
//!
//! Data structures in this workspace never fail on advisory conditions; they
//! hand a [`LogEntry`] to a [`NoticeSink`] instead. [`LogFacade`] forwards
//! entries into the `log` crate, [`LogCollector`] keeps them in memory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Log level for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn verbosity(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }

    /// Check if this level should log messages at the given level
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.verbosity() >= level.verbosity()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        };
        f.write_str(s)
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level to output
    #[serde(default)]
    pub level: LogLevel,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
    /// Component-specific log levels
    #[serde(default)]
    pub component_levels: HashMap<String, LogLevel>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_component_level(mut self, component: impl Into<String>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Get the effective log level for a component
    pub fn effective_level(&self, component: Option<&str>) -> LogLevel {
        component
            .and_then(|c| self.component_levels.get(c).copied())
            .unwrap_or(self.level)
    }

    /// Check if a message at the given level should be logged
    pub fn should_log(&self, level: LogLevel, component: Option<&str>) -> bool {
        self.effective_level(component).should_log(level)
    }
}

/// A log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level,
            component: None,
            message: message.into(),
        }
    }

    pub fn with_component(
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::new(level, message)
        }
    }

    /// Render this entry as a single line.
    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Plain => match &self.component {
                Some(c) => format!("{} {} [{}] {}", self.timestamp, self.level, c, self.message),
                None => format!("{} {} {}", self.timestamp, self.level, self.message),
            },
            LogFormat::Compact => match &self.component {
                Some(c) => format!("{} {}: {}", self.level, c, self.message),
                None => format!("{} {}", self.level, self.message),
            },
            // Plain fields only; serialization cannot fail.
            LogFormat::Json => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// Receiver for non-fatal notices emitted by data structures.
pub trait NoticeSink {
    fn notice(&mut self, entry: LogEntry);
}

impl<S: NoticeSink + ?Sized> NoticeSink for &mut S {
    fn notice(&mut self, entry: LogEntry) {
        (**self).notice(entry);
    }
}

/// Sink that forwards every entry to the `log` facade, using the entry's
/// component as the log target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl NoticeSink for LogFacade {
    fn notice(&mut self, entry: LogEntry) {
        let target = entry.component.as_deref().unwrap_or("adtkit");
        let level = log::Level::from(entry.level);
        log::log!(target: target, level, "{}", entry.message);
    }
}

/// Log collector for capturing log entries
#[derive(Debug, Default)]
pub struct LogCollector {
    entries: Vec<LogEntry>,
    config: Option<LoggingConfig>,
}

impl LogCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector that drops entries the config would not log.
    pub fn with_config(config: LoggingConfig) -> Self {
        Self {
            entries: Vec::new(),
            config: Some(config),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if let Some(config) = &self.config {
            if !config.should_log(entry.level, entry.component.as_deref()) {
                return;
            }
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Render all entries using the configured format (plain by default).
    pub fn render(&self) -> Vec<String> {
        let format = self.config.as_ref().map(|c| c.format).unwrap_or_default();
        self.entries.iter().map(|e| e.render(format)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl NoticeSink for LogCollector {
    fn notice(&mut self, entry: LogEntry) {
        self.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(level: LogLevel, component: Option<&str>, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            level,
            component: component.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn log_level_ordering() {
        assert!(LogLevel::Info.should_log(LogLevel::Info));
        assert!(LogLevel::Info.should_log(LogLevel::Warn));
        assert!(LogLevel::Info.should_log(LogLevel::Error));
        assert!(!LogLevel::Info.should_log(LogLevel::Debug));
    }

    #[test]
    fn logging_config_component_levels() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Warn)
            .with_component_level("adtkit::segment", LogLevel::Error);

        assert!(!config.should_log(LogLevel::Info, None));
        assert!(config.should_log(LogLevel::Warn, Some("adtkit::heap")));
        assert!(!config.should_log(LogLevel::Warn, Some("adtkit::segment")));
    }

    #[test]
    fn logging_config_from_json() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level":"debug","format":"compact"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.component_levels.is_empty());
    }

    #[test]
    fn log_entry_with_component() {
        let entry = LogEntry::with_component(LogLevel::Debug, "adtkit::heap", "sift");
        assert_eq!(entry.component.as_deref(), Some("adtkit::heap"));
        assert!(!entry.timestamp.is_empty());
    }

    #[test]
    fn log_entry_render_formats() {
        let entry = fixed(LogLevel::Warn, Some("adtkit::segment"), "use a fenwick tree");
        insta::assert_snapshot!(
            entry.render(LogFormat::Plain),
            @"2024-01-01T00:00:00+00:00 WARN [adtkit::segment] use a fenwick tree"
        );
        insta::assert_snapshot!(
            entry.render(LogFormat::Compact),
            @"WARN adtkit::segment: use a fenwick tree"
        );
        insta::assert_snapshot!(
            entry.render(LogFormat::Json),
            @r#"{"timestamp":"2024-01-01T00:00:00+00:00","level":"warn","component":"adtkit::segment","message":"use a fenwick tree"}"#
        );
    }

    #[test]
    fn log_collector_filters_by_config() {
        let mut collector = LogCollector::with_config(LoggingConfig::new().with_level(LogLevel::Warn));

        collector.notice(fixed(LogLevel::Info, None, "dropped"));
        collector.notice(fixed(LogLevel::Warn, None, "kept"));
        collector.notice(fixed(LogLevel::Error, None, "kept too"));

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.filter_by_level(LogLevel::Error).len(), 1);

        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn log_facade_accepts_entries_without_logger() {
        let mut sink = LogFacade;
        sink.notice(fixed(LogLevel::Warn, Some("adtkit::segment"), "no logger installed"));
    }
}
