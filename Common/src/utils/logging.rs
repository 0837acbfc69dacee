use colored::*;
use std::fmt::Display;
use chrono::{DateTime, Local};

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Information,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    //Padded to a fixed width so console lines stay aligned.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug      ",
            LogLevel::Information => "Information",
            LogLevel::Notice => "Notice     ",
            LogLevel::Warning => "Warning    ",
            LogLevel::Error => "Error      ",
            LogLevel::Critical => "Critical   ",
            LogLevel::Alert => "Alert      ",
            LogLevel::Emergency => "Emergency  ",
        }
    }

    pub fn colored_label(&self) -> ColoredString {
        match self {
            LogLevel::Debug => self.label().bright_black(),
            LogLevel::Information => self.label().bright_blue(),
            LogLevel::Notice => self.label().bright_green(),
            LogLevel::Warning => self.label().yellow(),
            LogLevel::Error => self.label().bright_red(),
            LogLevel::Critical => self.label().bright_yellow(),
            LogLevel::Alert => self.label().red(),
            LogLevel::Emergency => self.label().magenta(),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub source: String,
    pub message: String,
    pub detail: String,
}

impl LogEntry {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, source: T, message: U, detail: V) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            source: source.into(),
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn to_plain_string(&self) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        if self.detail.is_empty() {
            format!("[{level}] {timestamp} {source}: {message}", level = self.level, source = self.source, message = self.message)
        } else {
            format!("[{level}] {timestamp} {source}: {message}\n{detail}", level = self.level, source = self.source, message = self.message, detail = self.detail)
        }
    }

    pub fn to_colored_string(&self) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        let level = self.level.colored_label();
        let source = self.source.cyan();
        let message = self.message.white();
        if self.detail.is_empty() {
            format!("[{level}] {timestamp} {source}: {message}")
        } else {
            let detail = self.detail.bright_black();
            format!("[{level}] {timestamp} {source}: {message}\n{detail}")
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

pub fn console(log_entry: &LogEntry) {
    println!("{}", log_entry.to_colored_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_contains_source_and_message() {
        let log_entry = LogEntry::new(LogLevel::Information, "Session Manager", "Online now", "");
        let rendered = log_entry.to_plain_string();
        assert!(rendered.contains("Session Manager: Online now"));
        assert!(rendered.contains("[Information]"));
    }

    #[test]
    fn detail_renders_on_second_line() {
        let log_entry = LogEntry::new(LogLevel::Error, "Exporter", "Write failed", "disk full");
        let rendered = log_entry.to_plain_string();
        assert!(rendered.ends_with("\ndisk full"));
    }

    #[test]
    fn labels_share_fixed_width() {
        let width = LogLevel::Information.label().len();
        for level in [LogLevel::Debug, LogLevel::Notice, LogLevel::Warning, LogLevel::Error,
            LogLevel::Critical, LogLevel::Alert, LogLevel::Emergency] {
            assert_eq!(level.label().len(), width);
        }
    }
}
