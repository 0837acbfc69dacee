pub use Common::utils::logging::{console, LogEntry, LogLevel};
pub use crate::{logging_debug, logging_information, logging_notice, logging_warning, logging_error, logging_critical, logging_alert, logging_emergency};

use uuid::Uuid;
use lazy_static::lazy_static;
use chrono::{DateTime, Local};
use std::collections::{HashMap, VecDeque};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref LOGGER: RwLock<Logger> = RwLock::new(Logger::new());
}

pub struct Logger {
    system_log: VecDeque<LogEntry>,
    session_log: HashMap<Uuid, VecDeque<LogEntry>>,
}

impl Logger {
    fn new() -> Self {
        let mut system_log = VecDeque::new();
        system_log.push_back(LogEntry::new(LogLevel::Information, "Logger", "Online now", ""));
        Self {
            system_log,
            session_log: HashMap::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Logger> {
        LOGGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Logger> {
        LOGGER.write().await
    }

    pub async fn add_system_log<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, source: T, message: U, detail: V) {
        let log_entry = LogEntry::new(level, source, message, detail);
        console(&log_entry);
        let mut logger = Self::instance_mut().await;
        logger.system_log.push_back(log_entry);
    }

    pub async fn add_session_log<T: Into<String>, U: Into<String>, V: Into<String>>(session_id: Uuid, level: LogLevel, source: T, message: U, detail: V) {
        let log_entry = LogEntry::new(level, source, message, detail);
        console(&log_entry);
        let mut logger = Self::instance_mut().await;
        logger.session_log.entry(session_id).or_insert_with(VecDeque::new).push_back(log_entry);
    }

    pub async fn remove_session_log(session_id: Uuid) {
        let mut logger = Self::instance_mut().await;
        logger.session_log.remove(&session_id);
    }

    pub async fn get_system_logs() -> VecDeque<LogEntry> {
        Self::instance().await.system_log.clone()
    }

    pub async fn get_session_logs(session_id: Uuid) -> Option<VecDeque<LogEntry>> {
        let logger = Self::instance().await;
        logger.session_log.get(&session_id).cloned()
    }

    pub async fn get_system_logs_since(time: DateTime<Local>) -> VecDeque<LogEntry> {
        let logger = Self::instance().await;
        logger.system_log.iter().filter(|entry| entry.timestamp > time).cloned().collect()
    }

    pub async fn get_session_logs_since(session_id: Uuid, time: DateTime<Local>) -> Option<VecDeque<LogEntry>> {
        let logger = Self::instance().await;
        let logs = logger.session_log.get(&session_id)?;
        Some(logs.iter().filter(|entry| entry.timestamp > time).cloned().collect())
    }

    pub fn format_logs(logs: &VecDeque<LogEntry>) -> String {
        logs.iter().map(LogEntry::to_string).collect::<Vec<_>>().join("\n")
    }
}

#[macro_export]
macro_rules! logging_debug {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Debug, $source, $message, format!("{}:{}", file!(), line!())).await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Debug, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Debug, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
}

#[macro_export]
macro_rules! logging_information {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Information, $source, $message, "").await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Information, $source, $message, $detail).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Information, $source, $message, $detail).await
    };
}

#[macro_export]
macro_rules! logging_notice {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Notice, $source, $message, "").await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Notice, $source, $message, $detail).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Notice, $source, $message, $detail).await
    };
}

#[macro_export]
macro_rules! logging_warning {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Warning, $source, $message, format!("{}:{}", file!(), line!())).await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Warning, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Warning, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
}

#[macro_export]
macro_rules! logging_error {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Error, $source, $message, format!("{}:{}", file!(), line!())).await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Error, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Error, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
}

#[macro_export]
macro_rules! logging_critical {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Critical, $source, $message, format!("{}:{}", file!(), line!())).await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Critical, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Critical, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
}

#[macro_export]
macro_rules! logging_alert {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Alert, $source, $message, format!("{}:{}", file!(), line!())).await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Alert, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Alert, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
}

#[macro_export]
macro_rules! logging_emergency {
    ($source:expr, $message:expr) => {
        Logger::add_system_log(LogLevel::Emergency, $source, $message, format!("{}:{}", file!(), line!())).await
    };
    ($source:expr, $message:expr, $detail:expr) => {
        Logger::add_system_log(LogLevel::Emergency, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
    ($uuid:expr, $source:expr, $message:expr, $detail:expr) => {
        Logger::add_session_log($uuid, LogLevel::Emergency, $source, $message, format!("{}:{} {}", file!(), line!(), $detail)).await
    };
}
