//! Bounded in-process log shared by the codec and the extractor.
//!
//! Messages are kept in memory so that callers (a CLI, a simulation harness)
//! decide how to present them. Use the `log_*!` macros rather than calling
//! the logger directly.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Success => "OK",
        };
        write!(f, "{}", tag)
    }
}

#[derive(Debug, Clone)]
pub struct LogMessage {
    pub timestamp: chrono::DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message,
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {:<5} {}", self.formatted_timestamp(), self.level, self.message)
    }
}

pub struct Logger {
    messages: Mutex<Vec<LogMessage>>,
    max_messages: usize,
}

impl Logger {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            max_messages,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogMessage>> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let mut messages = self.lock();
        messages.push(LogMessage::new(level, message.as_ref().to_string()));

        if messages.len() > self.max_messages {
            let to_remove = messages.len() - self.max_messages;
            messages.drain(0..to_remove);
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Success, message);
    }

    pub fn get_messages(&self) -> Vec<LogMessage> {
        self.lock().clone()
    }

    /// Remove and return all buffered messages.
    pub fn drain(&self) -> Vec<LogMessage> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

const DEFAULT_MAX_MESSAGES: usize = 1000;

lazy_static::lazy_static! {
    static ref GLOBAL_LOGGER: Arc<Logger> = Arc::new(Logger::new(DEFAULT_MAX_MESSAGES));
}

static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::SeqCst)
}

pub fn get_logger() -> Arc<Logger> {
    GLOBAL_LOGGER.clone()
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::logging::get_logger().info(message);
    }}
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::logging::get_logger().warning(message);
    }}
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::logging::get_logger().error(message);
    }}
}

#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::logging::get_logger().success(message);
    }}
}

#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => {{
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::get_logger().info(message);
        }
    }}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_is_bounded() {
        let logger = Logger::new(3);
        for i in 0..5 {
            logger.info(format!("message {}", i));
        }
        let messages = logger.get_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].message, "message 2", "Oldest messages should be dropped first");
    }

    #[test]
    fn test_logger_drain_empties_buffer() {
        let logger = Logger::new(10);
        logger.warning("w");
        logger.error("e");
        let drained = logger.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].level, LogLevel::Error);
        assert!(logger.get_messages().is_empty());
    }

    #[test]
    fn test_log_message_display() {
        let msg = LogMessage::new(LogLevel::Success, "wrote file".to_string());
        let line = msg.to_string();
        assert!(line.contains("OK"));
        assert!(line.ends_with("wrote file"));
    }
}
