use crate::domain::model::{LogLevel, LogLine};
use crate::domain::ports::LogSink;
use std::sync::{Arc, Mutex};

/// 把每一行轉成 tracing 事件，給 binary 使用
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, line: LogLine) {
        match line.level {
            LogLevel::Info => tracing::info!("{}", line.message),
            LogLevel::Error => tracing::error!("{}", line.message),
        }
    }
}

/// 記錄所有寫入的行，clone 之後共用同一份緩衝
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|line| line.message).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.level == LogLevel::Error)
            .map(|line| line.message)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, line: LogLine) {
        // 同時送到 tracing，測試開 RUST_LOG 時才看得到執行順序
        tracing::debug!(sink_level = ?line.level, "{}", line.message);
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line);
    }
}
