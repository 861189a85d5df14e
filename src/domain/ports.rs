use crate::domain::model::LogLine;
use std::sync::Arc;

/// 主控台的抽象：示範程式的所有可觀察輸出都經過這裡
pub trait LogSink: Send + Sync {
    fn write(&self, line: LogLine);

    fn log(&self, message: &str) {
        self.write(LogLine::info(message));
    }

    fn error(&self, message: &str) {
        self.write(LogLine::error(message));
    }
}

pub type SharedSink = Arc<dyn LogSink>;
