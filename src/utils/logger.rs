use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// 沒設 RUST_LOG 時使用的 filter
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "deferred_fetch=debug,info"
    } else {
        "deferred_fetch=info"
    }
}

/// 安裝全域 subscriber；已經有 subscriber 時回傳錯誤而不是 panic
pub fn try_init_logger(verbose: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // 不顯示 target 與檔名位置
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
}

pub fn init_logger(verbose: bool) {
    if let Err(e) = try_init_logger(verbose) {
        tracing::warn!("Logger already installed: {}", e);
    }
}
