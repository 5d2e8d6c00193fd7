//! 日志初始化
//!
//! 优先使用 `RUST_LOG`，未设置时默认 `info`，详细模式下为 `debug`

use tracing_subscriber::EnvFilter;

/// 初始化日志（默认级别 info）
pub fn init() {
    init_with_verbose(false);
}

/// 初始化日志
///
/// 重复调用不会 panic（测试中可能多次初始化）
pub fn init_with_verbose(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
