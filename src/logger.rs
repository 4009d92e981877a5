use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 通过 `RUST_LOG` 环境变量控制级别，默认 `info`。
/// 重复调用是安全的（测试中多处初始化时只有第一次生效）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
