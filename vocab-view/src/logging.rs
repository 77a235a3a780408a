use flexi_logger::{Logger, LoggerHandle};

/// Starts stderr logging. `RUST_LOG` wins over `level` when set.
///
/// Logging stops when the returned handle is dropped.
pub fn init(level: &str) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()?;
    log::info!(
        "event=app_start module=view status=ok platform={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
