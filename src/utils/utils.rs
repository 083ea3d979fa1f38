use std::io;
use chrono::Local;

// 刪除紀錄固定使用的時間格式
pub const DELETION_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("無法初始化日誌: {}", e)))?;
    Ok(())
}

pub fn deletion_timestamp() -> String {
    Local::now().format(DELETION_TIMESTAMP_FORMAT).to_string()
}
