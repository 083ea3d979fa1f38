use std::io;
use crate::models::walk::{Action, WalkSummary};

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root: String,
    pub ext: String,
    pub min_size: u64,
    pub action: Action,
    pub log_file: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 走訪執行的 Port
pub trait WalkPort {
    fn execute(&self, config: AppConfig) -> io::Result<WalkSummary>;
}
