use std::io;
use crate::config::config::validate_root_path;
use crate::config::ports::{AppConfig, ConfigPort};

// 配置服務，取得配置後確認根目錄存在
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        let config = self.config_port.get_config()?;
        validate_root_path(&config.root)?;
        Ok(config)
    }
}
