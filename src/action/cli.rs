use std::io;
use clap::Parser;
use crate::config::config::Cli;
use crate::config::ports::{AppConfig, ConfigPort, WalkPort};
use crate::models::walk::{Action, WalkSummary};
use crate::service::config_service::ConfigService;
use crate::service::walk_service::WalkAdapter;
use crate::utils::utils::setup_logging;

pub fn process_cli_mode() -> io::Result<WalkSummary> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli)));
    let config = config_service.get_config()?;

    let walk_port: Box<dyn WalkPort> = Box::new(WalkAdapter);
    walk_port.execute(config)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let action = Action::from_flags(self.cli.list, self.cli.del, &self.cli.archive);

        // 被較高優先旗標覆蓋的旗標不會執行
        match action {
            Action::List => {
                if self.cli.del {
                    log::warn!("已指定 --list，忽略 --del");
                }
                if !self.cli.archive.is_empty() {
                    log::warn!("已指定 --list，忽略 --archive {}", self.cli.archive);
                }
            }
            Action::Delete => {
                if !self.cli.archive.is_empty() {
                    log::warn!("已指定 --del，忽略 --archive {}", self.cli.archive);
                }
            }
            Action::Archive(_) => {}
        }

        if !self.cli.log.is_empty() && action != Action::Delete {
            log::warn!("非刪除模式，刪除紀錄檔 {} 不會被寫入", self.cli.log);
        }

        Ok(AppConfig {
            root: self.cli.root.clone(),
            ext: self.cli.ext.clone(),
            min_size: self.cli.size,
            action,
            log_file: self.cli.log.clone(),
        })
    }
}
