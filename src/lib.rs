pub mod error;

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod models {
    pub mod walk;
}

pub mod service {
    pub mod config_service;
    pub mod walk_service;
}

pub mod action {
    pub mod cli;
}

pub mod utils {
    pub mod file;
    pub mod gzip;
    pub mod utils;
}

pub use error::WalkError;
pub use models::walk::{Action, EntryInfo, WalkConfig, WalkSummary};
pub use service::walk_service::run;
