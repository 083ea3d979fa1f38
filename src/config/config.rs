use clap::Parser;
use std::io;
use std::path::Path;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "file_triage",
    about = "走訪目錄樹，依副檔名與大小篩選檔案後列出、刪除或封存",
    long_about = "走訪指定的根目錄，依副檔名與最小大小篩選檔案，並對每個符合的檔案執行一種動作：列出路徑、刪除（寫入刪除紀錄）或以 gzip 封存至另一個目錄（保留子目錄結構）。\n動作優先順序為 --list > --del > --archive，皆未指定時預設列出。"
)]
pub struct Cli {
    /// 走訪的根目錄
    #[arg(long, default_value = ".")]
    pub root: String,
    /// 篩選的副檔名，例如 .log
    #[arg(long, default_value = "")]
    pub ext: String,
    /// 最小檔案大小（位元組）
    #[arg(long, default_value_t = 0)]
    pub size: u64,
    /// 僅列出檔案
    #[arg(long, default_value_t = false)]
    pub list: bool,
    /// 刪除檔案
    #[arg(long, default_value_t = false)]
    pub del: bool,
    /// 封存目的目錄
    #[arg(long, default_value = "")]
    pub archive: String,
    /// 刪除紀錄檔，未指定時寫入標準輸出
    #[arg(long, default_value = "")]
    pub log: String,
    #[arg(long, default_value = "warn", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

pub fn validate_root_path(root: &str) -> io::Result<&Path> {
    let path = Path::new(root);
    if !path.exists() {
        log::error!("根目錄不存在：{}", root);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("根目錄 '{}' 不存在", root)
        ));
    }
    if !path.is_dir() {
        log::error!("根目錄不是目錄：{}", root);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("根目錄 '{}' 不是目錄", root)
        ));
    }
    Ok(path)
}
