use std::fs;
use std::io::{self, Write};
use std::path::Path;
use log::{debug, info};
use crate::error::WalkError;
use crate::models::walk::EntryInfo;
use crate::utils::utils::deletion_timestamp;

/// 取得檔名最後一個 `.` 起的副檔名（含點），沒有時回傳空字串
pub fn file_extension(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return String::new(),
    };
    match name.rfind('.') {
        Some(idx) => name[idx..].to_string(),
        None => String::new(),
    }
}

/// 判斷項目是否應略過：目錄、小於最小大小、或副檔名不符
pub fn should_skip(path: &Path, ext: &str, min_size: u64, info: &EntryInfo) -> bool {
    if info.is_dir || info.size < min_size {
        return true;
    }

    if !ext.is_empty() && file_extension(path) != ext {
        return true;
    }

    false
}

pub fn list_file(path: &Path, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", path.display())
}

/// 刪除檔案，成功後才寫入刪除紀錄
///
/// 刪除失敗時直接回傳錯誤，不寫紀錄。紀錄寫入失敗時檔案已不存在。
pub fn delete_file(path: &Path, log_sink: &mut dyn Write) -> Result<(), WalkError> {
    fs::remove_file(path).map_err(|source| WalkError::Delete {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("已移除檔案：{}", path.display());

    writeln!(log_sink, "DELETED FILE: {} {}", deletion_timestamp(), path.display()).map_err(
        |source| WalkError::DeletionLog {
            path: path.to_path_buf(),
            source,
        },
    )?;
    info!("刪除檔案：{}", path.display());
    Ok(())
}
