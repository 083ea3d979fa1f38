use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Component, Path, PathBuf};
use flate2::{Compression, GzBuilder};
use log::{debug, info};
use pathdiff::diff_paths;
use crate::error::WalkError;

/// 封存檔在目的目錄下的完整路徑：`<dest>/<相對目錄>/<檔名>.gz`
pub fn archive_target(dest_dir: &Path, root: &Path, path: &Path) -> io::Result<PathBuf> {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let rel_dir = diff_paths(parent, root).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("無法計算 {} 相對於 {} 的路徑", parent.display(), root.display()),
        )
    })?;
    // 封存檔必須落在目的目錄之內
    if matches!(rel_dir.components().next(), Some(Component::ParentDir)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} 不在根目錄 {} 之下", path.display(), root.display()),
        ));
    }
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("{} 沒有檔名", path.display()))
    })?;

    let mut dest = file_name.to_os_string();
    dest.push(".gz");
    Ok(dest_dir.join(rel_dir).join(dest))
}

fn check_destination(dest_dir: &Path) -> Result<(), WalkError> {
    let metadata = fs::metadata(dest_dir).map_err(|e| WalkError::Destination {
        path: dest_dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::Destination {
            path: dest_dir.to_path_buf(),
            reason: "不是目錄".to_string(),
        });
    }
    Ok(())
}

/// 以 gzip 壓縮檔案並寫入目的目錄，保留來源的相對目錄結構
///
/// 目的目錄本身必須已存在，其下的子目錄會自動建立。已存在的封存檔會被覆寫，
/// 來源檔案不會被修改。
pub fn archive_file(dest_dir: &Path, root: &Path, path: &Path) -> Result<(), WalkError> {
    check_destination(dest_dir)?;

    let archive_err = |source: io::Error| WalkError::Archive {
        path: path.to_path_buf(),
        source,
    };

    let target = archive_target(dest_dir, root, path).map_err(archive_err)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(archive_err)?;
    }

    let out = File::create(&target).map_err(archive_err)?;
    let input = File::open(path).map_err(archive_err)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut reader = BufReader::with_capacity(4 * 1024 * 1024, input);
    let mut encoder = GzBuilder::new()
        .filename(name)
        .write(BufWriter::new(out), Compression::default());
    let copied = io::copy(&mut reader, &mut encoder).map_err(archive_err)?;
    let mut writer = encoder.finish().map_err(archive_err)?;
    io::Write::flush(&mut writer).map_err(archive_err)?;

    debug!("壓縮 {} 位元組：{} -> {}", copied, path.display(), target.display());
    info!("封存檔案：{} -> {}", path.display(), target.display());
    Ok(())
}
