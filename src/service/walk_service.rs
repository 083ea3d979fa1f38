use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use log::{debug, info};
use walkdir::WalkDir;
use crate::config::ports::{AppConfig, WalkPort};
use crate::error::WalkError;
use crate::models::walk::{Action, EntryInfo, WalkConfig, WalkSummary};
use crate::utils::file::{delete_file, list_file, should_skip};
use crate::utils::gzip::archive_file;

/// 走訪 `root` 下所有項目，對符合條件的檔案執行設定的動作
///
/// 每個目錄內依檔名排序，不跟隨符號連結。第一個錯誤即中止走訪並回傳。
/// 封存模式下，成功封存的來源路徑會寫入 `list_out`。
pub fn run(root: &Path, list_out: &mut dyn Write, config: WalkConfig<'_>) -> Result<WalkSummary, WalkError> {
    let WalkConfig { ext, min_size, action, log_sink } = config;
    let mut summary = WalkSummary::default();
    let base = trim_cur_dir(root);

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| WalkError::Traversal {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;
        let metadata = entry.metadata().map_err(|source| WalkError::Traversal {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let path = trim_cur_dir(entry.path());
        summary.visited += 1;

        if should_skip(path, &ext, min_size, &EntryInfo::from(&metadata)) {
            summary.skipped += 1;
            continue;
        }

        match &action {
            Action::List => {
                list(path, list_out)?;
                summary.listed += 1;
            }
            Action::Delete => {
                delete_file(path, log_sink)?;
                summary.deleted += 1;
            }
            Action::Archive(dest) => {
                archive_file(dest, base, path)?;
                summary.archived += 1;
                list(path, list_out)?;
                summary.listed += 1;
            }
        }
    }

    debug!("走訪完成：{:?}", summary);
    Ok(summary)
}

// 去掉開頭的 `./`，根目錄為 `.` 時輸出 `dir.log` 而非 `./dir.log`
fn trim_cur_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

fn list(path: &Path, out: &mut dyn Write) -> Result<(), WalkError> {
    list_file(path, out).map_err(|source| WalkError::List {
        path: path.to_path_buf(),
        source,
    })
}

// 由 CLI 配置執行走訪，負責開啟刪除紀錄與標準輸出
pub struct WalkAdapter;

impl WalkAdapter {
    fn open_log_sink(log_file: &str) -> io::Result<Box<dyn Write>> {
        if log_file.is_empty() {
            return Ok(Box::new(io::stdout()));
        }
        let file = OpenOptions::new().append(true).create(true).open(log_file)?;
        Ok(Box::new(file))
    }
}

impl WalkPort for WalkAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<WalkSummary> {
        let mut log_sink = Self::open_log_sink(&config.log_file)?;
        let stdout = io::stdout();
        let mut list_out = stdout.lock();

        info!(
            "開始走訪，根目錄：{}，副檔名：{:?}，最小大小：{}，動作：{:?}",
            config.root, config.ext, config.min_size, config.action
        );
        let summary = run(
            Path::new(&config.root),
            &mut list_out,
            WalkConfig {
                ext: config.ext,
                min_size: config.min_size,
                action: config.action,
                log_sink: log_sink.as_mut(),
            },
        )?;
        list_out.flush()?;
        log_sink.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/c")).unwrap();
        fs::write(dir.path().join("a.log"), "0123456789").unwrap();
        fs::write(dir.path().join("b/c/d.log"), "0123456789").unwrap();
        fs::write(dir.path().join("b/e.txt"), "small").unwrap();
        dir
    }

    fn listed(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn visits_depth_first_in_name_order() {
        let dir = tree();
        let mut out = Vec::new();
        let mut log = Vec::new();
        let summary = run(
            dir.path(),
            &mut out,
            WalkConfig { ext: String::new(), min_size: 0, action: Action::List, log_sink: &mut log },
        )
        .unwrap();

        let root = dir.path();
        assert_eq!(
            listed(out),
            vec![
                root.join("a.log").display().to_string(),
                root.join("b/c/d.log").display().to_string(),
                root.join("b/e.txt").display().to_string(),
            ]
        );
        assert_eq!(summary.visited, 6);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.listed, 3);
        assert!(log.is_empty());
    }

    #[test]
    fn archive_mirrors_tree_and_lists_sources() {
        let dir = tree();
        let dest = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let mut log = Vec::new();
        let summary = run(
            dir.path(),
            &mut out,
            WalkConfig {
                ext: ".log".to_string(),
                min_size: 0,
                action: Action::Archive(dest.path().to_path_buf()),
                log_sink: &mut log,
            },
        )
        .unwrap();

        assert_eq!(summary.archived, 2);
        assert!(dest.path().join("a.log.gz").is_file());
        assert!(dest.path().join("b/c/d.log.gz").is_file());
        assert!(!dest.path().join("b/e.txt.gz").exists());
        assert_eq!(listed(out).len(), 2);
        assert!(dir.path().join("a.log").exists());
    }

    #[test]
    fn archive_error_aborts_before_listing() {
        let dir = tree();
        let missing = dir.path().join("missing");
        let mut out = Vec::new();
        let mut log = Vec::new();
        let err = run(
            dir.path(),
            &mut out,
            WalkConfig {
                ext: String::new(),
                min_size: 0,
                action: Action::Archive(missing),
                log_sink: &mut log,
            },
        )
        .unwrap_err();

        assert!(matches!(err, WalkError::Destination { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_root_is_a_traversal_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nope");
        let mut out = Vec::new();
        let mut log = Vec::new();
        let err = run(
            &root,
            &mut out,
            WalkConfig { ext: String::new(), min_size: 0, action: Action::List, log_sink: &mut log },
        )
        .unwrap_err();

        assert!(matches!(err, WalkError::Traversal { .. }));
        assert_eq!(err.path(), &root);
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn leading_cur_dir_is_trimmed() {
        assert_eq!(trim_cur_dir(Path::new("./dir2/script.sh")), Path::new("dir2/script.sh"));
        assert_eq!(trim_cur_dir(Path::new(".")), Path::new(""));
        assert_eq!(trim_cur_dir(Path::new("testdata/dir.log")), Path::new("testdata/dir.log"));
        assert_eq!(trim_cur_dir(Path::new("../up.log")), Path::new("../up.log"));
    }

    #[test]
    fn file_root_never_archives_outside_destination() {
        let base = tempfile::tempdir().unwrap();
        let src = base.path().join("src");
        let dest = base.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();
        let file = src.join("a.log");
        fs::write(&file, "dummy").unwrap();

        let mut out = Vec::new();
        let mut log = Vec::new();
        let err = run(
            &file,
            &mut out,
            WalkConfig {
                ext: String::new(),
                min_size: 0,
                action: Action::Archive(dest.clone()),
                log_sink: &mut log,
            },
        )
        .unwrap_err();

        assert!(matches!(err, WalkError::Archive { .. }));
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
        assert!(!base.path().join("a.log.gz").exists());
        assert!(out.is_empty());
    }

    // 每寫入一筆刪除紀錄就搶先移除 victim，模擬同時運作的其他程序
    struct RemovingSink {
        victim: std::path::PathBuf,
        buf: Vec<u8>,
    }

    impl Write for RemovingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.victim.exists() {
                fs::remove_file(&self.victim)?;
            }
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn concurrently_removed_file_stops_delete_walk() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.log", "b.log", "c.log"] {
            fs::write(dir.path().join(name), "dummy").unwrap();
        }
        let victim = dir.path().join("b.log");
        let mut sink = RemovingSink { victim: victim.clone(), buf: Vec::new() };

        let mut out = Vec::new();
        let err = run(
            dir.path(),
            &mut out,
            WalkConfig {
                ext: ".log".to_string(),
                min_size: 0,
                action: Action::Delete,
                log_sink: &mut sink,
            },
        )
        .unwrap_err();

        // 走訪時會重新取得中繼資料，消失的檔案在分派刪除前即回報
        assert!(matches!(err, WalkError::Traversal { .. } | WalkError::Delete { .. }));
        assert_eq!(err.path(), &victim);
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));

        assert!(!dir.path().join("a.log").exists());
        assert!(dir.path().join("c.log").exists());
        let log = String::from_utf8(sink.buf).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.trim_end().ends_with("a.log"));
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn list_write_failure_stops_walk() {
        let dir = tree();
        let mut log = Vec::new();
        let err = run(
            dir.path(),
            &mut BrokenSink,
            WalkConfig { ext: String::new(), min_size: 0, action: Action::List, log_sink: &mut log },
        )
        .unwrap_err();

        assert!(matches!(err, WalkError::List { .. }));
        assert_eq!(err.path(), &dir.path().join("a.log"));
    }

    #[test]
    fn log_write_failure_leaves_file_deleted() {
        let dir = tree();
        let mut out = Vec::new();
        let err = run(
            dir.path(),
            &mut out,
            WalkConfig {
                ext: ".log".to_string(),
                min_size: 0,
                action: Action::Delete,
                log_sink: &mut BrokenSink,
            },
        )
        .unwrap_err();

        assert!(matches!(err, WalkError::DeletionLog { .. }));
        assert!(!dir.path().join("a.log").exists());
        assert!(dir.path().join("b/c/d.log").exists());
    }
}
