use std::io;
use std::path::PathBuf;
use thiserror::Error;

// 走訪過程中的錯誤，任何一種都會立即中止整個走訪
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("無法走訪 {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("無法輸出檔案路徑 {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("無法刪除檔案 {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("檔案 {path} 已刪除，但無法寫入刪除紀錄: {source}")]
    DeletionLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("無法封存檔案 {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("封存目錄 {path} 無效: {reason}")]
    Destination { path: PathBuf, reason: String },
}

impl WalkError {
    /// 發生錯誤的路徑
    pub fn path(&self) -> &PathBuf {
        match self {
            WalkError::Traversal { path, .. }
            | WalkError::List { path, .. }
            | WalkError::Delete { path, .. }
            | WalkError::DeletionLog { path, .. }
            | WalkError::Archive { path, .. }
            | WalkError::Destination { path, .. } => path,
        }
    }

    /// 底層 IO 錯誤的種類，無底層 IO 錯誤時為 None
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            WalkError::Traversal { source, .. } => source.io_error().map(|e| e.kind()),
            WalkError::List { source, .. }
            | WalkError::Delete { source, .. }
            | WalkError::DeletionLog { source, .. }
            | WalkError::Archive { source, .. } => Some(source.kind()),
            WalkError::Destination { .. } => None,
        }
    }
}

impl From<WalkError> for io::Error {
    fn from(err: WalkError) -> Self {
        let kind = err.io_kind().unwrap_or(io::ErrorKind::InvalidInput);
        io::Error::new(kind, err)
    }
}
