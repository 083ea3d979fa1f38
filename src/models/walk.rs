use std::fs::Metadata;
use std::io::Write;
use std::path::PathBuf;

// 每個符合條件的檔案只會執行其中一種動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Delete,
    Archive(PathBuf),
}

impl Action {
    /// 依旗標決定動作，優先順序為 list > del > archive，皆未指定時預設列出
    pub fn from_flags(list: bool, del: bool, archive: &str) -> Self {
        if list {
            Action::List
        } else if del {
            Action::Delete
        } else if !archive.is_empty() {
            Action::Archive(PathBuf::from(archive))
        } else {
            Action::List
        }
    }
}

// 走訪時每個項目的中繼資料
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    pub is_dir: bool,
    pub size: u64,
}

impl From<&Metadata> for EntryInfo {
    fn from(metadata: &Metadata) -> Self {
        EntryInfo {
            is_dir: metadata.is_dir(),
            size: metadata.len(),
        }
    }
}

pub struct WalkConfig<'a> {
    pub ext: String,
    pub min_size: u64,
    pub action: Action,
    pub log_sink: &'a mut dyn Write,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkSummary {
    pub visited: usize,
    pub skipped: usize,
    pub listed: usize,
    pub deleted: usize,
    pub archived: usize,
}
