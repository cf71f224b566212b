use std::ffi::OsString;
use std::fmt::Debug;
use std::fs::FileType;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, sockets, devices. Never counted.
    Other,
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub kind: EntryKind,
    /// Byte length, only meaningful for files.
    pub len: u64,
}

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
    pub len: u64,
}

pub trait FileSystem: Sync + Send + Debug {
    fn stat(&self, path: &Path) -> io::Result<Stat>;
    fn read_directory(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.stat(path)
            .map_or(false, |stat| stat.kind == EntryKind::Directory)
    }
}

/// The real filesystem. Symlinks are reported as [`EntryKind::Other`] and
/// never followed.
#[derive(Debug, Default)]
pub struct FS {}

impl FileSystem for FS {
    fn stat(&self, path: &Path) -> io::Result<Stat> {
        std::fs::symlink_metadata(path).map(|meta| Stat {
            kind: meta.file_type().into(),
            len: meta.len(),
        })
    }

    fn read_directory(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            // Entries can disappear between `readdir` and `stat`.
            let Ok(entry) = entry else { continue };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let kind = EntryKind::from(file_type);
            let len = if kind == EntryKind::File {
                match entry.metadata() {
                    Ok(meta) => meta.len(),
                    Err(_) => continue,
                }
            } else {
                0
            };
            entries.push(DirEntry {
                name: entry.file_name(),
                kind,
                len,
            });
        }
        Ok(entries)
    }
}
