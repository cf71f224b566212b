use crate::{CacheMap, CacheStore, Error, RResult};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Keeps every namespace as `<dir>/<namespace>.json`.
///
/// Every write goes to its own temp file in `dir` which is then renamed over
/// the target, so readers never observe a half written map and concurrent
/// writers never share a temp file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, namespace: &str) -> PathBuf {
        let stem: String = namespace
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c => c,
            })
            .collect();
        self.dir.join(format!("{stem}.json"))
    }
}

impl CacheStore for JsonFileStore {
    #[tracing::instrument]
    fn read(&self, namespace: &str) -> RResult<Option<CacheMap>> {
        let path = self.file_path(namespace);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Error::Io(error)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|error| Error::UnexpectedJson((path.into(), error)))
    }

    #[tracing::instrument(skip(map), fields(entries = map.len()))]
    fn write(&self, namespace: &str, map: &CacheMap) -> RResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.file_path(namespace);
        let content = serde_json::to_vec(map)
            .map_err(|error| Error::UnexpectedJson((path.clone().into(), error)))?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&content)?;
        tmp.persist(&path)
            .map(|_| ())
            .map_err(|error| Error::Io(error.error))
    }

    #[tracing::instrument]
    fn delete(&self, namespace: &str) -> RResult<()> {
        match fs::remove_file(self.file_path(namespace)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::Io(error)),
        }
    }
}
