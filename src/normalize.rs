use crate::{CacheKey, Dirsize};

use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

fn normalize_path_without_cwd(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut acc, path_component| {
            match path_component {
                Component::Prefix(prefix) => acc.push(prefix.as_os_str()),
                Component::Normal(name) => acc.push(name),
                Component::RootDir => acc.push(Component::RootDir.as_os_str()),
                Component::CurDir => {}
                Component::ParentDir => {
                    acc.pop();
                }
            }
            acc
        })
}

/// Lexically clean `path`: resolve `.` and `..`, drop trailing separators
/// and, on windows, the `\\?\` prefix. Symlinks are not followed.
pub fn clean_path(path: &Path) -> PathBuf {
    let cleaned = match path.absolutize() {
        Ok(absolute) => absolute.into_owned(),
        Err(_) => normalize_path_without_cwd(path),
    };
    dunce::simplified(&cleaned).to_path_buf()
}

/// Map `path` to its key relative to `root`.
///
/// Keys always use `/` as separator and never start or end with one, so
/// `root/a/b`, `root/a/b/` and `root/a/./c/../b` share the key `a/b`.
/// Returns `None` when `path` does not lie under `root` or has a component
/// that is not valid UTF-8; `root` itself maps to the empty key.
pub fn normalize(root: &Path, path: &Path) -> Option<CacheKey> {
    let root = clean_path(root);
    let path = clean_path(path);
    let relative = path.strip_prefix(&root).ok()?;
    let mut names = Vec::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            // a lossy name would collide with every other invalid name
            names.push(name.to_str()?);
        }
    }
    Some(CacheKey::from(names.join("/")))
}

impl Dirsize {
    /// Key of `path` in this handle's namespace.
    pub fn cache_key(&self, path: &Path) -> Option<CacheKey> {
        normalize(&self.root, path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(root: &str, path: &str) -> Option<String> {
        normalize(Path::new(root), Path::new(path)).map(|key| key.to_string())
    }

    #[test]
    fn relative_to_root() {
        assert_eq!(key("/srv/uploads", "/srv/uploads/2/1"), Some("2/1".into()));
        assert_eq!(key("/srv/uploads/", "/srv/uploads/2"), Some("2".into()));
    }

    #[test]
    fn trailing_separator() {
        assert_eq!(key("/srv/uploads", "/srv/uploads/2/1/"), Some("2/1".into()));
        assert_eq!(key("/srv/uploads", "/srv/uploads/2/1//"), Some("2/1".into()));
    }

    #[test]
    fn same_location_same_key() {
        assert_eq!(
            key("/srv/uploads", "/srv/uploads/2/./3/../1"),
            key("/srv/uploads", "/srv/uploads/2/1")
        );
    }

    #[test]
    fn root_is_empty_key() {
        assert_eq!(key("/srv/uploads", "/srv/uploads"), Some(String::new()));
        assert_eq!(key("/srv/uploads", "/srv/uploads/"), Some(String::new()));
    }

    #[test]
    fn outside_root() {
        assert_eq!(key("/srv/uploads", "/srv"), None);
        assert_eq!(key("/srv/uploads", "/srv/uploads-old/1"), None);
        assert_eq!(key("/srv/uploads", "/srv/uploads/../other"), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_has_no_key() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("/srv/uploads");
        let ff = root.join(OsStr::from_bytes(b"\xff"));
        let fe = root.join(OsStr::from_bytes(b"\xfe"));
        assert_eq!(normalize(root, &ff), None);
        assert_eq!(normalize(root, &fe), None);
        assert_eq!(normalize(root, &ff.join("child")), None);
    }

    #[test]
    fn without_cwd() {
        assert_eq!(
            normalize_path_without_cwd(Path::new("/a/./b/../c/")),
            PathBuf::from("/a/c")
        );
    }
}
