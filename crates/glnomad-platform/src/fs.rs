//! Whole-file reads and writes.
//!
//! Every failure names the path and the mode it was opened in, so a
//! console user can tell a missing map from a read-only directory.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use glnomad_types::{GlnError, Result};

/// `base/game_dir/name`, or `base/game_dir` when `name` is empty.
pub fn build_os_path(base: &Path, game_dir: &str, name: &str) -> PathBuf {
    let mut path = base.join(game_dir);
    if !name.is_empty() {
        path.push(name);
    }
    path
}

fn open_read(path: &Path) -> Result<File> {
    log::debug!("Opening '{}' in read mode", path.display());
    File::open(path).map_err(|e| {
        GlnError::Platform(format!(
            "failed to open {} in read mode: {e}",
            path.display()
        ))
    })
}

fn open_write(path: &Path) -> Result<File> {
    log::debug!("Opening '{}' in write mode", path.display());
    File::create(path).map_err(|e| {
        GlnError::Platform(format!(
            "failed to open {} in write mode: {e}",
            path.display()
        ))
    })
}

/// Read all of `path`.
pub fn load_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = open_read(path)?;
    let len = file_length(path)?;
    let mut buf = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
    log::info!("Reading {len} bytes from {}", path.display());
    file.read_to_end(&mut buf).map_err(|e| {
        GlnError::Platform(format!(
            "failed to read {len} bytes from {}: {e}",
            path.display()
        ))
    })?;
    Ok(buf)
}

/// Create or truncate `path` and write `data` to it.
pub fn save_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = open_write(path)?;
    log::info!("Writing {} bytes to {}", data.len(), path.display());
    file.write_all(data)
        .and_then(|()| file.flush())
        .map_err(|e| {
            GlnError::Platform(format!(
                "failed to write {} bytes to {}: {e}",
                data.len(),
                path.display()
            ))
        })
}

/// Whether `path` names an existing regular file.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Size of `path` in bytes.
pub fn file_length(path: &Path) -> Result<u64> {
    std::fs::metadata(path).map(|m| m.len()).map_err(|e| {
        GlnError::Platform(format!("failed to stat {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_os_path_joins_components() {
        let p = build_os_path(Path::new("/opt/glnomad"), "Data", "maps/e1m1.map");
        assert_eq!(p, Path::new("/opt/glnomad/Data/maps/e1m1.map"));
        let dir = build_os_path(Path::new("/opt/glnomad"), "Data", "");
        assert_eq!(dir, Path::new("/opt/glnomad/Data"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.map");
        save_file(&path, b"spawn 1 1\n").unwrap();
        assert!(file_exists(&path));
        assert_eq!(file_length(&path).unwrap(), 10);
        assert_eq!(load_file(&path).unwrap(), b"spawn 1 1\n");
    }

    #[test]
    fn save_truncates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.map");
        save_file(&path, b"a much longer first version").unwrap();
        save_file(&path, b"short").unwrap();
        assert_eq!(load_file(&path).unwrap(), b"short");
    }

    #[test]
    fn empty_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        save_file(&path, &[]).unwrap();
        assert!(load_file(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_names_read_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.map");
        assert!(!file_exists(&path));
        let err = load_file(&path).unwrap_err();
        match err {
            GlnError::Platform(msg) => {
                assert!(msg.contains("in read mode"), "{msg}");
                assert!(msg.contains("nope.map"), "{msg}");
            },
            other => panic!("unexpected error: {other}"),
        }
        assert!(file_length(&path).is_err());
    }

    #[test]
    fn unwritable_path_names_write_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.map");
        let err = save_file(&path, b"x").unwrap_err();
        assert!(err.to_string().contains("in write mode"), "{err}");
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!file_exists(dir.path()));
    }
}
