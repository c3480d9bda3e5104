use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Storage;
use crate::errors::SessionError;

/// One file per slot inside a directory.
///
/// Writes land in a uniquely named sibling file first and are renamed into
/// place, so readers see either the old value or the new one.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the slot directory. On unix it is
    /// restricted to the owner.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(slot_name(key))
    }
}

/// Keys are fixed slot names; keep anything path-like out of them.
fn slot_name(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Slots hold the bearer token: owner read/write only on unix.
fn create_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

impl Storage for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let target = self.slot_path(key);
        let staging = self
            .dir
            .join(format!(".{}.{}.tmp", slot_name(key), uuid::Uuid::new_v4()));
        let written = create_private(&staging).and_then(|mut file| {
            file.write_all(value.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        debug!("Wrote session slot '{}' to {}", key, target.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
