//! On-disk handle of the board message.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Persists the Slack `ts` of the board message so restarts keep editing it.
#[derive(Debug, Clone)]
pub struct BoardHandleStore {
    path: PathBuf,
}

impl BoardHandleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored handle. Missing, unreadable or blank files mean "no board yet".
    pub fn load(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let handle = content.trim();
        if handle.is_empty() {
            None
        } else {
            Some(handle.to_string())
        }
    }

    /// Write the handle, owner-readable only from the moment the file exists.
    pub fn save(&self, handle: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        owner_only(&mut options);

        let mut file = options.open(&self.path)?;
        restrict_permissions(&file)?;
        file.write_all(handle.as_bytes())
    }
}

#[cfg(unix)]
fn owner_only(options: &mut OpenOptions) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600);
}

#[cfg(not(unix))]
fn owner_only(_options: &mut OpenOptions) {}

/// `mode` only applies on creation; tighten files left by older runs too.
#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
