//! Credential persisted to a single file.
//!
//! The file holds the bare bearer token. Directory and file permissions are
//! tightened on Unix. Storage failures are logged and otherwise treated like
//! an empty slot, which means "signed out".

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::fs;
use std::path::{Path, PathBuf};

use access::CredentialStore;

const APP_DIR: &str = "expenseflow";
const TOKEN_FILE_NAME: &str = "token";

/// `<config dir>/expenseflow/token`, if the platform has a config dir.
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(TOKEN_FILE_NAME))
}

#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|raw| raw.trim().to_owned())
            .filter(|token| !token.is_empty())
    }

    fn save(&self, credential: &str) {
        if let Err(error) = write_private(&self.path, credential) {
            tracing::warn!(path = %self.path.display(), %error, "failed to persist credential");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "credential removed"),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => tracing::warn!(path = %self.path.display(), %error, "failed to remove credential"),
        }
    }
}

fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(error) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!(path = %parent.display(), %error, "failed to chmod 0700");
            }
        }
    }
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
