//! On-disk storage for the JWT token pair
//!
//! Tokens are persisted as a JSON file in an XDG-compliant data directory
//! (`~/.local/share/macrosod/` on Linux) so a login survives across runs.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::data::AuthTokens;

/// Reads and writes the persisted token pair
#[derive(Debug, Clone)]
pub struct TokenStore {
    /// Path of the token file
    path: PathBuf,
}

impl TokenStore {
    /// Creates a TokenStore under the XDG data directory
    ///
    /// Returns `None` if the data directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "macrosod")?;
        let path = project_dirs.data_dir().join("tokens.json");
        Some(Self { path })
    }

    /// Creates a TokenStore writing into a custom directory
    ///
    /// Useful for testing or when a specific location is needed.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            path: dir.join("tokens.json"),
        }
    }

    /// Loads the stored token pair
    ///
    /// Returns `None` if no tokens are stored or the file cannot be parsed.
    pub fn load(&self) -> Option<AuthTokens> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persists a token pair, overwriting any previous one
    pub fn save(&self, tokens: &AuthTokens) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tokens)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }

    /// Removes any stored tokens
    ///
    /// Clearing an already-empty store is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
