//! Groq API key lookup
//!
//! The key is read from `GROQ_API_KEY` first and from
//! `~/.config/lifeloom/secrets.toml` second. The secrets file is kept apart
//! from `config.toml` and is only read when no other user can access it.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Environment variable holding the Groq API key
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

const TEMPLATE: &str = "\
# LifeLoom secrets - keep this file private (chmod 600)

[groq]
# Create a key at https://console.groq.com/keys
api_key = \"\"
";

/// Where an API key was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// The `GROQ_API_KEY` environment variable
    Environment,
    /// The secrets file
    File,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Environment => write!(f, "{} environment variable", GROQ_API_KEY_ENV),
            KeySource::File => write!(f, "secrets file"),
        }
    }
}

/// A resolved, non-blank API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    value: String,
    source: KeySource,
}

impl ApiKey {
    pub fn source(&self) -> &KeySource {
        &self.source
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SecretsFile {
    groq: GroqSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroqSection {
    api_key: Option<String>,
}

/// Credentials available to the process
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    file_key: Option<String>,
}

impl Secrets {
    /// Read the secrets file at its default location, if there is one
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read a specific secrets file
    pub fn load_from(path: &Path) -> Result<Self> {
        ensure_private(path)?;

        let contents = std::fs::read_to_string(path)?;
        let file: SecretsFile = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

        Ok(Self {
            file_key: file.groq.api_key,
        })
    }

    /// `~/.config/lifeloom/secrets.toml` on Unix
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lifeloom").join("secrets.toml"))
    }

    /// The Groq key, with `GROQ_API_KEY` taking precedence over the file
    pub fn groq_api_key(&self) -> Option<ApiKey> {
        let from_env = std::env::var(GROQ_API_KEY_ENV).ok();
        let key = resolve_key(from_env.as_deref(), self.file_key.as_deref());

        if let Some(ref key) = key {
            debug!(source = %key.source, "Resolved Groq API key");
        }

        key
    }

    /// Write an empty template to the default path
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        write_template(&path)?;
        Ok(path)
    }
}

/// Pick the first non-blank key, environment before file
fn resolve_key(from_env: Option<&str>, from_file: Option<&str>) -> Option<ApiKey> {
    let candidates = [
        (from_env, KeySource::Environment),
        (from_file, KeySource::File),
    ];

    candidates.into_iter().find_map(|(value, source)| {
        let value = value?.trim();
        (!value.is_empty()).then(|| ApiKey {
            value: value.to_string(),
            source,
        })
    })
}

#[cfg(unix)]
fn ensure_private(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "{} is accessible by other users (mode {:o}); run: chmod 600 {}",
            path.display(),
            mode,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_private(_path: &Path) -> Result<()> {
    Ok(())
}

/// Create the template file with owner-only permissions, never overwriting
fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::Config(format!(
            "{} already exists, edit it instead",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(TEMPLATE.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_KEY: &str = "[groq]\napi_key = \"gsk_from_file\"\n";

    #[cfg(unix)]
    fn write_with_mode(path: &Path, contents: &str, mode: u32) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::write(path, contents).unwrap();
        let perms = std::fs::Permissions::from_mode(mode);
        std::fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn test_env_key_wins_over_file() {
        let key = resolve_key(Some("gsk_env"), Some("gsk_file")).unwrap();
        assert_eq!(key.source(), &KeySource::Environment);
        assert_eq!(key.into_inner(), "gsk_env");
    }

    #[test]
    fn test_blank_env_key_falls_back_to_file() {
        let key = resolve_key(Some("   "), Some("  gsk_file\n")).unwrap();
        assert_eq!(key.source(), &KeySource::File);
        assert_eq!(key.into_inner(), "gsk_file");
    }

    #[test]
    fn test_no_usable_key() {
        assert!(resolve_key(None, None).is_none());
        assert!(resolve_key(Some(""), Some(" ")).is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = resolve_key(Some("gsk_very_secret"), None).unwrap();
        let shown = format!("{:?}", key);
        assert!(shown.contains("Environment"));
        assert!(!shown.contains("gsk_very_secret"));
    }

    #[cfg(unix)]
    #[test]
    fn test_template_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifeloom").join("secrets.toml");

        write_template(&path).unwrap();

        // the fresh template is private and holds no key yet
        let secrets = Secrets::load_from(&path).unwrap();
        assert_eq!(secrets.file_key.as_deref(), Some(""));
        assert!(resolve_key(None, secrets.file_key.as_deref()).is_none());
    }

    #[test]
    fn test_template_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, WITH_KEY).unwrap();

        let err = write_template(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, WITH_KEY);
    }

    #[cfg(unix)]
    #[test]
    fn test_shared_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        write_with_mode(&path, WITH_KEY, 0o640);

        let err = Secrets::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("accessible by other users"));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_read_from_private_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        write_with_mode(&path, WITH_KEY, 0o600);

        let secrets = Secrets::load_from(&path).unwrap();
        let key = resolve_key(None, secrets.file_key.as_deref()).unwrap();
        assert_eq!(key.source(), &KeySource::File);
        assert_eq!(key.into_inner(), "gsk_from_file");
    }

    #[cfg(unix)]
    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        write_with_mode(&path, "[groq\napi_key = ", 0o600);

        let err = Secrets::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
