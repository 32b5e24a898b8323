//! Asset loading with embedded fallbacks
//!
//! The default config and the drawing page are compiled into the binary.
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded config only
//! - If `CONFIG_FILE` IS set but the file is missing: fall back to the embedded config
//! - If `CONFIG_FILE` IS set and exists: read it from the filesystem
//!
//! The web page is always served from the embedded copy.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded drawing page
#[derive(RustEmbed)]
#[folder = "web/"]
struct EmbeddedWeb;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem config override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Which config [`AssetLoader::read_config`] will return.
    pub fn config_source(&self) -> ConfigSource {
        match self.config_file {
            Some(ref path) if path.exists() => ConfigSource::File(path.clone()),
            _ => ConfigSource::Embedded,
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let ConfigSource::File(path) = self.config_source() {
            tracing::trace!(path = %path.display(), "Loading config from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read an embedded web asset, e.g. `index.html`
    pub fn read_web(&self, name: &str) -> Option<Cow<'static, [u8]>> {
        EmbeddedWeb::get(name).map(|f| f.data)
    }

    /// Write the embedded default config to disk (init command)
    ///
    /// Uses the configured path, or `./config.yaml` if none is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Some(data) = EmbeddedConfig::get("config.yaml") {
            fs::write(&path, &*data.data)?;
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }
}
