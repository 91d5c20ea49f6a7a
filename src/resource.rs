//! Locating (and optionally fetching) the ontology files on local disk.
//!
//! A resource name `R` lives at `<data_dir>/R.json`. The well-known files are
//! published under `http://purl.obolibrary.org/obo/`; with the `download`
//! feature a missing file is fetched from there, otherwise it is reported as
//! [`Error::MissingResource`].

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default directory holding downloaded ontology files.
pub const DEFAULT_DATA_DIR: &str = "/usr/local/share/mondo";

/// Environment variable overriding [`ResourceConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "MONDO_DATA_DIR";

/// Environment variable forcing a re-download when set to `1`, `true` or
/// `yes` (case-insensitive).
pub const FORCE_DOWNLOAD_ENV: &str = "MONDO_FORCE_DOWNLOAD";

const PURL_BASE: &str = "http://purl.obolibrary.org/obo";

/// Files that can be fetched, keyed by file name.
pub static KNOWN_FILES: &[&str] = &["mondo.json", "mondo.owl", "mondo.obo"];

/// Where ontology files live and how they are refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    pub data_dir: PathBuf,
    /// Fetch even when the file is already present.
    pub overwrite: bool,
    /// Download attempts per file before giving up.
    pub retries: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            overwrite: false,
            retries: 3,
        }
    }
}

impl ResourceConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Self::default() }
    }

    /// Defaults, overridden by `MONDO_DATA_DIR` and `MONDO_FORCE_DOWNLOAD`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(flag) = std::env::var(FORCE_DOWNLOAD_ENV) {
            config.overwrite = parse_flag(&flag);
        }
        config
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Local path of resource `name` (`mondo` → `<data_dir>/mondo.json`).
    pub fn find(&self, name: &str) -> PathBuf {
        self.data_dir.join(file_name(name))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn file_name(resource: &str) -> String {
    if resource.ends_with(".json") {
        resource.to_string()
    } else {
        format!("{resource}.json")
    }
}

/// Source URL of a well-known file.
pub fn url_for(file_name: &str) -> Option<String> {
    KNOWN_FILES
        .contains(&file_name)
        .then(|| format!("{PURL_BASE}/{file_name}"))
}

/// Path of resource `name`, fetching it first if it is missing (or if
/// `overwrite` is set) and the `download` feature is enabled.
///
/// A resource that is absent and cannot be obtained is always reported as
/// [`Error::MissingResource`], whatever the reason (unknown file, failed
/// download, downloader compiled out). Local filesystem failures surface as
/// [`Error::Io`]. A file that is present stays usable when `overwrite` is
/// set but the downloader is compiled out.
pub fn ensure_local(name: &str, config: &ResourceConfig) -> Result<PathBuf> {
    let path = config.find(name);
    if path.exists() {
        if !config.overwrite {
            return Ok(path);
        }
        if !cfg!(feature = "download") {
            tracing::warn!(path = %path.display(), "overwrite requested but the `download` feature is disabled");
            return Ok(path);
        }
    }
    let file = file_name(name);
    fetch_into(&file, &path, config).map_err(|e| match e {
        Error::UnknownResource(reason) | Error::Download(reason) => Error::MissingResource {
            resource: file.clone(),
            path: path.clone(),
            reason,
        },
        other => other,
    })?;
    Ok(path)
}

/// Fetch every well-known file into `data_dir`, skipping files already
/// present unless `overwrite` is set. Returns the paths actually written.
///
/// Without the `download` feature nothing can be written: any file that
/// needs fetching fails with [`Error::Download`] (or
/// [`Error::MissingResource`] if it is absent).
pub fn download_all(config: &ResourceConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for name in KNOWN_FILES {
        let path = config.data_dir.join(name);
        if path.exists() && !config.overwrite {
            continue;
        }
        fetch_into(name, &path, config)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(feature = "download")]
fn fetch_into(file: &str, path: &Path, config: &ResourceConfig) -> Result<()> {
    let url = url_for(file).ok_or_else(|| Error::UnknownResource(file.to_string()))?;
    let bytes = fetch::get_with_retry(&url, config.retries.max(1))?;
    write_atomically(path, &bytes)?;
    tracing::info!(url = %url, path = %path.display(), "downloaded ontology file");
    Ok(())
}

/// Write into a temporary sibling, then rename over `path`. An interrupted
/// write never leaves a truncated file at `path`.
#[cfg(feature = "download")]
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(not(feature = "download"))]
fn fetch_into(file: &str, path: &Path, _config: &ResourceConfig) -> Result<()> {
    if path.exists() {
        return Err(Error::Download(format!(
            "cannot re-fetch {file}: the `download` feature is disabled"
        )));
    }
    Err(Error::MissingResource {
        resource: file.to_string(),
        path: path.to_path_buf(),
        reason: "the `download` feature is disabled".into(),
    })
}

#[cfg(feature = "download")]
mod fetch {
    use std::time::Duration;

    use tracing::{info, warn};

    use crate::{Error, Result};

    pub(super) fn get_with_retry(url: &str, attempts: u32) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| Error::Download(format!("failed to create HTTP client: {e}")))?;

        let mut last = String::new();
        for attempt in 1..=attempts {
            info!(url, attempt, "downloading");
            match get_once(&client, url) {
                Ok(bytes) => return Ok(bytes),
                Err(e) => {
                    warn!(url, attempt, error = %e, "download failed");
                    last = e;
                    if attempt < attempts {
                        std::thread::sleep(Duration::from_secs(u64::from(attempt)));
                    }
                }
            }
        }
        Err(Error::Download(format!("{url}: {last}")))
    }

    fn get_once(client: &reqwest::blocking::Client, url: &str) -> std::result::Result<Vec<u8>, String> {
        let response = client.get(url).send().map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }
        response.bytes().map(|b| b.to_vec()).map_err(|e| e.to_string())
    }
}
